/*!
Pattern based date formatting and the parsing that feeds it.

The formatting routine itself is [`format`], re-exported at the crate
root. The `parse` submodule turns date strings into a
[`Moment`](crate::Moment) and `util` holds the integer-to-decimal
machinery shared by everything that writes digits.
*/

use alloc::string::String;

use crate::{
    error::Error,
    fmt::util::DecimalFormatter,
    moment::Moment,
    util::escape,
    value::DateValue,
};

pub(crate) mod parse;
pub(crate) mod util;

/// Formats a date according to a pattern of substitution tokens.
///
/// Every occurrence of a token in `pattern` is replaced with the
/// corresponding part of the date. Characters that start no token pass
/// through to the output unchanged. There is no escaping mechanism, so
/// a pattern like `Today` substitutes the `d` and `a` in its middle.
/// Matching is greedy: at each position the longest token wins, so
/// `MMMM` is one token and never four `M`s.
///
/// The date may be given as a [`Moment`], as an integer or float count
/// of milliseconds since the Unix epoch, as a date string, or as
/// [`DateValue::Now`]. Timestamps and strings are converted to local
/// wall-clock time; a `Moment` is formatted with the fields and offset
/// it already carries.
///
/// # Tokens
///
/// | Token | Meaning | Example |
/// | ----- | ------- | ------- |
/// | `YYYY` | full year, natural width | `2015` |
/// | `YY` | last two digits of the year | `15` |
/// | `MMMM` | full month name | `February` |
/// | `MMM` | month name, abbreviated | `Feb` |
/// | `MM` | month, zero padded | `02` |
/// | `M` | month | `2` |
/// | `DDD` | full weekday name | `Monday` |
/// | `DD` | weekday name, abbreviated | `Mon` |
/// | `D` | weekday name, two letters | `Mo` |
/// | `dd` | day of month, zero padded | `02` |
/// | `d` | day of month | `2` |
/// | `HH` | hour on the 24 hour clock, zero padded | `04` |
/// | `H` | hour on the 24 hour clock | `4` |
/// | `hh` | hour on the 12 hour clock, zero padded | `04` |
/// | `h` | hour on the 12 hour clock | `4` |
/// | `mm` | minute, zero padded | `09` |
/// | `m` | minute | `9` |
/// | `ss` | second, zero padded | `03` |
/// | `s` | second | `3` |
/// | `ff` | millisecond, zero padded | `007` |
/// | `f` | millisecond | `7` |
/// | `A` | `AM` or `PM` | `AM` |
/// | `a` | `am` or `pm` | `am` |
/// | `ZZ` | UTC offset | `+0000` |
/// | `Z` | UTC offset with a separator | `+00:00` |
/// | `ISODate` | shorthand for `YYYY-MM-dd` | `2015-02-02` |
/// | `ISOTime` | shorthand for `hh:mm:ss` | `04:09:03` |
/// | `ISODateTime` | shorthand for `YYYY-MM-dd hh:mm:ss` | |
/// | `ISODateTimeTZ` | shorthand for `YYYY-MM-dd hh:mm:ss ZZ` | |
///
/// Note that the `ISOTime` family renders hours on the 12 hour clock,
/// as its `hh` expansion implies.
///
/// # Errors
///
/// A pattern that isn't valid UTF-8 is reported as an invalid `format`
/// argument, checked before the date is looked at. A date that can't be
/// normalized (an unparseable string, a non-finite or out of range
/// timestamp) is reported as an invalid `date` argument. See
/// [`Error::is_invalid_format`] and [`Error::is_invalid_date`].
///
/// # Example
///
/// ```
/// use datemask::{format, Moment};
///
/// let m = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
/// assert_eq!(format("YYYY-MM-dd HH:mm:ss", m)?, "2015-02-02 04:09:03");
/// assert_eq!(format("MMMM d, YYYY h:mm a", m)?, "February 2, 2015 4:09 am");
/// // No escaping: tokens substitute even mid-word.
/// assert_eq!(format("Today", m)?, "To2amy");
/// # Ok::<(), datemask::Error>(())
/// ```
pub fn format<'a>(
    pattern: impl AsRef<[u8]>,
    value: impl Into<DateValue<'a>>,
) -> Result<String, Error> {
    let pattern = pattern.as_ref();
    // The pattern argument is validated first, before the date argument
    // is even looked at.
    let pattern = match core::str::from_utf8(pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            return Err(err!(
                "pattern {:?} is not valid UTF-8 at offset {}",
                escape::Bytes(pattern),
                err.valid_up_to(),
            )
            .context(Error::format_arg()));
        }
    };
    let moment = value.into().into_moment()?;
    trace!("formatting {moment:?} with pattern {pattern:?}");
    let mut out = String::with_capacity(pattern.len());
    substitute(pattern, &moment, &mut out);
    Ok(out)
}

/// Formats the current moment, in local time, according to a pattern.
///
/// This is [`format`] with the date argument left out.
///
/// # Example
///
/// ```
/// let year = datemask::format_now("YYYY")?;
/// assert_eq!(year.len(), 4);
/// # Ok::<(), datemask::Error>(())
/// ```
#[cfg(feature = "std")]
pub fn format_now(pattern: impl AsRef<[u8]>) -> Result<String, Error> {
    format(pattern, DateValue::Now)
}

/// The English month names, indexed by `month - 1`.
///
/// Abbreviations are the first three letters, so no second table is
/// needed. The same holds for `WEEKDAYS` below, whose two letter
/// "minimal" forms are the first two letters.
pub(crate) static MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The English weekday names, indexed by Sunday-is-zero weekday number.
static WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A substitution token: the text matched in a pattern and the routine
/// rendering its replacement.
struct Token {
    name: &'static str,
    render: fn(&Moment, &mut String),
}

/// The token table.
///
/// Sorted by name length, longest first. The scan in `substitute` takes
/// the first entry that prefixes the remaining pattern, which together
/// with this ordering implements greedy longest-match.
static TOKENS: &[Token] = &[
    Token { name: "ISODateTimeTZ", render: iso_date_time_tz },
    Token { name: "ISODateTime", render: iso_date_time },
    Token { name: "ISODate", render: iso_date },
    Token { name: "ISOTime", render: iso_time },
    Token { name: "YYYY", render: year },
    Token { name: "MMMM", render: month_name },
    Token { name: "DDD", render: weekday_name },
    Token { name: "MMM", render: month_abbrev },
    Token { name: "YY", render: year_short },
    Token { name: "MM", render: month_padded },
    Token { name: "DD", render: weekday_abbrev },
    Token { name: "dd", render: day_padded },
    Token { name: "HH", render: hour_padded },
    Token { name: "hh", render: hour_clock12_padded },
    Token { name: "mm", render: minute_padded },
    Token { name: "ss", render: second_padded },
    Token { name: "ff", render: millisecond_padded },
    Token { name: "ZZ", render: offset_basic },
    Token { name: "M", render: month },
    Token { name: "D", render: weekday_min },
    Token { name: "d", render: day },
    Token { name: "H", render: hour },
    Token { name: "h", render: hour_clock12 },
    Token { name: "m", render: minute },
    Token { name: "s", render: second },
    Token { name: "f", render: millisecond },
    Token { name: "A", render: meridiem_upper },
    Token { name: "a", render: meridiem_lower },
    Token { name: "Z", render: offset_extended },
];

/// Replaces every token in `pattern`, appending the result to `out`.
///
/// This is a single left-to-right scan. Alias tokens re-enter this
/// routine with their expansion as the pattern; expansions contain no
/// alias tokens, so the recursion is at most one level deep.
fn substitute(pattern: &str, moment: &Moment, out: &mut String) {
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token.name) {
                (token.render)(moment, out);
                rest = tail;
                continue 'scan;
            }
        }
        // No token starts here. The character passes through verbatim.
        let Some(ch) = rest.chars().next() else { break };
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
}

/// Shared digit formatters for the renderers below.
static PLAIN: DecimalFormatter = DecimalFormatter::new();
static TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
static THREE: DecimalFormatter = DecimalFormatter::new().padding(3);

/// Maps a 24 hour clock reading to the 12 hour clock.
fn clock12(hour: i8) -> i8 {
    match hour {
        0 => 12,
        1..=12 => hour,
        _ => hour - 12,
    }
}

fn year(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.year())).as_str());
}

fn year_short(moment: &Moment, out: &mut String) {
    // The last two digits, regardless of the year's sign or width.
    let short = (moment.year() % 100).abs();
    out.push_str(TWO.format(i64::from(short)).as_str());
}

fn month_name(moment: &Moment, out: &mut String) {
    out.push_str(MONTHS[moment.month() as usize - 1]);
}

fn month_abbrev(moment: &Moment, out: &mut String) {
    out.push_str(&MONTHS[moment.month() as usize - 1][..3]);
}

fn month_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(moment.month())).as_str());
}

fn month(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.month())).as_str());
}

fn weekday_name(moment: &Moment, out: &mut String) {
    out.push_str(WEEKDAYS[moment.weekday().to_sunday_zero_offset() as usize]);
}

fn weekday_abbrev(moment: &Moment, out: &mut String) {
    let name = WEEKDAYS[moment.weekday().to_sunday_zero_offset() as usize];
    out.push_str(&name[..3]);
}

fn weekday_min(moment: &Moment, out: &mut String) {
    let name = WEEKDAYS[moment.weekday().to_sunday_zero_offset() as usize];
    out.push_str(&name[..2]);
}

fn day_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(moment.day())).as_str());
}

fn day(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.day())).as_str());
}

fn hour_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(moment.hour())).as_str());
}

fn hour(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.hour())).as_str());
}

fn hour_clock12_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(clock12(moment.hour()))).as_str());
}

fn hour_clock12(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(clock12(moment.hour()))).as_str());
}

fn minute_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(moment.minute())).as_str());
}

fn minute(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.minute())).as_str());
}

fn second_padded(moment: &Moment, out: &mut String) {
    out.push_str(TWO.format(i64::from(moment.second())).as_str());
}

fn second(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.second())).as_str());
}

fn millisecond_padded(moment: &Moment, out: &mut String) {
    out.push_str(THREE.format(i64::from(moment.millisecond())).as_str());
}

fn millisecond(moment: &Moment, out: &mut String) {
    out.push_str(PLAIN.format(i64::from(moment.millisecond())).as_str());
}

fn meridiem_upper(moment: &Moment, out: &mut String) {
    out.push_str(if moment.hour() > 11 { "PM" } else { "AM" });
}

fn meridiem_lower(moment: &Moment, out: &mut String) {
    out.push_str(if moment.hour() > 11 { "pm" } else { "am" });
}

fn offset_basic(moment: &Moment, out: &mut String) {
    moment.offset().write_to(false, out);
}

fn offset_extended(moment: &Moment, out: &mut String) {
    moment.offset().write_to(true, out);
}

fn iso_date(moment: &Moment, out: &mut String) {
    substitute("YYYY-MM-dd", moment, out);
}

fn iso_time(moment: &Moment, out: &mut String) {
    substitute("hh:mm:ss", moment, out);
}

fn iso_date_time(moment: &Moment, out: &mut String) {
    substitute("YYYY-MM-dd hh:mm:ss", moment, out);
}

fn iso_date_time_tz(moment: &Moment, out: &mut String) {
    substitute("YYYY-MM-dd hh:mm:ss ZZ", moment, out);
}
