/*!
The canonical date representation that formatting reads from.

A [`Moment`] is a Gregorian calendar date, a wall-clock time to
millisecond precision and the UTC offset that local time had at that
moment. It is derived once per formatting call from whatever the caller
passed in (a `Moment`, a timestamp, a string or nothing at all) and never
mutated afterwards.
*/

use crate::{
    error::Error,
    fmt::util::DecimalFormatter,
    tz::{system_offset, Offset},
};

/// The minimum supported year.
const MIN_YEAR: i16 = -9999;
/// The maximum supported year.
const MAX_YEAR: i16 = 9999;

/// The day range, in days since the Unix epoch, implied by the year range.
const MIN_EPOCH_DAY: i32 = to_epoch_day(MIN_YEAR, 1, 1);
const MAX_EPOCH_DAY: i32 = to_epoch_day(MAX_YEAR, 12, 31);

/// The timestamp range, in milliseconds since the Unix epoch, implied by
/// the day range. These bounds are nominal: whether a timestamp near the
/// edge is accepted also depends on the local offset applied to it.
const MIN_TIMESTAMP_MS: i64 = (MIN_EPOCH_DAY as i64) * 86_400_000;
const MAX_TIMESTAMP_MS: i64 = (MAX_EPOCH_DAY as i64 + 1) * 86_400_000 - 1;

/// A calendar date, a clock time and a UTC offset.
///
/// This is the normalized representation every formatting call works
/// from. The fields denote *local* wall-clock values; the offset records
/// how far that local clock sits from UTC. In other words, a `Moment`
/// pins down both "what the clock on the wall said" and "which instant
/// that was".
///
/// The supported year range is `-9999..=9999`. Construction checks every
/// field and fails with a range error outside of it.
///
/// # Construction
///
/// Use [`Moment::new`] for checked construction at a UTC offset of zero,
/// [`Moment::with_offset`] to attach a different offset,
/// [`Moment::from_timestamp`] to convert an instant to local time, or
/// [`Moment::now`] (with the `std` feature) for the current moment.
/// [`Moment::constant`] is a `const`, panicking variant of `new` meant
/// for fixtures.
///
/// # Example
///
/// ```
/// use datemask::Moment;
///
/// let m = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
/// assert_eq!(m.to_string(), "2015-02-02T04:09:03.007+00:00");
/// # Ok::<(), datemask::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Moment {
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: i16,
    offset: Offset,
}

impl Moment {
    /// Creates a new moment from its constituent parts, at a UTC offset
    /// of zero.
    ///
    /// # Errors
    ///
    /// This returns an error when any part is out of range: the year must
    /// be in `-9999..=9999`, the month in `1..=12`, the day valid for the
    /// given year and month, the hour in `0..=23`, the minute and second
    /// in `0..=59` and the millisecond in `0..=999`.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Moment;
    ///
    /// assert!(Moment::new(2024, 2, 29, 0, 0, 0, 0).is_ok());
    /// assert!(Moment::new(2023, 2, 29, 0, 0, 0, 0).is_err());
    /// ```
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Result<Moment, Error> {
        if !(MIN_YEAR <= year && year <= MAX_YEAR) {
            return Err(Error::range("year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1 <= month && month <= 12) {
            return Err(Error::range("month", month, 1, 12));
        }
        let last = days_in_month(year, month);
        if !(1 <= day && day <= last) {
            return Err(Error::range("day", day, 1, last));
        }
        if !(0 <= hour && hour <= 23) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0 <= minute && minute <= 59) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0 <= second && second <= 59) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0 <= millisecond && millisecond <= 999) {
            return Err(Error::range("millisecond", millisecond, 0, 999));
        }
        Ok(Moment {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            offset: Offset::UTC,
        })
    }

    /// Like [`Moment::new`], but `const` and panicking on any out of
    /// range part. Meant for constants and test fixtures, where the
    /// panic is a compile time error.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Moment;
    ///
    /// const FEB: Moment = Moment::constant(2015, 2, 2, 4, 9, 3, 7);
    /// assert_eq!(FEB.hour(), 4);
    /// ```
    pub const fn constant(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Moment {
        if year < MIN_YEAR || year > MAX_YEAR {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        if day < 1 || day > days_in_month(year, month) {
            panic!("invalid day");
        }
        if hour < 0 || hour > 23 {
            panic!("invalid hour");
        }
        if minute < 0 || minute > 59 {
            panic!("invalid minute");
        }
        if second < 0 || second > 59 {
            panic!("invalid second");
        }
        if millisecond < 0 || millisecond > 999 {
            panic!("invalid millisecond");
        }
        Moment {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            offset: Offset::UTC,
        }
    }

    /// Returns this moment with the given UTC offset attached.
    ///
    /// The wall-clock fields are left untouched. That is, this relabels
    /// which instant the same local time refers to; it does not convert
    /// between offsets.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::{Moment, Offset};
    ///
    /// let utc = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
    /// let bom = utc.with_offset(Offset::from_seconds(19_800)?);
    /// assert_eq!(bom.hour(), 4);
    /// // Same wall clock, different instant.
    /// assert_ne!(utc.timestamp(), bom.timestamp());
    /// # Ok::<(), datemask::Error>(())
    /// ```
    pub const fn with_offset(self, offset: Offset) -> Moment {
        Moment { offset, ..self }
    }

    /// Converts a Unix timestamp in milliseconds to a moment in local
    /// time.
    ///
    /// The local offset for that instant is looked up from the host
    /// environment. On builds without that capability, local time is
    /// UTC.
    ///
    /// # Errors
    ///
    /// Returns an error when the timestamp lands outside the supported
    /// year range.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Moment;
    ///
    /// let m = Moment::from_timestamp(1_422_850_143_007)?;
    /// assert_eq!(m.timestamp(), 1_422_850_143_007);
    /// # Ok::<(), datemask::Error>(())
    /// ```
    pub fn from_timestamp(timestamp_ms: i64) -> Result<Moment, Error> {
        let offset = system_offset(timestamp_ms);
        Moment::from_instant(timestamp_ms, offset)
    }

    /// Converts an instant to the moment it denotes at the given offset.
    pub(crate) fn from_instant(
        timestamp_ms: i64,
        offset: Offset,
    ) -> Result<Moment, Error> {
        let local_ms = match timestamp_ms
            .checked_add(i64::from(offset.seconds()) * 1_000)
        {
            Some(ms) => ms,
            None => {
                return Err(Error::range(
                    "timestamp",
                    timestamp_ms,
                    MIN_TIMESTAMP_MS,
                    MAX_TIMESTAMP_MS,
                ));
            }
        };
        let epoch_day = local_ms.div_euclid(86_400_000);
        if !(i64::from(MIN_EPOCH_DAY) <= epoch_day
            && epoch_day <= i64::from(MAX_EPOCH_DAY))
        {
            return Err(Error::range(
                "timestamp",
                timestamp_ms,
                MIN_TIMESTAMP_MS,
                MAX_TIMESTAMP_MS,
            ));
        }
        let (year, month, day) = from_epoch_day(epoch_day as i32);

        let ms_of_day = local_ms.rem_euclid(86_400_000);
        let second_of_day = (ms_of_day / 1_000) as i32;
        Ok(Moment {
            year,
            month,
            day,
            hour: (second_of_day / 3_600) as i8,
            minute: (second_of_day / 60 % 60) as i8,
            second: (second_of_day % 60) as i8,
            millisecond: (ms_of_day % 1_000) as i16,
            offset,
        })
    }

    /// Returns the current moment in local time.
    ///
    /// # Panics
    ///
    /// When the system clock reports a time outside the supported range.
    #[cfg(feature = "std")]
    pub fn now() -> Moment {
        let now = std::time::SystemTime::now();
        let timestamp_ms = match now.duration_since(std::time::UNIX_EPOCH) {
            Ok(dur) => i64::try_from(dur.as_millis()).unwrap_or(i64::MAX),
            Err(err) => {
                let dur = err.duration();
                i64::try_from(dur.as_millis())
                    .map(|ms| -ms)
                    .unwrap_or(i64::MIN)
            }
        };
        Moment::from_timestamp(timestamp_ms)
            .expect("system clock reports a time in the supported range")
    }

    /// Returns the year. The range is `-9999..=9999`.
    pub fn year(self) -> i16 {
        self.year
    }

    /// Returns the month. The range is `1..=12`.
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day of the month. The range is `1..=31`.
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the hour. The range is `0..=23`.
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute. The range is `0..=59`.
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second. The range is `0..=59`.
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the millisecond. The range is `0..=999`.
    pub fn millisecond(self) -> i16 {
        self.millisecond
    }

    /// Returns the UTC offset local time had at this moment.
    pub fn offset(self) -> Offset {
        self.offset
    }

    /// Returns the weekday of this moment's calendar date.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::{Moment, Weekday};
    ///
    /// let m = Moment::new(2015, 2, 2, 0, 0, 0, 0)?;
    /// assert_eq!(m.weekday(), Weekday::Monday);
    /// # Ok::<(), datemask::Error>(())
    /// ```
    pub fn weekday(self) -> Weekday {
        let epoch_day = to_epoch_day(self.year, self.month, self.day);
        // 1970-01-01 was a Thursday, which is 4 in Sunday-zero numbering.
        Weekday::from_sunday_zero_offset(((epoch_day + 4).rem_euclid(7)) as i8)
    }

    /// Returns the instant this moment denotes, as a Unix timestamp in
    /// milliseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Moment;
    ///
    /// let m = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
    /// assert_eq!(m.timestamp(), 1_422_850_143_007);
    /// # Ok::<(), datemask::Error>(())
    /// ```
    pub fn timestamp(self) -> i64 {
        let epoch_day = i64::from(to_epoch_day(self.year, self.month, self.day));
        let second_of_day = i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        epoch_day * 86_400_000
            + second_of_day * 1_000
            + i64::from(self.millisecond)
            - i64::from(self.offset.seconds()) * 1_000
    }
}

impl core::fmt::Display for Moment {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        static TWO: DecimalFormatter = DecimalFormatter::new().padding(2);
        static THREE: DecimalFormatter = DecimalFormatter::new().padding(3);
        static FOUR: DecimalFormatter = DecimalFormatter::new().padding(4);

        f.write_str(FOUR.format(i64::from(self.year)).as_str())?;
        f.write_str("-")?;
        f.write_str(TWO.format(i64::from(self.month)).as_str())?;
        f.write_str("-")?;
        f.write_str(TWO.format(i64::from(self.day)).as_str())?;
        f.write_str("T")?;
        f.write_str(TWO.format(i64::from(self.hour)).as_str())?;
        f.write_str(":")?;
        f.write_str(TWO.format(i64::from(self.minute)).as_str())?;
        f.write_str(":")?;
        f.write_str(TWO.format(i64::from(self.second)).as_str())?;
        if self.millisecond != 0 {
            f.write_str(".")?;
            f.write_str(THREE.format(i64::from(self.millisecond)).as_str())?;
        }
        core::fmt::Display::fmt(&self.offset, f)
    }
}

impl core::fmt::Debug for Moment {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Moment({self})")
    }
}

impl core::str::FromStr for Moment {
    type Err = Error;

    /// Parses a moment from any of the date-string forms accepted by
    /// [`format`](crate::format): an ISO 8601 date or date-time (with
    /// optional UTC offset), or a month-name form like
    /// `February 2, 2015 04:09:03:07`.
    ///
    /// The wall-clock fields and offset are kept as written. A date
    /// without a time is midnight UTC; a date-time without an offset
    /// gets the host environment's offset for that wall-clock time.
    /// (Passing a string to [`format`](crate::format) additionally
    /// converts the parsed instant to local time, which is a property
    /// of the normalization step there, not of parsing.)
    fn from_str(string: &str) -> Result<Moment, Error> {
        crate::fmt::parse::parse_moment(string)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Moment {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Moment {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Moment, D::Error> {
        use serde::de;

        struct MomentVisitor;

        impl<'de> de::Visitor<'de> for MomentVisitor {
            type Value = Moment;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a date string")
            }

            #[inline]
            fn visit_bytes<E: de::Error>(
                self,
                value: &[u8],
            ) -> Result<Moment, E> {
                let string = core::str::from_utf8(value)
                    .map_err(de::Error::custom)?;
                self.visit_str(string)
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Moment, E> {
                crate::fmt::parse::parse_moment(value)
                    .map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(MomentVisitor)
    }
}

/// A day of the week.
///
/// Values of this type come out of [`Moment::weekday`]. The formatter
/// renders them through the `DDD`, `DD` and `D` tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Converts an offset in `0..=6`, with Sunday as `0`, to a weekday.
    pub(crate) fn from_sunday_zero_offset(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => unreachable!("weekday offset is always in 0..=6"),
        }
    }

    /// Returns this weekday as an offset in `0..=6`, with Sunday as `0`.
    pub fn to_sunday_zero_offset(self) -> i8 {
        self as i8
    }
}

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
pub(crate) const fn is_leap_year(year: i16) -> bool {
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Return the number of days in the given month.
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        // 30 or 31, determined by the month's bit pattern.
        30 | (month ^ month >> 3)
    }
}

/// Converts a Gregorian date to days since the Unix epoch.
///
/// This is Neri-Schneider. There's no branching or divisions.
///
/// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L83>
#[allow(non_upper_case_globals, non_snake_case)] // to mimic source
pub(crate) const fn to_epoch_day(year: i16, month: i8, day: i8) -> i32 {
    const s: u32 = 82;
    const K: u32 = 719468 + 146097 * s;
    const L: u32 = 400 * s;

    let year = year as u32;
    let month = month as u32;
    let day = day as u32;

    let J = month <= 2;
    let Y = year.wrapping_add(L).wrapping_sub(J as u32);
    let M = if J { month + 12 } else { month };
    let D = day - 1;
    let C = Y / 100;

    let y_star = 1461 * Y / 4 - C + C / 4;
    let m_star = (979 * M - 2919) / 32;
    let N = y_star + m_star + D;

    N.wrapping_sub(K) as i32
}

/// Converts days since the Unix epoch to a Gregorian date.
///
/// This is Neri-Schneider. There's no branching or divisions.
///
/// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L40>
#[allow(non_upper_case_globals, non_snake_case)] // to mimic source
pub(crate) const fn from_epoch_day(epoch_day: i32) -> (i16, i8, i8) {
    const s: u32 = 82;
    const K: u32 = 719468 + 146097 * s;
    const L: u32 = 400 * s;

    let N_U = epoch_day as u32;
    let N = N_U.wrapping_add(K);

    let N_1 = 4 * N + 3;
    let C = N_1 / 146097;
    let N_C = (N_1 % 146097) / 4;

    let N_2 = 4 * N_C + 3;
    let P_2 = 2939745 * (N_2 as u64);
    let Z = (P_2 / 4294967296) as u32;
    let N_Y = (P_2 % 4294967296) as u32 / 2939745 / 4;
    let Y = 100 * C + Z;

    let N_3 = 2141 * N_Y + 197913;
    let M = N_3 / 65536;
    let D = (N_3 % 65536) / 2141;

    let J = N_Y >= 306;
    let year = Y.wrapping_sub(L).wrapping_add(J as u32) as i16;
    let month = (if J { M - 12 } else { M }) as i8;
    let day = (D + 1) as i8;
    (year, month, day)
}

#[cfg(test)]
impl quickcheck::Arbitrary for Moment {
    fn arbitrary(g: &mut quickcheck::Gen) -> Moment {
        let year = (i32::arbitrary(g).rem_euclid(19_999) - 9_999) as i16;
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day = i8::arbitrary(g)
            .rem_euclid(days_in_month(year, month))
            + 1;
        let hour = i8::arbitrary(g).rem_euclid(24);
        let minute = i8::arbitrary(g).rem_euclid(60);
        let second = i8::arbitrary(g).rem_euclid(60);
        let millisecond = i16::arbitrary(g).rem_euclid(1_000);
        let offset = crate::tz::Offset::from_seconds(
            i32::arbitrary(g).rem_euclid(187_199) - 93_599,
        )
        .unwrap();
        Moment::new(year, month, day, hour, minute, second, millisecond)
            .unwrap()
            .with_offset(offset)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Moment::new(10_000, 1, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 0, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 13, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 2, 29, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 1, 1, 24, 0, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 1, 1, 0, 60, 0, 0).unwrap_err().is_range());
        assert!(Moment::new(2015, 1, 1, 0, 0, 60, 0).unwrap_err().is_range());
        assert!(
            Moment::new(2015, 1, 1, 0, 0, 0, 1_000).unwrap_err().is_range()
        );
        assert!(Moment::new(2016, 2, 29, 23, 59, 59, 999).is_ok());
    }

    #[test]
    fn weekdays() {
        let wd = |y, m, d| {
            Moment::new(y, m, d, 0, 0, 0, 0).unwrap().weekday()
        };
        assert_eq!(wd(1970, 1, 1), Weekday::Thursday);
        assert_eq!(wd(1969, 12, 31), Weekday::Wednesday);
        assert_eq!(wd(2015, 2, 2), Weekday::Monday);
        assert_eq!(wd(2000, 2, 29), Weekday::Tuesday);
        assert_eq!(wd(2024, 7, 9), Weekday::Tuesday);
        assert_eq!(wd(-9999, 1, 1), Weekday::Monday);
    }

    #[test]
    fn timestamps() {
        let m = Moment::constant(2015, 2, 2, 4, 9, 3, 7);
        assert_eq!(m.timestamp(), 1_422_850_143_007);

        let m = Moment::constant(1970, 1, 1, 0, 0, 0, 0);
        assert_eq!(m.timestamp(), 0);

        let m = Moment::constant(1969, 12, 31, 23, 59, 59, 999);
        assert_eq!(m.timestamp(), -1);

        // The instant moves when the same wall clock sits at an offset.
        let bom = Moment::constant(2015, 2, 2, 4, 9, 3, 7)
            .with_offset(Offset::from_seconds(19_800).unwrap());
        assert_eq!(bom.timestamp(), 1_422_850_143_007 - 19_800_000);
    }

    #[test]
    fn from_instant_components() {
        let m = Moment::from_instant(1_422_850_143_007, Offset::UTC).unwrap();
        assert_eq!(
            (m.year(), m.month(), m.day()),
            (2015, 2, 2),
        );
        assert_eq!(
            (m.hour(), m.minute(), m.second(), m.millisecond()),
            (4, 9, 3, 7),
        );

        // Same instant viewed from +05:30.
        let ist = Offset::from_seconds(19_800).unwrap();
        let m = Moment::from_instant(1_422_850_143_007, ist).unwrap();
        assert_eq!((m.hour(), m.minute()), (9, 39));
        assert_eq!(m.timestamp(), 1_422_850_143_007);

        // Pre-epoch instants round toward earlier days.
        let m = Moment::from_instant(-1, Offset::UTC).unwrap();
        assert_eq!((m.year(), m.month(), m.day()), (1969, 12, 31));
        assert_eq!(
            (m.hour(), m.minute(), m.second(), m.millisecond()),
            (23, 59, 59, 999),
        );
    }

    #[test]
    fn from_instant_rejects_out_of_range() {
        assert!(
            Moment::from_instant(i64::MAX, Offset::UTC)
                .unwrap_err()
                .is_range()
        );
        assert!(
            Moment::from_instant(i64::MIN, Offset::UTC)
                .unwrap_err()
                .is_range()
        );
    }

    #[test]
    fn display_and_parse_roundtrip() {
        let m = Moment::constant(2015, 2, 2, 4, 9, 3, 7);
        assert_eq!(m.to_string(), "2015-02-02T04:09:03.007+00:00");
        assert_eq!(m.to_string().parse::<Moment>().unwrap(), m);

        let m = Moment::constant(2016, 6, 1, 12, 30, 0, 0);
        assert_eq!(m.to_string(), "2016-06-01T12:30:00+00:00");
        assert_eq!(m.to_string().parse::<Moment>().unwrap(), m);

        let m = Moment::constant(2015, 2, 2, 4, 9, 3, 7)
            .with_offset(Offset::from_seconds(-19_800).unwrap());
        assert_eq!(m.to_string(), "2015-02-02T04:09:03.007-05:30");
    }

    #[test]
    fn epoch_day_known_values() {
        assert_eq!(to_epoch_day(1970, 1, 1), 0);
        assert_eq!(to_epoch_day(1969, 12, 31), -1);
        assert_eq!(to_epoch_day(2015, 2, 2), 16_468);
        assert_eq!(from_epoch_day(0), (1970, 1, 1));
        assert_eq!(from_epoch_day(-1), (1969, 12, 31));
        assert_eq!(from_epoch_day(16_468), (2015, 2, 2));
    }

    #[test]
    fn leap_years() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2015));
        assert!(is_leap_year(2016));
        assert_eq!(days_in_month(2015, 2), 28);
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2015, 9), 30);
        assert_eq!(days_in_month(2015, 12), 31);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let m = Moment::constant(2015, 2, 2, 4, 9, 3, 7)
            .with_offset(Offset::from_seconds(19_800).unwrap());
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#""2015-02-02T04:09:03.007+05:30""#);
        let got: Moment = serde_json::from_str(&json).unwrap();
        assert_eq!(got, m);

        let err = serde_json::from_str::<Moment>(r#""nope""#).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    quickcheck::quickcheck! {
        fn prop_epoch_day_roundtrip(m: Moment) -> bool {
            let epoch_day = to_epoch_day(m.year(), m.month(), m.day());
            from_epoch_day(epoch_day) == (m.year(), m.month(), m.day())
        }

        fn prop_timestamp_roundtrip(m: Moment) -> bool {
            let Ok(got) = Moment::from_instant(m.timestamp(), m.offset())
            else {
                return false;
            };
            got == m
        }

        fn prop_consecutive_days_advance_weekday(m: Moment) -> bool {
            let epoch_day = to_epoch_day(m.year(), m.month(), m.day());
            if epoch_day >= super::MAX_EPOCH_DAY {
                return true;
            }
            let today = m.weekday().to_sunday_zero_offset();
            let (y, mo, d) = from_epoch_day(epoch_day + 1);
            let Ok(next) = Moment::new(y, mo, d, 0, 0, 0, 0) else {
                return false;
            };
            next.weekday().to_sunday_zero_offset() == (today + 1) % 7
        }
    }
}
