/*!
Parsing of date strings into a [`Moment`].

Two families of strings are accepted. The first is ISO 8601, like
`2015-02-02` or `2015-02-02T04:09:03.007+05:30`. The second is a
month-name form, like `February 2, 2015 04:09:03:07`, as commonly
produced by host environments when a date is stringified.

Wall clock fields are kept exactly as written. When a string pins down
its own offset (a trailing `Z` or `±HH:MM`), that offset is attached.
When it doesn't, the string is read in local time, except for a bare ISO
date, which is midnight UTC. (A bare month-name date is local midnight.
The asymmetry is deliberate and mirrors how host environments treat the
two forms.)
*/

use crate::{
    error::{Error, ErrorContext},
    moment::Moment,
    tz::{system_offset, Offset},
    util::escape,
};

/// Parses a moment from a date string.
///
/// The grammar is deliberately small:
///
/// ```text
/// date        = iso | month-name
/// iso         = ["-"] YYYY "-" MM "-" DD [("T" | " ") clock [offset]]
/// clock       = HH ":" MM [":" SS ["." fraction]]
/// offset      = "Z" | ("+" | "-") HH [":"] MM
/// month-name  = name " " D [","] " " YYYY [" " H ":" MM [":" SS [ms]]]
/// ms          = ":" millis | "." fraction
/// ```
///
/// where `name` is a full English month name or its three letter
/// abbreviation, case insensitively. Note the two spellings of
/// sub-second precision in the month-name form: `04:09:03:07` is 7
/// whole milliseconds, while `04:09:03.07` is a fraction, 70
/// milliseconds.
pub(crate) fn parse_moment(string: &str) -> Result<Moment, Error> {
    trace!("parsing date string {string:?}");
    parse(string.as_bytes())
        .with_context(|| err!("failed to parse {string:?} as a date"))
}

fn parse(inp: &[u8]) -> Result<Moment, Error> {
    let mut parser = Parser { inp };
    let moment = if parser
        .peek()
        .map_or(false, |byte| byte.is_ascii_alphabetic())
    {
        parser.parse_month_name()?
    } else {
        parser.parse_iso()?
    };
    if !parser.is_done() {
        return Err(err!(
            "expected end of date string, but found {:?} remaining",
            escape::Bytes(parser.inp),
        ));
    }
    Ok(moment)
}

/// Attaches the host environment's offset to a wall clock reading.
///
/// The offset at an instant is only known once the instant is known,
/// which is circular when all we have is a wall clock. So the offset
/// found by reading the wall clock as if it were UTC is used as a first
/// guess and refined once.
fn local(moment: Moment) -> Moment {
    let guess = system_offset(moment.timestamp());
    let refined = system_offset(moment.with_offset(guess).timestamp());
    moment.with_offset(refined)
}

/// A cursor over the bytes of a date string.
#[derive(Debug)]
struct Parser<'i> {
    inp: &'i [u8],
}

impl<'i> Parser<'i> {
    fn is_done(&self) -> bool {
        self.inp.is_empty()
    }

    fn peek(&self) -> Option<u8> {
        self.inp.first().copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let (&byte, rest) = self.inp.split_first()?;
        self.inp = rest;
        Some(byte)
    }

    /// Consumes the next byte when it equals `byte`.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.inp = &self.inp[1..];
            true
        } else {
            false
        }
    }

    /// Consumes the next byte, failing unless it equals `byte`.
    fn expect(&mut self, byte: u8) -> Result<(), Error> {
        match self.bump() {
            Some(got) if got == byte => Ok(()),
            Some(got) => Err(err!(
                "expected {:?}, but found {:?}",
                escape::Byte(byte),
                escape::Byte(got),
            )),
            None => Err(err!(
                "expected {:?}, but found end of input",
                escape::Byte(byte),
            )),
        }
    }

    /// Parses a run of ASCII digits between `min` and `max` bytes long,
    /// inclusive, as a decimal integer.
    fn digits(
        &mut self,
        what: &'static str,
        min: usize,
        max: usize,
    ) -> Result<i64, Error> {
        let mut number: i64 = 0;
        let mut len = 0;
        while len < max {
            let Some(byte) = self.peek() else { break };
            if !byte.is_ascii_digit() {
                break;
            }
            self.inp = &self.inp[1..];
            number = number * 10 + i64::from(byte - b'0');
            len += 1;
        }
        if len < min {
            return Err(match self.peek() {
                Some(byte) => err!(
                    "invalid {what}: expected {min} digits, \
                     but found {:?}",
                    escape::Byte(byte),
                ),
                None => err!(
                    "invalid {what}: expected {min} digits, \
                     but found end of input",
                ),
            });
        }
        Ok(number)
    }

    /// Parses a fractional second to millisecond precision.
    ///
    /// Up to nine digits are consumed. Digits past the third are read
    /// and discarded, i.e., the fraction is truncated, not rounded.
    fn fraction(&mut self) -> Result<i64, Error> {
        let mut millisecond: i64 = 0;
        let mut len = 0;
        while len < 9 {
            let Some(byte) = self.peek() else { break };
            if !byte.is_ascii_digit() {
                break;
            }
            self.inp = &self.inp[1..];
            if len < 3 {
                millisecond = millisecond * 10 + i64::from(byte - b'0');
            }
            len += 1;
        }
        if len == 0 {
            return Err(match self.peek() {
                Some(byte) => err!(
                    "expected fractional second digits, but found {:?}",
                    escape::Byte(byte),
                ),
                None => err!(
                    "expected fractional second digits, \
                     but found end of input",
                ),
            });
        }
        // `.4` is 400 milliseconds: short fractions scale up.
        while len < 3 {
            millisecond *= 10;
            len += 1;
        }
        Ok(millisecond)
    }

    /// Consumes a run of spaces.
    fn skip_spaces(&mut self) {
        while self.eat(b' ') {}
    }

    /// Consumes a run of at least one space.
    fn whitespace(&mut self) -> Result<(), Error> {
        if !self.eat(b' ') {
            return Err(match self.peek() {
                Some(byte) => err!(
                    "expected a space, but found {:?}",
                    escape::Byte(byte),
                ),
                None => err!("expected a space, but found end of input"),
            });
        }
        self.skip_spaces();
        Ok(())
    }

    /// Parses `YYYY-MM-DD` with an optional clock time and offset.
    fn parse_iso(&mut self) -> Result<Moment, Error> {
        let sign = if self.eat(b'-') { -1 } else { 1 };
        let year = sign * self.digits("year", 4, 4)?;
        self.expect(b'-')?;
        let month = self.digits("month", 2, 2)?;
        self.expect(b'-')?;
        let day = self.digits("day", 2, 2)?;
        if self.is_done() {
            // A bare ISO date is midnight UTC.
            return Moment::new(
                year as i16,
                month as i8,
                day as i8,
                0,
                0,
                0,
                0,
            );
        }
        match self.bump() {
            Some(b'T' | b't' | b' ') => {}
            Some(byte) => {
                return Err(err!(
                    "expected `T` or a space between date and time, \
                     but found {:?}",
                    escape::Byte(byte),
                ));
            }
            None => {
                return Err(err!(
                    "expected `T` or a space between date and time, \
                     but found end of input",
                ));
            }
        }
        let hour = self.digits("hour", 2, 2)?;
        self.expect(b':')?;
        let minute = self.digits("minute", 2, 2)?;
        let mut second = 0;
        let mut millisecond = 0;
        if self.eat(b':') {
            second = self.digits("second", 2, 2)?;
            if self.eat(b'.') {
                millisecond = self.fraction()?;
            }
        }
        let moment = Moment::new(
            year as i16,
            month as i8,
            day as i8,
            hour as i8,
            minute as i8,
            second as i8,
            millisecond as i16,
        )?;
        match self.peek() {
            // Zulu time is UTC.
            Some(b'Z' | b'z') => {
                self.inp = &self.inp[1..];
                Ok(moment)
            }
            Some(b'+' | b'-') => {
                let offset = self.parse_offset()?;
                Ok(moment.with_offset(offset))
            }
            // No offset: the wall clock is read in local time.
            _ => Ok(local(moment)),
        }
    }

    /// Parses a UTC offset, `±HH:MM` or `±HHMM`.
    fn parse_offset(&mut self) -> Result<Offset, Error> {
        let sign = match self.bump() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            Some(byte) => {
                return Err(err!(
                    "expected `+` or `-` sign of UTC offset, \
                     but found {:?}",
                    escape::Byte(byte),
                ));
            }
            None => {
                return Err(err!(
                    "expected `+` or `-` sign of UTC offset, \
                     but found end of input",
                ));
            }
        };
        let hours = self.digits("offset hours", 2, 2)?;
        self.eat(b':');
        let minutes = self.digits("offset minutes", 2, 2)?;
        if minutes > 59 {
            return Err(Error::range("offset minutes", minutes, 0, 59));
        }
        Offset::from_seconds((sign * (hours * 3_600 + minutes * 60)) as i32)
    }

    /// Parses the month-name form, e.g. `February 2, 2015 04:09:03:07`.
    fn parse_month_name(&mut self) -> Result<Moment, Error> {
        let month = self.month_name()?;
        self.whitespace()?;
        let day = self.digits("day", 1, 2)?;
        self.skip_spaces();
        self.eat(b',');
        self.skip_spaces();
        let year = self.digits("year", 4, 4)?;
        if self.is_done() {
            // A bare month-name date is midnight local time.
            return Ok(local(Moment::new(
                year as i16,
                month,
                day as i8,
                0,
                0,
                0,
                0,
            )?));
        }
        self.whitespace()?;
        let hour = self.digits("hour", 1, 2)?;
        self.expect(b':')?;
        let minute = self.digits("minute", 2, 2)?;
        let mut second = 0;
        let mut millisecond = 0;
        if self.eat(b':') {
            second = self.digits("second", 2, 2)?;
            if self.eat(b':') {
                // A fourth clock field is whole milliseconds.
                millisecond = self.digits("millisecond", 1, 3)?;
            } else if self.eat(b'.') {
                millisecond = self.fraction()?;
            }
        }
        let moment = Moment::new(
            year as i16,
            month,
            day as i8,
            hour as i8,
            minute as i8,
            second as i8,
            millisecond as i16,
        )?;
        Ok(local(moment))
    }

    /// Parses an English month name or three letter abbreviation.
    fn month_name(&mut self) -> Result<i8, Error> {
        let len = self
            .inp
            .iter()
            .take_while(|byte| byte.is_ascii_alphabetic())
            .count();
        let (name, rest) = self.inp.split_at(len);
        for (index, &full) in crate::fmt::MONTHS.iter().enumerate() {
            if name.eq_ignore_ascii_case(full.as_bytes())
                || (name.len() == 3
                    && name.eq_ignore_ascii_case(&full.as_bytes()[..3]))
            {
                self.inp = rest;
                return Ok((index + 1) as i8);
            }
        }
        Err(err!("unrecognized month name {:?}", escape::Bytes(name)))
    }
}
