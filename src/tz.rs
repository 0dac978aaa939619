/*!
The local UTC offset attached to every canonical date.

An [`Offset`] is a signed number of seconds east of UTC. Formatting only
ever reports an offset (the `Z` and `ZZ` tokens); there is no time zone
database and no conversion between zones. When a date is derived from a
timestamp or from the clock, the offset comes from the host environment
(`localtime_r` on unix with `std` enabled) and is fixed at UTC everywhere
else.
*/

use crate::{error::Error, fmt::util::DecimalFormatter};

/// A signed difference between local time and UTC, in seconds.
///
/// The allowed range is `-25:59:59..=25:59:59`, which comfortably covers
/// every offset a host environment can report.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Offset {
    second: i32,
}

impl Offset {
    /// The offset of UTC itself, i.e., zero.
    pub const UTC: Offset = Offset { second: 0 };

    const MIN_SECOND: i32 = -93_599;
    const MAX_SECOND: i32 = 93_599;

    /// Creates an offset from a number of seconds east of UTC. Negative
    /// values are west of UTC.
    ///
    /// # Errors
    ///
    /// Returns an error when the given number of seconds is outside the
    /// range `-93599..=93599` (just shy of 26 hours on either side).
    ///
    /// # Example
    ///
    /// ```
    /// use datemask::Offset;
    ///
    /// let off = Offset::from_seconds(-5 * 60 * 60)?;
    /// assert_eq!(off.minutes(), -300);
    /// # Ok::<(), datemask::Error>(())
    /// ```
    pub fn from_seconds(second: i32) -> Result<Offset, Error> {
        if !(Offset::MIN_SECOND <= second && second <= Offset::MAX_SECOND) {
            return Err(Error::range(
                "offset seconds",
                second,
                Offset::MIN_SECOND,
                Offset::MAX_SECOND,
            ));
        }
        Ok(Offset { second })
    }

    /// Returns this offset as a number of seconds east of UTC.
    pub fn seconds(self) -> i32 {
        self.second
    }

    /// Returns this offset as a total number of minutes east of UTC,
    /// truncating any sub-minute part.
    pub fn minutes(self) -> i32 {
        self.second / 60
    }

    /// Returns true when this offset is west of UTC.
    pub fn is_negative(self) -> bool {
        self.second < 0
    }

    /// The absolute hours component, `0..=25`.
    pub(crate) fn part_hours(self) -> i32 {
        (self.second / 3_600).abs()
    }

    /// The absolute minutes component, `0..=59`.
    pub(crate) fn part_minutes(self) -> i32 {
        (self.second / 60 % 60).abs()
    }

    /// Writes this offset in the `±HH:MM` or `±HHMM` shape.
    pub(crate) fn write_to(self, colon: bool, wtr: &mut alloc::string::String) {
        static TWO: DecimalFormatter = DecimalFormatter::new().padding(2);

        wtr.push(if self.is_negative() { '-' } else { '+' });
        wtr.push_str(TWO.format(i64::from(self.part_hours())).as_str());
        if colon {
            wtr.push(':');
        }
        wtr.push_str(TWO.format(i64::from(self.part_minutes())).as_str());
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "+" };
        write!(
            f,
            "{sign}{:02}:{:02}",
            self.part_hours(),
            self.part_minutes(),
        )
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({self})")
    }
}

/// Returns the host environment's UTC offset at the given instant.
///
/// The instant is expressed in milliseconds since the Unix epoch. On unix
/// with `std` enabled this consults `localtime_r`, so DST transitions are
/// reflected for the instant itself, not for "now". Every other
/// configuration reports UTC.
pub(crate) fn system_offset(timestamp_ms: i64) -> Offset {
    system::offset(timestamp_ms)
}

#[cfg(all(feature = "std", unix))]
mod system {
    use super::Offset;

    pub(super) fn offset(timestamp_ms: i64) -> Offset {
        let second = timestamp_ms.div_euclid(1_000) as libc::time_t;
        let mut tm: libc::tm = unsafe { core::mem::zeroed() };
        let ret = unsafe { libc::localtime_r(&second, &mut tm) };
        if ret.is_null() {
            trace!(
                "localtime_r failed for timestamp {timestamp_ms}ms, \
                 falling back to UTC",
            );
            return Offset::UTC;
        }
        match Offset::from_seconds(tm.tm_gmtoff as i32) {
            Ok(offset) => offset,
            Err(_) => {
                trace!(
                    "localtime_r reported out of range offset \
                     {} seconds, falling back to UTC",
                    tm.tm_gmtoff,
                );
                Offset::UTC
            }
        }
    }
}

#[cfg(not(all(feature = "std", unix)))]
mod system {
    use super::Offset;

    // No way to ask the host, so local time is UTC.
    pub(super) fn offset(_timestamp_ms: i64) -> Offset {
        Offset::UTC
    }
}
