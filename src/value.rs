/*!
The date argument accepted by [`format`](crate::format).
*/

use crate::{
    error::{Error, ErrorContext},
    moment::Moment,
};

/// A date argument, in any of the shapes [`format`](crate::format)
/// accepts.
///
/// Callers rarely name this type. The `impl Into<DateValue>` bound on
/// `format` means a [`Moment`], an integer or float count of Unix epoch
/// milliseconds, or a date string can all be passed directly:
///
/// ```
/// use datemask::{format, Moment};
///
/// let m = Moment::new(2015, 2, 2, 4, 9, 3, 7)?;
/// assert_eq!(format("YYYY-MM-dd", m)?, "2015-02-02");
/// assert_eq!(format("ss", 1_422_850_143_007i64)?, "03");
/// # Ok::<(), datemask::Error>(())
/// ```
///
/// The one variant worth naming is [`DateValue::Now`], which formats
/// the current moment and is what [`format_now`](crate::format_now)
/// passes on your behalf.
#[derive(Clone, Copy, Debug)]
pub enum DateValue<'a> {
    /// No particular date. The current moment is used.
    Now,
    /// An already normalized moment.
    Moment(Moment),
    /// A count of milliseconds since the Unix epoch.
    ///
    /// The fractional part, if any, is truncated. Non-finite counts are
    /// rejected during normalization.
    Timestamp(f64),
    /// A date string, in any of the forms documented on
    /// [`Moment`]'s `FromStr` impl.
    Text(&'a str),
}

impl<'a> DateValue<'a> {
    /// Normalizes this value to a moment in local time.
    ///
    /// Every failure mode of this conversion reports itself as an
    /// invalid date argument, with the underlying cause chained on.
    pub(crate) fn into_moment(self) -> Result<Moment, Error> {
        self.normalize().with_context(Error::date_arg)
    }

    fn normalize(self) -> Result<Moment, Error> {
        match self {
            DateValue::Now => {
                #[cfg(feature = "std")]
                {
                    Ok(Moment::now())
                }
                #[cfg(not(feature = "std"))]
                {
                    Err(err!(
                        "cannot determine the current time \
                         without the `std` feature",
                    ))
                }
            }
            DateValue::Moment(moment) => Ok(moment),
            DateValue::Timestamp(timestamp) => {
                if !timestamp.is_finite() {
                    return Err(err!(
                        "timestamp must be a finite count of \
                         milliseconds, but got {timestamp}",
                    ));
                }
                // Truncation, not rounding. A fractional millisecond
                // count is read as the millisecond it falls within.
                Moment::from_timestamp(timestamp as i64)
            }
            DateValue::Text(string) => {
                let parsed = crate::fmt::parse::parse_moment(string)?;
                // A string denotes an instant. Formatting reads that
                // instant in local time, like any other instant.
                Moment::from_timestamp(parsed.timestamp())
            }
        }
    }
}

impl Default for DateValue<'_> {
    fn default() -> DateValue<'static> {
        DateValue::Now
    }
}

impl From<Moment> for DateValue<'static> {
    fn from(moment: Moment) -> DateValue<'static> {
        DateValue::Moment(moment)
    }
}

impl<'a> From<&'a Moment> for DateValue<'a> {
    fn from(moment: &'a Moment) -> DateValue<'a> {
        DateValue::Moment(*moment)
    }
}

impl From<i64> for DateValue<'static> {
    fn from(timestamp: i64) -> DateValue<'static> {
        DateValue::Timestamp(timestamp as f64)
    }
}

impl From<f64> for DateValue<'static> {
    fn from(timestamp: f64) -> DateValue<'static> {
        DateValue::Timestamp(timestamp)
    }
}

impl<'a> From<&'a str> for DateValue<'a> {
    fn from(string: &'a str) -> DateValue<'a> {
        DateValue::Text(string)
    }
}

impl<'a> From<&'a alloc::string::String> for DateValue<'a> {
    fn from(string: &'a alloc::string::String) -> DateValue<'a> {
        DateValue::Text(string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moment_passes_through() {
        let moment = Moment::constant(2015, 2, 2, 4, 9, 3, 7);
        let got = DateValue::from(moment).into_moment().unwrap();
        assert_eq!(got, moment);
    }

    #[test]
    fn timestamp_truncates_fractional_milliseconds() {
        let got = DateValue::Timestamp(7.9).into_moment().unwrap();
        assert_eq!(got.timestamp(), 7);
        let got = DateValue::Timestamp(-0.5).into_moment().unwrap();
        assert_eq!(got.timestamp(), 0);
    }

    #[test]
    fn timestamp_must_be_finite() {
        let err = DateValue::Timestamp(f64::NAN).into_moment().unwrap_err();
        assert!(err.is_invalid_date());
        let err =
            DateValue::Timestamp(f64::INFINITY).into_moment().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn timestamp_out_of_range() {
        let err = DateValue::Timestamp(1e20).into_moment().unwrap_err();
        assert!(err.is_invalid_date());
        assert!(err.is_range());
    }

    #[test]
    fn text_denotes_an_instant() {
        let got = DateValue::Text("2015-02-02T04:09:03.007Z")
            .into_moment()
            .unwrap();
        assert_eq!(got.timestamp(), 1_422_850_143_007);

        // An explicit offset moves the instant accordingly.
        let got = DateValue::Text("2015-02-02T04:09:03.007+05:30")
            .into_moment()
            .unwrap();
        assert_eq!(got.timestamp(), 1_422_850_143_007 - 19_800_000);
    }

    #[test]
    fn text_failures_are_invalid_dates() {
        let err = DateValue::Text("nope").into_moment().unwrap_err();
        assert!(err.is_invalid_date());
        assert!(!err.is_invalid_format());
        insta::assert_snapshot!(
            err,
            @r###"Argument `date` must be instance of Date or Unix Timestamp or ISODate String: failed to parse "nope" as a date: unrecognized month name "nope""###,
        );
    }
}
