use datemask::{format, Moment};

use crate::Result;

/// The stringified form a host environment typically produces, used
/// throughout as the reference date: a Monday morning with single digit
/// time parts, so padding behavior is visible.
const STRING_AM: &str = "February 2, 2015 04:09:03:07";

#[test]
fn pattern_must_be_a_string() {
    let err = format(b"\xFF\xFEYYYY", 0i64).unwrap_err();
    assert!(err.is_invalid_format());
    assert!(!err.is_invalid_date());
    assert!(err.to_string().starts_with("Argument `format` must be a string"));
}

#[test]
fn pattern_is_checked_before_the_date() {
    // Both arguments are bad here. The pattern wins.
    let err = format(b"\xFF".as_slice(), "definitely not a date").unwrap_err();
    assert!(err.is_invalid_format());
    assert!(!err.is_invalid_date());
}

#[test]
fn empty_pattern_formats_to_empty_string() -> Result {
    assert_eq!(format("", 0i64)?, "");
    Ok(())
}

#[test]
fn unparseable_dates_are_rejected() {
    for bad in ["", "someColdJoke", "2015-02-30", "February 32, 2015"] {
        let err = format("YYYY", bad).unwrap_err();
        assert!(err.is_invalid_date(), "expected invalid date for {bad:?}");
        assert!(!err.is_invalid_format());
        assert!(err.to_string().starts_with(
            "Argument `date` must be instance of Date \
             or Unix Timestamp or ISODate String",
        ));
    }
}

#[test]
fn non_finite_timestamps_are_rejected() {
    assert!(format("YYYY", f64::NAN).unwrap_err().is_invalid_date());
    assert!(format("YYYY", f64::INFINITY).unwrap_err().is_invalid_date());
    assert!(format("YYYY", f64::NEG_INFINITY).unwrap_err().is_invalid_date());
}

#[test]
fn out_of_range_timestamps_are_rejected() {
    let err = format("YYYY", 1e20).unwrap_err();
    assert!(err.is_invalid_date());
    assert!(err.is_range());
}

#[test]
fn string_timestamp_and_moment_inputs_agree() -> Result {
    let _ = crate::Logger::init();

    assert_eq!(format("YYYY", STRING_AM)?, "2015");

    // The same instant as a raw millisecond count.
    let timestamp = STRING_AM.parse::<Moment>()?.timestamp();
    assert_eq!(format("YYYY", timestamp)?, "2015");

    // And as an already normalized moment.
    let moment = STRING_AM.parse::<Moment>()?;
    assert_eq!(format("YYYY", moment)?, "2015");
    Ok(())
}

#[test]
fn iso_date_string_denotes_utc_midnight() -> Result {
    // Whatever local time the formatter renders, the string and the
    // equivalent timestamp must land on the exact same output.
    assert_eq!(
        format("ISODateTimeTZ", "2015-02-02")?,
        format("ISODateTimeTZ", 1_422_835_200_000i64)?,
    );
    Ok(())
}

#[test]
fn moment_input_keeps_its_own_offset() -> Result {
    // A `Moment` is formatted as given, not converted to local time.
    let moment = Moment::new(2015, 2, 2, 4, 9, 3, 7)?
        .with_offset(datemask::Offset::from_seconds(19_800)?);
    assert_eq!(format("Z", moment)?, "+05:30");
    assert_eq!(format("HH:mm", moment)?, "04:09");
    Ok(())
}

#[cfg(feature = "std")]
#[test]
fn absent_date_reads_the_clock() -> Result {
    let now = datemask::format_now("YYYY")?;
    assert_eq!(now.len(), 4);
    // Racy across a year boundary, which we accept.
    assert_eq!(now, format("YYYY", Moment::now())?);
    Ok(())
}
