use datemask::{format, Moment, Offset};

use crate::Result;

/// Monday, February 2 2015, 04:09:03.007, offset zero.
const AM: Moment = Moment::constant(2015, 2, 2, 4, 9, 3, 7);
/// The same moment twelve hours later, for the 12 hour clock tests.
const PM: Moment = Moment::constant(2015, 2, 2, 16, 9, 3, 7);

#[test]
fn year_tokens() -> Result {
    assert_eq!(format("YYYY", AM)?, "2015");
    assert_eq!(format("YY", AM)?, "15");

    let y2k = Moment::new(2000, 1, 1, 0, 0, 0, 0)?;
    assert_eq!(format("YYYY", y2k)?, "2000");
    assert_eq!(format("YY", y2k)?, "00");

    // A year with fewer than four digits is not padded out.
    let ancient = Moment::new(500, 1, 1, 0, 0, 0, 0)?;
    assert_eq!(format("YYYY", ancient)?, "500");
    assert_eq!(format("YY", ancient)?, "00");
    Ok(())
}

#[test]
fn month_tokens() -> Result {
    assert_eq!(format("MMMM", AM)?, "February");
    assert_eq!(format("MMM", AM)?, "Feb");
    assert_eq!(format("MM", AM)?, "02");
    assert_eq!(format("M", AM)?, "2");

    let dec = Moment::new(2015, 12, 31, 0, 0, 0, 0)?;
    assert_eq!(format("MMMM", dec)?, "December");
    assert_eq!(format("MM", dec)?, "12");
    assert_eq!(format("M", dec)?, "12");
    Ok(())
}

#[test]
fn weekday_tokens() -> Result {
    assert_eq!(format("DDD", AM)?, "Monday");
    assert_eq!(format("DD", AM)?, "Mon");
    assert_eq!(format("D", AM)?, "Mo");

    let sunday = Moment::new(2015, 2, 1, 0, 0, 0, 0)?;
    assert_eq!(format("DDD", sunday)?, "Sunday");
    assert_eq!(format("D", sunday)?, "Su");
    Ok(())
}

#[test]
fn day_tokens() -> Result {
    assert_eq!(format("dd", AM)?, "02");
    assert_eq!(format("d", AM)?, "2");

    let end = Moment::new(2015, 1, 31, 0, 0, 0, 0)?;
    assert_eq!(format("dd", end)?, "31");
    assert_eq!(format("d", end)?, "31");
    Ok(())
}

#[test]
fn hour_tokens() -> Result {
    assert_eq!(format("HH", AM)?, "04");
    assert_eq!(format("H", AM)?, "4");
    assert_eq!(format("hh", AM)?, "04");
    assert_eq!(format("h", AM)?, "4");

    // The 24 and 12 hour clocks diverge in the afternoon.
    assert_eq!(format("HH", PM)?, "16");
    assert_eq!(format("H", PM)?, "16");
    assert_eq!(format("hh", PM)?, "04");
    assert_eq!(format("h", PM)?, "4");

    let noon = Moment::new(2015, 2, 2, 12, 0, 0, 0)?;
    assert_eq!(format("hh", noon)?, "12");
    let midnight = Moment::new(2015, 2, 2, 0, 0, 0, 0)?;
    assert_eq!(format("hh", midnight)?, "12");
    Ok(())
}

#[test]
fn minute_second_millisecond_tokens() -> Result {
    assert_eq!(format("mm", AM)?, "09");
    assert_eq!(format("m", AM)?, "9");
    assert_eq!(format("ss", AM)?, "03");
    assert_eq!(format("s", AM)?, "3");
    assert_eq!(format("ff", AM)?, "007");
    assert_eq!(format("f", AM)?, "7");

    let top = Moment::new(2015, 2, 2, 0, 0, 0, 0)?;
    assert_eq!(format("mm:ss", top)?, "00:00");
    assert_eq!(format("ff", top)?, "000");
    assert_eq!(format("f", top)?, "0");
    Ok(())
}

#[test]
fn meridiem_tokens() -> Result {
    assert_eq!(format("A", AM)?, "AM");
    assert_eq!(format("a", AM)?, "am");
    assert_eq!(format("A", PM)?, "PM");
    assert_eq!(format("a", PM)?, "pm");

    // Noon is PM, midnight is AM.
    assert_eq!(format("A", Moment::new(2015, 2, 2, 12, 0, 0, 0)?)?, "PM");
    assert_eq!(format("A", Moment::new(2015, 2, 2, 0, 0, 0, 0)?)?, "AM");
    Ok(())
}

#[test]
fn offset_tokens() -> Result {
    assert_eq!(format("ZZ", AM)?, "+0000");
    assert_eq!(format("Z", AM)?, "+00:00");

    let bom = AM.with_offset(Offset::from_seconds(19_800)?);
    assert_eq!(format("ZZ", bom)?, "+0530");
    assert_eq!(format("Z", bom)?, "+05:30");

    let pst = AM.with_offset(Offset::from_seconds(-28_800)?);
    assert_eq!(format("ZZ", pst)?, "-0800");
    assert_eq!(format("Z", pst)?, "-08:00");
    Ok(())
}

#[test]
fn alias_tokens() -> Result {
    assert_eq!(format("ISODate", AM)?, "2015-02-02");
    // An alias and its expansion are interchangeable.
    assert_eq!(format("ISODate", AM)?, format("YYYY-MM-dd", AM)?);
    assert_eq!(format("ISOTime", AM)?, "04:09:03");
    assert_eq!(format("ISODateTime", AM)?, "2015-02-02 04:09:03");
    assert_eq!(format("ISODateTimeTZ", AM)?, "2015-02-02 04:09:03 +0000");

    // The time aliases expand to `hh` and stay on the 12 hour clock.
    assert_eq!(format("ISOTime", PM)?, "04:09:03");
    Ok(())
}

#[test]
fn composite_patterns() -> Result {
    assert_eq!(format("YYYY-MM-dd HH:mm:ss", AM)?, "2015-02-02 04:09:03");
    assert_eq!(
        format("DDD, MMMM d, YYYY h:mm a", AM)?,
        "Monday, February 2, 2015 4:09 am",
    );
    assert_eq!(format("dd.MM.YY", AM)?, "02.02.15");
    assert_eq!(format("HH:mm:ss.ff Z", AM)?, "04:09:03.007 +00:00");

    // Formatting has no state. Repeating a call repeats its output.
    let pattern = "ISODateTimeTZ";
    assert_eq!(format(pattern, AM)?, format(pattern, AM)?);
    Ok(())
}

#[test]
fn unrecognized_text_passes_through() -> Result {
    assert_eq!(format("week no. 6 | YYYY", AM)?, "week no. 6 | 2015");
    // No escaping: token letters substitute even inside words.
    assert_eq!(format("Today", AM)?, "To2amy");
    Ok(())
}
