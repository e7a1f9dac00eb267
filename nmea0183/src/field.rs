//! Positional field parsing shared by the decoders.
//!
//! Every helper returns `None` both for an empty field and for a field that
//! does not parse, so a single bad value never aborts a whole sentence.

use chrono::{NaiveDate, NaiveTime};
use core::str::FromStr;
use num_traits::float::FloatCore;

pub(crate) fn parse<T: FromStr>(field: &str) -> Option<T> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.parse().ok()
}

pub(crate) fn parse_f64(field: &str) -> Option<f64> {
    parse::<f64>(field).filter(|value| value.is_finite())
}

pub(crate) fn parse_char(field: &str) -> Option<char> {
    let mut chars = field.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Converts `ddmm.mmmm` / `dddmm.mmmm` and a hemisphere letter into signed
/// decimal degrees. `negative` is the hemisphere letter that flips the sign.
pub(crate) fn parse_coordinate(
    value: &str,
    hemisphere: &str,
    positive: char,
    negative: char,
    max_degrees: f64,
) -> Option<f64> {
    let raw = parse_f64(value)?;
    if raw < 0.0 {
        return None;
    }
    let sign = match parse_char(hemisphere)? {
        c if c == positive => 1.0,
        c if c == negative => -1.0,
        _ => return None,
    };
    let degrees = FloatCore::trunc(raw / 100.0);
    let minutes = raw - degrees * 100.0;
    if minutes >= 60.0 {
        return None;
    }
    let decimal = degrees + minutes / 60.0;
    if decimal > max_degrees {
        return None;
    }
    Some(sign * decimal)
}

pub(crate) fn parse_latitude(value: &str, hemisphere: &str) -> Option<f64> {
    parse_coordinate(value, hemisphere, 'N', 'S', 90.0)
}

pub(crate) fn parse_longitude(value: &str, hemisphere: &str) -> Option<f64> {
    parse_coordinate(value, hemisphere, 'E', 'W', 180.0)
}

/// `hhmmss` with an optional fraction of a second
pub(crate) fn parse_time(field: &str) -> Option<NaiveTime> {
    let field = field.trim();
    let (whole, fraction) = match field.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (field, ""),
    };
    if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour = whole[0..2].parse().ok()?;
    let minute = whole[2..4].parse().ok()?;
    let second = whole[4..6].parse().ok()?;
    let mut nano = 0u32;
    for (i, digit) in fraction.bytes().enumerate() {
        nano += u32::from(digit - b'0') * 10u32.pow(8 - i as u32);
    }
    NaiveTime::from_hms_nano_opt(hour, minute, second, nano)
}

/// `ddmmyy`. Two digit years from 80 onwards are taken as 19xx, the rest as 20xx.
pub(crate) fn parse_date(field: &str) -> Option<NaiveDate> {
    let field = field.trim();
    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let day = field[0..2].parse().ok()?;
    let month = field[2..4].parse().ok()?;
    let year: i32 = field[4..6].parse().ok()?;
    let year = if year >= 80 { 1900 + year } else { 2000 + year };
    NaiveDate::from_ymd_opt(year, month, day)
}
