//! Display formatting for values returned by the API

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

/// Render a timestamp or date as ISO-8601 UTC with milliseconds
///
/// Values that do not parse are returned unchanged.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    parse_instant(value).map_or_else(|| value.to_owned(), iso_utc)
}

fn parse_instant(value: &str) -> Option<Timestamp> {
    if let Ok(ts) = value.parse::<Timestamp>() {
        return Some(ts);
    }

    // Bare dates are midnight UTC
    let date = value.parse::<Date>().ok()?;
    date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

fn iso_utc(ts: Timestamp) -> String {
    let z = ts.to_zoned(TimeZone::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        z.year(),
        z.month(),
        z.day(),
        z.hour(),
        z.minute(),
        z.second(),
        z.millisecond()
    )
}

/// Mask a phone number, keeping at most the first 3 and last 4 characters
///
/// Only an empty input masks to nothing; blank input still yields `****`.
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = phone.trim().chars().collect();
    // Short numbers (4 or fewer) keep every character
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();

    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        return format!("{head}****{tail}");
    }

    format!("****{tail}")
}
