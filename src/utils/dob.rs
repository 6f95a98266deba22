use chrono::{Datelike, NaiveDate};
use thiserror::Error;

const MIN_YEAR: u32 = 1900;
const MAX_YEAR: u32 = 2100;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date of birth `{0}`")]
pub struct DobError(pub String);

/// Rewrites a `MM-DD-YYYY` or `MM/DD/YYYY` date (leading zeros optional) as `YYYY-MM-DD`.
///
/// The separator is whichever of `-` or `/` appears first. Parts are read
/// positionally as month, day, year; a part holding anything other than
/// ASCII digits is rejected. The year must lie in 1900..=2100 and the triple
/// must name a real calendar day.
///
/// Output that is already `YYYY-MM-DD` is validated the same way and
/// returned unchanged. A four digit first part without a leading zero can
/// never be a valid month, so no month-first input changes meaning.
pub fn normalize_dob(input: &str) -> Result<String, DobError> {
    let invalid = || DobError(input.to_owned());

    let s = input.trim();
    let separator = s.chars().find(|c| *c == '-' || *c == '/').ok_or_else(invalid)?;

    let parts: Vec<&str> = s.split(separator).collect();
    let [first, second, third] = parts[..] else {
        return Err(invalid());
    };

    let (month, day, year) = if separator == '-' && first.len() == 4 && !first.starts_with('0') {
        (second, third, first)
    } else {
        (first, second, third)
    };

    let month = parse_part(month).ok_or_else(invalid)?;
    let day = parse_part(day).ok_or_else(invalid)?;
    let year = parse_part(year).ok_or_else(invalid)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return Err(invalid());
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(invalid)?;
    if date.year() != year as i32 || date.month() != month || date.day() != day {
        return Err(invalid());
    }

    Ok(format!("{:04}-{:02}-{:02}", year, month, day))
}

/// Digits only. An all-zero part reads as 0.
fn parse_part(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = part.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_separators_and_optional_zeros() {
        assert_eq!(normalize_dob("3-4-1990").unwrap(), "1990-03-04");
        assert_eq!(normalize_dob("03/04/1990").unwrap(), "1990-03-04");
        assert_eq!(normalize_dob(" 12/31/1999 ").unwrap(), "1999-12-31");
    }

    #[test]
    fn canonical_output_is_stable_under_renormalization() {
        let once = normalize_dob("03/04/1990").unwrap();
        assert_eq!(once, "1990-03-04");
        assert_eq!(normalize_dob(&once).unwrap(), once);

        assert!(normalize_dob("1899-01-01").is_err());
        assert!(normalize_dob("1990-02-30").is_err());
        assert!(normalize_dob("1990/03/04").is_err());
        assert_eq!(normalize_dob("0003-04-1990").unwrap(), "1990-03-04");
    }

    #[test]
    fn rejects_impossible_calendar_days() {
        for input in ["02-30-1990", "13-01-1990", "00-10-1990", "04-31-2001", "02-29-1900"] {
            assert!(normalize_dob(input).is_err(), "{input} should be rejected");
        }
        assert_eq!(normalize_dob("02-29-2000").unwrap(), "2000-02-29");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert!(normalize_dob("01-01-1899").is_err());
        assert!(normalize_dob("01-01-2101").is_err());
        assert_eq!(normalize_dob("01-01-1900").unwrap(), "1900-01-01");
        assert_eq!(normalize_dob("01-01-2100").unwrap(), "2100-01-01");
    }

    #[test]
    fn first_separator_found_is_used() {
        // Splitting on `-` leaves `04/1990` as the day.
        assert!(normalize_dob("03-04/1990").is_err());
        assert!(normalize_dob("03/04-1990").is_err());
    }

    #[test]
    fn rejects_malformed_shapes() {
        for input in ["", "   ", "03041990", "03-04", "03-04-1990-1", "3--1990", "a3-04-1990"] {
            assert!(normalize_dob(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn rejects_non_digit_parts_and_overflow() {
        assert!(normalize_dob("1x-04-1990").is_err());
        assert!(normalize_dob("03-04-+1990").is_err());
        assert!(normalize_dob("03-04-99999999999999999999").is_err());
    }
}
