//! Tests for [`crewbot::birthday::parse_birthday`].

use chrono::NaiveDate;
use crewbot::birthday::parse_birthday;

/// **Test: Both accepted formats normalize to the same date.**
#[test]
fn test_parse_both_formats() {
    let expected = NaiveDate::from_ymd_opt(1990, 5, 4);
    assert_eq!(parse_birthday("1990-05-04"), expected);
    assert_eq!(parse_birthday("04/05/1990"), expected);
    assert_eq!(parse_birthday(" 1990-05-04 "), expected);
}

/// **Test: Dates missing from the calendar are rejected.**
#[test]
fn test_reject_impossible_dates() {
    assert_eq!(parse_birthday("2024-02-30"), None);
    assert_eq!(parse_birthday("30/02/2024"), None);
    assert_eq!(parse_birthday("2023-02-29"), None);
    assert!(parse_birthday("2024-02-29").is_some());
}

/// **Test: Other shapes are rejected.**
#[test]
fn test_reject_other_shapes() {
    for input in ["", "1990-5-4", "4/5/1990", "1990/05/04", "05-04-1990", "tomorrow"] {
        assert_eq!(parse_birthday(input), None, "input: {input}");
    }
}
