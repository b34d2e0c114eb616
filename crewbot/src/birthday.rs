//! Birthday argument parsing for `/birthday`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("hardcoded regex"));
static DMY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("hardcoded regex"));

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`; the date must exist in the calendar.
pub fn parse_birthday(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let (year, month, day) = if let Some(c) = ISO_DATE.captures(input) {
        (c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)
    } else if let Some(c) = DMY_DATE.captures(input) {
        (c[3].parse().ok()?, c[2].parse().ok()?, c[1].parse().ok()?)
    } else {
        return None;
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
