//! Month labels and their sort keys
//!
//! Records carry human month labels such as "Jan 2025" or "January 2025".
//! Every chronological ordering in the tracker goes through [`month_key`],
//! which never fails: a label it cannot read maps to key 0 and therefore
//! sorts before every real month.

use chrono::{Datelike, NaiveDate, Utc};
use std::fmt;

/// Full month names, tried first when parsing
pub const FULL_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter month abbreviations
pub const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sort key given to labels that cannot be parsed
pub const UNKNOWN_MONTH_KEY: i64 = 0;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    /// Zero-based month index (0 = January)
    index: u32,
}

impl Month {
    /// Create a month from a year and a zero-based index
    pub fn new(year: i32, index: u32) -> Option<Self> {
        (index < 12).then_some(Self { year, index })
    }

    /// Parse "MonthName Year" where the name is full or abbreviated
    ///
    /// The year must be positive.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let name = parts.next()?;
        let year = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let index = month_index(name)?;
        let year: i32 = year.parse().ok().filter(|y| *y > 0)?;
        Self::new(year, index)
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            index: date.month0(),
        }
    }

    /// The current month (UTC)
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// `year * 12 + index`
    pub fn key(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.index)
    }

    /// "January 2025"
    pub fn full_label(&self) -> String {
        format!("{} {}", FULL_NAMES[self.index as usize], self.year)
    }

    /// "Jan 2025"
    pub fn short_label(&self) -> String {
        format!("{} {}", SHORT_NAMES[self.index as usize], self.year)
    }

    /// The following month
    pub fn succ(&self) -> Self {
        if self.index == 11 {
            Self {
                year: self.year + 1,
                index: 0,
            }
        } else {
            Self {
                year: self.year,
                index: self.index + 1,
            }
        }
    }

    /// The preceding month
    pub fn pred(&self) -> Self {
        if self.index == 0 {
            Self {
                year: self.year - 1,
                index: 11,
            }
        } else {
            Self {
                year: self.year,
                index: self.index - 1,
            }
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_label())
    }
}

/// Zero-based index for a month token, full names first
fn month_index(token: &str) -> Option<u32> {
    FULL_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(token))
        .or_else(|| {
            SHORT_NAMES
                .iter()
                .position(|name| name.eq_ignore_ascii_case(token))
        })
        .map(|i| i as u32)
}

/// Sortable key for a month label
///
/// Returns `year * 12 + month_index` for readable labels and
/// [`UNKNOWN_MONTH_KEY`] for anything else.
pub fn month_key(label: &str) -> i64 {
    Month::parse(label)
        .map(|m| m.key())
        .unwrap_or(UNKNOWN_MONTH_KEY)
}

/// Whether two labels name the same month
///
/// "Jan 2025" and "January 2025" match. Unreadable labels only match an
/// identical string.
pub fn same_month(a: &str, b: &str) -> bool {
    if a.trim() == b.trim() {
        return true;
    }
    match (Month::parse(a), Month::parse(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_short_and_full() {
        assert_eq!(month_key("Jan 2025"), 2025 * 12);
        assert_eq!(month_key("January 2025"), 2025 * 12);
        assert_eq!(month_key("Dec 2024"), 2024 * 12 + 11);
        assert_eq!(month_key("march 2025"), 2025 * 12 + 2);
        assert_eq!(month_key("  Feb   2025 "), 2025 * 12 + 1);
    }

    #[test]
    fn test_month_key_orders_chronologically() {
        assert!(month_key("Dec 2024") < month_key("Jan 2025"));
        assert!(month_key("January 2025") < month_key("Feb 2025"));
    }

    #[test]
    fn test_unreadable_labels_get_epoch_zero() {
        assert_eq!(month_key(""), UNKNOWN_MONTH_KEY);
        assert_eq!(month_key("Smarch 2025"), UNKNOWN_MONTH_KEY);
        assert_eq!(month_key("Jan"), UNKNOWN_MONTH_KEY);
        assert_eq!(month_key("Jan twenty"), UNKNOWN_MONTH_KEY);
        assert_eq!(month_key("Jan 2025 extra"), UNKNOWN_MONTH_KEY);
        assert!(month_key("Smarch 2025") < month_key("Jan 0001"));
    }

    #[test]
    fn test_labels_and_navigation() {
        let m = Month::parse("Dec 2024").unwrap();
        assert_eq!(m.full_label(), "December 2024");
        assert_eq!(m.short_label(), "Dec 2024");
        assert_eq!(m.succ().full_label(), "January 2025");
        assert_eq!(m.succ().pred(), m);
        assert_eq!(Month::parse("Jan 2025").unwrap().pred().short_label(), "Dec 2024");
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(Month::from_date(date).full_label(), "March 2025");
    }

    #[test]
    fn test_non_positive_year_is_unreadable() {
        assert_eq!(Month::parse("Jan 0"), None);
        assert_eq!(Month::parse("Dec -1"), None);
        assert_eq!(month_key("Jan 0"), UNKNOWN_MONTH_KEY);
        assert!(month_key("Jan 1") > UNKNOWN_MONTH_KEY);
    }

    #[test]
    fn test_same_month() {
        assert!(same_month("Jan 2025", "January 2025"));
        assert!(same_month("Jan 2025", "Jan 2025"));
        assert!(!same_month("Jan 2025", "Feb 2025"));
        assert!(same_month("whenever", "whenever"));
        assert!(!same_month("whenever", "Jan 2025"));
    }
}
