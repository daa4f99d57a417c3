//! Tender duration strings as typed by owners ("2 Minggu", "1 Bulan", "10 hari").

use chrono::{DateTime, Duration, Months, Utc};

pub const DEFAULT_TENDER_DAYS: i64 = 30;

/// Longest tender window accepted for new projects.
pub const MAX_TENDER_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenderDuration {
    Months(u32),
    Days(i64),
}

impl Default for TenderDuration {
    fn default() -> Self {
        Self::Days(DEFAULT_TENDER_DAYS)
    }
}

impl TenderDuration {
    /// Unit keywords are matched case-insensitively anywhere in the string.
    /// A bare integer means days. Anything else falls back to 30 days.
    pub fn parse(value: &str) -> Self {
        Self::parse_exact(value).unwrap_or_default()
    }

    /// Like [`TenderDuration::parse`], but `None` where `parse` would fall
    /// back to the default.
    pub fn parse_exact(value: &str) -> Option<Self> {
        let lower = value.trim().to_lowercase();
        let amount = leading_number(&lower)?;

        if lower.contains("bulan") || lower.contains("month") {
            u32::try_from(amount).ok().map(Self::Months)
        } else if lower.contains("minggu") || lower.contains("week") {
            Some(Self::Days(amount.saturating_mul(7)))
        } else if lower.contains("hari") || lower.contains("day") || lower.parse::<i64>().is_ok() {
            Some(Self::Days(amount))
        } else {
            None
        }
    }

    /// Deadline when the tender starts at `start`. An offset past the end
    /// of the calendar falls back to the 30 day default.
    pub fn deadline_from(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        let deadline = match *self {
            Self::Months(months) => start.checked_add_months(Months::new(months)),
            Self::Days(days) => {
                Duration::try_days(days).and_then(|offset| start.checked_add_signed(offset))
            }
        };
        deadline.unwrap_or_else(|| default_deadline(start))
    }

    /// Whether the window is short enough for a new tender.
    pub fn is_within_limit(&self) -> bool {
        match *self {
            Self::Months(months) => months >= 1 && i64::from(months) * 30 <= MAX_TENDER_DAYS,
            Self::Days(days) => (1..=MAX_TENDER_DAYS).contains(&days),
        }
    }
}

fn default_deadline(start: DateTime<Utc>) -> DateTime<Utc> {
    Duration::try_days(DEFAULT_TENDER_DAYS)
        .and_then(|offset| start.checked_add_signed(offset))
        .unwrap_or(start)
}

fn leading_number(value: &str) -> Option<i64> {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
