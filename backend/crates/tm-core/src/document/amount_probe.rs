//! Bid amounts arrive under many field names and as numbers or strings.

use serde_json::{Map, Value};

/// Probe order for the bid amount on a raw proposal. First positive numeric
/// value wins.
pub const BID_AMOUNT_FIELDS: [&str; 11] = [
    "totalAmount",
    "totalBidAmount",
    "currentPrice",
    "totalPrice",
    "finalPrice",
    "originalPrice",
    "proposedPrice",
    "price",
    "bidAmount",
    "amount",
    "total",
];

pub fn probe_bid_amount(fields: &Map<String, Value>) -> Option<i64> {
    BID_AMOUNT_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(positive_amount))
}

/// Positive whole amount from a JSON number or numeric string. Zero,
/// negatives, blanks, non-numeric values and amounts beyond `i64` count as
/// empty.
pub fn positive_amount(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value
        && let Some(whole) = n.as_i64()
    {
        return (whole > 0).then_some(whole);
    }

    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_amount_str(s)?,
        _ => return None,
    };

    let rounded = number.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if rounded.is_finite() && rounded > 0.0 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Non-negative integer (phase counts, progress) from a number or string.
pub fn whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_amount_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rp")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // "90.000.000" / "90,000,000": separators grouping digits in threes
    let groups: Vec<&str> = cleaned.split(['.', ',']).collect();
    let grouped = groups.len() > 1
        && groups[0].len() <= 3
        && groups.iter().all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()))
        && groups[1..].iter().all(|g| g.len() == 3);
    if grouped {
        return groups.concat().parse().ok();
    }

    cleaned.parse::<f64>().ok()
}
