// src/decode/text.rs
//! Sentence and number decoders.

use std::sync::LazyLock;

use regex::Regex;

use super::Value;
use crate::core::sanitize::{normalize_ws, strip_thousands};

static CAPACITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"At ([0-9]+)% Capacity").expect("capacity pattern"));

static RANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ranked ([0-9,]+) of ([0-9,]+) schools \(").expect("rank pattern"));

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+%)").expect("percent pattern"));

/// Properly decoded and mis-decoded (UTF-8 read as cp1252) infinity variants.
const INFINITE_OVERSUBSCRIPTION: [&str; 2] = ["∞% Oversubscribed", "âˆž% Oversubscribed"];

/// "At 87% Capacity (420 pupils)" -> "87%". Kept as text, not a ratio.
pub fn capacity_percent(sentence: &str) -> Option<String> {
    CAPACITY
        .captures(sentence)
        .map(|caps| join!(&caps[1], "%"))
}

/// "1,234" -> 1234.
pub fn trend_integer(s: &str) -> Option<i64> {
    strip_thousands(s.trim()).parse().ok()
}

/// "Ranked R of <total> schools (…)" -> R, where `<total>` is the population
/// total for `year` (`totals[year]`). `None` past the known totals or on mismatch.
pub fn rank(sentence: &str, year: usize, totals: &[&str]) -> Option<i64> {
    let total = totals.get(year)?;
    let caps = RANK.captures(sentence)?;
    if &caps[2] != *total {
        return None;
    }
    trend_integer(&caps[1])
}

/// Ordinal for an inspection outcome.
/// Only three labels are known; "Inadequate", "Requires Improvement" and the rest stay absent.
pub fn ofsted_rating(outcome: &str) -> Option<i64> {
    match normalize_ws(outcome).as_str() {
        "Outstanding" => Some(3),
        "Good" => Some(2),
        "Satisfactory" => Some(1),
        _ => None,
    }
}

/// Third whitespace-delimited token of the sentence above the outcome.
pub fn ofsted_year(sentence: &str) -> Option<String> {
    sentence.split_whitespace().nth(2).map(str::to_owned)
}

/// "Not Oversubscribed" -> 0, infinity -> "Inf", else the first "N%".
pub fn oversubscription(text: &str) -> Option<Value> {
    let text = normalize_ws(text);
    if text == "Not Oversubscribed" {
        return Some(Value::Int(0));
    }
    if INFINITE_OVERSUBSCRIPTION.contains(&text.as_str()) {
        return Some(Value::from("Inf"));
    }
    PERCENT
        .captures(&text)
        .map(|caps| Value::from(&caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTALS: [&str; 2] = ["16,080", "16,033"];

    #[test]
    fn capacity_keeps_percent_sign() {
        assert_eq!(capacity_percent("At 87% Capacity (some trailing text)").as_deref(), Some("87%"));
        assert_eq!(capacity_percent("Capacity unknown"), None);
    }

    #[test]
    fn trend_integer_strips_commas() {
        assert_eq!(trend_integer(" 16,080 "), Some(16080));
        assert_eq!(trend_integer("n/a"), None);
    }

    #[test]
    fn rank_uses_total_for_year() {
        assert_eq!(rank("Ranked 1,234 of 16,080 schools (top 8%)", 0, &TOTALS), Some(1234));
        assert_eq!(rank("Ranked 500 of 16,033 schools (...)", 1, &TOTALS), Some(500));
    }

    #[test]
    fn rank_mismatch_or_unknown_year_is_absent() {
        // right sentence, wrong population for that year
        assert_eq!(rank("Ranked 500 of 16,033 schools (...)", 0, &TOTALS), None);
        assert_eq!(rank("Ranked 9 of 16,080 schools (top 1%)", 2, &TOTALS), None);
        assert_eq!(rank("Not ranked", 0, &TOTALS), None);
        assert_eq!(rank("Ranked 9 of 116,080 schools (top 1%)", 0, &TOTALS), None);
    }

    #[test]
    fn ofsted_labels() {
        assert_eq!(ofsted_rating("Outstanding"), Some(3));
        assert_eq!(ofsted_rating(" Good "), Some(2));
        assert_eq!(ofsted_rating("Satisfactory"), Some(1));
        assert_eq!(ofsted_rating("Inadequate"), None);
        assert_eq!(ofsted_rating("Requires Improvement"), None);
    }

    #[test]
    fn ofsted_year_is_positional() {
        assert_eq!(ofsted_year("Latest Ofsted 2019 report").as_deref(), Some("2019"));
        assert_eq!(ofsted_year("Too short"), None);
    }

    #[test]
    fn oversubscription_variants() {
        assert_eq!(oversubscription("Not Oversubscribed"), Some(Value::Int(0)));
        assert_eq!(oversubscription("∞% Oversubscribed"), Some(Value::from("Inf")));
        assert_eq!(oversubscription("âˆž% Oversubscribed"), Some(Value::from("Inf")));
        assert_eq!(oversubscription("150% Oversubscribed (details)"), Some(Value::from("150%")));
        assert_eq!(oversubscription("Oversubscribed"), None);
    }
}
