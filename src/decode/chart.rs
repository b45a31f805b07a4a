// src/decode/chart.rs
//! Chart decoders.
//!
//! Two shapes show up in snapshots:
//! - catchment charts carry a JSON table in a `data-chart` attribute;
//! - survey answers are rendered by an image-chart service, so the vote counts
//!   only exist in the image URL (`…?cht=bhs&chd=t:30,40,20,10&…`).

use url::form_urlencoded;

use super::Value;

/// How much of the payload value precedes the numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadPrefix {
    /// Drop exactly this many characters (`t:`).
    Fixed(usize),
    /// Drop through the first colon (`t:`, `t1:`, `e:` …).
    ThroughColon,
}

/// Which side of the answer scale a field scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tilt {
    Positive,
    Negative,
}

/// Catchment distance at `table[year + 1][group + 1]`; row 0 and column 0 are headings.
/// A distance of 0 means the group was not offered places, so it is absent.
/// Integers stay integers; anything else keeps its JSON spelling (`2.0`, `0.45`).
pub fn catchment(chart_json: &str, year: usize, group: usize) -> Option<Value> {
    let table: serde_json::Value = serde_json::from_str(chart_json).ok()?;
    let number = table.get(year + 1)?.get(group + 1)?.as_number()?;

    if number.as_f64()? == 0.0 {
        return None;
    }
    match number.as_i64() {
        Some(n) => Some(Value::Int(n)),
        None => Some(Value::Text(number.to_string())),
    }
}

/// Vote counts from a chart image URL: query parameter `param`, prefix removed,
/// first `|`-separated series, comma-split. Any non-integer entry rejects the lot.
pub fn chart_series(src: &str, param: &str, prefix: PayloadPrefix) -> Option<Vec<u64>> {
    let (_, query) = src.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    let raw = form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())?;

    let data = match prefix {
        PayloadPrefix::Fixed(n) => raw.get(n..)?,
        PayloadPrefix::ThroughColon => raw.split_once(':').map_or(raw.as_str(), |(_, rest)| rest),
    };
    let series = data.split('|').next()?;
    if series.trim().is_empty() {
        return None;
    }
    series.split(',').map(|v| v.trim().parse().ok()).collect()
}

/// Raw count in one bucket.
pub fn raw_bucket(series: &[u64], bucket: usize) -> Option<Value> {
    series
        .get(bucket)
        .and_then(|&n| i64::try_from(n).ok())
        .map(Value::Int)
}

/// One bucket as a share of all votes.
pub fn bucket_share(series: &[u64], bucket: usize) -> Option<f64> {
    let total = votes(series)?;
    series.get(bucket).map(|&n| n as f64 / total)
}

/// Normalized, signed aggregate over a 2-, 4- or 6-bucket answer scale.
///
/// | buckets | positive                   | negative                   |
/// |---------|----------------------------|----------------------------|
/// | 2       | b0                         | b1                         |
/// | 4       | 3/2·b0 + b1                | 3/2·b3 + b2                |
/// | 6       | 3/2·b0 + b1 + 1/2·b2       | 3/2·b5 + b4 + 1/2·b3       |
///
/// each divided by the total vote count. No votes, or any other layout, is absent.
pub fn signed_aggregate(series: &[u64], tilt: Tilt) -> Option<f64> {
    let total = votes(series)?;
    let b: Vec<f64> = series.iter().map(|&n| n as f64).collect();

    let weighted = match (b.len(), tilt) {
        (2, Tilt::Positive) => b[0],
        (2, Tilt::Negative) => b[1],
        (4, Tilt::Positive) => b[0] * 3.0 / 2.0 + b[1],
        (4, Tilt::Negative) => b[3] * 3.0 / 2.0 + b[2],
        (6, Tilt::Positive) => b[0] * 3.0 / 2.0 + b[1] + b[2] / 2.0,
        (6, Tilt::Negative) => b[5] * 3.0 / 2.0 + b[4] + b[3] / 2.0,
        _ => return None,
    };
    Some(weighted / total)
}

fn votes(series: &[u64]) -> Option<f64> {
    let total: u64 = series.iter().sum();
    (total > 0).then_some(total as f64)
}
