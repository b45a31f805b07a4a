// src/specs/schema.rs
//! Schema versions.
//!
//! The site changed its markup and label conventions several times. Instead of
//! one extractor per revision, each revision is a [`Schema`]: a bundle of the
//! settings that actually differ. The catalog builder reads it once per run.

use std::{fmt, str::FromStr};

use super::field::Weight;
use crate::decode::chart::PayloadPrefix;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// Original markup: positional survey charts, one ranking year, every column emitted.
    #[default]
    Legacy,
    /// Labelled survey blocks, signed survey aggregates, two ranking years.
    Labelled,
    /// Six-answer survey scale reported as four weighted bucket shares.
    Granular,
}

/// Which columns reach the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmissionPolicy {
    /// Every field, absent cells as "".
    EmitAll,
    /// Fields weighted 0 are dropped, header rows included.
    ScoredOnly,
}

/// How survey charts are found and turned into columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyPlan {
    /// Chart found by its position among `answers-graph` blocks; one column per raw bucket.
    RawBuckets,
    /// Chart found by question label; positive and negative aggregate per question.
    SignedPair,
    /// Chart found by question label; four weighted bucket shares per question.
    WeightedShares { buckets: usize },
}

#[derive(Clone, Debug)]
pub struct Schema {
    pub version: SchemaVersion,
    /// Population total in the ranking sentence, per ranking year.
    pub rank_totals: &'static [&'static str],
    pub attainment_years: usize,
    pub oversubscribed_years: usize,
    pub oversubscribed_weight: Weight,
    pub ofsted_year_weight: Weight,
    pub distribution_years: usize,
    pub distribution_groups: usize,
    pub ldo_years: std::ops::RangeInclusive<usize>,
    pub survey: SurveyPlan,
    pub payload_prefix: PayloadPrefix,
    pub with_address: bool,
    pub emission: EmissionPolicy,
}

const TOTALS_2019: &[&str] = &["16,080"];
const TOTALS_2020: &[&str] = &["16,080", "16,033"];

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 3] =
        [SchemaVersion::Legacy, SchemaVersion::Labelled, SchemaVersion::Granular];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::Legacy => "legacy",
            SchemaVersion::Labelled => "labelled",
            SchemaVersion::Granular => "granular",
        }
    }

    pub fn schema(self) -> Schema {
        let legacy = Schema {
            version: self,
            rank_totals: TOTALS_2019,
            attainment_years: 3,
            oversubscribed_years: 5,
            oversubscribed_weight: Weight::Scored(1.0),
            ofsted_year_weight: Weight::Scored(1.0),
            distribution_years: 7,
            distribution_groups: 3,
            ldo_years: 1..=2,
            survey: SurveyPlan::RawBuckets,
            payload_prefix: PayloadPrefix::Fixed(2),
            with_address: false,
            emission: EmissionPolicy::EmitAll,
        };

        match self {
            SchemaVersion::Legacy => legacy,
            SchemaVersion::Labelled => Schema {
                rank_totals: TOTALS_2020,
                oversubscribed_weight: Weight::Scored(0.0),
                ofsted_year_weight: Weight::Scored(0.0),
                survey: SurveyPlan::SignedPair,
                payload_prefix: PayloadPrefix::ThroughColon,
                with_address: true,
                emission: EmissionPolicy::ScoredOnly,
                ..legacy
            },
            SchemaVersion::Granular => Schema {
                rank_totals: TOTALS_2020,
                oversubscribed_weight: Weight::Scored(0.0),
                ofsted_year_weight: Weight::Scored(0.0),
                survey: SurveyPlan::WeightedShares { buckets: 6 },
                payload_prefix: PayloadPrefix::ThroughColon,
                with_address: true,
                emission: EmissionPolicy::ScoredOnly,
                ..legacy
            },
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lc = s.trim().to_ascii_lowercase();
        SchemaVersion::ALL
            .into_iter()
            .find(|v| v.as_str() == lc)
            .ok_or_else(|| format!("Unknown schema: {s} (expected legacy, labelled or granular)"))
    }
}
