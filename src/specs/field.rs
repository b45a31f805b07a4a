// src/specs/field.rs
//! The unit of extraction.
//!
//! A [`Field`] is a name, a signal, a weight and an [`Extract`] strategy. The
//! strategy is a closed set of variants holding their own parameters (year,
//! occurrence arithmetic, label phrasings, survey policy); [`Extract::apply`]
//! is the single dispatch point from document to cell.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::config::consts::*;
use crate::core::dom::{Document, Located, SIBLING_CHAIN, parent_preceding, sibling_value};
use crate::core::sanitize::is_blank;
use crate::decode::chart::{self, PayloadPrefix, Tilt};
use crate::decode::{Cell, Value, text};

use super::survey::QUESTIONS;

static OVERSUBSCRIBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OVERSUBSCRIBED_PATTERN).expect("oversubscribed class pattern"));

/// Direction in which a larger value is assumed to be better.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Positive,
    Negative,
    /// Identity columns (name, address).
    Unsigned,
}

/// Relative importance downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Weight {
    /// Identity columns.
    Identity,
    /// `Scored(0.0)` keeps the column for inspection but out of scoring.
    Scored(f64),
}

/// The capability every column exposes.
pub trait Column {
    fn name(&self) -> &str;
    fn signal(&self) -> Signal;
    fn weight(&self) -> Weight;
    fn value(&self, doc: &Document) -> Cell;
}

/// Which occurrence of a repeated label a field reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occurrence {
    First,
    /// One occurrence per year.
    Year(usize),
    /// Several interleaved series per year: `year * multiplier + offset`.
    Interleaved { year: usize, multiplier: usize, offset: usize },
}

/// Where a survey chart lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyAnchor {
    /// n-th `answers-graph` block on the page.
    Position(usize),
    /// Block following the first matching question phrasing.
    Labels(&'static [&'static str]),
}

/// What a survey column reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyPolicy {
    RawBucket(usize),
    Aggregate(Tilt),
    Share(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Extract {
    /// Text of the first element with this class.
    ClassText(&'static str),
    /// "At N% Capacity" sentence by id.
    Capacity,
    /// Value next to a label, by occurrence.
    Labelled { labels: &'static [&'static str], at: Occurrence },
    Rank { year: usize, totals: &'static [&'static str] },
    OfstedYear,
    OfstedRating,
    Oversubscribed { year: usize },
    /// `data-chart` table on the first element of `class`.
    Catchment { class: &'static str, year: usize, group: usize },
    Survey { anchor: SurveyAnchor, prefix: PayloadPrefix, policy: SurveyPolicy },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    signal: Signal,
    weight: Weight,
    extract: Extract,
}

impl Signal {
    pub fn sign(self) -> Option<i8> {
        match self {
            Signal::Positive => Some(1),
            Signal::Negative => Some(-1),
            Signal::Unsigned => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign() {
            Some(s) => write!(f, "{s}"),
            None => Ok(()),
        }
    }
}

impl Weight {
    pub fn is_excluded(self) -> bool {
        matches!(self, Weight::Scored(w) if w == 0.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Identity => Ok(()),
            Weight::Scored(w) => write!(f, "{w}"),
        }
    }
}

impl Occurrence {
    pub fn index(self) -> usize {
        match self {
            Occurrence::First => 0,
            Occurrence::Year(year) => year,
            Occurrence::Interleaved { year, multiplier, offset } => year * multiplier + offset,
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, signal: Signal, weight: Weight, extract: Extract) -> Self {
        Self { name: name.into(), signal, weight, extract }
    }

    /// Identity column: unsigned, unweighted.
    pub fn identity(name: impl Into<String>, extract: Extract) -> Self {
        Self::new(name, Signal::Unsigned, Weight::Identity, extract)
    }
}

impl Column for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn signal(&self) -> Signal {
        self.signal
    }

    fn weight(&self) -> Weight {
        self.weight
    }

    fn value(&self, doc: &Document) -> Cell {
        self.extract.apply(doc)
    }
}

impl Extract {
    pub fn apply(&self, doc: &Document) -> Cell {
        match *self {
            Extract::ClassText(class) => doc
                .first_by_class(class)
                .map(|el| Located::Element(el).text())
                .filter(|t| !t.is_empty())
                .map(Value::Text),

            Extract::Capacity => doc
                .by_id(CAPACITY_ID)
                .and_then(|el| text::capacity_percent(&Located::Element(el).text()))
                .map(Value::Text),

            Extract::Labelled { labels, at } => {
                let hits = doc.by_any_text(labels);
                let label = *hits.get(at.index())?;
                let found = sibling_value(label, &SIBLING_CHAIN, |n| !n.text().is_empty())?;
                Some(Value::Text(found.text()))
            }

            Extract::Rank { year, totals } => {
                let rankings = doc.by_class(RANKING_CLASS);
                let sentence = Located::Element(*rankings.get(year)?).text();
                text::rank(&sentence, year, totals).map(Value::Int)
            }

            Extract::OfstedYear => {
                let outcome = latest_outcome(doc)?;
                let heading = parent_preceding(outcome, 2)?;
                text::ofsted_year(&heading.raw_text()).map(Value::Text)
            }

            Extract::OfstedRating => {
                let outcome = latest_outcome(doc)?;
                text::ofsted_rating(&Located::Element(outcome).raw_text()).map(Value::Int)
            }

            Extract::Oversubscribed { year } => {
                let states = doc.by_class_pattern(&OVERSUBSCRIBED);
                text::oversubscription(&Located::Element(*states.get(year)?).raw_text())
            }

            Extract::Catchment { class, year, group } => {
                let el = doc.first_by_class(class)?;
                chart::catchment(el.value().attr(CHART_ATTR)?, year, group)
            }

            Extract::Survey { anchor, prefix, policy } => {
                let src = survey_chart_src(doc, anchor)?;
                let series = chart::chart_series(src, CHART_DATA_PARAM, prefix)?;
                match policy {
                    SurveyPolicy::RawBucket(bucket) => chart::raw_bucket(&series, bucket),
                    SurveyPolicy::Aggregate(tilt) => chart::signed_aggregate(&series, tilt).map(Value::Real),
                    SurveyPolicy::Share(bucket) => chart::bucket_share(&series, bucket).map(Value::Real),
                }
            }
        }
    }
}

/// Most recent inspection: first outcome element whose text is not blank.
fn latest_outcome(doc: &Document) -> Option<scraper::ElementRef<'_>> {
    doc.by_class(OUTCOME_CLASS)
        .into_iter()
        .find(|el| !is_blank(&Located::Element(*el).raw_text()))
}

fn survey_chart_src<'d>(doc: &'d Document, anchor: SurveyAnchor) -> Option<&'d str> {
    match anchor {
        SurveyAnchor::Position(n) => {
            let block = *doc.by_class(ANSWERS_CLASS).get(n)?;
            Located::Element(block).image_src()
        }
        SurveyAnchor::Labels(phrasings) => {
            let label = *doc.by_any_text(phrasings).first()?;
            let chart = sibling_value(label, &SIBLING_CHAIN, |n| owns_chart(n, phrasings))?;
            chart.image_src()
        }
    }
}

/// A chart node for the label just passed: it holds an image, and is not
/// itself the block of another question.
fn owns_chart(node: &Located<'_>, phrasings: &[&str]) -> bool {
    if node.image_src().is_none() {
        return false;
    }
    let text = node.text();
    !QUESTIONS
        .iter()
        .flat_map(|q| q.phrasings)
        .chain(phrasings)
        .any(|p| text.contains(p))
}
