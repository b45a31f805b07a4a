// src/specs/catalog.rs
//! Catalog builder.
//!
//! Column order is the output contract: downstream consumers key on the literal
//! header names, so families are appended in a fixed order and every parameter
//! that tells two columns of a family apart is part of the name.

use std::collections::HashSet;

use super::field::{Column, Extract, Field, Occurrence, Signal, SurveyAnchor, SurveyPolicy, Weight};
use super::schema::{EmissionPolicy, Schema, SchemaVersion, SurveyPlan};
use super::survey::{QUESTIONS, Question};
use crate::config::consts::*;
use crate::core::dom::Document;
use crate::decode::Cell;
use crate::decode::chart::Tilt;
use crate::error::CatalogError;

use Signal::{Negative, Positive};

/// One extracted document, aligned 1:1 with catalog order.
pub type Row = Vec<Cell>;

const SCORED: Weight = Weight::Scored(1.0);

/// Single-occurrence labels. First phrasing names the column.
const SIMPLE: [(&[&str], Signal); 5] = [
    (&["Pupils per Teacher"], Positive),
    (&["Receives Free School Meals", "Eligible for Free School Meals"], Negative),
    (&["First Language is not English"], Positive),
    (&["Persistent Absence", "Persistently Absent"], Negative),
    (&["Pupils with SEN Support", "Pupils with Special Educational Needs"], Negative),
];

#[derive(Clone, Copy)]
enum Series {
    /// One occurrence per year; named "{year} {label}".
    Yearly,
    /// Two sub-scores share a label; named "{year} {offset} {label}".
    Interleaved { multiplier: usize, offset: usize },
}

/// Per-year attainment block, in page order.
const ATTAINMENT: [(&[&str], Series); 7] = [
    (&["Pupils meeting the expected standard"], Series::Yearly),
    (&["Pupils achieving at a higher standard"], Series::Yearly),
    (&["Reading"], Series::Interleaved { multiplier: 2, offset: 0 }),
    (&["Maths"], Series::Interleaved { multiplier: 2, offset: 0 }),
    (&["Reading"], Series::Interleaved { multiplier: 2, offset: 1 }),
    (&["Writing"], Series::Yearly),
    (&["Maths"], Series::Interleaved { multiplier: 2, offset: 1 }),
];

/// Ordered, name-unique set of fields for one schema version.
#[derive(Clone, Debug)]
pub struct Catalog {
    emission: EmissionPolicy,
    fields: Vec<Field>,
}

impl Catalog {
    pub fn build(schema: &Schema) -> Result<Self, CatalogError> {
        let mut fields = vec![Field::identity("Name", Extract::ClassText(NAME_CLASS))];
        if schema.with_address {
            fields.push(Field::identity("Address", Extract::ClassText(ADDRESS_CLASS)));
        }
        fields.push(Field::new("AtCapacity", Positive, SCORED, Extract::Capacity));

        for (labels, signal) in SIMPLE {
            let at = Occurrence::First;
            fields.push(Field::new(labels[0], signal, SCORED, Extract::Labelled { labels, at }));
        }

        fields.push(Field::new("OfstedYear", Positive, schema.ofsted_year_weight, Extract::OfstedYear));
        fields.push(Field::new("OfstedRating", Positive, SCORED, Extract::OfstedRating));

        let totals = schema.rank_totals;
        for year in 0..totals.len() {
            fields.push(Field::new(name!(year, "Rank"), Negative, SCORED, Extract::Rank { year, totals }));
        }

        for year in 0..schema.attainment_years {
            for (labels, series) in ATTAINMENT {
                let (name, at) = match series {
                    Series::Yearly => (name!(year, labels[0]), Occurrence::Year(year)),
                    Series::Interleaved { multiplier, offset } => (
                        name!(year, offset, labels[0]),
                        Occurrence::Interleaved { year, multiplier, offset },
                    ),
                };
                fields.push(Field::new(name, Positive, SCORED, Extract::Labelled { labels, at }));
            }
        }

        for (q, question) in QUESTIONS.iter().enumerate() {
            fields.extend(survey_fields(schema, q, question));
        }

        for year in 0..schema.oversubscribed_years {
            fields.push(Field::new(
                name!(year, "Oversubscribed"),
                Positive,
                schema.oversubscribed_weight,
                Extract::Oversubscribed { year },
            ));
        }

        for year in schema.ldo_years.clone() {
            // no space between year and family: historical header
            fields.push(Field::new(
                join!(&year.to_string(), "LastDistanceOffered"),
                Positive,
                SCORED,
                Extract::Catchment { class: LDO_CLASS, year, group: 0 },
            ));
        }

        for year in 0..schema.distribution_years {
            for group in 0..schema.distribution_groups {
                fields.push(Field::new(
                    name!(year, group, "Distribution"),
                    Positive,
                    SCORED,
                    Extract::Catchment { class: CATCHMENT_CLASS, year, group },
                ));
            }
        }

        Self::from_fields(schema.emission, fields)
    }

    /// Wrap an explicit field list, rejecting duplicate names.
    pub fn from_fields(emission: EmissionPolicy, fields: Vec<Field>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for f in &fields {
            if !seen.insert(f.name()) {
                return Err(CatalogError::DuplicateField(s!(f.name())));
            }
        }
        Ok(Self { emission, fields })
    }

    pub fn for_version(version: SchemaVersion) -> Result<Self, CatalogError> {
        Self::build(&version.schema())
    }

    pub fn emission(&self) -> EmissionPolicy {
        self.emission
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Run every field over one document. Fields never fail; misses are `None`.
    pub fn extract(&self, doc: &Document) -> Row {
        self.fields.iter().map(|f| f.value(doc)).collect()
    }
}

fn survey_fields(schema: &Schema, q: usize, question: &Question) -> Vec<Field> {
    let prefix = schema.payload_prefix;
    let by_label = SurveyAnchor::Labels(question.phrasings);

    match schema.survey {
        SurveyPlan::RawBuckets => {
            let answers: &[(usize, Signal)] = if question.binary {
                &[(0, Positive), (1, Negative)]
            } else {
                &[(0, Positive), (1, Positive), (2, Negative), (3, Negative)]
            };
            answers
                .iter()
                .map(|&(a, signal)| {
                    let extract = Extract::Survey {
                        anchor: SurveyAnchor::Position(q),
                        prefix,
                        policy: SurveyPolicy::RawBucket(a),
                    };
                    Field::new(name!(q, a, "Reviews"), signal, SCORED, extract)
                })
                .collect()
        }

        SurveyPlan::SignedPair => [(Tilt::Positive, Positive, "Positive"), (Tilt::Negative, Negative, "Negative")]
            .into_iter()
            .map(|(tilt, signal, side)| {
                let extract = Extract::Survey { anchor: by_label, prefix, policy: SurveyPolicy::Aggregate(tilt) };
                Field::new(name!(q, side, "Reviews"), signal, SCORED, extract)
            })
            .collect(),

        SurveyPlan::WeightedShares { buckets } => {
            let shares: Vec<(usize, Signal, f64)> = if question.binary {
                vec![(0, Positive, 1.0), (1, Negative, 1.0)]
            } else {
                vec![
                    (0, Positive, 1.5),
                    (1, Positive, 1.0),
                    (buckets - 2, Negative, 1.0),
                    (buckets - 1, Negative, 1.5),
                ]
            };
            shares
                .into_iter()
                .map(|(b, signal, weight)| {
                    let extract = Extract::Survey { anchor: by_label, prefix, policy: SurveyPolicy::Share(b) };
                    Field::new(name!(q, b, "ReviewShare"), signal, Weight::Scored(weight), extract)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(c: &Catalog) -> Vec<&str> {
        c.fields().iter().map(|f| f.name()).collect()
    }

    #[test]
    fn every_version_builds_with_unique_names() {
        for v in SchemaVersion::ALL {
            let c = Catalog::for_version(v).unwrap();
            let unique: HashSet<&str> = names(&c).into_iter().collect();
            assert_eq!(unique.len(), c.len(), "{v}");
        }
    }

    #[test]
    fn legacy_headers_match_historical_layout() {
        let c = Catalog::for_version(SchemaVersion::Legacy).unwrap();
        let n = names(&c);
        assert_eq!(
            &n[..10],
            &[
                "Name",
                "AtCapacity",
                "Pupils per Teacher",
                "Receives Free School Meals",
                "First Language is not English",
                "Persistent Absence",
                "Pupils with SEN Support",
                "OfstedYear",
                "OfstedRating",
                "0 Rank",
            ]
        );
        assert_eq!(
            &n[10..17],
            &[
                "0 Pupils meeting the expected standard",
                "0 Pupils achieving at a higher standard",
                "0 0 Reading",
                "0 0 Maths",
                "0 1 Reading",
                "0 Writing",
                "0 1 Maths",
            ]
        );
        // 10 + 3 years x 7 + 11 x 4 + 2 reviews + 5 + 2 + 7 x 3
        assert_eq!(c.len(), 10 + 21 + 46 + 5 + 2 + 21);
        assert!(c.position("11 1 Reviews").is_some());
        assert!(c.position("11 2 Reviews").is_none());
        assert!(c.position("1LastDistanceOffered").is_some());
        assert_eq!(n.last(), Some(&"6 2 Distribution"));
    }

    #[test]
    fn labelled_pairs_survey_columns() {
        let c = Catalog::for_version(SchemaVersion::Labelled).unwrap();
        let pos = c.position("0 Positive Reviews").unwrap();
        assert_eq!(names(&c)[pos + 1], "0 Negative Reviews");
        assert_eq!(c.fields()[pos].signal(), Signal::Positive);
        assert_eq!(c.fields()[pos + 1].signal(), Signal::Negative);
        assert!(c.position("1 Rank").is_some());
        assert!(c.position("Address").is_some());
    }

    #[test]
    fn granular_shares_use_outer_buckets() {
        let c = Catalog::for_version(SchemaVersion::Granular).unwrap();
        for name in ["3 0 ReviewShare", "3 1 ReviewShare", "3 4 ReviewShare", "3 5 ReviewShare"] {
            assert!(c.position(name).is_some(), "{name}");
        }
        let extreme = &c.fields()[c.position("3 5 ReviewShare").unwrap()];
        assert_eq!(extreme.weight(), Weight::Scored(1.5));
        assert_eq!(extreme.signal(), Signal::Negative);
        assert!(c.position("11 1 ReviewShare").is_some());
        assert!(c.position("11 5 ReviewShare").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let f = Field::identity("Name", Extract::ClassText(NAME_CLASS));
        let err = Catalog::from_fields(EmissionPolicy::EmitAll, vec![f.clone(), f]);
        assert!(matches!(err, Err(CatalogError::DuplicateField(n)) if n == "Name"));
    }

    #[test]
    fn empty_document_yields_all_absent_row() {
        let c = Catalog::for_version(SchemaVersion::Granular).unwrap();
        let row = c.extract(&Document::parse(""));
        assert_eq!(row.len(), c.len());
        assert!(row.iter().all(Option::is_none));
    }
}
