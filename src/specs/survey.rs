// src/specs/survey.rs
//! Parent survey questions.
//!
//! The questionnaire was reworded between site revisions while the logical
//! questions stayed put, so each question lists every phrasing seen, current
//! wording first. Position in [`QUESTIONS`] is the question number used in
//! column names and, for the oldest markup, the chart's position on the page.

pub struct Question {
    pub phrasings: &'static [&'static str],
    /// Yes/no question: two answer buckets regardless of layout.
    pub binary: bool,
}

impl Question {
    const fn scale(phrasings: &'static [&'static str]) -> Self {
        Self { phrasings, binary: false }
    }
}

pub const QUESTIONS: [Question; 12] = [
    Question::scale(&["My child is happy at this school.", "My child is happy at this school"]),
    Question::scale(&["My child feels safe at this school.", "My child feels safe at this school"]),
    Question::scale(&[
        "The school makes sure its pupils are well behaved.",
        "This school makes sure its pupils are well behaved",
    ]),
    Question::scale(&[
        "My child has been bullied and the school dealt with the bullying quickly and effectively.",
        "This school deals effectively with bullying",
    ]),
    Question::scale(&[
        "The school makes me aware of what my child will learn during the year.",
        "My child is taught well at this school",
    ]),
    Question::scale(&[
        "When I have raised concerns with the school they have been dealt with properly.",
        "This school responds well to any concerns I raise",
    ]),
    Question::scale(&[
        "The school has high expectations for my child.",
        "My child makes good progress at this school",
    ]),
    Question::scale(&[
        "My child does well at this school.",
        "My child is well looked after at this school",
    ]),
    Question::scale(&[
        "The school lets me know how my child is doing.",
        "I receive valuable information from the school about my child's progress",
    ]),
    Question::scale(&[
        "There is a good range of subjects available to my child at this school.",
        "My child receives appropriate homework for their age",
    ]),
    Question::scale(&[
        "The school supports my child's wider personal development.",
        "This school is well led and managed",
    ]),
    Question {
        phrasings: &[
            "I would recommend this school to another parent.",
            "Would you recommend this school to another parent?",
        ],
        binary: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrasings_never_shared_between_questions() {
        let mut seen = std::collections::HashSet::new();
        for q in &QUESTIONS {
            assert!(!q.phrasings.is_empty());
            for p in q.phrasings {
                assert!(seen.insert(*p), "phrasing reused: {p}");
            }
        }
    }

    #[test]
    fn only_recommendation_is_binary() {
        let binary: Vec<usize> = (0..QUESTIONS.len()).filter(|&i| QUESTIONS[i].binary).collect();
        assert_eq!(binary, vec![11]);
    }
}
