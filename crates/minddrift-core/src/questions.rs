//! The fixed opening question set.

use crate::model::{Question, QuestionBatch};

const START_QUESTIONS: [(i64, &str); 15] = [
    (1, "Is it alive?"),
    (2, "Is it bigger than a shoebox?"),
    (3, "Can you hold it in one hand?"),
    (4, "Is it mostly made of metal?"),
    (5, "Is it used indoors?"),
    (6, "Does it need electricity to work?"),
    (7, "Can you eat or drink it?"),
    (8, "Is it found in nature?"),
    (9, "Does it have moving parts?"),
    (10, "Is it used for transportation?"),
    (11, "Would you find it in a kitchen?"),
    (12, "Is it soft to the touch?"),
    (13, "Is it mainly one colour?"),
    (14, "Is it used for entertainment?"),
    (15, "Is it older than a hundred years as an invention?"),
];

/// The predetermined questions every game starts with.
pub fn start_questions() -> QuestionBatch {
    START_QUESTIONS
        .iter()
        .map(|(id, text)| Question::new(*id, *text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fifteen_unique_questions() {
        let questions = start_questions();
        assert_eq!(questions.len(), 15);
        let ids: HashSet<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 15);
        assert!(questions.iter().all(|q| q.text.ends_with('?')));
    }

    #[test]
    fn stable_across_calls() {
        assert_eq!(start_questions(), start_questions());
    }
}
