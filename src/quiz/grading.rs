use std::collections::BTreeMap;

use crate::models::{QuizQuestion, ResultEntry};

/// How one question was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub index: usize,
    pub given: Option<char>,
    pub correct: Option<char>,
    pub is_correct: bool,
}

/// Score of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub score: usize,
    pub total: usize,
    pub outcomes: Vec<Outcome>,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.score as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Grade `responses` (question index to letter) against `quiz`.
pub fn grade(quiz: &[QuizQuestion], responses: &BTreeMap<usize, char>) -> Grade {
    let outcomes: Vec<Outcome> = quiz
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let given = responses.get(&index).copied();
            Outcome {
                index,
                given,
                correct: question.correct,
                is_correct: question.is_correct(given),
            }
        })
        .collect();

    Grade {
        score: outcomes.iter().filter(|o| o.is_correct).count(),
        total: quiz.len(),
        outcomes,
    }
}

/// Correct and wrong answers for one question position across all attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionTally {
    pub index: usize,
    pub correct: usize,
    pub wrong: usize,
}

impl QuestionTally {
    pub fn label(&self) -> String {
        format!("Q{}", self.index + 1)
    }
}

/// Tally every recorded response against the quiz it was given for.
///
/// `load_quiz` resolves a quiz path; entries whose quiz cannot be loaded and
/// responses pointing past the end of their quiz are ignored.
pub fn tally<F>(results: &[ResultEntry], mut load_quiz: F) -> Vec<QuestionTally>
where
    F: FnMut(&str) -> Option<Vec<QuizQuestion>>,
{
    let mut tallies: BTreeMap<usize, QuestionTally> = BTreeMap::new();

    for entry in results {
        let Some(quiz) = entry.quiz.as_deref().and_then(&mut load_quiz) else {
            continue;
        };

        for (&index, &given) in &entry.responses {
            let Some(question) = quiz.get(index) else {
                continue;
            };
            let tally = tallies.entry(index).or_insert_with(|| QuestionTally {
                index,
                ..Default::default()
            });
            if question.is_correct(Some(given)) {
                tally.correct += 1;
            } else {
                tally.wrong += 1;
            }
        }
    }

    tallies.into_values().collect()
}

/// One recorded response, flattened for the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub quiz: String,
    pub question: String,
    pub answer: char,
}

pub fn history_rows(results: &[ResultEntry]) -> Vec<HistoryRow> {
    results
        .iter()
        .flat_map(|entry| {
            let quiz = entry.quiz.clone().unwrap_or_else(|| "unknown".to_string());
            entry
                .responses
                .iter()
                .map(move |(index, answer)| HistoryRow {
                    timestamp: entry.timestamp.clone(),
                    quiz: quiz.clone(),
                    question: format!("Q{}", index + 1),
                    answer: *answer,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionSet;

    fn question(correct: Option<char>) -> QuizQuestion {
        QuizQuestion {
            question: "Q".to_string(),
            options: [('a', "x"), ('b', "y")].into_iter().collect::<OptionSet>(),
            correct,
        }
    }

    fn entry(quiz: Option<&str>, responses: &[(usize, char)]) -> ResultEntry {
        ResultEntry {
            timestamp: "2026-10-18 10:00:00".to_string(),
            doc: None,
            quiz: quiz.map(str::to_string),
            score: 0,
            total: 0,
            responses: responses.iter().copied().collect(),
        }
    }

    #[test]
    fn test_grade_counts_only_matching_letters() {
        let quiz = vec![question(Some('a')), question(Some('b')), question(None)];
        let responses = BTreeMap::from([(0, 'a'), (1, 'a'), (2, 'a')]);

        let grade = grade(&quiz, &responses);
        assert_eq!(grade.score, 1);
        assert_eq!(grade.total, 3);
        assert!(grade.outcomes[0].is_correct);
        assert!(!grade.outcomes[1].is_correct);
        assert!(!grade.outcomes[2].is_correct);
        assert_eq!(grade.outcomes[1].correct, Some('b'));
    }

    #[test]
    fn test_unanswered_question_is_wrong() {
        let quiz = vec![question(Some('a'))];
        let grade = grade(&quiz, &BTreeMap::new());
        assert_eq!(grade.score, 0);
        assert_eq!(grade.outcomes[0].given, None);
        assert_eq!(grade.percentage(), 0.0);
    }

    #[test]
    fn test_empty_quiz_percentage() {
        let grade = grade(&[], &BTreeMap::new());
        assert_eq!(grade.total, 0);
        assert_eq!(grade.percentage(), 0.0);
    }

    #[test]
    fn test_tally_across_attempts() {
        let results = vec![
            entry(Some("q1.json"), &[(0, 'a'), (1, 'a')]),
            entry(Some("q1.json"), &[(0, 'b'), (1, 'b'), (7, 'a')]),
            entry(Some("missing.json"), &[(0, 'a')]),
            entry(None, &[(0, 'a')]),
        ];

        let tallies = tally(&results, |path| {
            (path == "q1.json").then(|| vec![question(Some('a')), question(Some('b'))])
        });

        assert_eq!(
            tallies,
            vec![
                QuestionTally { index: 0, correct: 1, wrong: 1 },
                QuestionTally { index: 1, correct: 1, wrong: 1 },
            ]
        );
        assert_eq!(tallies[1].label(), "Q2");
    }

    #[test]
    fn test_history_rows() {
        let results = vec![
            entry(Some("q1.json"), &[(0, 'a'), (1, 'c')]),
            entry(None, &[(0, 'b')]),
        ];

        let rows = history_rows(&results);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].quiz, "q1.json");
        assert_eq!(rows[1].question, "Q2");
        assert_eq!(rows[1].answer, 'c');
        assert_eq!(rows[2].quiz, "unknown");
    }
}
