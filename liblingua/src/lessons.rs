//! Built-in lesson catalogue
//!
//! Lessons ship with the client and never change at runtime; only the
//! learner's results are part of `AppState`. Every question carries its own
//! accepted answer, so a quiz is always graded against the catalogue.

use serde::Serialize;
use std::fmt;

use crate::app::AppState;
use crate::quiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
    Translation,
    Listening,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple choice"),
            QuestionKind::FillBlank => write!(f, "fill in the blank"),
            QuestionKind::Translation => write!(f, "translation"),
            QuestionKind::Listening => write!(f, "listening"),
        }
    }
}

/// A single question; the answer key is never serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: &'static str,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing)]
    pub correct_answer: &'static str,
    #[serde(skip_serializing)]
    pub explanation: &'static str,
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        quiz::answer_matches(self.correct_answer, answer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub duration: &'static str,
    pub topics: &'static [&'static str],
    pub points: u32,
    pub questions: &'static [Question],
}

impl Lesson {
    /// Accepted answers in question order
    pub fn answer_key(&self) -> Vec<&'static str> {
        self.questions.iter().map(|q| q.correct_answer).collect()
    }

    /// Grade answers given in question order; `None` is unanswered
    pub fn score(&self, answers: &[Option<&str>]) -> u8 {
        quiz::score_answers(&self.answer_key(), answers)
    }
}

/// A catalogue lesson joined with the learner's result for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonOverview {
    pub id: &'static str,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub duration: &'static str,
    pub question_count: usize,
    pub completed: bool,
    pub score: Option<u8>,
}

static CATALOGUE: &[Lesson] = &[
    Lesson {
        id: "lesson-1",
        title: "Basic Greetings",
        description: "Learn essential Spanish greetings for everyday conversations",
        difficulty: Difficulty::Beginner,
        duration: "10 min",
        topics: &["Greetings", "Introductions", "Polite expressions"],
        points: 50,
        questions: &[
            Question {
                id: "q1",
                kind: QuestionKind::MultipleChoice,
                question: "How do you say \"Hello\" in Spanish?",
                options: &["Adiós", "Hola", "Gracias", "Por favor"],
                correct_answer: "Hola",
                explanation: "\"Hola\" is the most common way to say hello in Spanish.",
            },
            Question {
                id: "q2",
                kind: QuestionKind::MultipleChoice,
                question: "What is the correct response to \"¿Cómo estás?\"?",
                options: &["Me llamo Juan", "Muy bien, gracias", "Hasta luego", "De nada"],
                correct_answer: "Muy bien, gracias",
                explanation: "\"¿Cómo estás?\" means \"How are you?\" and \"Muy bien, gracias\" means \"Very well, thank you.\"",
            },
            Question {
                id: "q3",
                kind: QuestionKind::FillBlank,
                question: "Complete the sentence: \"_____ me llamo María\"",
                options: &[],
                correct_answer: "Hola",
                explanation: "\"Hola, me llamo María\" means \"Hello, my name is María\"",
            },
            Question {
                id: "q4",
                kind: QuestionKind::Translation,
                question: "Translate to Spanish: \"Nice to meet you\"",
                options: &[],
                correct_answer: "Mucho gusto",
                explanation: "\"Mucho gusto\" is used when meeting someone for the first time.",
            },
        ],
    },
    Lesson {
        id: "lesson-2",
        title: "Numbers 1-20",
        description: "Master Spanish numbers from one to twenty",
        difficulty: Difficulty::Beginner,
        duration: "15 min",
        topics: &["Numbers", "Counting", "Pronunciation"],
        points: 50,
        questions: &[
            Question {
                id: "q1",
                kind: QuestionKind::MultipleChoice,
                question: "How do you say \"5\" in Spanish?",
                options: &["cuatro", "cinco", "seis", "siete"],
                correct_answer: "cinco",
                explanation: "The number 5 in Spanish is \"cinco\".",
            },
            Question {
                id: "q2",
                kind: QuestionKind::MultipleChoice,
                question: "What number is \"doce\"?",
                options: &["10", "11", "12", "13"],
                correct_answer: "12",
                explanation: "\"Doce\" means twelve in Spanish.",
            },
        ],
    },
    Lesson {
        id: "lesson-3",
        title: "Family Members",
        description: "Learn vocabulary for family relationships",
        difficulty: Difficulty::Beginner,
        duration: "12 min",
        topics: &["Family", "Relationships", "Vocabulary"],
        points: 50,
        questions: &[Question {
            id: "q1",
            kind: QuestionKind::MultipleChoice,
            question: "How do you say \"mother\" in Spanish?",
            options: &["padre", "madre", "hermana", "abuela"],
            correct_answer: "madre",
            explanation: "\"Madre\" means mother in Spanish.",
        }],
    },
];

pub fn catalogue() -> &'static [Lesson] {
    CATALOGUE
}

pub fn find(lesson_id: &str) -> Option<&'static Lesson> {
    CATALOGUE.iter().find(|lesson| lesson.id == lesson_id)
}

/// Every catalogue lesson with the learner's latest result
pub fn overview(state: &AppState) -> Vec<LessonOverview> {
    CATALOGUE
        .iter()
        .map(|lesson| {
            let progress = state.lesson(lesson.id);
            LessonOverview {
                id: lesson.id,
                title: lesson.title,
                difficulty: lesson.difficulty,
                duration: lesson.duration,
                question_count: lesson.questions.len(),
                completed: progress.map(|p| p.completed).unwrap_or(false),
                score: progress.map(|p| p.score),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{reduce, Action};
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_contents() {
        let ids: Vec<_> = catalogue().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["lesson-1", "lesson-2", "lesson-3"]);

        let lesson = find("lesson-1").unwrap();
        assert_eq!(lesson.title, "Basic Greetings");
        assert_eq!(lesson.questions.len(), 4);
        assert_eq!(find("lesson-2").unwrap().questions.len(), 2);
        assert!(find("lesson-99").is_none());
    }

    #[test]
    fn test_questions_are_well_formed() {
        for lesson in catalogue() {
            assert_eq!(lesson.points, quiz::PASS_POINTS, "{}", lesson.id);

            let ids: HashSet<_> = lesson.questions.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), lesson.questions.len(), "{}", lesson.id);

            for question in lesson.questions {
                assert!(!question.correct_answer.is_empty());
                if question.kind == QuestionKind::MultipleChoice {
                    assert!(
                        question.options.contains(&question.correct_answer),
                        "{} {}",
                        lesson.id,
                        question.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_lesson_score_uses_answer_key() {
        let lesson = find("lesson-1").unwrap();

        let all_right = [
            Some("hola"),
            Some("Muy bien, gracias"),
            Some("HOLA"),
            Some("mucho gusto"),
        ];
        assert_eq!(lesson.score(&all_right), 100);

        let half = [Some("Hola"), Some("De nada"), None, Some("Mucho gusto ")];
        assert_eq!(lesson.score(&half), 50);

        assert_eq!(lesson.score(&[]), 0);
    }

    #[test]
    fn test_question_is_correct() {
        let question = &find("lesson-3").unwrap().questions[0];
        assert!(question.is_correct("Madre"));
        assert!(!question.is_correct("padre"));
    }

    #[test]
    fn test_serialized_lesson_hides_answers() {
        let json = serde_json::to_value(find("lesson-2").unwrap()).unwrap();

        assert_eq!(json["difficulty"], "Beginner");
        assert_eq!(json["questions"][0]["type"], "multiple-choice");
        assert_eq!(json["questions"][0]["options"][1], "cinco");
        assert!(json["questions"][0].get("correctAnswer").is_none());
        assert!(json["questions"][0].get("explanation").is_none());
    }

    #[test]
    fn test_overview_joins_progress() {
        let state = reduce(
            AppState::default(),
            Action::SetLessonScore {
                lesson_id: "lesson-2".to_string(),
                score: 50,
            },
        );

        let overview = overview(&state);
        assert_eq!(overview.len(), 3);
        assert_eq!(overview[0].score, None);
        assert!(!overview[0].completed);
        assert_eq!(overview[1].id, "lesson-2");
        assert_eq!(overview[1].score, Some(50));
        assert!(!overview[1].completed);
        assert_eq!(overview[1].question_count, 2);
    }
}
