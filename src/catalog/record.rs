use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;
use crate::catalog::problem::{
    Difficulty, NormalProblem, Problem, ProblemKind, QuizProblem, TestCase,
};

pub const QUIZ_TYPE: &str = "quiz";

/// On-disk shape of one catalog entry. Every variant-specific field is
/// optional here; `Problem::try_from` decides which variant the record is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default, alias = "testCases")]
    pub test_cases: Option<Vec<TestCase>>,

    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    #[serde(default, alias = "correctAnswer")]
    pub correct_answer: Option<usize>,

    #[serde(default)]
    pub explanation: Option<String>,
}

/// A catalog file: `[[problems]]` tables in TOML, or `{"problems": [...]}` in JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub problems: Vec<ProblemRecord>,
}

impl ProblemRecord {
    /// Convert into a `Problem` stored under `category`. The record's own
    /// `category` field, when present, must agree with it.
    pub fn into_problem(mut self, category: &str) -> Result<Problem, CatalogError> {
        match self.category.as_deref() {
            Some(declared) if declared != category => {
                return Err(CatalogError::CategoryMismatch {
                    id: self.id,
                    declared: declared.to_string(),
                    expected: category.to_string(),
                });
            }
            _ => self.category = Some(category.to_string()),
        }
        Problem::try_from(self)
    }
}

impl TryFrom<ProblemRecord> for Problem {
    type Error = CatalogError;

    fn try_from(record: ProblemRecord) -> Result<Self, Self::Error> {
        let category = record.category.unwrap_or_default();

        let kind = match record.kind.as_deref() {
            Some(QUIZ_TYPE) => {
                let (Some(question), Some(choices), Some(correct_answer)) =
                    (record.question, record.choices, record.correct_answer)
                else {
                    return Err(CatalogError::MalformedQuiz { id: record.id });
                };
                ProblemKind::Quiz(QuizProblem {
                    question,
                    choices,
                    correct_answer,
                    explanation: record.explanation,
                })
            }
            Some(other) => {
                return Err(CatalogError::UnknownVariant {
                    id: record.id,
                    tag: Some(other.to_string()),
                });
            }
            None => match record.description {
                Some(description) => ProblemKind::Normal(NormalProblem {
                    description,
                    solution: record.solution,
                    test_cases: record.test_cases.unwrap_or_default(),
                    explanation: record.explanation,
                }),
                None => {
                    return Err(CatalogError::UnknownVariant {
                        id: record.id,
                        tag: None,
                    });
                }
            },
        };

        Ok(Problem {
            id: record.id,
            title: record.title,
            category,
            difficulty: record.difficulty,
            kind,
        })
    }
}
