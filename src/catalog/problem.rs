use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty label as written in the catalog.
///
/// Catalog sources use two vocabularies (Easy/Medium/Hard and
/// Basic/Intermediate/Advanced/Tricky). Both are accepted as-is; nothing in the
/// session logic orders or compares them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Basic,
    Intermediate,
    Advanced,
    Tricky,
    Other(String),
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Basic => "Basic",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Tricky => "Tricky",
            Difficulty::Other(s) => s,
        }
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            "basic" => Difficulty::Basic,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            "tricky" => Difficulty::Tricky,
            _ => Difficulty::Other(raw),
        }
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.label().to_string()
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Other(String::new())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalProblem {
    pub description: String,
    pub solution: Option<String>,
    pub test_cases: Vec<TestCase>,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizProblem {
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: usize,
    pub explanation: Option<String>,
}

impl QuizProblem {
    /// A quiz can be answered only when it has choices and its answer index
    /// points at one of them.
    pub fn is_answerable(&self) -> bool {
        self.correct_answer < self.choices.len()
    }

    pub fn is_correct_choice(&self, choice: usize) -> bool {
        self.is_answerable() && choice == self.correct_answer
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    Normal(NormalProblem),
    Quiz(QuizProblem),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub kind: ProblemKind,
}

impl Problem {
    pub fn is_quiz(&self) -> bool {
        matches!(self.kind, ProblemKind::Quiz(_))
    }

    pub fn as_quiz(&self) -> Option<&QuizProblem> {
        match &self.kind {
            ProblemKind::Quiz(q) => Some(q),
            ProblemKind::Normal(_) => None,
        }
    }

    pub fn as_normal(&self) -> Option<&NormalProblem> {
        match &self.kind {
            ProblemKind::Normal(n) => Some(n),
            ProblemKind::Quiz(_) => None,
        }
    }

    /// Content the editor starts with when this problem is opened.
    pub fn initial_editor_content(&self) -> &str {
        match &self.kind {
            ProblemKind::Normal(n) => n.solution.as_deref().unwrap_or(""),
            ProblemKind::Quiz(_) => "",
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match &self.kind {
            ProblemKind::Normal(n) => n.explanation.as_deref(),
            ProblemKind::Quiz(q) => q.explanation.as_deref(),
        }
    }
}
