use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub answered: usize,
}

impl QuizScore {
    pub fn percent(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f64 / self.answered as f64 * 100.0
    }
}

/// Latest verdict per quiz problem answered this session, keyed by
/// `(category, id)`.
#[derive(Clone, Debug, Default)]
pub struct QuizTally {
    verdicts: HashMap<(String, String), bool>,
}

impl QuizTally {
    pub fn record(&mut self, category: &str, id: &str, correct: bool) {
        self.verdicts
            .insert((category.to_string(), id.to_string()), correct);
    }

    pub fn verdict(&self, category: &str, id: &str) -> Option<bool> {
        self.verdicts
            .get(&(category.to_string(), id.to_string()))
            .copied()
    }

    pub fn score(&self) -> QuizScore {
        QuizScore {
            correct: self.verdicts.values().filter(|&&ok| ok).count(),
            answered: self.verdicts.len(),
        }
    }

    pub fn clear(&mut self) {
        self.verdicts.clear();
    }
}
