/// Answer state for the active quiz problem.
///
/// `Answered` still accepts new choices; only selecting a different problem
/// brings the machine back to `Unanswered`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    Unanswered,
    Answered { selection: usize },
}

impl QuizState {
    pub fn selection(self) -> Option<usize> {
        match self {
            QuizState::Unanswered => None,
            QuizState::Answered { selection } => Some(selection),
        }
    }

    pub fn is_answered(self) -> bool {
        matches!(self, QuizState::Answered { .. })
    }

    pub fn answer(&mut self, selection: usize) {
        *self = QuizState::Answered { selection };
    }

    pub fn reset(&mut self) {
        *self = QuizState::Unanswered;
    }
}

/// Transient per-session browsing state. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub selected_category: String,
    pub selected_problem_id: Option<String>,
    pub editor_content: String,
    /// Bumped whenever `editor_content` is reset by a selection, so an editor
    /// widget knows to reload its buffer. User edits leave it alone.
    pub editor_generation: u64,
    pub dialog_open: bool,
    pub slide_index: Option<usize>,
    pub quiz: QuizState,
}

impl SessionState {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            selected_category: category.into(),
            ..Self::default()
        }
    }

    /// Clear everything that hangs off the active problem.
    pub(crate) fn clear_selection(&mut self) {
        self.selected_problem_id = None;
        self.slide_index = None;
        self.dialog_open = false;
        self.quiz.reset();
    }

    pub(crate) fn load_editor(&mut self, content: &str) {
        self.editor_content.clear();
        self.editor_content.push_str(content);
        self.editor_generation = self.editor_generation.wrapping_add(1);
    }
}
