use tracing::debug;

use crate::catalog::Catalog;
use crate::catalog::problem::Problem;
use crate::session::SessionError;
use crate::session::score::{QuizScore, QuizTally};
use crate::session::state::SessionState;

/// Outcome of a slide move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Moved(usize),
    /// The target is outside the list (or `delta == 0`); nothing changed.
    Stayed,
    /// Slide mode is off or no problem is selected.
    Unavailable,
}

/// Owns what the user is looking at and what they have done with it.
///
/// All transitions are synchronous and leave the state consistent before
/// returning. The catalog is only ever read.
pub struct SessionController<C> {
    catalog: C,
    state: SessionState,
    slides_enabled: bool,
    tally: QuizTally,
}

impl<C: Catalog> SessionController<C> {
    /// Start a session on the catalog's first category.
    pub fn new(catalog: C) -> Self {
        let first = catalog
            .categories()
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
        Self {
            catalog,
            state: SessionState::new(first),
            slides_enabled: true,
            tally: QuizTally::default(),
        }
    }

    pub fn with_slides(mut self, enabled: bool) -> Self {
        self.slides_enabled = enabled;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_category(&self) -> &str {
        &self.state.selected_category
    }

    /// Problems of the active category, in catalog order.
    pub fn problems(&self) -> &[Problem] {
        self.catalog.list_by_category(&self.state.selected_category)
    }

    pub fn select_category(&mut self, category: &str) -> Result<(), SessionError> {
        if !self.catalog.contains_category(category) {
            return Err(SessionError::UnknownCategory(category.to_string()));
        }
        debug!(%category, "category selected");
        self.state.selected_category = category.to_string();
        self.state.clear_selection();
        Ok(())
    }

    /// Open `problem_id` from the active category. An unknown id leaves nothing
    /// selected and the editor content as it was.
    pub fn select_problem(&mut self, problem_id: &str) -> Result<&Problem, SessionError> {
        let not_found = SessionError::UnknownProblem {
            category: self.state.selected_category.clone(),
            id: problem_id.to_string(),
        };
        let position = self
            .catalog
            .position_of(&self.state.selected_category, problem_id);
        match position {
            Some(position) => self.activate(position).ok_or(not_found),
            None => {
                self.state.clear_selection();
                Err(not_found)
            }
        }
    }

    fn activate(&mut self, position: usize) -> Option<&Problem> {
        let problem = self
            .catalog
            .list_by_category(&self.state.selected_category)
            .get(position)?;

        let initial = problem.initial_editor_content();
        if self.state.editor_content != initial {
            self.state.load_editor(initial);
        }
        if self.state.selected_problem_id.as_deref() != Some(problem.id.as_str()) {
            self.state.selected_problem_id = Some(problem.id.clone());
            self.state.dialog_open = false;
        }
        self.state.quiz.reset();
        self.state.slide_index = self.slides_enabled.then_some(position);
        debug!(id = %problem.id, position, "problem selected");
        Some(problem)
    }

    /// Move `delta` places through the active list. A target past either end
    /// is a no-op; there is no wraparound.
    pub fn navigate_slide(&mut self, delta: isize) -> Navigation {
        if !self.slides_enabled {
            return Navigation::Unavailable;
        }
        let Some(current) = self.state.slide_index else {
            return Navigation::Unavailable;
        };
        let len = self.problems().len();
        if len == 0 {
            return Navigation::Unavailable;
        }

        let target = match current.checked_add_signed(delta) {
            Some(target) if target < len && target != current => target,
            _ => return Navigation::Stayed,
        };
        match self.activate(target) {
            Some(_) => Navigation::Moved(target),
            None => Navigation::Unavailable,
        }
    }

    /// Editor widget callback. `None` is a widget-internal event and must not
    /// touch the content.
    pub fn on_editor_change(&mut self, new_content: Option<&str>) {
        if let Some(content) = new_content {
            content.clone_into(&mut self.state.editor_content);
        }
    }

    pub fn open_solution_dialog(&mut self) -> Result<(), SessionError> {
        if self.active_problem().is_none() {
            return Err(SessionError::NoProblemSelected);
        }
        self.state.dialog_open = true;
        Ok(())
    }

    pub fn close_solution_dialog(&mut self) {
        self.state.dialog_open = false;
    }

    /// Record a quiz answer. Re-answering overwrites the previous choice.
    /// Returns whether the new choice is correct.
    pub fn select_quiz_choice(&mut self, choice_index: usize) -> Result<bool, SessionError> {
        let problem = self
            .active_problem()
            .ok_or(SessionError::NoProblemSelected)?;
        let quiz = problem
            .as_quiz()
            .ok_or_else(|| SessionError::NotAQuiz(problem.id.clone()))?;
        if !quiz.is_answerable() {
            return Err(SessionError::Unanswerable(problem.id.clone()));
        }
        if choice_index >= quiz.choices.len() {
            return Err(SessionError::ChoiceOutOfRange {
                id: problem.id.clone(),
                choice: choice_index,
                len: quiz.choices.len(),
            });
        }

        let correct = quiz.is_correct_choice(choice_index);
        let (category, id) = (problem.category.clone(), problem.id.clone());
        self.state.quiz.answer(choice_index);
        self.tally.record(&category, &id, correct);
        debug!(%id, choice_index, correct, "quiz answered");
        Ok(correct)
    }

    /// Derived from the current selection on every call.
    pub fn is_correct(&self) -> bool {
        match (self.active_problem().and_then(Problem::as_quiz), self.state.quiz.selection()) {
            (Some(quiz), Some(selection)) => quiz.is_correct_choice(selection),
            _ => false,
        }
    }

    pub fn active_problem(&self) -> Option<&Problem> {
        let id = self.state.selected_problem_id.as_deref()?;
        self.catalog.find_by_id(&self.state.selected_category, id)
    }

    pub fn editor_content(&self) -> &str {
        &self.state.editor_content
    }

    pub fn editor_generation(&self) -> u64 {
        self.state.editor_generation
    }

    pub fn dialog_open(&self) -> bool {
        self.state.dialog_open
    }

    pub fn slide_index(&self) -> Option<usize> {
        self.state.slide_index
    }

    pub fn can_go_previous(&self) -> bool {
        self.slides_enabled && self.state.slide_index.is_some_and(|i| i > 0)
    }

    pub fn can_go_next(&self) -> bool {
        let len = self.problems().len();
        self.slides_enabled && self.state.slide_index.is_some_and(|i| i + 1 < len)
    }

    pub fn quiz_selection(&self) -> Option<usize> {
        self.state.quiz.selection()
    }

    pub fn quiz_answered(&self) -> bool {
        self.state.quiz.is_answered()
    }

    pub fn slides_enabled(&self) -> bool {
        self.slides_enabled
    }

    pub fn set_slides_enabled(&mut self, enabled: bool) {
        self.slides_enabled = enabled;
        self.state.slide_index = if enabled {
            self.state
                .selected_problem_id
                .as_deref()
                .and_then(|id| self.catalog.position_of(&self.state.selected_category, id))
        } else {
            None
        };
    }

    pub fn score(&self) -> QuizScore {
        self.tally.score()
    }

    /// Latest verdict for a quiz in the active category, if it was answered
    /// this session.
    pub fn quiz_verdict(&self, problem_id: &str) -> Option<bool> {
        self.tally.verdict(&self.state.selected_category, problem_id)
    }

    pub fn reset_score(&mut self) {
        self.tally.clear();
    }
}
