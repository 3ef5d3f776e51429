use crossterm::event::KeyEvent;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};

use crate::catalog::{Catalog, StaticCatalog};
use crate::config::Config;
use crate::session::{Navigation, SessionController, SessionError};
use crate::ui::code_editor::{CodeEditor, EditorEvent};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Category tabs and the problem list.
    List,
    /// The open problem's text, quiz choices and slide controls.
    Detail,
    /// Keys go to the solution editor.
    Editor,
}

pub struct App {
    pub controller: SessionController<StaticCatalog>,
    pub editor: CodeEditor,
    pub focus: Focus,
    /// Highlighted row in the problem list; independent of the open problem
    /// until Enter is pressed.
    pub list_cursor: usize,
    pub quiz_cursor: usize,
    pub detail_scroll: u16,
    /// One-line message for the footer, cleared on the next key.
    pub status: Option<String>,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    /// `(editor_generation, problem id)` the editor buffer was last loaded for.
    synced: (u64, Option<String>),
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, catalog: StaticCatalog, theme: Theme) -> Self {
        Self::with_rng(config, catalog, theme, SmallRng::from_entropy())
    }

    fn with_rng(config: Config, catalog: StaticCatalog, theme: Theme, rng: SmallRng) -> Self {
        let mut controller =
            SessionController::new(catalog).with_slides(config.slides_enabled);
        if !config.default_category.is_empty() {
            if let Err(err) = controller.select_category(&config.default_category) {
                warn!(%err, "configured category not available");
            }
        }

        let mut app = Self {
            controller,
            editor: CodeEditor::default(),
            focus: Focus::List,
            list_cursor: 0,
            quiz_cursor: 0,
            detail_scroll: 0,
            status: None,
            theme,
            config,
            should_quit: false,
            synced: (0, None),
            rng,
        };
        app.sync_editor();
        app
    }

    pub fn categories(&self) -> Vec<&str> {
        self.controller.catalog().categories()
    }

    /// Reload the editor buffer when the controller loaded new content, i.e.
    /// the generation moved or a different problem is open.
    fn sync_editor(&mut self) {
        let key = (
            self.controller.editor_generation(),
            self.controller.state().selected_problem_id.clone(),
        );
        if key != self.synced {
            self.editor.set_value(self.controller.editor_content());
            self.synced = key;
        }
    }

    fn report(&mut self, err: SessionError) {
        debug!(%err, "operation rejected");
        self.status = Some(err.to_string());
    }

    pub fn cycle_category(&mut self, delta: isize) {
        let categories = self.categories();
        if categories.is_empty() {
            return;
        }
        let len = categories.len() as isize;
        let current = categories
            .iter()
            .position(|c| *c == self.controller.selected_category())
            .unwrap_or(0) as isize;
        let next = categories[(current + delta).rem_euclid(len) as usize].to_string();

        match self.controller.select_category(&next) {
            Ok(()) => {
                self.list_cursor = 0;
                self.quiz_cursor = 0;
                self.detail_scroll = 0;
                self.focus = Focus::List;
                self.config.default_category = next;
            }
            Err(err) => self.report(err),
        }
        self.sync_editor();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.controller.problems().len();
        if len == 0 {
            return;
        }
        self.list_cursor = self
            .list_cursor
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    pub fn open_at_cursor(&mut self) {
        let id = self
            .controller
            .problems()
            .get(self.list_cursor)
            .map(|p| p.id.clone());
        match id {
            Some(id) => self.open(&id),
            None => self.status = Some("Nothing to display in this category".to_string()),
        }
    }

    pub fn open(&mut self, id: &str) {
        let opened = self.controller.select_problem(id).map(|_| ());
        match opened {
            Ok(()) => {
                self.focus = Focus::Detail;
                self.quiz_cursor = 0;
                self.detail_scroll = 0;
                if let Some(position) = self
                    .controller
                    .catalog()
                    .position_of(self.controller.selected_category(), id)
                {
                    self.list_cursor = position;
                }
            }
            Err(err) => {
                self.focus = Focus::List;
                self.report(err);
            }
        }
        self.sync_editor();
    }

    /// Open a random problem of the active category, avoiding the one already
    /// open when there is a choice.
    pub fn open_random(&mut self) {
        let len = self.controller.problems().len();
        if len == 0 {
            self.status = Some("Nothing to display in this category".to_string());
            return;
        }
        let current = self
            .controller
            .state()
            .selected_problem_id
            .as_deref()
            .and_then(|id| {
                self.controller
                    .catalog()
                    .position_of(self.controller.selected_category(), id)
            });
        let mut pick = self.rng.gen_range(0..len);
        if len > 1 && Some(pick) == current {
            pick = (pick + 1) % len;
        }
        self.list_cursor = pick;
        self.open_at_cursor();
    }

    pub fn back_to_list(&mut self) {
        self.controller.close_solution_dialog();
        self.focus = Focus::List;
    }

    pub fn navigate(&mut self, delta: isize) {
        match self.controller.navigate_slide(delta) {
            Navigation::Moved(index) => {
                self.list_cursor = index;
                self.quiz_cursor = 0;
                self.detail_scroll = 0;
                if self.focus == Focus::Editor && self.active_is_quiz() {
                    self.focus = Focus::Detail;
                }
            }
            Navigation::Stayed => {}
            Navigation::Unavailable => {
                if !self.controller.slides_enabled() {
                    self.status = Some("Slide mode is off ([s] to turn it on)".to_string());
                }
            }
        }
        self.sync_editor();
    }

    pub fn toggle_slides(&mut self) {
        let enabled = !self.controller.slides_enabled();
        self.controller.set_slides_enabled(enabled);
        self.config.slides_enabled = enabled;
        self.status = Some(format!(
            "Slide mode {}",
            if enabled { "on" } else { "off" }
        ));
    }

    pub fn toggle_dialog(&mut self) {
        if self.controller.dialog_open() {
            self.controller.close_solution_dialog();
        } else if let Err(err) = self.controller.open_solution_dialog() {
            self.report(err);
        }
    }

    pub fn answer(&mut self, choice: usize) {
        match self.controller.select_quiz_choice(choice) {
            Ok(_) => self.quiz_cursor = choice,
            Err(err) => self.report(err),
        }
    }

    pub fn answer_at_cursor(&mut self) {
        self.answer(self.quiz_cursor);
    }

    pub fn move_quiz_cursor(&mut self, delta: isize) {
        let len = self.quiz_choice_count();
        if len == 0 {
            return;
        }
        self.quiz_cursor = self.quiz_cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn quiz_choice_count(&self) -> usize {
        self.controller
            .active_problem()
            .and_then(|p| p.as_quiz())
            .map_or(0, |q| q.choices.len())
    }

    pub fn active_is_quiz(&self) -> bool {
        self.controller.active_problem().is_some_and(|p| p.is_quiz())
    }

    pub fn scroll_detail(&mut self, delta: i16) {
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
    }

    pub fn focus_editor(&mut self) {
        let is_quiz = self.controller.active_problem().map(|p| p.is_quiz());
        match is_quiz {
            Some(false) => self.focus = Focus::Editor,
            Some(true) => {
                self.status = Some("Quizzes are answered with the choice keys".to_string())
            }
            None => self.report(SessionError::NoProblemSelected),
        }
    }

    /// Put the open problem's starting content back into the editor.
    pub fn reset_editor(&mut self) {
        let Some(id) = self.controller.state().selected_problem_id.clone() else {
            return;
        };
        self.open(&id);
        self.status = Some("Editor reset".to_string());
    }

    pub fn handle_editor_key(&mut self, key: KeyEvent) {
        let event = self.editor.handle(key);
        self.controller.on_editor_change(event.change());
        if event == EditorEvent::Leave {
            self.focus = Focus::Detail;
        }
    }

    pub fn paste(&mut self, text: &str) {
        if self.focus != Focus::Editor {
            return;
        }
        self.editor.insert_str(text);
        let value = self.editor.value();
        self.controller.on_editor_change(Some(&value));
    }

    /// Editor text differs from what the problem started with.
    pub fn editor_dirty(&self) -> bool {
        self.controller
            .active_problem()
            .is_some_and(|p| p.initial_editor_content() != self.controller.editor_content())
    }

    pub fn save_config(&mut self) {
        self.config.default_category = self.controller.selected_category().to_string();
        self.config.slides_enabled = self.controller.slides_enabled();
        if let Err(err) = self.config.save() {
            warn!(%err, "failed to save config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{normal, quiz};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        let catalog = StaticCatalog::from_lists([
            (
                "recursion",
                vec![
                    normal("1", "recursion", Some("fn one() {}")),
                    normal("2", "recursion", None),
                    quiz("3", "recursion", &["A", "B"], 1),
                ],
            ),
            ("strings", vec![normal("s1", "strings", Some("fn s1() {}"))]),
        ]);
        App::with_rng(
            Config::default(),
            catalog,
            Theme::default(),
            SmallRng::seed_from_u64(7),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opening_loads_editor() {
        let mut app = app();
        app.move_cursor(5);
        assert_eq!(app.list_cursor, 2);
        app.move_cursor(-2);
        app.open_at_cursor();
        assert_eq!(app.focus, Focus::Detail);
        assert_eq!(app.editor.value(), "fn one() {}");
    }

    #[test]
    fn typing_flows_into_controller() {
        let mut app = app();
        app.open("1");
        app.focus_editor();
        assert_eq!(app.focus, Focus::Editor);

        app.handle_editor_key(key(KeyCode::Char('x')));
        assert_eq!(app.controller.editor_content(), "xfn one() {}");
        assert!(app.editor_dirty());

        app.handle_editor_key(key(KeyCode::Left));
        assert_eq!(app.controller.editor_content(), "xfn one() {}");

        app.handle_editor_key(key(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Detail);
    }

    #[test]
    fn reset_restores_initial_content() {
        let mut app = app();
        app.open("1");
        app.focus_editor();
        app.paste("// note\n");
        assert!(app.controller.editor_content().starts_with("// note\n"));

        app.reset_editor();
        assert_eq!(app.editor.value(), "fn one() {}");
        assert!(!app.editor_dirty());
    }

    #[test]
    fn navigation_moves_list_cursor_and_editor() {
        let mut app = app();
        app.open("1");
        app.navigate(1);
        assert_eq!(app.list_cursor, 1);
        assert_eq!(app.editor.value(), "");
        app.navigate(1);
        assert!(app.active_is_quiz());
        app.navigate(1);
        assert_eq!(app.list_cursor, 2);
    }

    #[test]
    fn quiz_answer_and_rejections_reach_status() {
        let mut app = app();
        app.open("3");
        app.answer(1);
        assert!(app.controller.is_correct());
        assert!(app.status.is_none());

        app.answer(5);
        assert!(app.status.is_some());
        assert_eq!(app.controller.quiz_selection(), Some(1));

        app.focus_editor();
        assert_eq!(app.focus, Focus::Detail);
    }

    #[test]
    fn category_cycle_wraps_and_resets() {
        let mut app = app();
        app.open("2");
        app.cycle_category(1);
        assert_eq!(app.controller.selected_category(), "strings");
        assert_eq!(app.focus, Focus::List);
        assert!(app.controller.active_problem().is_none());
        app.cycle_category(1);
        assert_eq!(app.controller.selected_category(), "recursion");
        app.cycle_category(-1);
        assert_eq!(app.controller.selected_category(), "strings");
    }

    #[test]
    fn random_pick_opens_a_different_problem() {
        let mut app = app();
        app.open("1");
        for _ in 0..10 {
            let before = app.controller.state().selected_problem_id.clone();
            app.open_random();
            assert!(app.controller.active_problem().is_some());
            assert_ne!(app.controller.state().selected_problem_id, before);
        }
    }

    #[test]
    fn slides_toggle_updates_config() {
        let mut app = app();
        app.open("1");
        app.toggle_slides();
        assert!(!app.config.slides_enabled);
        app.navigate(1);
        assert_eq!(app.controller.active_problem().map(|p| p.id.as_str()), Some("1"));
        assert!(app.status.is_some());
    }

    #[test]
    fn dialog_requires_selection() {
        let mut app = app();
        app.toggle_dialog();
        assert!(!app.controller.dialog_open());
        assert!(app.status.is_some());

        app.open("1");
        app.toggle_dialog();
        assert!(app.controller.dialog_open());
        app.back_to_list();
        assert!(!app.controller.dialog_open());
    }
}
