mod app;
mod catalog;
mod config;
mod event;
mod session;
mod telemetry;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tracing::{info, warn};

use app::{App, Focus};
use catalog::problem::ProblemKind;
use catalog::{Catalog, StaticCatalog, loader};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::category_bar::CategoryBar;
use ui::components::editor_pane::EditorPane;
use ui::components::problem_detail::DetailPane;
use ui::components::problem_list::ProblemList;
use ui::components::quiz_pane::choice_for_key;
use ui::components::solution_dialog::SolutionDialog;
use ui::layout::{AppLayout, LayoutTier, detail_split, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "drillbook",
    version,
    about = "Browse coding exercises and quizzes in the terminal"
)]
struct Cli {
    #[arg(short, long, help = "Category to open on start")]
    category: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory with extra catalog files (*.toml, *.json)")]
    catalog_dir: Option<PathBuf>,

    #[arg(long, help = "Start with slide navigation turned off")]
    no_slides: bool,

    #[arg(long, help = "Print categories and problems, then exit")]
    list: bool,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(telemetry::default_log_path);
    telemetry::init(&log_path);

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(%err, "config unreadable, using defaults");
        Config::default()
    });

    let catalog_dir = cli.catalog_dir.clone().unwrap_or_else(|| config.catalog_dir());
    let catalog = loader::load(Some(&catalog_dir));
    info!(
        categories = catalog.categories().len(),
        problems = catalog.problem_count(),
        dir = %catalog_dir.display(),
        "catalog loaded"
    );

    if cli.list {
        print_catalog(&catalog);
        return Ok(());
    }

    if let Some(category) = cli.category {
        config.default_category = category;
    }
    if cli.no_slides {
        config.slides_enabled = false;
    }
    config.normalize_category(&catalog);

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = Theme::load(theme_name).unwrap_or_else(|| {
        warn!(theme = theme_name, "theme not found, using default");
        Theme::default()
    });

    let mut app = App::new(config, catalog, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    app.save_config();

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn print_catalog(catalog: &StaticCatalog) {
    for category in catalog.categories() {
        let problems = catalog.list_by_category(category);
        println!("{category} ({})", problems.len());
        for problem in problems {
            let kind = if problem.is_quiz() { " (quiz)" } else { "" };
            println!(
                "  {:<6} {} [{}]{kind}",
                problem.id, problem.title, problem.difficulty
            );
        }
    }
    println!();
    println!("themes: {}", Theme::available_themes().join(", "));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only Press events; Release/Repeat would double up on some terminals.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.status = None;

    if app.controller.dialog_open() {
        handle_dialog_key(app, key);
        return;
    }

    match app.focus {
        Focus::List => handle_list_key(app, key),
        Focus::Detail => handle_detail_key(app, key),
        Focus::Editor => app.handle_editor_key(key),
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
            app.controller.close_solution_dialog()
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Char(']') => app.cycle_category(1),
        KeyCode::BackTab | KeyCode::Char('[') => app.cycle_category(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(isize::MAX),
        KeyCode::Enter => app.open_at_cursor(),
        KeyCode::Right | KeyCode::Char('l') => {
            if app.controller.active_problem().is_some() {
                app.focus = Focus::Detail;
            }
        }
        KeyCode::Char('r') => app.open_random(),
        KeyCode::Char('s') => app.toggle_slides(),
        KeyCode::Char('R') => {
            app.controller.reset_score();
            app.status = Some("Quiz score cleared".to_string());
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Digits and free letters answer while a quiz is open.
    if app.active_is_quiz() && !ctrl {
        if let KeyCode::Char(ch) = key.code {
            if let Some(choice) = choice_for_key(ch, app.quiz_choice_count()) {
                app.answer(choice);
                return;
            }
        }
    }

    match key.code {
        KeyCode::Right if ctrl => app.navigate(1),
        KeyCode::Left if ctrl => app.navigate(-1),
        KeyCode::Char('n') => app.navigate(1),
        KeyCode::Char('p') => app.navigate(-1),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Left | KeyCode::Char('h') => {
            app.back_to_list()
        }
        KeyCode::Char('?') => app.toggle_dialog(),
        KeyCode::Char('e') | KeyCode::Char('i') => app.focus_editor(),
        KeyCode::Char('x') => app.reset_editor(),
        KeyCode::Char('s') => app.toggle_slides(),
        KeyCode::Char('r') => app.open_random(),
        KeyCode::Tab => app.cycle_category(1),
        KeyCode::BackTab => app.cycle_category(-1),
        KeyCode::Enter => {
            if app.active_is_quiz() {
                app.answer_at_cursor();
            } else {
                app.focus_editor();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.active_is_quiz() {
                app.move_quiz_cursor(1);
            } else {
                app.scroll_detail(1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.active_is_quiz() {
                app.move_quiz_cursor(-1);
            } else {
                app.scroll_detail(-1);
            }
        }
        KeyCode::PageDown => app.scroll_detail(10),
        KeyCode::PageUp => app.scroll_detail(-10),
        _ => {}
    }
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    if app.controller.dialog_open() {
        return vec!["[Esc] Close"];
    }
    match app.focus {
        Focus::List => vec![
            "[Tab] Category",
            "[j/k] Move",
            "[Enter] Open",
            "[r] Random",
            "[s] Slides",
            "[q] Quit",
        ],
        Focus::Detail if app.active_is_quiz() => vec![
            "[a-z/1-9] Answer",
            "[j/k Enter] Pick",
            "[n/p] Next/Prev",
            "[?] Answer key",
            "[Esc] Back",
        ],
        Focus::Detail => vec![
            "[e] Edit",
            "[x] Reset code",
            "[n/p] Next/Prev",
            "[?] Solution",
            "[j/k] Scroll",
            "[Esc] Back",
        ],
        Focus::Editor => vec![
            "[Esc] Leave editor",
            "[Tab] Indent",
            "[Ctrl-W] Delete word",
            "[Ctrl-U] Delete to line start",
        ],
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let mut footer: Vec<Line> = Vec::new();
    if let Some(status) = &app.status {
        footer.push(Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(colors.warning()),
        )));
    }
    footer.extend(
        pack_hint_lines(&footer_hints(app), area.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted())))),
    );

    let layout = AppLayout::new(area, footer.len() as u16, app.focus == Focus::List);

    let header = CategoryBar::new(
        app.categories(),
        app.controller.selected_category(),
        app.controller.score(),
        &app.theme,
    );
    frame.render_widget(header, layout.header);

    if let Some(sidebar) = layout.sidebar {
        let verdicts = app
            .controller
            .problems()
            .iter()
            .map(|p| app.controller.quiz_verdict(&p.id))
            .collect();
        let list = ProblemList::new(app.controller.problems(), app.list_cursor, &app.theme)
            .active(app.controller.state().selected_problem_id.as_deref())
            .verdicts(verdicts)
            .show_difficulty(app.config.show_difficulty)
            .focused(app.focus == Focus::List);
        frame.render_widget(list, sidebar);
    }

    if layout.main.area() > 0 {
        render_main(frame, app, layout.main, layout.tier);
    }

    frame.render_widget(Paragraph::new(footer), layout.footer);

    if app.controller.dialog_open() {
        if let Some(problem) = app.controller.active_problem() {
            frame.render_widget(SolutionDialog::new(problem, &app.theme), area);
        }
    }
}

fn render_main(frame: &mut ratatui::Frame, app: &App, area: Rect, tier: LayoutTier) {
    let colors = &app.theme.colors;

    let Some(problem) = app.controller.active_problem() else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing to display",
                Style::default()
                    .fg(colors.text_muted())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Pick a problem with [Enter] or press [r] for a random one.",
                Style::default().fg(colors.text_muted()),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
        frame.render_widget(placeholder, area);
        return;
    };

    let slide = app
        .controller
        .slide_index()
        .map(|index| (index, app.controller.problems().len()));
    let detail = DetailPane::new(problem, &app.theme)
        .slide(slide)
        .quiz(app.controller.quiz_selection(), app.quiz_cursor)
        .show_difficulty(app.config.show_difficulty)
        .focused(app.focus == Focus::Detail)
        .scroll(app.detail_scroll);

    match &problem.kind {
        ProblemKind::Normal(_) => {
            let editor = EditorPane::new(&app.editor, app.focus == Focus::Editor, &app.theme);
            if tier.split_detail(area.height) {
                let (text_area, editor_area) = detail_split(area);
                frame.render_widget(detail, text_area);
                frame.render_widget(editor, editor_area);
            } else if app.focus == Focus::Editor {
                frame.render_widget(editor, area);
            } else {
                frame.render_widget(detail, area);
            }
        }
        ProblemKind::Quiz(_) => frame.render_widget(detail, area),
    }
}
