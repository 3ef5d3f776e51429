use std::fs;
use std::path::Path;

use drillbook::catalog::problem::{Problem, ProblemKind};
use drillbook::catalog::{Catalog, StaticCatalog, loader};
use drillbook::session::{Navigation, SessionController, SessionError};

const RECURSION: &str = r#"
[[problems]]
id = "1"
title = "Factorial"
difficulty = "Easy"
description = "Return n!"
solution = "fn fact(n: u64) -> u64 { if n == 0 { 1 } else { n * fact(n - 1) } }"

[[problems]]
id = "2"
title = "Fibonacci"
difficulty = "Medium"
description = "Return the n-th Fibonacci number."

[[problems]]
id = "3"
title = "Base case"
difficulty = "Basic"
type = "quiz"
question = "Which call stops the recursion?"
choices = ["A", "B", "C"]
correct_answer = 1
"#;

const STRINGS: &str = r#"
[[problems]]
id = "s1"
title = "Reverse"
difficulty = "Easy"
description = "Reverse a string."
solution = "fn rev(s: &str) -> String { s.chars().rev().collect() }"
"#;

fn parse(category: &str, toml: &str) -> Vec<Problem> {
    loader::parse_category(category, toml, Path::new(&format!("{category}.toml")))
        .expect("fixture parses")
}

fn catalog() -> StaticCatalog {
    StaticCatalog::from_lists([
        ("recursion", parse("recursion", RECURSION)),
        ("strings", parse("strings", STRINGS)),
    ])
}

fn ids(problems: &[Problem]) -> Vec<&str> {
    problems.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn category_listing_only_contains_that_category() {
    let mut session = SessionController::new(catalog());
    for category in ["recursion", "strings"] {
        session.select_category(category).unwrap();
        assert!(session.problems().iter().all(|p| p.category == category));
    }

    session.select_category("recursion").unwrap();
    assert_eq!(ids(session.problems()), vec!["1", "2", "3"]);
}

#[test]
fn editor_content_on_selection() {
    let mut session = SessionController::new(catalog());
    session.select_problem("1").unwrap();
    assert!(session.editor_content().starts_with("fn fact"));

    session.select_problem("2").unwrap();
    assert_eq!(session.editor_content(), "");

    session.select_problem("3").unwrap();
    assert_eq!(session.editor_content(), "");
}

#[test]
fn quiz_answer_can_change() {
    let mut session = SessionController::new(catalog());
    let problem = session.select_problem("3").unwrap();
    assert!(matches!(problem.kind, ProblemKind::Quiz(_)));

    assert_eq!(session.select_quiz_choice(1), Ok(true));
    assert!(session.is_correct());
    assert_eq!(session.select_quiz_choice(0), Ok(false));
    assert!(session.quiz_answered());
    assert!(!session.is_correct());
}

#[test]
fn slide_walk_through_category() {
    let mut session = SessionController::new(catalog());
    session.select_problem("1").unwrap();
    session.on_editor_change(Some("scratch work"));

    assert_eq!(session.navigate_slide(1), Navigation::Moved(1));
    assert_eq!(session.navigate_slide(1), Navigation::Moved(2));
    assert_eq!(session.navigate_slide(1), Navigation::Stayed);
    assert_eq!(session.slide_index(), Some(2));

    session.select_quiz_choice(2).unwrap();
    assert_eq!(session.navigate_slide(-1), Navigation::Moved(1));
    assert!(!session.quiz_answered());
    assert_eq!(session.quiz_selection(), None);
}

#[test]
fn missing_problem_clears_selection_keeps_editor() {
    let mut session = SessionController::new(catalog());
    session.select_problem("1").unwrap();
    session.on_editor_change(Some("half done"));

    let err = session.select_problem("does-not-exist").unwrap_err();
    assert_eq!(
        err,
        SessionError::UnknownProblem {
            category: "recursion".to_string(),
            id: "does-not-exist".to_string(),
        }
    );
    assert!(session.active_problem().is_none());
    assert_eq!(session.editor_content(), "half done");
}

#[test]
fn controller_works_over_shared_catalog() {
    let shared = std::rc::Rc::new(catalog());
    let mut a = SessionController::new(shared.clone());
    let mut b = SessionController::new(shared);
    a.select_problem("1").unwrap();
    b.select_category("strings").unwrap();
    b.select_problem("s1").unwrap();
    assert_eq!(a.active_problem().unwrap().title, "Factorial");
    assert_eq!(b.active_problem().unwrap().title, "Reverse");
}

#[test]
fn malformed_quiz_is_skipped_but_file_loads() {
    let toml = r#"
[[problems]]
id = "bad"
title = "No choices"
type = "quiz"
question = "?"

[[problems]]
id = "good"
title = "Fine"
description = "Still here."
"#;
    let problems = parse("mixed", toml);
    assert_eq!(ids(&problems), vec!["good"]);
}

#[test]
fn user_directory_overrides_bundled_category() {
    let bundled = loader::load_bundled();
    let existing = bundled.categories()[0].to_string();

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(format!("{existing}.toml")),
        r#"
[[problems]]
id = "mine"
title = "My own"
description = "Only this one."
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("graphs.json"),
        r#"{"problems": [{"id": "g1", "title": "BFS", "description": "Walk it."}]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = loader::load(Some(dir.path()));
    assert_eq!(ids(catalog.list_by_category(&existing)), vec!["mine"]);
    assert_eq!(ids(catalog.list_by_category("graphs")), vec!["g1"]);
    assert_eq!(catalog.categories().last().copied(), Some("graphs"));
    assert!(catalog.find_by_id("graphs", "g1").is_some());
}

#[test]
fn bundled_catalog_is_browsable() {
    let catalog = loader::load_bundled();
    let categories: Vec<String> = catalog.categories().iter().map(|c| c.to_string()).collect();
    let mut session = SessionController::new(catalog);

    for category in &categories {
        session.select_category(category).unwrap();
        let first = session.problems()[0].id.clone();
        session.select_problem(&first).unwrap();
        while let Navigation::Moved(_) = session.navigate_slide(1) {}
        assert!(!session.can_go_next());
    }
}
