use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::catalog::problem::QuizProblem;
use crate::ui::markup;
use crate::ui::theme::Theme;

/// Label shown next to choice `index`: `a`..`z`, then 1-based numbers.
pub fn choice_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'a' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Letters the detail screen keeps for movement and navigation while a quiz
/// is open; a choice labelled with one of these is picked by digit or cursor.
pub const QUIZ_BOUND_KEYS: &str = "hjknpqrs";

/// Choice index for a pressed key: `1`-`9` or a free letter, within `len`.
pub fn choice_for_key(ch: char, len: usize) -> Option<usize> {
    let index = match ch {
        '1'..='9' => ch as usize - '1' as usize,
        'a'..='z' if !QUIZ_BOUND_KEYS.contains(ch) => ch as usize - 'a' as usize,
        _ => return None,
    };
    (index < len).then_some(index)
}

/// Lines for a quiz: question, lettered choices, then feedback and the
/// explanation once a choice is selected.
pub fn quiz_lines(
    quiz: &QuizProblem,
    selection: Option<usize>,
    cursor: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let mut lines = markup::render(&quiz.question, theme);
    lines.push(Line::from(""));

    if !quiz.is_answerable() {
        lines.push(Line::from(Span::styled(
            " This quiz has no valid answer key and cannot be answered.",
            Style::default().fg(colors.warning()),
        )));
    }

    for (i, choice) in quiz.choices.iter().enumerate() {
        let is_cursor = i == cursor;
        let is_selected = selection == Some(i);
        let is_answer = i == quiz.correct_answer;

        let (mark, style) = match selection {
            Some(_) if is_answer => ("✓", Style::default().fg(colors.success())),
            Some(_) if is_selected => ("✗", Style::default().fg(colors.error())),
            _ => (" ", Style::default().fg(colors.fg())),
        };
        let style = if is_cursor {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };
        let pointer = if is_cursor { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {pointer} {mark} "), style),
            Span::styled(
                format!("{}) ", choice_label(i)),
                Style::default().fg(colors.accent()),
            ),
            Span::styled(choice.clone(), style),
        ]));
    }

    if let Some(selected) = selection {
        lines.push(Line::from(""));
        if quiz.is_correct_choice(selected) {
            lines.push(Line::from(Span::styled(
                " Correct!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    " Not quite. The answer is {}.",
                    choice_label(quiz.correct_answer)
                ),
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(explanation) = &quiz.explanation {
            lines.push(Line::from(""));
            lines.extend(markup::render(explanation, theme));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> QuizProblem {
        QuizProblem {
            question: "What is `typeof null`?".to_string(),
            choices: vec!["\"null\"".to_string(), "\"object\"".to_string()],
            correct_answer: 1,
            explanation: Some("A historical quirk.".to_string()),
        }
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn unanswered_hides_feedback() {
        let lines = text(&quiz_lines(&quiz(), None, 0, &Theme::default()));
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with(" > "));
        assert!(!lines.iter().any(|l| l.contains("Correct") || l.contains("quirk")));
    }

    #[test]
    fn wrong_answer_marks_both_choices() {
        let lines = text(&quiz_lines(&quiz(), Some(0), 0, &Theme::default()));
        assert!(lines[2].contains("✗"));
        assert!(lines[3].contains("✓"));
        assert!(lines.iter().any(|l| l.contains("The answer is b")));
        assert!(lines.iter().any(|l| l.contains("historical quirk")));
    }

    #[test]
    fn keys_map_to_choices() {
        assert_eq!(choice_for_key('1', 3), Some(0));
        assert_eq!(choice_for_key('c', 3), Some(2));
        assert_eq!(choice_for_key('d', 3), None);
        assert_eq!(choice_for_key('0', 3), None);
        assert_eq!(choice_label(1), "b");
        assert_eq!(choice_label(26), "27");
    }

    #[test]
    fn long_quiz_leaves_navigation_letters_alone() {
        let len = 12;
        for ch in QUIZ_BOUND_KEYS.chars() {
            assert_eq!(choice_for_key(ch, len), None, "{ch} answered");
        }
        assert_eq!(choice_for_key('g', len), Some(6));
        assert_eq!(choice_for_key('i', len), Some(8));
        assert_eq!(choice_for_key('8', len), Some(7));
    }

    #[test]
    fn unanswerable_quiz_shows_notice() {
        let mut broken = quiz();
        broken.correct_answer = 9;
        let lines = text(&quiz_lines(&broken, None, 0, &Theme::default()));
        assert!(lines.iter().any(|l| l.contains("cannot be answered")));
    }
}
