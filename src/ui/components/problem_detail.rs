use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::problem::{NormalProblem, Problem, ProblemKind};
use crate::ui::components::problem_list::difficulty_color;
use crate::ui::components::quiz_pane;
use crate::ui::markup;
use crate::ui::theme::Theme;

/// Problem text for the active problem. Normal problems show description and
/// test cases; quizzes show the question and choices.
pub struct DetailPane<'a> {
    problem: &'a Problem,
    /// `(index, len)` when slide mode is on.
    slide: Option<(usize, usize)>,
    quiz_selection: Option<usize>,
    quiz_cursor: usize,
    show_difficulty: bool,
    focused: bool,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    pub fn new(problem: &'a Problem, theme: &'a Theme) -> Self {
        Self {
            problem,
            slide: None,
            quiz_selection: None,
            quiz_cursor: 0,
            show_difficulty: true,
            focused: false,
            scroll: 0,
            theme,
        }
    }

    pub fn slide(mut self, slide: Option<(usize, usize)>) -> Self {
        self.slide = slide;
        self
    }

    pub fn quiz(mut self, selection: Option<usize>, cursor: usize) -> Self {
        self.quiz_selection = selection;
        self.quiz_cursor = cursor;
        self
    }

    pub fn show_difficulty(mut self, show: bool) -> Self {
        self.show_difficulty = show;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

fn normal_lines(problem: &NormalProblem, theme: &Theme) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let heading = Style::default()
        .fg(colors.accent())
        .add_modifier(Modifier::BOLD);
    let code = Style::default().fg(colors.code_fg()).bg(colors.code_bg());

    let mut lines = markup::render(&problem.description, theme);

    if !problem.test_cases.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Test cases", heading)));
        for case in &problem.test_cases {
            push_labeled(&mut lines, "  in:  ", &case.input, code, theme);
            push_labeled(&mut lines, "  out: ", &case.output, code, theme);
        }
    }

    if let Some(explanation) = &problem.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Explanation", heading)));
        lines.extend(markup::render(explanation, theme));
    }

    lines
}

/// One line per line of `value`, the label on the first and padding after.
fn push_labeled(
    lines: &mut Vec<Line<'static>>,
    label: &'static str,
    value: &str,
    style: Style,
    theme: &Theme,
) {
    let muted = Style::default().fg(theme.colors.text_muted());
    let pad = " ".repeat(label.len());
    let mut rows = value.lines().peekable();
    if rows.peek().is_none() {
        lines.push(Line::from(Span::styled(label, muted)));
        return;
    }
    for (i, row) in rows.enumerate() {
        let label = if i == 0 { label.to_string() } else { pad.clone() };
        lines.push(Line::from(vec![
            Span::styled(label, muted),
            Span::styled(row.to_string(), style),
        ]));
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let problem = self.problem;

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };

        let mut title = vec![Span::styled(
            format!(" {} ", problem.title),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if self.show_difficulty && !problem.difficulty.label().is_empty() {
            title.push(Span::styled(
                format!("{} ", problem.difficulty),
                Style::default().fg(difficulty_color(&problem.difficulty, self.theme)),
            ));
        }

        let mut block = Block::bordered()
            .title(Line::from(title))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        if let Some((index, len)) = self.slide {
            let prev = if index > 0 { "◀" } else { " " };
            let next = if index + 1 < len { "▶" } else { " " };
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {prev} {}/{len} {next} ", index + 1),
                    Style::default().fg(colors.text_muted()),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match &problem.kind {
            ProblemKind::Normal(normal) => normal_lines(normal, self.theme),
            ProblemKind::Quiz(quiz) => {
                quiz_pane::quiz_lines(quiz, self.quiz_selection, self.quiz_cursor, self.theme)
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::problem::TestCase;
    use crate::catalog::test_support::{normal, quiz};

    fn buffer_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn normal_problem_lists_test_cases() {
        let theme = Theme::default();
        let mut problem = normal("1", "recursion", None);
        if let ProblemKind::Normal(n) = &mut problem.kind {
            n.test_cases.push(TestCase {
                input: "fact(3)".to_string(),
                output: "6".to_string(),
            });
        }
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        DetailPane::new(&problem, &theme)
            .slide(Some((0, 3)))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Problem 1"));
        assert!(text.contains("Solve 1"));
        assert!(text.contains("fact(3)"));
        assert!(text.contains("1/3 ▶"));
        assert!(!text.contains("◀"));
    }

    #[test]
    fn normal_problem_shows_explanation() {
        let theme = Theme::default();
        let mut problem = normal("1", "recursion", None);
        if let ProblemKind::Normal(n) = &mut problem.kind {
            n.explanation = Some("Each call shrinks n.".to_string());
        }
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        DetailPane::new(&problem, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Explanation"));
        assert!(text.contains("Each call shrinks n."));
    }

    #[test]
    fn multi_line_test_input_is_split() {
        let theme = Theme::default();
        let mut problem = normal("1", "strings", None);
        if let ProblemKind::Normal(n) = &mut problem.kind {
            n.test_cases.push(TestCase {
                input: "3\nabc".to_string(),
                output: "cba".to_string(),
            });
        }
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        DetailPane::new(&problem, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        let rows: Vec<&str> = text.lines().collect();
        let first = rows.iter().position(|r| r.contains("in:  3")).unwrap();
        assert!(rows[first + 1].contains("       abc"));
        assert!(rows[first + 2].contains("out: cba"));
    }

    #[test]
    fn quiz_problem_renders_choices() {
        let theme = Theme::default();
        let problem = quiz("q", "js", &["yes", "no"], 0);
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        DetailPane::new(&problem, &theme)
            .quiz(Some(0), 0)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Question q?"));
        assert!(text.contains("a) yes"));
        assert!(text.contains("Correct!"));
    }
}
