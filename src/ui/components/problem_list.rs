use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::problem::{Difficulty, Problem};
use crate::ui::theme::Theme;

pub fn difficulty_color(difficulty: &Difficulty, theme: &Theme) -> Color {
    let colors = &theme.colors;
    match difficulty {
        Difficulty::Easy | Difficulty::Basic => colors.success(),
        Difficulty::Medium | Difficulty::Intermediate => colors.warning(),
        Difficulty::Hard | Difficulty::Advanced | Difficulty::Tricky => colors.error(),
        Difficulty::Other(_) => colors.text_muted(),
    }
}

/// Sidebar list of the active category's problems.
pub struct ProblemList<'a> {
    problems: &'a [Problem],
    cursor: usize,
    active_id: Option<&'a str>,
    /// One entry per problem: the quiz verdict this session, if any.
    verdicts: Vec<Option<bool>>,
    show_difficulty: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ProblemList<'a> {
    pub fn new(problems: &'a [Problem], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            problems,
            cursor,
            active_id: None,
            verdicts: Vec::new(),
            show_difficulty: true,
            focused: false,
            theme,
        }
    }

    pub fn active(mut self, id: Option<&'a str>) -> Self {
        self.active_id = id;
        self
    }

    pub fn verdicts(mut self, verdicts: Vec<Option<bool>>) -> Self {
        self.verdicts = verdicts;
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
}

/// First visible row so that `cursor` stays on screen.
fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}

impl Widget for ProblemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(format!(" Problems ({}) ", self.problems.len()))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.problems.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " Nothing here yet.",
                Style::default().fg(colors.text_muted()),
            )))
            .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let offset = scroll_offset(self.cursor, height);

        let lines: Vec<Line> = self
            .problems
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, problem)| {
                let is_cursor = i == self.cursor;
                let is_active = self.active_id == Some(problem.id.as_str());
                let indicator = if is_cursor { ">" } else { " " };

                let mut title_style = Style::default().fg(if is_active {
                    colors.accent()
                } else {
                    colors.fg()
                });
                if is_cursor {
                    title_style = title_style.add_modifier(Modifier::BOLD);
                }

                let marker = match self.verdicts.get(i).copied().flatten() {
                    Some(true) => Span::styled("✓ ", Style::default().fg(colors.success())),
                    Some(false) => Span::styled("✗ ", Style::default().fg(colors.error())),
                    None if problem.is_quiz() => {
                        Span::styled("? ", Style::default().fg(colors.text_muted()))
                    }
                    None => Span::raw("  "),
                };

                let mut spans = vec![
                    Span::styled(format!("{indicator} "), title_style),
                    marker,
                    Span::styled(problem.title.clone(), title_style),
                ];
                if self.show_difficulty && !problem.difficulty.label().is_empty() {
                    spans.push(Span::styled(
                        format!(" [{}]", problem.difficulty),
                        Style::default().fg(difficulty_color(&problem.difficulty, self.theme)),
                    ));
                }

                let line = Line::from(spans);
                if is_cursor && self.focused {
                    line.style(Style::default().bg(colors.selection_bg()))
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{normal, quiz};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn renders_markers_and_cursor() {
        let theme = Theme::default();
        let problems = vec![
            normal("1", "mixed", None),
            quiz("2", "mixed", &["A", "B"], 0),
            quiz("3", "mixed", &["A", "B"], 0),
        ];
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ProblemList::new(&problems, 1, &theme)
            .verdicts(vec![None, Some(true), None])
            .focused(true)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Problems (3)"));
        assert!(row_text(&buf, 2).contains("> ✓"));
        assert!(row_text(&buf, 3).contains("?"));
    }
}
