use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::catalog::problem::{Problem, ProblemKind};
use crate::ui::components::quiz_pane::choice_label;
use crate::ui::layout::centered_rect;
use crate::ui::markup;
use crate::ui::theme::Theme;

/// Modal with the reference solution and explanation. Renders centered over
/// whatever `area` it is given.
pub struct SolutionDialog<'a> {
    problem: &'a Problem,
    theme: &'a Theme,
}

impl<'a> SolutionDialog<'a> {
    pub fn new(problem: &'a Problem, theme: &'a Theme) -> Self {
        Self { problem, theme }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let heading = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(colors.text_muted());
        let code = Style::default().fg(colors.code_fg()).bg(colors.code_bg());

        let mut lines = Vec::new();
        match &self.problem.kind {
            ProblemKind::Normal(normal) => {
                lines.push(Line::from(Span::styled("Solution", heading)));
                match &normal.solution {
                    Some(solution) => lines.extend(
                        solution
                            .lines()
                            .map(|l| Line::from(Span::styled(format!(" {l} "), code))),
                    ),
                    None => lines.push(Line::from(Span::styled(
                        " No reference solution for this problem.",
                        muted,
                    ))),
                }
            }
            ProblemKind::Quiz(quiz) => {
                lines.push(Line::from(Span::styled("Answer", heading)));
                match quiz.choices.get(quiz.correct_answer) {
                    Some(choice) if quiz.is_answerable() => lines.push(Line::from(vec![
                        Span::styled(format!(" {}) ", choice_label(quiz.correct_answer)), heading),
                        Span::styled(choice.clone(), Style::default().fg(colors.success())),
                    ])),
                    _ => lines.push(Line::from(Span::styled(
                        " This quiz has no valid answer key.",
                        Style::default().fg(colors.warning()),
                    ))),
                }
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Explanation", heading)));
        match self.problem.explanation() {
            Some(explanation) => lines.extend(markup::render(explanation, self.theme)),
            None => lines.push(Line::from(Span::styled(" No explanation provided.", muted))),
        }
        lines
    }
}

impl Widget for SolutionDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let popup = centered_rect(70, 70, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.problem.title))
            .title_bottom(Line::from(" [Esc] close ").right_aligned())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(self.body())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
