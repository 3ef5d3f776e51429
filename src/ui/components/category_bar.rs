use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::score::QuizScore;
use crate::ui::theme::Theme;

/// Header strip: app badge, one tab per category and the quiz score.
pub struct CategoryBar<'a> {
    categories: Vec<&'a str>,
    selected: &'a str,
    score: QuizScore,
    theme: &'a Theme,
}

impl<'a> CategoryBar<'a> {
    pub fn new(categories: Vec<&'a str>, selected: &'a str, score: QuizScore, theme: &'a Theme) -> Self {
        Self {
            categories,
            selected,
            score,
            theme,
        }
    }
}

impl Widget for CategoryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let base = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let mut spans = vec![Span::styled(
            " drillbook ",
            base.add_modifier(Modifier::BOLD),
        )];
        for category in &self.categories {
            let style = if *category == self.selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                base.fg(colors.text_muted())
            };
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(format!(" {category} "), style));
        }
        if self.categories.is_empty() {
            spans.push(Span::styled(" (no categories) ", base.fg(colors.warning())));
        }

        let tabs = Paragraph::new(Line::from(spans)).style(base);
        tabs.render(Rect { height: 1, ..area }, buf);

        if self.score.answered > 0 && area.height > 1 {
            let text = format!(
                " Quiz score: {}/{} ({:.0}%) ",
                self.score.correct,
                self.score.answered,
                self.score.percent()
            );
            let width = (text.chars().count() as u16).min(area.width);
            let x = area.x + area.width - width;
            buf.set_string(x, area.y + 1, &text, Style::default().fg(colors.text_muted()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_tabs_and_score() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);
        let score = QuizScore {
            correct: 1,
            answered: 2,
        };
        CategoryBar::new(vec!["loops", "strings"], "strings", score, &theme).render(area, &mut buf);

        let tabs = row_text(&buf, 0);
        assert!(tabs.contains(" loops "));
        assert!(tabs.contains(" strings "));
        assert!(row_text(&buf, 1).contains("1/2 (50%)"));

        let x = tabs.find("strings").unwrap() as u16;
        assert_eq!(buf[(x, 0)].bg, theme.colors.accent());
    }
}
