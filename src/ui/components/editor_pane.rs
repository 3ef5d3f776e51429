use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::code_editor::CodeEditor;
use crate::ui::theme::Theme;

/// The solution editor with a line-number gutter. The cursor is only drawn
/// while the editor has focus.
pub struct EditorPane<'a> {
    editor: &'a CodeEditor,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EditorPane<'a> {
    pub fn new(editor: &'a CodeEditor, focused: bool, theme: &'a Theme) -> Self {
        Self {
            editor,
            focused,
            theme,
        }
    }
}

/// First visible line so that the cursor row stays on screen.
fn first_visible(cursor_row: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor_row.saturating_sub(height - 1)
    }
}

/// First visible column so that the cursor column stays on screen.
fn first_visible_col(cursor_col: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else {
        cursor_col.saturating_sub(width - 1)
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let (title, border) = if self.focused {
            (" Your solution [Esc] leave ", colors.border_focused())
        } else {
            (" Your solution [e] edit ", colors.border())
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.code_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line_count = self.editor.lines().len();
        let gutter = line_count.to_string().len() + 2;
        let text_width = (inner.width as usize).saturating_sub(gutter);
        let (cursor_row, cursor_col) = self.editor.cursor();
        let top = first_visible(cursor_row, inner.height as usize);
        let left = if self.focused {
            first_visible_col(cursor_col, text_width)
        } else {
            0
        };

        let code = Style::default().fg(colors.code_fg()).bg(colors.code_bg());
        let cursor = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
        let number = Style::default().fg(colors.text_muted()).bg(colors.code_bg());

        let lines: Vec<Line> = (top..line_count)
            .take(inner.height as usize)
            .map(|row| {
                let mut spans = vec![Span::styled(
                    format!("{:>width$} ", row + 1, width = gutter - 1),
                    number,
                )];
                if self.focused && row == cursor_row {
                    let (before, at, after) = self.editor.render_parts(row);
                    let before: String = before.chars().skip(left).collect();
                    spans.push(Span::styled(before, code));
                    spans.push(Span::styled(at.unwrap_or(' ').to_string(), cursor));
                    spans.push(Span::styled(after.to_string(), code));
                } else {
                    let text: String = self.editor.lines()[row].chars().skip(left).collect();
                    spans.push(Span::styled(text, code));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
