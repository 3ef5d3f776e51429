//! Light inline markup for problem text: fenced code blocks, `inline code`
//! and **bold**. Anything else renders as plain text.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Code(String),
    Bold(String),
}

fn split_inline(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let tick = rest.find('`');
        let star = rest.find("**");
        let (start, is_code) = match (tick, star) {
            (Some(t), Some(s)) if t < s => (t, true),
            (Some(_), Some(s)) => (s, false),
            (Some(t), None) => (t, true),
            (None, Some(s)) => (s, false),
            (None, None) => break,
        };

        let marker = if is_code { "`" } else { "**" };
        let body_start = start + marker.len();
        let Some(len) = rest[body_start..].find(marker) else {
            // Unclosed marker: keep it literally.
            break;
        };

        if start > 0 {
            segments.push(Segment::Text(rest[..start].to_string()));
        }
        let body = rest[body_start..body_start + len].to_string();
        segments.push(if is_code {
            Segment::Code(body)
        } else {
            Segment::Bold(body)
        });
        rest = &rest[body_start + len + marker.len()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    segments
}

/// Render `text` into styled lines. Lines inside ``` fences are shown
/// verbatim with the code colors; the fence lines themselves are dropped.
pub fn render(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let code = Style::default().fg(colors.code_fg()).bg(colors.code_bg());
    let plain = Style::default().fg(colors.fg());
    let bold = plain.add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    let mut in_fence = false;

    for raw in text.lines() {
        if raw.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            lines.push(Line::from(Span::styled(format!(" {raw} "), code)));
            continue;
        }
        let spans: Vec<Span<'static>> = split_inline(raw)
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(t) => Span::styled(t, plain),
                Segment::Code(t) => Span::styled(t, code),
                Segment::Bold(t) => Span::styled(t, bold),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines
}
