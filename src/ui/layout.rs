use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥100 cols: sidebar list + detail side by side
    Medium, // 60-99 cols: narrower sidebar
    Narrow, // <60 cols: one pane at a time
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else if area.width >= 60 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn sidebar_width(&self) -> Option<u16> {
        match self {
            LayoutTier::Wide => Some(36),
            LayoutTier::Medium => Some(26),
            LayoutTier::Narrow => None,
        }
    }

    /// Below this height the editor would be too short to be useful, so the
    /// detail text gets the whole pane and the editor is shown on focus only.
    pub fn split_detail(&self, height: u16) -> bool {
        height >= 16
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    /// `list_only` is used on narrow terminals while the list has focus.
    pub fn new(area: Rect, footer_lines: u16, list_only: bool) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        match tier.sidebar_width() {
            Some(width) => {
                let horizontal = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(width), Constraint::Min(20)])
                    .split(vertical[1]);
                Self {
                    header: vertical[0],
                    sidebar: Some(horizontal[0]),
                    main: horizontal[1],
                    footer: vertical[2],
                    tier,
                }
            }
            None if list_only => Self {
                header: vertical[0],
                sidebar: Some(vertical[1]),
                main: Rect::new(vertical[1].x, vertical[1].y, 0, 0),
                footer: vertical[2],
                tier,
            },
            None => Self {
                header: vertical[0],
                sidebar: None,
                main: vertical[1],
                footer: vertical[2],
                tier,
            },
        }
    }
}

/// Split the detail pane into (problem text, editor).
pub fn detail_split(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    (parts[0], parts[1])
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 10;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
