use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const TAB_WIDTH: usize = 4;

/// What a key press did to the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer text changed; carries the full new value.
    Changed(String),
    /// Cursor movement or a no-op key; nothing to report upstream.
    Unchanged,
    /// The user asked to leave the editor.
    Leave,
}

impl EditorEvent {
    /// The `on_change` payload: `None` means "no change".
    pub fn change(&self) -> Option<&str> {
        match self {
            EditorEvent::Changed(text) => Some(text),
            EditorEvent::Unchanged | EditorEvent::Leave => None,
        }
    }
}

/// Multi-line text buffer for the solution editor.
pub struct CodeEditor {
    lines: Vec<String>,
    /// Cursor row (line index).
    row: usize,
    /// Cursor column as a char index within the row.
    col: usize,
}

impl Default for CodeEditor {
    fn default() -> Self {
        Self::new("")
    }
}

impl CodeEditor {
    pub fn new(text: &str) -> Self {
        let mut editor = Self {
            lines: Vec::new(),
            row: 0,
            col: 0,
        };
        editor.set_value(text);
        editor
    }

    /// Replace the buffer, putting the cursor at the start.
    pub fn set_value(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.row = 0;
        self.col = 0;
    }

    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for `row`. When the
    /// cursor is not on `row` everything is in `before_cursor`.
    pub fn render_parts(&self, row: usize) -> (&str, Option<char>, &str) {
        let Some(line) = self.lines.get(row) else {
            return ("", None, "");
        };
        if row != self.row {
            return (line, None, "");
        }
        let byte_offset = char_to_byte(line, self.col);
        match line[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&line[..byte_offset], Some(ch), &line[next_byte..])
            }
            None => (line, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> EditorEvent {
        let edited = match key.code {
            KeyCode::Esc => return EditorEvent::Leave,

            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                false
            }
            KeyCode::Down => {
                self.move_vertical(1);
                false
            }
            KeyCode::PageUp => {
                self.move_vertical(-10);
                false
            }
            KeyCode::PageDown => {
                self.move_vertical(10);
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = self.row_len();
                false
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.col = 0;
                false
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.col = self.row_len();
                false
            }

            KeyCode::Enter => {
                self.newline();
                true
            }
            KeyCode::Tab => {
                let pad = TAB_WIDTH - (self.col % TAB_WIDTH);
                self.insert_str(&" ".repeat(pad));
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.kill_to_line_start()
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back()
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
                true
            }
            _ => false,
        };

        if edited {
            EditorEvent::Changed(self.value())
        } else {
            EditorEvent::Unchanged
        }
    }

    /// Insert text at the cursor (typed or pasted). Newlines split rows.
    pub fn insert_str(&mut self, text: &str) {
        for (i, chunk) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_line();
            }
            for ch in chunk.chars().filter(|&c| c != '\r') {
                self.insert_char(ch);
            }
        }
    }

    fn insert_char(&mut self, ch: char) {
        let col = self.col;
        let line = &mut self.lines[self.row];
        let byte_offset = char_to_byte(line, col);
        line.insert(byte_offset, ch);
        self.col += 1;
    }

    fn split_line(&mut self) {
        let line = &mut self.lines[self.row];
        let byte_offset = char_to_byte(line, self.col);
        let rest = line.split_off(byte_offset);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Split the line and carry the current line's indentation over.
    fn newline(&mut self) {
        let indent: String = self.lines[self.row]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .take(self.col)
            .collect();
        self.split_line();
        self.insert_str(&indent);
    }

    fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let col = self.col - 1;
            let line = &mut self.lines[self.row];
            let byte_offset = char_to_byte(line, col);
            line.remove(byte_offset);
            self.col = col;
            true
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.row_len();
            self.lines[self.row].push_str(&current);
            true
        } else {
            false
        }
    }

    fn delete(&mut self) -> bool {
        if self.col < self.row_len() {
            let line = &mut self.lines[self.row];
            let byte_offset = char_to_byte(line, self.col);
            line.remove(byte_offset);
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    fn kill_to_line_start(&mut self) -> bool {
        if self.col == 0 {
            return false;
        }
        let line = &mut self.lines[self.row];
        let byte_offset = char_to_byte(line, self.col);
        line.replace_range(..byte_offset, "");
        self.col = 0;
        true
    }

    /// unix-word-rubout within the current row: skip whitespace, then non-whitespace.
    fn delete_word_back(&mut self) -> bool {
        if self.col == 0 {
            return false;
        }
        let chars: Vec<char> = self.lines[self.row].chars().collect();
        let mut pos = self.col;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let line = &mut self.lines[self.row];
        let start_byte = char_to_byte(line, pos);
        let end_byte = char_to_byte(line, self.col);
        line.replace_range(start_byte..end_byte, "");
        self.col = pos;
        true
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.row_len();
        }
    }

    fn move_right(&mut self) {
        if self.col < self.row_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let last = self.lines.len().saturating_sub(1);
        self.row = self.row.saturating_add_signed(delta).min(last);
        self.col = self.col.min(self.row_len());
    }

    fn row_len(&self) -> usize {
        self.lines.get(self.row).map_or(0, |l| l.chars().count())
    }
}

/// Convert char index to byte offset.
fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(editor: &mut CodeEditor, text: &str) {
        for ch in text.chars() {
            editor.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_reports_full_value() {
        let mut editor = CodeEditor::new("fn");
        editor.handle(key(KeyCode::End));
        let event = editor.handle(key(KeyCode::Char('!')));
        assert_eq!(event, EditorEvent::Changed("fn!".to_string()));
        assert_eq!(event.change(), Some("fn!"));
    }

    #[test]
    fn cursor_moves_report_no_change() {
        let mut editor = CodeEditor::new("ab\ncd");
        assert_eq!(editor.handle(key(KeyCode::Down)), EditorEvent::Unchanged);
        assert_eq!(editor.handle(key(KeyCode::End)), EditorEvent::Unchanged);
        assert_eq!(editor.cursor(), (1, 2));
        assert_eq!(EditorEvent::Unchanged.change(), None);
    }

    #[test]
    fn escape_leaves() {
        let mut editor = CodeEditor::new("x");
        assert_eq!(editor.handle(key(KeyCode::Esc)), EditorEvent::Leave);
        assert_eq!(editor.value(), "x");
    }

    #[test]
    fn enter_keeps_indentation() {
        let mut editor = CodeEditor::new("    let x = 1;");
        editor.handle(key(KeyCode::End));
        editor.handle(key(KeyCode::Enter));
        type_str(&mut editor, "y");
        assert_eq!(editor.value(), "    let x = 1;\n    y");
        assert_eq!(editor.cursor(), (1, 5));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut editor = CodeEditor::new("ab\ncd");
        editor.handle(key(KeyCode::Down));
        assert_eq!(editor.cursor(), (1, 0));
        editor.handle(key(KeyCode::Backspace));
        assert_eq!(editor.value(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn backspace_at_origin_is_unchanged() {
        let mut editor = CodeEditor::new("ab");
        assert_eq!(editor.handle(key(KeyCode::Backspace)), EditorEvent::Unchanged);
        assert_eq!(editor.value(), "ab");
    }

    #[test]
    fn delete_at_line_end_joins_next() {
        let mut editor = CodeEditor::new("ab\ncd");
        editor.handle(key(KeyCode::End));
        editor.handle(key(KeyCode::Delete));
        assert_eq!(editor.value(), "abcd");

        let mut empty = CodeEditor::new("");
        assert_eq!(empty.handle(key(KeyCode::Delete)), EditorEvent::Unchanged);
    }

    #[test]
    fn tab_pads_to_next_stop() {
        let mut editor = CodeEditor::new("");
        type_str(&mut editor, "ab");
        editor.handle(key(KeyCode::Tab));
        assert_eq!(editor.value(), "ab  ");
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut editor = CodeEditor::new("foo bar  ");
        editor.handle(key(KeyCode::End));
        editor.handle(ctrl('w'));
        assert_eq!(editor.value(), "foo ");

        let mut empty = CodeEditor::new("");
        assert_eq!(empty.handle(ctrl('w')), EditorEvent::Unchanged);
    }

    #[test]
    fn ctrl_u_kills_to_line_start() {
        let mut editor = CodeEditor::new("keep\nremove me");
        editor.handle(key(KeyCode::Down));
        editor.handle(key(KeyCode::End));
        editor.handle(ctrl('u'));
        assert_eq!(editor.value(), "keep\n");
    }

    #[test]
    fn vertical_move_clamps_column() {
        let mut editor = CodeEditor::new("long line\nx");
        editor.handle(key(KeyCode::End));
        editor.handle(key(KeyCode::Down));
        assert_eq!(editor.cursor(), (1, 1));
        editor.handle(key(KeyCode::PageDown));
        assert_eq!(editor.cursor(), (1, 1));
        editor.handle(key(KeyCode::PageUp));
        assert_eq!(editor.cursor(), (0, 1));
    }

    #[test]
    fn paste_splits_lines_and_drops_carriage_returns() {
        let mut editor = CodeEditor::new("");
        editor.insert_str("a\r\nb");
        assert_eq!(editor.value(), "a\nb");
        assert_eq!(editor.cursor(), (1, 1));
    }

    #[test]
    fn multibyte_editing() {
        let mut editor = CodeEditor::new("héllo");
        editor.handle(key(KeyCode::Right));
        editor.handle(key(KeyCode::Right));
        editor.handle(key(KeyCode::Backspace));
        assert_eq!(editor.value(), "hllo");
        assert_eq!(editor.render_parts(0), ("h", Some('l'), "lo"));
    }

    #[test]
    fn set_value_resets_cursor() {
        let mut editor = CodeEditor::new("abc");
        editor.handle(key(KeyCode::End));
        editor.set_value("x\ny");
        assert_eq!(editor.cursor(), (0, 0));
        assert_eq!(editor.lines().len(), 2);
    }
}
