//! Session-local file editing: a line buffer with a cursor, plus the
//! code-block extraction used to apply assistant answers to the buffer.
//! Edits never leave the session — nothing is written back to GitHub.

/// An open editing buffer for one repository file.
#[derive(Debug)]
pub struct EditorState {
    pub path: String,
    pub name: String,
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub modified: bool,
}

impl EditorState {
    pub fn new(path: impl Into<String>, name: impl Into<String>, content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(String::from).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { path: path.into(), name: name.into(), lines, cursor_row: 0, cursor_col: 0, modified: false }
    }

    /// The buffer as one string, reversing the line split.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole buffer (e.g. applying an assistant code block).
    pub fn set_text(&mut self, content: &str) {
        self.lines = content.split('\n').map(String::from).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.modified = true;
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
        self.modified = true;
    }

    pub fn newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
            self.modified = true;
        } else if self.cursor_row > 0 {
            // Join with the previous line
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&removed);
            self.modified = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        let len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col < len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.clamp_col();
        }
    }

    fn clamp_col(&mut self) {
        let len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }
}

/// Byte offset of the `col`-th character of `line`.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

/// Extract fenced code blocks from a markdown-ish assistant response.
pub fn extract_code_blocks(response: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_block = false;
    for line in response.lines() {
        if line.trim_start().starts_with("```") {
            if in_block {
                blocks.push(current.join("\n"));
                current.clear();
            }
            in_block = !in_block;
        } else if in_block {
            current.push(line);
        }
    }
    blocks
}

/// The block most likely to be the main implementation: the largest one.
pub fn main_code_block(response: &str) -> Option<String> {
    extract_code_blocks(response).into_iter().max_by_key(String::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(content: &str) -> EditorState {
        EditorState::new("src/main.py", "main.py", content)
    }

    #[test]
    fn text_roundtrips_content() {
        let ed = editor("a\nb\nc");
        assert_eq!(ed.text(), "a\nb\nc");
    }

    #[test]
    fn insert_at_cursor() {
        let mut ed = editor("ac");
        ed.move_right();
        ed.insert_char('b');
        assert_eq!(ed.text(), "abc");
        assert!(ed.modified);
    }

    #[test]
    fn newline_splits_line() {
        let mut ed = editor("ab");
        ed.move_right();
        ed.newline();
        assert_eq!(ed.text(), "a\nb");
        assert_eq!((ed.cursor_row, ed.cursor_col), (1, 0));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ed = editor("a\nb");
        ed.move_down();
        ed.backspace();
        assert_eq!(ed.text(), "ab");
        assert_eq!((ed.cursor_row, ed.cursor_col), (0, 1));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut ed = editor("ab");
        ed.backspace();
        assert_eq!(ed.text(), "ab");
        assert!(!ed.modified);
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut ed = editor("abcd\nx");
        ed.cursor_col = 4;
        ed.move_down();
        assert_eq!(ed.cursor_col, 1);
    }

    #[test]
    fn insert_handles_multibyte() {
        let mut ed = editor("héllo");
        ed.move_right();
        ed.move_right();
        ed.insert_char('!');
        assert_eq!(ed.text(), "hé!llo");
    }

    #[test]
    fn extract_code_blocks_finds_fenced_code() {
        let response = "Here:\n```python\nprint(1)\n```\nand\n```\nx = 2\ny = 3\n```";
        let blocks = extract_code_blocks(response);
        assert_eq!(blocks, ["print(1)", "x = 2\ny = 3"]);
    }

    #[test]
    fn main_code_block_picks_largest() {
        let response = "```\nshort\n```\n```\na much longer block\n```";
        assert_eq!(main_code_block(response).as_deref(), Some("a much longer block"));
    }

    #[test]
    fn no_fences_means_no_blocks() {
        assert!(main_code_block("plain text answer").is_none());
    }
}
