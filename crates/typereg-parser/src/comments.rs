//! Comment recovery for Rust source
//!
//! `syn` drops ordinary comments while parsing, so they are recovered with a
//! small lexical pass over the source text. The pass only needs to tell
//! comments apart from the tokens that may contain comment-like text:
//! string literals (plain, byte, C and raw), char literals, and lifetimes.
//! It assumes the source already parsed successfully.
//!
//! Adjacent comments are grouped: a comment joins the previous group when no
//! code sits between them and it starts on the same or the next line.

use typereg_core::{Comment, CommentGroup};

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Cursor {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn line_comment(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        text
    }

    fn block_comment(&mut self) -> String {
        let mut text = String::new();
        let mut depth = 0usize;

        while let Some(c) = self.bump() {
            text.push(c);
            match (c, self.peek()) {
                ('/', Some('*')) => {
                    text.push('*');
                    self.bump();
                    depth += 1;
                }
                ('*', Some('/')) => {
                    text.push('/');
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        text
    }

    /// Consume a quoted string body; the cursor sits on the opening quote
    fn string(&mut self) {
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '"' => break,
                _ => {}
            }
        }
    }

    /// Consume `#*"..."#*`; the cursor sits just after the `r` prefix
    fn raw_string(&mut self) {
        let mut hashes = 0;
        while self.peek() == Some('#') {
            hashes += 1;
            self.bump();
        }
        self.bump();

        while let Some(c) = self.bump() {
            if c == '"' && (0..hashes).all(|i| self.peek_at(i) == Some('#')) {
                for _ in 0..hashes {
                    self.bump();
                }
                break;
            }
        }
    }

    /// Consume a char literal or the quote of a lifetime / label
    fn quote(&mut self) {
        if self.peek_at(1) == Some('\\') {
            // Escaped char literal: skip the quote, backslash and escaped char
            self.bump();
            self.bump();
            self.bump();
            while let Some(c) = self.bump() {
                if c == '\'' {
                    break;
                }
            }
        } else if self.peek_at(2) == Some('\'') {
            self.bump();
            self.bump();
            self.bump();
        } else {
            self.bump();
        }
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            word.push(c);
            self.bump();
        }
        word
    }

    fn at_raw_string(&self) -> bool {
        let mut offset = 0;
        while self.peek_at(offset) == Some('#') {
            offset += 1;
        }
        self.peek_at(offset) == Some('"')
    }
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[derive(Default)]
struct Grouper {
    groups: Vec<CommentGroup>,
    current: Vec<Comment>,
    last_end_line: usize,
    code_since_last: bool,
}

impl Grouper {
    fn push(&mut self, comment: Comment, end_line: usize) {
        let adjacent = !self.code_since_last && comment.line <= self.last_end_line + 1;
        if !adjacent {
            self.flush();
        }
        self.current.push(comment);
        self.last_end_line = end_line;
        self.code_since_last = false;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.groups.push(CommentGroup {
                comments: std::mem::take(&mut self.current),
            });
        }
    }

    fn finish(mut self) -> Vec<CommentGroup> {
        self.flush();
        self.groups
    }
}

/// Extract every comment of `source`, grouped by adjacency
pub fn extract_comments(source: &str) -> Vec<CommentGroup> {
    let mut cursor = Cursor::new(source);
    let mut grouper = Grouper::default();

    while let Some(c) = cursor.peek() {
        match c {
            '/' if cursor.peek_at(1) == Some('/') => {
                let line = cursor.line;
                let text = cursor.line_comment();
                grouper.push(Comment { text, line }, line);
            }
            '/' if cursor.peek_at(1) == Some('*') => {
                let line = cursor.line;
                let text = cursor.block_comment();
                let end_line = cursor.line;
                grouper.push(Comment { text, line }, end_line);
            }
            '"' => {
                cursor.string();
                grouper.code_since_last = true;
            }
            '\'' => {
                cursor.quote();
                grouper.code_since_last = true;
            }
            c if c.is_whitespace() => {
                cursor.bump();
            }
            c if is_ident_char(c) => {
                let word = cursor.word();
                match word.as_str() {
                    "r" | "br" | "cr" if cursor.at_raw_string() => cursor.raw_string(),
                    "r" if cursor.peek() == Some('#') => {
                        // Raw identifier such as `r#type`
                        cursor.bump();
                        cursor.word();
                    }
                    _ => {}
                }
                grouper.code_since_last = true;
            }
            _ => {
                cursor.bump();
                grouper.code_since_last = true;
            }
        }
    }

    grouper.finish()
}
