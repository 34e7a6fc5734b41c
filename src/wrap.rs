//! Greedy word wrapping for fixed-width output.
//!
//! Text is split into alternating runs of words and breakable spaces; the
//! spaces are kept as tokens so that spacing inside a line survives exactly
//! as written. Only a space that falls on a wrap point is dropped.
//!
//! A word that does not fit the current line is handled in order of
//! preference:
//!
//! 1. it moves to the next line,
//! 2. if it contains a hyphen, the part up to a hyphen stays behind,
//! 3. if it is wider than a whole line, it is cut into line-sized pieces.
//!
//! Widths are terminal columns as reported by `unicode-width`, so wide CJK
//! glyphs count double and combining marks count zero.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visible width of `text` in terminal columns.
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Space characters a line may break at.
///
/// No-break spaces (U+00A0, U+2007, U+202F) are deliberately absent.
pub fn is_breakable_space(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{1680}'
            | '\u{2000}'..='\u{2006}'
            | '\u{2008}'..='\u{200A}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
}

impl<'a> Token<'a> {
    fn new(text: &'a str, space: bool) -> Self {
        if space {
            Token::Space(text)
        } else {
            Token::Word(text)
        }
    }

    fn text(self) -> &'a str {
        match self {
            Token::Word(s) | Token::Space(s) => s,
        }
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let space = is_breakable_space(c);
        if let Some(prev) = in_space
            && prev != space
        {
            tokens.push(Token::new(&text[start..i], prev));
            start = i;
        }
        in_space = Some(space);
    }
    if let Some(space) = in_space {
        tokens.push(Token::new(&text[start..], space));
    }
    tokens
}

/// Accumulator threaded through the token fold.
struct Lines {
    done: Vec<String>,
    current: String,
    current_width: usize,
    indent: usize,
    width: usize,
}

impl Lines {
    fn new(width: usize, indent: usize) -> Self {
        Self {
            done: Vec::new(),
            current: " ".repeat(indent),
            current_width: indent,
            indent,
            width,
        }
    }

    fn usable(&self) -> usize {
        self.width - self.indent
    }

    fn at_line_start(&self) -> bool {
        self.current_width == self.indent
    }

    fn append(&mut self, text: &str) {
        self.current.push_str(text);
        self.current_width += text_width(text);
    }

    fn flush(&mut self) {
        if !self.current.trim().is_empty() {
            self.done.push(self.current.trim_end().to_string());
        }
        self.current = " ".repeat(self.indent);
        self.current_width = self.indent;
    }

    fn push(mut self, token: Token<'_>) -> Self {
        let text = token.text();
        let width = text_width(text);

        if self.current_width + width <= self.width {
            // A space carried over a wrap point would indent the new line.
            let dangling = matches!(token, Token::Space(_))
                && self.at_line_start()
                && !self.done.is_empty();
            if !dangling {
                self.append(text);
            }
            return self;
        }

        match token {
            Token::Space(_) => self.flush(),
            Token::Word(word) => {
                if let Some((head, tail)) = self.hyphen_split(word, width) {
                    self.append(head);
                    self.flush();
                    return self.push(Token::Word(tail));
                }
                if width > self.usable() {
                    self.hard_split(word);
                } else {
                    self.flush();
                    self.append(word);
                }
            }
        }
        self
    }

    /// Longest prefix ending in a hyphen that still fits the current line.
    fn hyphen_split<'w>(&self, word: &'w str, width: usize) -> Option<(&'w str, &'w str)> {
        if width > self.usable() {
            return None;
        }
        let room = self.width - self.current_width;
        word.char_indices()
            .filter(|&(i, c)| c == '-' && i > 0 && i + 1 < word.len())
            .map(|(i, _)| word.split_at(i + 1))
            .filter(|(head, _)| text_width(head) <= room)
            .last()
    }

    fn hard_split(&mut self, word: &str) {
        self.flush();
        let usable = self.usable();
        let mut chunk = String::new();
        let mut chunk_width = 0;

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if chunk_width + w > usable && !chunk.is_empty() {
                self.done
                    .push(format!("{}{}", " ".repeat(self.indent), chunk));
                chunk.clear();
                chunk_width = 0;
            }
            chunk.push(c);
            chunk_width += w;
        }
        self.append(&chunk);
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.done
    }
}

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[ \t]*\n[ \t]+").expect("sentence pattern must compile"));

/// Wrap a single line of text into indented lines of at most `width` columns.
fn wrap_line(text: &str, width: usize, indent: usize) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .fold(Lines::new(width, indent), Lines::push)
        .finish()
}

/// Wrap `text` to `width` columns, indenting every line by `indent` spaces.
///
/// Each `\n`-separated line of the input is wrapped on its own. A line is only
/// ever wider than `width` when `width <= indent`; the usable body is then
/// clamped to one column so the loop always makes progress.
///
/// Empty input yields the bare indent, which callers trim away.
pub fn wrap(text: &str, width: usize, indent: usize) -> String {
    let width = width.max(indent + 1);
    if text.is_empty() {
        return " ".repeat(indent);
    }

    let lines: Vec<String> = text
        .split('\n')
        .flat_map(|line| {
            let wrapped = wrap_line(line, width, indent);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .collect();

    let joined = lines.join("\n");
    SENTENCE_BREAK
        .replace_all(&joined, format!(".\n{}", " ".repeat(indent)).as_str())
        .into_owned()
}
