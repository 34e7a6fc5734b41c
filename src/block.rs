//! Block structure of a post body.
//!
//! Posts are plain text with a handful of line markers:
//!
//! ```text
//! # Heading              ## Smaller heading
//! > quoted line          (a run of `>` lines is one quote)
//! 1. numbered item       - bulleted item      * bulleted item
//! ***   or   * * *       (section break)
//! ---                    (separator rule)
//! ```
//!
//! Parsing happens in two steps. The body is first cut into chunks at blank
//! lines; each chunk is then scanned line by line with a small state machine
//! (`Idle`, `Quote`, `List`, `Paragraph`) that closes the open block whenever
//! a line's marker changes. A list swallows unmarked lines as continuation of
//! its last item, so wrapped item text in the source stays with its item.
//!
//! The parser never fails. Unterminated quotes and lists end at the end of
//! their chunk.

use regex::Regex;
use std::sync::LazyLock;

/// One structural unit of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `spaced` is false when text follows the `#`s directly (`#tag`).
    Heading {
        level: u8,
        text: String,
        spaced: bool,
    },
    Quote { lines: Vec<String> },
    List {
        ordered: bool,
        items: Vec<ListItem>,
        total_count: usize,
    },
    /// Consecutive plain lines; each source line is kept on its own line.
    Paragraph { text: String },
    Asterism,
    Separator,
}

/// A list entry as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// The numeral of an ordered item (`"10"`), or the bullet character.
    pub marker: String,
    pub text: String,
    /// Unmarked source lines following the item.
    pub continuation: Vec<String>,
}

impl ListItem {
    fn new(marker: &str, text: &str) -> Self {
        Self {
            marker: marker.to_string(),
            text: text.to_string(),
            continuation: Vec::new(),
        }
    }
}

impl Block {
    /// Non-empty lines of a quote; a quote with exactly one is laid out inline.
    pub fn quote_is_single_line(lines: &[String]) -> bool {
        lines.iter().filter(|l| !l.trim().is_empty()).count() == 1
    }
}

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)(\s*)(.*)$").expect("heading pattern must compile"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").expect("ordered pattern must compile"));
static UNORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([*-])\s+(.*)$").expect("unordered pattern must compile"));
static SENTENCE_GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\.\.\.|[.!?])(["'”’»]?)[ \t]+"#).expect("sentence pattern must compile")
});

/// How a single trimmed line reads on its own.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Heading(u8, &'a str, bool),
    Quote(&'a str),
    Item {
        ordered: bool,
        marker: &'a str,
        text: &'a str,
    },
    Asterism,
    Separator,
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    match line {
        "***" | "* * *" => return Line::Asterism,
        "---" => return Line::Separator,
        _ => {}
    }
    if let Some(rest) = line.strip_prefix('>') {
        return Line::Quote(rest.trim_start());
    }
    if let Some(caps) = HEADING.captures(line) {
        let level = caps[1].len().min(6) as u8;
        let spaced = caps.get(2).is_some_and(|m| !m.as_str().is_empty());
        let text = caps.get(3).map_or("", |m| m.as_str().trim());
        return Line::Heading(level, text, spaced);
    }
    for (pattern, ordered) in [(&*ORDERED, true), (&*UNORDERED, false)] {
        if let Some(caps) = pattern.captures(line) {
            let (Some(marker), Some(text)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            return Line::Item {
                ordered,
                marker: marker.as_str(),
                text: text.as_str().trim_end(),
            };
        }
    }
    Line::Text(line)
}

/// Collapse the space after sentence-ending punctuation to a single space.
///
/// `...`, `.`, `!` and `?`, optionally followed by a closing quote, lose any
/// run of horizontal whitespace after them in favor of exactly one space.
pub fn normalize_sentence_spacing(text: &str) -> String {
    SENTENCE_GAP.replace_all(text, "$1$2 ").into_owned()
}

/// Open block of the line scanner.
enum State {
    Idle,
    Quote(Vec<String>),
    List { ordered: bool, items: Vec<ListItem> },
    Paragraph(Vec<String>),
}

impl State {
    fn close(self, blocks: &mut Vec<Block>) {
        match self {
            State::Idle => {}
            State::Quote(mut lines) => {
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                blocks.push(Block::Quote { lines });
            }
            State::List { ordered, items } => {
                let total_count = items.len();
                blocks.push(Block::List {
                    ordered,
                    items,
                    total_count,
                });
            }
            State::Paragraph(lines) => blocks.push(Block::Paragraph {
                text: lines.join("\n"),
            }),
        }
    }

    fn feed(self, line: Line<'_>, blocks: &mut Vec<Block>) -> State {
        match (self, line) {
            (State::Quote(mut lines), Line::Quote(text)) => {
                lines.push(text.to_string());
                State::Quote(lines)
            }
            (
                State::List { ordered, mut items },
                Line::Item {
                    ordered: item_ordered,
                    marker,
                    text,
                },
            ) if ordered == item_ordered => {
                items.push(ListItem::new(marker, text));
                State::List { ordered, items }
            }
            (State::List { ordered, mut items }, Line::Text(text)) => {
                if let Some(last) = items.last_mut() {
                    last.continuation.push(text.to_string());
                }
                State::List { ordered, items }
            }
            (State::Paragraph(mut lines), Line::Text(text)) => {
                lines.push(text.to_string());
                State::Paragraph(lines)
            }
            (open, line) => {
                open.close(blocks);
                match line {
                    Line::Heading(level, text, spaced) => {
                        blocks.push(Block::Heading {
                            level,
                            text: text.to_string(),
                            spaced,
                        });
                        State::Idle
                    }
                    Line::Asterism => {
                        blocks.push(Block::Asterism);
                        State::Idle
                    }
                    Line::Separator => {
                        blocks.push(Block::Separator);
                        State::Idle
                    }
                    Line::Quote(text) => State::Quote(vec![text.to_string()]),
                    Line::Item {
                        ordered,
                        marker,
                        text,
                    } => State::List {
                        ordered,
                        items: vec![ListItem::new(marker, text)],
                    },
                    Line::Text(text) => State::Paragraph(vec![text.to_string()]),
                }
            }
        }
    }
}

fn chunks(body: &str) -> Vec<Vec<&str>> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Split a post body into blocks, in source order.
///
/// With `normalize`, sentence spacing is collapsed first (see
/// [`normalize_sentence_spacing`]); narrowed layouts skip this.
pub fn parse_blocks(body: &str, normalize: bool) -> Vec<Block> {
    let mut blocks = Vec::new();

    for chunk in chunks(body) {
        let chunk = chunk.join("\n");
        let chunk = if normalize {
            normalize_sentence_spacing(&chunk)
        } else {
            chunk
        };

        let state = chunk
            .lines()
            .map(str::trim)
            .fold(State::Idle, |state, line| state.feed(classify(line), &mut blocks));
        state.close(&mut blocks);
    }

    tracing::debug!(blocks = blocks.len(), "parsed post body");
    blocks
}
