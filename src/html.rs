//! HTML fragments for feed readers.
//!
//! The same [`Block`] sequence the plain-text renderer lays out is mapped to
//! a flat run of HTML elements here. Nothing is wrapped for width: each
//! source line of a paragraph becomes its own `<p>`, quote lines are joined
//! with `<br />`, list items become `<li>` and headings `<h1>`..`<h6>`.
//!
//! All text is escaped by Maud. [`render_feed_description`] additionally
//! turns bare URLs into links and backticked spans into `<code>`.

use maud::{Markup, PreEscaped, html};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::block::{Block, ListItem, parse_blocks};
use crate::config::RenderConfig;
use crate::typography::{beautify, plainify};

const LINE_BREAK: &str = "<br />";

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("code span pattern must compile"));
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?://)?[\w-]+(?:\.[\w-]+)*\.[A-Za-z]{2,}(?:[/?#]\S*)?$")
        .expect("url pattern must compile")
});
static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)https?://").expect("scheme pattern must compile"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("word pattern must compile"));

type Inline<'a> = &'a dyn Fn(&str) -> Markup;

fn escape(text: &str) -> Markup {
    html! { (text) }
}

fn list_item(item: &ListItem, inline: Inline<'_>) -> Markup {
    html! {
        (inline(&item.text))
        @for line in &item.continuation {
            (PreEscaped(LINE_BREAK))
            (inline(line))
        }
    }
}

fn render_block(block: &Block, inline: Inline<'_>) -> Markup {
    match block {
        // `#tag` opening a line is text, not a heading.
        Block::Heading {
            level,
            text,
            spaced: false,
        } => {
            let raw = format!("{}{text}", "#".repeat(usize::from(*level)));
            html! { p { (inline(&raw)) } }
        }
        Block::Heading { level, text, .. } => {
            let level = (*level).clamp(1, 6);
            PreEscaped(format!(
                "<h{level}>{}</h{level}>",
                inline(text).into_string()
            ))
        }
        Block::Quote { lines } => html! {
            blockquote {
                @for (i, line) in lines.iter().enumerate() {
                    @if i > 0 { (PreEscaped(LINE_BREAK)) }
                    (inline(line))
                }
            }
        },
        Block::List {
            ordered: true,
            items,
            ..
        } => html! {
            ol { @for item in items { li { (list_item(item, inline)) } } }
        },
        Block::List { items, .. } => html! {
            ul { @for item in items { li { (list_item(item, inline)) } } }
        },
        Block::Paragraph { text } => html! {
            @for line in text.lines() { p { (inline(line)) } }
        },
        Block::Asterism => html! { p { (inline("* * *")) } },
        Block::Separator => PreEscaped("<hr />".to_string()),
    }
}

fn render_blocks(body: &str, inline: Inline<'_>) -> String {
    let blocks = parse_blocks(body, false);
    debug!(blocks = blocks.len(), "rendering html");
    blocks
        .iter()
        .map(|block| render_block(block, inline).into_string())
        .collect()
}

/// Render `body` as escaped HTML.
pub fn render_fragment(body: &str) -> String {
    render_blocks(body, &escape)
}

fn link(word: &str) -> Markup {
    let href = if URL_SCHEME.is_match(word) {
        word.to_string()
    } else {
        format!("http://{word}")
    };
    html! { a href=(href) { (word) } }
}

/// Escape `text`, turning whitespace-delimited URLs into links.
///
/// Trailing sentence punctuation stays outside the link.
fn linkify(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for word in WORD.find_iter(text) {
        out.push_str(&escape(&text[last..word.start()]).into_string());
        let token = word.as_str();
        let core = token.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '”', '’']);
        if BARE_URL.is_match(core) {
            out.push_str(&link(core).into_string());
            out.push_str(&escape(&token[core.len()..]).into_string());
        } else {
            out.push_str(&escape(token).into_string());
        }
        last = word.end();
    }
    out.push_str(&escape(&text[last..]).into_string());
    out
}

fn feed_inline(text: &str, typeset: bool) -> Markup {
    let text = if typeset {
        beautify(text)
    } else {
        text.to_string()
    };

    let mut out = String::new();
    let mut last = 0;
    for caps in CODE_SPAN.captures_iter(&text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&linkify(&text[last..whole.start()]));
        out.push_str(&html! { code { (plainify(code.as_str())) } }.into_string());
        last = whole.end();
    }
    out.push_str(&linkify(&text[last..]));
    PreEscaped(out)
}

/// Render `body` as the description of a feed item.
///
/// Beautification applies when the site beautifies RSS output.
pub fn render_feed_description(body: &str, config: &RenderConfig) -> String {
    let typeset = config.beautify.applies_to_rss();
    render_blocks(body, &|text: &str| feed_inline(text, typeset))
}

/// Escaped feed item title.
pub fn feed_title(title: &str, config: &RenderConfig) -> String {
    if config.beautify.applies_to_rss() {
        escape(&beautify(title)).into_string()
    } else {
        escape(title).into_string()
    }
}
