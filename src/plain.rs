//! Fixed-width plain-text rendering of a post body.

use tracing::debug;

use crate::block::{Block, ListItem, parse_blocks};
use crate::config::RenderConfig;
use crate::layout;
use crate::typography::beautify;
use crate::wrap::wrap;

/// Render `body` as wrapped, indented plain text.
///
/// Blocks are separated by one blank line and the result ends with exactly
/// one blank line. A body without content renders as the empty string.
pub fn render(body: &str, config: &RenderConfig) -> String {
    let blocks = parse_blocks(body, !config.mobile_narrowed);
    debug!(
        blocks = blocks.len(),
        width = config.line_width,
        "rendering plain text"
    );

    let rendered = blocks
        .iter()
        .map(|block| render_block(block, config))
        .collect::<Vec<_>>()
        .join("\n\n");

    let trimmed = rendered.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n\n")
    }
}

fn typeset(text: &str, config: &RenderConfig) -> String {
    if config.beautify.applies_to_content() {
        beautify(text)
    } else {
        text.to_string()
    }
}

fn render_block(block: &Block, config: &RenderConfig) -> String {
    match block {
        Block::Heading { text, .. } => {
            let text = typeset(text, config);
            let text = if config.capitalize_titles {
                text.to_uppercase()
            } else {
                text
            };
            wrap(&text, config.line_width, 0)
                .lines()
                .map(|line| layout::center(line, config.line_width))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Block::Quote { lines } => {
            let lines: Vec<String> = lines.iter().map(|l| typeset(l, config)).collect();
            if Block::quote_is_single_line(&lines) {
                let line = lines.iter().find(|l| !l.trim().is_empty());
                layout::single_line_quote(line.map_or("", String::as_str), config)
            } else {
                layout::multi_line_quote(&lines, config)
            }
        }
        Block::List {
            ordered,
            items,
            total_count,
        } => render_list(*ordered, items, *total_count, config),
        Block::Paragraph { text } => {
            wrap(&typeset(text, config), config.line_width, config.prefix_length)
        }
        Block::Asterism => layout::asterism(config),
        Block::Separator => layout::center(&layout::rule(layout::RULE_LENGTH), config.line_width),
    }
}

fn render_list(
    ordered: bool,
    items: &[ListItem],
    total: usize,
    config: &RenderConfig,
) -> String {
    items
        .iter()
        .map(|item| {
            let marker = if ordered {
                layout::ordered_marker(&item.marker, total)
            } else {
                layout::bullet_marker(&item.marker, config)
            };
            let continuation: Vec<String> = item
                .continuation
                .iter()
                .map(|l| typeset(l, config))
                .collect();
            layout::list_item(&marker, &typeset(&item.text, config), &continuation, config)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
