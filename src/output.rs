//! CLI output formatting for the `list` command.
//!
//! Output is **information-centric, not file-centric**: each post is shown by
//! position and title, with its category, date, slug and source file as
//! indented context lines.
//!
//! ```text
//! Posts
//! 001 On Slow Reading
//!     Category: Essays
//!     Date: 2025-03-12
//!     Slug: on-slow-reading
//!     Source: essays/On Slow Reading.txt
//! 002 Best Of ★
//!     ...
//!
//! 4 posts, 2023-2025
//! ```
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use std::path::Path;

use crate::config::SiteConfig;
use crate::post::Post;
use crate::repository::year_range;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Lines describing `posts`, relative to `weblog_dir`.
pub fn format_post_list(posts: &[&Post], site: &SiteConfig, weblog_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, post) in posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.display_title(site)));
        lines.push(format!("{}Category: {}", indent(1), post.category));
        lines.push(format!("{}Date: {}", indent(1), post.date.format("%Y-%m-%d")));
        match post.slug() {
            Ok(slug) => lines.push(format!("{}Slug: {slug}", indent(1))),
            Err(_) => lines.push(format!("{}Slug: (none)", indent(1))),
        }
        let source = post.path.strip_prefix(weblog_dir).unwrap_or(&post.path);
        lines.push(format!("{}Source: {}", indent(1), source.display()));
    }

    lines.push(String::new());
    let years = year_range(posts.iter().copied());
    if years.is_empty() {
        lines.push(plural(posts.len(), "post"));
    } else {
        lines.push(format!("{}, {years}", plural(posts.len(), "post")));
    }
    lines
}

pub fn print_post_list(posts: &[&Post], site: &SiteConfig, weblog_dir: &Path) {
    for line in format_post_list(posts, site, weblog_dir) {
        println!("{line}");
    }
}
