//! # Weblog
//!
//! A publisher for weblogs written as plain text files. The filesystem is the
//! data source: a file's name is the post title, its first directory is the
//! category, and its modification time is the publication date.
//!
//! # Architecture: Two Renderers, One Parser
//!
//! A post body is split into blocks once and then handed to either renderer:
//!
//! ```text
//! body text  →  block::parse_blocks  →  plain::render   (fixed-width text page)
//!                                   └→  html::render_*  (feed description)
//! ```
//!
//! The plain-text renderer is the primary output. Every character position is
//! computed from display width, so pages line up in a monospace font whatever
//! the script or glyph width.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`block`] | Splits a body into headings, quotes, lists, paragraphs, asterisms and separators |
//! | [`wrap`] | Width-aware word wrapping with hyphen and hard splits |
//! | [`layout`] | Fixed-width primitives: header, about bar, quotes, list markers, centering |
//! | [`typography`] | Typographic beautification (curly quotes, dashes, asterisms) and its inverse |
//! | [`plain`] | Renders a body to indented fixed-width text |
//! | [`html`] | Renders a body to an HTML fragment for feeds |
//! | [`config`] | `config.toml` loading, validation, merging, and per-request [`RenderConfig`] |
//! | [`post`] | A post read from one `.txt` file |
//! | [`repository`] | Discovers posts and answers listing, lookup and search queries |
//! | [`slug`] | Title → URL slug, with transliteration; accent folding for search |
//! | [`page`] | Page furniture: post pages, category pages, home page, footer |
//! | [`output`] | CLI output formatting for the `list` command |
//!
//! # Design Decisions
//!
//! ## Display Width, Not Characters
//!
//! All column arithmetic goes through [`wrap::text_width`], which counts East
//! Asian wide glyphs as two columns. Centering, padding and wrapping never
//! count bytes or `char`s.
//!
//! ## Config Is Built Per Request
//!
//! [`RenderConfig`] is a small `Copy` value derived from the site config for
//! each page. A phone gets a narrowed config; nothing global changes between
//! renders, so two layouts can be produced side by side.
//!
//! ## The Filesystem Is the Database
//!
//! No front-matter, no index file. Drafts live under a `drafts/` directory,
//! hidden posts under any dot-prefixed directory, and a leading `*` in the
//! file name marks a selected post.

pub mod block;
pub mod config;
pub mod html;
pub mod layout;
pub mod output;
pub mod page;
pub mod plain;
pub mod post;
pub mod repository;
pub mod slug;
pub mod typography;
pub mod wrap;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::RenderConfig;

/// Render a post body to fixed-width plain text.
///
/// See [`plain::render`].
pub fn render_plain_text(body: &str, config: &RenderConfig) -> String {
    plain::render(body, config)
}

/// Render a post body to an HTML fragment.
///
/// See [`html::render_fragment`].
pub fn render_rss_fragment(body: &str) -> String {
    html::render_fragment(body)
}
