//! Site configuration module.
//!
//! Handles loading and validating `config.toml`, and deriving the immutable
//! [`RenderConfig`] snapshot that every renderer receives. Stock defaults are
//! overridden by whatever keys the user file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! weblog_dir = "weblog"       # Posts directory, relative to the site root
//! domain = "localhost"
//! line_width = 72             # Total columns of rendered output
//! prefix_length = 3           # Left indent of body text
//! beautify = "Off"            # "Off", "All", "Content" or "RSS"
//! capitalize_titles = false
//! show_category = true
//! show_date = true
//! shorten_date = false
//! show_separator = false
//! show_copyright = true
//! show_powered_by = true
//! show_urls = "Off"           # "Off", "Short" or "Full"
//! hide_selected = true
//!
//! [author]
//! name = "Unknown"
//! email = "no-reply@example.com"
//! location = ""
//! about = ""
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Mobile Narrowing
//!
//! Requests from phones get a narrower layout: the line width is roughly
//! halved (`line_width / 2 + 6`) and the category and date columns of the
//! post header are dropped. See [`RenderConfig::narrowed`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Where typographic substitutions (curly quotes, em dashes, bullets) apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Beautify {
    #[default]
    Off,
    All,
    Content,
    #[serde(rename = "RSS", alias = "Rss")]
    Rss,
}

impl Beautify {
    /// Plain-text bodies, headings and post headers.
    pub fn applies_to_content(self) -> bool {
        matches!(self, Beautify::All | Beautify::Content)
    }

    /// RSS item titles and descriptions.
    pub fn applies_to_rss(self) -> bool {
        matches!(self, Beautify::All | Beautify::Rss)
    }
}

/// How post URLs are appended to rendered posts in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShowUrls {
    #[default]
    Off,
    Short,
    Full,
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Posts directory, relative to the site root.
    pub weblog_dir: String,
    /// Bare domain used for absolute post URLs.
    pub domain: String,
    pub line_width: usize,
    pub prefix_length: usize,
    pub beautify: Beautify,
    pub capitalize_titles: bool,
    pub show_category: bool,
    pub show_date: bool,
    pub shorten_date: bool,
    /// Draw a full-width rule under the about text.
    pub show_separator: bool,
    pub show_copyright: bool,
    pub show_powered_by: bool,
    pub show_urls: ShowUrls,
    /// When false, selected posts get a star appended to their title.
    pub hide_selected: bool,
    pub author: AuthorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            weblog_dir: "weblog".to_string(),
            domain: "localhost".to_string(),
            line_width: 72,
            prefix_length: 3,
            beautify: Beautify::Off,
            capitalize_titles: false,
            show_category: true,
            show_date: true,
            shorten_date: false,
            show_separator: false,
            show_copyright: true,
            show_powered_by: true,
            show_urls: ShowUrls::Off,
            hide_selected: true,
            author: AuthorConfig::default(),
        }
    }
}

/// The weblog's author, shown in the about bar, footer and feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
    pub location: String,
    /// About text. A literal `\n` sequence is read as a line break.
    pub about: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            email: "no-reply@example.com".to_string(),
            location: String::new(),
            about: String::new(),
        }
    }
}

impl AuthorConfig {
    /// Contact line for the copyright footer: email when set, else the name.
    pub fn information(&self) -> &str {
        if self.email.is_empty() {
            &self.name
        } else {
            &self.email
        }
    }

    /// About text with escaped `\n` sequences turned into real newlines.
    pub fn about_text(&self) -> String {
        self.about.replace("\\n", "\n")
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_widths(self.line_width, self.prefix_length)
    }

    /// Base URL of the site, without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.domain.trim_end_matches('/'))
    }

    /// Snapshot of the layout settings for one render.
    ///
    /// `mobile` applies [`RenderConfig::narrowed`] on top of the file values.
    pub fn render_config(&self, mobile: bool) -> Result<RenderConfig, ConfigError> {
        let config = RenderConfig {
            beautify: self.beautify,
            capitalize_titles: self.capitalize_titles,
            show_category: self.show_category,
            show_date: self.show_date,
            shorten_date: self.shorten_date,
            ..RenderConfig::new(self.line_width, self.prefix_length)?
        };
        Ok(if mobile { config.narrowed() } else { config })
    }
}

fn validate_widths(line_width: usize, prefix_length: usize) -> Result<(), ConfigError> {
    if line_width == 0 {
        return Err(ConfigError::Validation(
            "line_width must be greater than zero".into(),
        ));
    }
    if prefix_length >= line_width {
        return Err(ConfigError::Validation(format!(
            "prefix_length ({prefix_length}) must be smaller than line_width ({line_width})"
        )));
    }
    Ok(())
}

/// Immutable layout settings consumed by every renderer.
///
/// Renderers never fail on a `RenderConfig`: widths that leave no room for
/// text are clamped to a one-column body. Use [`RenderConfig::new`] to reject
/// such values up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub line_width: usize,
    pub prefix_length: usize,
    pub beautify: Beautify,
    pub capitalize_titles: bool,
    pub mobile_narrowed: bool,
    pub show_category: bool,
    pub show_date: bool,
    pub shorten_date: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_width: 72,
            prefix_length: 3,
            beautify: Beautify::Off,
            capitalize_titles: false,
            mobile_narrowed: false,
            show_category: true,
            show_date: true,
            shorten_date: false,
        }
    }
}

impl RenderConfig {
    /// Default settings at the given widths.
    pub fn new(line_width: usize, prefix_length: usize) -> Result<Self, ConfigError> {
        validate_widths(line_width, prefix_length)?;
        Ok(Self {
            line_width,
            prefix_length,
            ..Self::default()
        })
    }

    /// The same settings laid out for a phone screen.
    ///
    /// Applying this twice is a no-op.
    pub fn narrowed(self) -> Self {
        if self.mobile_narrowed {
            return self;
        }
        Self {
            line_width: self.line_width / 2 + 6,
            mobile_narrowed: true,
            show_category: false,
            show_date: false,
            ..self
        }
    }
}

static MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|iPhone|iPad|iPod|webOS|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile agent pattern must compile")
});

/// Whether a User-Agent string belongs to a phone or tablet.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_AGENT.is_match(user_agent)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Weblog Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory holding the posts, relative to this file.
weblog_dir = "weblog"

# Domain used when printing full post URLs.
domain = "localhost"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
# Total width of the rendered text, in columns.
line_width = 72

# Left indent of body text, in columns. Must be smaller than line_width.
prefix_length = 3

# Typographic beautification: curly quotes, em dashes, bullets, asterisms.
# "Off", "All", "Content" (plain text only) or "RSS" (feed only).
beautify = "Off"

# Upper-case post titles and the about header.
capitalize_titles = false

# ---------------------------------------------------------------------------
# Post header
# ---------------------------------------------------------------------------
show_category = true
show_date = true

# Print dates as "5 Mar 2024" instead of "5 March 2024".
shorten_date = false

# ---------------------------------------------------------------------------
# Page furniture
# ---------------------------------------------------------------------------
# Draw a full-width rule under the about text.
show_separator = false

show_copyright = true
show_powered_by = true

# Print a link under each post in listings: "Off", "Short" or "Full".
show_urls = "Off"

# Hide the star that marks selected posts.
hide_selected = true

# ---------------------------------------------------------------------------
# Author
# ---------------------------------------------------------------------------
[author]
name = "Unknown"
email = "no-reply@example.com"
location = ""
# Use \n for line breaks.
about = ""
"##
}
