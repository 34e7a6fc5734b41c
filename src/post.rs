//! Posts as they live on disk.
//!
//! A post is a `.txt` file somewhere under the weblog directory. Everything
//! about it comes from its path and modification time:
//!
//! ```text
//! weblog/
//! ├── First Light.txt           # category "Misc", title "First Light"
//! ├── *Best Of.txt              # selected post
//! ├── essays/
//! │   └── On Slow Reading.txt   # category "Essays"
//! ├── .private/
//! │   └── Notes.txt             # hidden: reachable by slug, never listed
//! └── drafts/
//!     └── Unfinished.txt        # draft: only reachable as a draft
//! ```

use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

use crate::config::{Beautify, SiteConfig};
use crate::slug::{SlugError, slugify};

/// Category of posts stored directly in the weblog directory.
pub const DEFAULT_CATEGORY: &str = "Misc";
/// Directory name that marks posts as drafts.
pub const DRAFTS_DIR: &str = "drafts";

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// File stem without the selection marker or leading dots.
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
    pub path: PathBuf,
    pub is_draft: bool,
    pub is_hidden: bool,
    /// File stem started with `*`.
    pub is_selected: bool,
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Post {
    /// Describe the post file at `path`, which must lie under `weblog_dir`.
    pub fn from_file(path: &Path, weblog_dir: &Path) -> std::io::Result<Self> {
        let modified = fs::metadata(path)?.modified()?;
        let date = DateTime::<Local>::from(modified).date_naive();

        let relative = path.strip_prefix(weblog_dir).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let category = match parts.as_slice() {
            [dir, _, ..] => ucfirst(dir.trim_start_matches('.')),
            _ => DEFAULT_CATEGORY.to_string(),
        };

        Ok(Self {
            title: stem.trim_start_matches(['*', '.']).to_string(),
            category,
            date,
            path: path.to_path_buf(),
            is_draft: parts
                .iter()
                .take(parts.len().saturating_sub(1))
                .any(|p| p == DRAFTS_DIR),
            is_hidden: parts.iter().any(|p| p.starts_with('.')),
            is_selected: stem.starts_with('*'),
        })
    }

    /// Title as shown in headers, with a star on selected posts unless the
    /// site hides selection.
    pub fn display_title(&self, site: &SiteConfig) -> String {
        if !self.is_selected || site.hide_selected {
            return self.title.clone();
        }
        let star = if site.beautify == Beautify::Off { "*" } else { "★" };
        format!("{} {star}", self.title)
    }

    pub fn slug(&self) -> Result<String, SlugError> {
        slugify(&self.title)
    }

    /// The raw post body.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD. A file that can no longer be
    /// read renders as an empty post.
    pub fn content(&self) -> String {
        match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read post");
                String::new()
            }
        }
    }
}
