//! Typographic beautification.
//!
//! A one-way pass of plain string substitutions turning typewriter
//! punctuation into typeset punctuation. Order matters: quotes are curled
//! before dashes so that `"hi" - ok` keeps its spaced dash.
//!
//! ```text
//! "quoted"   →  “quoted”
//! a - b      →  a — b
//! it's       →  it’s
//! * * *      →  ⁂
//! -dialogue  →  —dialogue   (at the start of a line)
//! ```

use regex::Regex;
use std::sync::LazyLock;

pub const ASTERISM: &str = "⁂";
pub const EM_DASH: char = '—';

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("quote pattern must compile"));

/// Apply every substitution to `text`.
pub fn beautify(text: &str) -> String {
    let text = DOUBLE_QUOTED.replace_all(text, "“$1”");
    let text = text
        .replace(" - ", " — ")
        .replace(" -", " —")
        .replace('\'', "’")
        .replace("***", ASTERISM)
        .replace("* * *", ASTERISM);

    text.split('\n')
        .map(|line| match line.strip_prefix('-') {
            Some(rest) => format!("{EM_DASH}{rest}"),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Undo the substitutions that would corrupt code snippets.
pub fn plainify(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '“' | '”' => '"',
            '‘' | '’' => '\'',
            EM_DASH => '-',
            other => other,
        })
        .collect()
}
