//! URL slugs for post titles.
//!
//! Slugs are lowercase ASCII with single dashes between words:
//! - `"Hello, World!"` → `"hello-world"`
//! - `"Привет мир"` → `"privet-mir"`
//! - `"Café “Noir”"` → `"cafe-noir"`
//! - `".hidden post"` → `"hidden-post"`
//!
//! Cyrillic is transliterated, quote marks vanish without leaving a dash, and
//! common Latin accents are folded to their base letter.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlugError {
    #[error("Title has no characters usable in a slug: {0:?}")]
    Empty(String),
}

fn cyrillic(c: char) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    })
}

fn latin(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'č' | 'ć' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' => "l",
        'ñ' | 'ń' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ß' => "ss",
        'š' | 'ś' => "s",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        _ => return None,
    })
}

/// Lowercase `text` and fold Latin accents to their base letters.
///
/// Used to compare text the way a reader would type it: `"Café"` and
/// `"cafe"` fold to the same string.
pub fn fold_diacritics(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .fold(String::with_capacity(text.len()), |mut out, c| {
            match latin(c) {
                Some(s) => out.push_str(s),
                None => out.push(c),
            }
            out
        })
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '‘' | '’' | '“' | '”' | '«' | '»')
}

/// Build the URL slug for `title`.
pub fn slugify(title: &str) -> Result<String, SlugError> {
    let lowered = title.trim_start_matches('.').to_lowercase();

    let mut ascii = String::with_capacity(lowered.len());
    for c in lowered.chars().filter(|&c| !is_quote(c)) {
        match cyrillic(c).or_else(|| latin(c)) {
            Some(s) => ascii.push_str(s),
            None if c.is_ascii_lowercase() || c.is_ascii_digit() => ascii.push(c),
            None => ascii.push('-'),
        }
    }

    let slug = ascii
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        Err(SlugError::Empty(title.to_string()))
    } else {
        Ok(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_becomes_single_dashes() {
        assert_eq!(slugify("Hello, World!").unwrap(), "hello-world");
    }

    #[test]
    fn cyrillic_transliterated() {
        assert_eq!(slugify("Привет мир").unwrap(), "privet-mir");
        assert_eq!(slugify("Щука и ёж").unwrap(), "schuka-i-yozh");
    }

    #[test]
    fn soft_and_hard_signs_vanish() {
        assert_eq!(slugify("Объём").unwrap(), "obyom");
    }

    #[test]
    fn quotes_dropped_without_dash() {
        assert_eq!(slugify("Don't “Panic”").unwrap(), "dont-panic");
    }

    #[test]
    fn accents_folded() {
        assert_eq!(slugify("Café Über Straße").unwrap(), "cafe-uber-strasse");
    }

    #[test]
    fn leading_dots_stripped() {
        assert_eq!(slugify("..hidden post").unwrap(), "hidden-post");
    }

    #[test]
    fn selected_star_leaves_no_trailing_dash() {
        assert_eq!(slugify("Best Of ★").unwrap(), "best-of");
    }

    #[test]
    fn digits_kept() {
        assert_eq!(slugify("2024 in Review").unwrap(), "2024-in-review");
    }

    #[test]
    fn fold_lowercases_and_strips_accents() {
        assert_eq!(fold_diacritics("Café CRÈME"), "cafe creme");
        assert_eq!(fold_diacritics("Привет"), "привет");
    }

    #[test]
    fn nothing_usable_is_error() {
        assert_eq!(slugify("★ ★"), Err(SlugError::Empty("★ ★".to_string())));
        assert!(slugify("").is_err());
    }
}
