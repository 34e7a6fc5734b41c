//! Fixed-width layout primitives.
//!
//! Everything here measures in terminal columns ([`text_width`]) and pads with
//! ASCII spaces. Padding never goes negative: text that is wider than its slot
//! is emitted as-is and overflows to the right.
//!
//! ## Post Header
//!
//! ```text
//! Essays                    On Slow Reading                   12 March 2025
//! |---- 20 columns ----|---------- title column -----------|---- 20 ----|
//! ```
//!
//! Titles longer than [`TITLE_WRAP_WIDTH`] are wrapped and every continuation
//! line is centered in the title column, with the side columns left blank.
//!
//! ## Mobile Bias
//!
//! Narrowed layouts shift two things to the right to keep odd widths looking
//! centered on small screens: the header title by two columns when the title
//! column is odd, and the about bar name by one column when the name is odd.

use chrono::NaiveDate;

use crate::config::RenderConfig;
use crate::typography::{self, ASTERISM};
use crate::wrap::{text_width, wrap};

/// Titles wider than this are wrapped inside the header.
pub const TITLE_WRAP_WIDTH: usize = 32;
/// Width of the category and date columns of the post header.
pub const FIELD_WIDTH: usize = 20;
/// Single-line quotes wider than this are wrapped before centering.
pub const QUOTE_MAX_WIDTH: usize = 56;
pub const NARROW_QUOTE_MAX_WIDTH: usize = 30;
/// Length of the centered section separator.
pub const RULE_LENGTH: usize = 5;

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{text}{}", spaces(width.saturating_sub(text_width(text))))
}

fn pad_left(text: &str, width: usize) -> String {
    format!("{}{text}", spaces(width.saturating_sub(text_width(text))))
}

fn capitalize(text: String, config: &RenderConfig) -> String {
    if config.capitalize_titles {
        text.to_uppercase()
    } else {
        text
    }
}

/// Left-pad `text` so that it sits centered in `width` columns.
///
/// The odd column, if any, goes to the right. Text wider than `width` is
/// returned unchanged.
pub fn center(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len > width {
        return text.to_string();
    }
    format!("{}{text}", spaces((width - len) / 2))
}

/// A run of `length` em dashes.
pub fn rule(length: usize) -> String {
    typography::EM_DASH.to_string().repeat(length)
}

/// Header date: `12 March 2025`, or `12 Mar 2025` when shortened.
pub fn format_date(date: NaiveDate, short: bool) -> String {
    let pattern = if short { "%-d %b %Y" } else { "%-d %B %Y" };
    date.format(pattern).to_string()
}

/// Post header bar: category on the left, title centered, date on the right.
///
/// A title starting with `~` is untitled and shows as a section break.
pub fn header(
    title: &str,
    category: &str,
    date: Option<NaiveDate>,
    config: &RenderConfig,
) -> String {
    let mut title = if title.starts_with('~') {
        "* * *".to_string()
    } else {
        title.to_string()
    };
    if config.beautify.applies_to_content() {
        title = typography::beautify(&title);
    }

    let category = if config.show_category { category } else { "" };
    let date = date
        .filter(|_| config.show_date)
        .map(|d| format_date(d, config.shorten_date))
        .unwrap_or_default();

    let category_width = if category.is_empty() { 0 } else { FIELD_WIDTH };
    let date_width = if date.is_empty() { 0 } else { FIELD_WIDTH };
    let title_width = config
        .line_width
        .saturating_sub(category_width + date_width)
        .max(1);

    let wrap_at = TITLE_WRAP_WIDTH.min(title_width);
    let title_lines: Vec<String> = if text_width(&title) > wrap_at {
        wrap(&title, wrap_at, 0)
            .lines()
            .map(String::from)
            .collect()
    } else {
        vec![title]
    };

    let lines: Vec<String> = title_lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let len = text_width(line);
            let mut left = title_width.saturating_sub(len) / 2;
            let right = title_width.saturating_sub(len + left);
            if config.mobile_narrowed && title_width % 2 != 0 {
                left += 2;
            }
            let column = format!("{}{line}{}", spaces(left), spaces(right));

            let (category, date) = if i == 0 {
                (category, date.as_str())
            } else {
                ("", "")
            };
            let mut out = String::new();
            if category_width > 0 {
                out.push_str(&pad_right(category, category_width));
            }
            out.push_str(&column);
            if date_width > 0 {
                out.push_str(&pad_left(date, date_width));
            }
            out.trim_end().to_string()
        })
        .collect();

    capitalize(lines.join("\n"), config)
}

/// Three-field bar: `left` flush left, `middle` centered, `right` flush right.
///
/// Narrowed layouts drop the side fields.
pub fn about_bar(left: &str, middle: &str, right: &str, config: &RenderConfig) -> String {
    let (left, right) = if config.mobile_narrowed {
        ("", "")
    } else {
        (left, right)
    };
    let width = config.line_width;
    let middle_width = text_width(middle);

    let mut space_left = width.saturating_sub(middle_width) / 2;
    let space_right = width.saturating_sub(space_left + middle_width);
    if config.mobile_narrowed && middle_width % 2 != 0 {
        space_left += 1;
    }

    let bar = format!(
        "{left}{}{middle}{}{right}",
        spaces(space_left.saturating_sub(text_width(left))),
        spaces(space_right.saturating_sub(text_width(right))),
    );
    capitalize(bar.trim_end().to_string(), config)
}

/// A one-line quote, in curly quote marks and centered on the page.
pub fn single_line_quote(text: &str, config: &RenderConfig) -> String {
    let quoted = format!("“{}”", text.trim());
    let max = if config.mobile_narrowed {
        NARROW_QUOTE_MAX_WIDTH
    } else {
        QUOTE_MAX_WIDTH
    }
    .min(config.line_width);

    if text_width(&quoted) <= max {
        return center(&quoted, config.line_width);
    }
    wrap(&quoted, max, 0)
        .lines()
        .map(|line| center(line, config.line_width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A quote block with a `|` rule down its left side.
pub fn multi_line_quote(lines: &[String], config: &RenderConfig) -> String {
    let prefix = format!("{}|  ", spaces(config.prefix_length));
    let body_width = config
        .line_width
        .saturating_sub(config.prefix_length + 4)
        .max(1);

    lines
        .iter()
        .flat_map(|line| {
            wrap(line, body_width, 0)
                .split('\n')
                .map(|l| format!("{prefix}{l}").trim_end().to_string())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn digits(numeral: &str) -> usize {
    numeral.chars().count().max(1)
}

/// Marker column for item `numeral` of an ordered list with `total` items.
///
/// Numerals are followed by enough spaces that every item of a list whose
/// numbers have as many digits as its item count starts its text in the
/// same column, and never fewer than one.
pub fn ordered_marker(numeral: &str, total: usize) -> String {
    let max_digits = total.max(1).to_string().len();
    let gap = (max_digits + 2).saturating_sub(digits(numeral)).max(1);
    format!("{numeral}.{}", spaces(gap))
}

/// Marker column for an unordered list item.
pub fn bullet_marker(source_marker: &str, config: &RenderConfig) -> String {
    let bullet = if config.beautify.applies_to_content() {
        "•"
    } else {
        source_marker
    };
    format!("{bullet}  ")
}

/// Lay out one list item: `marker` on the first line, `text` and each of the
/// `continuation` lines wrapped under a hanging indent of the marker's width.
pub fn list_item(
    marker: &str,
    text: &str,
    continuation: &[String],
    config: &RenderConfig,
) -> String {
    let hang = config.prefix_length + text_width(marker);
    let hang_spaces = spaces(hang);

    let first = wrap(text, config.line_width, hang);
    let first = match first.strip_prefix(&hang_spaces) {
        Some(rest) => format!("{}{marker}{rest}", spaces(config.prefix_length)),
        None => format!("{}{marker}{}", spaces(config.prefix_length), first.trim_start()),
    };

    std::iter::once(first.trim_end().to_string())
        .chain(
            continuation
                .iter()
                .map(|line| wrap(line, config.line_width, hang)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Centered section-break glyph.
pub fn asterism(config: &RenderConfig) -> String {
    let glyph = if config.beautify.applies_to_content() {
        ASTERISM
    } else {
        "* * *"
    };
    center(glyph, config.line_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Beautify;
    use pretty_assertions::assert_eq;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    // =========================================================================
    // center / rule
    // =========================================================================

    #[test]
    fn center_floors_left_padding() {
        assert_eq!(center("Hi", 10), "    Hi");
        assert_eq!(center("Hi", 11), "    Hi");
    }

    #[test]
    fn center_wider_than_width_unchanged() {
        assert_eq!(center("overflowing", 4), "overflowing");
    }

    #[test]
    fn center_counts_columns_not_bytes() {
        assert_eq!(center("é", 5), "  é");
    }

    #[test]
    fn rule_is_em_dashes() {
        assert_eq!(rule(RULE_LENGTH), "—————");
    }

    // =========================================================================
    // header
    // =========================================================================

    #[test]
    fn header_three_columns() {
        let out = header("Title", "Essays", Some(date()), &config());
        assert_eq!(out.len(), 72);
        assert!(out.starts_with("Essays              "));
        assert!(out.ends_with("12 March 2025"));
        // title column is 32 wide: (32 - 5) / 2 = 13
        assert_eq!(&out[20..38], "             Title");
    }

    #[test]
    fn header_without_category_or_date() {
        let cfg = RenderConfig {
            show_category: false,
            show_date: false,
            ..config()
        };
        let out = header("Title", "Essays", Some(date()), &cfg);
        assert_eq!(out, center("Title", 72));
    }

    #[test]
    fn header_empty_category_gives_width_to_title() {
        let out = header("Title", "", Some(date()), &config());
        assert!(out.starts_with(&spaces(23)));
        assert!(out.ends_with("12 March 2025"));
        assert_eq!(text_width(&out), 72);
    }

    #[test]
    fn header_short_date() {
        let cfg = RenderConfig {
            shorten_date: true,
            ..config()
        };
        assert!(header("T", "C", Some(date()), &cfg).ends_with("12 Mar 2025"));
    }

    #[test]
    fn header_long_title_wraps_under_title_column() {
        let title = "A Considerably Longer Title Than The Column Allows";
        let out = header(title, "Essays", Some(date()), &config());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Essays"));
        assert!(lines[0].ends_with("12 March 2025"));
        // 32-column title span starting at column 20; "The Column Allows" is
        // 17 wide, so it sits (32 - 17) / 2 = 7 columns into the span.
        assert_eq!(
            lines[0],
            format!("Essays{}A Considerably Longer Title Than       12 March 2025", spaces(14))
        );
        assert_eq!(lines[1], format!("{}The Column Allows", spaces(FIELD_WIDTH + 7)));
    }

    #[test]
    fn header_title_wraps_to_a_narrow_column() {
        // 50 - 2 * 20 leaves a 10-column title span.
        let cfg = RenderConfig::new(50, 3).unwrap();
        let out = header("Quiet Morning Notes", "Essays", Some(date()), &cfg);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("Essays{}Quiet{}12 March 2025", spaces(16), spaces(10)),
                format!("{}Morning", spaces(21)),
                format!("{}Notes", spaces(22)),
            ]
        );
        assert!(lines.iter().all(|l| text_width(l) <= 50));
    }

    #[test]
    fn header_tilde_title_is_section_break() {
        let cfg = RenderConfig {
            show_category: false,
            show_date: false,
            ..config()
        };
        assert_eq!(header("~untitled", "", None, &cfg).trim(), "* * *");
        let cfg = RenderConfig {
            beautify: Beautify::Content,
            ..cfg
        };
        assert_eq!(header("~untitled", "", None, &cfg).trim(), "⁂");
    }

    #[test]
    fn header_capitalized() {
        let cfg = RenderConfig {
            capitalize_titles: true,
            ..config()
        };
        let out = header("Quiet", "Essays", Some(date()), &cfg);
        assert!(out.starts_with("ESSAYS"));
        assert!(out.contains("QUIET"));
        assert!(out.ends_with("12 MARCH 2025"));
    }

    #[test]
    fn header_mobile_odd_width_biased_right() {
        // 72 / 2 + 6 = 42 columns; category and date are dropped.
        let even = config().narrowed();
        assert_eq!(header("Abc", "Essays", Some(date()), &even), center("Abc", 42));

        let odd = RenderConfig::new(74, 3).unwrap().narrowed();
        assert_eq!(odd.line_width, 43);
        assert_eq!(header("Abc", "", None, &odd), format!("{}Abc", spaces(22)));
    }

    // =========================================================================
    // about bar
    // =========================================================================

    #[test]
    fn about_bar_fields_at_margins() {
        let cfg = RenderConfig::new(30, 3).unwrap();
        assert_eq!(
            about_bar("About", "Ada", "Berlin", &cfg),
            "About        Ada        Berlin"
        );
    }

    #[test]
    fn about_bar_mobile_drops_sides_and_biases_odd_name() {
        let cfg = RenderConfig::new(28, 3).unwrap().narrowed();
        assert_eq!(cfg.line_width, 20);
        assert_eq!(about_bar("About", "Ada", "Berlin", &cfg), format!("{}Ada", spaces(9)));
    }

    #[test]
    fn about_bar_overlong_fields_do_not_panic() {
        let cfg = RenderConfig::new(10, 3).unwrap();
        let out = about_bar("About", "A Very Long Name", "Somewhere", &cfg);
        assert!(out.contains("A Very Long Name"));
    }

    // =========================================================================
    // quotes
    // =========================================================================

    #[test]
    fn single_line_quote_centered_in_curly_marks() {
        let cfg = RenderConfig::new(20, 3).unwrap();
        assert_eq!(single_line_quote("one liner", &cfg), "    “one liner”");
    }

    #[test]
    fn long_single_line_quote_wrapped_and_each_line_centered() {
        let text = "Sometimes a single quoted line runs on and on well past the comfortable width";
        let out = single_line_quote(text, &config());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line.trim()) <= QUOTE_MAX_WIDTH);
            let left = text_width(line) - text_width(line.trim_start());
            assert_eq!(left, (72 - text_width(line.trim_start())) / 2);
        }
        assert!(lines[0].trim_start().starts_with('“'));
        assert!(lines.last().unwrap().ends_with('”'));
    }

    #[test]
    fn narrow_quote_limit() {
        let cfg = config().narrowed();
        let out = single_line_quote("a quote that is a little over thirty columns", &cfg);
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn multi_line_quote_has_bar_prefix() {
        let cfg = RenderConfig::new(20, 2).unwrap();
        let lines = vec!["first line of it".to_string(), "second".to_string()];
        assert_eq!(
            multi_line_quote(&lines, &cfg),
            "  |  first line of\n  |  it\n  |  second"
        );
    }

    // =========================================================================
    // lists
    // =========================================================================

    #[test]
    fn ordered_markers_align_on_item_count() {
        let cfg = RenderConfig::new(40, 0).unwrap();
        let rendered: Vec<String> = [("1", "Apple"), ("2", "Banana"), ("10", "Cherry")]
            .iter()
            .map(|(n, text)| list_item(&ordered_marker(n, 3), text, &[], &cfg))
            .collect();
        assert_eq!(rendered, vec!["1.  Apple", "2.  Banana", "10. Cherry"]);
    }

    #[test]
    fn ordered_marker_widens_for_two_digit_counts() {
        assert_eq!(ordered_marker("1", 12), "1.   ");
        assert_eq!(ordered_marker("12", 12), "12.  ");
    }

    #[test]
    fn ordered_marker_never_touches_text() {
        assert_eq!(ordered_marker("100", 3), "100. ");
    }

    #[test]
    fn bullet_follows_beautify() {
        assert_eq!(bullet_marker("-", &config()), "-  ");
        let cfg = RenderConfig {
            beautify: Beautify::All,
            ..config()
        };
        assert_eq!(bullet_marker("-", &cfg), "•  ");
    }

    #[test]
    fn list_item_wraps_under_hanging_indent() {
        let cfg = RenderConfig::new(20, 2).unwrap();
        assert_eq!(
            list_item("-  ", "several words that wrap", &[], &cfg),
            "  -  several words\n     that wrap"
        );
    }

    #[test]
    fn list_item_continuation_lines_have_blank_marker() {
        let cfg = RenderConfig::new(30, 0).unwrap();
        assert_eq!(
            list_item("1.  ", "item", &["more about it".to_string()], &cfg),
            "1.  item\n    more about it"
        );
    }

    #[test]
    fn asterism_glyph_follows_beautify() {
        let cfg = RenderConfig::new(11, 0).unwrap();
        assert_eq!(asterism(&cfg), "   * * *");
        let cfg = RenderConfig {
            beautify: Beautify::Content,
            ..cfg
        };
        assert_eq!(asterism(&cfg), "     ⁂");
    }
}
