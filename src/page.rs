//! Whole plain-text pages.
//!
//! Page furniture around rendered bodies. Spacing between parts is a fixed
//! number of blank lines:
//!
//! ```text
//! (4 blank lines)
//! About                     Ada Quill                       Lisbon
//! (3 blank lines)
//!    About text...
//! (4 blank lines, or a full-width rule when show_separator is on)
//! Essays              On Slow Reading              12 March 2025
//! (3 blank lines)
//!    Post body...
//! (4 blank lines between posts)
//!            Copyright (c) 2023-2025 ada@example.org
//!
//!                  Powered by Weblog v1.18.8
//! ```

use tracing::warn;

use crate::config::{RenderConfig, ShowUrls, SiteConfig};
use crate::layout;
use crate::plain;
use crate::post::Post;
use crate::repository::year_range;

const POST_GAP: &str = "\n\n\n\n";

/// Absolute or site-relative link to `post`, per `show_urls`.
pub fn post_url(post: &Post, site: &SiteConfig) -> Option<String> {
    if site.show_urls == ShowUrls::Off {
        return None;
    }
    let slug = match post.slug() {
        Ok(slug) => slug,
        Err(err) => {
            warn!(title = %post.title, error = %err, "post has no usable slug");
            return None;
        }
    };
    Some(match site.show_urls {
        ShowUrls::Full => format!("{}/{slug}/", site.url()),
        _ => format!("/{slug}"),
    })
}

/// Header, body and optional URL line of one post.
pub fn post(post: &Post, site: &SiteConfig, config: &RenderConfig) -> String {
    let header = layout::header(
        &post.display_title(site),
        &post.category,
        Some(post.date),
        config,
    );
    let mut out = format!("{header}\n\n\n{}", plain::render(&post.content(), config));
    if let Some(url) = post_url(post, site) {
        out.push_str(&format!("\n   {url}\n\n"));
    }
    out
}

/// A single post on its own page, with the footer for its year.
pub fn full_post(p: &Post, site: &SiteConfig, config: &RenderConfig) -> String {
    let year = year_range([p]);
    format!(
        "{POST_GAP}{}{}",
        post(p, site, config),
        footer(&year, site, config)
    )
}

/// Posts one after another.
pub fn listing(posts: &[&Post], site: &SiteConfig, config: &RenderConfig) -> String {
    posts
        .iter()
        .map(|p| post(p, site, config))
        .collect::<Vec<_>>()
        .join(POST_GAP)
}

/// A page of several posts (a category, the selection, search results)
/// with a footer spanning their years.
pub fn category(posts: &[&Post], site: &SiteConfig, config: &RenderConfig) -> String {
    format!(
        "{POST_GAP}{}{}",
        listing(posts, site, config),
        footer(&year_range(posts.iter().copied()), site, config)
    )
}

/// The about bar and about text that open the home page.
pub fn about(site: &SiteConfig, config: &RenderConfig) -> String {
    let author = &site.author;
    let bar = layout::about_bar("About", &author.name, &author.location, config);
    let text = plain::render(&author.about_text(), config);

    let tail = if site.show_separator {
        let indent = if config.mobile_narrowed {
            config.prefix_length
        } else {
            0
        };
        format!(
            "\n\n\n{}{}\n\n\n\n\n",
            " ".repeat(indent),
            layout::rule(config.line_width.saturating_sub(indent))
        )
    } else {
        POST_GAP.to_string()
    };

    format!("{POST_GAP}{bar}\n\n\n{}\n{tail}", text.trim_end())
}

/// Home page: about section, every published post, footer.
pub fn home(posts: &[&Post], site: &SiteConfig, config: &RenderConfig) -> String {
    format!(
        "{}{}{}",
        about(site, config),
        listing(posts, site, config),
        footer(&year_range(posts.iter().copied()), site, config)
    )
}

/// Copyright and "Powered by" lines, each centered.
pub fn footer(years: &str, site: &SiteConfig, config: &RenderConfig) -> String {
    let mut out = String::from(if site.show_powered_by {
        "\n\n\n\n"
    } else {
        "\n\n\n"
    });
    if !site.show_copyright {
        return out;
    }

    let copyright = format!("Copyright (c) {years} {}", site.author.information());
    out.push_str(&layout::center(&copyright, config.line_width));
    if site.show_powered_by {
        out.push_str("\n\n");
        out.push_str(&layout::center(
            &format!("Powered by Weblog v{}", env!("CARGO_PKG_VERSION")),
            config.line_width,
        ));
    }
    out.push_str("\n\n\n");
    out
}
