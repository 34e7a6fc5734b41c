//! Post discovery.
//!
//! Walks the weblog directory once and keeps every `.txt` file as a [`Post`],
//! newest first. Lookups then filter that list:
//!
//! | Lookup | Drafts | Hidden |
//! |--------|--------|--------|
//! | [`Repository::posts`] | no | no |
//! | [`Repository::by_category`] | no | no |
//! | [`Repository::selected`], [`Repository::latest`], [`Repository::random`] | no | no |
//! | [`Repository::search`] | no | no |
//! | [`Repository::find_by_slug`] | no | yes |
//! | [`Repository::find_draft`] | only | yes |

use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{self, SiteConfig};
use crate::post::Post;
use crate::slug::fold_diacritics;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Weblog directory not found: {0}")]
    NotFound(PathBuf),
}

#[derive(Debug)]
pub struct Repository {
    dir: PathBuf,
    posts: Vec<Post>,
}

fn is_post_file(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

impl Repository {
    /// Load every post under `dir`.
    pub fn open(dir: &Path) -> Result<Self, RepositoryError> {
        if !dir.is_dir() {
            return Err(RepositoryError::NotFound(dir.to_path_buf()));
        }

        let mut posts = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_post_file(entry.path()) {
                continue;
            }
            match Post::from_file(entry.path(), dir) {
                Ok(post) => posts.push(post),
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping post");
                }
            }
        }

        // Newest first; same-day posts alphabetically so listings are stable.
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));

        info!(dir = %dir.display(), posts = posts.len(), "loaded weblog");
        Ok(Self {
            dir: dir.to_path_buf(),
            posts,
        })
    }

    /// Load `config.toml` from `root` and the posts of its weblog directory.
    pub fn open_site(root: &Path) -> Result<(SiteConfig, Self), RepositoryError> {
        let site = config::load_config(root)?;
        let repo = Self::open(&root.join(&site.weblog_dir))?;
        Ok((site, repo))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Published posts, newest first.
    pub fn posts(&self) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| !p.is_draft && !p.is_hidden)
            .collect()
    }

    /// Published posts whose category matches `name`, ignoring case.
    ///
    /// `misc` also matches posts stored directly in the weblog directory.
    pub fn by_category(&self, name: &str) -> Vec<&Post> {
        self.posts()
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Any non-draft post with the given slug, hidden ones included.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        let found = self
            .posts
            .iter()
            .filter(|p| !p.is_draft)
            .find(|p| p.slug().is_ok_and(|s| s == slug));
        debug!(slug, found = found.is_some(), "slug lookup");
        found
    }

    pub fn find_draft(&self, slug: &str) -> Option<&Post> {
        self.posts
            .iter()
            .filter(|p| p.is_draft)
            .find(|p| p.slug().is_ok_and(|s| s == slug))
    }

    /// Published posts marked as selected, newest first.
    pub fn selected(&self) -> Vec<&Post> {
        self.posts().into_iter().filter(|p| p.is_selected).collect()
    }

    /// The newest published post.
    pub fn latest(&self) -> Option<&Post> {
        self.posts().first().copied()
    }

    /// Any one published post.
    pub fn random(&self) -> Option<&Post> {
        let posts = self.posts();
        posts.choose(&mut rand::thread_rng()).copied()
    }

    /// Published posts whose title or body contains `query`.
    ///
    /// Case and Latin accents are ignored on both sides, so `cafe` finds
    /// `Café`.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = fold_diacritics(query.trim());
        let found: Vec<&Post> = self
            .posts()
            .into_iter()
            .filter(|p| {
                fold_diacritics(&p.title).contains(&needle)
                    || fold_diacritics(&p.content()).contains(&needle)
            })
            .collect();
        debug!(query, found = found.len(), "search");
        found
    }

    /// Copyright years spanned by the published posts.
    pub fn year_range(&self) -> String {
        year_range(self.posts())
    }
}

/// `"2023-2025"`, `"2025"` for a single year, or `""` without posts.
pub fn year_range<'a>(posts: impl IntoIterator<Item = &'a Post>) -> String {
    use chrono::Datelike;

    let years: Vec<i32> = posts.into_iter().map(|p| p.date.year()).collect();
    match (years.iter().min(), years.iter().max()) {
        (Some(min), Some(max)) if min == max => min.to_string(),
        (Some(min), Some(max)) => format!("{min}-{max}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn fixture_repo() -> (tempfile::TempDir, Repository) {
        let tmp = setup_fixtures();
        date_fixtures(tmp.path());
        let repo = Repository::open(&tmp.path().join("weblog")).unwrap();
        (tmp, repo)
    }

    #[test]
    fn missing_directory_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = Repository::open(&tmp.path().join("nope"));
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn posts_newest_first_without_drafts_or_hidden() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(
            post_titles(&repo.posts()),
            vec!["On Slow Reading", "Best Of", "Lists and Quotes", "First Light"]
        );
    }

    #[test]
    fn non_txt_files_ignored() {
        let (_tmp, repo) = fixture_repo();
        assert!(repo.posts.iter().all(|p| p.path.extension().unwrap() == "txt"));
    }

    #[test]
    fn find_by_slug_includes_hidden() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(repo.find_by_slug("first-light").unwrap().title, "First Light");
        assert!(repo.find_by_slug("private-notes").unwrap().is_hidden);
    }

    #[test]
    fn find_by_slug_skips_drafts() {
        let (_tmp, repo) = fixture_repo();
        assert!(repo.find_by_slug("unfinished").is_none());
        assert!(repo.find_draft("unfinished").unwrap().is_draft);
        assert!(repo.find_draft("first-light").is_none());
    }

    #[test]
    fn category_match_ignores_case() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(post_titles(&repo.by_category("essays")), vec!["On Slow Reading"]);
    }

    #[test]
    fn misc_category_is_top_level() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(
            post_titles(&repo.by_category("misc")),
            vec!["Best Of", "Lists and Quotes", "First Light"]
        );
    }

    #[test]
    fn selected_posts_only() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(post_titles(&repo.selected()), vec!["Best Of"]);
    }

    #[test]
    fn latest_is_newest_published() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(repo.latest().unwrap().title, "On Slow Reading");
    }

    #[test]
    fn random_picks_a_published_post() {
        let (_tmp, repo) = fixture_repo();
        let titles = post_titles(&repo.posts());
        for _ in 0..10 {
            assert!(titles.contains(&repo.random().unwrap().title.as_str()));
        }
    }

    #[test]
    fn empty_repository_has_no_latest_or_random() {
        let tmp = tempfile::TempDir::new().unwrap();
        let repo = Repository::open(tmp.path()).unwrap();
        assert!(repo.latest().is_none());
        assert!(repo.random().is_none());
    }

    #[test]
    fn search_matches_title_and_body() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(post_titles(&repo.search("slow reading")), vec!["On Slow Reading"]);
        assert_eq!(post_titles(&repo.search("PATIENCE")), vec!["On Slow Reading"]);
    }

    #[test]
    fn search_ignores_accents_both_ways() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(post_titles(&repo.search("cafe")), vec!["First Light"]);
        assert_eq!(post_titles(&repo.search("CAFÉ")), vec!["First Light"]);
    }

    #[test]
    fn search_skips_drafts_and_hidden() {
        let (_tmp, repo) = fixture_repo();
        assert!(repo.search("not ready").is_empty());
        assert!(repo.search("reachable by its slug").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Good Post.txt"), "fine").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("Broken.txt"))
            .unwrap();

        let repo = Repository::open(tmp.path()).unwrap();
        assert_eq!(post_titles(&repo.posts()), vec!["Good Post"]);
    }

    #[test]
    fn year_range_spans_published_posts() {
        let (_tmp, repo) = fixture_repo();
        assert_eq!(repo.year_range(), "2023-2025");
        assert_eq!(year_range(repo.by_category("essays")), "2025");
        assert_eq!(year_range(Vec::<&Post>::new()), "");
    }

    #[test]
    fn open_site_uses_configured_directory() {
        let tmp = setup_fixtures();
        let (site, repo) = Repository::open_site(tmp.path()).unwrap();
        assert_eq!(site.author.name, "Ada Quill");
        assert_eq!(repo.dir(), tmp.path().join("weblog"));
    }
}
