//! Shared test utilities for the weblog test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! date_fixtures(tmp.path());
//! let repo = Repository::open(&tmp.path().join("weblog")).unwrap();
//! assert_eq!(post_titles(&repo.posts())[0], "On Slow Reading");
//! ```

use chrono::{Local, NaiveDate};
use std::fs::File;
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempDir;

use crate::post::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Publication dates of the fixture posts, relative to the site root.
pub const FIXTURE_DATES: &[(&str, (i32, u32, u32))] = &[
    ("weblog/First Light.txt", (2023, 4, 2)),
    ("weblog/Lists and Quotes.txt", (2024, 6, 10)),
    ("weblog/*Best Of.txt", (2024, 11, 20)),
    ("weblog/essays/On Slow Reading.txt", (2025, 3, 12)),
    ("weblog/.private/Private Notes.txt", (2025, 1, 1)),
    ("weblog/drafts/Unfinished.txt", (2025, 5, 1)),
];

/// Set a file's modification time to noon local time on the given day.
pub fn set_date(path: &Path, year: i32, month: u32, day: u32) {
    let noon = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .single()
        .unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::from(noon))
        .unwrap();
}

/// Give every fixture post its [`FIXTURE_DATES`] date.
///
/// Copies carry the time of the copy, so tests that care about order call
/// this after [`setup_fixtures`].
pub fn date_fixtures(root: &Path) {
    for (relative, (y, m, d)) in FIXTURE_DATES {
        set_date(&root.join(relative), *y, *m, *d);
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Titles of `posts` in order.
pub fn post_titles<'a>(posts: &[&'a Post]) -> Vec<&'a str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}
