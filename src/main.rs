use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use weblog::config::{self, RenderConfig, SiteConfig};
use weblog::repository::Repository;
use weblog::{html, output, page, plain};

fn version_string() -> &'static str {
    let hash = env!("WEBLOG_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "weblog")]
#[command(about = "Plain-text weblog publisher")]
#[command(long_about = "\
Plain-text weblog publisher

Posts are .txt files. The file name is the title, the first directory is the
category, and the modification time is the publication date.

Site structure:

  site/
  ├── config.toml                  # Site config (optional)
  └── weblog/
      ├── First Light.txt          # Category \"Misc\"
      ├── *Best Of.txt             # Leading * marks a selected post
      ├── essays/
      │   └── On Slow Reading.txt  # Category \"Essays\"
      ├── .private/                # Dot-prefixed = hidden from listings
      └── drafts/                  # Only reachable with 'weblog draft'

Run 'weblog gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root containing config.toml and the weblog directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Lay out pages for a phone screen
    #[arg(long, global = true, conflicts_with = "user_agent")]
    mobile: bool,

    /// Lay out pages for the device this User-Agent belongs to
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List published posts, newest first
    List,
    /// Render one post by slug
    Post { slug: String },
    /// Render one draft by slug
    Draft { slug: String },
    /// Render the home page: about section and every post
    Home,
    /// Render every post in a category
    Category { name: String },
    /// Render every selected post
    Selected,
    /// Render the newest post
    Latest,
    /// Render one post picked at random
    Random,
    /// Render every post whose title or text contains the query
    Search { query: String },
    /// Print the feed title and HTML description of one post
    Rss { slug: String },
    /// Render any text file as a post body
    Render { file: PathBuf },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered pages on stdout stay clean.
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mobile = cli.mobile
        || cli
            .user_agent
            .as_deref()
            .is_some_and(config::is_mobile_user_agent);

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Render { file } => {
            let site = config::load_config(&cli.root)?;
            let render_config = site.render_config(mobile)?;
            let body = std::fs::read_to_string(&file)?;
            print!("{}", plain::render(&body, &render_config));
        }
        Command::List => {
            let (site, repo, _) = open_site(&cli.root, mobile)?;
            output::print_post_list(&repo.posts(), &site, repo.dir());
        }
        Command::Post { slug } => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let post = repo
                .find_by_slug(&slug)
                .ok_or_else(|| format!("No post with slug '{slug}'"))?;
            print!("{}", page::full_post(post, &site, &render_config));
        }
        Command::Draft { slug } => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let post = repo
                .find_draft(&slug)
                .ok_or_else(|| format!("No draft with slug '{slug}'"))?;
            print!("{}", page::full_post(post, &site, &render_config));
        }
        Command::Home => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            print!("{}", page::home(&repo.posts(), &site, &render_config));
        }
        Command::Category { name } => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let posts = repo.by_category(&name);
            if posts.is_empty() {
                return Err(format!("No posts in category '{name}'").into());
            }
            print!("{}", page::category(&posts, &site, &render_config));
        }
        Command::Selected => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let posts = repo.selected();
            if posts.is_empty() {
                return Err("No selected posts".into());
            }
            print!("{}", page::category(&posts, &site, &render_config));
        }
        Command::Latest => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let post = repo.latest().ok_or("No posts")?;
            print!("{}", page::full_post(post, &site, &render_config));
        }
        Command::Random => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let post = repo.random().ok_or("No posts")?;
            print!("{}", page::full_post(post, &site, &render_config));
        }
        Command::Search { query } => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let posts = repo.search(&query);
            if posts.is_empty() {
                return Err(format!("No posts match '{query}'").into());
            }
            print!("{}", page::category(&posts, &site, &render_config));
        }
        Command::Rss { slug } => {
            let (site, repo, render_config) = open_site(&cli.root, mobile)?;
            let post = repo
                .find_by_slug(&slug)
                .ok_or_else(|| format!("No post with slug '{slug}'"))?;
            println!("{}", html::feed_title(&post.display_title(&site), &render_config));
            println!(
                "{}",
                html::render_feed_description(&post.content(), &render_config)
            );
        }
    }

    Ok(())
}

/// Load config and posts from the site root.
fn open_site(
    root: &Path,
    mobile: bool,
) -> Result<(SiteConfig, Repository, RenderConfig), Box<dyn std::error::Error>> {
    let (site, repo) = Repository::open_site(root)?;
    let render_config = site.render_config(mobile)?;
    Ok((site, repo, render_config))
}
