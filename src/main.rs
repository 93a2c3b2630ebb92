//! octoview CLI - GitHub user activity dashboard

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use octoview::{
    data::TimePeriod,
    github::GitHubClient,
    html::{self, DashboardConfig},
    session::SessionStore,
    view,
};

/// octoview: GitHub profile, repository, and activity dashboards
#[derive(Parser, Debug)]
#[command(name = "octoview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a user and generate an HTML dashboard
    Dashboard(DashboardArgs),

    /// Print summary statistics and the aggregated series
    Summary(SummaryArgs),

    /// Print a page of the user's recent commits
    Commits(CommitsArgs),
}

#[derive(Parser, Debug)]
struct DashboardArgs {
    /// GitHub username to look up
    username: String,

    /// Time window for the activity chart
    #[arg(short, long, value_enum, default_value = "90d")]
    period: TimePeriod,

    /// Output directory for the dashboard
    #[arg(short, long, default_value = "dashboard")]
    output_dir: PathBuf,

    /// Dashboard title (defaults to the username)
    #[arg(long)]
    title: Option<String>,

    /// GitHub token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Override the GitHub API base URL
    #[arg(long)]
    api_base: Option<String>,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// GitHub username to look up
    username: String,

    /// Time window to summarize
    #[arg(short, long, value_enum, default_value = "90d")]
    period: TimePeriod,

    /// GitHub token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Override the GitHub API base URL
    #[arg(long)]
    api_base: Option<String>,
}

#[derive(Parser, Debug)]
struct CommitsArgs {
    /// GitHub username to look up
    username: String,

    /// Time window to filter commits
    #[arg(short, long, value_enum, default_value = "90d")]
    period: TimePeriod,

    /// Page of the commit list (10 per page, zero-based)
    #[arg(long, default_value = "0")]
    page: usize,

    /// GitHub token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Override the GitHub API base URL
    #[arg(long)]
    api_base: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Dashboard(args) => dashboard_command(args),
        Commands::Summary(args) => summary_command(args),
        Commands::Commits(args) => commits_command(args),
    }
}

/// Build a client and run a search, surfacing the user-facing error message
fn search(
    username: &str,
    token: Option<String>,
    api_base: Option<&str>,
) -> Result<octoview::session::Session> {
    let client = match api_base {
        Some(base) => GitHubClient::with_api_base(token, base),
        None => GitHubClient::new(token),
    }
    .with_context(|| "Failed to build GitHub client")?;

    let mut store = SessionStore::new();
    let mut rng = rand::thread_rng();
    store.search(&client, username, &mut rng, Utc::now());

    if let Some(message) = store.error() {
        anyhow::bail!("{}", message);
    }
    store
        .session()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Search produced no session"))
}

/// Generate the HTML dashboard
fn dashboard_command(args: DashboardArgs) -> Result<()> {
    info!("Building dashboard for '{}'", args.username);

    let session = search(&args.username, args.token, args.api_base.as_deref())?;

    let view = view::build_view(
        &session.timeline,
        args.period,
        &session.commits,
        0,
        session.fetched_at,
    );
    let commits = view::filter_commits(&session.commits, args.period, session.fetched_at);

    let config = DashboardConfig {
        title: args
            .title
            .unwrap_or_else(|| format!("{} · GitHub Activity", args.username)),
        output_dir: args.output_dir.to_string_lossy().to_string(),
    };

    let base_path = std::env::current_dir()?;
    html::write_dashboard(&session, &view, &commits, &config, &base_path)
        .with_context(|| "Failed to generate dashboard")?;

    info!(
        "Dashboard written to {:?}",
        base_path.join(&config.output_dir).join("index.html")
    );

    Ok(())
}

/// Print stats and the aggregated series
fn summary_command(args: SummaryArgs) -> Result<()> {
    let session = search(&args.username, args.token, args.api_base.as_deref())?;

    let view = view::build_view(
        &session.timeline,
        args.period,
        &session.commits,
        0,
        session.fetched_at,
    );

    println!("## {} — {}\n", session.profile.login, args.period.label());
    println!("Total contributions: {}", view.stats.total);
    println!("Average per day:     {}", view.stats.avg_per_day);
    println!(
        "Most active:         {} ({})",
        view.stats.most_active_label, view.stats.most_active_value
    );
    println!();

    for point in &view.series {
        println!("  {:>8}  {}", point.label, point.value);
    }

    Ok(())
}

/// Print one page of the filtered commit list
fn commits_command(args: CommitsArgs) -> Result<()> {
    let session = search(&args.username, args.token, args.api_base.as_deref())?;

    let filtered = view::filter_commits(&session.commits, args.period, session.fetched_at);
    let (page, total_pages) = view::paginate(&filtered, args.page, view::COMMIT_PAGE_SIZE);

    if total_pages == 0 {
        println!("No commits in the selected period.");
        return Ok(());
    }

    println!(
        "## Commits for {} — page {} of {}\n",
        session.profile.login,
        args.page + 1,
        total_pages
    );
    for commit in &page {
        println!(
            "  {} {} [{}] {} ({})",
            &commit.id[..commit.id.len().min(7)],
            commit.timestamp.format("%Y-%m-%d"),
            commit.repo,
            commit.message,
            commit.author
        );
    }

    Ok(())
}
