use clap::{Parser, Subcommand};
use readme_pulse::config::{COMMIT_MESSAGE, Config};
use readme_pulse::{github, output, publish, render, section, snapshot};
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // One-time leak while building the CLI; clap wants 'static.
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "readme-pulse")]
#[command(about = "Refresh a GitHub profile README with generated statistics images")]
#[command(long_about = "\
Refresh a GitHub profile README with generated statistics images

Run from the checkout of your profile repository (the repo named after your
account). Each run fetches your profile and repository languages, renders a
bar chart and a summary card into the asset directory, rewrites the
marker-delimited section of README.md, and commits and pushes if anything
changed.

The README keeps a single tool-owned section:

  <!-- STATS:START -->
  ...generated images and stats bullets...
  <!-- STATS:END -->

Everything outside the markers is yours and is never touched. Without a
token, API requests run against the anonymous rate limit; set GITHUB_TOKEN
for accounts with many repositories.")]
#[command(version = version_string())]
struct Cli {
    /// GitHub login to fetch stats for
    #[arg(long, env = "GH_USERNAME", global = true, default_value = "octocat")]
    username: String,

    /// Profile repository name (defaults to the username)
    #[arg(long, env = "GH_REPO", global = true)]
    repo: Option<String>,

    /// API token for authenticated requests and HTTPS pushes
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// README file to update
    #[arg(long, default_value = "README.md", global = true)]
    readme: PathBuf,

    /// Directory for generated images
    #[arg(long, default_value = "assets/stats", global = true)]
    asset_dir: PathBuf,

    /// Directory for intermediate files (snapshot, clone scratch)
    #[arg(long, default_value = ".readme-pulse-temp", global = true)]
    temp_dir: PathBuf,

    /// Number of languages on the bar chart
    #[arg(long, default_value_t = 8, global = true)]
    top_n: usize,

    /// Clone non-fork repositories and count their lines of code
    #[arg(long, global = true)]
    count_lines: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch profile and language data into the snapshot
    Fetch,
    /// Render the chart and card images from the snapshot
    Render,
    /// Splice the stats section into the README
    Update,
    /// Stage, commit, and push if the working tree changed
    Publish,
    /// Run the full pipeline: fetch → render → update → publish
    Run,
    /// Print the would-be README section without touching anything
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config {
        repo: cli.repo.clone().unwrap_or_else(|| cli.username.clone()),
        username: cli.username,
        token: cli.token,
        readme_path: cli.readme,
        asset_dir: cli.asset_dir,
        temp_dir: cli.temp_dir,
        top_n: cli.top_n,
        count_lines: cli.count_lines,
    };

    match cli.command {
        Command::Fetch => {
            fetch(&config)?;
        }
        Command::Render => {
            let snap = snapshot::StatsSnapshot::load(&config.snapshot_path())?;
            let paths = render::render_all(&config, &snap)?;
            output::print_lines(&output::format_render_output(&paths));
        }
        Command::Update => {
            let snap = snapshot::StatsSnapshot::load(&config.snapshot_path())?;
            let outcome = section::update_readme(&config, &snap)?;
            output::print_lines(&output::format_update_output(&outcome, &config.readme_path));
        }
        Command::Publish => {
            let outcome =
                publish::commit_and_push(std::path::Path::new("."), COMMIT_MESSAGE, config.token.as_deref())?;
            output::print_lines(&output::format_publish_output(&outcome));
        }
        Command::Run => {
            println!("==> Stage 1: Fetching {}", config.username);
            let snap = fetch(&config)?;

            println!("==> Stage 2: Rendering images → {}", config.asset_dir.display());
            let paths = render::render_all(&config, &snap)?;
            output::print_lines(&output::format_render_output(&paths));

            println!("==> Stage 3: Updating {}", config.readme_path.display());
            let outcome = section::update_readme(&config, &snap)?;
            output::print_lines(&output::format_update_output(&outcome, &config.readme_path));

            println!("==> Stage 4: Publishing");
            let push_outcome =
                publish::commit_and_push(std::path::Path::new("."), COMMIT_MESSAGE, config.token.as_deref())?;
            output::print_lines(&output::format_publish_output(&push_outcome));

            println!(
                "{}",
                output::format_status(&config.username, &config.repo, &push_outcome)
            );
        }
        Command::Check => {
            let snap = snapshot::StatsSnapshot::load(&config.snapshot_path())?;
            print!("{}", section::section_body(&config, &snap));
        }
    }

    Ok(())
}

/// Stage 1: fetch everything and save the snapshot.
fn fetch(config: &Config) -> Result<snapshot::StatsSnapshot, Box<dyn std::error::Error>> {
    let client = github::GithubClient::new(config)?;
    let profile = client.fetch_user(&config.username)?;
    let repos = client.fetch_repos(&config.username)?;
    let fetches = client.fetch_language_breakdowns(&repos);
    let totals = github::aggregate_language_bytes(&fetches);

    let lines = if config.count_lines {
        let (count, skipped) = github::clone_and_count(&repos, &config.clone_dir());
        output::print_lines(&output::format_clone_skips(&skipped));
        println!("{}", output::format_line_count(&count));
        Some(count)
    } else {
        None
    };

    let snap = snapshot::StatsSnapshot::new(&profile, totals.clone(), lines);
    snap.save(&config.snapshot_path())?;
    output::print_lines(&output::format_fetch_output(&snap, &fetches, &totals));
    Ok(snap)
}
