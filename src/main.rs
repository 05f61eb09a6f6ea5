use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use pr_pulse::dashboard::{compute_metadata, derive_chart, StatusFilter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive dashboard (default if no subcommand)
    Dashboard,
    /// Print the contributor distribution as a table
    Stats {
        /// Restrict to PRs in this state
        #[arg(long, value_enum, default_value_t)]
        state: StatusFilter,

        /// Include bot accounts
        #[arg(long)]
        bots: bool,
    },
    /// Print the chart-input payload as JSON
    Json {
        /// Restrict to PRs in this state
        #[arg(long, value_enum, default_value_t)]
        state: StatusFilter,

        /// Include bot accounts
        #[arg(long)]
        bots: bool,
    },
    /// Create a sample config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "pr-pulse")]
#[command(about = "Contributor distribution dashboard for GitHub repositories", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pr-pulse/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Repositories to chart (owner/repo), overriding the config file
    #[arg(short, long = "repo", global = true)]
    repositories: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);
    let start_time = Instant::now();

    // Init doesn't need config or credentials
    if let Commands::Init = command {
        match pr_pulse::config::init_config(cli.config.map(PathBuf::from)) {
            Ok(path) => {
                println!("Wrote sample config to {}", path.display());
                println!("Edit the repositories list, then run pr-pulse.");
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config; --repo overrides replace the configured repository list.
    // A missing config file is fine when repos come from the command line,
    // but a config file that exists and fails to parse is always an error.
    let config_path = cli.config.map(PathBuf::from);
    let effective_path = config_path
        .clone()
        .unwrap_or_else(pr_pulse::config::get_config_path);
    let mut config = if !effective_path.exists() && !cli.repositories.is_empty() {
        pr_pulse::config::Config {
            repositories: Vec::new(),
            auto_refresh_interval: 300,
            show_bots: false,
        }
    } else {
        match pr_pulse::config::load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    };
    if !cli.repositories.is_empty() {
        config.repositories = cli.repositories.clone();
    }

    if cli.verbose {
        eprintln!("Charting {} repositories", config.repositories.len());
        for (i, repo) in config.repositories.iter().enumerate() {
            eprintln!("  Repo {}: {}", i + 1, repo);
        }
    }

    if config.repositories.is_empty() {
        eprintln!("No repositories configured.");
        eprintln!("Add repositories to ~/.config/pr-pulse/config.yaml:");
        eprintln!("  repositories:");
        eprintln!("    - open-sauced/app");
        eprintln!("Or pass one with --repo owner/repo.");
        std::process::exit(EXIT_CONFIG);
    }

    // Setup credentials (prompts for token on first run)
    let token = match pr_pulse::credentials::setup_token_if_missing().await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    // Create GitHub client
    let client = match pr_pulse::github::create_client(&token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    match command {
        Commands::Dashboard => {
            let app = pr_pulse::tui::App::new(config, cli.verbose);
            if let Err(e) = pr_pulse::tui::run_tui(app, client).await {
                eprintln!("Dashboard error: {}", e);
                std::process::exit(EXIT_NETWORK);
            }
        }
        Commands::Stats { state, bots } => {
            let outcome = fetch_or_exit(&client, &config.repositories, cli.verbose).await;

            let metadata = compute_metadata(&outcome.records);
            let chart = derive_chart(&outcome.records, state, bots);

            let use_colors = pr_pulse::output::should_use_colors();
            println!("{}", pr_pulse::output::format_metadata(&metadata, use_colors));
            println!();
            println!(
                "{}",
                pr_pulse::output::format_contributor_table(&chart, use_colors)
            );

            if cli.verbose {
                eprintln!(
                    "Total: {} contributors in {:?}",
                    chart.points.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Json { state, bots } => {
            let outcome = fetch_or_exit(&client, &config.repositories, cli.verbose).await;

            let metadata = compute_metadata(&outcome.records);
            let chart = derive_chart(&outcome.records, state, bots);

            match pr_pulse::output::to_json(&chart, &metadata) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Output error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Init => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}

async fn fetch_or_exit(
    client: &octocrab::Octocrab,
    repositories: &[String],
    verbose: bool,
) -> pr_pulse::fetch::FetchOutcome {
    match pr_pulse::fetch::fetch_pull_requests(client, repositories, verbose).await {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                eprintln!("{}", warning);
            }
            outcome
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_NETWORK);
        }
    }
}
