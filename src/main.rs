//! ragbuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use ragbuddy::{
    cli::{Args, Commands, Verbosity},
    config::RagConfig,
    rag::{IndexStats, RagSystem},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(args.verbosity(), config.debug);

    tracing::debug!(verbosity = args.verbosity().as_str(), "Starting ragbuddy");

    match &args.command {
        Commands::Query { text, json, .. } => {
            run_query(&args, config, text, *json)?;
        }
        Commands::Stats => {
            show_stats(&args, config)?;
        }
        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<RagConfig> {
    let config = match &args.config {
        Some(path) => RagConfig::load_from(path)?,
        None => RagConfig::load()?,
    };
    Ok(args.apply_overrides(config))
}

fn init_logging(verbosity: Verbosity, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ragbuddy={}", verbosity.log_level(debug))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_system(config: RagConfig) -> Result<RagSystem> {
    let mut system = RagSystem::new(config);
    system
        .initialize()
        .context("Failed to build the knowledge-base index")?;
    Ok(system)
}

fn run_query(args: &Args, config: RagConfig, text: &str, json: bool) -> Result<()> {
    let params = args
        .command
        .search_params(&config)
        .context("Query parameters missing")?;
    let system = build_system(config)?;

    let hits = system.retrieve_with_params(text, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        if args.verbosity() != Verbosity::Quiet {
            eprintln!("{}", "No relevant entries found.".yellow());
        }
        return Ok(());
    }

    print!("{}", system.format_results(&hits));
    Ok(())
}

fn show_stats(args: &Args, config: RagConfig) -> Result<()> {
    let system = build_system(config)?;
    let Some(stats) = system.stats() else {
        return Ok(());
    };

    print_stats(stats, args.verbosity());
    Ok(())
}

fn print_stats(stats: &IndexStats, verbosity: Verbosity) {
    println!("{}", "Knowledge Base".bold());
    println!("  Corpus:      {}", stats.corpus_path.display());
    println!("  Entries:     {}", stats.entries);
    println!("  Vocabulary:  {}", stats.vocabulary_size);
    println!("  Files:       {} loaded, {} rejected", stats.files_loaded, stats.failed_files.len());
    println!("  Built at:    {}", stats.built_at.format("%Y-%m-%d %H:%M:%S UTC"));

    if !stats.failed_files.is_empty() && verbosity != Verbosity::Quiet {
        println!();
        println!("{}", "Rejected files:".yellow());
        for failure in &stats.failed_files {
            println!("  {} {}", "✗".red(), failure.reason);
        }
    }
}

fn show_config(config: &RagConfig) -> Result<()> {
    println!("{}", "ragbuddy Configuration".bold());
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
