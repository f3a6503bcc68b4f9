//! Command-line argument parsing for ragbuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::RagConfig;
use crate::rag::retrieval::{parse_filter, FilterMap, SearchParams};

/// ragbuddy - Query a knowledge base with TF-IDF retrieval
#[derive(Parser, Debug)]
#[command(name = "ragbuddy")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Lightweight TF-IDF knowledge-base retrieval", long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to ~/.ragbuddy/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Corpus directory, overriding the configured one
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Log ranked ids and scores for every query
    #[arg(long, global = true)]
    pub debug: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only print results and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank corpus entries against a free-text query
    Query {
        /// Query text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Metadata filter as key=value (repeatable, all must match)
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter_arg)]
        filters: Vec<(String, String)>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Minimum similarity score
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Print hits as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Build the index and show corpus statistics
    Stats,

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

fn parse_filter_arg(raw: &str) -> Result<(String, String), String> {
    parse_filter(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: RagConfig) -> RagConfig {
        if let Some(corpus) = &self.corpus {
            config.corpus.path = Some(corpus.clone());
        }
        if self.debug {
            config.debug = true;
        }
        config
    }
}

impl Commands {
    /// Search parameters for a `query` command, falling back to configured defaults
    pub fn search_params(&self, config: &RagConfig) -> Option<SearchParams> {
        match self {
            Commands::Query {
                filters,
                max_results,
                threshold,
                ..
            } => {
                let mut params = SearchParams::from(&config.retrieval);
                if let Some(n) = max_results {
                    params.max_results = *n;
                }
                if let Some(t) = threshold {
                    params.similarity_threshold = *t;
                }
                params.filters = filters.iter().cloned().collect::<FilterMap>();
                Some(params)
            }
            _ => None,
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default log level for this verbosity
    pub fn log_level(&self, debug: bool) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal if debug => "debug",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }
}
