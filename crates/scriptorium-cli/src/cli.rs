//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scriptorium: deterministic normalization for machine-drafted scripture
#[derive(Parser)]
#[command(name = "scriptorium")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a candidate corpus and write the review manifest
    Normalize {
        /// Candidate corpus (JSONL: {ref, translation})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reference corpus (JSONL: {ref, kjv} or {ref, text})
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Earlier draft to drift-check the candidate against
        #[arg(short, long)]
        baseline: Option<PathBuf>,

        /// Approval worksheet whose APPROVE rows override the engine
        #[arg(short, long)]
        approvals: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output path (default: <file>.normalized.jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Review manifest path (default: <file>.review.jsonl)
        #[arg(long)]
        review: Option<PathBuf>,

        /// Run summary path (default: <file>.stats.json)
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Write a capitalization suggestion worksheet for human review
    Suggest {
        /// Corpus to scan (JSONL: {ref, translation})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Worksheet path (default: <file>.suggestions.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Drop suggestions below this confidence
        #[arg(long, default_value = "0.0")]
        min_confidence: f64,
    },

    /// Apply APPROVE rows from a worksheet to a corpus
    Apply {
        /// Corpus to update (JSONL: {ref, translation})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Approval worksheet (CSV: decision, ref, original, suggested)
        #[arg(value_name = "APPROVALS")]
        approvals: PathBuf,

        /// Output path (default: <file>.approved.jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report pronoun usage classes of a reference corpus
    Classify {
        /// Reference corpus (JSONL: {ref, kjv} or {ref, text})
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
