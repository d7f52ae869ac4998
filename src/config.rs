//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::timer::PausePolicy;
use crate::timer_list::DraftInput;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "multitimer")]
#[command(about = "Run several countdown timers side by side in the terminal")]
#[command(version)]
pub struct Config {
    /// Initial value of the hours field
    #[arg(short = 'H', long, default_value = "00")]
    pub hours: String,

    /// Initial value of the minutes field
    #[arg(short, long, default_value = "01")]
    pub minutes: String,

    /// Initial value of the seconds field
    #[arg(short, long, default_value = "00")]
    pub seconds: String,

    /// How a paused timer resumes: `legacy` keeps the original end time,
    /// `freeze` pushes it out by the time spent paused
    #[arg(long, value_enum, default_value_t = PausePolicy::Legacy)]
    pub pause_mode: PausePolicy,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The starting contents of the duration form
    pub fn draft(&self) -> DraftInput {
        DraftInput::new(&self.hours, &self.minutes, &self.seconds)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
