//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};

/// Largest `--max-time` whose value in seconds still fits in a `u64`
pub const MAX_TIME_MINUTES: u64 = u64::MAX / 60;

/// Number of players sharing the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Players {
    Two,
    Four,
}

impl Players {
    pub fn count(&self) -> usize {
        match self {
            Players::Two => 2,
            Players::Four => 4,
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "turn-timer")]
#[command(about = "An HTTP-controlled board of turn timers where only one runs at a time")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Time per player in minutes
    #[arg(short, long, default_value = "10",
          value_parser = clap::value_parser!(u64).range(..=MAX_TIME_MINUTES))]
    pub max_time: u64,

    /// Number of timers on the board
    #[arg(long, value_enum, default_value_t = Players::Two)]
    pub players: Players,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Starting value of each timer in seconds
    pub fn initial_seconds(&self) -> u64 {
        self.max_time.saturating_mul(60)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
