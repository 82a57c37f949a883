//! CLI - command-line argument parsing.
//!
//! Defines the clap structure; execution lives in `commands`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Crece learning platform CLI
#[derive(Parser)]
#[command(name = "crecectl")]
#[command(about = "Crece - quiz game, rewards and course catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory override (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a local account (overwrites any existing one)
    Register {
        /// Display name
        name: String,
        /// Email address
        email: String,
        /// Career, free form (e.g. "Computer Science")
        career: String,
        /// Password
        password: String,
    },

    /// Log in with email and password
    Login {
        email: String,
        password: String,
    },

    /// Show account, balance, high scores and chest states
    Status,

    /// Play a timed five-question quiz
    Play {
        /// easy, medium or hard
        difficulty: String,
    },

    /// Show score milestones and overall progress
    Progress,

    /// Claim a reached milestone by its point threshold
    Claim {
        threshold: u32,
    },

    /// Open an unlocked chest and spin the prize wheel
    Open {
        /// easy, medium or hard
        difficulty: String,
    },

    /// List the course catalog and what you own
    Courses,

    /// Buy a course with coins
    Buy {
        course_id: String,
    },

    /// Ask the career assistant
    Chat {
        /// Your message
        message: Vec<String>,
    },
}
