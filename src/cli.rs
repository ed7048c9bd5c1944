//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::keycode::KeyCode;

/// Output format for `bindings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML format (default)
    #[default]
    Yaml,
    /// JSON format
    Json,
}

/// Keyboard dispatch by lookup table, and an anagram check.
#[derive(Parser, Debug)]
#[command(name = "switch-critique")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load key bindings from TOML file (default: ./switch-critique.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (default: switch-critique.log)
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read key presses from the terminal and dispatch them until the quit key
    Listen,

    /// Dispatch the given key codes through the configured bindings
    Dispatch {
        /// Key codes, e.g. 32 for space
        #[arg(required = true, value_name = "CODE")]
        codes: Vec<KeyCode>,

        /// Use the hard-coded match instead of the binding table
        #[arg(long)]
        switch: bool,
    },

    /// Check whether two strings are anagrams of each other
    Anagram {
        /// First string; case, spaces and punctuation all count
        left: String,
        /// Second string
        right: String,
    },

    /// Print the effective key bindings
    Bindings {
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}
