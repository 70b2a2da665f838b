//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Random binary trees and binary search trees: level-order printing and traversals
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Seed for the random source (default: entropy)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate unconstrained random binary trees
    Random {
        /// Maximum number of levels
        #[arg(short, long)]
        levels: Option<u32>,
        /// Number of trees
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate random binary search trees
    Bst {
        /// Exclusive bound for node count and values
        #[arg(short = 'N', long)]
        nodes: Option<u32>,
        /// Number of trees
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a binary search tree from the given values
    ///
    /// Level lines double in width with every level. With `--pivot first` the tree is
    /// a chain as deep as the input is long, so its lower lines get exponentially
    /// wide; use `--layout outline` for long inputs.
    FromValues {
        /// Node values (sorted before building)
        #[arg(required = true)]
        values: Vec<u32>,
        /// Pivot selection
        #[arg(short, long, value_enum, default_value_t = PivotArg::Random)]
        pivot: PivotArg,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Output options shared by the tree commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Tree layout
    #[arg(long, value_enum, default_value_t = Layout::Levels)]
    pub layout: Layout,

    /// Print only the tree, no traversals
    #[arg(long)]
    pub no_traversals: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One line per level with placeholders for empty slots
    #[default]
    Levels,
    /// Box-drawing outline, one node per line
    Outline,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotArg {
    /// Uniformly random element of each run
    Random,
    /// First element (right-leaning chain)
    First,
    /// Middle element (balanced)
    Middle,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
