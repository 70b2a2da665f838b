//! bintree: random binary trees and binary search trees
//!
//! Architecture:
//! - `domain`: arena-backed binary tree, random builders, traversals, renderers
//! - `config`: layered settings (defaults, TOML files, `BINTREE_*` env vars)
//! - `cli`: argument parsing, command dispatch, terminal output

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
