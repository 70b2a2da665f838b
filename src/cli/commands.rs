//! Command dispatch and per-tree reports

use std::fs;
use std::io::{self, Write};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::cli::args::{Cli, Commands, ConfigCommands, Layout, OutputArgs, PivotArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, RenderConfig, Settings};
use crate::domain::{
    build_bst, check_non_decreasing, BinaryTree, FirstPivot, LevelPrinter, MiddlePivot,
    OutlineRender, Traversal, TreeBuilder,
};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Random {
            levels,
            count,
            output,
        }) => _random(
            &settings,
            levels.unwrap_or(settings.max_levels),
            count.unwrap_or(settings.count),
            output,
        ),
        Some(Commands::Bst {
            nodes,
            count,
            output,
        }) => _bst(
            &settings,
            nodes.unwrap_or(settings.max_nodes),
            count.unwrap_or(settings.count),
            output,
        ),
        Some(Commands::FromValues {
            values,
            pivot,
            output,
        }) => _from_values(&settings, values, *pivot, output),
        Some(Commands::Config { command }) => _config(cli, &settings, command),
        Some(Commands::Completion { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "bintree", &mut io::stdout());
            Ok(())
        }
        // without a command: random BSTs with configured defaults
        None => _bst(
            &settings,
            settings.max_nodes,
            settings.count,
            &OutputArgs::default(),
        ),
    }
}

/// Configured settings with command line overrides applied.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

/// Writes the tree layout followed by one line per traversal.
pub fn write_report<W: Write>(
    tree: &BinaryTree,
    render: &RenderConfig,
    output: &OutputArgs,
    mut out: W,
) -> io::Result<()> {
    match output.layout {
        Layout::Levels => LevelPrinter::new(render.print_style()).write_to(tree, &mut out)?,
        Layout::Outline => write!(out, "{}", tree.to_outline(&render.placeholder))?,
    }
    if !output.no_traversals {
        for order in Traversal::ALL {
            let values = tree.traverse(order).iter().join(&render.sequence_separator);
            let line = format!("{:<12} {}", format!("{order}:"), values);
            writeln!(out, "{}", line.trim_end())?;
        }
    }
    out.flush()
}

/// Verifies that the in-order sequence of a BST is sorted.
pub fn check_bst(tree: &BinaryTree) -> CliResult<()> {
    if let Err(e) = check_non_decreasing(&tree.traverse(Traversal::InOrder)) {
        warn!("BST self-check failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn validate_count(count: usize) -> CliResult<()> {
    if count == 0 {
        return Err(CliError::InvalidArgs("count must be at least 1".into()));
    }
    Ok(())
}

/// Writes report `index` of `count`, separated from the previous one by a blank
/// line and headed by a summary when several trees are printed.
pub fn write_tree<W: Write>(
    index: usize,
    count: usize,
    tree: &BinaryTree,
    render: &RenderConfig,
    output: &OutputArgs,
    mut out: W,
) -> io::Result<()> {
    if index > 0 {
        writeln!(out)?;
    }
    if count > 1 {
        let summary = format!(
            "tree {}/{}: {} nodes, depth {}",
            index + 1,
            count,
            tree.len(),
            tree.depth()
        );
        writeln!(out, "{}", output::heading(&summary))?;
    }
    write_report(tree, render, output, out)
}

fn print_tree(
    index: usize,
    count: usize,
    tree: &BinaryTree,
    render: &RenderConfig,
    output: &OutputArgs,
) -> CliResult<()> {
    write_tree(index, count, tree, render, output, io::stdout().lock())
        .map_err(|e| CliError::io("write report to stdout", e))
}

#[instrument(skip(settings, output))]
fn _random(settings: &Settings, levels: u32, count: usize, output: &OutputArgs) -> CliResult<()> {
    validate_count(count)?;
    let mut builder = TreeBuilder::with_optional_seed(settings.seed);
    for i in 0..count {
        let tree = builder.build_random_tree(levels);
        print_tree(i, count, &tree, &settings.render, output)?;
    }
    Ok(())
}

#[instrument(skip(settings, output))]
fn _bst(settings: &Settings, nodes: u32, count: usize, output: &OutputArgs) -> CliResult<()> {
    validate_count(count)?;
    let mut builder = TreeBuilder::with_optional_seed(settings.seed);
    for i in 0..count {
        let tree = builder.build_random_bst(nodes);
        check_bst(&tree)?;
        print_tree(i, count, &tree, &settings.render, output)?;
    }
    Ok(())
}

#[instrument(skip(settings, output))]
fn _from_values(
    settings: &Settings,
    values: &[u32],
    pivot: PivotArg,
    output: &OutputArgs,
) -> CliResult<()> {
    let values = values.to_vec();
    let tree = match pivot {
        PivotArg::Random => TreeBuilder::with_optional_seed(settings.seed).build_bst_from(values),
        PivotArg::First => build_bst(values, &mut FirstPivot),
        PivotArg::Middle => build_bst(values, &mut MiddlePivot),
    };
    check_bst(&tree)?;
    print_tree(0, 1, &tree, &settings.render, output)
}

#[instrument(skip(cli, settings))]
fn _config(cli: &Cli, settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let text = settings.to_toml()?;
            io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .map_err(|e| CliError::io("write settings to stdout", e))?;
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => println!("global: {}", path.display()),
                None => println!("global: (no config directory)"),
            }
            if let Some(path) = &cli.config {
                println!("file:   {}", path.display());
            }
        }
        ConfigCommands::Init { force } => {
            let path = cli
                .config
                .clone()
                .or_else(global_config_path)
                .ok_or_else(|| CliError::InvalidArgs("no config directory available".into()))?;
            if path.exists() && !force {
                return Err(CliError::FileExists(path));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
            }
            fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            info!("Wrote config template: {}", path.display());
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(())
}
