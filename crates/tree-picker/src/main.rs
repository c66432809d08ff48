use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tree_picker::prelude::*;
use tree_picker::tree::schema::placeholder_forest;

#[derive(Debug, Parser)]
#[command(
    name = "tree-picker",
    about = "Load a tree, apply picker commands, and print the result",
    version
)]
struct Cli {
    /// JSON forest to load. Nodes without an id get one assigned.
    /// Starts from a single empty root when omitted.
    input: Option<PathBuf>,

    /// TOML picker configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file holding an array of commands
    #[arg(short = 'f', long = "commands")]
    commands_file: Option<PathBuf>,

    /// A single JSON command, e.g. '{"op":"delete","id":"b"}'. Repeatable.
    #[arg(short = 'x', long = "exec")]
    exec: Vec<String>,

    /// Print the forest as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Only show children of expanded nodes
    #[arg(long)]
    collapsed: bool,

    /// Enable verbose logging for debugging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let config = match &cli.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };

    let mut ids = config.id_generator();
    let forest = match &cli.input {
        Some(path) => load_forest(path, &mut ids)?,
        None => placeholder_forest(&mut ids),
    };
    info!("loaded {} root node(s)", forest.len());

    let mut picker = TreePicker::new(forest, config).with_id_generator(ids);

    let commands = collect_commands(&cli)?;
    let changed = picker.apply_all(commands);
    info!("{} command(s) changed state", changed);

    let view = picker.view();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let expansion = if cli.collapsed && picker.query().is_empty() {
            Expansion::Respect
        } else {
            Expansion::All
        };
        print!("{}", render_outline(&view, expansion, Some(picker.selection())));
        print_summary(&view, picker.selection());
    }

    Ok(())
}

fn load_forest(path: &Path, ids: &mut impl IdGenerator) -> Result<Forest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree file {}", path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    let forest = normalize_forest(&raw, ids)
        .with_context(|| format!("Invalid tree data in {}", path.display()))?;
    Ok(forest)
}

fn collect_commands(cli: &Cli) -> Result<Vec<Command>> {
    let mut commands = Vec::new();

    if let Some(path) = &cli.commands_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read commands file {}", path.display()))?;
        let batch: Vec<Command> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse commands in {}", path.display()))?;
        commands.extend(batch);
    }

    for text in &cli.exec {
        let command: Command = serde_json::from_str(text)
            .with_context(|| format!("Failed to parse command {}", text))?;
        commands.push(command);
    }

    Ok(commands)
}

fn print_summary(forest: &Forest, selection: &Selection) {
    let index = ForestIndex::build(forest);
    println!();
    println!(
        "{} nodes, {} folders, {} leaves, {} selected",
        index.node_count(),
        index.parents().len(),
        index.leaves().len(),
        selection.len()
    );
}
