//! CLI example that loads a JSON forest and displays its full hierarchy
//!
//! Usage:
//!   cargo run --example print_forest [path]
//!
//! If no path is provided, a small built-in forest is used.

use serde_json::json;
use std::env;
use tree_picker::prelude::*;

fn main() {
    let args: Vec<String> = env::args().collect();

    let raw = if args.len() > 1 {
        let path = &args[1];
        println!("Loading forest: {}", path);
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading file: {}", e);
                std::process::exit(1);
            }
        };
        match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("Error parsing JSON: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        json!([
            { "id": "org", "name": "Organization", "children": [
                { "id": "eng", "name": "Engineering", "icon": "gear", "children": [
                    { "id": "web", "name": "Web" },
                    { "id": "infra", "name": "Infrastructure" }
                ]},
                { "id": "ops", "name": "Operations" }
            ]},
            { "id": "archive", "name": "Archive", "children": [] }
        ])
    };

    let forest = match validate_forest(&raw) {
        Ok(forest) => forest,
        Err(e) => {
            eprintln!("Error validating forest: {}", e);
            for issue in e.issues() {
                eprintln!("  {}", issue);
            }
            std::process::exit(1);
        }
    };

    let index = ForestIndex::build(&forest);

    println!();
    println!("Forest loaded successfully!");
    println!("Total nodes: {}", index.node_count());
    println!("Folders: {}", index.parents().len());
    println!("Leaves: {}", index.leaves().len());
    println!();
    println!("Outline:");
    println!("═══════════════════════════════");
    print!("{}", render_outline(&forest, Expansion::All, None));
    println!("═══════════════════════════════");
    println!();

    // Walk the forest and show where each node sits
    for slot in index.walk() {
        let Some(node) = index.get(slot) else {
            continue;
        };
        let chain = ancestor_chain_summary(node.id.as_str(), &forest);
        println!(
            "{:<16} depth {}  path {}  last-ancestor flags {:?}",
            node.id.as_str(),
            index.depth(slot),
            index.breadcrumb(slot).join(" / "),
            chain.as_slice()
        );
    }
}
