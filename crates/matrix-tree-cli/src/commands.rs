//! Subcommands operating on JSON tree descriptions

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use matrix_tree::{Node, TreeContext, TreeDescription};
use tracing::info;

/// Read and build a tree from a JSON description file.
pub fn load(path: &Path) -> Result<Node> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let node = TreeDescription::from_json(&json)
        .and_then(TreeDescription::build)
        .with_context(|| format!("invalid tree description in {}", path.display()))?;
    info!(path = %path.display(), nodes = node.node_count(), "loaded tree");
    Ok(node)
}

/// Write a tree's JSON description to `path`.
pub fn save(node: &Node, path: &Path) -> Result<()> {
    let json = node.describe()?.to_json()?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "saved tree");
    Ok(())
}

/// Print the tree structure with a one-line summary.
pub fn show(node: &Node, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", node.display())?;
    writeln!(
        out,
        "{} nodes, {} leaves, depth {}",
        node.node_count(),
        node.leaf_count(),
        node.depth()
    )?;
    Ok(())
}

/// Print the collapsed matrix.
pub fn collapse(node: &Node, ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    let matrix = node.collapse_with(ctx).context("collapse failed")?;
    writeln!(out, "{matrix}")?;
    Ok(())
}

/// Print `collapse(node) · x`.
pub fn multiply(node: &Node, x: &[f64], ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    let y = node
        .multiply_collapsed_with(x, ctx)
        .context("multiply failed")?;
    let parts: Vec<String> = y.iter().map(|v| format!("{v}")).collect();
    writeln!(out, "[{}]", parts.join(", "))?;
    Ok(())
}

/// Scale the tree, then print it or save it to `output`.
pub fn scale(mut node: Node, by: f64, output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let leaves = node.scale(by);
    info!(by, leaves, "scaled tree");
    match output {
        Some(path) => save(&node, path),
        None => show(&node, out),
    }
}
