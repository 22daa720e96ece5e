//! Walkthrough of every tree operation

use std::io::Write;

use anyhow::Result;
use matrix_tree::{Node, TreeContext};

fn diag(v: f64) -> matrix_tree::Result<Node> {
    Node::leaf_with_data(2, 2, &[v, 0.0, 0.0, v])
}

fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.1}")).collect();
    format!("[{}]", parts.join(" "))
}

/// Run the demo scenarios, printing trees, results and expected values.
pub fn run(ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    basic_leaf(out)?;
    internal_sum(ctx, out)?;
    matrix_vector(ctx, out)?;
    nested_tree(ctx, out)?;
    scaling(ctx, out)?;
    writeln!(out, "\nAll scenarios completed.")?;
    Ok(())
}

fn basic_leaf(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "=== Basic Leaf ===")?;
    let leaf = Node::leaf_with_data(2, 2, &[1.0, 2.0, 3.0, 4.0])?;
    write!(out, "{}", leaf.display())?;
    writeln!(out, "released {} node(s)", leaf.destroy())?;
    Ok(())
}

fn internal_sum(ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Internal Node ===")?;
    let internal = Node::internal_with_children(2, 2, vec![diag(1.0)?, diag(2.0)?, diag(0.5)?])?;
    write!(out, "{}", internal.display())?;

    writeln!(out, "Collapsed (sum of children):")?;
    writeln!(out, "{}", internal.collapse_with(ctx)?)?;
    writeln!(out, "Expected: [3.5, 0.0; 0.0, 3.5]")?;
    Ok(())
}

fn matrix_vector(ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Matrix-Vector Multiplication ===")?;
    let matrix = Node::leaf_with_data(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])?;
    write!(out, "{}", matrix.display())?;

    let x = [1.0, 2.0, 3.0];
    let y = matrix.multiply_collapsed_with(&x, ctx)?;
    writeln!(out, "x = {}", format_vector(&x))?;
    writeln!(out, "y = A*x = {}", format_vector(&y))?;
    writeln!(out, "Expected: [14.0 32.0 50.0]")?;
    Ok(())
}

fn nested_tree(ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Nested Tree ===")?;
    let inner = Node::internal_with_children(2, 2, vec![diag(1.0)?, diag(0.5)?])?;
    let root = Node::internal_with_children(2, 2, vec![inner, diag(0.25)?])?;
    write!(out, "{}", root.display())?;

    writeln!(out, "Collapsed:")?;
    writeln!(out, "{}", root.collapse_with(ctx)?)?;
    writeln!(out, "Expected: [1.75, 0.0; 0.0, 1.75]")?;
    Ok(())
}

fn scaling(ctx: &TreeContext, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n=== Scaling ===")?;
    let mut root = Node::internal_with_children(2, 2, vec![diag(1.0)?, diag(2.0)?])?;
    let leaves = root.scale(2.0);
    writeln!(out, "Scaled {leaves} leaves by 2.0; collapsed:")?;
    writeln!(out, "{}", root.collapse_with(ctx)?)?;
    writeln!(out, "Expected: [6.0, 0.0; 0.0, 6.0]")?;
    Ok(())
}
