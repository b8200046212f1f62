//! Visualization functions using Plotters for mining results

use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::miner::{AssociationRule, FrequentItemsets};

/// Create a bar chart of raw item frequencies
///
/// # Arguments
/// * `frequencies` - Per-item transaction counts, highest first
/// * `output_path` - Path to save the PNG plot
pub fn create_item_frequency_chart(
    frequencies: &[(String, usize)],
    output_path: &str,
) -> crate::Result<()> {
    if frequencies.is_empty() {
        anyhow::bail!("Cannot chart item frequencies for an empty dataset");
    }

    let max_count = frequencies.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;
    let n_items = frequencies.len();

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Item Frequency", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n_items as f64 - 0.5), 0f64..(max_count * 1.1))?;

    let labels: Vec<String> = frequencies.iter().map(|(item, _)| item.clone()).collect();
    chart
        .configure_mesh()
        .x_desc("Items")
        .y_desc("Frequency")
        .x_labels(n_items)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            labels.get(idx).cloned().unwrap_or_default()
        })
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // Draw one bar per item
    for (idx, (_, count)) in frequencies.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (idx as f64 - 0.4, 0.0),
                (idx as f64 + 0.4, *count as f64),
            ],
            BLUE.filled(),
        )))?;
    }

    root.present()?;
    println!("Item frequency chart saved to: {}", output_path);

    Ok(())
}

/// Create a scatter plot of rule confidence (x) against lift (y)
pub fn create_confidence_lift_scatter(
    rules: &[AssociationRule],
    output_path: &str,
) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("Cannot plot confidence vs lift without rules");
    }

    let max_lift = rules
        .iter()
        .map(|r| r.lift)
        .fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Lift vs Confidence", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1.05, 0f64..(max_lift * 1.2))?;

    chart
        .configure_mesh()
        .x_desc("Confidence")
        .y_desc("Lift")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(
        rules
            .iter()
            .map(|rule| Circle::new((rule.confidence, rule.lift), 5, RED.filled())),
    )?;

    root.present()?;
    println!("Confidence vs lift scatter saved to: {}", output_path);

    Ok(())
}

/// Build a directed adjacency list from rules: item -> (item, lift) edges
///
/// One edge per antecedent-item and consequent-item pair, weighted by the
/// rule's lift. This is a disposable projection for display, not part of the
/// miner's own data model.
pub fn rule_adjacency(rules: &[AssociationRule]) -> BTreeMap<String, Vec<(String, f64)>> {
    let mut adjacency: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
    for rule in rules {
        for source in &rule.antecedent {
            for target in &rule.consequent {
                adjacency
                    .entry(source.clone())
                    .or_default()
                    .push((target.clone(), rule.lift));
            }
        }
    }
    adjacency
}

/// Draw the rule network: items as nodes on a circle, directed edges labeled by lift
pub fn create_rule_graph(rules: &[AssociationRule], output_path: &str) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("Cannot draw a rule graph without rules");
    }

    let adjacency = rule_adjacency(rules);

    // Collect every node appearing on either side of an edge
    let mut nodes: Vec<String> = adjacency.keys().cloned().collect();
    for targets in adjacency.values() {
        for (target, _) in targets {
            if !nodes.contains(target) {
                nodes.push(target.clone());
            }
        }
    }
    nodes.sort();

    // Evenly spaced positions on a unit circle
    let positions: BTreeMap<String, (f64, f64)> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let angle = 2.0 * std::f64::consts::PI * idx as f64 / nodes.len() as f64;
            (node.clone(), (angle.cos(), angle.sin()))
        })
        .collect();

    let root = BitMapBackend::new(output_path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Association Network", ("sans-serif", 30))
        .margin(10)
        .build_cartesian_2d(-1.5f64..1.5, -1.5f64..1.5)?;

    // Edges first so nodes draw on top
    for (source, targets) in &adjacency {
        let (x1, y1) = positions[source];
        for (target, lift) in targets {
            let (x2, y2) = positions[target];
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x1, y1), (x2, y2)],
                BLACK.stroke_width(2),
            )))?;

            // Lift label just off the edge midpoint, nudged toward the target
            let label_x = x1 + (x2 - x1) * 0.6;
            let label_y = y1 + (y2 - y1) * 0.6;
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.2}", lift),
                (label_x, label_y + 0.05),
                ("sans-serif", 14),
            )))?;
        }
    }

    for (node, &(x, y)) in &positions {
        chart.draw_series(std::iter::once(Circle::new(
            (x, y),
            20,
            RGBColor(173, 216, 230).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            node.clone(),
            (x, y + 0.12),
            ("sans-serif", 18),
        )))?;
    }

    root.present()?;
    println!("Association network graph saved to: {}", output_path);

    Ok(())
}

/// Print frequent itemsets and rules as console tables
///
/// This is the display boundary: supports, confidences, and lifts are rounded
/// to two decimals here, never inside the miner.
pub fn print_mining_statistics(frequent: &FrequentItemsets, rules: &[AssociationRule]) {
    println!("\n=== Frequent Itemsets ===");
    println!("  Itemset                        | Support");
    println!("  -------------------------------|--------");
    for itemset in frequent.itemsets() {
        println!("  {:30} | {:7.2}", itemset.label(), itemset.support);
    }

    println!("\n=== Association Rules ===");
    if rules.is_empty() {
        println!("  No association rules found for the selected thresholds.");
        return;
    }

    println!("  Antecedent -> Consequent                 | Support | Confidence | Lift");
    println!("  -----------------------------------------|---------|------------|------");
    for rule in rules {
        let lhs: Vec<&str> = rule.antecedent.iter().map(String::as_str).collect();
        let rhs: Vec<&str> = rule.consequent.iter().map(String::as_str).collect();
        println!(
            "  {:40} | {:7.2} | {:10.2} | {:5.2}",
            format!("{} -> {}", lhs.join(", "), rhs.join(", ")),
            rule.support,
            rule.confidence,
            rule.lift
        );
    }
}

/// Generate the full visualization report
///
/// Writes the item frequency chart to `base_output_path`, with the scatter and
/// graph charts alongside it. Rule charts are skipped with a notice when no
/// rules were found.
pub fn generate_visualization_report(
    frequencies: &[(String, usize)],
    frequent: &FrequentItemsets,
    rules: &[AssociationRule],
    base_output_path: &str,
) -> crate::Result<()> {
    create_item_frequency_chart(frequencies, base_output_path)?;

    if rules.is_empty() {
        println!("No rules to chart; skipping scatter and network graphs.");
    } else {
        let scatter_path = base_output_path.replace(".png", "_scatter.png");
        create_confidence_lift_scatter(rules, &scatter_path)?;

        let graph_path = base_output_path.replace(".png", "_graph.png");
        create_rule_graph(rules, &graph_path)?;
    }

    print_mining_statistics(frequent, rules);

    Ok(())
}
