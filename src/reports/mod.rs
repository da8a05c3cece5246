use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tourforge::api::{format_significant, OrderEvaluation};
use tourforge::optimizer::RunReport;

pub fn print_run_report(report: &RunReport) {
    println!("\nRun: {}", report.fingerprint);
    println!("Cities: {}", report.city_count);
    println!("Best tour: {}", report.cycle_string());
    println!("Coordinates: {}", report.best_key());
    println!("Length: {}", format_significant(report.best.length, 5));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Node").add_attribute(Attribute::Bold),
        Cell::new("Length").fg(Color::Cyan),
        Cell::new("Gap"),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let best = report.best.length;
    for sub in &report.submissions {
        let gap = if best > 0.0 {
            (sub.length - best) / best * 100.0
        } else {
            0.0
        };
        let node_cell = if sub.node_rank == report.best.node_rank {
            Cell::new(sub.node_rank)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(sub.node_rank)
        };
        table.add_row(vec![
            node_cell,
            Cell::new(format_significant(sub.length, 5)).fg(Color::Cyan),
            Cell::new(format!("{:.2}%", gap)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_order_report(eval: &OrderEvaluation) {
    let mut cycle: Vec<String> = eval.order.iter().map(|i| i.to_string()).collect();
    if let Some(first) = eval.order.first() {
        cycle.push(first.to_string());
    }
    println!("Tour: {}", cycle.join(" -> "));
    println!("Coordinates: {}", eval.key);
    println!("Length: {}", format_significant(eval.length, 5));
}
