use super::ui;
use crate::core::financials::ChartPoint;
use crate::core::{Catalog, DashboardView, Selection};
use anyhow::Result;
use comfy_table::{Cell, Color};

const MAX_BAR_WIDTH: usize = 30;

fn bar_length(value: f64, scale: f64) -> usize {
    if scale <= 0.0 || value <= 0.0 {
        return 0;
    }
    // Anything non-zero gets at least one block so small losses stay visible.
    ((value / scale) * MAX_BAR_WIDTH as f64).round().max(1.0) as usize
}

/// Renders the profit/loss series as horizontal bars, one row per product in
/// the order given.
pub fn render_chart(series: &[ChartPoint]) -> String {
    if series.is_empty() {
        return ui::style_text("No products to chart.", ui::StyleType::Subtle);
    }

    let scale = series
        .iter()
        .map(|p| p.profit.max(p.loss))
        .fold(0.0_f64, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Product"),
        ui::header_cell("Profit"),
        ui::header_cell("Loss"),
        ui::header_cell(""),
    ]);

    for point in series {
        let bar = if point.loss > 0.0 {
            Cell::new("█".repeat(bar_length(point.loss, scale))).fg(Color::Red)
        } else {
            Cell::new("█".repeat(bar_length(point.profit, scale))).fg(Color::Green)
        };

        table.add_row(vec![
            Cell::new(&point.product_name),
            ui::number_cell(ui::format_money(point.profit)).fg(Color::Green),
            ui::number_cell(ui::format_money(point.loss)).fg(Color::Red),
            bar,
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Profit/Loss by Product", ui::StyleType::Title),
        table
    )
}

pub fn run(catalog: &Catalog, selection: &Selection) -> Result<()> {
    let view = DashboardView::compute(catalog, selection)?;
    println!(
        "Platform: {}\n",
        ui::style_text(&view.platform.name, ui::StyleType::TotalLabel)
    );
    println!("{}", render_chart(&view.chart));
    Ok(())
}
