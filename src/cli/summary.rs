use super::ui;
use crate::core::{Catalog, DashboardView, Selection};
use anyhow::Result;
use comfy_table::{Attribute, Cell, Color};

impl DashboardView<'_> {
    /// Platform overview: the three catalog-wide totals.
    pub fn display_overview(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Total Revenue"),
            ui::header_cell("Net Profit"),
            ui::header_cell("Net Loss"),
        ]);
        table.add_row(vec![
            ui::number_cell(ui::format_money(self.aggregate.total_revenue)),
            ui::number_cell(ui::format_money(self.aggregate.total_profit))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            ui::number_cell(ui::format_money(self.aggregate.total_loss))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);

        let rates = format!(
            "commission {:.1}%, tax {:.1}%",
            self.platform.commission_rate * 100.0,
            self.platform.tax_rate * 100.0
        );

        format!(
            "Platform Overview: {} {}\n\n{}",
            ui::style_text(&self.platform.name, ui::StyleType::Title),
            ui::style_text(&format!("({rates})"), ui::StyleType::Subtle),
            table
        )
    }

    /// Product performance table with the selected product highlighted.
    pub fn display_products(&self) -> String {
        if self.rows.is_empty() {
            return ui::style_text("No products in the catalog.", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Product"),
            ui::header_cell("Price"),
            ui::header_cell("Units Sold"),
            ui::header_cell("Net Profit/Loss"),
        ]);

        for (product, figures) in &self.rows {
            let name = if self.is_selected(product) {
                Cell::new(format!("▶ {}", product.name))
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(&product.name)
            };

            table.add_row(vec![
                name,
                ui::number_cell(ui::format_money(product.price)),
                ui::number_cell(product.units_sold),
                ui::profit_loss_cell(figures.net_profit),
            ]);
        }

        format!(
            "{}\n\n{}",
            ui::style_text("Product Performance", ui::StyleType::Title),
            table
        )
    }
}

pub fn run(catalog: &Catalog, selection: &Selection) -> Result<()> {
    let view = DashboardView::compute(catalog, selection)?;

    println!("{}", view.display_overview());
    ui::print_separator();
    println!("{}", view.display_products());
    Ok(())
}
