use super::ui;
use crate::core::{Catalog, Selection};
use comfy_table::{Attribute, Cell, Color};

pub fn display_platforms(catalog: &Catalog, selection: &Selection) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Platform"),
        ui::header_cell("Commission (%)"),
        ui::header_cell("Tax (%)"),
    ]);

    for platform in &catalog.platforms {
        let selected = platform.id == selection.platform_id();
        let name = if selected {
            Cell::new(format!("▶ {}", platform.name))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&platform.name)
        };

        table.add_row(vec![
            Cell::new(&platform.id),
            name,
            ui::number_cell(format!("{:.1}", platform.commission_rate * 100.0)),
            ui::number_cell(format!("{:.1}", platform.tax_rate * 100.0)),
        ]);
    }

    table.to_string()
}

pub fn run(catalog: &Catalog, selection: &Selection) {
    println!("{}", display_platforms(catalog, selection));
}
