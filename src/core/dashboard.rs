//! Everything the dashboard shows for the current selection.

use crate::core::catalog::{Catalog, Platform, Product, Selection};
use crate::core::error::Result;
use crate::core::financials::{self, AggregateSummary, ChartPoint, ProductFinancials};

/// Figures for one selection. Call [`DashboardView::compute`] again whenever
/// the selection changes; nothing is cached between calls.
#[derive(Debug)]
pub struct DashboardView<'a> {
    pub platform: &'a Platform,
    pub selected_product: Option<&'a Product>,
    pub aggregate: AggregateSummary,
    pub rows: Vec<(&'a Product, ProductFinancials)>,
    pub chart: Vec<ChartPoint>,
}

impl<'a> DashboardView<'a> {
    pub fn compute(catalog: &'a Catalog, selection: &Selection) -> Result<Self> {
        let platform = selection.platform(catalog)?;
        let products = catalog.products.as_slice();

        Ok(DashboardView {
            platform,
            selected_product: selection.product(catalog),
            aggregate: financials::compute_aggregate(products, platform)?,
            rows: financials::compute_product_rows(products, platform)?,
            chart: financials::build_chart_series(products, platform)?,
        })
    }

    pub fn is_selected(&self, product: &Product) -> bool {
        self.selected_product.is_some_and(|p| p.id == product.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tests::{platform, product};

    fn catalog() -> Catalog {
        Catalog {
            platforms: vec![platform("amazon", 0.15, 0.08), platform("shopify", 0.029, 0.08)],
            products: vec![
                product("p1", 45.0, 99.99, 120, 500.0),
                product("p5", 22.0, 25.99, 90, 150.0),
            ],
        }
    }

    #[test]
    fn test_view_follows_selection() {
        let catalog = catalog();
        let snapshot = catalog.clone();
        let mut selection = Selection::new(&catalog).unwrap();

        let amazon_view = DashboardView::compute(&catalog, &selection).unwrap();
        assert_eq!(amazon_view.platform.id, "amazon");
        assert_eq!(amazon_view.rows.len(), 2);
        assert_eq!(amazon_view.chart.len(), 2);
        assert!(amazon_view.is_selected(&catalog.products[0]));
        assert!(!amazon_view.is_selected(&catalog.products[1]));
        let amazon_total = amazon_view.aggregate;

        selection.select_platform(&catalog, "shopify").unwrap();
        selection.select_product(&catalog, None).unwrap();
        let shopify_view = DashboardView::compute(&catalog, &selection).unwrap();
        assert_eq!(shopify_view.platform.id, "shopify");
        assert!(shopify_view.selected_product.is_none());
        assert!(shopify_view.aggregate.total_profit > amazon_total.total_profit);

        selection.select_platform(&catalog, "amazon").unwrap();
        let again = DashboardView::compute(&catalog, &selection).unwrap();
        assert_eq!(again.aggregate, amazon_total);

        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn test_view_of_empty_product_list() {
        let catalog = Catalog {
            platforms: vec![platform("etsy", 0.065, 0.08)],
            products: vec![],
        };
        let selection = Selection::new(&catalog).unwrap();
        let view = DashboardView::compute(&catalog, &selection).unwrap();

        assert_eq!(view.aggregate, AggregateSummary::default());
        assert!(view.rows.is_empty());
        assert!(view.chart.is_empty());
        assert!(view.selected_product.is_none());
    }
}
