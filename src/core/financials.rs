//! Profit and loss figures for a catalog under one platform's fee model.
//!
//! Everything here is a pure function of the (products, platform) inputs.
//! Two clamping rules coexist on purpose:
//!
//! - per product, the signed net profit is split into `profit_part` and
//!   `loss_part`, which is what the chart series shows;
//! - for the whole catalog, one gross figure is computed over the totals and
//!   only then split, so winning and losing products net against each other.

use crate::core::catalog::{Platform, Product};
use crate::core::error::Result;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductFinancials {
    pub revenue: f64,
    pub cost_of_goods: f64,
    pub commission: f64,
    pub tax: f64,
    pub net_profit: f64,
    pub profit_part: f64,
    pub loss_part: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateSummary {
    pub total_revenue: f64,
    /// Signed result for the combined position, before clamping.
    pub gross_profit: f64,
    pub total_profit: f64,
    pub total_loss: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub product_name: String,
    pub profit: f64,
    pub loss: f64,
}

fn profit_part(net: f64) -> f64 {
    if net > 0.0 { net } else { 0.0 }
}

fn loss_part(net: f64) -> f64 {
    if net < 0.0 { -net } else { 0.0 }
}

pub fn compute_product_financials(
    product: &Product,
    platform: &Platform,
) -> Result<ProductFinancials> {
    product.validate()?;
    platform.validate()?;

    let units = product.units_sold as f64;
    let revenue = product.price * units;
    let cost_of_goods = product.capital * units;
    let commission = revenue * platform.commission_rate;
    let tax = revenue * platform.tax_rate;
    let net_profit = revenue - cost_of_goods - commission - tax - product.ads_budget;

    Ok(ProductFinancials {
        revenue,
        cost_of_goods,
        commission,
        tax,
        net_profit,
        profit_part: profit_part(net_profit),
        loss_part: loss_part(net_profit),
    })
}

/// Computes the dashboard totals for `products` on `platform`.
///
/// Commission and tax are applied once to the total revenue and the result is
/// clamped once, so the totals are not the sum of per-product clamped parts.
#[instrument(skip(products, platform), fields(platform = %platform.id, products = products.len()))]
pub fn compute_aggregate(products: &[Product], platform: &Platform) -> Result<AggregateSummary> {
    platform.validate()?;

    let mut total_revenue = 0.0;
    let mut total_cost_of_goods = 0.0;
    let mut total_ads = 0.0;
    for product in products {
        product.validate()?;
        let units = product.units_sold as f64;
        total_revenue += product.price * units;
        total_cost_of_goods += product.capital * units;
        total_ads += product.ads_budget;
    }

    let commissions = total_revenue * platform.commission_rate;
    let taxes = total_revenue * platform.tax_rate;
    let gross_profit = total_revenue - total_cost_of_goods - commissions - taxes - total_ads;
    debug!(total_revenue, gross_profit, "Computed aggregate");

    Ok(AggregateSummary {
        total_revenue,
        gross_profit,
        total_profit: profit_part(gross_profit),
        total_loss: loss_part(gross_profit),
    })
}

/// Per-product figures in catalog order.
pub fn compute_product_rows<'a>(
    products: &'a [Product],
    platform: &Platform,
) -> Result<Vec<(&'a Product, ProductFinancials)>> {
    products
        .iter()
        .map(|p| compute_product_financials(p, platform).map(|f| (p, f)))
        .collect()
}

/// One chart point per product, in catalog order, using row-level clamping.
pub fn build_chart_series(products: &[Product], platform: &Platform) -> Result<Vec<ChartPoint>> {
    products
        .iter()
        .map(|product| {
            let figures = compute_product_financials(product, platform)?;
            Ok(ChartPoint {
                product_name: product.name.clone(),
                profit: figures.profit_part,
                loss: figures.loss_part,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::tests::{platform, product};
    use crate::core::error::Error;

    const EPS: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn mixed_catalog() -> Vec<Product> {
        vec![
            product("p1", 45.0, 99.99, 120, 500.0),
            product("p2", 70.0, 129.99, 75, 300.0),
            product("p3", 15.0, 39.99, 350, 800.0),
            product("p4", 30.0, 59.99, 210, 450.0),
            product("p5", 22.0, 25.99, 90, 150.0),
        ]
    }

    #[test]
    fn test_profitable_product() {
        let f = compute_product_financials(
            &product("p1", 45.0, 99.99, 120, 500.0),
            &platform("amazon", 0.15, 0.08),
        )
        .unwrap();

        assert_close(f.revenue, 11998.80);
        assert_close(f.cost_of_goods, 5400.00);
        assert_close(f.commission, 1799.82);
        assert_close(f.tax, 959.904);
        assert_close(f.net_profit, 3339.076);
        assert_close(f.profit_part, 3339.076);
        assert_eq!(f.loss_part, 0.0);
    }

    #[test]
    fn test_loss_making_product() {
        let f = compute_product_financials(
            &product("p5", 22.0, 25.99, 90, 150.0),
            &platform("shopify", 0.029, 0.08),
        )
        .unwrap();

        assert_close(f.revenue, 2339.10);
        assert_close(f.cost_of_goods, 1980.00);
        assert_close(f.commission, 67.8339);
        assert_close(f.tax, 187.128);
        assert_close(f.net_profit, -45.8619);
        assert_close(f.loss_part, 45.8619);
        assert_eq!(f.profit_part, 0.0);
    }

    #[test]
    fn test_zero_units_only_costs_ads() {
        let f = compute_product_financials(
            &product("idle", 10.0, 20.0, 0, 75.0),
            &platform("etsy", 0.065, 0.08),
        )
        .unwrap();

        assert_eq!(f.revenue, 0.0);
        assert_eq!(f.cost_of_goods, 0.0);
        assert_eq!(f.commission, 0.0);
        assert_eq!(f.tax, 0.0);
        assert_eq!(f.net_profit, -75.0);
        assert_eq!(f.loss_part, 75.0);
    }

    #[test]
    fn test_profit_and_loss_parts_are_exclusive() {
        let platforms = [
            platform("amazon", 0.15, 0.08),
            platform("shopify", 0.029, 0.08),
            platform("greedy", 0.9, 0.5),
        ];
        for pf in &platforms {
            for p in &mixed_catalog() {
                let f = compute_product_financials(p, pf).unwrap();
                assert_eq!(f.profit_part - f.loss_part, f.net_profit);
                assert!(f.profit_part == 0.0 || f.loss_part == 0.0);
                assert!(f.profit_part >= 0.0 && f.loss_part >= 0.0);
            }
        }
    }

    #[test]
    fn test_empty_catalog_aggregate() {
        let agg = compute_aggregate(&[], &platform("amazon", 0.15, 0.08)).unwrap();
        assert_eq!(agg, AggregateSummary::default());
        assert!(
            build_chart_series(&[], &platform("amazon", 0.15, 0.08))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_aggregate_matches_sum_of_net_profits() {
        let products = mixed_catalog();
        let pf = platform("shopify", 0.029, 0.08);

        let rows = compute_product_rows(&products, &pf).unwrap();
        assert!(rows.iter().any(|(_, f)| f.net_profit < 0.0));
        assert!(rows.iter().any(|(_, f)| f.net_profit > 0.0));

        let agg = compute_aggregate(&products, &pf).unwrap();
        let sum_net: f64 = rows.iter().map(|(_, f)| f.net_profit).sum();
        let sum_revenue: f64 = rows.iter().map(|(_, f)| f.revenue).sum();

        assert_close(agg.gross_profit, sum_net);
        assert_close(agg.total_revenue, sum_revenue);
        assert_close(agg.total_profit, sum_net);
        assert_eq!(agg.total_loss, 0.0);
    }

    #[test]
    fn test_aggregate_nets_instead_of_summing_clamped_parts() {
        let products = vec![
            product("win", 10.0, 20.0, 100, 0.0),
            product("lose", 10.0, 5.0, 100, 0.0),
        ];
        let pf = platform("free", 0.0, 0.0);

        let agg = compute_aggregate(&products, &pf).unwrap();
        assert_close(agg.total_profit, 500.0);
        assert_eq!(agg.total_loss, 0.0);

        let series = build_chart_series(&products, &pf).unwrap();
        let summed_loss: f64 = series.iter().map(|p| p.loss).sum();
        let summed_profit: f64 = series.iter().map(|p| p.profit).sum();
        assert_close(summed_profit, 1000.0);
        assert_close(summed_loss, 500.0);
    }

    #[test]
    fn test_aggregate_reports_net_loss() {
        let products = vec![product("lose", 10.0, 5.0, 10, 20.0)];
        let agg = compute_aggregate(&products, &platform("greedy", 0.9, 0.5)).unwrap();
        // 50 revenue - 100 cost - 45 commission - 25 tax - 20 ads
        assert_close(agg.gross_profit, -140.0);
        assert_eq!(agg.total_profit, 0.0);
        assert_close(agg.total_loss, 140.0);
    }

    #[test]
    fn test_chart_series_keeps_catalog_order() {
        let mut products = mixed_catalog();
        products.reverse();
        let series = build_chart_series(&products, &platform("shopify", 0.029, 0.08)).unwrap();

        let names: Vec<_> = series.iter().map(|p| p.product_name.as_str()).collect();
        let expected: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected);
        assert!(series[0].loss > 0.0);
    }

    #[test]
    fn test_platform_change_is_deterministic_and_side_effect_free() {
        let products = mixed_catalog();
        let amazon = platform("amazon", 0.15, 0.08);
        let shopify = platform("shopify", 0.029, 0.08);
        let snapshot = (products.clone(), amazon.clone(), shopify.clone());

        let a1 = compute_aggregate(&products, &amazon).unwrap();
        let s1 = compute_aggregate(&products, &shopify).unwrap();
        let a2 = compute_aggregate(&products, &amazon).unwrap();

        assert_ne!(a1, s1);
        assert_eq!(a1, a2);
        assert!(s1.total_profit > a1.total_profit);
        assert_eq!(snapshot, (products, amazon, shopify));
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let bad_product = product("bad", -1.0, 10.0, 1, 0.0);
        let bad_platform = platform("bad", 1.5, 0.0);
        let good_platform = platform("ok", 0.1, 0.1);

        assert!(matches!(
            compute_product_financials(&bad_product, &good_platform),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_aggregate(&[bad_product.clone()], &good_platform),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_aggregate(&[], &bad_platform),
            Err(Error::InvalidInput { .. })
        ));
        assert!(build_chart_series(&[bad_product], &good_platform).is_err());
    }
}
