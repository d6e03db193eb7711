//! Catalog records and the dashboard selection state.
//!
//! Platforms and products are immutable reference data loaded once from the
//! configuration file. Every record is validated before the engine sees it.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Platform {
    pub id: String,
    pub name: String,
    #[serde(alias = "commissionRate")]
    pub commission_rate: f64,
    #[serde(alias = "taxRate")]
    pub tax_rate: f64,
}

impl Platform {
    /// Both rates must be finite fractions in [0, 1]. Their sum is allowed to
    /// exceed 1.
    pub fn validate(&self) -> Result<()> {
        check_fraction("platform", &self.id, "commission_rate", self.commission_rate)?;
        check_fraction("platform", &self.id, "tax_rate", self.tax_rate)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub capital: f64,
    pub price: f64,
    #[serde(alias = "unitsSold")]
    pub units_sold: u64,
    #[serde(default, alias = "competitorPrices")]
    pub competitor_prices: Vec<f64>,
    #[serde(alias = "adsBudget")]
    pub ads_budget: f64,
    #[serde(alias = "seoScore")]
    pub seo_score: f64,
    pub rating: f64,
}

impl Product {
    pub fn validate(&self) -> Result<()> {
        check_amount("product", &self.id, "capital", self.capital)?;
        check_amount("product", &self.id, "price", self.price)?;
        check_amount("product", &self.id, "ads_budget", self.ads_budget)?;
        for price in &self.competitor_prices {
            check_amount("product", &self.id, "competitor_prices", *price)?;
        }
        check_range("product", &self.id, "seo_score", self.seo_score, 100.0)?;
        check_range("product", &self.id, "rating", self.rating, 5.0)
    }
}

fn check_amount(entity: &'static str, id: &str, field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        let reason = format!("must be finite, got {value}");
        return Err(Error::invalid(entity, id, field, reason));
    }
    if value < 0.0 {
        let reason = format!("must be non-negative, got {value}");
        return Err(Error::invalid(entity, id, field, reason));
    }
    Ok(())
}

fn check_range(
    entity: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
    max: f64,
) -> Result<()> {
    check_amount(entity, id, field, value)?;
    if value > max {
        let reason = format!("must be at most {max}, got {value}");
        return Err(Error::invalid(entity, id, field, reason));
    }
    Ok(())
}

fn no_platforms() -> Error {
    Error::invalid("catalog", "platforms", "platforms", "must not be empty")
}

fn check_fraction(entity: &'static str, id: &str, field: &'static str, value: f64) -> Result<()> {
    check_range(entity, id, field, value, 1.0)
}

/// The platforms and products the dashboard works on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Catalog {
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Validates every record, rejects duplicate ids and requires at least
    /// one platform so a default selection always exists.
    pub fn validate(&self) -> Result<()> {
        if self.platforms.is_empty() {
            return Err(no_platforms());
        }

        let mut seen = HashSet::new();
        for platform in &self.platforms {
            platform.validate()?;
            if !seen.insert(platform.id.as_str()) {
                return Err(Error::invalid("platform", &platform.id, "id", "is duplicated"));
            }
        }

        let mut seen = HashSet::new();
        for product in &self.products {
            product.validate()?;
            if !seen.insert(product.id.as_str()) {
                return Err(Error::invalid("product", &product.id, "id", "is duplicated"));
            }
        }

        debug!(
            platforms = self.platforms.len(),
            products = self.products.len(),
            "Catalog validated"
        );
        Ok(())
    }

    pub fn platform(&self, id: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Which platform and product the user is looking at.
///
/// Selections hold ids only; the records themselves are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    platform_id: String,
    product_id: Option<String>,
}

impl Selection {
    /// Starts on the first platform and the first product, if any.
    pub fn new(catalog: &Catalog) -> Result<Self> {
        let platform = catalog.platforms.first().ok_or_else(no_platforms)?;
        Ok(Self {
            platform_id: platform.id.clone(),
            product_id: catalog.products.first().map(|p| p.id.clone()),
        })
    }

    pub fn select_platform(&mut self, catalog: &Catalog, id: &str) -> Result<()> {
        if catalog.platform(id).is_none() {
            return Err(Error::invalid("platform", id, "id", "is not in the catalog"));
        }
        debug!(platform = id, "Platform selected");
        self.platform_id = id.to_string();
        Ok(())
    }

    pub fn select_product(&mut self, catalog: &Catalog, id: Option<&str>) -> Result<()> {
        if let Some(id) = id
            && catalog.product(id).is_none()
        {
            return Err(Error::invalid("product", id, "id", "is not in the catalog"));
        }
        debug!(product = ?id, "Product selected");
        self.product_id = id.map(str::to_string);
        Ok(())
    }

    pub fn platform<'a>(&self, catalog: &'a Catalog) -> Result<&'a Platform> {
        catalog.platform(&self.platform_id).ok_or_else(|| {
            Error::invalid("platform", &self.platform_id, "id", "is not in the catalog")
        })
    }

    pub fn product<'a>(&self, catalog: &'a Catalog) -> Option<&'a Product> {
        self.product_id.as_deref().and_then(|id| catalog.product(id))
    }

    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }
}
