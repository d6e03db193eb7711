//! Strategy advice requests.
//!
//! The prompt is built locally; generating the text is delegated to an
//! [`AdviceProvider`]. Every request receives a generation number, and a
//! response that arrives after a newer request was started is reported as
//! [`AdviceOutcome::Superseded`] instead of being handed back as current.

use crate::core::catalog::{Platform, Product};
use crate::core::error::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, instrument};

pub const DEFAULT_QUESTION: &str = "How can we increase the profit margin without affecting sales?";

#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// Advice text for the latest request, passed through untouched.
    Current(String),
    /// A newer request was issued while this one was in flight.
    Superseded,
}

fn money(value: f64) -> String {
    format!("${value:.2}")
}

/// Builds the consultant prompt for one product on one platform.
pub fn build_prompt(product: &Product, platform: &Platform, question: &str) -> String {
    let competitors = if product.competitor_prices.is_empty() {
        "none known".to_string()
    } else {
        product
            .competitor_prices
            .iter()
            .map(|p| money(*p))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Act as an e-commerce strategy consultant. Review the data below and give actionable advice.

Sales channel:
- Platform: {platform_name}
- Platform commission: {commission:.1}%
- Sales tax: {tax:.1}%

Product:
- Name: {product_name}
- Unit cost of goods: {capital}
- Selling price: {price}
- Units sold this period: {units}
- Competitor prices: {competitors}
- Advertising budget: {ads}
- SEO score (0-100): {seo}
- Customer rating (0-5): {rating}

Goal stated by the seller:
\"{question}\"

Answer with short sections headed Pricing, Marketing and Risks. \
Ground each recommendation in the figures above and show the margin impact of any price change.",
        platform_name = platform.name,
        commission = platform.commission_rate * 100.0,
        tax = platform.tax_rate * 100.0,
        product_name = product.name,
        capital = money(product.capital),
        price = money(product.price),
        units = product.units_sold,
        ads = money(product.ads_budget),
        seo = product.seo_score,
        rating = product.rating,
    )
}

/// Issues advice requests and tracks which one is the latest.
pub struct AdviceDesk<P: AdviceProvider> {
    provider: P,
    generation: AtomicU64,
}

impl<P: AdviceProvider> AdviceDesk<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
        }
    }

    /// Generation number of the most recently started request.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    #[instrument(
        name = "AdviceRequest",
        skip(self, product, platform, question),
        fields(product = %product.id, platform = %platform.id)
    )]
    pub async fn request(
        &self,
        product: &Product,
        platform: &Platform,
        question: &str,
    ) -> Result<AdviceOutcome> {
        if question.trim().is_empty() {
            return Err(Error::invalid(
                "advice request",
                &product.id,
                "question",
                "must not be empty",
            ));
        }
        product.validate()?;
        platform.validate()?;

        // Rejected requests never count as newer.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let prompt = build_prompt(product, platform, question);
        debug!(generation, prompt_len = prompt.len(), "Requesting advice");

        let result = self.provider.generate(&prompt).await;

        let latest = self.latest_generation();
        if latest != generation {
            if let Err(e) = &result {
                error!(error = ?e, generation, "Superseded advice request failed");
            }
            debug!(generation, latest, "Discarding superseded advice response");
            return Ok(AdviceOutcome::Superseded);
        }

        match result {
            Ok(text) => {
                debug!(generation, advice_len = text.len(), "Received advice");
                Ok(AdviceOutcome::Current(text))
            }
            Err(e) => {
                error!(error = ?e, "Advice request failed");
                Err(Error::AdviceRequestFailed(e))
            }
        }
    }
}
