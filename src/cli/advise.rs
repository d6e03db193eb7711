use super::ui;
use crate::core::{AdviceDesk, AdviceOutcome, AdviceProvider, Catalog, Error, Selection};
use anyhow::{Result, anyhow};

pub const FAILURE_MESSAGE: &str =
    "Failed to get advice from AI. Please check your API key and try again.";

/// Advice text as it should appear in the terminal: line breaks kept as
/// paragraph breaks, trailing whitespace dropped.
pub fn render_advice(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

pub async fn run<P: AdviceProvider>(
    desk: &AdviceDesk<P>,
    catalog: &Catalog,
    selection: &Selection,
    question: &str,
) -> Result<()> {
    let product = selection
        .product(catalog)
        .ok_or_else(|| anyhow!("Select a product to get AI-powered advice."))?;
    let platform = selection.platform(catalog)?;

    println!(
        "Strategy Advisor for {} on {}",
        ui::style_text(&product.name, ui::StyleType::Title),
        ui::style_text(&platform.name, ui::StyleType::TotalLabel)
    );
    println!(
        "{} {}\n",
        ui::style_text("Your Strategic Goal:", ui::StyleType::Subtle),
        question
    );

    let pb = ui::new_spinner("Thinking...");
    let outcome = desk.request(product, platform, question).await;
    pb.finish_and_clear();

    match outcome {
        Ok(AdviceOutcome::Current(text)) => {
            println!(
                "{}\n\n{}",
                ui::style_text("AI Recommendation", ui::StyleType::TotalLabel),
                render_advice(&text)
            );
            Ok(())
        }
        Ok(AdviceOutcome::Superseded) => {
            println!(
                "{}",
                ui::style_text("A newer request replaced this one.", ui::StyleType::Subtle)
            );
            Ok(())
        }
        Err(e @ Error::AdviceRequestFailed(_)) => {
            eprintln!("{}", ui::style_text(FAILURE_MESSAGE, ui::StyleType::Error));
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
