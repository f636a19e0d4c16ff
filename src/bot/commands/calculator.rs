//! Calculator Discord commands - `/sip`, `/stepup`, `/lumpsum`, and `/swp`.
//!
//! Every argument is optional and falls back to the configured preset. Passing `save_as`
//! stores the projection as a saved calculation.

use crate::{
    bot::BotData,
    core::{
        projection::{CalculationInput, CalculationResult, calculate},
        report, saved,
        validation::validate,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Rows shown in the breakdown table of an embed.
const BREAKDOWN_ROWS: usize = 12;

/// Builds the embed showing an input, its totals, and its yearly breakdown.
#[must_use]
pub fn projection_embed(
    title: &str,
    input: &CalculationInput,
    results: &CalculationResult,
) -> serenity::CreateEmbed {
    let mut fields: Vec<(String, String, bool)> = report::input_fields(input)
        .into_iter()
        .chain(report::summary_fields(results))
        .map(|(label, value)| (label.to_string(), value, true))
        .collect();
    fields.push((
        "Yearly breakdown".to_string(),
        format!("```\n{}```", report::breakdown_table(results, BREAKDOWN_ROWS)),
        false,
    ));

    let embed = serenity::CreateEmbed::default()
        .title(title)
        .color(0x0027_AE60) // Green
        .fields(fields);

    match report::exhaustion_note(input, results) {
        Some(note) => embed.description(note),
        None => embed,
    }
}

/// Validates, projects, optionally saves, and replies with the projection embed.
async fn respond_with_projection(
    ctx: poise::Context<'_, BotData, Error>,
    input: CalculationInput,
    save_as: Option<String>,
) -> Result<()> {
    if let Err(e) = validate(&input) {
        ctx.say(format!("❌ {e}")).await?;
        return Ok(());
    }

    let results = calculate(&input);
    let kind = input.calculator_type();
    let mut embed = projection_embed(&format!("{} projection", kind.label()), &input, &results);

    if let Some(name) = save_as {
        let data = ctx.data();
        match saved::create_saved_calculation(&data.database, &name, &input, &results).await {
            Ok(snapshot) => {
                info!(
                    "User {} saved {} calculation '{}' (ID: {}).",
                    ctx.author().name,
                    kind,
                    snapshot.name,
                    snapshot.id
                );
                data.cache.refresh_after(&data.database, "save").await;
                embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                    "💾 Saved as '{}' (#{})",
                    snapshot.name, snapshot.id
                )));
            }
            Err(e @ Error::Validation { .. }) => {
                embed = embed.footer(serenity::CreateEmbedFooter::new(format!("⚠️ Not saved: {e}")));
            }
            Err(e) => return Err(e),
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::respond_with_projection;
    use crate::{
        bot::BotData,
        core::projection::{CalculationInput, LumpSumInput, SipInput, SipStepUpInput, SwpInput},
        errors::{Error, Result},
    };

    /// Projects a monthly SIP.
    #[poise::command(slash_command, prefix_command)]
    pub async fn sip(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Monthly investment in ₹ (500 to 1,00,00,000)"] monthly_investment: Option<
            f64,
        >,
        #[description = "Duration in years (1 to 50)"] duration_years: Option<u32>,
        #[description = "Expected annual return in % (1 to 30)"] expected_return: Option<f64>,
        #[description = "Save the result under this name"] save_as: Option<String>,
    ) -> Result<()> {
        let preset = ctx.data().presets.sip;
        let input = CalculationInput::Sip(SipInput {
            monthly_investment: monthly_investment.unwrap_or(preset.monthly_investment),
            duration_years: duration_years.unwrap_or(preset.duration_years),
            expected_return: expected_return.unwrap_or(preset.expected_return),
        });
        respond_with_projection(ctx, input, save_as).await
    }

    /// Projects a SIP whose contribution steps up every year.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stepup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Starting monthly investment in ₹ (500 to 1,00,00,000)"]
        monthly_investment: Option<f64>,
        #[description = "Yearly increase of the contribution in % (0 to 100)"] annual_increase: Option<
            f64,
        >,
        #[description = "Duration in years (1 to 50)"] duration_years: Option<u32>,
        #[description = "Expected annual return in % (1 to 30)"] expected_return: Option<f64>,
        #[description = "Save the result under this name"] save_as: Option<String>,
    ) -> Result<()> {
        let preset = ctx.data().presets.step_up;
        let input = CalculationInput::SipStepUp(SipStepUpInput {
            monthly_investment: monthly_investment.unwrap_or(preset.monthly_investment),
            duration_years: duration_years.unwrap_or(preset.duration_years),
            expected_return: expected_return.unwrap_or(preset.expected_return),
            annual_increase: annual_increase.unwrap_or(preset.annual_increase),
        });
        respond_with_projection(ctx, input, save_as).await
    }

    /// Projects a one-time investment.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lumpsum(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Investment in ₹ (1,000 to 10,00,00,000)"] investment: Option<f64>,
        #[description = "Duration in years (1 to 50)"] duration_years: Option<u32>,
        #[description = "Expected annual return in % (1 to 30)"] expected_return: Option<f64>,
        #[description = "Save the result under this name"] save_as: Option<String>,
    ) -> Result<()> {
        let preset = ctx.data().presets.lump_sum;
        let input = CalculationInput::LumpSum(LumpSumInput {
            investment: investment.unwrap_or(preset.investment),
            duration_years: duration_years.unwrap_or(preset.duration_years),
            expected_return: expected_return.unwrap_or(preset.expected_return),
        });
        respond_with_projection(ctx, input, save_as).await
    }

    /// Projects monthly withdrawals from a corpus.
    #[poise::command(slash_command, prefix_command)]
    pub async fn swp(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Starting corpus in ₹ (10,000 to 10,00,00,000)"] investment: Option<f64>,
        #[description = "Monthly withdrawal in ₹ (1,000 to 1,00,00,000)"] monthly_withdrawal: Option<
            f64,
        >,
        #[description = "Duration in years (1 to 50)"] duration_years: Option<u32>,
        #[description = "Expected annual return in % (1 to 30)"] expected_return: Option<f64>,
        #[description = "Save the result under this name"] save_as: Option<String>,
    ) -> Result<()> {
        let preset = ctx.data().presets.swp;
        let input = CalculationInput::Swp(SwpInput {
            investment: investment.unwrap_or(preset.investment),
            monthly_withdrawal: monthly_withdrawal.unwrap_or(preset.monthly_withdrawal),
            duration_years: duration_years.unwrap_or(preset.duration_years),
            expected_return: expected_return.unwrap_or(preset.expected_return),
        });
        respond_with_projection(ctx, input, save_as).await
    }
}

// Re-export all commands
pub use inner::*;
