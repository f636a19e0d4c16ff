//! Saved calculation Discord commands - history, show, rename, and forget.
//!
//! A saved calculation is referenced either by name (autocompleted from the cache) or
//! by id written as `#12`. Names are not unique; a name refers to the newest match.

use crate::{
    core::saved::{self, SavedCalculation},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// How the user pointed at a saved calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationRef {
    /// `#12`
    Id(i64),
    /// Anything else, trimmed
    Name(String),
}

impl CalculationRef {
    /// `#12` is an id; anything else is a name.
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        trimmed
            .strip_prefix('#')
            .and_then(|digits| digits.parse().ok())
            .map_or_else(|| Self::Name(trimmed.to_string()), Self::Id)
    }
}

/// Looks up the saved calculation a user referred to.
pub async fn resolve(
    db: &DatabaseConnection,
    reference: &str,
) -> Result<Option<SavedCalculation>> {
    match CalculationRef::parse(reference) {
        CalculationRef::Id(id) => saved::get_saved_calculation(db, id).await,
        CalculationRef::Name(name) => saved::find_saved_calculation_by_name(db, &name).await,
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::resolve;
    use crate::{
        bot::{BotData, commands::calculator::projection_embed, handlers::autocomplete},
        core::{format::format_compact, saved},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use tracing::info;

    /// Most entries listed by `/history`.
    const HISTORY_LIMIT: usize = 20;

    /// Lists saved calculations, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let calculations = saved::list_saved_calculations(db).await?;

        if calculations.is_empty() {
            ctx.say("📭 No saved calculations yet. Add `save_as` to any calculator command to keep one!")
                .await?;
            return Ok(());
        }

        let mut lines = String::new();
        for calculation in calculations.iter().take(HISTORY_LIMIT) {
            writeln!(
                lines,
                "`#{}` **{}** · {} · {} · {}",
                calculation.id,
                calculation.name,
                calculation.calculator_type().label(),
                format_compact(calculation.results.headline_value()),
                calculation.created_at.format("%Y-%m-%d")
            )?;
        }

        let history_embed = serenity::CreateEmbed::default()
            .title("**Saved Calculations**")
            .color(0x0058_65F2) // Discord purple
            .description(lines)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {} of {}",
                calculations.len().min(HISTORY_LIMIT),
                calculations.len()
            )));

        ctx.send(poise::CreateReply::default().embed(history_embed))
            .await?;
        Ok(())
    }

    /// Shows a saved calculation with its full projection.
    #[poise::command(slash_command, prefix_command)]
    pub async fn show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Saved calculation name, or #id"]
        #[autocomplete = "autocomplete::autocomplete_saved_name"]
        calculation: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(snapshot) = resolve(db, &calculation).await? else {
            ctx.say(format!("❌ No saved calculation matches '{calculation}'."))
                .await?;
            return Ok(());
        };

        let embed = projection_embed(&snapshot.name, &snapshot.inputs, &snapshot.results).footer(
            serenity::CreateEmbedFooter::new(format!(
                "#{} · {} · saved {}",
                snapshot.id,
                snapshot.calculator_type().label(),
                snapshot.created_at.format("%Y-%m-%d %H:%M UTC")
            )),
        );
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Renames a saved calculation.
    #[poise::command(slash_command, prefix_command)]
    pub async fn rename(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Saved calculation name, or #id"]
        #[autocomplete = "autocomplete::autocomplete_saved_name"]
        calculation: String,
        #[description = "New name"] new_name: String,
    ) -> Result<()> {
        let data = ctx.data();
        let Some(snapshot) = resolve(&data.database, &calculation).await? else {
            ctx.say(format!("❌ No saved calculation matches '{calculation}'."))
                .await?;
            return Ok(());
        };

        match saved::rename_saved_calculation(&data.database, snapshot.id, &new_name).await {
            Ok(Some(renamed)) => {
                info!(
                    "Saved calculation {} renamed from '{}' to '{}'.",
                    renamed.id, snapshot.name, renamed.name
                );
                data.cache.refresh_after(&data.database, "rename").await;
                ctx.say(format!(
                    "✏️ Renamed '{}' to '{}'.",
                    snapshot.name, renamed.name
                ))
                .await?;
            }
            Ok(None) => {
                ctx.say(format!("❌ '{}' was deleted before it could be renamed.", snapshot.name))
                    .await?;
            }
            Err(e @ Error::Validation { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Deletes a saved calculation.
    #[poise::command(slash_command, prefix_command)]
    pub async fn forget(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Saved calculation name, or #id"]
        #[autocomplete = "autocomplete::autocomplete_saved_name"]
        calculation: String,
    ) -> Result<()> {
        let data = ctx.data();
        let Some(snapshot) = resolve(&data.database, &calculation).await? else {
            ctx.say(format!("❌ No saved calculation matches '{calculation}'."))
                .await?;
            return Ok(());
        };

        saved::delete_saved_calculation(&data.database, snapshot.id).await?;
        info!("Saved calculation {} ('{}') deleted.", snapshot.id, snapshot.name);
        data.cache.refresh_after(&data.database, "delete").await;

        ctx.say(format!("🗑️ Deleted '{}'.", snapshot.name)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
