//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the in-memory summary cache, so typing never hits the database.

use crate::{bot::BotData, errors::Error};

/// Provides up to 25 saved calculation names containing the partial input, newest first.
pub async fn autocomplete_saved_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    ctx.data().cache.matching(partial).await
}
