//! General Discord commands - ping, help, and other utility commands.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**CorpusBuddy Help**\n\
        Project how investments grow, or how long a corpus lasts.\n\n\
        **Calculators** (every argument is optional and falls back to a preset)\n\
        • `/sip [monthly_investment] [duration_years] [expected_return] [save_as]` - Monthly SIP.\n\
        • `/stepup [monthly_investment] [annual_increase] [duration_years] [expected_return] [save_as]` - SIP with a yearly step-up.\n\
        • `/lumpsum [investment] [duration_years] [expected_return] [save_as]` - One-time investment.\n\
        • `/swp [investment] [monthly_withdrawal] [duration_years] [expected_return] [save_as]` - Monthly withdrawals from a corpus.\n\n\
        **Saved Calculations**\n\
        • `/history` - Lists saved calculations, newest first.\n\
        • `/show <calculation>` - Shows a saved calculation.\n\
        • `/rename <calculation> <new_name>` - Renames a saved calculation.\n\
        • `/forget <calculation>` - Deletes a saved calculation.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Refer to a saved calculation by name or by id, e.g. `#12`.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
