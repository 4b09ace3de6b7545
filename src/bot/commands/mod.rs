//! Slash commands.
//!
//! Every command is guild-only. Commands check the guild feature first, then the
//! member's bot permission, then act through the service layer.

use crate::{bot::start::Data, error::AppError};

pub mod activity;
pub mod blacklist;
pub mod config;
pub mod diplomacy;
pub mod leaderboard;
pub mod permissions;
pub mod proxy;
pub mod ranks;

/// Every command the bot registers.
pub fn all() -> Vec<poise::Command<Data, AppError>> {
    vec![
        config::config(),
        permissions::permissions(),
        blacklist::blacklist(),
        leaderboard::points(),
        leaderboard::leaderboard(),
        leaderboard::rank(),
        ranks::ranks(),
        activity::activity(),
        diplomacy::dpm(),
        proxy::proxy(),
    ]
}

/// Parses a Discord snowflake typed as text.
///
/// Slash command integers cannot hold every snowflake, so IDs of things the bot cannot
/// resolve itself (other guilds, old messages) are taken as strings.
pub(crate) fn parse_snowflake(value: &str, what: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| AppError::BadRequest(format!("`{}` is not a valid {} ID.", value, what)))
}
