//! Domain models and parameter types.
//!
//! Repositories convert entity models into these types at their boundary, parsing the
//! string-stored Discord ids into `u64` and wrapping bit columns in `FieldValue`. The
//! service layer and the bot only ever see these types.

pub mod activity;
pub mod blacklist;
pub mod diplomacy;
pub mod guild;
pub mod leaderboard;
pub mod permission;
pub mod rank;

use sea_orm::DbErr;

/// Parses a Discord id stored as a string column.
pub(crate) fn parse_id(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

/// Parses an optional Discord id column.
pub(crate) fn parse_optional_id(value: Option<&str>, column: &str) -> Result<Option<u64>, DbErr> {
    value.map(|v| parse_id(v, column)).transpose()
}
