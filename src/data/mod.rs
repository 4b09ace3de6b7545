//! Database repository layer.
//!
//! One repository per table. Repositories use SeaORM entity models internally and
//! return domain models from `crate::model`, so no entity type leaks into the service
//! layer or the bot. Every query is scoped by guild where the table has a guild column.

pub mod activity_check;
pub mod blacklist;
pub mod diplomacy_link;
pub mod guild;
pub mod leaderboard;
pub mod permission_grant;
pub mod rank;

#[cfg(test)]
mod test;
