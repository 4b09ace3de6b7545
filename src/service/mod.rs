//! Service layer for the bot's features.
//!
//! Services hold the rules of each feature and orchestrate repositories. They return
//! domain models and `AppError`, so commands, event handlers and the scheduler share
//! one implementation. Services that talk to Discord take the shared `Http` client.

pub mod activity;
pub mod activity_notification;
pub mod audit;
pub mod blacklist;
pub mod diplomacy;
pub mod guild;
pub mod leaderboard;
pub mod permission;
pub mod rank;
