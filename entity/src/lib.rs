//! SeaORM entity definitions for every table the bot persists.

pub mod prelude;

pub mod activity_check;
pub mod activity_response;
pub mod blacklist_entry;
pub mod diplomacy_link;
pub mod guild;
pub mod leaderboard_entry;
pub mod permission_grant;
pub mod rank;
