pub use super::activity_check::Entity as ActivityCheck;
pub use super::activity_response::Entity as ActivityResponse;
pub use super::blacklist_entry::Entity as BlacklistEntry;
pub use super::diplomacy_link::Entity as DiplomacyLink;
pub use super::guild::Entity as Guild;
pub use super::leaderboard_entry::Entity as LeaderboardEntry;
pub use super::permission_grant::Entity as PermissionGrant;
pub use super::rank::Entity as Rank;
