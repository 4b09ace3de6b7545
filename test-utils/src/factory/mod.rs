//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Discord ids are
//! generated from a shared counter so rows never collide within a test.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::create_guild(&db).await?;
//! let entry = factory::create_leaderboard_entry(&db, &guild.guild_id, 40).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let rank = factory::rank::RankFactory::new(&db, &guild.guild_id)
//!     .name("Veteran")
//!     .min_points(100)
//!     .role_id(Some("555"))
//!     .build()
//!     .await?;
//! ```

pub mod activity_check;
pub mod blacklist_entry;
pub mod diplomacy_link;
pub mod guild;
pub mod helpers;
pub mod leaderboard_entry;
pub mod permission_grant;
pub mod rank;

// Re-export commonly used factory functions for concise usage
pub use activity_check::{create_activity_check, create_activity_response};
pub use blacklist_entry::create_blacklist_entry;
pub use diplomacy_link::create_diplomacy_link;
pub use guild::create_guild;
pub use leaderboard_entry::create_leaderboard_entry;
pub use permission_grant::{create_role_grant, create_user_grant};
pub use rank::create_rank;
