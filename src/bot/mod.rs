//! Discord bot: slash commands, gateway event handlers and interactive pagination.
//!
//! Commands are poise commands sharing [`start::Data`]. Gateway events go through a
//! serenity `EventHandler` that delegates to the handler modules. The bot's HTTP client
//! is handed out at startup so the scheduler can post without its own connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, used to register guilds
//! - `GUILD_MEMBERS` - Member joins, used to ban blacklisted users (privileged intent)
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Diplomacy relay (privileged intent)
//!
//! Privileged intents must be enabled in the Discord Developer Portal.

pub mod commands;
pub mod guard;
pub mod handler;
pub mod paginate;
pub mod start;
