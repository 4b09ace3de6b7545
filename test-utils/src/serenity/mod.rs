//! Test factories for creating Serenity API objects.
//!
//! These factories build valid Serenity structs by deserializing JSON, the same way
//! they arrive from Discord's API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_guild;
//!
//! let guild = create_test_guild(123456789, "Test Guild");
//! ```

pub mod guild;

pub use guild::create_test_guild;
