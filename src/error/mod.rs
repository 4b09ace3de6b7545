//! Error types and their user-facing replies.
//!
//! `AppError` is the top-level error for commands, event handlers and startup. Domain
//! variants carry a message meant for the person who ran the command; everything else
//! is logged in full and answered with a generic reply.

pub mod config;

use thiserror::Error;

use crate::{
    capability::{
        flags::{GuildFlag, Permission},
        AssignmentError, Flag,
    },
    error::config::ConfigError,
    pagination::PaginationError,
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A flag enum produced an invalid bit table. Fatal at startup.
    #[error(transparent)]
    FlagTableErr(#[from] AssignmentError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error(transparent)]
    PaginationErr(#[from] PaginationError),

    /// The invoking member lacks a bot permission.
    #[error("You need the `{}` permission to do that.", .0.name())]
    MissingPermission(Permission),

    /// The command belongs to a feature the guild has not enabled.
    #[error("The `{}` feature is disabled in this server.", .0.name())]
    FeatureDisabled(GuildFlag),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid command input.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),

    #[error("This can only be used inside a server.")]
    GuildOnly,
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Reply shown to the member whose command failed.
    ///
    /// Infrastructure failures are logged with full detail and answered with a generic
    /// message so no internals leak into the channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingPermission(_)
            | Self::FeatureDisabled(_)
            | Self::NotFound(_)
            | Self::BadRequest(_)
            | Self::GuildOnly => self.to_string(),
            err => {
                tracing::error!("{}", err);
                "Something went wrong while handling that command.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_reach_the_user() {
        let err = AppError::MissingPermission(Permission::ManageBlacklist);
        assert_eq!(
            err.user_message(),
            "You need the `Manage blacklist` permission to do that."
        );

        let err = AppError::FeatureDisabled(GuildFlag::Diplomacy);
        assert_eq!(
            err.user_message(),
            "The `Diplomacy` feature is disabled in this server."
        );
    }

    #[test]
    fn infrastructure_errors_are_hidden() {
        let err = AppError::DbErr(sea_orm::DbErr::Custom("disk full".to_string()));

        assert!(!err.user_message().contains("disk full"));
    }
}
