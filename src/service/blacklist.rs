//! Blacklist service.
//!
//! Adding a user twice reports the existing entry instead of failing. Banning is left
//! to the caller, which owns the Discord client.

use sea_orm::DatabaseConnection;

use crate::{
    data::blacklist::BlacklistRepository,
    error::AppError,
    model::blacklist::{AddBlacklistOutcome, AddBlacklistParam, BlacklistEntry},
};

pub struct BlacklistService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlacklistService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a user to the guild's blacklist.
    ///
    /// # Returns
    /// - `Ok(AddBlacklistOutcome::Added)` - New entry created
    /// - `Ok(AddBlacklistOutcome::AlreadyListed)` - The user was already listed; the
    ///   stored entry is returned unchanged
    /// - `Err(AppError::DbErr)` - Database error during query or insert
    pub async fn add(&self, param: AddBlacklistParam) -> Result<AddBlacklistOutcome, AppError> {
        let repo = BlacklistRepository::new(self.db);

        if let Some(existing) = repo.find(param.guild_id, param.user_id).await? {
            return Ok(AddBlacklistOutcome::AlreadyListed(existing));
        }

        let entry = repo.create(param).await?;

        Ok(AddBlacklistOutcome::Added(entry))
    }

    /// Removes a user from the blacklist, returning whether they were listed.
    pub async fn remove(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        let repo = BlacklistRepository::new(self.db);

        Ok(repo.delete(guild_id, user_id).await?)
    }

    pub async fn check(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BlacklistEntry>, AppError> {
        let repo = BlacklistRepository::new(self.db);

        Ok(repo.find(guild_id, user_id).await?)
    }

    pub async fn list(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<BlacklistEntry>, u64), AppError> {
        let repo = BlacklistRepository::new(self.db);

        Ok(repo.get_by_guild_paginated(guild_id, page, per_page).await?)
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        let repo = BlacklistRepository::new(self.db);

        Ok(repo.count_by_guild(guild_id).await?)
    }
}
