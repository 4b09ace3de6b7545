//! Diplomacy (DPM) service.
//!
//! Each guild registers the local channel it uses for a partner. Traffic only flows
//! when both guilds registered each other and both have the Diplomacy feature
//! enabled; a one-sided link is stored but stays silent.

use sea_orm::DatabaseConnection;

use crate::{
    capability::flags::GuildFlag,
    data::{diplomacy_link::DiplomacyLinkRepository, guild::GuildRepository},
    error::AppError,
    model::diplomacy::{CreateDiplomacyLinkParam, DiplomacyLink, RelayTarget},
};

pub struct DiplomacyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiplomacyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers (or moves) the local channel used for a partner guild.
    ///
    /// # Returns
    /// - `Ok(DiplomacyLink)` - The stored link
    /// - `Err(AppError::BadRequest)` - The partner is the guild itself
    pub async fn link(&self, param: CreateDiplomacyLinkParam) -> Result<DiplomacyLink, AppError> {
        if param.partner_guild_id == param.guild_id {
            return Err(AppError::BadRequest(
                "A server cannot be its own diplomacy partner.".to_string(),
            ));
        }

        let repo = DiplomacyLinkRepository::new(self.db);

        Ok(repo.upsert(param).await?)
    }

    /// Removes the link to a partner, returning whether one existed.
    pub async fn unlink(&self, guild_id: u64, partner_guild_id: u64) -> Result<bool, AppError> {
        let repo = DiplomacyLinkRepository::new(self.db);

        Ok(repo.delete(guild_id, partner_guild_id).await?)
    }

    /// Checks whether traffic flows between the two guilds.
    pub async fn is_active(&self, guild_id: u64, partner_guild_id: u64) -> Result<bool, AppError> {
        let repo = DiplomacyLinkRepository::new(self.db);

        if repo.find(partner_guild_id, guild_id).await?.is_none() {
            return Ok(false);
        }

        Ok(self.diplomacy_enabled(guild_id).await?
            && self.diplomacy_enabled(partner_guild_id).await?)
    }

    pub async fn list(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<DiplomacyLink>, u64), AppError> {
        let repo = DiplomacyLinkRepository::new(self.db);

        Ok(repo.get_by_guild_paginated(guild_id, page, per_page).await?)
    }

    pub async fn count(&self, guild_id: u64) -> Result<u64, AppError> {
        let repo = DiplomacyLinkRepository::new(self.db);

        Ok(repo.count_by_guild(guild_id).await?)
    }

    /// Resolves where a message posted in `channel_id` of `guild_id` is relayed to.
    ///
    /// # Returns
    /// - `Ok(Vec<RelayTarget>)` - One target per active link using the channel; empty
    ///   when the channel is not a diplomacy channel
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn relay_targets(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Vec<RelayTarget>, AppError> {
        let repo = DiplomacyLinkRepository::new(self.db);

        let links: Vec<DiplomacyLink> = repo
            .get_by_channel(channel_id)
            .await?
            .into_iter()
            .filter(|link| link.guild_id == guild_id)
            .collect();

        if links.is_empty() || !self.diplomacy_enabled(guild_id).await? {
            return Ok(Vec::new());
        }

        let mut targets = Vec::new();

        for link in links {
            let Some(reverse) = repo.find(link.partner_guild_id, guild_id).await? else {
                continue;
            };

            if !self.diplomacy_enabled(link.partner_guild_id).await? {
                continue;
            }

            targets.push(RelayTarget {
                source_guild_id: guild_id,
                partner_guild_id: link.partner_guild_id,
                channel_id: reverse.channel_id,
            });
        }

        Ok(targets)
    }

    async fn diplomacy_enabled(&self, guild_id: u64) -> Result<bool, AppError> {
        let settings = GuildRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?;

        Ok(settings.is_some_and(|settings| settings.has_feature(GuildFlag::Diplomacy)))
    }
}
