//! Activity check repository.
//!
//! Manages activity checks and the responses recorded against them. Responses are
//! unique per (check, user) and are removed with their check.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::activity::{ActivityCheck, ActivityResponse, CreateActivityCheckParam};

pub struct ActivityCheckRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityCheckRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an open activity check without a message
    pub async fn create(&self, param: CreateActivityCheckParam) -> Result<ActivityCheck, DbErr> {
        let entity = entity::activity_check::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            started_by: ActiveValue::Set(param.started_by.to_string()),
            deadline: ActiveValue::Set(param.deadline),
            closed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ActivityCheck::from_entity(entity)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<ActivityCheck>, DbErr> {
        entity::prelude::ActivityCheck::find_by_id(id)
            .one(self.db)
            .await?
            .map(ActivityCheck::from_entity)
            .transpose()
    }

    /// Records the message the check was posted as.
    pub async fn set_message_id(&self, id: i32, message_id: u64) -> Result<(), DbErr> {
        entity::prelude::ActivityCheck::update_many()
            .col_expr(
                entity::activity_check::Column::MessageId,
                Expr::value(message_id.to_string()),
            )
            .filter(entity::activity_check::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Closes an open check.
    ///
    /// # Returns
    /// - `Ok(true)` - The check was open and is now closed
    /// - `Ok(false)` - The check was already closed or does not exist
    pub async fn close(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ActivityCheck::update_many()
            .col_expr(entity::activity_check::Column::Closed, Expr::value(true))
            .filter(entity::activity_check::Column::Id.eq(id))
            .filter(entity::activity_check::Column::Closed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets open checks whose deadline is at or before `now`.
    pub async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<ActivityCheck>, DbErr> {
        entity::prelude::ActivityCheck::find()
            .filter(entity::activity_check::Column::Closed.eq(false))
            .filter(entity::activity_check::Column::Deadline.lte(now))
            .order_by_asc(entity::activity_check::Column::Deadline)
            .all(self.db)
            .await?
            .into_iter()
            .map(ActivityCheck::from_entity)
            .collect()
    }

    /// Records a user's response.
    ///
    /// # Returns
    /// - `Ok(true)` - Response recorded
    /// - `Ok(false)` - The user had already responded to this check
    pub async fn add_response(
        &self,
        check_id: i32,
        user_id: u64,
        responded_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let existing = entity::prelude::ActivityResponse::find()
            .filter(entity::activity_response::Column::ActivityCheckId.eq(check_id))
            .filter(entity::activity_response::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        entity::activity_response::ActiveModel {
            activity_check_id: ActiveValue::Set(check_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            responded_at: ActiveValue::Set(responded_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Gets every response to a check, earliest first.
    pub async fn get_responses(&self, check_id: i32) -> Result<Vec<ActivityResponse>, DbErr> {
        entity::prelude::ActivityResponse::find()
            .filter(entity::activity_response::Column::ActivityCheckId.eq(check_id))
            .order_by_asc(entity::activity_response::Column::RespondedAt)
            .order_by_asc(entity::activity_response::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ActivityResponse::from_entity)
            .collect()
    }
}
