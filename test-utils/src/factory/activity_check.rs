//! Activity check and response factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for activity checks. Defaults to an open check due in one hour.
pub struct ActivityCheckFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    message_id: Option<String>,
    started_by: String,
    deadline: DateTime<Utc>,
    closed: bool,
}

impl<'a> ActivityCheckFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            channel_id: next_id().to_string(),
            message_id: None,
            started_by: next_id().to_string(),
            deadline: Utc::now() + Duration::hours(1),
            closed: false,
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn message_id(mut self, message_id: Option<&str>) -> Self {
        self.message_id = message_id.map(str::to_string);
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub async fn build(self) -> Result<entity::activity_check::Model, DbErr> {
        entity::activity_check::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            message_id: ActiveValue::Set(self.message_id),
            started_by: ActiveValue::Set(self.started_by),
            deadline: ActiveValue::Set(self.deadline),
            closed: ActiveValue::Set(self.closed),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open activity check due in one hour.
pub async fn create_activity_check(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::activity_check::Model, DbErr> {
    ActivityCheckFactory::new(db, guild_id).build().await
}

/// Records a response from `user_id` to the check.
pub async fn create_activity_response(
    db: &DatabaseConnection,
    activity_check_id: i32,
    user_id: &str,
) -> Result<entity::activity_response::Model, DbErr> {
    entity::activity_response::ActiveModel {
        activity_check_id: ActiveValue::Set(activity_check_id),
        user_id: ActiveValue::Set(user_id.to_string()),
        responded_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
