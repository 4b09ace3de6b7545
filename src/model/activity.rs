//! Activity check models.
//!
//! An activity check is a message with a button that members press before a deadline
//! to show they are still active. Each member's first press is recorded once.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::{parse_id, parse_optional_id};

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCheck {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    /// Posted check message, once it exists.
    pub message_id: Option<u64>,
    pub started_by: u64,
    pub deadline: DateTime<Utc>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl ActivityCheck {
    pub fn from_entity(entity: entity::activity_check::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            channel_id: parse_id(&entity.channel_id, "channel_id")?,
            message_id: parse_optional_id(entity.message_id.as_deref(), "message_id")?,
            started_by: parse_id(&entity.started_by, "started_by")?,
            deadline: entity.deadline,
            closed: entity.closed,
            created_at: entity.created_at,
        })
    }

    /// True once the check stopped accepting responses, by deadline or by hand.
    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        self.closed || now >= self.deadline
    }
}

#[derive(Debug, Clone)]
pub struct CreateActivityCheckParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub started_by: u64,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityResponse {
    pub user_id: u64,
    pub responded_at: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn from_entity(entity: entity::activity_response::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_id(&entity.user_id, "user_id")?,
            responded_at: entity.responded_at,
        })
    }
}

/// What happened when a member pressed the activity button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespondOutcome {
    Recorded,
    AlreadyResponded,
    Closed,
    NotFound,
}

/// A check together with everyone who responded, earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    pub check: ActivityCheck,
    pub responders: Vec<ActivityResponse>,
}

/// Custom id prefix of the activity check button.
pub const RESPOND_BUTTON_PREFIX: &str = "activity-respond:";

/// Custom id of the button for check `id`.
pub fn respond_button_id(id: i32) -> String {
    format!("{}{}", RESPOND_BUTTON_PREFIX, id)
}

/// Check id encoded in a button's custom id.
pub fn parse_respond_button_id(custom_id: &str) -> Option<i32> {
    custom_id
        .strip_prefix(RESPOND_BUTTON_PREFIX)
        .and_then(|id| id.parse().ok())
}
