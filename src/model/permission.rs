//! Permission grant models.
//!
//! A grant attaches a [`FieldValue`] of [`Permission`] bits to either a role or a user
//! within one guild. A member's effective permissions are the union of their own grant
//! and the grants of every role they hold.

use sea_orm::DbErr;

use crate::{
    capability::{flags::Permission, FieldValue},
    model::parse_id,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    Role,
    User,
}

impl SubjectKind {
    /// Value stored in the `subject_kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "role" => Some(Self::Role),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// A role or user that permissions are granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subject {
    pub kind: SubjectKind,
    pub id: u64,
}

impl Subject {
    pub fn role(id: u64) -> Self {
        Self {
            kind: SubjectKind::Role,
            id,
        }
    }

    pub fn user(id: u64) -> Self {
        Self {
            kind: SubjectKind::User,
            id,
        }
    }

    /// Discord mention markup for the subject.
    pub fn mention(&self) -> String {
        match self.kind {
            SubjectKind::Role => format!("<@&{}>", self.id),
            SubjectKind::User => format!("<@{}>", self.id),
        }
    }
}

/// Permissions granted to one subject in one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionGrant {
    pub id: i32,
    /// Discord guild ID as a u64.
    pub guild_id: u64,
    pub subject: Subject,
    /// Granted [`Permission`] bits.
    pub permissions: FieldValue,
}

impl PermissionGrant {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(PermissionGrant)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse an id or the subject kind
    pub fn from_entity(entity: entity::permission_grant::Model) -> Result<Self, DbErr> {
        let kind = SubjectKind::parse(&entity.subject_kind).ok_or_else(|| {
            DbErr::Custom(format!("Unknown subject_kind: {}", entity.subject_kind))
        })?;

        Ok(Self {
            id: entity.id,
            guild_id: parse_id(&entity.guild_id, "guild_id")?,
            subject: Subject {
                kind,
                id: parse_id(&entity.subject_id, "subject_id")?,
            },
            permissions: FieldValue::from(entity.permissions),
        })
    }

    /// Granted permissions in declaration order.
    pub fn listed(&self) -> Vec<Permission> {
        Permission::assignment().list_set(self.permissions)
    }
}
