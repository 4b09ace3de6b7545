use crate::{
    capability::{
        flags::{AuditEvent, GuildFlag},
        FieldValue,
    },
    data::guild::GuildRepository,
};
use entity::prelude::*;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod find_by_guild_id;
mod update_flags;
mod upsert;
