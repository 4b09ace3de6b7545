use crate::{data::blacklist::BlacklistRepository, model::blacklist::AddBlacklistParam};
use chrono::{Duration, Utc};
use entity::prelude::*;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_by_guild_paginated;
