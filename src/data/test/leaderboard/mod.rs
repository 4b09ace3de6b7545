use crate::{data::leaderboard::LeaderboardRepository, model::leaderboard::PointsChange};
use chrono::{Duration, Utc};
use entity::prelude::*;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod apply_change;
mod count_above;
mod get_by_guild_paginated;
