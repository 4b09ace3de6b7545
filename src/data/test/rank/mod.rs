use crate::{data::rank::RankRepository, model::rank::CreateRankParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_by_guild;
