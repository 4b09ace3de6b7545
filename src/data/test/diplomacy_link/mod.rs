use crate::{
    data::diplomacy_link::DiplomacyLinkRepository, model::diplomacy::CreateDiplomacyLinkParam,
};
use entity::prelude::*;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_by_channel;
mod upsert;
