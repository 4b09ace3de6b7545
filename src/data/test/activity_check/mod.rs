use crate::{
    data::activity_check::ActivityCheckRepository, model::activity::CreateActivityCheckParam,
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add_response;
mod close;
mod create;
mod find_expired;
