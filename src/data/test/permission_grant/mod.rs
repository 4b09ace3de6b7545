use crate::{
    capability::{flags::Permission, FieldValue},
    data::permission_grant::PermissionGrantRepository,
    model::permission::{Subject, SubjectKind},
};
use entity::prelude::*;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_by_guild_paginated;
mod get_for_member;
mod grant;
mod retain;

fn bits(permissions: &[Permission]) -> FieldValue {
    Permission::assignment().grant(FieldValue::EMPTY, permissions)
}
