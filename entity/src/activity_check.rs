use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_check")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub channel_id: String,
    /// Set once the check message has been posted.
    pub message_id: Option<String>,
    pub started_by: String,
    pub deadline: DateTimeUtc,
    pub closed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity_response::Entity")]
    ActivityResponse,
}

impl Related<super::activity_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityResponse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
