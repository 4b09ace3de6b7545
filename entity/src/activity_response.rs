use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_response")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub activity_check_id: i32,
    pub user_id: String,
    pub responded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity_check::Entity",
        from = "Column::ActivityCheckId",
        to = "super::activity_check::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ActivityCheck,
}

impl Related<super::activity_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityCheck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
