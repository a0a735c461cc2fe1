use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site_user::Entity",
        from = "Column::UserId",
        to = "super::site_user::Column::Id",
        on_delete = "Cascade"
    )]
    SiteUser,
}

impl Related<super::site_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SiteUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
