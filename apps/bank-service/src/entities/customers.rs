use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::currency_accounts::Entity")]
    CurrencyAccounts,
}

impl Related<super::currency_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CurrencyAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
