use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub precio: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Inventario }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Inventario => Entity::has_one(super::inventario::Entity).into(),
        }
    }
}

impl Related<super::inventario::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inventario.def() }
}

impl ActiveModelBehavior for ActiveModel {}
