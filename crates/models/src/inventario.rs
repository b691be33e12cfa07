use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::producto;

/// Stock row keyed by the product it counts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub producto_id: i64,
    pub cantidad: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Producto }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Producto => Entity::belongs_to(producto::Entity)
                .from(Column::ProductoId)
                .to(producto::Column::Id)
                .into(),
        }
    }
}

impl Related<producto::Entity> for Entity {
    fn to() -> RelationDef { Relation::Producto.def() }
}

impl ActiveModelBehavior for ActiveModel {}
