//! Entry tag entity - One row per (entry, tag label) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry_tags")]
pub struct Model {
    /// Tagged entry
    #[sea_orm(primary_key, auto_increment = false)]
    pub entry_id: i64,
    /// Tag label
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
}

/// Defines relationships between `EntryTag` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each tag assignment belongs to one entry
    #[sea_orm(
        belongs_to = "super::blog_entry::Entity",
        from = "Column::EntryId",
        to = "super::blog_entry::Column::Id",
        on_delete = "Cascade"
    )]
    BlogEntry,
}

impl Related<super::blog_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
