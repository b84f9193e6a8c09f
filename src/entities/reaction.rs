//! Reaction entity - Feedback imported from external services.
//!
//! Reactions are keyed by the identifier the external source assigned, and
//! have no moderation state: once stored they are always shown.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reactions")]
pub struct Model {
    /// Identifier assigned by the external source
    #[sea_orm(primary_key, auto_increment = false)]
    pub reaction_id: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// Entry the reaction refers to
    pub entry_id: i64,
    pub created_on: DateTimeUtc,
    pub user_name: String,
    pub user_url: String,
    /// Label of the external source (e.g. `"twitter"`)
    pub source: String,
    pub profile_image: Option<String>,
}

/// Defines relationships between Reaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reaction belongs to one entry
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
