//! Blog entry entity - Posts and standalone pages.
//!
//! Title, slug, summary, meta fields and `created_on` are derived on every
//! save by [`crate::core::entry::save_entry`]; never insert rows directly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Blog entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Entry title, inferred from the text when left blank
    pub title: String,
    /// URL-safe identifier, unique across all entries
    #[sea_orm(unique)]
    pub slug: String,
    /// Raw markup as written by the author
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// Markup type tag used to render `text` (e.g. `"plain"`, `"html"`)
    pub text_markup_type: String,
    /// Output of the markup renderer for `text`
    #[sea_orm(column_type = "Text")]
    pub text_rendered: String,
    /// Short summary, first 100 words of `text` unless supplied
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    /// Publication timestamp; the unpublished sentinel until first publish
    pub created_on: DateTimeUtc,
    /// Author identity
    pub created_by: String,
    /// Standalone page (true) or timeline post (false)
    pub is_page: bool,
    pub is_published: bool,
    pub publish_date: Option<DateTimeUtc>,
    pub comments_allowed: bool,
    /// Authored with the rich text editor
    pub is_rte: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_keywords: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
}

/// Defines relationships between `BlogEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One entry has many comments
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    /// One entry has many reactions
    #[sea_orm(has_many = "super::reaction::Entity")]
    Reactions,
    /// One entry has many tags
    #[sea_orm(has_many = "super::entry_tag::Entity")]
    Tags,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reactions.def()
    }
}

impl Related<super::entry_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
