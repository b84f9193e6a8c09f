//! Blog entity - The single site configuration row.
//!
//! The primary key is not auto-incremented: every blog row is written with
//! [`SINGLETON_ID`], so the primary key constraint itself rejects a second one.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Identity of the one and only blog configuration row
pub const SINGLETON_ID: i32 = 1;

/// Blog configuration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog")]
pub struct Model {
    /// Always [`SINGLETON_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Site title
    pub title: String,
    /// Short line shown under the title
    pub tag_line: String,
    /// Number of entries on one listing page
    pub entries_per_page: i32,
    /// Number of entries in the "recent entries" box
    pub recents: i32,
    /// Number of comments in the "recent comments" box
    pub recent_comments: i32,
}

/// `Blog` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
