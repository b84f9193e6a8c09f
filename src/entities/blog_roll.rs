//! Blogroll entity - External links listed on the site.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Blogroll link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_roll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Target of the link; unique across the blogroll
    #[sea_orm(unique)]
    pub url: String,
    /// Link text
    pub text: String,
    pub is_published: bool,
}

/// `BlogRoll` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
