//! Comment entity - Reader comments attached to a blog entry.
//!
//! Visibility is an explicit [`ModerationState`] instead of a nullable
//! public flag next to a spam flag; see [`ModerationState::resolve`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation state of a comment
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    /// Waiting for a moderator; not shown
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Shown to readers
    #[sea_orm(string_value = "public")]
    Public,
    /// Rejected as spam; never shown and not counted
    #[sea_orm(string_value = "spam")]
    Spam,
}

impl ModerationState {
    /// Resolves the state from the spam verdict and the requested visibility.
    ///
    /// Spam always wins over the requested visibility.
    #[must_use]
    pub const fn resolve(is_spam: bool, is_public: Option<bool>) -> Self {
        match (is_spam, is_public) {
            (true, _) => Self::Spam,
            (false, Some(true)) => Self::Public,
            (false, _) => Self::Pending,
        }
    }

    #[must_use]
    pub const fn is_spam(self) -> bool {
        matches!(self, Self::Spam)
    }

    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Comment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    /// Unique identifier for the comment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Comment body
    #[sea_orm(column_type = "Text")]
    pub text: String,
    /// Entry the comment was left on
    pub entry_id: i64,
    /// When the comment was submitted
    pub created_on: DateTimeUtc,
    /// Display name of the commenter
    pub user_name: String,
    /// Homepage of the commenter, may be empty
    pub user_url: String,
    /// Authenticated user identity, if the commenter was logged in
    pub created_by: Option<String>,
    pub email_id: String,
    pub moderation: ModerationState,
    /// Submitter IP address
    pub user_ip: Option<String>,
    pub user_agent: String,
}

impl Model {
    #[must_use]
    pub const fn is_spam(&self) -> bool {
        self.moderation.is_spam()
    }

    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.moderation.is_public()
    }
}

/// Defines relationships between Comment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each comment belongs to one entry
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
