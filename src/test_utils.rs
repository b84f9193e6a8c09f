//! Shared test utilities for blogango.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        comment::{self, NewComment},
        entry::{self, EntryDraft},
        reaction::{self, NewReaction},
    },
    entities,
    errors::Result,
    markup::MarkupRegistry,
};
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A published post draft with sensible defaults.
///
/// # Defaults
/// * `created_by`: `"author"`
/// * `text`: `"Test body for <title>"`
/// * `publish_date`: one hour ago
pub fn test_draft(title: &str) -> EntryDraft {
    let mut draft = EntryDraft::new("author", format!("Test body for {title}"));
    draft.title = title.to_string();
    draft.publish_date = Some(Utc::now() - Duration::hours(1));
    draft
}

/// Saves a published post titled `title`.
pub async fn create_test_entry(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::blog_entry::Model> {
    entry::save_entry(db, &MarkupRegistry::default(), test_draft(title)).await
}

/// Comment input with valid author fields for `entry_id`.
pub fn test_comment_input(entry_id: i64) -> NewComment {
    NewComment {
        entry_id,
        text: "Nice post".to_string(),
        user_name: "Reader".to_string(),
        user_url: "https://reader.example.com".to_string(),
        email_id: "reader@example.com".to_string(),
        created_by: None,
        is_spam: false,
        is_public: None,
        user_ip: Some("127.0.0.1".to_string()),
        user_agent: "test-agent".to_string(),
    }
}

/// Stores a comment with the given spam verdict and requested visibility.
pub async fn create_test_comment(
    db: &DatabaseConnection,
    entry_id: i64,
    is_spam: bool,
    is_public: Option<bool>,
) -> Result<entities::comment::Model> {
    let mut input = test_comment_input(entry_id);
    input.is_spam = is_spam;
    input.is_public = is_public;
    comment::create_comment(db, input).await
}

/// Stores a `twitter` reaction with the given external id.
pub async fn create_test_reaction(
    db: &DatabaseConnection,
    entry_id: i64,
    reaction_id: &str,
) -> Result<entities::reaction::Model> {
    reaction::create_reaction(
        db,
        NewReaction {
            reaction_id: reaction_id.to_string(),
            entry_id,
            text: "Loved it".to_string(),
            user_name: "follower".to_string(),
            user_url: "https://twitter.com/follower".to_string(),
            source: "twitter".to_string(),
            profile_image: Some("https://img.example.com/follower.png".to_string()),
        },
    )
    .await
}

/// Sets up a test database holding one published entry.
/// Returns (db, entry) for comment and reaction tests.
pub async fn setup_with_entry() -> Result<(DatabaseConnection, entities::blog_entry::Model)> {
    let db = setup_test_db().await?;
    let entry = create_test_entry(&db, "Test Entry").await?;
    Ok((db, entry))
}
