//! Comment business logic - Submission, moderation and per-entry activity.
//!
//! A comment's visibility is decided by [`ModerationState::resolve`] every time it is
//! written, so a comment flagged as spam can never end up public, whatever the caller
//! asked for. Readers only ever see [`ModerationState::Public`] comments.

use crate::{
    core::validate,
    entities::{BlogEntry, Comment, ModerationState, comment},
    errors::{Error, Result, is_foreign_key_violation},
};
use chrono::{Duration, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Select, Set, prelude::*};
use tracing::{info, instrument};

/// Input for a new comment
#[derive(Clone, Debug, Default)]
pub struct NewComment {
    pub entry_id: i64,
    pub text: String,
    pub user_name: String,
    /// Commenter homepage; may be empty
    pub user_url: String,
    pub email_id: String,
    /// Identity of the logged-in user, if any
    pub created_by: Option<String>,
    /// Verdict of the spam check
    pub is_spam: bool,
    /// Requested visibility; `None` leaves the comment for moderation
    pub is_public: Option<bool>,
    pub user_ip: Option<String>,
    pub user_agent: String,
}

fn validate_new_comment(input: &NewComment) -> Result<()> {
    validate::required("text", &input.text)?;
    validate::required("user_name", &input.user_name)?;
    validate::email("email_id", &input.email_id)?;
    validate::optional_url("user_url", &input.user_url)?;
    if let Some(ip) = input.user_ip.as_deref() {
        validate::ip("user_ip", ip)?;
    }
    Ok(())
}

/// Stores a new comment after applying the moderation gate.
///
/// # Errors
/// Returns an error if:
/// - text or name are blank, or email, URL or IP are malformed
/// - the entry does not exist (`Error::EntryNotFound`)
/// - the database insert fails
#[instrument(skip(db, input), fields(entry_id = input.entry_id))]
pub async fn create_comment(db: &DatabaseConnection, input: NewComment) -> Result<comment::Model> {
    validate_new_comment(&input)?;

    if BlogEntry::find_by_id(input.entry_id).one(db).await?.is_none() {
        return Err(Error::EntryNotFound { id: input.entry_id });
    }

    let moderation = ModerationState::resolve(input.is_spam, input.is_public);
    let comment = comment::ActiveModel {
        text: Set(input.text),
        entry_id: Set(input.entry_id),
        created_on: Set(Utc::now()),
        user_name: Set(input.user_name),
        user_url: Set(input.user_url),
        created_by: Set(input.created_by),
        email_id: Set(input.email_id),
        moderation: Set(moderation),
        user_ip: Set(input.user_ip),
        user_agent: Set(input.user_agent),
        ..Default::default()
    };

    let model = comment.insert(db).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            Error::EntryNotFound { id: input.entry_id }
        } else {
            Error::from(err)
        }
    })?;
    info!("Stored comment {} as {:?}", model.id, model.moderation);
    Ok(model)
}

/// Re-runs the moderation gate on an existing comment with a new verdict.
///
/// # Errors
/// Returns `Error::NotFound` if the comment does not exist.
#[instrument(skip(db))]
pub async fn moderate_comment(
    db: &DatabaseConnection,
    comment_id: i64,
    is_spam: bool,
    is_public: Option<bool>,
) -> Result<comment::Model> {
    let existing = Comment::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "comment",
            id: comment_id.to_string(),
        })?;

    let mut active: comment::ActiveModel = existing.into();
    active.moderation = Set(ModerationState::resolve(is_spam, is_public));
    let model = active.update(db).await?;
    info!("Comment {} is now {:?}", model.id, model.moderation);
    Ok(model)
}

/// Makes a comment public. Clears a spam verdict.
pub async fn approve_comment(db: &DatabaseConnection, comment_id: i64) -> Result<comment::Model> {
    moderate_comment(db, comment_id, false, Some(true)).await
}

/// Marks a comment as spam, hiding it.
pub async fn mark_spam(db: &DatabaseConnection, comment_id: i64) -> Result<comment::Model> {
    moderate_comment(db, comment_id, true, None).await
}

/// Sends a comment back to the moderation queue.
pub async fn mark_pending(db: &DatabaseConnection, comment_id: i64) -> Result<comment::Model> {
    moderate_comment(db, comment_id, false, None).await
}

/// Comments readers may see, oldest first.
#[must_use]
pub fn public() -> Select<Comment> {
    Comment::find()
        .filter(comment::Column::Moderation.eq(ModerationState::Public))
        .order_by_asc(comment::Column::CreatedOn)
}

fn not_spam_for(entry_id: i64) -> Select<Comment> {
    Comment::find()
        .filter(comment::Column::EntryId.eq(entry_id))
        .filter(comment::Column::Moderation.ne(ModerationState::Spam))
}

pub async fn get_comment_by_id(
    db: &DatabaseConnection,
    comment_id: i64,
) -> Result<Option<comment::Model>> {
    Comment::find_by_id(comment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Public comments on an entry, oldest first.
pub async fn list_public_comments(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Vec<comment::Model>> {
    public()
        .filter(comment::Column::EntryId.eq(entry_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every comment on an entry whatever its state, for the admin.
pub async fn list_all_comments(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Vec<comment::Model>> {
    Comment::find()
        .filter(comment::Column::EntryId.eq(entry_id))
        .order_by_asc(comment::Column::CreatedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Comments waiting for a moderator across all entries, oldest first.
pub async fn list_pending_comments(db: &DatabaseConnection) -> Result<Vec<comment::Model>> {
    Comment::find()
        .filter(comment::Column::Moderation.eq(ModerationState::Pending))
        .order_by_asc(comment::Column::CreatedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The `limit` newest public comments across the site.
pub async fn latest_public_comments(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<comment::Model>> {
    Comment::find()
        .filter(comment::Column::Moderation.eq(ModerationState::Public))
        .order_by_desc(comment::Column::CreatedOn)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of non-spam comments on an entry.
pub async fn count_comments_for_entry(db: &DatabaseConnection, entry_id: i64) -> Result<u64> {
    not_spam_for(entry_id).count(db).await.map_err(Into::into)
}

/// True if a non-spam comment arrived on the entry in the 24 hours before `now`.
pub async fn has_recent_comments(
    db: &DatabaseConnection,
    entry_id: i64,
    now: DateTimeUtc,
) -> Result<bool> {
    let since = now - Duration::days(1);
    let count = not_spam_for(entry_id)
        .filter(comment::Column::CreatedOn.gt(since))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Non-spam comments from the 24 hours before `now`, oldest first.
pub async fn get_recent_comments(
    db: &DatabaseConnection,
    entry_id: i64,
    now: DateTimeUtc,
) -> Result<Vec<comment::Model>> {
    let since = now - Duration::days(1);
    not_spam_for(entry_id)
        .filter(comment::Column::CreatedOn.gt(since))
        .order_by_asc(comment::Column::CreatedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Permalink of a comment
#[must_use]
pub fn comment_url(comment_id: i64) -> String {
    format!("/comment/{comment_id}/")
}
