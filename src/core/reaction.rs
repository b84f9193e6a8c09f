//! Reaction business logic.
//!
//! Reactions come from external services and carry the identifier the service gave
//! them. They are never moderated.

use crate::{
    core::validate,
    entities::{BlogEntry, Reaction, reaction},
    errors::{Error, Result, is_foreign_key_violation, is_unique_violation},
};
use chrono::Utc;
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Input for a new reaction
#[derive(Clone, Debug, Default)]
pub struct NewReaction {
    /// Identifier assigned by the external source
    pub reaction_id: String,
    pub entry_id: i64,
    pub text: String,
    pub user_name: String,
    pub user_url: String,
    pub source: String,
    pub profile_image: Option<String>,
}

/// Stores a new reaction.
///
/// # Errors
/// Returns an error if:
/// - the reaction id is blank or the URLs are malformed
/// - a reaction with the same id exists (`Error::UniquenessViolation`)
/// - the entry does not exist (`Error::EntryNotFound`)
/// - the database insert fails
#[instrument(skip(db, input), fields(reaction_id = %input.reaction_id))]
pub async fn create_reaction(
    db: &DatabaseConnection,
    input: NewReaction,
) -> Result<reaction::Model> {
    validate::required("reaction_id", &input.reaction_id)?;
    validate::required("source", &input.source)?;
    validate::optional_url("user_url", &input.user_url)?;
    if let Some(image) = input.profile_image.as_deref() {
        validate::optional_url("profile_image", image)?;
    }

    if BlogEntry::find_by_id(input.entry_id).one(db).await?.is_none() {
        return Err(Error::EntryNotFound { id: input.entry_id });
    }
    if Reaction::find_by_id(input.reaction_id.as_str())
        .one(db)
        .await?
        .is_some()
    {
        return Err(Error::UniquenessViolation {
            field: "reaction_id",
            value: input.reaction_id,
        });
    }

    let reaction_id = input.reaction_id.clone();
    let entry_id = input.entry_id;
    let model = reaction::ActiveModel {
        reaction_id: Set(input.reaction_id),
        text: Set(input.text),
        entry_id: Set(input.entry_id),
        created_on: Set(Utc::now()),
        user_name: Set(input.user_name),
        user_url: Set(input.user_url),
        source: Set(input.source),
        profile_image: Set(input.profile_image.filter(|url| !url.is_empty())),
    }
    .insert(db)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            Error::UniquenessViolation {
                field: "reaction_id",
                value: reaction_id.clone(),
            }
        } else if is_foreign_key_violation(&err) {
            Error::EntryNotFound { id: entry_id }
        } else {
            Error::from(err)
        }
    })?;

    info!("Stored {} reaction for entry {}", model.source, model.entry_id);
    Ok(model)
}

pub async fn get_reaction(
    db: &DatabaseConnection,
    reaction_id: &str,
) -> Result<Option<reaction::Model>> {
    Reaction::find_by_id(reaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All reactions on an entry, oldest first.
pub async fn list_reactions(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Vec<reaction::Model>> {
    Reaction::find()
        .filter(reaction::Column::EntryId.eq(entry_id))
        .order_by_asc(reaction::Column::CreatedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of reactions on an entry. Reactions are never filtered.
pub async fn count_reactions_for_entry(db: &DatabaseConnection, entry_id: i64) -> Result<u64> {
    Reaction::find()
        .filter(reaction::Column::EntryId.eq(entry_id))
        .count(db)
        .await
        .map_err(Into::into)
}
