//! Tag storage - Tag sets keyed by entry identity.
//!
//! An entry's tags are stored as one `entry_tags` row per label and are always
//! replaced as a whole set. Labels are trimmed and de-duplicated; empty labels are
//! dropped.

use crate::{
    entities::{EntryTag, blog_entry, entry_tag},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeSet;
use tracing::debug;

/// Splits user input into tag labels.
///
/// Input containing a comma is split on commas, anything else on whitespace.
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    let parts: Vec<&str> = if input.contains(',') {
        input.split(',').collect()
    } else {
        input.split_whitespace().collect()
    };
    normalize(parts.iter().copied())
}

fn normalize<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Replaces the tag set of an entry.
pub async fn set_tags<C>(db: &C, entry_id: i64, names: &[String]) -> Result<()>
where
    C: ConnectionTrait,
{
    EntryTag::delete_many()
        .filter(entry_tag::Column::EntryId.eq(entry_id))
        .exec(db)
        .await?;

    let names = normalize(names.iter().map(String::as_str));
    if names.is_empty() {
        return Ok(());
    }

    debug!("Tagging entry {} with {:?}", entry_id, names);
    let rows = names.into_iter().map(|name| entry_tag::ActiveModel {
        entry_id: Set(entry_id),
        name: Set(name),
    });
    EntryTag::insert_many(rows).exec_without_returning(db).await?;
    Ok(())
}

/// Tag labels of an entry in alphabetical order.
pub async fn get_tags<C>(db: &C, entry_id: i64) -> Result<Vec<String>>
where
    C: ConnectionTrait,
{
    let rows = EntryTag::find()
        .filter(entry_tag::Column::EntryId.eq(entry_id))
        .order_by_asc(entry_tag::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// Published entries carrying `name`, newest first.
pub async fn published_entries_tagged(
    db: &DatabaseConnection,
    name: &str,
    now: DateTimeUtc,
) -> Result<Vec<blog_entry::Model>> {
    crate::core::entry::published(now)
        .inner_join(EntryTag)
        .filter(entry_tag::Column::Name.eq(name.trim()))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every distinct tag label in use, alphabetically.
pub async fn all_tags(db: &DatabaseConnection) -> Result<Vec<String>> {
    let rows = EntryTag::find()
        .order_by_asc(entry_tag::Column::Name)
        .all(db)
        .await?;
    Ok(normalize(rows.iter().map(|row| row.name.as_str())))
}
