//! Blog configuration - The one settings row for the site.
//!
//! The row always has [`SINGLETON_ID`] as its primary key, so the storage layer
//! itself refuses a second configuration: creation is a plain insert and a primary
//! key collision is reported as [`Error::SingletonViolation`]. Updates of the existing
//! row are always allowed.

use crate::{
    config::site::BlogConfig,
    entities::{Blog, blog, blog::SINGLETON_ID},
    errors::{Error, Result, is_unique_violation},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Editable blog settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlogSettings {
    pub title: String,
    pub tag_line: String,
    pub entries_per_page: i32,
    pub recents: i32,
    pub recent_comments: i32,
}

impl BlogSettings {
    /// Settings with the usual defaults: 10 entries per page, 5 recent entries and
    /// 5 recent comments.
    #[must_use]
    pub fn new(title: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tag_line: tag_line.into(),
            entries_per_page: 10,
            recents: 5,
            recent_comments: 5,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::invalid("title", "the blog needs a title"));
        }
        if self.entries_per_page < 1 {
            return Err(Error::invalid("entries_per_page", "must be at least 1"));
        }
        if self.recents < 0 || self.recent_comments < 0 {
            return Err(Error::invalid("recents", "may not be negative"));
        }
        Ok(())
    }
}

impl From<BlogConfig> for BlogSettings {
    fn from(config: BlogConfig) -> Self {
        Self {
            title: config.title,
            tag_line: config.tag_line,
            entries_per_page: config.entries_per_page,
            recents: config.recents,
            recent_comments: config.recent_comments,
        }
    }
}

fn active_model(settings: BlogSettings) -> blog::ActiveModel {
    blog::ActiveModel {
        id: Set(SINGLETON_ID),
        title: Set(settings.title),
        tag_line: Set(settings.tag_line),
        entries_per_page: Set(settings.entries_per_page),
        recents: Set(settings.recents),
        recent_comments: Set(settings.recent_comments),
    }
}

/// Returns the blog configuration, if the site has been set up.
pub async fn get_blog<C>(db: &C) -> Result<Option<blog::Model>>
where
    C: ConnectionTrait,
{
    Blog::find_by_id(SINGLETON_ID)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates the blog configuration.
///
/// # Errors
/// Returns `Error::SingletonViolation` if a configuration already exists; the
/// existing row is left untouched.
#[instrument(skip(db))]
pub async fn create_blog<C>(db: &C, settings: BlogSettings) -> Result<blog::Model>
where
    C: ConnectionTrait,
{
    settings.validate()?;
    let model = active_model(settings).insert(db).await.map_err(|err| {
        if is_unique_violation(&err) {
            Error::SingletonViolation
        } else {
            Error::from(err)
        }
    })?;
    info!("Created blog configuration '{}'", model.title);
    Ok(model)
}

/// Updates the existing blog configuration.
///
/// # Errors
/// Returns `Error::NotFound` if the site has not been set up yet.
#[instrument(skip(db))]
pub async fn update_blog<C>(db: &C, settings: BlogSettings) -> Result<blog::Model>
where
    C: ConnectionTrait,
{
    settings.validate()?;
    if get_blog(db).await?.is_none() {
        return Err(Error::NotFound {
            entity: "blog",
            id: SINGLETON_ID.to_string(),
        });
    }
    let model = active_model(settings).update(db).await?;
    info!("Updated blog configuration '{}'", model.title);
    Ok(model)
}
