//! Blogroll business logic - External links shown next to the blog.
//!
//! Link URLs are unique. Unlike entry slugs, a colliding URL is not resolved
//! automatically; the caller gets `Error::UniquenessViolation`.

use crate::{
    core::validate,
    entities::{BlogRoll, blog_roll},
    errors::{Error, Result, is_unique_violation},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn not_found(link_id: i64) -> Error {
    Error::NotFound {
        entity: "blogroll link",
        id: link_id.to_string(),
    }
}

/// Adds a link to the blogroll.
///
/// # Errors
/// Returns an error if:
/// - the URL is malformed or the text is blank
/// - the URL is already on the blogroll (`Error::UniquenessViolation`)
/// - the database insert fails
#[instrument(skip(db))]
pub async fn create_link<C>(
    db: &C,
    url: &str,
    text: &str,
    is_published: bool,
) -> Result<blog_roll::Model>
where
    C: ConnectionTrait,
{
    let url = url.trim();
    validate::url("url", url)?;
    validate::required("text", text)?;

    let link = blog_roll::ActiveModel {
        url: Set(url.to_string()),
        text: Set(text.trim().to_string()),
        is_published: Set(is_published),
        ..Default::default()
    };
    let model = link.insert(db).await.map_err(|err| {
        if is_unique_violation(&err) {
            Error::UniquenessViolation {
                field: "url",
                value: url.to_string(),
            }
        } else {
            Error::from(err)
        }
    })?;
    info!("Added blogroll link {}", model.url);
    Ok(model)
}

pub async fn get_link_by_url<C>(db: &C, url: &str) -> Result<Option<blog_roll::Model>>
where
    C: ConnectionTrait,
{
    BlogRoll::find()
        .filter(blog_roll::Column::Url.eq(url.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Published links in the order they were added.
pub async fn list_published_links(db: &DatabaseConnection) -> Result<Vec<blog_roll::Model>> {
    BlogRoll::find()
        .filter(blog_roll::Column::IsPublished.eq(true))
        .order_by_asc(blog_roll::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every link, published or not.
pub async fn list_all_links(db: &DatabaseConnection) -> Result<Vec<blog_roll::Model>> {
    BlogRoll::find()
        .order_by_asc(blog_roll::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Shows or hides a link.
#[instrument(skip(db))]
pub async fn set_link_published(
    db: &DatabaseConnection,
    link_id: i64,
    is_published: bool,
) -> Result<blog_roll::Model> {
    let link = BlogRoll::find_by_id(link_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(link_id))?;

    let mut active: blog_roll::ActiveModel = link.into();
    active.is_published = Set(is_published);
    active.update(db).await.map_err(Into::into)
}

#[instrument(skip(db))]
pub async fn delete_link(db: &DatabaseConnection, link_id: i64) -> Result<()> {
    let result = BlogRoll::delete_by_id(link_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(not_found(link_id));
    }
    info!("Deleted blogroll link {}", link_id);
    Ok(())
}

/// Where a blogroll link points.
#[must_use]
pub fn link_url(link: &blog_roll::Model) -> &str {
    &link.url
}
