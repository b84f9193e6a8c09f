//! Blog entry business logic - The save pipeline and entry lookups.
//!
//! Every write goes through [`save_entry`], which fills in the derived fields before
//! anything reaches the database:
//!
//! 1. a blank title is inferred from the first five words of the text
//! 2. a blank slug is derived from the title
//! 3. the slug is made unique by probing `base`, `base-2`, `base-3`, ...
//! 4. a blank summary becomes the first 100 words of the text
//! 5. blank meta keywords/description fall back to the summary
//! 6. the first publish moves `created_on` from the unpublished sentinel to the
//!    publish date
//!
//! Slug uniqueness is enforced by a unique index. When a concurrent writer takes the
//! probed slug between the probe and the write, the write fails with a constraint
//! violation and the probe is re-run from the next suffix, up to
//! [`MAX_SLUG_ATTEMPTS`] times.

use crate::{
    core::tags,
    entities::{BlogEntry, blog_entry},
    errors::{Error, Result, is_unique_violation},
    markup::{self, MarkupRegistry},
};
use chrono::{DateTime, Datelike, Utc};
use sea_orm::{
    ActiveValue::NotSet, PaginatorTrait, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
    prelude::*,
};
use tracing::{debug, info, instrument, warn};

/// Number of write attempts before giving up on a contended slug
pub const MAX_SLUG_ATTEMPTS: u32 = 8;

const TITLE_WORDS: usize = 5;
const SUMMARY_WORDS: usize = 100;

// 9999-12-31T23:59:59Z
const UNPUBLISHED_SENTINEL_SECS: i64 = 253_402_300_799;

/// `created_on` value of an entry that has never been published.
#[must_use]
pub fn unpublished_sentinel() -> DateTimeUtc {
    DateTime::<Utc>::from_timestamp(UNPUBLISHED_SENTINEL_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// True while `created_on` still holds the unpublished sentinel.
#[must_use]
pub fn is_unpublished(created_on: DateTimeUtc) -> bool {
    created_on.year() >= 9999
}

/// Title for an entry written without one: the first five words, hyphen-joined.
#[must_use]
pub fn infer_title(text: &str) -> String {
    text.split_whitespace()
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join("-")
}

/// Summary for an entry written without one: the first 100 words, space-joined.
#[must_use]
pub fn generate_summary(text: &str) -> String {
    text.split_whitespace()
        .take(SUMMARY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, URL-safe form of `title` with runs of other characters collapsed to `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    slug::slugify(title)
}

/// The `index`-th slug candidate for `base`. The first candidate is the base itself.
#[must_use]
pub fn slug_candidate(base: &str, index: u32) -> String {
    if index <= 1 {
        base.to_string()
    } else {
        format!("{base}-{index}")
    }
}

/// Input for creating or updating an entry.
///
/// Blank `title`, `slug` and `summary`, and missing meta fields, are derived on save.
#[derive(Clone, Debug, Default)]
pub struct EntryDraft {
    /// `None` creates a new entry, `Some(id)` updates that entry
    pub id: Option<i64>,
    pub title: String,
    pub slug: String,
    /// Raw markup
    pub text: String,
    /// Markup type tag; the registry default (or `html` for rich text entries) when `None`
    pub markup_type: Option<String>,
    pub summary: String,
    pub created_by: String,
    pub is_page: bool,
    pub is_published: bool,
    pub publish_date: Option<DateTimeUtc>,
    pub comments_allowed: bool,
    pub is_rte: bool,
    pub meta_keywords: Option<String>,
    pub meta_description: Option<String>,
    /// `None` leaves the stored tags alone, `Some` replaces them
    pub tags: Option<Vec<String>>,
}

impl EntryDraft {
    /// A published timeline post with comments allowed, matching the column defaults.
    #[must_use]
    pub fn new(created_by: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_by: created_by.into(),
            is_published: true,
            comments_allowed: true,
            ..Default::default()
        }
    }
}

impl From<blog_entry::Model> for EntryDraft {
    fn from(model: blog_entry::Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            slug: model.slug,
            text: model.text,
            markup_type: Some(model.text_markup_type),
            summary: model.summary,
            created_by: model.created_by,
            is_page: model.is_page,
            is_published: model.is_published,
            publish_date: model.publish_date,
            comments_allowed: model.comments_allowed,
            is_rte: model.is_rte,
            meta_keywords: model.meta_keywords,
            meta_description: model.meta_description,
            tags: None,
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn or_summary(value: Option<String>, summary: &str) -> Option<String> {
    match value {
        Some(v) if !blank(&v) => Some(v),
        _ => Some(summary.to_string()),
    }
}

/// Runs the derivation pipeline and writes the entry.
///
/// # Errors
/// Returns an error if:
/// - `created_by` is empty, or neither title nor text yield a slug
/// - the markup type has no registered renderer
/// - the entry being updated does not exist
/// - every slug write attempt lost a race (`Error::SlugRetriesExhausted`)
/// - the database operation fails
#[instrument(skip(db, registry, draft), fields(id = ?draft.id))]
pub async fn save_entry(
    db: &DatabaseConnection,
    registry: &MarkupRegistry,
    draft: EntryDraft,
) -> Result<blog_entry::Model> {
    save_entry_with_attempts(db, registry, draft, MAX_SLUG_ATTEMPTS).await
}

async fn save_entry_with_attempts(
    db: &DatabaseConnection,
    registry: &MarkupRegistry,
    draft: EntryDraft,
    max_attempts: u32,
) -> Result<blog_entry::Model> {
    if blank(&draft.created_by) {
        return Err(Error::invalid("created_by", "an entry needs an author"));
    }

    let existing = match draft.id {
        Some(id) => Some(
            BlogEntry::find_by_id(id)
                .one(db)
                .await?
                .ok_or(Error::EntryNotFound { id })?,
        ),
        None => None,
    };

    let title = if blank(&draft.title) {
        infer_title(&draft.text)
    } else {
        draft.title.clone()
    };

    let mut base_slug = if blank(&draft.slug) {
        slugify(&title)
    } else {
        slugify(&draft.slug)
    };
    // Titles like "!!!" slugify to nothing; fall back to the text.
    if base_slug.is_empty() {
        base_slug = slugify(&infer_title(&draft.text));
    }
    if base_slug.is_empty() {
        return Err(Error::invalid(
            "slug",
            "neither the slug, the title nor the text contain letters or digits",
        ));
    }

    let summary = if blank(&draft.summary) {
        generate_summary(&draft.text)
    } else {
        draft.summary.clone()
    };
    let meta_keywords = or_summary(draft.meta_keywords.clone(), &summary);
    let meta_description = or_summary(draft.meta_description.clone(), &summary);

    let mut created_on = existing
        .as_ref()
        .map_or_else(unpublished_sentinel, |e| e.created_on);
    if draft.is_published && is_unpublished(created_on) {
        if let Some(publish_date) = draft.publish_date {
            debug!("First publish, created_on set to {}", publish_date);
            created_on = publish_date;
        }
    }

    let markup_type = draft.markup_type.clone().unwrap_or_else(|| {
        if draft.is_rte {
            markup::HTML.to_string()
        } else {
            registry.default_type().to_string()
        }
    });
    let text = registry.render(&draft.text, &markup_type)?;

    let entry = blog_entry::ActiveModel {
        id: draft.id.map_or(NotSet, Set),
        title: Set(title),
        slug: NotSet,
        text: Set(text.raw),
        text_markup_type: Set(text.markup_type),
        text_rendered: Set(text.rendered),
        summary: Set(summary),
        created_on: Set(created_on),
        created_by: Set(draft.created_by),
        is_page: Set(draft.is_page),
        is_published: Set(draft.is_published),
        publish_date: Set(draft.publish_date),
        comments_allowed: Set(draft.comments_allowed),
        is_rte: Set(draft.is_rte),
        meta_keywords: Set(meta_keywords),
        meta_description: Set(meta_description),
    };

    let mut start = 1;
    for attempt in 1..=max_attempts {
        let (index, candidate) = find_free_slug(db, &base_slug, draft.id, start).await?;
        let mut active = entry.clone();
        active.slug = Set(candidate.clone());

        match write_entry(db, active, draft.tags.as_deref()).await {
            Ok(model) => {
                info!("Saved entry {} with slug '{}'", model.id, model.slug);
                return Ok(model);
            }
            Err(Error::Database(err)) if is_unique_violation(&err) => {
                warn!(
                    "Slug '{}' was taken concurrently (attempt {}/{})",
                    candidate, attempt, max_attempts
                );
                start = index + 1;
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::SlugRetriesExhausted {
        base: base_slug,
        attempts: max_attempts,
    })
}

/// Finds the lowest-numbered free candidate for `base`, starting at `start`.
/// The entry identified by `own_id` does not count as a collision.
async fn find_free_slug<C>(
    db: &C,
    base: &str,
    own_id: Option<i64>,
    start: u32,
) -> Result<(u32, String)>
where
    C: ConnectionTrait,
{
    let mut index = start;
    loop {
        let candidate = slug_candidate(base, index);
        let mut query = BlogEntry::find().filter(blog_entry::Column::Slug.eq(candidate.as_str()));
        if let Some(id) = own_id {
            query = query.filter(blog_entry::Column::Id.ne(id));
        }
        if query.count(db).await? == 0 {
            return Ok((index, candidate));
        }
        index += 1;
    }
}

async fn write_entry(
    db: &DatabaseConnection,
    entry: blog_entry::ActiveModel,
    tag_names: Option<&[String]>,
) -> Result<blog_entry::Model> {
    let txn = db.begin().await?;

    let model = if entry.id.is_set() {
        entry.update(&txn).await?
    } else {
        entry.insert(&txn).await?
    };

    if let Some(names) = tag_names {
        tags::set_tags(&txn, model.id, names).await?;
    }

    txn.commit().await?;
    Ok(model)
}

/// Entries visible to readers: published, with a publish date no later than `now`,
/// newest first.
#[must_use]
pub fn published(now: DateTimeUtc) -> Select<BlogEntry> {
    BlogEntry::find()
        .filter(blog_entry::Column::IsPublished.eq(true))
        .filter(blog_entry::Column::PublishDate.lte(now))
        .order_by_desc(blog_entry::Column::CreatedOn)
}

/// Finds an entry by id regardless of publication state.
pub async fn get_entry_by_id(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Option<blog_entry::Model>> {
    BlogEntry::find_by_id(entry_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a published entry by its permalink parts.
pub async fn get_published_entry(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    slug: &str,
    now: DateTimeUtc,
) -> Result<Option<blog_entry::Model>> {
    let entry = published(now)
        .filter(blog_entry::Column::Slug.eq(slug))
        .one(db)
        .await?;
    Ok(entry.filter(|e| e.created_on.year() == year && e.created_on.month() == month))
}

/// All entries visible to readers, posts and pages alike.
pub async fn list_published_entries(
    db: &DatabaseConnection,
    now: DateTimeUtc,
) -> Result<Vec<blog_entry::Model>> {
    published(now).all(db).await.map_err(Into::into)
}

/// Published timeline posts, excluding standalone pages.
pub async fn list_published_posts(
    db: &DatabaseConnection,
    now: DateTimeUtc,
) -> Result<Vec<blog_entry::Model>> {
    published(now)
        .filter(blog_entry::Column::IsPage.eq(false))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Published standalone pages.
pub async fn list_published_pages(
    db: &DatabaseConnection,
    now: DateTimeUtc,
) -> Result<Vec<blog_entry::Model>> {
    published(now)
        .filter(blog_entry::Column::IsPage.eq(true))
        .all(db)
        .await
        .map_err(Into::into)
}

/// The `limit` newest published posts.
pub async fn recent_entries(
    db: &DatabaseConnection,
    now: DateTimeUtc,
    limit: u64,
) -> Result<Vec<blog_entry::Model>> {
    published(now)
        .filter(blog_entry::Column::IsPage.eq(false))
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every entry including drafts and future-dated ones, for the admin.
pub async fn list_all_entries(db: &DatabaseConnection) -> Result<Vec<blog_entry::Model>> {
    BlogEntry::find()
        .order_by_desc(blog_entry::Column::CreatedOn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// One page of the published post listing
#[derive(Debug, Clone)]
pub struct EntryPage {
    pub entries: Vec<blog_entry::Model>,
    /// 1-based page number
    pub page: u64,
    pub num_pages: u64,
}

impl EntryPage {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.num_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Fetches the 1-based `page` of published posts, `per_page` at a time.
///
/// # Errors
/// Returns `Error::InvalidField` for page 0 or a zero page size.
pub async fn published_posts_page(
    db: &DatabaseConnection,
    now: DateTimeUtc,
    page: u64,
    per_page: u64,
) -> Result<EntryPage> {
    if page == 0 {
        return Err(Error::invalid("page", "pages are numbered from 1"));
    }
    if per_page == 0 {
        return Err(Error::invalid("entries_per_page", "must be positive"));
    }

    let paginator = published(now)
        .filter(blog_entry::Column::IsPage.eq(false))
        .paginate(db, per_page);
    let num_pages = paginator.num_pages().await?;
    let entries = paginator.fetch_page(page - 1).await?;

    Ok(EntryPage {
        entries,
        page,
        num_pages,
    })
}

/// Deletes an entry. Its comments, reactions and tags go with it through the
/// cascading foreign keys.
#[instrument(skip(db))]
pub async fn delete_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let result = BlogEntry::delete_by_id(entry_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::EntryNotFound { id: entry_id });
    }
    info!("Deleted entry {}", entry_id);
    Ok(())
}

/// Permalink of an entry: `/{year}/{month}/{slug}/`
#[must_use]
pub fn entry_url(entry: &blog_entry::Model) -> String {
    format!(
        "/{}/{:02}/{}/",
        entry.created_on.format("%Y"),
        entry.created_on.month(),
        entry.slug
    )
}

/// Admin edit page of an entry
#[must_use]
pub fn entry_edit_url(entry_id: i64) -> String {
    format!("/admin/entry/edit/{entry_id}/")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_infer_title_takes_five_words() {
        assert_eq!(
            infer_title("one two three four five six seven"),
            "one-two-three-four-five"
        );
        assert_eq!(infer_title("  short\n\ttext "), "short-text");
        assert_eq!(infer_title(""), "");
    }

    #[test]
    fn test_generate_summary_takes_hundred_words() {
        let words: Vec<String> = (0..150).map(|i| format!("w{i}")).collect();
        let summary = generate_summary(&words.join("\n"));
        assert_eq!(summary.split(' ').count(), 100);
        assert!(summary.starts_with("w0 w1 w2"));
        assert!(summary.ends_with("w99"));
        assert_eq!(generate_summary("a  b\nc"), "a b c");
    }

    #[test]
    fn test_slugify_and_candidates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust: 2024 edition!! "), "rust-2024-edition");
        assert_eq!(slug_candidate("hello-world", 1), "hello-world");
        assert_eq!(slug_candidate("hello-world", 3), "hello-world-3");
    }

    #[test]
    fn test_sentinel_is_unpublished() {
        assert!(is_unpublished(unpublished_sentinel()));
        assert_eq!(unpublished_sentinel().year(), 9999);
        assert!(!is_unpublished(Utc::now()));
    }

    #[tokio::test]
    async fn test_save_entry_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let registry = MarkupRegistry::default();

        let result = save_entry(&db, &registry, EntryDraft::new("", "some text")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidField {
                field: "created_by",
                ..
            }
        ));

        let result = save_entry(&db, &registry, EntryDraft::new("author", "   ")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidField { field: "slug", .. }
        ));

        let mut draft = EntryDraft::new("author", "text");
        draft.markup_type = Some("textile".to_string());
        let result = save_entry(&db, &registry, draft).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidField {
                field: "text_markup_type",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_title_is_inferred_and_first_publish_sets_created_on() -> Result<()> {
        let db = setup_test_db().await?;
        let publish_date = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        let mut draft = EntryDraft::new("author", "one two three four five six seven");
        draft.publish_date = Some(publish_date);
        let entry = save_entry(&db, &MarkupRegistry::default(), draft).await?;

        assert_eq!(entry.title, "one-two-three-four-five");
        assert_eq!(entry.slug, "one-two-three-four-five");
        assert_eq!(entry.created_on, publish_date);
        assert_eq!(entry.summary, "one two three four five six seven");
        assert_eq!(entry.meta_keywords.as_deref(), Some(entry.summary.as_str()));
        assert_eq!(entry.meta_description.as_deref(), Some(entry.summary.as_str()));
        assert_eq!(entry.text_rendered, "<p>one two three four five six seven</p>");
        assert_eq!(entry_url(&entry), "/2024/03/one-two-three-four-five/");

        Ok(())
    }

    #[tokio::test]
    async fn test_colliding_titles_get_numbered_slugs() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_entry(&db, "Hello World").await?;
        let second = create_test_entry(&db, "Hello World").await?;
        let third = create_test_entry(&db, "Hello, world!").await?;

        assert_eq!(first.slug, "hello-world");
        assert_eq!(second.slug, "hello-world-2");
        assert_eq!(third.slug, "hello-world-3");

        Ok(())
    }

    #[tokio::test]
    async fn test_lowest_free_suffix_is_reused() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_entry(&db, "Hello World").await?;
        let second = create_test_entry(&db, "Hello World").await?;
        create_test_entry(&db, "Hello World").await?;
        delete_entry(&db, second.id).await?;

        let again = create_test_entry(&db, "Hello World").await?;
        assert_eq!(again.slug, "hello-world-2");

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_slugs() -> Result<()> {
        let db = setup_test_db().await?;

        let (a, b, c, d) = tokio::join!(
            create_test_entry(&db, "Race"),
            create_test_entry(&db, "Race"),
            create_test_entry(&db, "Race"),
            create_test_entry(&db, "Race"),
        );
        let mut slugs = vec![a?.slug, b?.slug, c?.slug, d?.slug];
        slugs.sort();
        slugs.dedup();

        assert_eq!(slugs.len(), 4);
        assert!(slugs.contains(&"race".to_string()));
        assert!(slugs.iter().all(|s| s.starts_with("race")));

        Ok(())
    }

    #[tokio::test]
    async fn test_lost_slug_races_exhaust_the_attempt_budget() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default();
        let (db, registry) = (&db, &registry);
        let save = move || save_entry_with_attempts(db, registry, test_draft("Race"), 1);

        // With a single attempt, every writer that loses the race for "race"
        // (or the suffix it probed next) gives up instead of retrying.
        let (a, b, c, d, e, f) = tokio::join!(save(), save(), save(), save(), save(), save());
        let results = vec![a, b, c, d, e, f];

        let exhausted = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(Error::SlugRetriesExhausted { base, attempts: 1 }) if base == "race"
                )
            })
            .count();
        assert!(exhausted > 0);

        let mut slugs: Vec<String> = results
            .into_iter()
            .filter_map(|r| r.ok().map(|entry| entry.slug))
            .collect();
        let saved = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), saved);
        assert_eq!(saved + exhausted, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_punctuation_title_falls_back_to_text_for_slug() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = test_draft("!!!");
        draft.text = "Exclamation marks everywhere today".to_string();
        let entry = save_entry(&db, &MarkupRegistry::default(), draft).await?;

        assert_eq!(entry.title, "!!!");
        assert_eq!(entry.slug, "exclamation-marks-everywhere-today");

        let mut draft = test_draft("???");
        draft.text = "?? !!".to_string();
        let result = save_entry(&db, &MarkupRegistry::default(), draft).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidField { field: "slug", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_registry_default_type_applies_to_untyped_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default().with_default_type(markup::HTML);

        let mut draft = test_draft("Raw");
        draft.text = "<em>kept</em>".to_string();
        let entry = save_entry(&db, &registry, draft).await?;

        assert_eq!(entry.text_markup_type, "html");
        assert_eq!(entry.text_rendered, "<em>kept</em>");

        Ok(())
    }

    #[tokio::test]
    async fn test_resave_keeps_own_slug() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default();

        create_test_entry(&db, "Hello World").await?;
        let second = create_test_entry(&db, "Hello World").await?;
        assert_eq!(second.slug, "hello-world-2");

        let mut draft = EntryDraft::from(second.clone());
        draft.text = "edited body".to_string();
        let resaved = save_entry(&db, &registry, draft).await?;

        assert_eq!(resaved.id, second.id);
        assert_eq!(resaved.slug, "hello-world-2");
        assert_eq!(resaved.text, "edited body");
        assert_eq!(list_all_entries(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_created_on_only_set_on_first_publish() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default();
        let first_date = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let second_date = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

        let mut draft = EntryDraft::new("author", "draft body");
        draft.title = "Draft".to_string();
        draft.is_published = false;
        let entry = save_entry(&db, &registry, draft).await?;
        assert!(is_unpublished(entry.created_on));

        let mut draft = EntryDraft::from(entry);
        draft.is_published = true;
        draft.publish_date = Some(first_date);
        let entry = save_entry(&db, &registry, draft).await?;
        assert_eq!(entry.created_on, first_date);

        let mut draft = EntryDraft::from(entry);
        draft.publish_date = Some(second_date);
        let entry = save_entry(&db, &registry, draft).await?;
        assert_eq!(entry.created_on, first_date);
        assert_eq!(entry.publish_date, Some(second_date));

        Ok(())
    }

    #[tokio::test]
    async fn test_supplied_summary_and_meta_are_kept() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = EntryDraft::new("author", "long body text");
        draft.title = "Kept".to_string();
        draft.summary = "custom summary".to_string();
        draft.meta_keywords = Some("rust, blog".to_string());
        draft.meta_description = Some(String::new());
        let entry = save_entry(&db, &MarkupRegistry::default(), draft).await?;

        assert_eq!(entry.summary, "custom summary");
        assert_eq!(entry.meta_keywords.as_deref(), Some("rust, blog"));
        assert_eq!(entry.meta_description.as_deref(), Some("custom summary"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rich_text_entries_render_as_html() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = EntryDraft::new("author", "<em>hi</em> there");
        draft.title = "Rich".to_string();
        draft.is_rte = true;
        let entry = save_entry(&db, &MarkupRegistry::default(), draft).await?;

        assert_eq!(entry.text_markup_type, "html");
        assert_eq!(entry.text_rendered, "<em>hi</em> there");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_entry() -> Result<()> {
        let db = setup_test_db().await?;

        let mut draft = EntryDraft::new("author", "text");
        draft.id = Some(999);
        let result = save_entry(&db, &MarkupRegistry::default(), draft).await;
        assert!(matches!(result.unwrap_err(), Error::EntryNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_published_scope_filtering() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default();
        let now = Utc::now();

        let visible = create_test_entry(&db, "Visible").await?;

        let mut draft = EntryDraft::new("author", "unpublished");
        draft.title = "Unpublished".to_string();
        draft.is_published = false;
        draft.publish_date = Some(now - Duration::days(1));
        let unpublished = save_entry(&db, &registry, draft).await?;

        let mut draft = EntryDraft::new("author", "future");
        draft.title = "Future".to_string();
        draft.publish_date = Some(now + Duration::days(1));
        let future = save_entry(&db, &registry, draft).await?;

        let mut draft = EntryDraft::new("author", "no date");
        draft.title = "Undated".to_string();
        save_entry(&db, &registry, draft).await?;

        let listed = list_published_entries(&db, now).await?;
        assert_eq!(listed, vec![visible.clone()]);

        let all = list_all_entries(&db).await?;
        assert_eq!(all.len(), 4);
        assert!(all.iter().any(|e| e.id == unpublished.id));
        assert!(all.iter().any(|e| e.id == future.id));

        assert!(get_entry_by_id(&db, future.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_published_entry_by_permalink() -> Result<()> {
        let db = setup_test_db().await?;
        let entry = create_test_entry(&db, "Permalink").await?;
        let now = Utc::now();
        let year = entry.created_on.year();
        let month = entry.created_on.month();

        let found = get_published_entry(&db, year, month, "permalink", now).await?;
        assert_eq!(found.map(|e| e.id), Some(entry.id));

        let wrong_year = get_published_entry(&db, year - 1, month, "permalink", now).await?;
        assert!(wrong_year.is_none());

        let missing = get_published_entry(&db, year, month, "nope", now).await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_pages_and_posts_are_listed_separately() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let post = create_test_entry(&db, "A post").await?;
        let mut draft = EntryDraft::new("author", "about me");
        draft.title = "About".to_string();
        draft.is_page = true;
        draft.publish_date = Some(now - Duration::hours(1));
        let page = save_entry(&db, &MarkupRegistry::default(), draft).await?;

        let posts = list_published_posts(&db, now).await?;
        assert_eq!(posts.iter().map(|e| e.id).collect::<Vec<_>>(), vec![post.id]);

        let pages = list_published_pages(&db, now).await?;
        assert_eq!(pages.iter().map(|e| e.id).collect::<Vec<_>>(), vec![page.id]);

        Ok(())
    }

    #[tokio::test]
    async fn test_pagination_and_recent_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let registry = MarkupRegistry::default();
        let base = Utc::now() - Duration::days(10);

        for day in 0..5 {
            let mut draft = EntryDraft::new("author", format!("body {day}"));
            draft.title = format!("Post {day}");
            draft.publish_date = Some(base + Duration::days(day));
            save_entry(&db, &registry, draft).await?;
        }
        let now = Utc::now();

        let first = published_posts_page(&db, now, 1, 2).await?;
        assert_eq!(first.num_pages, 3);
        assert_eq!(first.entries.len(), 2);
        assert_eq!(first.entries[0].title, "Post 4");
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = published_posts_page(&db, now, 3, 2).await?;
        assert_eq!(last.entries.len(), 1);
        assert_eq!(last.entries[0].title, "Post 0");
        assert!(!last.has_next());

        assert!(published_posts_page(&db, now, 0, 2).await.is_err());

        let recent = recent_entries(&db, now, 3).await?;
        let titles: Vec<_> = recent.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 4", "Post 3", "Post 2"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_entry(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::EntryNotFound { id: 42 }));
        Ok(())
    }

    #[test]
    fn test_edit_url() {
        assert_eq!(entry_edit_url(7), "/admin/entry/edit/7/");
    }
}
