//! First-run seeding from the site configuration file.

use crate::{
    config::site::SiteConfig,
    core::{blog, blogroll},
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument, warn};

/// What a seeding run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Whether the blog configuration row was created
    pub blog_created: bool,
    /// Number of blogroll links added
    pub links_added: usize,
    /// Number of configured links that were already present
    pub links_skipped: usize,
}

/// Creates the blog configuration if it is missing and adds configured blogroll
/// links that are not in the database yet. Runs in one transaction.
#[instrument(skip(db, config))]
pub async fn seed_site(db: &DatabaseConnection, config: &SiteConfig) -> Result<SeedReport> {
    info!(
        "Seeding site. Found {} blogroll links in configuration.",
        config.blogroll.len()
    );
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    if let Some(existing) = blog::get_blog(&txn).await? {
        warn!(
            "Blog configuration '{}' already exists. Skipping.",
            existing.title
        );
    } else {
        blog::create_blog(&txn, config.blog.clone().into()).await?;
        report.blog_created = true;
    }

    for link in &config.blogroll {
        if blogroll::get_link_by_url(&txn, &link.url).await?.is_some() {
            debug!("Blogroll link {} already present. Skipping.", link.url);
            report.links_skipped += 1;
            continue;
        }
        blogroll::create_link(&txn, &link.url, &link.text, link.is_published).await?;
        report.links_added += 1;
    }

    txn.commit().await?;
    info!("Finished seeding site: {:?}", report);
    Ok(report)
}
