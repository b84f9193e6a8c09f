use blogango::config::{database, site};
use blogango::core::seed::seed_site;
use blogango::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the site configuration
    let site_config = site::load_default_config()
        .inspect_err(|e| error!("Critical error loading site configuration: {}", e))?;
    info!("Loaded configuration for '{}'.", site_config.blog.title);
    let registry = site_config
        .markup_registry()
        .inspect_err(|e| error!("Invalid markup configuration: {}", e))?;
    info!("Default markup type is '{}'.", registry.default_type());

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed the blog configuration and blogroll
    let report = seed_site(&db, &site_config)
        .await
        .inspect_err(|e| error!("Failed to seed site: {}", e))?;
    info!(
        "Site ready (blog created: {}, links added: {}).",
        report.blog_created, report.links_added
    );

    Ok(())
}
