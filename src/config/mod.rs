/// Database configuration and connection management
pub mod database;

/// Site configuration loading from config.toml
pub mod site;
