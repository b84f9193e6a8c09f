//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod blog;
pub mod blog_entry;
pub mod blog_roll;
pub mod comment;
pub mod entry_tag;
pub mod reaction;

// Re-export specific types to avoid conflicts
pub use blog::{Column as BlogColumn, Entity as Blog, Model as BlogModel};
pub use blog_entry::{Column as BlogEntryColumn, Entity as BlogEntry, Model as BlogEntryModel};
pub use blog_roll::{Column as BlogRollColumn, Entity as BlogRoll, Model as BlogRollModel};
pub use comment::{
    Column as CommentColumn, Entity as Comment, ModerationState, Model as CommentModel,
};
pub use entry_tag::{Column as EntryTagColumn, Entity as EntryTag, Model as EntryTagModel};
pub use reaction::{Column as ReactionColumn, Entity as Reaction, Model as ReactionModel};
