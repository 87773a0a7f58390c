//! Folio Core Library
//!
//! Vault indexing, note trees, quotes and contact validation on the service side;
//! the markdown-subset renderer, link resolver and navigation state machine on the
//! browser side. No HTTP here: both sides meet at the [`NotesApi`] trait.
//!

pub mod api;
pub mod cache;
pub mod config;
pub mod contact;
pub mod error;
pub mod model;
pub mod navigation;
pub mod parser;
pub mod quotes;
pub mod render;
pub mod resolver;
pub mod utils;
pub mod vfs;
pub mod workspace;

pub use api::{LocalApi, NotesApi};
pub use config::FolioConfig;
pub use error::ApiError;
pub use navigation::{Browser, MemoryHistory, NavigationState};
pub use utils::slugify;
pub use workspace::{Vault, Workspace};
