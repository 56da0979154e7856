//! Repository layer.
//!
//! Leaf repositories wrap single tables and are composed by the engine
//! repositories (`PageRepo`, `ContentRepo`, `PreviewRepo`), which own every
//! transaction boundary.

pub mod category_repo;
mod content_graph;
pub mod content_repo;
pub mod component_repo;
pub mod meta_tag_repo;
pub mod page_repo;
pub mod preview_repo;
pub mod revision_repo;
pub mod url_guard;

pub use category_repo::CategoryRepo;
pub use component_repo::ComponentRepo;
pub use content_repo::ContentRepo;
pub use meta_tag_repo::MetaTagRepo;
pub use page_repo::PageRepo;
pub use preview_repo::PreviewRepo;
pub use revision_repo::RevisionRepo;
pub use url_guard::UrlGuard;
