//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - `Deserialize` input DTOs validated before any write
//! - Assembled read models (a content row plus its owned sub-graph)

pub mod category;
pub mod component;
pub mod content;
pub mod meta_tag;
pub mod page;
pub mod revision;
