//! Folio domain core.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//! identifier types, the domain error taxonomy, page kinds with their
//! per-type body schemas, the content mode state machine, and the
//! normalization rules applied before anything is written.

pub mod content_mode;
pub mod error;
pub mod naming;
pub mod page_kind;
pub mod preview;
pub mod revision;
pub mod types;
