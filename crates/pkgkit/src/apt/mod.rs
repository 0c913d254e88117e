//! APT sources and signing keys.

pub mod key;
pub mod repository;

pub use key::AptKey;
pub use repository::{AptRepository, SourcesConfig};
