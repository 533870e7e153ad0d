//! dotasset-export: Pure format serializers (sans-IO)
//!
//! Converts detected dots into source-code assets. Currently supports
//! TypeScript.

pub mod typescript;

pub use typescript::{AssetMetadata, file_name, identifier, import_path, to_typescript};
