//! # swift-store: object storage with reversible stored filenames
//!
//! `swift-store` abstracts upload, retrieval, and deletion of binary objects
//! against an object-storage backend. Every uploaded object gets a
//! backend-safe, collision-resistant stored name that deterministically maps
//! back to the original filename - dotfiles, leading dashes, multi-segment
//! extensions, and extension-less names included.
//!
//! ## Key Features
//!
//! - **Reversible stored names**: `generate`/`restore` round-trip every
//!   valid filename; the disambiguating token carries enough entropy for
//!   concurrent uploads of the same name
//! - **Storage agnostic**: works against any backend implementing the
//!   [`ObjectStore`] trait; an in-memory store ships for tests and
//!   development
//! - **Absorbed failures**: a failed upload still returns a [`FileInfo`]
//!   describing what was attempted, after best-effort cleanup of the
//!   partial object
//! - **Server agnostic**: no HTTP coupling - hosting frameworks adapt their
//!   multipart types to the [`UploadSource`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use swift_store::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> StorageResult<()> {
//! let store = MemoryStore::new("test-container");
//! let service = StorageService::new(store, StorageConfig::default());
//!
//! // Upload: the stored name embeds the original plus a unique token
//! let upload = BytesUpload::new("report.pdf", "application/pdf", &b"%PDF-1.7"[..]);
//! let info = service.put_source(upload).await?;
//! assert_eq!(info.result_status, ResultStatus::Success);
//! assert!(info.stored_filename.contains("report.pdf"));
//!
//! // Retrieve: the original name comes back out of the stored name
//! let found = service.get(&info.stored_filename).await?;
//! assert_eq!(found.filename, "report.pdf");
//!
//! // Delete: true once, false afterwards
//! assert!(service.remove(&info.stored_filename).await);
//! assert!(!service.remove(&info.stored_filename).await);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Your Service  │  ← Request/response mapping
//! ├─────────────────┤
//! │ StorageService  │  ← Filename codec + transfer orchestration
//! ├─────────────────┤
//! │   ObjectStore   │  ← Storage primitives
//! └─────────────────┘
//! ```
//!
//! The service is infrastructure, not a framework: embed it in whatever
//! hosts your endpoints and keep the wire protocol out of storage code.
//! Stored objects are immutable - `update` always fails `Unsupported`;
//! replace an object with `remove` plus a fresh `put`.

mod codec;
mod config;
mod error;
mod info;
mod memory;
mod service;
pub mod store;
mod upload;

// Re-export main types for clean API
pub use codec::{DefaultFilenameCodec, FilenameCodec};
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use info::{FileInfo, ResultStatus};
pub use memory::MemoryStore;
pub use service::{OpenedObject, StorageService};
pub use store::{ByteStream, GetResult, ObjectHead, ObjectStore, PutResult};
pub use upload::{BytesUpload, UploadSource};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ByteStream, BytesUpload, FileInfo, MemoryStore, ObjectStore, ResultStatus, StorageConfig,
        StorageError, StorageResult, StorageService, UploadSource,
    };
}
