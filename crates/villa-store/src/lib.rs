//! # villa-store: Saved Invoices
//!
//! Stores exported invoice PDFs in a blob store and lists them back for the
//! saved-invoices view.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Invoice Archive                                │
//! │                                                                         │
//! │   save(invoice_no, pdf)                    list()                       │
//! │        │ Invoice-<no>.pdf                    │ *.pdf, newest first      │
//! │        ▼                                     ▼                          │
//! │   ┌─────────────────────────────────────────────────────────────────┐  │
//! │   │                       dyn BlobStore                              │  │
//! │   └──────────────┬───────────────────────────────┬──────────────────┘  │
//! │                  ▼                               ▼                      │
//! │          LocalBlobStore                   HttpBlobStore                 │
//! │          (directory)                      (Vercel Blob API)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`archive`] - Invoice save/list and display helpers
//! - [`blob`] - The blob store contract
//! - [`local`] - Directory-backed store
//! - [`http`] - HTTP blob API client
//! - [`config`] - Backend selection and settings
//! - [`error`] - Store error types

pub mod archive;
pub mod blob;
pub mod config;
pub mod error;
pub mod http;
pub mod local;

pub use archive::{display_name, format_file_size, InvoiceArchive, ListResponse, UploadResponse};
pub use blob::{BlobObject, BlobStore, PutBlobResult, PutOptions, PDF_CONTENT_TYPE};
pub use config::{StorageBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use http::HttpBlobStore;
pub use local::LocalBlobStore;
