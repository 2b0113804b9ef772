//! Client layer for the hosted row store and the workflow webhook.
//!
//! This crate owns the boundary between the core evaluators and the
//! outside world:
//! - Raw row shapes as the hosted store serves them
//! - Fail-closed ingestion of raw rows into typed core records
//! - A thin JSON CRUD client for the row store
//! - A one-shot client for the outbound spreadsheet-proxy webhook
//!
//! Nothing here retries or caches; failures surface as errors and
//! malformed rows are skipped with a warning.

pub mod client;
pub mod error;
pub mod records;
pub mod webhook;

pub use client::StoreClient;
pub use error::{RecordError, StoreError};
pub use records::{BlockRow, LedgerEntryRow, OrderRow};
pub use webhook::SheetWebhook;
