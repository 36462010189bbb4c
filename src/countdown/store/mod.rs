//! # Storage Layer
//!
//! Durable state lives behind the [`backend::StorageBackend`] trait, a minimal
//! key/value interface in the shape of browser local storage. The
//! [`countdowns::CountdownStore`] sits on top and owns the business rules.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemBackend` (no filesystem needed)
//! - Model **quota failures** explicitly: a full backend rejects the write with
//!   `QuotaExceeded`, which the store turns into a user-facing warning
//! - Keep the collection logic **decoupled** from where the bytes end up
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production file-based storage
//!   - One `<key>.json` file per key under the data directory
//!   - Atomic writes (temp file + rename)
//!   - Optional hard quota on the total size of stored values
//!
//! - [`mem_backend::MemBackend`]: In-memory storage
//!   - Used by tests, with optional quota and simulated write errors
//!   - Also serves as session-scoped storage when nothing should outlive the process
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json                     # AppConfig (read directly, not via a backend)
//! ├── storage/
//! │   └── countdown-collection.json   # The CountdownCollection
//! └── session/
//!     └── self-generated-hash.json    # Share-link session marker
//! ```

pub mod backend;
pub mod countdowns;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use countdowns::{CountdownStore, StorageUsage, StoreOptions, UsageLevel};
