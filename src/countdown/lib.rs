//! # Countdown Architecture
//!
//! Countdown is a **UI-agnostic core** for countdown timers that can be saved
//! locally and shared as a single link. The CLI in this crate is one client; a
//! browser front end would be another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (selectors, URLs)                      │
//! │  - Drains storage warnings into results                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business flows: share, import, photos, edit, ...         │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                                  │
//!                 ▼                                  ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │  Storage Layer (store/)       │  │  URL Bridge (url.rs)     │
//! │  - StorageBackend trait       │  │  - #state=<token>        │
//! │  - FsBackend, MemBackend      │  │  - self-link suppression │
//! │  - CountdownStore             │  │  - State Codec (codec.rs)│
//! └───────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Key Principle: Writes Never Lose Work
//!
//! The in-memory collection is the source of truth for the running session. If
//! a write fails (quota, I/O) the change stays in memory and the caller gets a
//! warning instead of an error. See [`store::CountdownStore`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction, backends and the countdown collection
//! - [`url`]: Share links in the address fragment
//! - [`codec`]: Configuration ⇄ compact URL-safe token
//! - [`model`]: Core data types (`Configuration`, `SavedCountdown`, ...)
//! - [`clock`]: Injectable time source
//! - [`remaining`]: Time-left breakdown
//! - [`slideshow`]: Background photo rotation
//! - [`config`]: App configuration
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod remaining;
pub mod slideshow;
pub mod store;
pub mod url;
