//! # Command Layer
//!
//! The business flows of the app. Each command lives in its own submodule and
//! operates on the [`CountdownStore`](crate::store::CountdownStore) and, for sharing,
//! the [`UrlBridge`](crate::url::UrlBridge).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Resolve user selectors (list positions, ids, id prefixes) to countdown ids
//! - Apply the operation through the store, which keeps durability concerns out of here
//! - Return structured [`CmdResult`] values with affected/listed countdowns and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, no colors, no exit codes
//! - **Persistence error handling**: the store converts failed writes into warnings,
//!   which the API facade drains into the result
//!
//! ## Testing Strategy
//!
//! Command tests use `MemBackend` and `FixedClock`, and verify both the store state
//! and the messages in the returned `CmdResult`.
//!
//! ## Command Modules
//!
//! - [`create`], [`delete`], [`rename`], [`switch`], [`duplicate`]: collection management
//! - [`list`]: countdowns with their list positions
//! - [`reset`]: start over from a single default countdown
//! - [`edit`]: change the active configuration (date, text, mode, interval)
//! - [`photos`]: add, remove and select background photos
//! - [`share`]: size advisory, then publish a share link
//! - [`import`]: detect and import an externally shared link
//! - [`status`]: time remaining for the active countdown
//! - [`usage`]: storage accounting
//! - [`config`]: view and change app configuration
//! - [`helpers`]: selector parsing and resolution

use crate::codec::ShareSize;
use crate::config::AppConfig;
use crate::model::SavedCountdown;
use crate::remaining::TimeRemaining;
use crate::store::StorageUsage;
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod helpers;
pub mod import;
pub mod list;
pub mod photos;
pub mod rename;
pub mod reset;
pub mod share;
pub mod status;
pub mod switch;
pub mod usage;

#[derive(Debug, Clone)]
pub struct CountdownPaths {
    pub data_dir: PathBuf,
}

impl CountdownPaths {
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    /// Holds the share-link marker, apart from the quota-limited storage.
    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("session")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A countdown as shown in a listing: 1-based position plus the active flag.
#[derive(Debug, Clone)]
pub struct ListedCountdown {
    pub position: usize,
    pub is_active: bool,
    pub countdown: SavedCountdown,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<SavedCountdown>,
    pub listed: Vec<ListedCountdown>,
    pub messages: Vec<CmdMessage>,
    pub share_url: Option<String>,
    pub share_size: Option<ShareSize>,
    pub usage: Option<StorageUsage>,
    pub remaining: Option<TimeRemaining>,
    pub config: Option<AppConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<ListedCountdown>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
