//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every countdown operation, whichever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (selector strings into [`Selector`]s, URLs into fragments)
//! - **Drains store warnings** into the returned [`CmdResult`] messages
//! - **Persists the session marker** after anything that may have changed it
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Terminal I/O**: no stdout, stderr, or exit codes
//!
//! ## Generic Over Backend and Location
//!
//! `CountdownApi<B: StorageBackend, L: Location>`:
//! - Production (CLI): `CountdownApi<FsBackend, MemoryLocation>`
//! - Testing: `CountdownApi<MemBackend, MemoryLocation>`
//!
//! The second backend (`session`) holds the [`SessionMarker`] and plays the part
//! of tab-scoped session storage.

use crate::commands;
use crate::commands::helpers::Selector;
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};
use crate::url::{Location, MemoryLocation, SessionMarker, UrlBridge};
use std::str::FromStr;
use tracing::warn;

pub struct CountdownApi<B: StorageBackend, L: Location> {
    store: CountdownStore<B>,
    bridge: UrlBridge<L>,
    session: B,
    paths: CountdownPaths,
}

impl<B: StorageBackend, L: Location> CountdownApi<B, L> {
    pub fn new(store: CountdownStore<B>, location: L, session: B, paths: CountdownPaths) -> Self {
        let marker = SessionMarker::load(&session);
        Self {
            store,
            bridge: UrlBridge::new(location, marker),
            session,
            paths,
        }
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn create(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::create::run(&mut self.store, name);
        self.finish(result)
    }

    pub fn delete(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = Selector::from_str(selector)?;
        let result = commands::delete::run(&mut self.store, &selector);
        self.finish(result)
    }

    pub fn rename(&mut self, selector: &str, new_name: &str) -> Result<CmdResult> {
        let selector = Selector::from_str(selector)?;
        let result = commands::rename::run(&mut self.store, &selector, new_name);
        self.finish(result)
    }

    pub fn switch(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = Selector::from_str(selector)?;
        let result = commands::switch::run(&mut self.store, &selector);
        self.finish(result)
    }

    pub fn duplicate(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = Selector::from_str(selector)?;
        let result = commands::duplicate::run(&mut self.store, &selector);
        self.finish(result)
    }

    pub fn edit(&mut self, edit: ConfigEdit) -> Result<CmdResult> {
        let result = commands::edit::run(&mut self.store, edit);
        self.finish(result)
    }

    pub fn add_photo(&mut self, data: String, thumbnail: Option<String>) -> Result<CmdResult> {
        let result = commands::photos::add(&mut self.store, data, thumbnail);
        self.finish(result)
    }

    pub fn remove_photo(&mut self, photo: &str) -> Result<CmdResult> {
        let result = commands::photos::remove(&mut self.store, photo);
        self.finish(result)
    }

    pub fn select_photo(&mut self, position: usize) -> Result<CmdResult> {
        let result = commands::photos::select(&mut self.store, position);
        self.finish(result)
    }

    pub fn share(&mut self) -> Result<CmdResult> {
        let result = commands::share::run(&self.store, &mut self.bridge);
        let result = self.finish(result);
        self.save_marker(result)
    }

    /// Import whatever shared state the current location carries.
    pub fn import_shared(&mut self) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, &mut self.bridge);
        let result = self.finish(result);
        self.save_marker(result)
    }

    /// Point the location at `url`'s fragment, then import from it.
    pub fn open(&mut self, url: &str) -> Result<CmdResult> {
        let target = MemoryLocation::parse(url);
        let location = self.bridge.location_mut();
        if target.hash().is_empty() {
            location.clear_hash();
        } else {
            location.replace_hash(target.hash());
        }
        self.import_shared()
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.store)
    }

    pub fn usage(&self) -> Result<CmdResult> {
        commands::usage::run(&self.store)
    }

    pub fn reset(&mut self) -> Result<CmdResult> {
        let result = commands::reset::run(&mut self.store);
        self.finish(result)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn store(&self) -> &CountdownStore<B> {
        &self.store
    }

    pub fn bridge(&self) -> &UrlBridge<L> {
        &self.bridge
    }

    pub fn paths(&self) -> &CountdownPaths {
        &self.paths
    }

    /// Store writes never fail a command; their warnings ride along in the result.
    fn finish(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        let mut result = result?;
        for warning in self.store.take_warnings() {
            result.add_message(CmdMessage::warning(warning));
        }
        Ok(result)
    }

    fn save_marker(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        let mut result = result?;
        if let Err(e) = self.bridge.marker().save(&self.session) {
            warn!(error = %e, "could not save session marker");
            result.add_message(CmdMessage::warning(
                "Could not remember this share link; opening it here may import a copy.",
            ));
        }
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::edit::ConfigEdit;
pub use crate::commands::{CmdMessage, CmdResult, CountdownPaths, ListedCountdown, MessageLevel};
