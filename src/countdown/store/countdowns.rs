use super::backend::StorageBackend;
use crate::clock::Clock;
use crate::error::CountdownError;
use crate::model::{
    Configuration, CountdownCollection, CountdownId, SavedCountdown, DEFAULT_COUNTDOWN_NAME,
};
use tracing::{debug, info, warn};

/// Storage key holding the serialized [`CountdownCollection`].
pub const COLLECTION_KEY: &str = "countdown-collection";

/// Approximate per-origin ceiling of browser local storage. Advisory only.
pub const DEFAULT_STORAGE_LIMIT: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Name given to the countdown seeded on first run.
    pub default_name: String,
    /// Ceiling used by [`CountdownStore::report_usage`].
    pub storage_limit: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_COUNTDOWN_NAME.to_string(),
            storage_limit: DEFAULT_STORAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Elevated,
    Critical,
}

/// Advisory storage accounting for the durable collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUsage {
    pub used_bytes: usize,
    pub limit_bytes: usize,
    pub percent_used: f64,
}

impl StorageUsage {
    pub fn new(used_bytes: usize, limit_bytes: usize) -> Self {
        let percent_used = if limit_bytes == 0 {
            100.0
        } else {
            used_bytes as f64 * 100.0 / limit_bytes as f64
        };
        Self {
            used_bytes,
            limit_bytes,
            percent_used,
        }
    }

    pub fn level(&self) -> UsageLevel {
        if self.percent_used > 80.0 {
            UsageLevel::Critical
        } else if self.percent_used > 60.0 {
            UsageLevel::Elevated
        } else {
            UsageLevel::Normal
        }
    }

    pub fn used_mb(&self) -> f64 {
        self.used_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn limit_mb(&self) -> f64 {
        self.limit_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// The persistence store: a durable, keyed collection of named countdowns with an
/// active-selection pointer.
///
/// Every mutating operation writes the whole collection back to the backend
/// (last write wins). A failed write never surfaces as an error: the attempted state
/// stays in memory as the source of truth for the session, and a human-readable
/// warning is queued for the UI (see [`CountdownStore::take_warnings`]).
///
/// Operations addressed by id are silent no-ops when the id is unknown.
pub struct CountdownStore<B: StorageBackend> {
    backend: B,
    collection: CountdownCollection,
    defaults: Configuration,
    clock: Box<dyn Clock>,
    options: StoreOptions,
    warnings: Vec<String>,
    unsaved: bool,
}

impl<B: StorageBackend> CountdownStore<B> {
    /// Load the durable collection, or seed a fresh one from `defaults`.
    pub fn initialize<C: Clock + 'static>(backend: B, defaults: Configuration, clock: C) -> Self {
        Self::with_options(backend, defaults, clock, StoreOptions::default())
    }

    pub fn with_options<C: Clock + 'static>(
        backend: B,
        defaults: Configuration,
        clock: C,
        options: StoreOptions,
    ) -> Self {
        let mut store = Self {
            backend,
            collection: CountdownCollection::default(),
            defaults,
            clock: Box::new(clock),
            options,
            warnings: Vec::new(),
            unsaved: false,
        };

        match store.load() {
            Some(mut loaded) if !loaded.is_empty() => {
                if loaded.active().is_none() {
                    let first = loaded.countdowns[0].id.clone();
                    warn!(active = %first, "stored collection had no usable active countdown, selecting the first");
                    loaded.active_countdown_id = Some(first);
                }
                info!(countdowns = loaded.len(), "loaded countdown collection");
                store.collection = loaded;
            }
            _ => store.seed(),
        }
        store
    }

    /// Corrupt or unreadable data is treated as absent.
    fn load(&self) -> Option<CountdownCollection> {
        let raw = match self.backend.get_item(COLLECTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read countdown collection");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(collection) => Some(collection),
            Err(e) => {
                warn!(error = %e, bytes = raw.len(), "stored countdown collection is corrupt, reseeding");
                None
            }
        }
    }

    fn seed(&mut self) {
        self.collection = CountdownCollection::seeded(
            self.options.default_name.clone(),
            self.defaults.clone(),
            self.clock.now(),
        );
        info!(name = %self.options.default_name, "seeded countdown collection");
        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.collection)
            .map_err(CountdownError::Serialization)
            .and_then(|json| self.backend.set_item(COLLECTION_KEY, &json));

        match result {
            Ok(()) => {
                self.unsaved = false;
                debug!(countdowns = self.collection.len(), "persisted countdown collection");
            }
            Err(CountdownError::QuotaExceeded { needed, limit }) => {
                warn!(needed, limit, "storage quota exceeded, keeping changes in memory");
                self.unsaved = true;
                self.warnings.push(
                    "Storage is full: your latest changes are kept for this session but were not saved. \
                     Remove some photos or countdowns to free up space."
                        .to_string(),
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to persist countdown collection, keeping changes in memory");
                self.unsaved = true;
                self.warnings.push(format!(
                    "Could not save your countdowns ({}). Changes are kept for this session only.",
                    e
                ));
            }
        }
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    // --- Operations ---

    /// Append a countdown built from the default configuration and make it active.
    pub fn create(&mut self, name: &str) -> CountdownId {
        let countdown = SavedCountdown::new(name.to_string(), self.defaults.clone(), self.now());
        let id = countdown.id.clone();
        self.collection.countdowns.push(countdown);
        self.collection.active_countdown_id = Some(id.clone());
        info!(id = %id, name, "created countdown");
        self.persist();
        id
    }

    /// Remove a countdown. Returns the removed entry.
    pub fn delete(&mut self, id: &CountdownId) -> Option<SavedCountdown> {
        let pos = self.collection.countdowns.iter().position(|c| &c.id == id)?;
        let removed = self.collection.countdowns.remove(pos);

        if self.collection.active_countdown_id.as_ref() == Some(id) {
            self.collection.active_countdown_id =
                self.collection.countdowns.first().map(|c| c.id.clone());
        }
        info!(id = %id, remaining = self.collection.len(), "deleted countdown");
        self.persist();
        Some(removed)
    }

    pub fn rename(&mut self, id: &CountdownId, new_name: &str) -> bool {
        let now = self.now();
        let Some(countdown) = self.collection.get_mut(id) else {
            return false;
        };
        countdown.name = new_name.to_string();
        countdown.updated_at = now;
        self.persist();
        true
    }

    /// Point "active" at `id`. Unknown ids are accepted and leave no resolvable
    /// active countdown until corrected. Returns whether the id resolves.
    pub fn switch_active(&mut self, id: &CountdownId) -> bool {
        let resolves = self.collection.get(id).is_some();
        if !resolves {
            warn!(id = %id, "switching to a countdown that does not exist");
        }
        self.collection.active_countdown_id = Some(id.clone());
        self.persist();
        resolves
    }

    /// Deep-copy a countdown under a new id and make the copy active.
    pub fn duplicate(&mut self, id: &CountdownId) -> Option<CountdownId> {
        let original = self.collection.get(id)?;
        let copy = SavedCountdown::new(
            format!("{} (Copy)", original.name),
            original.settings.clone(),
            self.now(),
        );
        let copy_id = copy.id.clone();
        self.collection.countdowns.push(copy);
        self.collection.active_countdown_id = Some(copy_id.clone());
        info!(from = %id, id = %copy_id, "duplicated countdown");
        self.persist();
        Some(copy_id)
    }

    /// Replace the active countdown's configuration.
    pub fn update_active(&mut self, config: Configuration) -> bool {
        let now = self.now();
        let Some(active) = self.collection.active_mut() else {
            debug!("no active countdown to update");
            return false;
        };
        active.settings = config;
        active.updated_at = now;
        self.persist();
        true
    }

    /// Discard everything and start over from the seeded default.
    pub fn reset(&mut self) {
        info!("resetting countdown collection");
        self.seed();
    }

    /// Size of the serialized collection against the advisory ceiling.
    pub fn report_usage(&self) -> StorageUsage {
        let used = serde_json::to_string(&self.collection)
            .map(|json| json.len() + COLLECTION_KEY.len())
            .unwrap_or(0);
        StorageUsage::new(used, self.options.storage_limit)
    }

    // --- Accessors ---

    pub fn collection(&self) -> &CountdownCollection {
        &self.collection
    }

    pub fn countdowns(&self) -> &[SavedCountdown] {
        &self.collection.countdowns
    }

    pub fn get(&self, id: &CountdownId) -> Option<&SavedCountdown> {
        self.collection.get(id)
    }

    pub fn active(&self) -> Option<&SavedCountdown> {
        self.collection.active()
    }

    pub fn active_id(&self) -> Option<&CountdownId> {
        self.collection.active_countdown_id.as_ref()
    }

    pub fn defaults(&self) -> &Configuration {
        &self.defaults
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Whether the in-memory collection is ahead of durable storage.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Drain the warnings queued by failed writes.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
