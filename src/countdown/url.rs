//! # URL Bridge
//!
//! Moves configurations in and out of the address fragment, using the
//! [`codec`](crate::codec) for the token and `#state=<token>` as the only
//! recognized fragment format.
//!
//! ## Self-generated links
//!
//! Sharing writes the user's own configuration into the fragment. Without extra
//! bookkeeping the next load would see that fragment and import it as a brand new
//! countdown, every time. The bridge therefore remembers, in a [`SessionMarker`],
//! the last fragment it published itself:
//!
//! ```text
//!            publish()                       check() with fragment == marker
//!   idle ──────────────▶ marker set ──────────────────────────────▶ SelfGenerated
//!    ▲                      │
//!    │     consume()        │  check() with any other #state= fragment
//!    └──────────────────────┴──────────────────────────────────────▶ External(config)
//! ```
//!
//! The marker lives as long as the browsing session (a tab, or one data directory
//! for the CLI) and is cleared once a shared link has been consumed.

use crate::codec;
use crate::error::{CodecError, Result};
use crate::model::Configuration;
use crate::store::StorageBackend;
use tracing::{debug, info};

pub const STATE_PREFIX: &str = "#state=";

/// Storage key for the session marker.
pub const SESSION_MARKER_KEY: &str = "self-generated-hash";

/// The address bar, as far as the bridge cares.
pub trait Location {
    /// The full URL, fragment included.
    fn href(&self) -> String;

    /// The fragment including its leading `#`, or an empty string.
    fn hash(&self) -> &str;

    /// Replace the fragment without reloading (history replace).
    fn replace_hash(&mut self, hash: &str);

    /// Drop the fragment without reloading.
    fn clear_hash(&mut self);
}

/// A `Location` held in memory: a base URL plus an optional fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    base: String,
    hash: String,
}

impl MemoryLocation {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            hash: String::new(),
        }
    }

    /// Split a URL at its first `#`.
    pub fn parse(url: &str) -> Self {
        let mut location = match url.split_once('#') {
            Some((base, fragment)) => {
                let mut loc = Self::new(base);
                loc.replace_hash(fragment);
                loc
            }
            None => Self::new(url),
        };
        if location.hash == "#" {
            location.hash.clear();
        }
        location
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> String {
        format!("{}{}", self.base, self.hash)
    }

    fn hash(&self) -> &str {
        &self.hash
    }

    fn replace_hash(&mut self, hash: &str) {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        self.hash = if hash.is_empty() {
            String::new()
        } else {
            format!("#{}", hash)
        };
    }

    fn clear_hash(&mut self) {
        self.hash.clear();
    }
}

/// Remembers the fragment this session generated for its own share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMarker {
    hash: Option<String>,
}

impl SessionMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the marker from session storage. Unreadable state means idle.
    pub fn load<B: StorageBackend + ?Sized>(backend: &B) -> Self {
        let hash = match backend.get_item(SESSION_MARKER_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Option<String>>(&raw).unwrap_or_default(),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "could not read session marker");
                None
            }
        };
        Self { hash }
    }

    pub fn save<B: StorageBackend + ?Sized>(&self, backend: &B) -> Result<()> {
        match &self.hash {
            Some(_) => backend.set_item(SESSION_MARKER_KEY, &serde_json::to_string(&self.hash)?),
            None => backend.remove_item(SESSION_MARKER_KEY),
        }
    }

    pub fn remember(&mut self, hash: &str) {
        self.hash = Some(hash.to_string());
    }

    pub fn clear(&mut self) {
        self.hash = None;
    }

    pub fn is_idle(&self) -> bool {
        self.hash.is_none()
    }

    pub fn matches(&self, hash: &str) -> bool {
        self.hash.as_deref() == Some(hash)
    }
}

/// What the current fragment carries.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedLink {
    /// No decodable state in the fragment.
    None,
    /// The fragment is the link this session published; do not import it.
    SelfGenerated,
    /// Someone else's configuration.
    External(Configuration),
}

/// Extract the token from a `#state=<token>` fragment.
pub fn state_token(hash: &str) -> Option<&str> {
    hash.strip_prefix(STATE_PREFIX).filter(|t| !t.is_empty())
}

pub struct UrlBridge<L: Location> {
    location: L,
    marker: SessionMarker,
}

impl<L: Location> UrlBridge<L> {
    pub fn new(location: L, marker: SessionMarker) -> Self {
        Self { location, marker }
    }

    /// The configuration in the current fragment, if there is a valid one.
    pub fn read_shared(&self) -> Option<Configuration> {
        let hash = self.location.hash();
        if hash.is_empty() || hash == "#" {
            return None;
        }
        let Some(token) = state_token(hash) else {
            debug!(hash_len = hash.len(), "fragment has no state parameter");
            return None;
        };
        codec::decode(token)
    }

    /// Put `config` in the fragment and mark it as self-generated.
    /// Returns the full shareable URL.
    pub fn publish(&mut self, config: &Configuration) -> std::result::Result<String, CodecError> {
        let token = codec::encode(config)?;
        let hash = format!("{}{}", STATE_PREFIX, token);
        self.location.replace_hash(&hash);
        self.marker.remember(self.location.hash());
        info!(token_bytes = token.len(), "published share link");
        Ok(self.location.href())
    }

    /// Clear the fragment after a shared link has been imported.
    pub fn consume(&mut self) {
        self.location.clear_hash();
        self.marker.clear();
    }

    /// Classify the current fragment.
    pub fn check(&self) -> SharedLink {
        let Some(config) = self.read_shared() else {
            return SharedLink::None;
        };
        if self.marker.matches(self.location.hash()) {
            debug!("fragment is this session's own share link");
            return SharedLink::SelfGenerated;
        }
        SharedLink::External(config)
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn marker(&self) -> &SessionMarker {
        &self.marker
    }
}
