use crate::codec::{self, ShareAdvisory};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::store::{CountdownStore, StorageBackend};
use crate::url::{Location, UrlBridge};
use tracing::info;

/// Build a share link for the active countdown.
///
/// Oversized configurations are refused before anything touches the fragment.
pub fn run<B: StorageBackend, L: Location>(
    store: &CountdownStore<B>,
    bridge: &mut UrlBridge<L>,
) -> Result<CmdResult> {
    let active = store
        .active()
        .ok_or_else(|| CountdownError::Api("No active countdown to share".into()))?;
    let config = &active.settings;
    let photo_count = config.photos.len();

    let size = codec::assess(config)?;
    let mut result = CmdResult {
        share_size: Some(size),
        ..Default::default()
    };
    info!(bytes = size.bytes, advisory = ?size.advisory, "share size assessed");

    match size.advisory {
        ShareAdvisory::Refuse => {
            result.add_message(CmdMessage::error(format!(
                "Configuration too large ({}KB with {} photos) to share via URL.",
                size.kilobytes(),
                photo_count
            )));
            result.add_message(CmdMessage::info(
                "Your settings are saved locally. To share via URL, reduce to 5-10 photos maximum.",
            ));
            return Ok(result);
        }
        ShareAdvisory::Warn => {
            result.add_message(CmdMessage::warning(format!(
                "Configuration is {}KB with {} photos. The URL may not work in all browsers.",
                size.kilobytes(),
                photo_count
            )));
            result.add_message(CmdMessage::info(
                "For reliable sharing, use 3-5 photos max. Your settings are saved locally regardless.",
            ));
        }
        ShareAdvisory::Ok => {}
    }

    let url = bridge.publish(config)?;
    result.add_message(CmdMessage::success(format!("Share link ready for {}", active.name)));
    result.affected.push(active.clone());
    result.share_url = Some(url);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::commands::MessageLevel;
    use crate::model::{Configuration, Photo};
    use crate::store::mem_backend::MemBackend;
    use crate::url::{MemoryLocation, SessionMarker, SharedLink};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use chrono::{TimeZone, Utc};

    fn store() -> CountdownStore<MemBackend> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        )
    }

    fn bridge() -> UrlBridge<MemoryLocation> {
        UrlBridge::new(
            MemoryLocation::new("https://countdown.local/"),
            SessionMarker::new(),
        )
    }

    // Incompressible bytes so the token size tracks the photo size.
    fn noisy_photo(len: usize, seed: u64) -> Photo {
        let mut x = seed | 1;
        let bytes: Vec<u8> = (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                x as u8
            })
            .collect();
        Photo::new(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)), None)
    }

    fn with_photos(store: &mut CountdownStore<MemBackend>, count: usize, len: usize) {
        let mut config = store.active().unwrap().settings.clone();
        for i in 0..count {
            config.add_photo(noisy_photo(len, i as u64 + 1));
        }
        store.update_active(config);
    }

    #[test]
    fn small_config_publishes_without_warning() {
        let store = store();
        let mut bridge = bridge();
        let result = run(&store, &mut bridge).unwrap();

        let url = result.share_url.as_deref().unwrap();
        assert!(url.starts_with("https://countdown.local/#state="));
        assert!(!result.has_level(MessageLevel::Warning));
        assert_eq!(bridge.check(), SharedLink::SelfGenerated);
    }

    #[test]
    fn medium_config_warns_but_publishes() {
        let mut store = store();
        with_photos(&mut store, 2, 25_000);
        let mut bridge = bridge();

        let result = run(&store, &mut bridge).unwrap();
        assert_eq!(result.share_size.unwrap().advisory, ShareAdvisory::Warn);
        assert!(result.has_level(MessageLevel::Warning));
        assert!(result.share_url.is_some());
    }

    #[test]
    fn oversized_config_is_refused() {
        let mut store = store();
        with_photos(&mut store, 6, 30_000);
        let mut bridge = bridge();

        let result = run(&store, &mut bridge).unwrap();
        assert_eq!(result.share_size.unwrap().advisory, ShareAdvisory::Refuse);
        assert!(result.has_level(MessageLevel::Error));
        assert!(result.share_url.is_none());
        assert_eq!(bridge.location().hash(), "");
        assert!(bridge.marker().is_idle());
    }
}
