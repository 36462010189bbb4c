use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::model::{Configuration, Photo};
use crate::store::{CountdownStore, StorageBackend};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::Path;

fn active_settings<B: StorageBackend>(store: &CountdownStore<B>) -> Result<Configuration> {
    store
        .active()
        .map(|c| c.settings.clone())
        .ok_or_else(|| CountdownError::Api("No active countdown".into()))
}

/// Append a photo to the active countdown.
pub fn add<B: StorageBackend>(
    store: &mut CountdownStore<B>,
    data: String,
    thumbnail: Option<String>,
) -> Result<CmdResult> {
    if data.trim().is_empty() {
        return Err(CountdownError::Api("Photo data cannot be empty".into()));
    }
    let mut config = active_settings(store)?;
    let photo = Photo::new(data, thumbnail);
    let photo_id = photo.id.clone();
    config.add_photo(photo);
    let count = config.photos.len();
    store.update_active(config);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Photo added: {} ({} total)",
        photo_id, count
    )));
    Ok(result)
}

/// Remove a photo by 1-based position or by id.
pub fn remove<B: StorageBackend>(store: &mut CountdownStore<B>, photo: &str) -> Result<CmdResult> {
    let mut config = active_settings(store)?;
    let photo_id = resolve_photo(&config, photo)?;
    let removed = config
        .remove_photo(&photo_id)
        .ok_or_else(|| CountdownError::NotFound(photo.to_string()))?;
    let left = config.photos.len();
    store.update_active(config);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Photo removed: {}", removed.id)));
    if left == 0 {
        result.add_message(CmdMessage::info("No photos left."));
    }
    Ok(result)
}

/// Show the photo at a 1-based position.
pub fn select<B: StorageBackend>(store: &mut CountdownStore<B>, position: usize) -> Result<CmdResult> {
    let mut config = active_settings(store)?;
    let index = position
        .checked_sub(1)
        .filter(|i| *i < config.photos.len())
        .ok_or_else(|| CountdownError::NotFound(format!("photo #{}", position)))?;
    config.current_photo_index = index;
    config.clamp_photo_index();
    store.update_active(config);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Showing photo #{}", position)));
    Ok(result)
}

fn resolve_photo(config: &Configuration, photo: &str) -> Result<String> {
    if !photo.is_empty() && photo.chars().all(|c| c.is_ascii_digit()) {
        let position: usize = photo
            .parse()
            .map_err(|_| CountdownError::Api(format!("Invalid position: {}", photo)))?;
        return position
            .checked_sub(1)
            .and_then(|i| config.photos.get(i))
            .map(|p| p.id.clone())
            .ok_or_else(|| CountdownError::NotFound(format!("photo #{}", position)));
    }
    config
        .photos
        .iter()
        .find(|p| p.id == photo)
        .map(|p| p.id.clone())
        .ok_or_else(|| CountdownError::NotFound(photo.to_string()))
}

/// Read an image file into a `data:` URL, the form photos are stored in.
pub fn data_url_from_file(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => {
            return Err(CountdownError::Api(format!(
                "Unsupported image type: {}",
                path.display()
            )))
        }
    };
    let bytes = fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::mem_backend::MemBackend;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn store() -> CountdownStore<MemBackend> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        )
    }

    fn photos(store: &CountdownStore<MemBackend>) -> &Configuration {
        &store.active().unwrap().settings
    }

    #[test]
    fn add_select_remove_keeps_index_in_range() {
        let mut store = store();
        for name in ["a", "b", "c"] {
            add(&mut store, format!("data:image/png;base64,{}", name), None).unwrap();
        }
        assert_eq!(photos(&store).photos.len(), 3);

        select(&mut store, 3).unwrap();
        assert_eq!(photos(&store).current_photo_index, 2);

        remove(&mut store, "3").unwrap();
        let config = photos(&store);
        assert_eq!(config.photos.len(), 2);
        assert_eq!(config.current_photo_index, 1);

        let first_id = config.photos[0].id.clone();
        remove(&mut store, &first_id).unwrap();
        remove(&mut store, "1").unwrap();
        let config = photos(&store);
        assert!(config.photos.is_empty());
        assert_eq!(config.current_photo_index, 0);
    }

    #[test]
    fn unknown_photos_are_not_found() {
        let mut store = store();
        assert!(matches!(remove(&mut store, "1"), Err(CountdownError::NotFound(_))));
        assert!(matches!(remove(&mut store, "photo-x"), Err(CountdownError::NotFound(_))));
        assert!(matches!(select(&mut store, 0), Err(CountdownError::NotFound(_))));
        assert!(add(&mut store, "  ".into(), None).is_err());
    }

    #[test]
    fn photo_ids_are_generated() {
        let mut store = store();
        add(&mut store, "data:image/png;base64,AA".into(), Some("thumb".into())).unwrap();
        let photo = &photos(&store).photos[0];
        assert!(photo.id.starts_with("photo-"));
        assert_eq!(photo.thumbnail.as_deref(), Some("thumb"));
    }

    #[test]
    fn reads_image_files_as_data_urls() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("pic.PNG");
        fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(
            data_url_from_file(&png).unwrap(),
            format!("data:image/png;base64,{}", STANDARD.encode([0x89, b'P', b'N', b'G']))
        );

        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "hi").unwrap();
        assert!(data_url_from_file(&txt).is_err());
    }
}
