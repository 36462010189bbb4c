//! # Data Model
//!
//! The shapes persisted in the durable record and carried inside share tokens.
//! Field names serialize in camelCase so records written by earlier builds of the
//! web client load unchanged.
//!
//! A [`Configuration`] is everything needed to render one countdown. A
//! [`SavedCountdown`] wraps a configuration with identity and timestamps, and the
//! [`CountdownCollection`] is the whole durable state: the saved countdowns plus a
//! pointer to the active one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DEFAULT_COUNTDOWN_NAME: &str = "My Countdown";
pub const DEFAULT_SLIDESHOW_INTERVAL: u32 = 5;
pub const DEFAULT_LEAD_DAYS: i64 = 7;
/// Upper bound on how far ahead a fresh countdown may start, about a century.
pub const MAX_LEAD_DAYS: i64 = 36_500;

/// How the background photo is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoMode {
    #[default]
    Slideshow,
    Random,
    Manual,
}

impl fmt::Display for PhotoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhotoMode::Slideshow => "slideshow",
            PhotoMode::Random => "random",
            PhotoMode::Manual => "manual",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PhotoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slideshow" => Ok(PhotoMode::Slideshow),
            "random" => Ok(PhotoMode::Random),
            "manual" => Ok(PhotoMode::Manual),
            other => Err(format!("unknown photo mode: {}", other)),
        }
    }
}

/// Where the overlay text sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPosition {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextPosition {
    pub const ALL: [TextPosition; 7] = [
        TextPosition::TopLeft,
        TextPosition::TopCenter,
        TextPosition::TopRight,
        TextPosition::Center,
        TextPosition::BottomLeft,
        TextPosition::BottomCenter,
        TextPosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextPosition::TopLeft => "top-left",
            TextPosition::TopCenter => "top-center",
            TextPosition::TopRight => "top-right",
            TextPosition::Center => "center",
            TextPosition::BottomLeft => "bottom-left",
            TextPosition::BottomCenter => "bottom-center",
            TextPosition::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TextPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextPosition::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown text position: {}", s))
    }
}

/// Overlay text styling.
///
/// Every field has a default so older records missing the shadow or overlay
/// settings still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub content: String,
    pub font_family: String,
    #[serde(deserialize_with = "nullable::font_size")]
    pub font_size: u32,
    pub color: String,
    pub position: TextPosition,
    pub text_shadow: bool,
    pub shadow_color: String,
    #[serde(deserialize_with = "nullable::shadow_blur")]
    pub shadow_blur: u32,
    pub background_overlay: bool,
    pub overlay_color: String,
    #[serde(deserialize_with = "nullable::overlay_opacity")]
    pub overlay_opacity: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            content: "Countdown to Adventure".to_string(),
            font_family: "Inter".to_string(),
            font_size: 48,
            color: "#ffffff".to_string(),
            position: TextPosition::Center,
            text_shadow: true,
            shadow_color: "#000000".to_string(),
            shadow_blur: 10,
            background_overlay: true,
            overlay_color: "#000000".to_string(),
            overlay_opacity: 0.5,
        }
    }
}

/// One background photo. The payloads are already text-encoded (usually `data:` URLs);
/// nothing in this crate decodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Photo {
    pub fn new(data: String, thumbnail: Option<String>) -> Self {
        Self {
            id: format!("photo-{}", Uuid::new_v4().simple()),
            data,
            thumbnail,
        }
    }
}

/// Everything needed to render one countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub target_date: DateTime<Utc>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub photo_mode: PhotoMode,
    #[serde(
        default = "default_slideshow_interval",
        deserialize_with = "nullable::slideshow_interval"
    )]
    pub slideshow_interval: u32,
    #[serde(default, deserialize_with = "nullable::current_photo_index")]
    pub current_photo_index: usize,
    #[serde(default)]
    pub text_style: TextStyle,
}

fn default_slideshow_interval() -> u32 {
    DEFAULT_SLIDESHOW_INTERVAL
}

/// Numeric fields the web client may have stored as `null` (an empty input
/// parsed to `NaN`). Each reads `null` as its default.
mod nullable {
    use super::{Deserialize, Deserializer, TextStyle, DEFAULT_SLIDESHOW_INTERVAL};

    fn or<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or(fallback))
    }

    pub fn font_size<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        or(d, TextStyle::default().font_size)
    }

    pub fn shadow_blur<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        or(d, TextStyle::default().shadow_blur)
    }

    pub fn overlay_opacity<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        or(d, TextStyle::default().overlay_opacity)
    }

    pub fn slideshow_interval<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        or(d, DEFAULT_SLIDESHOW_INTERVAL)
    }

    pub fn current_photo_index<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
        or(d, 0)
    }
}

impl Configuration {
    /// The stock configuration: a week out from `now`, no photos.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self::with_lead(now, DEFAULT_LEAD_DAYS)
    }

    /// Like [`Configuration::default_at`] with a custom lead. A lead that does not
    /// fit in a date falls back to the stock week.
    pub fn with_lead(now: DateTime<Utc>, lead_days: i64) -> Self {
        let target_date = Duration::try_days(lead_days)
            .and_then(|lead| now.checked_add_signed(lead))
            .unwrap_or_else(|| now + Duration::days(DEFAULT_LEAD_DAYS));
        Self {
            target_date,
            photos: Vec::new(),
            photo_mode: PhotoMode::default(),
            slideshow_interval: DEFAULT_SLIDESHOW_INTERVAL,
            current_photo_index: 0,
            text_style: TextStyle::default(),
        }
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.photos.get(self.current_photo_index)
    }

    /// Keeps `current_photo_index` inside the photo sequence.
    pub fn clamp_photo_index(&mut self) {
        if self.photos.is_empty() {
            self.current_photo_index = 0;
        } else if self.current_photo_index >= self.photos.len() {
            self.current_photo_index = self.photos.len() - 1;
        }
    }

    pub fn add_photo(&mut self, photo: Photo) {
        self.photos.push(photo);
    }

    /// Removes a photo by id, returning it. The index is clamped afterwards.
    pub fn remove_photo(&mut self, photo_id: &str) -> Option<Photo> {
        let pos = self.photos.iter().position(|p| p.id == photo_id)?;
        let removed = self.photos.remove(pos);
        self.clamp_photo_index();
        Some(removed)
    }
}

/// Identifier of a saved countdown. Opaque string so ids written by other
/// clients survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountdownId(String);

impl CountdownId {
    pub fn generate() -> Self {
        Self(format!("countdown-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountdownId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CountdownId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CountdownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCountdown {
    pub id: CountdownId,
    pub name: String,
    pub settings: Configuration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedCountdown {
    pub fn new(name: String, settings: Configuration, now: DateTime<Utc>) -> Self {
        Self {
            id: CountdownId::generate(),
            name,
            settings,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The full durable state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownCollection {
    #[serde(default)]
    pub countdowns: Vec<SavedCountdown>,
    #[serde(default)]
    pub active_countdown_id: Option<CountdownId>,
}

impl CountdownCollection {
    /// A collection holding one countdown, which is active.
    pub fn seeded(name: String, settings: Configuration, now: DateTime<Utc>) -> Self {
        let first = SavedCountdown::new(name, settings, now);
        Self {
            active_countdown_id: Some(first.id.clone()),
            countdowns: vec![first],
        }
    }

    pub fn get(&self, id: &CountdownId) -> Option<&SavedCountdown> {
        self.countdowns.iter().find(|c| &c.id == id)
    }

    pub fn get_mut(&mut self, id: &CountdownId) -> Option<&mut SavedCountdown> {
        self.countdowns.iter_mut().find(|c| &c.id == id)
    }

    /// The active countdown, if the pointer resolves.
    pub fn active(&self) -> Option<&SavedCountdown> {
        self.active_countdown_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut SavedCountdown> {
        let id = self.active_countdown_id.clone()?;
        self.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_config_targets_a_week_out() {
        let config = Configuration::default_at(now());
        assert_eq!(config.target_date, now() + Duration::days(7));
        assert!(config.photos.is_empty());
        assert_eq!(config.photo_mode, PhotoMode::Slideshow);
        assert_eq!(config.slideshow_interval, 5);
        assert_eq!(config.text_style.font_size, 48);
    }

    #[test]
    fn out_of_range_lead_falls_back_to_a_week() {
        let config = Configuration::with_lead(now(), 30);
        assert_eq!(config.target_date, now() + Duration::days(30));

        for lead in [1_000_000_000, i64::MAX, i64::MIN] {
            let config = Configuration::with_lead(now(), lead);
            assert_eq!(config.target_date, now() + Duration::days(7), "lead {}", lead);
        }
    }

    #[test]
    fn removing_last_photo_clamps_index() {
        let mut config = Configuration::default_at(now());
        config.add_photo(Photo::new("data:a".into(), None));
        config.add_photo(Photo::new("data:b".into(), None));
        config.current_photo_index = 1;

        let last_id = config.photos[1].id.clone();
        assert!(config.remove_photo(&last_id).is_some());
        assert_eq!(config.current_photo_index, 0);

        let first_id = config.photos[0].id.clone();
        config.remove_photo(&first_id);
        assert_eq!(config.current_photo_index, 0);
        assert!(config.current_photo().is_none());
    }

    #[test]
    fn remove_unknown_photo_is_none() {
        let mut config = Configuration::default_at(now());
        assert!(config.remove_photo("nope").is_none());
    }

    #[test]
    fn text_style_fills_missing_fields() {
        let style: TextStyle =
            serde_json::from_str(r#"{"content":"Launch","position":"bottom-right"}"#).unwrap();
        assert_eq!(style.content, "Launch");
        assert_eq!(style.position, TextPosition::BottomRight);
        assert_eq!(style.font_family, "Inter");
        assert!(style.text_shadow);
        assert_eq!(style.overlay_opacity, 0.5);
    }

    #[test]
    fn loads_web_client_record() {
        let json = r#"{
            "countdowns": [{
                "id": "countdown-1700000000000-abc123xyz",
                "name": "Wedding",
                "settings": {
                    "targetDate": "2025-06-14T15:00:00.000Z",
                    "photos": [{"id": "1700000000000-0", "data": "data:image/jpeg;base64,AAAA"}],
                    "photoMode": "manual",
                    "slideshowInterval": 8,
                    "currentPhotoIndex": 0,
                    "textStyle": {"content": "Big day", "fontSize": 64}
                },
                "createdAt": "2024-11-01T10:00:00.000Z",
                "updatedAt": "2024-11-02T10:00:00.000Z",
                "pinned": true
            }],
            "activeCountdownId": "countdown-1700000000000-abc123xyz"
        }"#;
        let collection: CountdownCollection = serde_json::from_str(json).unwrap();
        let active = collection.active().unwrap();
        assert_eq!(active.name, "Wedding");
        assert_eq!(active.settings.photo_mode, PhotoMode::Manual);
        assert_eq!(active.settings.photos[0].thumbnail, None);
        assert_eq!(active.settings.text_style.font_size, 64);
        assert_eq!(active.settings.text_style.color, "#ffffff");
    }

    #[test]
    fn null_numbers_load_as_defaults() {
        let json = r#"{
            "targetDate": "2025-06-14T15:00:00.000Z",
            "slideshowInterval": null,
            "currentPhotoIndex": null,
            "textStyle": {"content": "Big day", "fontSize": null, "shadowBlur": null, "overlayOpacity": null}
        }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.slideshow_interval, 5);
        assert_eq!(config.current_photo_index, 0);
        assert_eq!(config.text_style.content, "Big day");
        assert_eq!(config.text_style.font_size, 48);
        assert_eq!(config.text_style.shadow_blur, 10);
        assert_eq!(config.text_style.overlay_opacity, 0.5);
    }

    #[test]
    fn parses_modes_and_positions() {
        assert_eq!("random".parse::<PhotoMode>().unwrap(), PhotoMode::Random);
        assert!("sideways".parse::<PhotoMode>().is_err());
        assert_eq!(
            "top-center".parse::<TextPosition>().unwrap(),
            TextPosition::TopCenter
        );
        assert_eq!(TextPosition::BottomLeft.to_string(), "bottom-left");
    }

    #[test]
    fn dangling_active_pointer_resolves_to_none() {
        let mut collection =
            CountdownCollection::seeded("A".into(), Configuration::default_at(now()), now());
        collection.active_countdown_id = Some(CountdownId::from("missing"));
        assert!(collection.active().is_none());
    }
}
