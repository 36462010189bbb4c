use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::model::{PhotoMode, TextPosition};
use crate::store::{CountdownStore, StorageBackend};
use chrono::{DateTime, Utc};

/// A partial change to the active configuration. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigEdit {
    pub target_date: Option<DateTime<Utc>>,
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub position: Option<TextPosition>,
    pub text_shadow: Option<bool>,
    pub shadow_color: Option<String>,
    pub shadow_blur: Option<u32>,
    pub background_overlay: Option<bool>,
    pub overlay_color: Option<String>,
    pub overlay_opacity: Option<f64>,
    pub photo_mode: Option<PhotoMode>,
    pub slideshow_interval: Option<u32>,
}

impl ConfigEdit {
    pub fn is_empty(&self) -> bool {
        self.target_date.is_none()
            && self.text.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.position.is_none()
            && self.text_shadow.is_none()
            && self.shadow_color.is_none()
            && self.shadow_blur.is_none()
            && self.background_overlay.is_none()
            && self.overlay_color.is_none()
            && self.overlay_opacity.is_none()
            && self.photo_mode.is_none()
            && self.slideshow_interval.is_none()
    }

    fn validate(&self) -> Result<()> {
        if self.slideshow_interval == Some(0) {
            return Err(CountdownError::Api(
                "Slideshow interval must be at least 1 second".into(),
            ));
        }
        if self.font_size == Some(0) {
            return Err(CountdownError::Api("Font size must be positive".into()));
        }
        if let Some(opacity) = self.overlay_opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(CountdownError::Api(
                    "Overlay opacity must be between 0 and 1".into(),
                ));
            }
        }
        Ok(())
    }
}

pub fn run<B: StorageBackend>(store: &mut CountdownStore<B>, edit: ConfigEdit) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if edit.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change."));
        return Ok(result);
    }
    edit.validate()?;

    let Some(active) = store.active() else {
        return Err(CountdownError::Api("No active countdown to edit".into()));
    };
    let mut config = active.settings.clone();
    let style = &mut config.text_style;

    if let Some(v) = edit.target_date {
        config.target_date = v;
    }
    if let Some(v) = edit.text {
        style.content = v;
    }
    if let Some(v) = edit.font_family {
        style.font_family = v;
    }
    if let Some(v) = edit.font_size {
        style.font_size = v;
    }
    if let Some(v) = edit.color {
        style.color = v;
    }
    if let Some(v) = edit.position {
        style.position = v;
    }
    if let Some(v) = edit.text_shadow {
        style.text_shadow = v;
    }
    if let Some(v) = edit.shadow_color {
        style.shadow_color = v;
    }
    if let Some(v) = edit.shadow_blur {
        style.shadow_blur = v;
    }
    if let Some(v) = edit.background_overlay {
        style.background_overlay = v;
    }
    if let Some(v) = edit.overlay_color {
        style.overlay_color = v;
    }
    if let Some(v) = edit.overlay_opacity {
        style.overlay_opacity = v;
    }
    if let Some(v) = edit.photo_mode {
        config.photo_mode = v;
    }
    if let Some(v) = edit.slideshow_interval {
        config.slideshow_interval = v;
    }

    store.update_active(config);
    if let Some(active) = store.active() {
        result.add_message(CmdMessage::success(format!("Updated {}", active.name)));
        result.affected.push(active.clone());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::Configuration;
    use crate::store::mem_backend::MemBackend;
    use chrono::TimeZone;

    fn store() -> CountdownStore<MemBackend> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        )
    }

    #[test]
    fn applies_only_given_fields() {
        let mut store = store();
        let target = Utc.with_ymd_and_hms(2025, 12, 24, 18, 0, 0).unwrap();
        let edit = ConfigEdit {
            target_date: Some(target),
            text: Some("Christmas Eve".into()),
            position: Some(TextPosition::TopCenter),
            photo_mode: Some(PhotoMode::Random),
            ..Default::default()
        };
        run(&mut store, edit).unwrap();

        let settings = &store.active().unwrap().settings;
        assert_eq!(settings.target_date, target);
        assert_eq!(settings.text_style.content, "Christmas Eve");
        assert_eq!(settings.text_style.position, TextPosition::TopCenter);
        assert_eq!(settings.photo_mode, PhotoMode::Random);
        assert_eq!(settings.text_style.font_family, "Inter");
        assert_eq!(settings.slideshow_interval, 5);
    }

    #[test]
    fn rejects_zero_interval_and_bad_opacity() {
        let mut store = store();
        let zero = ConfigEdit {
            slideshow_interval: Some(0),
            ..Default::default()
        };
        assert!(run(&mut store, zero).is_err());

        let opaque = ConfigEdit {
            overlay_opacity: Some(1.5),
            ..Default::default()
        };
        assert!(run(&mut store, opaque).is_err());
        assert_eq!(store.active().unwrap().settings.slideshow_interval, 5);
    }

    #[test]
    fn empty_edit_is_noop() {
        let mut store = store();
        let before = store.collection().clone();
        let result = run(&mut store, ConfigEdit::default()).unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(store.collection(), &before);
    }
}
