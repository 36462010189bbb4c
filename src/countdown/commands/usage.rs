use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend, UsageLevel};

pub fn run<B: StorageBackend>(store: &CountdownStore<B>) -> Result<CmdResult> {
    let usage = store.report_usage();
    let mut result = CmdResult::default();
    match usage.level() {
        UsageLevel::Critical => result.add_message(CmdMessage::error(
            "Storage is almost full! Delete old countdowns or remove photos to free up space.",
        )),
        UsageLevel::Elevated => result.add_message(CmdMessage::warning(
            "Storage is getting full. Consider removing unused countdowns or photos.",
        )),
        UsageLevel::Normal => {}
    }
    result.usage = Some(usage);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::commands::MessageLevel;
    use crate::model::{Configuration, Photo};
    use crate::store::mem_backend::MemBackend;
    use crate::store::StoreOptions;
    use chrono::{TimeZone, Utc};

    fn store_with_limit(limit: usize) -> CountdownStore<MemBackend> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CountdownStore::with_options(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
            StoreOptions {
                storage_limit: limit,
                ..Default::default()
            },
        )
    }

    #[test]
    fn fresh_store_is_normal() {
        let store = store_with_limit(5 * 1024 * 1024);
        let result = run(&store).unwrap();
        let usage = result.usage.unwrap();
        assert!(usage.used_bytes > 0);
        assert!(usage.percent_used < 1.0);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn nearly_full_store_is_critical() {
        let mut store = store_with_limit(10_000);
        let mut config = store.active().unwrap().settings.clone();
        config.add_photo(Photo::new("x".repeat(9_000), None));
        store.update_active(config);

        let result = run(&store).unwrap();
        assert!(result.usage.unwrap().percent_used > 80.0);
        assert!(result.has_level(MessageLevel::Error));
    }
}
