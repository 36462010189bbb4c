use crate::commands::helpers::{resolve, Selector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut CountdownStore<B>,
    selector: &Selector,
) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    let mut result = CmdResult::default();

    if let Some(removed) = store.delete(&id) {
        result.add_message(CmdMessage::success(format!(
            "Countdown deleted: {}",
            removed.name
        )));
        result.affected.push(removed);
    }

    match store.active() {
        Some(active) => result.add_message(CmdMessage::info(format!("Active: {}", active.name))),
        None => result.add_message(CmdMessage::info(
            "No countdowns left. Create one to get started.",
        )),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::Configuration;
    use crate::store::mem_backend::MemBackend;
    use chrono::{TimeZone, Utc};

    fn store() -> CountdownStore<MemBackend> {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        )
    }

    #[test]
    fn deletes_by_position() {
        let mut store = store();
        store.create("Second");
        let result = run(&mut store, &Selector::Position(2)).unwrap();
        assert_eq!(result.affected[0].name, "Second");
        assert_eq!(store.countdowns().len(), 1);
        assert_eq!(store.active().unwrap().name, "My Countdown");
    }

    #[test]
    fn deleting_everything_reports_empty() {
        let mut store = store();
        let result = run(&mut store, &Selector::Position(1)).unwrap();
        assert!(store.countdowns().is_empty());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("No countdowns left")));
    }

    #[test]
    fn unknown_selector_errors() {
        let mut store = store();
        assert!(run(&mut store, &Selector::Position(3)).is_err());
    }
}
