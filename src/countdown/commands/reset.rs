use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

/// Drop every countdown and start over with a single default one.
pub fn run<B: StorageBackend>(store: &mut CountdownStore<B>) -> Result<CmdResult> {
    let removed = store.countdowns().len();
    store.reset();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} countdown{}. Starting fresh.",
        removed,
        if removed == 1 { "" } else { "s" }
    )));
    if let Some(active) = store.active() {
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
    use chrono::{TimeZone, Utc};

    #[test]
    fn reset_leaves_one_default_countdown() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut store = CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        );
        store.create("Trip");
        store.create("Party");

        let result = run(&mut store).unwrap();
        assert_eq!(result.messages[0].content, "Removed 3 countdowns. Starting fresh.");
        assert_eq!(store.countdowns().len(), 1);
        assert_eq!(store.active().unwrap().name, "My Countdown");
    }
}
