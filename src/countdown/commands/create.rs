use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::store::{CountdownStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut CountdownStore<B>, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CountdownError::Api("Name cannot be empty".into()));
    }

    let id = store.create(name);
    let mut result = CmdResult::default();
    if let Some(created) = store.get(&id) {
        result.affected.push(created.clone());
    }
    result.add_message(CmdMessage::success(format!("Countdown created: {}", name)));
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
    fn creates_and_activates() {
        let mut store = store();
        let result = run(&mut store, "  Trip ").unwrap();
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].name, "Trip");
        assert_eq!(store.active_id(), Some(&result.affected[0].id));
    }

    #[test]
    fn rejects_blank_name() {
        let mut store = store();
        assert!(run(&mut store, "   ").is_err());
        assert_eq!(store.countdowns().len(), 1);
    }
}
