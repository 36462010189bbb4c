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

    let copy_id = store.duplicate(&id);
    if let Some(copy) = copy_id.as_ref().and_then(|copy_id| store.get(copy_id)) {
        result.add_message(CmdMessage::success(format!(
            "Countdown duplicated: {}",
            copy.name
        )));
        result.affected.push(copy.clone());
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
    fn duplicates_and_activates_copy() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut store = CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            FixedClock::new(now),
        );
        let result = run(&mut store, &Selector::Position(1)).unwrap();
        assert_eq!(result.affected[0].name, "My Countdown (Copy)");
        assert_eq!(store.countdowns().len(), 2);
        assert_eq!(store.active_id(), Some(&result.affected[0].id));
    }
}
