use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::remaining::TimeRemaining;
use crate::store::{CountdownStore, StorageBackend};

/// Time left on the active countdown, measured against the store's clock.
pub fn run<B: StorageBackend>(store: &CountdownStore<B>) -> Result<CmdResult> {
    let active = store
        .active()
        .ok_or_else(|| CountdownError::Api("No active countdown".into()))?;
    let remaining = TimeRemaining::between(active.settings.target_date, store.clock().now());

    let mut result = CmdResult::default();
    if remaining.is_expired {
        result.add_message(CmdMessage::info(format!("{} has ended.", active.name)));
    }
    result.affected.push(active.clone());
    result.remaining = Some(remaining);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::Configuration;
    use crate::store::mem_backend::MemBackend;
    use chrono::{Duration, TimeZone, Utc};
    use std::rc::Rc;

    #[test]
    fn counts_down_with_the_clock() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = Rc::new(FixedClock::new(now));
        let store = CountdownStore::initialize(
            MemBackend::new(),
            Configuration::default_at(now),
            Rc::clone(&clock),
        );

        let first = run(&store).unwrap().remaining.unwrap();
        assert_eq!(first.days, 7);
        assert!(!first.is_expired);

        clock.advance(Duration::days(8));
        let later = run(&store).unwrap();
        assert!(later.remaining.unwrap().is_expired);
        assert_eq!(later.messages.len(), 1);
    }
}
