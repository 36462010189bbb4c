use crate::commands::{CmdMessage, CmdResult, ListedCountdown};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &CountdownStore<B>) -> Result<CmdResult> {
    let active = store.active_id();
    let listed: Vec<ListedCountdown> = store
        .countdowns()
        .iter()
        .enumerate()
        .map(|(i, c)| ListedCountdown {
            position: i + 1,
            is_active: Some(&c.id) == active,
            countdown: c.clone(),
        })
        .collect();

    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No countdowns yet."));
    } else if store.active().is_none() {
        result.add_message(CmdMessage::warning(
            "No active countdown. Use `switch` to pick one.",
        ));
    }
    Ok(result)
}
