use crate::commands::helpers::{resolve, Selector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

/// Make the selected countdown active. Selectors must resolve, so the CLI can
/// never leave the active pointer dangling.
pub fn run<B: StorageBackend>(
    store: &mut CountdownStore<B>,
    selector: &Selector,
) -> Result<CmdResult> {
    let id = resolve(store, selector)?;
    store.switch_active(&id);

    let mut result = CmdResult::default();
    if let Some(active) = store.active() {
        result.add_message(CmdMessage::success(format!("Switched to {}", active.name)));
        result.affected.push(active.clone());
    }
    Ok(result)
}
