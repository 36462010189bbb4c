use crate::commands::helpers::{resolve, Selector};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CountdownError, Result};
use crate::store::{CountdownStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut CountdownStore<B>,
    selector: &Selector,
    new_name: &str,
) -> Result<CmdResult> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(CountdownError::Api("Name cannot be empty".into()));
    }

    let id = resolve(store, selector)?;
    let old_name = store.get(&id).map(|c| c.name.clone()).unwrap_or_default();
    store.rename(&id, new_name);

    let mut result = CmdResult::default();
    if let Some(renamed) = store.get(&id) {
        result.affected.push(renamed.clone());
    }
    result.add_message(CmdMessage::success(format!(
        "Renamed \"{}\" to \"{}\"",
        old_name, new_name
    )));
    Ok(result)
}
