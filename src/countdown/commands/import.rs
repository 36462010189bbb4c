use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};
use crate::url::{Location, SharedLink, UrlBridge};
use chrono::Local;
use tracing::info;

/// Check the current fragment and import an external shared configuration.
///
/// The import creates a countdown from defaults, then replaces the new active
/// countdown's configuration with the shared one, then clears the fragment.
pub fn run<B: StorageBackend, L: Location>(
    store: &mut CountdownStore<B>,
    bridge: &mut UrlBridge<L>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match bridge.check() {
        SharedLink::None => {
            result.add_message(CmdMessage::info("No shared countdown in this link."));
        }
        SharedLink::SelfGenerated => {
            info!("ignoring own share link");
            result.add_message(CmdMessage::info(
                "This is your own share link, nothing to import.",
            ));
        }
        SharedLink::External(config) => {
            let date = store.clock().now().with_timezone(&Local);
            let name = format!("Shared - {}", date.format("%-m/%-d/%Y"));
            let id = store.create(&name);
            store.update_active(config);
            bridge.consume();
            info!(id = %id, "imported shared countdown");

            if let Some(imported) = store.get(&id) {
                result.add_message(CmdMessage::success(format!(
                    "Imported shared countdown: {}",
                    imported.name
                )));
                result.affected.push(imported.clone());
            }
        }
    }
    Ok(result)
}
