use crate::commands::{CmdMessage, CmdResult, CountdownPaths};
use crate::config::AppConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CountdownPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = AppConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = AppConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = AppConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_then_show() {
        let dir = tempdir().unwrap();
        let paths = CountdownPaths {
            data_dir: dir.path().to_path_buf(),
        };

        let set = run(
            &paths,
            ConfigAction::Set("default-lead-days".into(), "30".into()),
        )
        .unwrap();
        assert!(set.has_level(MessageLevel::Success));

        let shown = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config.unwrap().default_lead_days, 30);

        let key = run(&paths, ConfigAction::ShowKey("default-lead-days".into())).unwrap();
        assert_eq!(key.messages[0].content, "30");
    }

    #[test]
    fn bad_key_reports_error_without_saving() {
        let dir = tempdir().unwrap();
        let paths = CountdownPaths {
            data_dir: dir.path().to_path_buf(),
        };
        let result = run(&paths, ConfigAction::Set("nope".into(), "1".into())).unwrap();
        assert!(result.has_level(MessageLevel::Error));
        assert!(!dir.path().join("config.json").exists());
    }
}
