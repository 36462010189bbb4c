use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use countdown::api::ConfigEdit;
use countdown::model::{PhotoMode, TextPosition};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2025-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "countdown", bin_name = "countdown", version = get_version())]
#[command(about = "Countdowns you can keep locally and share as a single link", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $COUNTDOWN_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List countdowns
    #[command(alias = "ls")]
    List,

    /// Show the active countdown in full
    Show,

    /// Create a countdown and make it active
    #[command(alias = "n")]
    Create {
        /// Name of the countdown
        name: String,
    },

    /// Delete a countdown
    #[command(alias = "rm")]
    Delete {
        /// List position, id, or id prefix
        selector: String,
    },

    /// Rename a countdown
    Rename {
        /// List position, id, or id prefix
        selector: String,
        /// New name
        name: String,
    },

    /// Make a countdown active
    #[command(alias = "use")]
    Switch {
        /// List position, id, or id prefix
        selector: String,
    },

    /// Copy a countdown and make the copy active
    #[command(alias = "dup")]
    Duplicate {
        /// List position, id, or id prefix
        selector: String,
    },

    /// Change the active countdown
    Set(SetArgs),

    /// Manage background photos of the active countdown
    Photo {
        #[command(subcommand)]
        action: PhotoCommands,
    },

    /// Print a share link for the active countdown
    Share,

    /// Open a share link, importing it if it came from someone else
    Open {
        /// Full share URL (or just the #state=... part)
        url: String,
    },

    /// Show storage usage
    Usage,

    /// Show the time left on the active countdown
    Status,

    /// Delete every countdown and start over
    Reset {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (base-url, storage-limit, storage-quota, default-name, default-lead-days)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommands {
    /// Add an image file
    Add {
        /// Image file (jpg, png, gif, webp, svg)
        file: PathBuf,
        /// Smaller preview image
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },

    /// Remove a photo by position or id
    #[command(alias = "remove")]
    Rm {
        photo: String,
    },

    /// Show the photo at a position
    Select {
        position: usize,
    },
}

#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Target date: 2025-12-24, "2025-12-24 18:00" (local time) or RFC 3339
    #[arg(long, value_parser = parse_target_date)]
    pub date: Option<DateTime<Utc>>,

    /// Overlay text
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub font: Option<String>,

    /// Font size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Text color, e.g. #ffffff
    #[arg(long)]
    pub color: Option<String>,

    /// top-left, top-center, top-right, center, bottom-left, bottom-center, bottom-right
    #[arg(long)]
    pub position: Option<TextPosition>,

    #[arg(long)]
    pub shadow: Option<bool>,

    #[arg(long)]
    pub shadow_color: Option<String>,

    #[arg(long)]
    pub shadow_blur: Option<u32>,

    #[arg(long)]
    pub overlay: Option<bool>,

    #[arg(long)]
    pub overlay_color: Option<String>,

    /// Overlay opacity between 0 and 1
    #[arg(long)]
    pub overlay_opacity: Option<f64>,

    /// slideshow, random or manual
    #[arg(long)]
    pub mode: Option<PhotoMode>,

    /// Seconds between slideshow photos
    #[arg(long)]
    pub interval: Option<u32>,
}

impl From<SetArgs> for ConfigEdit {
    fn from(args: SetArgs) -> Self {
        ConfigEdit {
            target_date: args.date,
            text: args.text,
            font_family: args.font,
            font_size: args.size,
            color: args.color,
            position: args.position,
            text_shadow: args.shadow,
            shadow_color: args.shadow_color,
            shadow_blur: args.shadow_blur,
            background_overlay: args.overlay,
            overlay_color: args.overlay_color,
            overlay_opacity: args.overlay_opacity,
            photo_mode: args.mode,
            slideshow_interval: args.interval,
        }
    }
}

/// Dates without an offset are read as local time.
pub fn parse_target_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| format!("invalid date \"{}\" (try 2025-12-24 or \"2025-12-24 18:00\")", s))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{} does not exist in the local time zone", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::try_parse_from(["countdown"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["countdown", "ls", "--data-dir", "/tmp/cd", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cd")));
        assert!(cli.verbose);
    }

    #[test]
    fn set_args_become_an_edit() {
        let cli = Cli::try_parse_from([
            "countdown",
            "set",
            "--date",
            "2025-12-24T18:00:00Z",
            "--position",
            "bottom-right",
            "--mode",
            "random",
            "--shadow",
            "false",
            "--interval",
            "9",
        ])
        .unwrap();
        let Some(Commands::Set(args)) = cli.command else {
            panic!("expected set");
        };
        let edit = ConfigEdit::from(args);
        assert_eq!(edit.target_date.unwrap().hour(), 18);
        assert_eq!(edit.position, Some(TextPosition::BottomRight));
        assert_eq!(edit.photo_mode, Some(PhotoMode::Random));
        assert_eq!(edit.text_shadow, Some(false));
        assert_eq!(edit.slideshow_interval, Some(9));
        assert!(edit.text.is_none());
    }

    #[test]
    fn rejects_unknown_enum_values() {
        assert!(Cli::try_parse_from(["countdown", "set", "--mode", "shuffle"]).is_err());
        assert!(Cli::try_parse_from(["countdown", "set", "--position", "middle"]).is_err());
    }

    #[test]
    fn photo_subcommands() {
        let cli = Cli::try_parse_from(["countdown", "photo", "select", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Photo {
                action: PhotoCommands::Select { position: 2 }
            })
        ));
    }

    #[test]
    fn target_date_formats() {
        assert!(parse_target_date("2025-12-24").is_ok());
        assert!(parse_target_date("2025-12-24 18:30").is_ok());
        assert_eq!(
            parse_target_date("2025-12-24T18:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 24, 16, 30, 0).unwrap()
        );
        assert!(parse_target_date("next tuesday").is_err());
    }
}
