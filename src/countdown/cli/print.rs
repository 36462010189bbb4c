use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use countdown::api::{CmdMessage, ListedCountdown, MessageLevel};
use countdown::codec::{ShareAdvisory, ShareSize};
use countdown::config::{AppConfig, CONFIG_KEYS};
use countdown::model::SavedCountdown;
use countdown::remaining::TimeRemaining;
use countdown::store::{StorageUsage, UsageLevel};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DATE_WIDTH: usize = 18;
const ACTIVE_MARKER: &str = "●";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_countdowns(listed: &[ListedCountdown]) {
    if listed.is_empty() {
        return;
    }

    for entry in listed {
        let idx_str = format!("{}. ", entry.position);
        let left_prefix = if entry.is_active {
            format!("  {} ", ACTIVE_MARKER)
        } else {
            "    ".to_string()
        };

        let countdown = &entry.countdown;
        let target = format_target(countdown.settings.target_date);
        let time_ago = format_time_ago(countdown.updated_at);

        let fixed_width = left_prefix.width() + idx_str.width() + DATE_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name_display = truncate_to_width(&countdown.name, available);
        let padding = available.saturating_sub(name_display.width());

        let (idx_colored, name_colored) = if entry.is_active {
            (idx_str.yellow(), name_display.bold())
        } else {
            (idx_str.normal(), name_display.normal())
        };

        println!(
            "{}{}{}{}{:>width$}{}",
            left_prefix,
            idx_colored,
            name_colored,
            " ".repeat(padding),
            target,
            time_ago.dimmed(),
            width = DATE_WIDTH
        );
    }
}

pub(super) fn print_details(countdown: &SavedCountdown, remaining: Option<&TimeRemaining>) {
    let settings = &countdown.settings;
    let style = &settings.text_style;

    println!("{} {}", countdown.name.bold(), format!("({})", countdown.id).dimmed());
    println!("--------------------------------");
    println!("Target:    {}", format_target(settings.target_date));
    if let Some(remaining) = remaining {
        println!("Remaining: {}", remaining.to_string().cyan());
    }
    println!("Text:      {}", style.content);
    println!(
        "Style:     {} {}px {} at {}",
        style.font_family, style.font_size, style.color, style.position
    );
    println!(
        "Shadow:    {}",
        if style.text_shadow {
            format!("{} blur {}", style.shadow_color, style.shadow_blur)
        } else {
            "off".to_string()
        }
    );
    println!(
        "Overlay:   {}",
        if style.background_overlay {
            format!("{} at {:.0}%", style.overlay_color, style.overlay_opacity * 100.0)
        } else {
            "off".to_string()
        }
    );
    println!(
        "Photos:    {} ({} mode, every {}s)",
        settings.photos.len(),
        settings.photo_mode,
        settings.slideshow_interval
    );
    for (i, photo) in settings.photos.iter().enumerate() {
        let marker = if i == settings.current_photo_index { ACTIVE_MARKER } else { " " };
        println!(
            "  {} {}. {} {}",
            marker,
            i + 1,
            photo.id,
            format!("({} KB)", photo.data.len().div_ceil(1024)).dimmed()
        );
    }
}

pub(super) fn print_remaining(name: &str, remaining: &TimeRemaining) {
    if remaining.is_expired {
        return;
    }
    println!("{}: {}", name.bold(), remaining.to_string().cyan());
}

pub(super) fn print_share(size: &ShareSize, photo_count: usize, url: Option<&str>) {
    let note = match size.advisory {
        ShareAdvisory::Ok => "",
        ShareAdvisory::Warn => " - May not work in all browsers",
        ShareAdvisory::Refuse => " - Too large for URL sharing",
    };
    println!(
        "{}",
        format!(
            "Config size: {}KB ({} photo{}){}",
            size.kilobytes(),
            photo_count,
            if photo_count == 1 { "" } else { "s" },
            note
        )
        .dimmed()
    );
    if let Some(url) = url {
        println!("{}", url);
    }
}

pub(super) fn print_usage(usage: &StorageUsage) {
    let line = format!(
        "Storage: {:.2} MB / ~{:.0} MB ({:.1}%)",
        usage.used_mb(),
        usage.limit_mb(),
        usage.percent_used
    );
    match usage.level() {
        UsageLevel::Normal => println!("{}", line),
        UsageLevel::Elevated => println!("{}", line.yellow()),
        UsageLevel::Critical => println!("{}", line.red()),
    }
}

pub(super) fn print_config(config: &AppConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn format_target(target: DateTime<Utc>) -> String {
    target
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 20), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each.
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now() - chrono::Duration::hours(3));
        assert_eq!(s.len(), TIME_WIDTH.max(s.trim().len()));
        assert!(s.trim().ends_with("ago"));
    }
}
