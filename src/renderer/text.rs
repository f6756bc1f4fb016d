/// Plain-text report for terminal output.
///
/// Sender names may contain emoji or wide CJK characters, so columns are
/// padded by display width rather than by `char` count.
use unicode_width::UnicodeWidthStr;

use crate::renderer::md::activity_bar;
use crate::report::Report;
use crate::timefmt::weekday_short;

/// Maximum display width for a sender name column.
const NAME_WIDTH: usize = 28;

pub fn render(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Window {} .. {}\n\n",
        report.window.start, report.window.end
    ));
    output.push_str("date        day  active  new\n");

    let max_active = report
        .daily_stats
        .iter()
        .map(|d| d.active_users)
        .max()
        .unwrap_or(0);

    for day in &report.daily_stats {
        output.push_str(&format!(
            "{}  {}  {:>6}  {:>3}  {}\n",
            day.date,
            weekday_short(day.date),
            day.active_users,
            day.new_users,
            activity_bar(day.active_users, max_active)
        ));
    }

    output.push('\n');
    if report.power_users.is_empty() {
        output.push_str("No power users (active on 4+ days).\n");
        return output;
    }

    output.push_str("Power users:\n");
    for user in &report.power_users {
        output.push_str(&format!(
            "  {}  {} days\n",
            pad_to_width(&user.user, NAME_WIDTH),
            user.active_days
        ));
    }
    output
}

/// Truncates to `width` display columns with a trailing ellipsis, then pads.
pub(crate) fn pad_to_width(s: &str, width: usize) -> String {
    let display_width = UnicodeWidthStr::width(s);
    if display_width <= width {
        return format!("{}{}", s, " ".repeat(width - display_width));
    }

    let ellipsis = "…";
    let budget = width.saturating_sub(UnicodeWidthStr::width(ellipsis));
    let mut truncated = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push_str(ellipsis);
    used += UnicodeWidthStr::width(ellipsis);
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(used)))
}
