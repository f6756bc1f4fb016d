use crate::report::*;
use crate::timefmt::{day_label, weekday_short};
use anyhow::Result;

/// Width of the activity bar for the busiest day.
const BAR_WIDTH: usize = 20;

/// Render a report to Markdown
pub fn render(report: &Report) -> Result<String> {
    let mut output = String::new();

    // 1. Title and window
    render_header(&mut output, report);

    // 2. Summary
    render_summary(&mut output, report);

    // 3. Day by day
    render_daily(&mut output, &report.daily_stats);

    // 4. Power users
    render_power_users(&mut output, &report.power_users);

    Ok(output)
}

fn render_header(output: &mut String, report: &Report) {
    output.push_str("# 💬 Chat activity: last 7 days\n");
    output.push_str(&format!(
        "*{} to {} ({} to {})*\n\n",
        report.window.start,
        report.window.end,
        day_label(report.window.start),
        day_label(report.window.end)
    ));
}

fn render_summary(output: &mut String, report: &Report) {
    output.push_str("### 📊 Summary\n");

    if report.is_quiet() {
        output.push_str("- 😴 Nobody posted in this window.\n\n");
        return;
    }

    output.push_str(&format!(
        "- 👥 **Active members:** {}\n",
        report.total_new_users()
    ));

    if let Some(peak) = report.peak_day() {
        output.push_str(&format!(
            "- 🔥 **Busiest day:** {} ({} active)\n",
            day_label(peak.date),
            peak.active_users
        ));
    }

    output.push_str(&format!(
        "- ⭐ **Power users:** {}\n\n",
        report.power_users.len()
    ));
}

fn render_daily(output: &mut String, daily_stats: &[DailyStat]) {
    output.push_str("### 📅 Day by day\n");
    output.push_str("| Date | Day | Active | New | |\n");
    output.push_str("| ---- | --- | ------ | --- | --- |\n");

    let max_active = daily_stats
        .iter()
        .map(|d| d.active_users)
        .max()
        .unwrap_or(0);

    for day in daily_stats {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            day.date,
            weekday_short(day.date),
            day.active_users,
            day.new_users,
            activity_bar(day.active_users, max_active)
        ));
    }
    output.push('\n');
}

fn render_power_users(output: &mut String, power_users: &[PowerUser]) {
    output.push_str("### ⭐ Power users\n");

    if power_users.is_empty() {
        output.push_str("*Nobody was active on 4 or more days.*\n");
        return;
    }

    output.push_str("| # | Member | Active days |\n");
    output.push_str("| - | ------ | ----------- |\n");
    for (rank, user) in power_users.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} / 7 |\n",
            rank + 1,
            escape_cell(&user.user),
            user.active_days
        ));
    }
}

/// Bar scaled against the busiest day, at least one block for any activity
pub(crate) fn activity_bar(value: usize, max: usize) -> String {
    if value == 0 || max == 0 {
        return String::new();
    }
    let len = ((value * BAR_WIDTH) / max).max(1);
    "█".repeat(len)
}

/// Sender names are free text; keep them from breaking the table
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
