/// Windowed aggregation of parsed chat events.
///
/// Buckets events by calendar day inside the trailing 7-day window, tracks
/// when each sender was first seen within that window, and derives the daily
/// counts and power-user ranking in a single pass.
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::parser::Event;
use crate::report::{DailyStat, PowerUser, Report};
use crate::window::{DayKey, ReportWindow};

/// Minimum number of distinct active days for a power user.
pub const POWER_USER_MIN_DAYS: usize = 4;

/// Senders seen on one day (private).
#[derive(Default)]
struct DayBucket<'a> {
    active_users: HashSet<&'a str>,
    new_users: usize,
}

/// Window-scoped state for one sender (private).
struct UserWindowState {
    first_seen: DayKey,
    active_days: BTreeSet<DayKey>,
}

impl UserWindowState {
    fn new(first_seen: DayKey) -> Self {
        Self {
            first_seen,
            active_days: BTreeSet::new(),
        }
    }
}

/// Builds the report for the 7 days ending on the calendar day of `now`.
///
/// Events outside the window are ignored entirely, so first-seen means
/// first-seen within the window. An empty or fully out-of-window event list
/// yields an all-zero report.
pub fn aggregate(events: &[Event], now: &NaiveDateTime) -> Report {
    let window = ReportWindow::for_instant(now);

    let mut buckets: BTreeMap<DayKey, DayBucket> = BTreeMap::new();
    let mut users: HashMap<&str, UserWindowState> = HashMap::new();
    let mut outside = 0usize;

    for event in events {
        let day = DayKey::of(&event.timestamp);
        if !window.contains(day) {
            outside += 1;
            continue;
        }

        let sender = event.sender.as_str();
        let bucket = buckets.entry(day).or_default();
        bucket.active_users.insert(sender);

        let state = users
            .entry(sender)
            .or_insert_with(|| UserWindowState::new(day));
        // Input is usually chronological but not required to be.
        if day < state.first_seen {
            state.first_seen = day;
        }
        state.active_days.insert(day);
    }

    for state in users.values() {
        if let Some(bucket) = buckets.get_mut(&state.first_seen) {
            bucket.new_users += 1;
        }
    }

    if outside > 0 {
        tracing::debug!(
            outside,
            start = %window.start,
            end = %window.end,
            "Ignored events outside the report window"
        );
    }

    let daily_stats = window
        .days()
        .map(|date| match buckets.get(&date) {
            Some(bucket) => DailyStat {
                date,
                active_users: bucket.active_users.len(),
                new_users: bucket.new_users,
            },
            None => DailyStat {
                date,
                active_users: 0,
                new_users: 0,
            },
        })
        .collect();

    Report {
        window: window.into(),
        daily_stats,
        power_users: rank_power_users(&users),
    }
}

/// Senders active on at least `POWER_USER_MIN_DAYS` days, most active first,
/// ties by name (private).
fn rank_power_users(users: &HashMap<&str, UserWindowState>) -> Vec<PowerUser> {
    let mut power_users: Vec<PowerUser> = users
        .iter()
        .filter(|(_, state)| state.active_days.len() >= POWER_USER_MIN_DAYS)
        .map(|(user, state)| PowerUser {
            user: user.to_string(),
            active_days: state.active_days.len(),
        })
        .collect();

    power_users.sort_by(|a, b| {
        b.active_days
            .cmp(&a.active_days)
            .then_with(|| a.user.cmp(&b.user))
    });

    power_users
}
