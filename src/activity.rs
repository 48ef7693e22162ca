use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::MoosementApi;
use crate::models::ActivityRecord;

/// Streak length at which the progress bar is full.
pub const STREAK_BAR_UNITS: u32 = 5;
const PERCENT_PER_UNIT: u32 = 20;

/// Width of the streak progress bar, in percent.
pub fn streak_progress_percent(streak: u32) -> u32 {
    streak.min(STREAK_BAR_UNITS) * PERCENT_PER_UNIT
}

/// A user's completed-challenge history, shown as a calendar with streaks.
pub struct ActivityCalendar {
    api: Arc<dyn MoosementApi>,
    user_id: String,
    records: Vec<ActivityRecord>,
    selected: Option<NaiveDate>,
}

impl ActivityCalendar {
    pub fn new(api: Arc<dyn MoosementApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            records: Vec::new(),
            selected: None,
        }
    }

    /// Fetch the history. Failures are logged and leave the calendar empty.
    pub async fn load(&mut self) -> usize {
        match self.api.fetch_activity(&self.user_id).await {
            Ok(records) => {
                tracing::info!("Loaded {} activity records", records.len());
                self.records = records;
            }
            Err(e) => {
                tracing::error!("Failed to fetch activity for {}: {}", self.user_id, e);
                self.records.clear();
            }
        }
        self.records.len()
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Dates that get a dot on the calendar.
    pub fn marked_dates(&self) -> BTreeSet<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Select a date and return the activity logged on it, if any.
    pub fn select(&mut self, date: NaiveDate) -> Option<&ActivityRecord> {
        self.selected = Some(date);
        self.selected_activity()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn selected_activity(&self) -> Option<&ActivityRecord> {
        let date = self.selected?;
        self.records.iter().find(|r| r.date == date)
    }

    /// Streak reported on the most recent record.
    pub fn current_streak(&self) -> u32 {
        self.records
            .iter()
            .max_by_key(|r| r.date)
            .map(|r| r.streak)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeApi, FakeState};

    fn record(date: &str, activity: &str, streak: u32) -> ActivityRecord {
        ActivityRecord {
            id: format!("{}-{}", date, activity),
            date: date.parse().unwrap(),
            activity: activity.to_string(),
            icon: "walking".to_string(),
            streak,
        }
    }

    fn calendar(records: Vec<ActivityRecord>) -> (Arc<FakeApi>, ActivityCalendar) {
        let api = Arc::new(FakeApi::new(FakeState {
            activity: records,
            ..Default::default()
        }));
        let calendar = ActivityCalendar::new(api.clone(), "67fc133a9de9b74b88dfbee8");
        (api, calendar)
    }

    #[test]
    fn progress_is_twenty_percent_per_day_capped_at_full() {
        assert_eq!(streak_progress_percent(0), 0);
        assert_eq!(streak_progress_percent(1), 20);
        assert_eq!(streak_progress_percent(3), 60);
        assert_eq!(streak_progress_percent(5), 100);
        assert_eq!(streak_progress_percent(12), 100);
    }

    #[tokio::test]
    async fn load_marks_each_activity_date_once() {
        let (api, mut calendar) = calendar(vec![
            record("2025-02-01", "Morning Walk", 1),
            record("2025-02-02", "Desk Stretches", 2),
            record("2025-02-02", "Water Break", 2),
        ]);

        assert_eq!(calendar.load().await, 3);
        let marked: Vec<String> = calendar
            .marked_dates()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(marked, vec!["2025-02-01", "2025-02-02"]);
        assert_eq!(
            api.calls(),
            vec!["GET /user/67fc133a9de9b74b88dfbee8/challenges"]
        );
    }

    #[tokio::test]
    async fn select_returns_first_activity_for_date() {
        let (_, mut calendar) = calendar(vec![
            record("2025-02-02", "Desk Stretches", 2),
            record("2025-02-02", "Water Break", 2),
        ]);
        calendar.load().await;

        let date: NaiveDate = "2025-02-02".parse().unwrap();
        assert_eq!(calendar.select(date).unwrap().activity, "Desk Stretches");
        assert_eq!(calendar.selected_date(), Some(date));

        let empty: NaiveDate = "2025-03-01".parse().unwrap();
        assert!(calendar.select(empty).is_none());
    }

    #[tokio::test]
    async fn current_streak_comes_from_latest_date() {
        let (_, mut calendar) = calendar(vec![
            record("2025-02-03", "Lunch Walk", 3),
            record("2025-01-20", "Morning Walk", 7),
        ]);
        calendar.load().await;
        assert_eq!(calendar.current_streak(), 3);
    }

    #[tokio::test]
    async fn failed_load_leaves_calendar_empty() {
        let (api, mut calendar) = calendar(vec![record("2025-02-01", "Morning Walk", 1)]);
        api.with(|s| s.fail_reads = true);

        assert_eq!(calendar.load().await, 0);
        assert!(calendar.marked_dates().is_empty());
        assert_eq!(calendar.current_streak(), 0);
    }
}
