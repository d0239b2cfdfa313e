use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Priority, Task};

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// Percentage of tasks in `done`, rounded
    pub completion_rate: u32,
}

impl BoardStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |column: &str| tasks.iter().filter(|t| t.column_id == column).count();

        let total = tasks.len();
        let done = count("done");
        let completion_rate = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            total,
            todo: count("todo"),
            in_progress: count("in-progress"),
            done,
            completion_rate,
        }
    }
}

/// Tasks created on one day, split by priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTrend {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub name: String,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Seven day buckets ending on `today`, oldest first
pub fn weekly_trends(tasks: &[Task], today: NaiveDate) -> Vec<DayTrend> {
    let mut trends: Vec<DayTrend> = (0..7)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            DayTrend {
                date,
                name: date.format("%a").to_string(),
                high: 0,
                medium: 0,
                low: 0,
            }
        })
        .collect();

    for task in tasks {
        let created = task.created_at.date_naive();
        if let Some(bucket) = trends.iter_mut().find(|d| d.date == created) {
            match task.priority {
                Priority::High => bucket.high += 1,
                Priority::Medium => bucket.medium += 1,
                Priority::Low => bucket.low += 1,
            }
        }
    }

    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;
    use chrono::{TimeZone, Utc};

    fn task_on(day: u32, priority: Priority, column: &str) -> Task {
        NewTask::new("t", column)
            .with_priority(priority)
            .with_created_at(Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap())
            .into_task(format!("t{}", day))
    }

    #[test]
    fn test_stats_on_empty_board() {
        assert_eq!(BoardStats::from_tasks(&[]), BoardStats::default());
    }

    #[test]
    fn test_stats_counts_and_completion() {
        let tasks = vec![
            task_on(1, Priority::High, "todo"),
            task_on(2, Priority::Low, "in-progress"),
            task_on(3, Priority::Low, "done"),
        ];

        let stats = BoardStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_weekly_trends_buckets_by_creation_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let tasks = vec![
            task_on(10, Priority::High, "todo"),
            task_on(10, Priority::Medium, "todo"),
            task_on(4, Priority::Low, "done"),
            // Outside the window
            task_on(3, Priority::High, "done"),
        ];

        let trends = weekly_trends(&tasks, today);

        assert_eq!(trends.len(), 7);
        assert_eq!(trends[0].date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(trends[0].low, 1);
        assert_eq!(trends[6].date, today);
        assert_eq!(trends[6].name, "Tue");
        assert_eq!((trends[6].high, trends[6].medium, trends[6].low), (1, 1, 0));
        assert_eq!(trends.iter().map(|d| d.high).sum::<usize>(), 1);
    }
}
