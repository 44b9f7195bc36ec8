#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use homekeep::libs::config::ScheduleConfig;
    use homekeep::libs::dates::at_midday;
    use homekeep::libs::error::ScheduleError;
    use homekeep::libs::schedule::{complete, lead_days, next_due_date, reschedule, schedule_initial_due_date, seasonal_due_date};
    use homekeep::libs::task::{Category, Priority, Season, Task, TaskTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        at_midday(date(y, m, d))
    }

    fn task(frequency: i64, due: NaiveDateTime) -> Task {
        TaskTemplate::new("Replace HVAC filter", Category::Hvac, frequency, 25.0, Priority::Medium).into_task(1, due)
    }

    #[test]
    fn test_completion_advances_from_due_date_not_completion_date() {
        let original = task(90, noon(2024, 1, 1));
        let completed_at = date(2024, 1, 20).and_hms_opt(18, 30, 0).unwrap();

        let updated = complete(&original, completed_at).unwrap();

        // 2024 is a leap year: Jan 1 + 90 days is Mar 31.
        assert_eq!(updated.due_date, noon(2024, 3, 31));
        assert_ne!(updated.due_date.date(), date(2024, 4, 19));
        assert_eq!(updated.last_completed, Some(completed_at));
        assert!(!updated.is_completed);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, original.title);
    }

    #[test]
    fn test_completion_late_by_a_month_keeps_cadence() {
        let original = task(30, noon(2023, 1, 10));
        let updated = complete(&original, noon(2023, 2, 25)).unwrap();
        assert_eq!(updated.due_date, noon(2023, 2, 9));
    }

    #[test]
    fn test_completion_rejects_non_positive_frequency() {
        for frequency in [0, -7] {
            let original = task(frequency, noon(2024, 5, 1));
            match complete(&original, noon(2024, 5, 2)) {
                Err(ScheduleError::InvalidFrequency { frequency: f }) => assert_eq!(f, frequency),
                other => panic!("expected InvalidFrequency, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_next_due_date_is_pinned_to_midday() {
        let late_evening = date(2024, 6, 1).and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(next_due_date(late_evening, 7).unwrap(), noon(2024, 6, 8));
    }

    #[test]
    fn test_seasonal_due_date_on_or_before_anchor_uses_current_year() {
        assert_eq!(seasonal_due_date(Season::Fall, date(2024, 1, 1)).unwrap(), date(2024, 9, 15));
        assert_eq!(seasonal_due_date(Season::Fall, date(2024, 9, 14)).unwrap(), date(2024, 9, 15));
        assert_eq!(seasonal_due_date(Season::Fall, date(2024, 9, 15)).unwrap(), date(2024, 9, 15));
    }

    #[test]
    fn test_seasonal_due_date_after_anchor_rolls_to_next_year() {
        assert_eq!(seasonal_due_date(Season::Fall, date(2024, 9, 16)).unwrap(), date(2025, 9, 15));
        assert_eq!(seasonal_due_date(Season::Spring, date(2024, 10, 1)).unwrap(), date(2025, 3, 15));
        assert_eq!(seasonal_due_date(Season::Winter, date(2024, 12, 31)).unwrap(), date(2025, 12, 15));
    }

    #[test]
    fn test_seasonal_due_date_canonical_months() {
        let today = date(2024, 1, 1);
        assert_eq!(seasonal_due_date(Season::Spring, today).unwrap(), date(2024, 3, 15));
        assert_eq!(seasonal_due_date(Season::Summer, today).unwrap(), date(2024, 6, 15));
        assert_eq!(seasonal_due_date(Season::Winter, today).unwrap(), date(2024, 12, 15));
    }

    #[test]
    fn test_lead_days_by_priority_and_frequency() {
        let config = ScheduleConfig::default();
        assert_eq!(lead_days(Priority::High, 365, &config), 7);
        assert_eq!(lead_days(Priority::Medium, 90, &config), 14);
        assert_eq!(lead_days(Priority::Low, 30, &config), 14);
        assert_eq!(lead_days(Priority::Medium, 91, &config), 30);
        assert_eq!(lead_days(Priority::Low, 365, &config), 30);
    }

    #[test]
    fn test_initial_due_date_uses_lead_time() {
        let config = ScheduleConfig::default();
        let today = date(2024, 3, 1);
        let high = TaskTemplate::new("Sweep chimney", Category::Safety, 365, 250.0, Priority::High);
        let yearly = TaskTemplate::new("Flush water heater", Category::Plumbing, 365, 0.0, Priority::Medium);
        assert_eq!(schedule_initial_due_date(&high, today, &config).unwrap(), noon(2024, 3, 8));
        assert_eq!(schedule_initial_due_date(&yearly, today, &config).unwrap(), noon(2024, 3, 31));
    }

    #[test]
    fn test_initial_due_date_seasonal_hint_overrides_lead_time() {
        let config = ScheduleConfig::default();
        let gutters = TaskTemplate::new("Clean gutters", Category::Exterior, 180, 150.0, Priority::High).in_season(Season::Fall);
        assert_eq!(schedule_initial_due_date(&gutters, date(2024, 10, 2), &config).unwrap(), noon(2025, 9, 15));
    }

    #[test]
    fn test_initial_due_date_rejects_invalid_frequency() {
        let config = ScheduleConfig::default();
        let broken = TaskTemplate::new("Broken", Category::General, 0, 0.0, Priority::Low);
        assert!(matches!(
            schedule_initial_due_date(&broken, date(2024, 1, 1), &config),
            Err(ScheduleError::InvalidFrequency { frequency: 0 })
        ));
    }

    #[test]
    fn test_reschedule_parses_and_normalizes() {
        let original = task(90, noon(2024, 1, 1));
        let moved = reschedule(&original, "2024-02-10T08:15:00", date(2024, 1, 1)).unwrap();
        assert_eq!(moved.task.due_date, noon(2024, 2, 10));
        assert!(!moved.backdated);
        assert_eq!(moved.task.frequency, original.frequency);
    }

    #[test]
    fn test_reschedule_into_past_is_flagged() {
        let original = task(90, noon(2024, 1, 1));
        let moved = reschedule(&original, "2023-12-01", date(2024, 1, 5)).unwrap();
        assert!(moved.backdated);
        assert_eq!(moved.task.due_date, noon(2023, 12, 1));
    }

    #[test]
    fn test_reschedule_rejects_garbage() {
        let original = task(90, noon(2024, 1, 1));
        assert!(matches!(reschedule(&original, "next tuesday", date(2024, 1, 1)), Err(ScheduleError::InvalidDate(_))));
        assert!(matches!(reschedule(&original, "", date(2024, 1, 1)), Err(ScheduleError::InvalidDate(_))));
    }

    #[test]
    fn test_task_state_and_annual_cost() {
        let t = task(90, noon(2024, 1, 1));
        assert!(t.is_overdue(noon(2024, 1, 2)));
        assert!(!t.is_overdue(noon(2023, 12, 31)));
        assert!((t.annual_cost() - 25.0 * 365.0 / 90.0).abs() < 1e-9);
        assert_eq!(task(0, noon(2024, 1, 1)).annual_cost(), 0.0);
    }
}
