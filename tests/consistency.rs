#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use homekeep::libs::config::ScheduleConfig;
    use homekeep::libs::dates::at_midday;
    use homekeep::libs::schedule::ensure_date_consistency;
    use homekeep::libs::scheduler::TaskScheduler;
    use homekeep::libs::store::MemoryStore;
    use homekeep::libs::task::Priority;
    use serde_json::{json, Value};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn records() -> Vec<Value> {
        vec![
            json!({"id": 1, "dueDate": "2024-03-01T12:00:00", "nextDue": "2024-02-01T12:00:00"}),
            json!({"id": 2, "nextDue": "2024-05-10T12:00:00"}),
            json!({"id": 3, "dueDate": "2024-06-01T12:00:00", "nextDue": ""}),
            json!({"id": 4, "dueDate": "2024-07-01T12:00:00"}),
            json!({"id": 5, "dueDate": "2024-08-01T12:00:00", "nextDue": "2024-08-01T12:00:00"}),
        ]
    }

    #[test]
    fn test_primary_date_wins_when_both_differ() {
        let mut records = records();
        ensure_date_consistency(&mut records);
        assert_eq!(records[0]["dueDate"], "2024-03-01T12:00:00");
        assert_eq!(records[0]["nextDue"], "2024-03-01T12:00:00");
    }

    #[test]
    fn test_missing_field_is_filled_from_the_other() {
        let mut records = records();
        ensure_date_consistency(&mut records);
        assert_eq!(records[1]["dueDate"], "2024-05-10T12:00:00");
        assert_eq!(records[2]["nextDue"], "2024-06-01T12:00:00");
    }

    #[test]
    fn test_agreeing_and_unpaired_records_are_untouched() {
        let mut repaired = records();
        let count = ensure_date_consistency(&mut repaired);
        assert_eq!(count, 3);
        assert_eq!(repaired[3], records()[3]);
        assert_eq!(repaired[4], records()[4]);
    }

    #[test]
    fn test_consistency_is_idempotent() {
        let mut once = records();
        ensure_date_consistency(&mut once);
        let mut twice = once.clone();
        assert_eq!(ensure_date_consistency(&mut twice), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_load_repairs_and_resaves_legacy_state() {
        let legacy = json!({
            "homeData": null,
            "tasks": [
                {"id": 1, "title": "Replace HVAC filter", "category": "hvac", "frequency": 90, "cost": 25,
                 "priority": "normal", "dueDate": "2024-03-01T12:00:00", "nextDue": "2024-02-01T12:00:00"},
                {"id": 2, "title": "Clean gutters", "category": "exterior", "frequency": 180, "cost": 150,
                 "priority": "High", "nextDue": "2024-05-10T12:00:00"}
            ],
            "version": "1.0"
        });

        let (scheduler, report) =
            TaskScheduler::open(MemoryStore::with_record(legacy.to_string()), ScheduleConfig::default(), today()).unwrap();

        assert_eq!(report.date_repairs, 2);
        assert_eq!(report.normalized, 2);
        assert!(report.saved);
        assert_eq!(scheduler.task(1).unwrap().priority, Priority::Medium);
        assert_eq!(scheduler.task(2).unwrap().priority, Priority::High);
        assert_eq!(
            scheduler.task(1).unwrap().due_date,
            at_midday(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            scheduler.task(2).unwrap().due_date,
            at_midday(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
        );

        let saved: Value = serde_json::from_str(scheduler.store().record().unwrap()).unwrap();
        assert_eq!(saved["version"], "2.0");
        assert_eq!(saved["tasks"][0]["priority"], "medium");
        assert!(saved["tasks"][0].get("nextDue").is_none());

        // The re-saved record needs no further repair.
        let (_, second) =
            TaskScheduler::open(MemoryStore::with_record(saved.to_string()), ScheduleConfig::default(), today()).unwrap();
        assert_eq!(second.date_repairs, 0);
        assert_eq!(second.normalized, 0);
        assert!(!second.saved);
    }

    #[test]
    fn test_known_categories_are_not_counted_as_unknown() {
        let record = json!({
            "tasks": [
                {"id": 1, "title": "Bleed radiators", "category": " HVAC ", "frequency": 365,
                 "priority": "low", "dueDate": "2024-10-01"},
                {"id": 2, "title": "Wipe baseboards", "category": "", "frequency": 90,
                 "priority": "low", "dueDate": "2024-02-01"}
            ],
            "version": "2.0"
        });
        let (scheduler, report) =
            TaskScheduler::open(MemoryStore::with_record(record.to_string()), ScheduleConfig::default(), today()).unwrap();
        assert_eq!(report.unknown_categories, 0);
        assert_eq!(scheduler.task(1).unwrap().category.as_str(), "hvac");
    }

    #[test]
    fn test_load_accepts_unknown_category() {
        let record = json!({
            "tasks": [{"id": 1, "title": "Polish doorknobs", "category": "brass", "frequency": 30,
                       "priority": "low", "dueDate": "2024-02-01"}],
            "version": "2.0"
        });
        let (scheduler, report) =
            TaskScheduler::open(MemoryStore::with_record(record.to_string()), ScheduleConfig::default(), today()).unwrap();
        assert_eq!(scheduler.task(1).unwrap().category.as_str(), "general");
        assert_eq!(scheduler.task(1).unwrap().cost, 0.0);
        assert_eq!(report.unknown_categories, 1);
        // Reading alone does not rewrite the stored label.
        assert!(!report.saved);
        assert!(scheduler.store().record().unwrap().contains("brass"));
    }
}
