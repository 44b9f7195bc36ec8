#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use homekeep::libs::backup::{export_backup, import_backup, write_tasks_csv, ExportDocument};
    use homekeep::libs::config::ScheduleConfig;
    use homekeep::libs::error::ScheduleError;
    use homekeep::libs::scheduler::TaskScheduler;
    use homekeep::libs::state::{HomeData, HomeFeatures};
    use homekeep::libs::store::MemoryStore;
    use homekeep::libs::task::Priority;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;
    use test_context::{test_context, TestContext};

    struct BackupContext {
        source: TaskScheduler<MemoryStore>,
        today: NaiveDate,
        exported_at: NaiveDateTime,
    }

    impl TestContext for BackupContext {
        fn setup() -> Self {
            let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            let (mut source, _) = TaskScheduler::open(MemoryStore::new(), ScheduleConfig::default(), today).unwrap();
            let home = HomeData {
                address: "12 Elm St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zipcode: "62701".to_string(),
                property_type: "single-family".to_string(),
                year_built: 1970,
                sqft: 2100,
                features: HomeFeatures {
                    pool: true,
                    deck: true,
                    ..HomeFeatures::default()
                },
            };
            source.setup_home(home, today).unwrap();
            let completed = today.and_hms_milli_opt(9, 41, 7, 250).unwrap();
            source.complete_task(1, Some(completed)).unwrap();

            BackupContext {
                source,
                today,
                exported_at: today.and_hms_opt(10, 0, 0).unwrap(),
            }
        }
    }

    fn empty_scheduler(today: NaiveDate) -> TaskScheduler<MemoryStore> {
        TaskScheduler::open(MemoryStore::new(), ScheduleConfig::default(), today).unwrap().0
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_export_import_round_trip(ctx: &mut BackupContext) {
        let json = export_backup(&ctx.source, ctx.exported_at).to_json().unwrap();
        let mut target = empty_scheduler(ctx.today);

        let summary = import_backup(&mut target, &json, ctx.today).unwrap();

        assert_eq!(summary.tasks, ctx.source.get_tasks().len());
        assert_eq!(summary.date_repairs, 0);
        assert_eq!(target.get_tasks(), ctx.source.get_tasks());
        assert_eq!(target.home_data(), ctx.source.home_data());

        // Sub-second completion times survive the trip.
        let again = export_backup(&target, ctx.exported_at);
        assert_eq!(again, export_backup(&ctx.source, ctx.exported_at));
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_export_document_layout(ctx: &mut BackupContext) {
        let json = export_backup(&ctx.source, ctx.exported_at).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "2.0");
        assert_eq!(value["exportDate"], "2024-03-01T10:00:00");
        assert_eq!(value["homeData"]["yearBuilt"], 1970);
        assert_eq!(value["homeData"]["features"]["pool"], true);
        assert!(value["tasks"][0]["dueDate"].is_string());
        assert!(value["tasks"][0].get("nextDue").is_none());

        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.export_date, ctx.exported_at);
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_import_missing_state_is_rejected(ctx: &mut BackupContext) {
        let mut value: Value = serde_json::from_str(&export_backup(&ctx.source, ctx.exported_at).to_json().unwrap()).unwrap();
        value["homeData"].as_object_mut().unwrap().remove("state");

        let mut target = empty_scheduler(ctx.today);
        let calls = Rc::new(RefCell::new(0));
        let c = Rc::clone(&calls);
        target.on_tasks_changed(move |_| *c.borrow_mut() += 1);

        match import_backup(&mut target, &value.to_string(), ctx.today) {
            Err(ScheduleError::ValidationFailure(errors)) => {
                assert_eq!(errors.fields(), vec!["homeData.state"]);
            }
            other => panic!("expected ValidationFailure, got {:?}", other),
        }
        assert!(target.get_tasks().is_empty());
        assert!(target.home_data().is_none());
        assert_eq!(target.store().saves(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_import_reports_every_bad_field(ctx: &mut BackupContext) {
        let document = json!({
            "homeData": {"address": "", "city": "Springfield", "state": "Illinois", "sqft": 0, "yearBuilt": 1700},
            "tasks": [
                {"id": 1, "title": "A", "category": "general", "frequency": -5, "cost": -1, "priority": "urgent", "dueDate": "soon"},
                {"id": 1, "title": "", "category": "general", "frequency": 30, "priority": "low", "dueDate": "2024-04-01"}
            ],
            "version": "2.0",
            "exportDate": "yesterday"
        });
        let mut target = empty_scheduler(ctx.today);

        let Err(ScheduleError::ValidationFailure(errors)) = import_backup(&mut target, &document.to_string(), ctx.today) else {
            panic!("expected ValidationFailure");
        };
        let fields = errors.fields();
        for expected in [
            "homeData.address",
            "homeData.state",
            "homeData.sqft",
            "homeData.yearBuilt",
            "tasks[0].frequency",
            "tasks[0].cost",
            "tasks[0].priority",
            "tasks[0].dueDate",
            "tasks[1].id",
            "tasks[1].title",
            "exportDate",
        ] {
            assert!(fields.contains(&expected), "missing {expected} in {fields:?}");
        }
        assert!(target.get_tasks().is_empty());
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_import_normalizes_legacy_backup(ctx: &mut BackupContext) {
        let document = json!({
            "homeData": {"address": "1 Oak Ave", "city": "Austin", "state": "TX", "zipcode": "73301",
                         "propertyType": "condo", "yearBuilt": 2005, "sqft": 950, "features": {"hotTub": true}},
            "tasks": [
                {"id": 3, "title": "Replace HVAC filter", "category": "hvac", "frequency": 90, "cost": 25,
                 "priority": "normal", "dueDate": "2024-03-20T12:00:00", "nextDue": "2024-03-10T12:00:00"},
                {"id": 8, "title": "Clean gutters", "category": "exterior", "frequency": 180, "cost": 150,
                 "priority": "medium", "seasonalHint": "fall"}
            ],
            "version": "1.0",
            "exportDate": "2024-02-28T08:00:00.000Z"
        });
        let mut target = empty_scheduler(ctx.today);

        let summary = import_backup(&mut target, &document.to_string(), ctx.today).unwrap();

        assert_eq!(summary.tasks, 2);
        assert_eq!(summary.scheduled, 1);
        assert_eq!(summary.date_repairs, 1);
        assert_eq!(summary.normalized, 1);
        assert_eq!(target.task(3).unwrap().priority, Priority::Medium);
        assert_eq!(target.task(3).unwrap().due_date.date(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(target.task(8).unwrap().due_date.date(), NaiveDate::from_ymd_opt(2024, 9, 15).unwrap());
        assert_eq!(target.home_data().unwrap().features.other.get("hotTub"), Some(&json!(true)));
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_import_replaces_existing_tasks(ctx: &mut BackupContext) {
        let json = export_backup(&ctx.source, ctx.exported_at).to_json().unwrap();
        let mut target = empty_scheduler(ctx.today);
        target.setup_home(ctx.source.home_data().unwrap().clone(), ctx.today).unwrap();
        target.delete_task(2).unwrap();

        import_backup(&mut target, &json, ctx.today).unwrap();

        assert_eq!(target.get_tasks(), ctx.source.get_tasks());
    }

    #[test_context(BackupContext)]
    #[test]
    fn test_csv_export(ctx: &mut BackupContext) {
        let mut buffer = Vec::new();
        write_tasks_csv(ctx.source.get_tasks(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("id,title,category,priority,frequency,cost,dueDate,lastCompleted"));
        assert_eq!(lines.count(), ctx.source.get_tasks().len());
        assert!(text.contains("Replace HVAC filter,hvac,high,90,25.00"));
    }
}
