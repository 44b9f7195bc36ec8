#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use homekeep::libs::dates::{at_midday, format_timestamp, parse_due_date, parse_timestamp};
    use homekeep::libs::formatter::{annual_cost, format_cost, format_date, format_frequency, format_relative};
    use homekeep::libs::task::{Category, Priority, TaskTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(1), "daily");
        assert_eq!(format_frequency(7), "weekly");
        assert_eq!(format_frequency(90), "quarterly");
        assert_eq!(format_frequency(365), "yearly");
        assert_eq!(format_frequency(1095), "every 3 years");
        assert_eq!(format_frequency(45), "every 45 days");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(25.0, "$"), "$25.00");
        assert_eq!(format_cost(0.5, "€"), "€0.50");
        assert_eq!(format_cost(-3.0, "$"), "$0.00");
    }

    #[test]
    fn test_format_date_and_relative() {
        let due = at_midday(date(2024, 3, 5));
        assert_eq!(format_date(&due), "Mar 05, 2024");
        assert_eq!(format_relative(&due, date(2024, 3, 5)), "due today");
        assert_eq!(format_relative(&due, date(2024, 3, 4)), "due tomorrow");
        assert_eq!(format_relative(&due, date(2024, 3, 1)), "in 4 days");
        assert_eq!(format_relative(&due, date(2024, 3, 6)), "overdue by 1 day");
        assert_eq!(format_relative(&due, date(2024, 3, 15)), "overdue by 10 days");
    }

    #[test]
    fn test_annual_cost() {
        let tasks = vec![
            TaskTemplate::new("A", Category::General, 365, 100.0, Priority::Low).into_task(1, at_midday(date(2024, 1, 1))),
            TaskTemplate::new("B", Category::General, 73, 10.0, Priority::Low).into_task(2, at_midday(date(2024, 1, 1))),
        ];
        assert!((annual_cost(&tasks) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_timestamp_layouts() {
        let noon = at_midday(date(2024, 1, 20));
        assert_eq!(parse_timestamp("2024-01-20").unwrap(), noon);
        assert_eq!(parse_timestamp("2024-01-20T12:00:00").unwrap(), noon);
        assert_eq!(parse_timestamp("2024-01-20 12:00:00").unwrap(), noon);
        assert_eq!(parse_timestamp("2024-01-20T12:00:00.000Z").unwrap(), noon);
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("20/01/2024").is_err());
    }

    #[test]
    fn test_due_dates_normalize_to_midday() {
        assert_eq!(parse_due_date("2024-01-20T23:59:00").unwrap(), at_midday(date(2024, 1, 20)));
        assert_eq!(parse_due_date("2024-01-20T00:00:00").unwrap(), at_midday(date(2024, 1, 20)));
    }

    #[test]
    fn test_format_timestamp_keeps_fraction_only_when_present() {
        assert_eq!(format_timestamp(&at_midday(date(2024, 1, 20))), "2024-01-20T12:00:00");
        let precise = date(2024, 1, 20).and_hms_milli_opt(9, 41, 7, 250).unwrap();
        assert_eq!(format_timestamp(&precise), "2024-01-20T09:41:07.250");
        assert_eq!(parse_timestamp(&format_timestamp(&precise)).unwrap(), precise);
    }
}
