#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use homekeep::libs::generator::{generate_templates, AGING_HOME_YEARS};
    use homekeep::libs::state::{HomeData, HomeFeatures};
    use homekeep::libs::task::Season;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn home(year_built: i32, features: HomeFeatures) -> HomeData {
        HomeData {
            address: "12 Elm St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zipcode: String::new(),
            property_type: "single-family".to_string(),
            year_built,
            sqft: 1500,
            features,
        }
    }

    fn titles(home: &HomeData) -> Vec<String> {
        generate_templates(home, today()).into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn test_base_plan_for_new_home() {
        let titles = titles(&home(2015, HomeFeatures::default()));
        assert_eq!(titles.len(), 11);
        assert!(titles.contains(&"Replace HVAC filter".to_string()));
        assert!(!titles.contains(&"Sweep chimney".to_string()));
        assert!(!titles.contains(&"Inspect electrical panel".to_string()));
    }

    #[test]
    fn test_features_add_tasks() {
        let features = HomeFeatures {
            fireplace: true,
            pool: true,
            septic: true,
            ..HomeFeatures::default()
        };
        let titles = titles(&home(2015, features));
        assert_eq!(titles.len(), 11 + 4);
        for expected in ["Sweep chimney", "Test pool chemistry", "Clean pool filter", "Pump septic tank"] {
            assert!(titles.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_old_home_gets_inspections() {
        let built = 2024 - AGING_HOME_YEARS;
        let titles = titles(&home(built, HomeFeatures::default()));
        assert!(titles.contains(&"Inspect electrical panel".to_string()));
        assert!(titles.contains(&"Inspect plumbing supply lines".to_string()));

        let younger = self::titles(&home(built + 1, HomeFeatures::default()));
        assert_eq!(younger.len(), 11);
    }

    #[test]
    fn test_templates_are_valid() {
        let everything = HomeFeatures {
            central_air: true,
            fireplace: true,
            pool: true,
            septic: true,
            well_water: true,
            sprinklers: true,
            deck: true,
            garage: true,
            basement: true,
            solar: true,
            ..HomeFeatures::default()
        };
        let templates = generate_templates(&home(1950, everything), today());
        assert!(templates.iter().all(|t| t.frequency > 0 && t.cost >= 0.0 && !t.title.is_empty()));
        let gutters = templates.iter().find(|t| t.title == "Clean gutters").unwrap();
        assert_eq!(gutters.seasonal_hint, Some(Season::Fall));
    }
}
