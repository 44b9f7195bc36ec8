//! Maintenance plan generation from a home description.
//!
//! Produces undated [`TaskTemplate`]s; turning them into scheduled tasks is
//! the scheduler's job. Every home gets the base set, then features and age
//! add their own tasks.

use super::state::HomeData;
use super::task::{Category, Priority, Season, TaskTemplate};
use chrono::NaiveDate;

/// Homes at least this old get inspection tasks for aging systems.
pub const AGING_HOME_YEARS: i32 = 40;

fn base_tasks() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate::new("Replace HVAC filter", Category::Hvac, 90, 25.0, Priority::High)
            .described("Swap the air handler filter to keep airflow and air quality up."),
        TaskTemplate::new("Test smoke and CO detectors", Category::Safety, 180, 0.0, Priority::High)
            .described("Press the test button on every detector and replace weak batteries."),
        TaskTemplate::new("Clean gutters", Category::Exterior, 180, 150.0, Priority::Medium)
            .described("Clear leaves and debris and check downspouts drain away from the foundation.")
            .in_season(Season::Fall),
        TaskTemplate::new("Flush water heater", Category::Plumbing, 365, 0.0, Priority::Medium)
            .described("Drain a few gallons from the tank to remove sediment."),
        TaskTemplate::new("Clean dryer vent", Category::Appliances, 365, 100.0, Priority::Medium)
            .described("Remove lint from the duct run to the exterior vent."),
        TaskTemplate::new("Clean refrigerator coils", Category::Appliances, 180, 0.0, Priority::Low)
            .described("Vacuum the condenser coils behind or under the fridge."),
        TaskTemplate::new("Inspect roof", Category::Exterior, 365, 200.0, Priority::Medium)
            .described("Look for missing shingles, damaged flashing and signs of leaks.")
            .in_season(Season::Spring),
        TaskTemplate::new("Check fire extinguishers", Category::Safety, 365, 0.0, Priority::Medium)
            .described("Confirm the gauge is in the green and the pin is intact."),
        TaskTemplate::new("Clean range hood filter", Category::Appliances, 90, 0.0, Priority::Low)
            .described("Degrease or replace the kitchen exhaust filter."),
        TaskTemplate::new("Inspect caulking and weatherstripping", Category::Interior, 365, 30.0, Priority::Low)
            .described("Reseal gaps around windows, doors, tubs and showers.")
            .in_season(Season::Fall),
        TaskTemplate::new("Winterize outdoor faucets", Category::Seasonal, 365, 0.0, Priority::Medium)
            .described("Shut off and drain exterior hose bibs before the first freeze.")
            .in_season(Season::Winter),
    ]
}

fn feature_tasks(home: &HomeData) -> Vec<TaskTemplate> {
    let features = &home.features;
    let mut tasks = Vec::new();

    if features.central_air {
        tasks.push(
            TaskTemplate::new("Service air conditioner", Category::Hvac, 365, 150.0, Priority::Medium)
                .described("Professional tune-up before the cooling season.")
                .in_season(Season::Spring),
        );
    }
    if features.fireplace {
        tasks.push(
            TaskTemplate::new("Sweep chimney", Category::Safety, 365, 250.0, Priority::High)
                .described("Remove creosote buildup and inspect the flue.")
                .in_season(Season::Fall),
        );
    }
    if features.pool {
        tasks.push(
            TaskTemplate::new("Test pool chemistry", Category::Pool, 7, 10.0, Priority::Medium)
                .described("Check chlorine and pH and adjust as needed."),
        );
        tasks.push(
            TaskTemplate::new("Clean pool filter", Category::Pool, 90, 0.0, Priority::Medium)
                .described("Backwash or rinse the filter cartridge."),
        );
    }
    if features.septic {
        tasks.push(
            TaskTemplate::new("Pump septic tank", Category::Plumbing, 1095, 400.0, Priority::Medium)
                .described("Have the tank pumped and the baffles inspected."),
        );
    }
    if features.well_water {
        tasks.push(
            TaskTemplate::new("Test well water", Category::Plumbing, 365, 75.0, Priority::High)
                .described("Lab test for bacteria, nitrates and hardness."),
        );
    }
    if features.sprinklers {
        tasks.push(
            TaskTemplate::new("Winterize sprinkler system", Category::Landscaping, 365, 80.0, Priority::Medium)
                .described("Blow out the lines before freezing temperatures.")
                .in_season(Season::Fall),
        );
    }
    if features.deck {
        tasks.push(
            TaskTemplate::new("Seal deck", Category::Exterior, 730, 300.0, Priority::Low)
                .described("Clean and apply a fresh coat of sealant.")
                .in_season(Season::Summer),
        );
    }
    if features.garage {
        tasks.push(
            TaskTemplate::new("Lubricate garage door", Category::Exterior, 180, 10.0, Priority::Low)
                .described("Oil rollers, hinges and springs, and test the auto-reverse."),
        );
    }
    if features.basement {
        tasks.push(
            TaskTemplate::new("Test sump pump", Category::Plumbing, 90, 0.0, Priority::High)
                .described("Pour water into the pit and confirm the pump kicks on."),
        );
    }
    if features.solar {
        tasks.push(
            TaskTemplate::new("Clean solar panels", Category::Electrical, 180, 120.0, Priority::Low)
                .described("Rinse dust and debris and check the inverter readout."),
        );
    }

    tasks
}

fn age_tasks(home: &HomeData, today: NaiveDate) -> Vec<TaskTemplate> {
    if home.age(today) < AGING_HOME_YEARS {
        return Vec::new();
    }
    vec![
        TaskTemplate::new("Inspect electrical panel", Category::Electrical, 1095, 200.0, Priority::High)
            .described("Have an electrician check breakers, wiring and grounding."),
        TaskTemplate::new("Inspect plumbing supply lines", Category::Plumbing, 730, 150.0, Priority::Medium)
            .described("Look for corrosion and slow leaks in older pipes."),
    ]
}

/// Builds the full maintenance plan for a home.
pub fn generate_templates(home: &HomeData, today: NaiveDate) -> Vec<TaskTemplate> {
    let mut templates = base_tasks();
    templates.extend(feature_tasks(home));
    templates.extend(age_tasks(home, today));
    templates
}
