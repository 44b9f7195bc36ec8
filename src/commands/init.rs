use super::open_scheduler;
use crate::{
    libs::{
        config::Config,
        messages::Message,
        state::{HomeData, HomeFeatures},
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};

const FEATURES: [&str; 10] = [
    "Central air",
    "Fireplace",
    "Pool",
    "Septic system",
    "Well water",
    "Sprinklers",
    "Deck",
    "Garage",
    "Basement",
    "Solar panels",
];

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Replace an existing plan without asking
    #[arg(short, long)]
    force: bool,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    let config = Config::read()?;
    let mut scheduler = open_scheduler(&config)?;

    let existing = scheduler.get_tasks().len();
    if existing > 0 && !args.force {
        msg_warning!(Message::SetupOverwriteWarning(existing));
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmSetupOverwrite.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    msg_info!(Message::SetupWelcome, true);
    let today = Local::now().date_naive();
    let home = prompt_home(scheduler.home_data().cloned(), today.year())?;
    let outcome = scheduler.setup_home(home, today)?;

    for failure in &outcome.failed {
        msg_warning!(Message::SetupTemplateFailed {
            title: failure.title.clone(),
            reason: failure.error.to_string(),
        });
    }
    msg_success!(Message::SetupCompleted(outcome.scheduled.len()));
    Ok(())
}

fn prompt_home(previous: Option<HomeData>, current_year: i32) -> Result<HomeData> {
    let theme = ColorfulTheme::default();
    let previous = previous.unwrap_or_else(|| HomeData {
        address: String::new(),
        city: String::new(),
        state: String::new(),
        zipcode: String::new(),
        property_type: "single-family".to_string(),
        year_built: current_year - 20,
        sqft: 1800,
        features: HomeFeatures::default(),
    });

    let address: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptAddress.to_string())
        .with_initial_text(previous.address.clone())
        .interact_text()?;
    let city: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptCity.to_string())
        .with_initial_text(previous.city.clone())
        .interact_text()?;
    let state: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptState.to_string())
        .with_initial_text(previous.state.clone())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.len() == 2 && input.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err("use the two-letter state code")
            }
        })
        .interact_text()?;
    let zipcode: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptZipcode.to_string())
        .with_initial_text(previous.zipcode.clone())
        .allow_empty(true)
        .interact_text()?;
    let property_type: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptPropertyType.to_string())
        .default(previous.property_type.clone())
        .interact_text()?;
    let year_built: i32 = Input::with_theme(&theme)
        .with_prompt(Message::PromptYearBuilt.to_string())
        .default(previous.year_built)
        .validate_with(move |year: &i32| -> std::result::Result<(), &str> {
            if (1800..=current_year + 1).contains(year) {
                Ok(())
            } else {
                Err("year is out of range")
            }
        })
        .interact_text()?;
    let sqft: u32 = Input::with_theme(&theme)
        .with_prompt(Message::PromptSqft.to_string())
        .default(previous.sqft)
        .validate_with(|sqft: &u32| -> std::result::Result<(), &str> {
            if *sqft > 0 {
                Ok(())
            } else {
                Err("must be greater than zero")
            }
        })
        .interact_text()?;

    let f = &previous.features;
    let defaults = [
        f.central_air,
        f.fireplace,
        f.pool,
        f.septic,
        f.well_water,
        f.sprinklers,
        f.deck,
        f.garage,
        f.basement,
        f.solar,
    ];
    let selected = MultiSelect::with_theme(&theme)
        .with_prompt(Message::PromptFeatures.to_string())
        .items(&FEATURES)
        .defaults(&defaults)
        .interact()?;
    let has = |index: usize| selected.contains(&index);

    Ok(HomeData {
        address: address.trim().to_string(),
        city: city.trim().to_string(),
        state: state.trim().to_uppercase(),
        zipcode: zipcode.trim().to_string(),
        property_type,
        year_built,
        sqft,
        features: HomeFeatures {
            central_air: has(0),
            fireplace: has(1),
            pool: has(2),
            septic: has(3),
            well_water: has(4),
            sprinklers: has(5),
            deck: has(6),
            garage: has(7),
            basement: has(8),
            solar: has(9),
            other: previous.features.other.clone(),
        },
    })
}
