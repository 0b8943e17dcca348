use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::fs;

use pogoda_core::{
    Config, CurrentField, ForecastClient, ForecastSnapshot, Geocoder, NominatimGeocoder,
    PreferenceStore, codes,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "pogoda", version, about = "Прогноз погоды в терминале")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the 3-day forecast for a city.
    Show {
        /// City name; falls back to the last-used city when omitted.
        city: Option<String>,

        /// Include relative humidity.
        #[arg(long)]
        humidity: bool,

        /// Include precipitation.
        #[arg(long)]
        precipitation: bool,

        /// Include atmospheric pressure.
        #[arg(long)]
        pressure: bool,

        /// Include wind speed.
        #[arg(long)]
        wind_speed: bool,

        /// Include wind direction.
        #[arg(long)]
        wind_direction: bool,

        /// Include every optional field.
        #[arg(long)]
        all: bool,
    },

    /// Manage favourite cities.
    Favourites {
        #[command(subcommand)]
        command: FavouritesCommand,
    },

    /// Manage the favourite-weather rule.
    Rule {
        #[command(subcommand)]
        command: RuleCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavouritesCommand {
    /// List favourite cities.
    List,

    /// Add a city to favourites. The name is geocoded first, so an
    /// unresolvable city is rejected.
    Add { city: String },
}

#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    /// Show the stored rule.
    Show,

    /// Pick a weather description and a phrase to show when it matches.
    Set {
        /// Weather description; chosen interactively when omitted.
        #[arg(long)]
        weather: Option<String>,

        /// Phrase to show; asked interactively when omitted.
        #[arg(long)]
        phrase: Option<String>,
    },

    /// Remove the stored rule.
    Clear,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let db_path = config.database_file_path()?;
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
        let mut store = PreferenceStore::open(&db_path)?;

        match self.command {
            Command::Show {
                city,
                humidity,
                precipitation,
                pressure,
                wind_speed,
                wind_direction,
                all,
            } => {
                let city = match city {
                    Some(city) => city.trim().to_string(),
                    None => store
                        .get_last_used_city()?
                        .context("Город не указан и нет последнего просмотренного города")?,
                };

                let mut fields = CurrentField::base().to_vec();
                if humidity || all {
                    fields.push(CurrentField::RelativeHumidity);
                }
                if precipitation || all {
                    fields.push(CurrentField::Precipitation);
                }
                if pressure || all {
                    fields.push(CurrentField::Pressure);
                }
                if wind_speed || all {
                    fields.push(CurrentField::WindSpeed);
                }
                if wind_direction || all {
                    fields.push(CurrentField::WindDirection);
                }

                let snapshot = fetch_snapshot(&city, &fields).await?;
                print_current(&snapshot, &fields)?;
                print_forecast(&snapshot)?;

                if let Some(rule) = store.get_favourite_weather_rule()? {
                    if snapshot.description()? == rule.description {
                        println!();
                        println!("{}", rule.phrase);
                    }
                }

                store.set_last_used_city(&city)?;
            }

            Command::Favourites { command } => match command {
                FavouritesCommand::List => {
                    let cities = store.list_favourite_cities()?;
                    if cities.is_empty() {
                        println!("Любимых городов пока нет");
                    }
                    for city in cities {
                        println!("{city}");
                    }
                }
                FavouritesCommand::Add { city } => {
                    let city = city.trim().to_string();
                    // Refuse to save a city the geocoder cannot find.
                    let geocoder = NominatimGeocoder::new()?;
                    geocoder.resolve(&city).await?;

                    store.add_favourite_city(&city)?;
                    println!("Город <<{city}>> добавлен в любимые");
                }
            },

            Command::Rule { command } => match command {
                RuleCommand::Show => match store.get_favourite_weather_rule()? {
                    Some(rule) => {
                        println!("{}: {}", rule.description, rule.phrase);
                    }
                    None => println!("Фраза на любимую погоду не установлена"),
                },
                RuleCommand::Set { weather, phrase } => {
                    let descriptions = codes::all_descriptions();

                    let description = match weather {
                        Some(weather) => {
                            if !descriptions.contains(&weather.as_str()) {
                                bail!("Неизвестное описание погоды: {weather}");
                            }
                            weather
                        }
                        None => inquire::Select::new("Любимая погода:", descriptions)
                            .prompt()?
                            .to_string(),
                    };

                    let phrase = match phrase {
                        Some(phrase) => phrase,
                        None => inquire::Text::new("Фраза:").prompt()?,
                    };
                    let phrase = phrase.trim();
                    if phrase.is_empty() {
                        bail!("Установите фразу при любимой погоде!");
                    }

                    store.set_favourite_weather_rule(&description, phrase)?;
                    println!("Фраза на любимую погоду сохранена");
                }
                RuleCommand::Clear => {
                    store.clear_favourite_weather_rule()?;
                    println!("Фраза на любимую погоду удалена");
                }
            },
        }

        Ok(())
    }
}

async fn fetch_snapshot(
    city: &str,
    fields: &[CurrentField],
) -> anyhow::Result<ForecastSnapshot> {
    let geocoder = NominatimGeocoder::new()?;
    let coordinates = geocoder.resolve(city).await?;

    let mut client = ForecastClient::new(coordinates)?;
    client.set_current_fields(fields);

    Ok(ForecastSnapshot::new(client.fetch().await?))
}

fn print_current(snapshot: &ForecastSnapshot, fields: &[CurrentField]) -> anyhow::Result<()> {
    let (day, time) = snapshot.current_timestamp()?;
    let (latitude, longitude) = snapshot.coordinates()?;

    println!("{:<22} {day} {time}", "Время");
    println!("{:<22} ({latitude}, {longitude})", "Координаты");
    println!("{:<22} {}", "Температура", snapshot.temperature()?);
    println!("{:<22} {}", "Ощущается как", snapshot.apparent_temperature()?);
    println!("{:<22} {}", "Описание", snapshot.description()?);

    if fields.contains(&CurrentField::WindSpeed) {
        println!("{:<22} {}", "Скорость ветра", snapshot.wind_speed()?);
    }
    if fields.contains(&CurrentField::WindDirection) {
        println!("{:<22} {}", "Направление ветра", snapshot.wind_direction()?);
    }
    if fields.contains(&CurrentField::Precipitation) {
        println!("{:<22} {}", "Количество осадков", snapshot.precipitation()?);
    }
    if fields.contains(&CurrentField::RelativeHumidity) {
        println!("{:<22} {}", "Влажность", snapshot.relative_humidity()?);
    }
    if fields.contains(&CurrentField::Pressure) {
        println!("{:<22} {}", "Атмосферное давление", snapshot.pressure()?);
    }

    Ok(())
}

fn print_forecast(snapshot: &ForecastSnapshot) -> anyhow::Result<()> {
    println!();
    println!("Прогноз на ближайшие дни:");

    for row in snapshot.forecast()? {
        println!(
            "{:<10} от {}°C до {}°C, {}",
            row.day, row.min_temp, row.max_temp, row.description
        );
    }

    Ok(())
}
