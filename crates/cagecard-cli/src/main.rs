use std::path::{Path, PathBuf};
use std::process;

use cagecard::stats;
use cagecard::store::JsonStore;
use cagecard::types::FightCard;
use cagecard::ufc;
use cagecard::utils::{CardStats, RosterFilter, RosterStats};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "cagecard")]
#[command(about = "A ufc.com and ufcstats.com fight card scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    /// Upcoming cards as presented on ufc.com
    Ufc,
    /// Upcoming cards as presented on ufcstats.com
    Stats,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every upcoming fight card
    Events {
        #[arg(
            long,
            value_enum,
            default_value = "stats",
            help = "Site to scrape cards from"
        )]
        source: Source,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,

        #[arg(long, value_name = "DIR", help = "Store results in DIR/events.json")]
        save: Option<PathBuf>,
    },
    /// Fetch a single fight card by URL
    Card {
        #[arg(help = "URL of the event page (ufc.com or ufcstats.com)")]
        url: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Fetch a single fighter profile from ufcstats.com
    Fighter {
        #[arg(help = "URL of the fighter detail page")]
        url: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Crawl the fighter roster on ufcstats.com
    Fighters {
        #[arg(long, help = "Only fighters whose last name starts with this letter")]
        letter: Option<char>,

        #[arg(
            long,
            help = "Maximum number of fighters to fetch",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        limit: Option<u16>,

        #[arg(
            long,
            help = "Number of roster entries to skip from the beginning",
            value_parser = clap::value_parser!(u16).range(1..)
        )]
        offset: Option<u16>,

        #[arg(
            long,
            default_value_t = stats::scraper::DEFAULT_CONCURRENCY,
            help = "Maximum number of profile fetches in flight"
        )]
        concurrency: usize,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,

        #[arg(long, value_name = "DIR", help = "Store results in DIR/fighters.json")]
        save: Option<PathBuf>,
    },
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn save_collection<T: serde::Serialize>(dir: &Path, collection: &str, records: &[T]) {
    let store = JsonStore::new(dir);
    if let Err(e) = store.replace_collection(collection, records) {
        log::error!("Error writing collection '{}': {}", collection, e);
        process::exit(1);
    }
}

async fn fetch_cards(source: Source) -> Vec<FightCard> {
    match source {
        Source::Ufc => {
            let scraper = ufc::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });
            scraper.fetch_all_cards().await.unwrap_or_else(|e| {
                log::error!("Error fetching fight cards: {}", e);
                process::exit(1);
            })
        }
        Source::Stats => {
            let scraper = stats::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });
            scraper.fetch_all_event_cards().await.unwrap_or_else(|e| {
                log::error!("Error fetching event cards: {}", e);
                process::exit(1);
            })
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Events {
            source,
            format,
            save,
        } => {
            let cards = fetch_cards(source).await;

            match format {
                OutputFormat::Json => serialize_json(&cards),
                OutputFormat::Text => {
                    if cards.is_empty() {
                        println!("No upcoming events found.");
                    } else {
                        for card in &cards {
                            println!("{}", card);
                        }
                        print!("{}", CardStats::from_cards(&cards));
                    }
                }
            }

            if let Some(dir) = save {
                save_collection(&dir, "events", &cards);
            }
        }

        Commands::Card { url, format } => {
            // ufcstats.com event pages have their own markup
            let result = if url.contains("ufcstats.com") {
                let scraper = stats::WebScraper::new().unwrap_or_else(|e| {
                    log::error!("Error creating scraper: {}", e);
                    process::exit(1);
                });
                scraper
                    .fetch_event_card(&url)
                    .await
                    .map_err(|e| e.to_string())
            } else {
                let scraper = ufc::WebScraper::new().unwrap_or_else(|e| {
                    log::error!("Error creating scraper: {}", e);
                    process::exit(1);
                });
                scraper
                    .fetch_fight_card(&url)
                    .await
                    .map_err(|e| e.to_string())
            };

            let card = result.unwrap_or_else(|e| {
                log::error!("Error fetching fight card: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&card),
                OutputFormat::Text => println!("{}", card),
            }
        }

        Commands::Fighter { url, format } => {
            let scraper = stats::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            let fighter = scraper.fetch_fighter(&url).await.unwrap_or_else(|e| {
                log::error!("Error fetching fighter: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&fighter),
                OutputFormat::Text => println!("{}", fighter),
            }
        }

        Commands::Fighters {
            letter,
            limit,
            offset,
            concurrency,
            format,
            save,
        } => {
            let filter = RosterFilter {
                letter,
                limit: limit.map(usize::from),
                offset: offset.map(usize::from),
            };
            let filter = filter.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            let scraper = stats::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            let urls = match filter.letter {
                Some(l) => scraper
                    .fetch_fighter_urls(l.to_ascii_lowercase())
                    .await
                    .unwrap_or_else(|e| {
                        log::error!("Error fetching roster: {}", e);
                        process::exit(1);
                    }),
                None => scraper.fetch_all_fighter_urls().await,
            };

            let urls = filter.apply(urls);
            let fighters = scraper.fetch_fighters(&urls, concurrency).await;

            match format {
                OutputFormat::Json => serialize_json(&fighters),
                OutputFormat::Text => {
                    if fighters.is_empty() {
                        println!("No fighters to display.");
                    } else {
                        for fighter in &fighters {
                            println!("{}", fighter);
                        }
                        print!("{}", RosterStats::from_fighters(&fighters));
                    }
                }
            }

            if let Some(dir) = save {
                save_collection(&dir, "fighters", &fighters);
            }
        }
    }
}
