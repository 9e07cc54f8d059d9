use chrono::{Local, Utc};
use clap::Subcommand;
use tminus_core::projection::ProjectionContext;
use tminus_core::{Catalog, Category, Config, Coordinates, Countdown, GeoLocator, LocationFix, SpaProvider};

use crate::display;

#[derive(Subcommand)]
pub enum EventsAction {
    /// List tracked events
    List {
        /// Only show one category (atmospheric, chronological, cosmic, anomalous, deep-time)
        #[arg(long)]
        category: Option<Category>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project the next occurrence of an event
    Next {
        /// Event id (see `events list`)
        id: String,
        /// Observer latitude in degrees
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Observer longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Resolve the observer location from the IP lookup first
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        locate: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EventsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EventsAction::List { category, json } => list(category, json),
        EventsAction::Next {
            id,
            lat,
            lng,
            locate,
            json,
        } => next(&id, lat.zip(lng), locate, json),
    }
}

fn list(category: Option<Category>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = Catalog::build(&config.location.default_label);
    let entries: Vec<_> = catalog
        .entries()
        .iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        println!(
            "{:<20} {:<14} {:<12} {}",
            entry.id,
            entry.category,
            entry.projection.name(),
            entry.title
        );
    }
    Ok(())
}

fn next(
    id: &str,
    coordinates: Option<(f64, f64)>,
    locate: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let fix = match coordinates {
        Some((lat, lng)) => LocationFix::manual(Coordinates::new(lat, lng)?),
        None if locate => {
            let locator = GeoLocator::new(&config.location.lookup_url)?;
            super::runtime()?.block_on(locator.locate())
        }
        None => config.location_fallback(),
    };

    let catalog = Catalog::build(&fix.label);
    let descriptor = catalog.require(id)?;
    let provider = SpaProvider::new();
    let now = Local::now();
    let ctx = ProjectionContext::new(now, fix.coordinates, &provider);

    let target = descriptor.project_next(&ctx).map(|t| t.with_timezone(&Utc));
    let countdown = Countdown::between(target.as_ref(), &now);
    let progress = descriptor.estimate_progress(&now);

    if json {
        let out = serde_json::json!({
            "id": descriptor.id,
            "title": descriptor.title,
            "category": descriptor.category,
            "projection": descriptor.projection,
            "target": target,
            "countdown": countdown,
            "progress": progress,
            "location": fix,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}  [{}]", descriptor.title, descriptor.category);
    println!("  {}", descriptor.subtitle);
    println!("  next:      {}", display::target(target.as_ref()));
    println!("  countdown: {countdown}");
    println!(
        "  progress:  {} {}",
        display::percent(progress),
        display::gauge(descriptor.visualization(), progress, 0)
    );
    println!("  observer:  {} ({})", fix.label, fix.coordinates);
    Ok(())
}
