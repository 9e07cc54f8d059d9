use tminus_core::{Config, GeoLocator};

use crate::display;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let locator = GeoLocator::new(&config.location.lookup_url)?;
    let fix = super::runtime()?.block_on(locator.locate());

    if json {
        println!("{}", serde_json::to_string_pretty(&fix)?);
    } else {
        println!("{}", fix.label);
        println!("{}", fix.coordinates);
        println!("status: {}", display::status(fix.status));
    }
    Ok(())
}
