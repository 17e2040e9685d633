use anyhow::Result;
use colored::Colorize;

use crate::cli::{OutputFormat, RouteArgs};
use crate::client::CaremapClient;
use crate::output::print_value;

pub async fn route(client: &CaremapClient, args: &RouteArgs, format: OutputFormat) -> Result<()> {
    let route = client
        .route(args.from_lat, args.from_lon, args.to_lat, args.to_lon)
        .await?;

    if matches!(format, OutputFormat::Table) {
        let distance = route
            .get("distanceMeters")
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        let duration = route
            .get("durationSeconds")
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        let points = route
            .get("geometry")
            .and_then(|v| v.as_array())
            .map(Vec::len)
            .unwrap_or_default();

        println!("{}: {:.1} km", "Distance".cyan(), distance / 1000.0);
        println!("{}: {:.0} min", "Duration".cyan(), duration / 60.0);
        println!("{}: {points}", "Points".cyan());
    } else {
        print_value(&route, format, &[]);
    }
    Ok(())
}
