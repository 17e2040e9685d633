use anyhow::Result;
use colored::Colorize;

use crate::client::CaremapClient;

pub async fn status(client: &CaremapClient, server: &str) -> Result<()> {
    let (code, body) = client.check("/healthz").await?;
    if code != 200 {
        println!(
            "{} {} returned {} {}",
            "✗".red(),
            server.cyan(),
            code.to_string().red(),
            body
        );
        return Ok(());
    }
    println!("{} {} is {}", "✓".green(), server.cyan(), "healthy".green());

    let (code, _) = client.check("/readyz").await?;
    if code == 200 {
        println!("  {}: {}", "Storage".cyan(), "ready".green());
    } else {
        println!("  {}: {} (HTTP {code})", "Storage".cyan(), "unavailable".red());
    }
    Ok(())
}
