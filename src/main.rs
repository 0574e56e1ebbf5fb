use chrono::Local;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use wbscrap::{info_time, process::process_query, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut stdout = io::stdout();
    stdout.write_all(b"Enter your search query: ").await?;
    stdout.flush().await?;

    let mut query = String::new();
    BufReader::new(io::stdin()).read_line(&mut query).await?;

    println!("Processing...");
    let start_time = Local::now();
    let path = process_query(&query).await?;
    info_time!(start_time, "Full program time:");
    println!("Saved results to {}", path.display());
    println!("Processing completed.");

    Ok(())
}
