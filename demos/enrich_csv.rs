// demos/enrich_csv.rs
//
// cargo run --example enrich_csv -- checkins.csv [enriched.csv]
//
// The CSV needs `checkin_date`, `business_lat` and `business_long` columns.
// Set RUST_LOG=info (or debug) to see what is being fetched.
use polars::prelude::*;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use weather_enrich::WeatherEnricher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: enrich_csv <input.csv> [output.csv]")?;
    let output = args.next().map(PathBuf::from);

    let checkins = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(input))?
        .finish()?;
    println!("Loaded {} check-ins", checkins.height());

    let enricher = WeatherEnricher::builder().show_progress(true).build()?;
    let mut enriched = enricher.enrich(&checkins).await?;

    let missing = enriched.column("temp_max")?.null_count();
    println!(
        "{} of {} rows have weather",
        enriched.height() - missing,
        enriched.height()
    );
    println!("{}", enriched.head(Some(10)));

    if let Some(path) = output {
        let file = File::create(&path)?;
        CsvWriter::new(file).finish(&mut enriched)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
