//! Generate a badge and save it next to the current directory
//!
//! Usage: cargo run --example generate_badge -- "Asha Rao" REC123

use recruit_badge::{BadgeComposer, FontOptions, data_url, download_filename};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "Asha Rao".to_string());
    let recruiter_id = args.next().unwrap_or_else(|| "REC123".to_string());

    let composer = BadgeComposer::from_font_options(&FontOptions::default())?;
    let badge = composer.generate(&name, &recruiter_id)?;

    let filename = download_filename(badge.request().name());
    badge.image().save(&filename)?;

    println!("✓ Badge saved to {filename}");
    println!("  Payload: {}", badge.payload());
    println!("  Data URL length: {}", data_url(badge.image())?.len());

    Ok(())
}
