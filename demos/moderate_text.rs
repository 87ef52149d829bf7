use memeify::{moderate, OpenAiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: moderate_text <text>");
        std::process::exit(1);
    });

    let config = OpenAiConfig::from_env()?;
    let client = reqwest::Client::new();

    let verdict = moderate(&client, &config, &text).await?;
    println!("Flagged: {}", verdict.flagged);
    for category in verdict.flagged_categories() {
        let score = verdict.category_scores.get(category).copied().unwrap_or(0.0);
        println!("  - {category} ({score:.3})");
    }
    Ok(())
}
