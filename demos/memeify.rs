use memeify::{MemeOptions, OpenAiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let image_url = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: memeify <image_url> [font_path] [output_path]");
        std::process::exit(1);
    });
    let font_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "assets/impact.ttf".to_string());
    let output = std::env::args().nth(3).unwrap_or_else(|| "meme.png".to_string());

    let config = OpenAiConfig::from_env()?;
    let client = reqwest::Client::new();

    println!("Memeifying {image_url}...");

    let options = MemeOptions::default()
        .font_path(&font_path)
        .save_as(&output);
    let meme = memeify::memeify(&client, &config, &image_url, None, &options).await?;

    println!("Done: {}x{} written to {output}", meme.width(), meme.height());
    Ok(())
}
