use memeify::{generate_image, ImageGenOptions, OpenAiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let prompt = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: generate_image <prompt>");
        std::process::exit(1);
    });

    let config = OpenAiConfig::from_env()?;
    let client = reqwest::Client::new();

    println!("Generating image for: {prompt}");

    let url = generate_image(&client, &config, &prompt, &ImageGenOptions::default()).await?;
    println!("Image URL: {url}");
    Ok(())
}
