//! Walks the whole listing the way the home page's "load more" button does
//! and prints every post.
//!
//! Usage: list_posts [page_size]

use anyhow::{Context, Result};
use posts::{LoadOutcome, LocaleDateFormatter, PaginationController};
use prismic::PrismicClient;
use spacetraveling::config::AppConfig;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration from .env")?;
    let page_size = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("Invalid page size: {}", arg))?,
        None => config.home_page_size,
    };

    let client = PrismicClient::new(reqwest::Client::new(), config.prismic.clone());
    let formatter = LocaleDateFormatter::new(config.locale);

    let first = posts::home_page(&client, &formatter, page_size).await?;
    let controller = PaginationController::new(client, formatter, first);

    let mut pages = 1;
    loop {
        match controller.load_more().await? {
            LoadOutcome::Appended(_) => pages += 1,
            LoadOutcome::Exhausted => break,
            LoadOutcome::InFlight => unreachable!("list_posts is the only caller"),
        }
    }

    let posts = controller.posts().await;
    println!("{} posts in {} pages", posts.len(), pages);
    for post in posts {
        println!(
            "{}  {}  {} ({})",
            post.first_publication_date,
            post.uid.as_deref().unwrap_or("-"),
            post.title,
            post.author
        );
    }

    Ok(())
}
