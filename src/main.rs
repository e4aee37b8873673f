use neat_cart::config::Config;
use neat_cart::errors::AppError;
use neat_cart::view::dom::Document;
use neat_cart::{build_binder, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads one JSON UI event per stdin line and prints the page after each.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let mut binder = build_binder(&config, Document::full_page())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = line
            .parse::<UiEvent>()
            .and_then(|event| binder.dispatch(event));
        if let Err(e) = result {
            log::error!("Event failed: {}", e);
            continue;
        }
        let snapshot = binder.document().snapshot().to_json()?;
        println!("{}", snapshot);
    }

    log::info!("Input closed, shutting down");
    Ok(())
}
