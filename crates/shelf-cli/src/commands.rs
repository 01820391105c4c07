use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use shelf_api::{ApiError, CatalogClient};
use shelf_core::{BatchLoader, LoadOutcome, LoadState, ShelfView};
use shelf_model::PaginationParams;
use tokio::sync::watch;
use tracing::info;

use shelf_cli::render::{
    book_table, books_table, footer_line, languages_line, shelves_table, summary_line,
};
use shelf_cli::settings::{Settings, save_settings};

use crate::cli::{BookArgs, BrowseArgs, ConfigArgs, ShelvesArgs};

/// Exit code for a load that failed as a whole.
pub const EXIT_LOAD_FAILED: i32 = 1;

pub async fn run_shelves(settings: &Settings, args: &ShelvesArgs) -> Result<i32> {
    let client = CatalogClient::new(&settings.api).context("create catalog client")?;
    let params = PaginationParams {
        offset: args.offset,
        limit: Some(args.limit),
    };
    let shelves = client
        .bookshelves(params)
        .await
        .map_err(api_error)
        .context("list shelves")?;

    if shelves.is_empty() {
        println!("No shelves for user {}", settings.api.user_id);
    } else {
        println!("{}", shelves_table(&shelves));
    }
    Ok(0)
}

pub async fn run_book(settings: &Settings, args: &BookArgs) -> Result<i32> {
    let client = CatalogClient::new(&settings.api).context("create catalog client")?;
    let book = client
        .book_details(&args.form_id)
        .await
        .map_err(api_error)
        .with_context(|| format!("load book {}", args.form_id))?;
    println!("{}", book_table(&book));
    Ok(0)
}

pub async fn run_browse(settings: &Settings, args: &BrowseArgs) -> Result<i32> {
    let client = CatalogClient::new(&settings.api).context("create catalog client")?;
    let ids = client
        .shelf_book_ids(&args.shelf_id, PaginationParams::with_limit(args.limit))
        .await
        .map_err(api_error)
        .with_context(|| format!("resolve shelf {}", args.shelf_id))?;
    info!(shelf_id = %args.shelf_id, books = ids.len(), "resolved shelf");

    let loader = BatchLoader::new(client, settings.loader);
    let progress = progress_bar(ids.len());
    let (outcome, ()) = tokio::join!(
        loader.load(&ids),
        track_progress(loader.subscribe(), &progress)
    );
    progress.finish_and_clear();

    let state = match outcome {
        LoadOutcome::Completed(state) => state,
        LoadOutcome::Failed(error) => {
            eprintln!("error: could not load shelf {}: {error}", args.shelf_id);
            eprintln!("Run the same command again to retry.");
            return Ok(EXIT_LOAD_FAILED);
        }
        LoadOutcome::Superseded => bail!("load of shelf {} was interrupted", args.shelf_id),
    };

    let mut view = ShelfView::new(settings.display.page_size);
    view.set_search_query(args.search.as_str());
    view.set_filters(args.filters());
    view.apply_load_state(state);
    view.set_page_index(args.page);

    let visible = view.visible();
    if !visible.books.is_empty() {
        println!("{}", books_table(&visible));
    }
    println!("{}", summary_line(&visible));
    println!("{}", footer_line(&visible, &view.query().filters));
    if let Some(line) = languages_line(&view.languages()) {
        println!("{line}");
    }
    Ok(0)
}

pub fn run_config(settings: &Settings, path: Option<&Path>, args: &ConfigArgs) -> Result<i32> {
    match path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no settings path available on this platform"),
    }
    print!("{}", settings.to_toml()?);

    if args.save {
        let Some(path) = path else {
            bail!("no settings path available; pass --config PATH");
        };
        save_settings(settings, path)?;
        eprintln!("Saved settings to {}", path.display());
    }
    Ok(0)
}

/// Mirror published load snapshots onto the progress bar until the load settles.
async fn track_progress(mut state: watch::Receiver<LoadState>, progress: &ProgressBar) {
    while state.changed().await.is_ok() {
        let snapshot = state.borrow_and_update().clone();
        progress.set_length(snapshot.requested as u64);
        progress.set_position(snapshot.loaded_count() as u64);
        progress.set_message(format!("{} loaded", snapshot.loaded_count()));
        if snapshot.is_settled() {
            break;
        }
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("=> "));
    }
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}

/// Attach the user-facing explanation to an API error.
fn api_error(error: ApiError) -> anyhow::Error {
    let hint = if error.is_retryable() {
        " Try again in a moment."
    } else {
        ""
    };
    let message = format!("{}{hint}", error.user_message());
    anyhow::Error::new(error).context(message)
}
