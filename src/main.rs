use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

mod app;
mod cli;
mod config;
mod markup;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting lazymodal");

    let args = cli::Args::parse();

    let config = match &args.config {
        Some(path) => config::loader::load_from(path)?,
        None => config::load()?,
    };
    let overrides = config.dialog.clone().merge(args.overrides()?);
    let locale = args.locale.unwrap_or(config.locale);
    let theme = theme::theme_from_name(&config.theme.name);
    let title = args.title.as_deref().unwrap_or(&config.content.title);
    let message = args.message.as_deref().unwrap_or(&config.content.message);

    let mut app = App::new(title, message, overrides, locale, config.keybindings.clone(), theme);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("lazymodal").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "lazymodal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
