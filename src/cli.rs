use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use lazymodal::{Locale, PartialConfig};

#[derive(Parser, Debug, Default)]
#[command(name = "lazymodal", version, about = "Show a modal dialog in the terminal")]
pub struct Args {
    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dialog options as JSON, e.g. '{"width": "40px", "confirmButtonText": "Go"}'
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    /// Panel width as a CSS length (cells), e.g. "40px"
    #[arg(short, long)]
    pub width: Option<String>,

    /// Label of the confirm button
    #[arg(long)]
    pub confirm_text: Option<String>,

    /// Label of the cancel button
    #[arg(long)]
    pub cancel_text: Option<String>,

    /// Event that triggers confirm ("click", "dblclick", "mouseup", ...)
    #[arg(long)]
    pub confirm_event: Option<String>,

    /// Event that triggers cancel
    #[arg(long)]
    pub cancel_event: Option<String>,

    /// Language of the default button labels ("en" or "zh")
    #[arg(short, long)]
    pub locale: Option<Locale>,

    /// Dialog title
    #[arg(long)]
    pub title: Option<String>,

    /// Dialog message
    #[arg(short, long)]
    pub message: Option<String>,
}

impl Args {
    /// Dialog overrides from `--options` with the individual flags on top.
    pub fn overrides(&self) -> color_eyre::Result<PartialConfig> {
        let from_json = match &self.options {
            Some(json) => serde_json::from_str::<PartialConfig>(json)
                .wrap_err("Invalid JSON passed to --options")?,
            None => PartialConfig::default(),
        };

        let flags = PartialConfig {
            width: self.width.clone(),
            confirm_button_text: self.confirm_text.clone(),
            cancel_button_text: self.cancel_text.clone(),
            confirm_event_name: self.confirm_event.clone(),
            cancel_event_name: self.cancel_event.clone(),
            ..PartialConfig::default()
        };

        Ok(from_json.merge(flags))
    }
}
