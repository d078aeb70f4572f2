//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::capture::clipboard::{CapturedImage, ClipboardCapture};
use crate::core::client::TranslationClient;
use crate::core::config::TranslatorConfig;
use crate::core::models::Language;

/// Commands for GTranslator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text (reads stdin when no text is given)
    Translate {
        /// Text to translate
        text: Option<String>,

        /// Context that helps disambiguate the text
        #[arg(short, long)]
        context: Option<String>,

        /// Target language code (defaults to the configured language)
        #[arg(short, long)]
        target_lang: Option<String>,
    },

    /// Extract text from an image file or the clipboard image
    Extract {
        /// Image file (uses the clipboard helper when omitted)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Translate the extracted text
        #[arg(long)]
        translate: bool,

        /// Target language code for --translate
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Context for --translate
        #[arg(short, long)]
        context: Option<String>,
    },

    /// List the built-in target languages
    Languages,

    /// Start HTTP API server
    Server {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Spinner shown while a request is in flight
fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn target_language(config: &TranslatorConfig, target_lang: Option<String>) -> Language {
    target_lang
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(Language::resolve)
        .unwrap_or_else(|| config.language())
}

/// Handle translate command
pub async fn handle_translate(
    config: TranslatorConfig,
    text: Option<String>,
    context: Option<String>,
    target_lang: Option<String>,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let language = target_language(&config, target_lang);
    let client = TranslationClient::new(config)?;
    let request = client.translation_request(text, language, context);

    let pb = spinner("Translation in progress...");
    let result = client.translate(&request).await;
    pb.finish_and_clear();

    let translation = result?;
    println!("{}", translation.text);

    Ok(())
}

/// Handle extract command
pub async fn handle_extract(
    config: TranslatorConfig,
    image: Option<PathBuf>,
    translate: bool,
    target_lang: Option<String>,
    context: Option<String>,
) -> anyhow::Result<()> {
    let language = target_language(&config, target_lang);

    let captured = match image {
        Some(path) => {
            info!("Reading image from {}", path.display());
            CapturedImage::from_file(&path).await?
        }
        None => ClipboardCapture::new(config.helper_script.clone()).capture().await?,
    };

    let client = TranslationClient::new(config)?;
    let request = captured.into_request(client.config().api_key.clone());

    let pb = spinner("Extracting text from image...");

    if translate {
        let result = client.extract_and_translate(&request, language, context).await;
        pb.finish_and_clear();

        let (extracted, translation) = result?;
        println!("{}", extracted);
        println!();
        println!("{}", translation.text);
    } else {
        let result = client.extract_text(&request).await;
        pb.finish_and_clear();

        println!("{}", result?.text);
    }

    Ok(())
}

/// Handle languages command
pub fn handle_languages(config: &TranslatorConfig) {
    let default = config.language();
    for language in Language::all() {
        let marker = if language.code == default.code { "*" } else { " " };
        println!("{} {:<4} {}", marker, language.code, language.name);
    }
}

/// Handle server command
pub async fn handle_server(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    let client = TranslationClient::new(config)?;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("Server starting on http://{}:{}", host, port);

    run_server(client, host, port).await?;

    Ok(())
}
