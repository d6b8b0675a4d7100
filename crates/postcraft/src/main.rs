//! Generate per-platform social media posts from the command line.
//!
//! Reads the API key from the `GEMINI_API_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # One platform, neutral tone
//! postcraft --text "We just launched dark mode" --platform Twitter
//!
//! # Several platforms with a tone
//! postcraft --text "Hiring two backend engineers" \
//!   --platform Linkedin --platform Instagram --tone Professional
//!
//! # Pipe the raw text from stdin
//! cat notes.md | postcraft --stdin --platform Linkedin
//! ```

use std::io::{self, Read};
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use postcraft::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Generate per-platform social media posts with Gemini.
#[derive(Parser)]
#[command(name = "postcraft")]
struct Cli {
    /// Raw text to turn into posts
    #[arg(long)]
    text: Option<String>,

    /// Read the raw text from stdin
    #[arg(long)]
    stdin: bool,

    /// Target platform (Linkedin, Instagram, Twitter); repeatable
    #[arg(long = "platform")]
    platforms: Vec<Platform>,

    /// Post tone (Professional, Casual, Funny, Inspirational)
    #[arg(long)]
    tone: Option<Tone>,

    /// Gemini model
    #[arg(long)]
    model: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Print the generated text as returned instead of per-platform blocks
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let raw_text = if cli.stdin {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("Error: failed to read stdin: {e}");
            process::exit(1);
        }
        buf
    } else {
        cli.text.unwrap_or_default()
    };

    let mut config = GeminiConfig::from_env().with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let client = match GeminiClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let session = Arc::new(Mutex::new(FormSession::default()));
    let request = PostRequest::new(raw_text, cli.platforms, cli.tone);

    let outcome = match submit(&session, &client, &LoggingObserver, request).await {
        Ok(outcome) => outcome,
        Err(rejected) => {
            eprintln!("{rejected}");
            process::exit(2);
        }
    };

    if outcome.failed {
        eprintln!("{}", outcome.result);
        process::exit(1);
    }

    if cli.raw {
        println!("{}", outcome.result);
        return;
    }

    let blocks = outcome.blocks();
    if blocks.is_empty() {
        eprintln!("No posts were generated.");
        return;
    }
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            println!("\n---\n");
        }
        println!("{block}");
    }
}
