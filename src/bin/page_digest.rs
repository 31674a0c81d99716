//! Command-line front end: analyze a URL or a saved HTML file and print JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use page_digest::encoding::transcode_to_utf8;
use page_digest::{Analyzer, OpenAiCompatEnhancer, Options};

#[derive(Debug, Parser)]
#[command(name = "page-digest", version, about = "Summarize a web page and rank its keywords")]
struct Cli {
    /// Page to fetch and analyze.
    #[arg(value_name = "URL", required_unless_present = "file", conflicts_with = "file")]
    target: Option<String>,

    /// Analyze a saved HTML file instead of fetching.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// URL the saved file came from, used for platform detection.
    #[arg(long = "url", value_name = "URL", requires = "file")]
    source_url: Option<String>,

    #[arg(long, env = "PAGE_DIGEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, env = "PAGE_DIGEST_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,

    #[arg(long, env = "PAGE_DIGEST_MAX_KEYWORDS")]
    max_keywords: Option<usize>,

    #[arg(long, env = "PAGE_DIGEST_MIN_KEYWORD_FREQUENCY")]
    min_keyword_frequency: Option<usize>,

    #[arg(long, env = "PAGE_DIGEST_USER_AGENT")]
    user_agent: Option<String>,

    /// Replace the heuristic summary using the model endpoint in
    /// PAGE_DIGEST_LLM_BASE_URL.
    #[arg(long)]
    enhance: bool,

    /// Print metadata and fetch details along with the analysis.
    #[arg(long, conflicts_with = "file")]
    report: bool,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_body_bytes: self.max_body_bytes.unwrap_or(defaults.max_body_bytes),
            max_keywords: self.max_keywords.unwrap_or(defaults.max_keywords),
            min_keyword_frequency: self
                .min_keyword_frequency
                .unwrap_or(defaults.min_keyword_frequency),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            ..defaults
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

async fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut analyzer = Analyzer::with_options(cli.options())?;
    if cli.enhance {
        let enhancer = OpenAiCompatEnhancer::from_env(analyzer.client().clone())?;
        analyzer = analyzer.with_enhancer(Arc::new(enhancer));
    }

    if let Some(path) = &cli.file {
        let bytes = std::fs::read(path)?;
        let html = transcode_to_utf8(&bytes, None);
        let url = cli.source_url.as_deref().unwrap_or_default();
        let analysis = analyzer.analyze_html_enhanced(&html, url).await;
        return Ok(to_json(&analysis, cli.pretty)?);
    }

    let url = cli.target.as_deref().unwrap_or_default();
    if cli.report {
        let report = analyzer.analyze_detailed(url).await?;
        Ok(to_json(&report, cli.pretty)?)
    } else {
        let analysis = analyzer.analyze(url).await?;
        Ok(to_json(&analysis, cli.pretty)?)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("page-digest: {e}");
            ExitCode::FAILURE
        }
    }
}
