//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SearchArgs};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::model::Record;
use futures::StreamExt;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search(args) => self.search(args).await,
            Commands::Profile => self.profile().await,
        }
    }

    /// Load configuration from `--config`, or defaults
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display())),
            None => Ok(ClientConfig::default()),
        }
    }

    fn build_client(&self, args: Option<&SearchArgs>) -> Result<Client> {
        let mut builder = Client::builder()
            .config(self.load_config()?)
            .token(self.cli.token.clone().unwrap_or_default());

        if let Some(args) = args {
            builder = builder
                .params(args.to_params())
                .max_results(args.max_results);
        }
        builder.build()
    }

    /// Stream search results to stdout
    ///
    /// Records delivered before a failure stay printed; the failure is then
    /// returned so the process exits non-zero.
    async fn search(&self, args: &SearchArgs) -> Result<()> {
        let client = self.build_client(Some(args))?;
        let start = Instant::now();
        let mut stream = client.search_all();
        let mut stdout = std::io::stdout();

        while let Some(item) = stream.next().await {
            match item {
                Ok(record) => {
                    let line = self.render_record(&record);
                    if writeln!(stdout, "{line}").is_err() {
                        // Broken pipe: stop fetching
                        break;
                    }
                }
                Err(e) => {
                    stdout.flush()?;
                    warn!("Search failed after {} records", stream.received());
                    return Err(e);
                }
            }
        }
        stdout.flush()?;

        let received = stream.received();
        let summary = stream.finish().await?;
        info!(
            "Received {} records in {} pages ({:?}) in {:.2?}",
            received,
            summary.pages_fetched,
            summary.stop_reason,
            start.elapsed()
        );
        Ok(())
    }

    /// Print the account profile
    async fn profile(&self) -> Result<()> {
        let client = self.build_client(None)?;
        if !client.is_authenticated() {
            warn!("No token given; the profile will be anonymous");
        }
        let profile = client.profile().await?;
        println!("{}", self.render_json(&profile));
        Ok(())
    }

    fn render_record(&self, record: &Record) -> String {
        match self.cli.format {
            OutputFormat::Json => self.render_json(record),
            OutputFormat::Pretty => pretty_line(record),
        }
    }

    fn render_json<T: Serialize>(&self, value: &T) -> String {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
            OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
        }
    }
}

/// One readable line per record
fn pretty_line(record: &Record) -> String {
    let mut line = format!(
        "{} {} {}",
        record.updated,
        record.user,
        record.title().unwrap_or(&record.uri)
    );
    if !record.tags.is_empty() {
        line.push_str(&format!(" [{}]", record.tags.join(", ")));
    }
    let quote = record.exact_quote();
    if !quote.is_empty() {
        line.push_str(&format!("\n  > {quote}"));
    }
    if !record.text.is_empty() {
        line.push_str(&format!("\n  {}", record.text));
    }
    line
}
