//! `notepub publish` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use notepub_config::{CliSettings, Config};
use notepub_notion::error::Rejection;
use notepub_notion::types::CreatedPage;
use notepub_notion::{ApiToken, NotionError, PageRequest, Publisher, Transport};

use crate::document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Target database ID (overrides config).
    #[arg(long)]
    database_id: Option<String>,

    /// Notion integration token (overrides config; prompts when absent).
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Validate and summarize the page without sending it.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover notepub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading, credential validation, or the
    /// request fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            database_id: self.database_id,
            token: self.token,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let notion = &config.notion;

        let request = document::analysis_page(&notion.database_id);

        if self.dry_run {
            request.validate().map_err(NotionError::from)?;
            print_dry_run_result(&output, &request);
            return Ok(());
        }

        let timeout = Duration::from_secs(notion.timeout_secs);
        publish_with(
            &request,
            notion.token.as_deref(),
            &output,
            prompt_token,
            |token| Publisher::from_config(&notion.base_url, &notion.api_version, token, timeout),
        )?;

        Ok(())
    }
}

/// Resolve the credential, then publish `request` through the publisher built by `connect`.
///
/// `connect` is only called once the token has passed validation, so an
/// invalid token never results in a network call.
fn publish_with<T, P, C>(
    request: &PageRequest,
    configured_token: Option<&str>,
    output: &Output,
    prompt: P,
    connect: C,
) -> Result<CreatedPage, CliError>
where
    T: Transport,
    P: FnOnce() -> io::Result<String>,
    C: FnOnce(ApiToken) -> Publisher<T>,
{
    let token = resolve_token(configured_token, prompt).inspect_err(|err| {
        if matches!(err, CliError::Credential(_)) {
            output.error(&format!(
                "Token format is invalid; it should start with {}",
                notepub_notion::TOKEN_PREFIXES.join(" or ")
            ));
        }
    })?;

    output.field("Target database", request.database_id());
    output.field("Using token", &token.masked());
    output.info("\nCreating page...");

    let publisher = connect(token);
    match publisher.publish(request) {
        Ok(page) => {
            print_success(output, request, &page);
            Ok(page)
        }
        Err(err) => {
            print_failure(output, &err);
            Err(err.into())
        }
    }
}

/// Use the configured token, or ask for one when none is configured.
fn resolve_token<P>(configured: Option<&str>, prompt: P) -> Result<ApiToken, CliError>
where
    P: FnOnce() -> io::Result<String>,
{
    let raw = match configured {
        Some(token) if !token.trim().is_empty() => token.to_owned(),
        _ => prompt()?,
    };
    Ok(ApiToken::parse(&raw)?)
}

/// Read a token from stdin.
fn prompt_token() -> io::Result<String> {
    let mut stdout = io::stdout();
    writeln!(stdout, "Enter your Notion integration token:")?;
    write!(stdout, "Token (secret_...): ")?;
    stdout.flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    Ok(token.trim().to_owned())
}

fn print_dry_run_result(output: &Output, request: &PageRequest) {
    output.banner("\n[DRY RUN] Nothing sent.");
    if let Some(title) = request.title() {
        output.field("Title", &title);
    }
    output.field("Database ID", request.database_id());
    output.field("Blocks", &request.children.len().to_string());
    output.success("Payload is within API limits.");
}

/// Shown for page fields missing from a successful response.
const NOT_RETURNED: &str = "(not returned)";

fn print_success(output: &Output, request: &PageRequest, page: &CreatedPage) {
    output.rule();
    output.success("Page created successfully!");
    output.rule();
    output.field("URL", page.url.as_deref().unwrap_or(NOT_RETURNED));
    output.field("ID", page.id.as_deref().unwrap_or(NOT_RETURNED));
    output.field("Database ID", request.database_id());
    output.info("\nPage contents:");
    output.bullets(document::SUMMARY.iter().copied());
}

fn print_failure(output: &Output, err: &NotionError) {
    output.error("\nPage creation failed");

    if let NotionError::Rejected {
        status,
        api: Some(api),
        ..
    } = err
    {
        output.warning(&format!("{status} {}: {}", api.code, api.message));
    }

    let hints: &[&str] = match err.rejection() {
        Some(Rejection::Unauthorized) => &["Check that the token is correct and not revoked."],
        Some(Rejection::Forbidden | Rejection::NotFound) => &[
            "Check that the integration is shared with the database.",
            "Check that the database ID is correct.",
        ],
        Some(Rejection::Validation) => {
            &["Check that the database has a title property named \"Name\"."]
        }
        Some(Rejection::RateLimited) => &["Rate limited; wait before running again."],
        Some(_) => &[],
        None => match err {
            NotionError::Transport(_) => &["Check network connectivity to the Notion API."],
            _ => &[],
        },
    };

    if !hints.is_empty() {
        output.info("Please check:");
        output.numbered(hints.iter().copied());
    }
}
