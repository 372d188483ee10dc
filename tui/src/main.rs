use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use issueboard_core::{GiteaClient, GiteaSettings, RemoteIssueClient};
use issueboard_tui::ScrollableList;
use issueboard_tui::TodoWidget;
use issueboard_tui::cli::Cli;
use issueboard_tui::logging::init_file_logging;
use issueboard_tui::markup;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let _log_guard = match cli.resolve_log_dir() {
        Some(dir) => Some(init_file_logging(&dir)?),
        None => None,
    };

    let settings = cli.config_loader().load()?;
    tracing::info!(domain = %settings.domain, page_size = settings.page_size, "starting issueboard");

    let client: Arc<dyn RemoteIssueClient> = Arc::new(GiteaClient::from_settings(&settings)?);

    if cli.once {
        return print_once(settings, client);
    }
    issueboard_tui::app::run(settings, client)
}

/// Refresh a single time and write the panel to stdout without markup.
fn print_once(settings: GiteaSettings, client: Arc<dyn RemoteIssueClient>) -> color_eyre::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let list = ScrollableList::new(settings.colors.clone());
    let mut widget = TodoWidget::new(client, list, settings);
    runtime.block_on(widget.refresh());

    let content = widget.content();
    let body = if content.is_error {
        content.body
    } else {
        markup::to_plain(&content.body)
    };

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", content.title)?;
    write!(out, "{body}")?;
    if !body.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
