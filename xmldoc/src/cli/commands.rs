use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::document::Document;
use crate::errors::XmlError;
use crate::loader::parse_file;
use crate::tree_display::TreeDisplay;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }
    _parse(&settings)
}

/// Settings from config files and environment, overridden by flags.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = apply_flags(cli, Settings::load()?);
    debug!(?settings, "resolved settings");
    Ok(settings)
}

fn apply_flags(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(file) = &cli.file {
        settings.source_file = file.clone();
    }
    if cli.tree {
        settings.render_tree = true;
    }
    settings
}

/// Writes the `XML error:` line for parse failures; other errors go to stderr.
pub fn report_error(out: &mut impl Write, err: &CliError) {
    if err.is_parse_error() {
        if let Err(e) = output::failure(out, "XML error", err) {
            output::error(&e);
        }
    } else {
        output::error(err);
    }
}

#[instrument(skip(settings), fields(file = %settings.source_file.display()))]
fn _parse(settings: &Settings) -> CliResult<()> {
    let doc = parse_file(&settings.source_file)?;
    report(&mut io::stdout().lock(), &doc, settings.render_tree)
        .map_err(|e| XmlError::io("Failed to write report", e))?;
    Ok(())
}

fn report(out: &mut impl Write, doc: &Document, render_tree: bool) -> io::Result<()> {
    if let Some(version) = doc.version() {
        output::action(out, "XML version", &version)?;
    }
    if render_tree {
        output::plain(out, &doc.tree().to_tree_string())?;
    }
    Ok(())
}
