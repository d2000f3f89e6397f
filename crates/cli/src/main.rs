//! docdata
//!
//! Publishes a data provider tree, described in JSON, as an XML document.

mod config;

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use docdata_provider::DataProvider;
use docdata_publish::{PublishOptions, from_json_file, publish_with_options};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::PublishConfig;

/// Initializes logging on stderr, honouring `RUST_LOG` when set.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("docdata={level},docdata_publish={level}"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Writes the document next to `path` and renames it into place on success,
/// so a failed run never leaves a truncated file behind. The data is synced
/// to disk before the rename.
fn write_atomically(
    tree: &dyn DataProvider,
    path: &Path,
    options: &PublishOptions,
) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    debug!(temp = %temp.path().display(), "Writing to temporary file");

    publish_with_options(tree, BufWriter::new(temp.as_file_mut()), options)?;
    temp.write_all(b"\n")?;
    temp.as_file()
        .sync_all()
        .context("failed to sync the temporary output file")?;

    temp.persist(path)
        .with_context(|| format!("failed to move output into {}", path.display()))?;
    Ok(())
}

fn write_stdout(tree: &dyn DataProvider, options: &PublishOptions) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    publish_with_options(tree, &mut stdout, options)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = PublishConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let output = config
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    info!(
        input = %config.input.display(),
        output = %output,
        indent = config.indent,
        "Publishing data provider tree"
    );

    let tree = from_json_file(&config.input)
        .with_context(|| format!("failed to load {}", config.input.display()))?;

    let options = config.publish_options();
    match &config.output {
        Some(path) => write_atomically(tree.as_ref(), path, &options)
            .with_context(|| format!("failed to publish to {}", path.display()))?,
        None => write_stdout(tree.as_ref(), &options).context("failed to publish to stdout")?,
    }

    info!("Done");
    Ok(())
}
