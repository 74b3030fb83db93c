use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use react2ts::migrate_source;
use react2ts::options::Options;

/// Migrates React component classes written in JavaScript to TypeScript.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The files to migrate.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the result next to each input (`.ts` stays `.ts`, anything else becomes `.tsx`)
    /// instead of printing it.
    #[arg(long)]
    write: bool,

    /// Also treat classes extending a base type containing this name as components.
    #[arg(long = "marker", value_name = "NAME")]
    markers: Vec<String>,

    /// Do not declare the instance fields of classes.
    #[arg(long)]
    skip_instance_fields: bool,
}

/// Installs a stderr subscriber filtered by `REACT2TS_LOG`, falling back to `RUST_LOG`.
/// Nothing is installed when neither is set.
fn init_tracing() {
    let filter = match std::env::var("REACT2TS_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_path(input: &Path) -> PathBuf {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("ts") => input.to_path_buf(),
        _ => input.with_extension("tsx"),
    }
}

fn migrate_file(path: &Path, options: &Options, write: bool) -> anyhow::Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let migrated = migrate_source(&path.to_string_lossy(), &source, options)?;

    if write {
        let output = output_path(path);
        fs::write(&output, migrated)
            .with_context(|| format!("cannot write {}", output.display()))?;
        tracing::info!(input = %path.display(), output = %output.display(), "migrated");
    } else {
        print!("{}", migrated);
        tracing::info!(input = %path.display(), "migrated");
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut options = Options::default();
    options.instance_fields = !args.skip_instance_fields;
    for marker in args.markers {
        options = options.with_marker(marker);
    }

    let mut failed = 0;
    for path in &args.files {
        if let Err(e) = migrate_file(path, &options, args.write) {
            tracing::error!(file = %path.display(), error = %e, "migration failed");
            eprintln!("{}: {:#}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_extension() {
        assert_eq!(output_path(Path::new("src/a.jsx")), PathBuf::from("src/a.tsx"));
        assert_eq!(output_path(Path::new("src/a.js")), PathBuf::from("src/a.tsx"));
        assert_eq!(output_path(Path::new("src/a.ts")), PathBuf::from("src/a.ts"));
    }

    #[test]
    fn arguments() {
        let args = Args::parse_from(["react2ts", "--write", "--marker", "Widget", "a.js", "b.jsx"]);
        assert!(args.write);
        assert_eq!(args.markers, ["Widget"]);
        assert_eq!(args.files.len(), 2);
        assert!(!args.skip_instance_fields);
    }
}
