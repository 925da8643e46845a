//! Parse command - extract fields from a single transcript file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use kontrakt_core::RecordBuilder;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Transcript file (e.g. data/output/scan_001/result.txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Transcript is empty: {}", args.input.display());
    }

    let id = document_id(&args.input);
    debug!("Parsing {} as {}", args.input.display(), id);

    let doc = RecordBuilder::new()
        .with_preview_lines(config.output.preview_lines)
        .parse(&id, &text);

    let json = if args.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{}", json);

    Ok(())
}

/// Documents are named after the folder holding their transcript.
fn document_id(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .or_else(|| path.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_folder_name() {
        assert_eq!(document_id(Path::new("data/output/scan_001/result.txt")), "scan_001");
        assert_eq!(document_id(Path::new("/result.txt")), "result");
    }
}
