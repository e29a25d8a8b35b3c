use gridcast_core::config::builtin::DEFAULT_RECONSTRUCTION_PRESET;
use gridcast_core::error::GridError;
use gridcast_core::extraction::load_token_pages;
use gridcast_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::commands::{is_json, resolve_config};
use crate::output;

pub fn run(
    input_file: PathBuf,
    config: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), GridError> {
    let config = resolve_config(config, preset, DEFAULT_RECONSTRUCTION_PRESET)?;

    let layouts = if is_json(&input_file) {
        let pages = load_token_pages(&input_file)?;
        gridcast_core::reconstruct_pages(&pages, &config)
    } else {
        let pdf_bytes = std::fs::read(&input_file)?;
        let extractor = PdftotextExtractor::new();
        gridcast_core::reconstruct_pdf(&pdf_bytes, &extractor, &config)?
    };

    match output_file {
        Some(path) => {
            output::json::write(&path, &layouts)?;
            eprintln!(
                "Reconstructed {} page(s), written to {}",
                layouts.len(),
                path.display()
            );
            let empty = layouts.iter().filter(|l| l.grid.is_empty()).count();
            if empty > 0 {
                eprintln!("  {} page(s) had no usable words", empty);
            }
        }
        None => match output_format {
            "json" => output::json::print(&layouts)?,
            _ => output::table::print_layouts(&layouts),
        },
    }

    Ok(())
}
