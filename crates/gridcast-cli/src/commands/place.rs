use gridcast_core::config::builtin::DEFAULT_PLACEMENT_PRESET;
use gridcast_core::error::GridError;
use gridcast_core::extraction::load_table_pages;
use std::path::PathBuf;

use crate::commands::{is_json, resolve_config};
use crate::output;

pub fn run(
    input_file: PathBuf,
    config: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
    key_values: bool,
) -> Result<(), GridError> {
    if !is_json(&input_file) {
        return Err(GridError::InputLoad {
            path: input_file,
            reason: "expected a JSON table stream (.json)".into(),
        });
    }

    let config = resolve_config(config, preset, DEFAULT_PLACEMENT_PRESET)?;
    let pages = load_table_pages(&input_file)?;

    if key_values {
        match output_format {
            "json" => {
                let records: Vec<_> = pages
                    .iter()
                    .flat_map(|p| p.tables.iter().map(|t| t.key_value_rows()))
                    .collect();
                output::json::print(&records)?;
            }
            _ => output::table::print_key_values(&pages),
        }
        return Ok(());
    }

    let placed = gridcast_core::place_pages(&pages, &config);

    match output_file {
        Some(path) => {
            output::json::write(&path, &placed)?;
            let tables: usize = placed.iter().map(|p| p.placements.len()).sum();
            eprintln!(
                "Placed {} table(s) on {} page(s), written to {}",
                tables,
                placed.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&placed)?,
            _ => output::table::print_placed(&placed, config.zones.count),
        },
    }

    Ok(())
}
