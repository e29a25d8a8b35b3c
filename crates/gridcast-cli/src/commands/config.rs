use gridcast_core::config::builtin;
use gridcast_core::config::schema::{LayoutConfig, WidthPolicy, ZoneMapping};
use gridcast_core::error::GridError;
use std::path::Path;

pub fn list() -> Result<(), GridError> {
    println!("Available predefined layout configs:\n");
    for name in builtin::PRESETS {
        let config = builtin::load_preset(name)?;
        let default_for = match *name {
            builtin::DEFAULT_PLACEMENT_PRESET => " [default for place]",
            builtin::DEFAULT_RECONSTRUCTION_PRESET => " [default for reconstruct]",
            _ => "",
        };
        println!("  {:<11} {}{}", name, config.name, default_for);
        if let Some(ref desc) = config.description {
            println!("              {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), GridError> {
    let config = builtin::load_preset(preset)?;

    println!("{}\n", config.name);
    if let Some(ref desc) = config.description {
        println!("{}\n", desc);
    }
    print_details(&config);
    Ok(())
}

fn print_details(config: &LayoutConfig) {
    println!("Layout reconstruction (gridcast reconstruct):\n");
    println!(
        "  Words whose tops are within {} pt share a row ({} clustering).",
        config.row_tolerance, config.row_clustering
    );
    println!(
        "  Word edges closer than {} pt to the previous column boundary are folded into it.\n",
        config.column_gap
    );

    println!("Zone placement (gridcast place):\n");
    let zones = &config.zones;
    match zones.mapping {
        ZoneMapping::Stacked => {
            println!("  Every table is placed full-width, one below the other.");
        }
        mapping => {
            println!(
                "  Tables at least {:.0}% of the page width are placed full-width,",
                config.full_width_threshold * 100.0
            );
            println!("  below everything placed so far. Narrower tables go to one of");
            println!(
                "  {} side-by-side zones by their left edge ({} mapping):\n",
                zones.count, mapping
            );
            for i in 0..zones.count {
                let id = gridcast_core::placement::ZoneId::Side(i);
                println!(
                    "    {:<8} starts at column {}",
                    id.label(zones.count),
                    gridcast_core::canvas::column_letter(zones.start_column(i))
                );
            }
        }
    }
    println!(
        "\n  {} blank row(s) are left between tables in the same zone.\n",
        zones.spacing_rows
    );

    let policy = &config.canvas.width_policy;
    println!("Column widths: {}", policy);
    if let WidthPolicy::SlotExtent { .. } = policy {
        println!("  (zone placement shares each table's bbox width evenly between its columns)");
    }
    println!();
}

pub fn schema() -> Result<(), GridError> {
    print!(
        r#"JSON Layout Config
==================

A layout config tunes both pipelines. Every field is optional; missing
fields take the defaults shown below.

Top-level fields:
  name                  (string)  Human-readable name
  description           (string)  What this config is for
  row_tolerance         (number)  Max vertical distance (pt) between words
                                  on the same row. Default: 3
  row_clustering        (string)  "running_mean" (default) or "gap_cut"
  column_gap            (number)  Min horizontal distance (pt) between two
                                  column boundaries. Default: 10
  full_width_threshold  (number)  Table width / page width at or above which
                                  a table spans the canvas. In (0, 1].
                                  Default: 0.55
  zones                 (object)  Side-by-side zones (see below)
  canvas                (object)  {{ "width_policy": ... }} (see below)

Zone fields:
  count                 (integer) Number of side zones, >= 1. Default: 3
  mapping               (string)  "proportional" (default), "thirds"
                                  (needs count = 3) or "stacked"
  start_columns         (array)   1-based start column per zone, strictly
                                  increasing. Default: [1, 8, 15]
  default_stride        (integer) Column step for zones past the last
                                  listed start column. Default: 7
  spacing_rows          (integer) Blank rows between stacked tables.
                                  Default: 1

Width policies ("kind" selects one):
  {{ "kind": "slot_extent", "pixels_per_char": 7, "min_width": 3 }}
  {{ "kind": "fixed", "width": 13 }}
  {{ "kind": "autofit", "min_width": 10, "factor": 1.1 }}

Example:
{{
  "name": "Payslip, two columns",
  "full_width_threshold": 0.6,
  "zones": {{
    "count": 2,
    "mapping": "proportional",
    "start_columns": [1, 16],
    "spacing_rows": 1
  }},
  "canvas": {{
    "width_policy": {{ "kind": "fixed", "width": 14 }}
  }}
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), GridError> {
    let config = gridcast_core::config::load_config(file)?;

    println!("Layout config '{}' is valid.", config.name);
    println!(
        "  Zones: {} ({} mapping), threshold {}",
        config.zones.count, config.zones.mapping, config.full_width_threshold
    );
    println!("  Column widths: {}", config.canvas.width_policy);

    // Legal but probably unintended settings.
    let mut warnings = Vec::new();
    if config.zones.start_columns.len() < config.zones.count {
        warnings.push(format!(
            "{} zone(s) have no start column and continue from the last one in steps of {}",
            config.zones.count - config.zones.start_columns.len(),
            config.zones.default_stride
        ));
    }
    if config.zones.mapping == ZoneMapping::Stacked && config.zones.count > 1 {
        warnings.push("stacked mapping only uses the first start column".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
