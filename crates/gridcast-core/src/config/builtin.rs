use crate::config::parse_config_str;
use crate::config::schema::LayoutConfig;
use crate::error::GridError;

const AUTO_ZONE_JSON: &str = include_str!("../../../../presets/auto-zone.json");
const THREE_ZONE_JSON: &str = include_str!("../../../../presets/three-zone.json");
const TWO_ZONE_JSON: &str = include_str!("../../../../presets/two-zone.json");
const STACKED_JSON: &str = include_str!("../../../../presets/stacked.json");
const LAYOUT_JSON: &str = include_str!("../../../../presets/layout.json");

/// Available predefined layout configs.
pub const PRESETS: &[&str] = &["auto-zone", "three-zone", "two-zone", "stacked", "layout"];

/// Preset used for table placement when nothing is specified.
pub const DEFAULT_PLACEMENT_PRESET: &str = "auto-zone";

/// Preset used for layout reconstruction when nothing is specified.
pub const DEFAULT_RECONSTRUCTION_PRESET: &str = "layout";

/// Load a predefined layout config by name.
pub fn load_preset(name: &str) -> Result<LayoutConfig, GridError> {
    let json = match name {
        "auto-zone" => AUTO_ZONE_JSON,
        "three-zone" => THREE_ZONE_JSON,
        "two-zone" => TWO_ZONE_JSON,
        "stacked" => STACKED_JSON,
        "layout" => LAYOUT_JSON,
        _ => {
            return Err(GridError::ConfigInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    parse_config_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{WidthPolicy, ZoneMapping};

    #[test]
    fn test_all_presets_load() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_three_zone_preset() {
        let config = load_preset("three-zone").unwrap();
        assert_eq!(config.zones.mapping, ZoneMapping::Thirds);
        assert_eq!(config.full_width_threshold, 0.6);
        assert_eq!(config.zones.start_columns, vec![1, 8, 15]);
    }

    #[test]
    fn test_two_zone_preset() {
        let config = load_preset("two-zone").unwrap();
        assert_eq!(config.zones.count, 2);
        assert_eq!(config.zones.start_column(1), 16);
        assert_eq!(config.canvas.width_policy, WidthPolicy::Fixed { width: 14.0 });
    }

    #[test]
    fn test_layout_preset_uses_slot_widths() {
        let config = load_preset("layout").unwrap();
        assert_eq!(config.row_tolerance, 3.0);
        assert_eq!(config.column_gap, 10.0);
        assert!(matches!(
            config.canvas.width_policy,
            WidthPolicy::SlotExtent { .. }
        ));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
