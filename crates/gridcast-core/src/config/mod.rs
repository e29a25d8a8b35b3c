pub mod builtin;
pub mod schema;

use crate::error::GridError;
use schema::{LayoutConfig, WidthPolicy, ZoneMapping};
use std::path::Path;

/// Load a layout config from a JSON file.
pub fn load_config(path: &Path) -> Result<LayoutConfig, GridError> {
    let content = std::fs::read_to_string(path).map_err(|e| GridError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a layout config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<LayoutConfig, GridError> {
    let config: LayoutConfig = serde_json::from_str(json).map_err(|e| GridError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a layout config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<LayoutConfig, GridError> {
    let config: LayoutConfig = serde_json::from_str(json).map_err(GridError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configs that would make placement or reconstruction ill-defined.
///
/// Runs before any page is processed; nothing downstream re-checks these.
pub fn validate_config(config: &LayoutConfig) -> Result<(), GridError> {
    if !(config.row_tolerance.is_finite() && config.row_tolerance > 0.0) {
        return Err(GridError::ConfigInvalid(format!(
            "row_tolerance must be a positive number (got {})",
            config.row_tolerance
        )));
    }

    if !(config.column_gap.is_finite() && config.column_gap > 0.0) {
        return Err(GridError::ConfigInvalid(format!(
            "column_gap must be a positive number (got {})",
            config.column_gap
        )));
    }

    let threshold = config.full_width_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(GridError::ConfigInvalid(format!(
            "full_width_threshold must be in (0, 1] (got {threshold})"
        )));
    }

    let zones = &config.zones;
    if zones.count < 1 {
        return Err(GridError::ConfigInvalid(
            "zones.count must be at least 1".into(),
        ));
    }

    if zones.mapping == ZoneMapping::Thirds && zones.count != 3 {
        return Err(GridError::ConfigInvalid(format!(
            "zones.mapping 'thirds' requires exactly 3 zones (got {})",
            zones.count
        )));
    }

    if zones.start_columns.iter().any(|&c| c < 1) {
        return Err(GridError::ConfigInvalid(
            "zones.start_columns are 1-based and must be at least 1".into(),
        ));
    }

    if zones.start_columns.windows(2).any(|w| w[1] <= w[0]) {
        return Err(GridError::ConfigInvalid(format!(
            "zones.start_columns must be strictly increasing (got {:?})",
            zones.start_columns
        )));
    }

    if zones.start_columns.len() > zones.count {
        return Err(GridError::ConfigInvalid(format!(
            "zones.start_columns lists {} zones but zones.count is {}",
            zones.start_columns.len(),
            zones.count
        )));
    }

    if zones.default_stride < 1 {
        return Err(GridError::ConfigInvalid(
            "zones.default_stride must be at least 1".into(),
        ));
    }

    let resolved: Vec<u32> = (0..zones.count).map(|i| zones.start_column(i)).collect();
    if resolved.windows(2).any(|w| w[1] <= w[0]) {
        return Err(GridError::ConfigInvalid(format!(
            "zone start columns must be strictly increasing (resolved to {resolved:?})"
        )));
    }

    let positive = |v: f64| v.is_finite() && v > 0.0;
    let widths_ok = match config.canvas.width_policy {
        WidthPolicy::SlotExtent {
            pixels_per_char,
            min_width,
        } => positive(pixels_per_char) && positive(min_width),
        WidthPolicy::Fixed { width } => positive(width),
        WidthPolicy::Autofit { min_width, factor } => positive(min_width) && positive(factor),
    };
    if !widths_ok {
        return Err(GridError::ConfigInvalid(format!(
            "canvas.width_policy values must be positive ({})",
            config.canvas.width_policy
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let json = r#"{ "name": "Test", "row_tolerance": 2.5 }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.name, "Test");
        assert_eq!(config.row_tolerance, 2.5);
        assert_eq!(config.column_gap, 10.0);
        assert_eq!(config.zones.count, 3);
        assert_eq!(config.zones.start_columns, vec![1, 8, 15]);
    }

    #[test]
    fn test_parse_width_policy() {
        let json = r#"{ "canvas": { "width_policy": { "kind": "fixed", "width": 13 } } }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.canvas.width_policy, WidthPolicy::Fixed { width: 13.0 });
    }

    #[test]
    fn test_zero_zones_rejected() {
        let json = r#"{ "zones": { "count": 0, "start_columns": [] } }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(GridError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_thirds_requires_three_zones() {
        let json = r#"{ "zones": { "count": 2, "mapping": "thirds", "start_columns": [1, 16] } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_non_increasing_start_columns_rejected() {
        let json = r#"{ "zones": { "count": 3, "start_columns": [1, 8, 8] } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_short_start_columns_continue_from_last_start() {
        let json = r#"{ "zones": { "count": 3, "start_columns": [1, 30] } }"#;
        let config = parse_config_str(json).unwrap();
        let starts: Vec<u32> = (0..3).map(|i| config.zones.start_column(i)).collect();
        assert_eq!(starts, vec![1, 30, 37]);
    }

    #[test]
    fn test_empty_start_columns_step_from_column_one() {
        let json = r#"{ "zones": { "count": 3, "start_columns": [], "default_stride": 5 } }"#;
        let config = parse_config_str(json).unwrap();
        let starts: Vec<u32> = (0..3).map(|i| config.zones.start_column(i)).collect();
        assert_eq!(starts, vec![1, 6, 11]);
    }

    #[test]
    fn test_overflowing_stride_rejected() {
        let json = r#"{ "zones": { "count": 4, "start_columns": [1], "default_stride": 3000000000 } }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(GridError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(parse_config_str(r#"{ "full_width_threshold": 0 }"#).is_err());
        assert!(parse_config_str(r#"{ "full_width_threshold": 1.5 }"#).is_err());
        assert!(parse_config_str(r#"{ "full_width_threshold": 1.0 }"#).is_ok());
    }

    #[test]
    fn test_non_positive_gap_rejected() {
        assert!(parse_config_str(r#"{ "column_gap": 0 }"#).is_err());
        assert!(parse_config_str(r#"{ "row_tolerance": -1 }"#).is_err());
    }

    #[test]
    fn test_unknown_mapping_is_load_error() {
        let err = parse_config(
            r#"{ "zones": { "mapping": "diagonal" } }"#,
            Path::new("bad.json"),
        )
        .unwrap_err();
        assert!(matches!(err, GridError::ConfigLoad { .. }));
    }
}
