use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunables for both the layout-reconstruction and the zone-placement path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Human-readable name, shown by `gridcast config list`.
    pub name: String,
    pub description: Option<String>,
    /// Vertical distance (pt) within which tokens share a row.
    pub row_tolerance: f64,
    pub row_clustering: RowClustering,
    /// Minimum horizontal distance (pt) between two column boundaries.
    pub column_gap: f64,
    /// Width ratio at or above which a table spans the full canvas.
    pub full_width_threshold: f64,
    pub zones: ZoneConfig,
    pub canvas: CanvasConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name: "default".into(),
            description: None,
            row_tolerance: 3.0,
            row_clustering: RowClustering::default(),
            column_gap: 10.0,
            full_width_threshold: 0.55,
            zones: ZoneConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowClustering {
    /// Join the first row whose running mean `top` is within tolerance.
    #[default]
    RunningMean,
    /// Cut a new row where consecutive sorted `top` values differ by more than tolerance.
    GapCut,
}

impl fmt::Display for RowClustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowClustering::RunningMean => write!(f, "running mean"),
            RowClustering::GapCut => write!(f, "gap cut"),
        }
    }
}

/// How a narrow table is assigned to a side-by-side zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMapping {
    /// `< 1/3` left, `< 2/3` center, else right. Requires exactly three zones.
    Thirds,
    /// `floor(x0 / page_width * count)`, clamped to the last zone.
    #[default]
    Proportional,
    /// Every table is placed full-width, one below the other.
    Stacked,
}

impl fmt::Display for ZoneMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneMapping::Thirds => write!(f, "thirds"),
            ZoneMapping::Proportional => write!(f, "proportional"),
            ZoneMapping::Stacked => write!(f, "stacked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub count: usize,
    pub mapping: ZoneMapping,
    /// 1-based canvas column where each zone starts. May be shorter than `count`.
    pub start_columns: Vec<u32>,
    /// Column step for zones past the last listed start column.
    pub default_stride: u32,
    /// Blank rows left between two tables stacked in the same zone.
    pub spacing_rows: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            count: 3,
            mapping: ZoneMapping::default(),
            start_columns: vec![1, 8, 15],
            default_stride: 7,
            spacing_rows: 1,
        }
    }
}

impl ZoneConfig {
    /// Start column of side zone `index`.
    ///
    /// Zones past the end of `start_columns` continue from the last listed
    /// start in steps of `default_stride`, or from column 1 when none is listed.
    pub fn start_column(&self, index: usize) -> u32 {
        if let Some(&start) = self.start_columns.get(index) {
            return start;
        }
        match self.start_columns.last() {
            Some(&last) => {
                let steps = (index + 1 - self.start_columns.len()) as u32;
                last.saturating_add(steps.saturating_mul(self.default_stride))
            }
            None => (index as u32)
                .saturating_mul(self.default_stride)
                .saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width_policy: WidthPolicy,
}

/// Column sizing applied after a page has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidthPolicy {
    /// Width follows the inferred column slot: `max(min_width, extent / pixels_per_char)`.
    SlotExtent { pixels_per_char: f64, min_width: f64 },
    /// Same width for every used column.
    Fixed { width: f64 },
    /// Width follows the longest text in the column: `max(min_width, len * factor)`.
    Autofit { min_width: f64, factor: f64 },
}

impl Default for WidthPolicy {
    fn default() -> Self {
        WidthPolicy::SlotExtent {
            pixels_per_char: 7.0,
            min_width: 3.0,
        }
    }
}

impl fmt::Display for WidthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthPolicy::SlotExtent {
                pixels_per_char,
                min_width,
            } => write!(
                f,
                "slot extent / {pixels_per_char} (min {min_width})"
            ),
            WidthPolicy::Fixed { width } => write!(f, "fixed {width}"),
            WidthPolicy::Autofit { min_width, factor } => {
                write!(f, "autofit x{factor} (min {min_width})")
            }
        }
    }
}
