//! Engine tunables.
//!
//! # Responsibility
//! - Group every layout/color/history constant the engine depends on.
//! - Provide documented defaults matching the reference presentation.
//!
//! # Invariants
//! - Palettes are non-empty; lookup cycles by index modulo palette length.
//! - Angular values are stored in degrees and converted at use sites.

use serde::{Deserialize, Serialize};

const DEFAULT_LEVEL_SPACING_X: f64 = 220.0;
const DEFAULT_LEVEL_SPACING_Y: f64 = 120.0;
const DEFAULT_SIBLING_SPACING: f64 = 90.0;
const DEFAULT_LAYOUT_MARGIN: f64 = 40.0;
const DEFAULT_RADIAL_BASE_RADIUS: f64 = 180.0;
const DEFAULT_RADIAL_RADIUS_STEP: f64 = 140.0;
const DEFAULT_RADIAL_DEEP_OFFSET: f64 = 30.0;
const DEFAULT_HUB_SPREAD_DEGREES: f64 = 90.0;
const DEFAULT_SHALLOW_SPREAD_DEGREES: f64 = 60.0;
const DEFAULT_DEEP_SPREAD_DEGREES: f64 = 45.0;
const DEFAULT_SIBLING_JITTER_DEGREES: f64 = 3.0;
const DEFAULT_TIMELINE_RANK_SPACING: f64 = 160.0;
const DEFAULT_TIMELINE_LEVEL_OFFSET: f64 = 40.0;
const DEFAULT_HISTORY_CAPACITY: usize = 100;
const DEFAULT_FONT_SIZE: f64 = 14.0;
const DEFAULT_BODY_WIDTH: f64 = 160.0;
const DEFAULT_LIGHTEN_PER_DEPTH: f64 = 0.125;
const DEFAULT_LIGHTEN_CAP: f64 = 0.55;

/// All engine tunables in one overridable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Depth-axis spacing between levels (tree layout, parse x step).
    pub level_spacing_x: f64,
    /// Vertical spacing between levels (parse y step).
    pub level_spacing_y: f64,
    /// Cross-axis spacing between leaf slots in the tree layout.
    pub sibling_spacing: f64,
    /// Minimum x/y after the final positive-quadrant shift.
    pub layout_margin: f64,
    /// Radial distance of depth-1 nodes from the hub.
    pub radial_base_radius: f64,
    /// Radial distance added per depth level past 1.
    pub radial_radius_step: f64,
    /// Extra radial offset applied once for depth > 1.
    pub radial_deep_offset: f64,
    /// Total angular spread of one hub hemisphere, in degrees.
    pub hub_spread_degrees: f64,
    /// Child spread for nodes at depth <= 1, in degrees.
    pub shallow_spread_degrees: f64,
    /// Child spread for nodes at depth > 1, in degrees.
    pub deep_spread_degrees: f64,
    /// Deterministic per-sibling angular jitter, in degrees.
    pub sibling_jitter_degrees: f64,
    /// Horizontal spacing per rank in the timeline layout.
    pub timeline_rank_spacing: f64,
    /// Vertical offset per level in the timeline layout.
    pub timeline_level_offset: f64,
    /// Maximum retained history snapshots; oldest evicted first.
    pub history_capacity: usize,
    /// Default label font size applied by normalization.
    pub default_font_size: f64,
    /// Default node body width applied by normalization.
    pub default_body_width: f64,
    /// Branch color palette, cycled in branch-root discovery order.
    pub branch_palette: Vec<String>,
    /// Level accent palette, cycled by node level during normalization.
    pub level_palette: Vec<String>,
    /// Lightening added per depth step inside a branch.
    pub lighten_per_depth: f64,
    /// Saturation cap for depth lightening.
    pub lighten_cap: f64,
    /// When false, derived branch colors are computed but not applied to
    /// node display colors.
    pub colored_branches: bool,
    /// When true, incoming edges are tinted with the branch color.
    pub tint_edges: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level_spacing_x: DEFAULT_LEVEL_SPACING_X,
            level_spacing_y: DEFAULT_LEVEL_SPACING_Y,
            sibling_spacing: DEFAULT_SIBLING_SPACING,
            layout_margin: DEFAULT_LAYOUT_MARGIN,
            radial_base_radius: DEFAULT_RADIAL_BASE_RADIUS,
            radial_radius_step: DEFAULT_RADIAL_RADIUS_STEP,
            radial_deep_offset: DEFAULT_RADIAL_DEEP_OFFSET,
            hub_spread_degrees: DEFAULT_HUB_SPREAD_DEGREES,
            shallow_spread_degrees: DEFAULT_SHALLOW_SPREAD_DEGREES,
            deep_spread_degrees: DEFAULT_DEEP_SPREAD_DEGREES,
            sibling_jitter_degrees: DEFAULT_SIBLING_JITTER_DEGREES,
            timeline_rank_spacing: DEFAULT_TIMELINE_RANK_SPACING,
            timeline_level_offset: DEFAULT_TIMELINE_LEVEL_OFFSET,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_font_size: DEFAULT_FONT_SIZE,
            default_body_width: DEFAULT_BODY_WIDTH,
            branch_palette: default_branch_palette(),
            level_palette: default_level_palette(),
            lighten_per_depth: DEFAULT_LIGHTEN_PER_DEPTH,
            lighten_cap: DEFAULT_LIGHTEN_CAP,
            colored_branches: true,
            tint_edges: true,
        }
    }
}

impl EngineConfig {
    /// Level accent color for a 1-based level, cycling through the palette.
    pub fn level_accent(&self, level: u32) -> &str {
        let index = level.saturating_sub(1) as usize % self.level_palette.len().max(1);
        self.level_palette
            .get(index)
            .map(String::as_str)
            .unwrap_or("#888888")
    }

    /// Branch palette color for a 0-based discovery index.
    pub fn branch_color(&self, index: usize) -> &str {
        self.branch_palette
            .get(index % self.branch_palette.len().max(1))
            .map(String::as_str)
            .unwrap_or("#888888")
    }
}

fn default_branch_palette() -> Vec<String> {
    [
        "#e63946", "#f4a261", "#2a9d8f", "#457b9d", "#8e44ad", "#d4a017",
        "#e76f51", "#1d7874",
    ]
    .iter()
    .map(|c| (*c).to_string())
    .collect()
}

fn default_level_palette() -> Vec<String> {
    ["#1d3557", "#457b9d", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"]
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}
