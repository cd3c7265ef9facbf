//! Declarative shape masks.
//!
//! A mask is a list of row bands. Inside a band, cells left of `min_x` or
//! right of `max_x` are blocked, which is enough to carve a coarse outline
//! (a state border, a building footprint) out of the rectangle.

use serde::{Deserialize, Serialize};

use super::{Cell, ObstacleSet};

/// Rows `y_start..y_end` keep only `min_x..=max_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowBand {
    /// First row of the band.
    #[serde(default)]
    pub y_start: i32,
    /// One past the last row; open-ended when absent.
    #[serde(default)]
    pub y_end: Option<i32>,
    /// Cells with `x < min_x` are blocked.
    #[serde(default)]
    pub min_x: Option<i32>,
    /// Cells with `x > max_x` are blocked.
    #[serde(default)]
    pub max_x: Option<i32>,
}

impl RowBand {
    #[must_use]
    pub const fn new(y_start: i32, y_end: Option<i32>, min_x: Option<i32>, max_x: Option<i32>) -> Self {
        Self {
            y_start,
            y_end,
            min_x,
            max_x,
        }
    }

    fn covers_row(&self, y: i32) -> bool {
        y >= self.y_start && self.y_end.map_or(true, |end| y < end)
    }

    fn blocks(&self, cell: Cell) -> bool {
        self.covers_row(cell.y)
            && (self.min_x.is_some_and(|min| cell.x < min)
                || self.max_x.is_some_and(|max| cell.x > max))
    }
}

/// Built-in outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskPreset {
    /// Rough Texas outline on a 60×50 domain.
    Texas,
}

impl MaskPreset {
    /// Bands making up the preset.
    #[must_use]
    pub fn bands(self) -> Vec<RowBand> {
        match self {
            Self::Texas => vec![
                RowBand::new(0, Some(10), Some(15), Some(45)),
                RowBand::new(10, Some(20), Some(10), Some(50)),
                RowBand::new(20, Some(30), Some(5), Some(55)),
                RowBand::new(30, Some(40), Some(8), Some(52)),
                RowBand::new(40, None, Some(20), None),
            ],
        }
    }
}

/// Union of row bands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMask {
    pub bands: Vec<RowBand>,
}

impl ShapeMask {
    #[must_use]
    pub fn new(bands: Vec<RowBand>) -> Self {
        Self { bands }
    }

    #[must_use]
    pub fn preset(preset: MaskPreset) -> Self {
        Self::new(preset.bands())
    }

    /// True if any band blocks `cell`.
    #[must_use]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.bands.iter().any(|band| band.blocks(cell))
    }

    /// Every blocked cell inside `width × height`.
    #[must_use]
    pub fn blocked_cells(&self, width: i32, height: i32) -> ObstacleSet {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
            .filter(|&cell| self.is_blocked(cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_blocks_outside_range() {
        let band = RowBand::new(2, Some(4), Some(1), Some(3));
        assert!(band.blocks(Cell::new(0, 2)));
        assert!(band.blocks(Cell::new(4, 3)));
        assert!(!band.blocks(Cell::new(1, 2)));
        assert!(!band.blocks(Cell::new(3, 3)));
        // outside the rows
        assert!(!band.blocks(Cell::new(0, 4)));
        assert!(!band.blocks(Cell::new(0, 1)));
    }

    #[test]
    fn test_open_ended_band() {
        let band = RowBand::new(5, None, Some(2), None);
        assert!(band.blocks(Cell::new(1, 1000)));
        assert!(!band.blocks(Cell::new(500, 1000)));
    }

    #[test]
    fn test_texas_preset() {
        let mask = ShapeMask::preset(MaskPreset::Texas);
        assert!(mask.is_blocked(Cell::new(0, 0)));
        assert!(mask.is_blocked(Cell::new(46, 5)));
        assert!(!mask.is_blocked(Cell::new(15, 5)));
        assert!(mask.is_blocked(Cell::new(19, 45)));
        assert!(!mask.is_blocked(Cell::new(59, 45)));
        // El Paso and Houston are open
        assert!(!mask.is_blocked(Cell::new(10, 35)));
        assert!(!mask.is_blocked(Cell::new(40, 25)));
    }

    #[test]
    fn test_blocked_cells_count() {
        let mask = ShapeMask::new(vec![RowBand::new(0, Some(1), Some(1), Some(2))]);
        let blocked = mask.blocked_cells(4, 2);
        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains(&Cell::new(0, 0)));
        assert!(blocked.contains(&Cell::new(3, 0)));
    }

    #[test]
    fn test_preset_yaml_name() {
        let preset: MaskPreset = serde_yaml::from_str("texas").unwrap();
        assert_eq!(preset, MaskPreset::Texas);
    }
}
