//! Glyph metrics table
//!
//! Maps characters to the pixel width and left bearing of their cell in a
//! fixed-cell bitmap font atlas. The table is built once, either by scanning
//! the atlas image or from precomputed values, and is read-only afterwards.

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Errors that can occur while building a metrics table
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to open or decode the atlas image
    #[error("Failed to load atlas image: {0}")]
    Image(#[from] image::ImageError),

    /// Atlas image size does not match the configured cell grid
    #[error("Atlas is {actual_width}x{actual_height}px, layout expects {expected_width}x{expected_height}px")]
    DimensionMismatch {
        /// Width implied by the layout
        expected_width: u32,
        /// Height implied by the layout
        expected_height: u32,
        /// Width of the supplied image
        actual_width: u32,
        /// Height of the supplied image
        actual_height: u32,
    },

    /// More populated characters than cells on the sheet
    #[error("Atlas layout declares {total} characters but only has {cells} cells")]
    TooManyCharacters {
        /// Declared character count
        total: usize,
        /// Cells available on the sheet
        cells: usize,
    },

    /// A table without any glyphs cannot render dialogue
    #[error("Glyph metrics table is empty")]
    Empty,
}

/// Width and left bearing of a single atlas cell, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlyphMetric {
    /// Distance between the first and last opaque column, inclusive
    pub width: i32,
    /// Column of the first opaque pixel inside the cell
    pub start_offset: i32,
}

impl GlyphMetric {
    /// Create a new metric
    pub const fn new(width: i32, start_offset: i32) -> Self {
        Self { width, start_offset }
    }
}

/// Highest ordinal covered by the atlas
const MAX_ORDINAL: u32 = 126;

/// Map a character to its atlas cell index.
///
/// Printable ASCII only: lowercase letters share the uppercase cells, the
/// backtick has no cell, and `{|}~` follow the `[\]^_` block.
pub fn char_index(ch: char) -> Option<usize> {
    let ordinal = u32::from(ch);
    let index = match ordinal {
        0..=31 => return None,
        96 => return None,
        o if o > MAX_ORDINAL => return None,
        o if o > 122 => o - 59,
        o if o > 96 => o - 64,
        o => o - 32,
    };
    usize::try_from(index).ok()
}

/// Cell grid of a bitmap font atlas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasLayout {
    /// Cells per row
    pub sheet_width: u32,
    /// Rows of cells
    pub sheet_height: u32,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Populated cells, counted row-major from the bottom row upward
    pub total_characters: usize,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            sheet_width: 10,
            sheet_height: 7,
            cell_width: 16,
            cell_height: 16,
            total_characters: 68,
        }
    }
}

impl AtlasLayout {
    /// Number of cells on the sheet
    pub const fn cell_count(&self) -> usize {
        (self.sheet_width as usize) * (self.sheet_height as usize)
    }

    /// Atlas image size implied by the grid
    pub const fn pixel_size(&self) -> (u32, u32) {
        (self.sheet_width * self.cell_width, self.sheet_height * self.cell_height)
    }

    /// Top-left pixel of a cell in image coordinates (rows run top-down)
    pub fn cell_origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.total_characters || index >= self.cell_count() || self.sheet_width == 0 {
            return None;
        }
        let index = u32::try_from(index).ok()?;
        let column = index % self.sheet_width;
        let row_from_bottom = index / self.sheet_width;
        let row_from_top = self.sheet_height - 1 - row_from_bottom;
        Some((column * self.cell_width, row_from_top * self.cell_height))
    }

    /// Validate the grid
    pub fn validate(&self) -> Result<(), String> {
        if self.sheet_width == 0 || self.sheet_height == 0 {
            return Err("Atlas sheet must have at least one cell".to_string());
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err("Atlas cells must be at least one pixel".to_string());
        }
        if self.total_characters == 0 || self.total_characters > self.cell_count() {
            return Err(format!(
                "Atlas total_characters must be in 1..={}, got {}",
                self.cell_count(),
                self.total_characters
            ));
        }
        Ok(())
    }
}

/// Read-only lookup from character to [`GlyphMetric`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMetricsTable {
    metrics: Vec<GlyphMetric>,
}

impl GlyphMetricsTable {
    /// Wrap a precomputed table indexed by [`char_index`]
    pub fn from_metrics(metrics: Vec<GlyphMetric>) -> MetricsResult<Self> {
        if metrics.is_empty() {
            return Err(MetricsError::Empty);
        }
        Ok(Self { metrics })
    }

    /// Uniform table where every cell has the same width and no bearing
    pub fn monospace(width: i32, count: usize) -> MetricsResult<Self> {
        Self::from_metrics(vec![GlyphMetric::new(width, 0); count])
    }

    /// Open a PNG atlas and scan it
    pub fn load_atlas(path: impl AsRef<Path>, layout: &AtlasLayout) -> MetricsResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        log::info!("Loaded glyph atlas {} ({}x{})", path.display(), image.width(), image.height());
        Self::from_atlas(&image, layout)
    }

    /// Measure every populated cell of an atlas image.
    ///
    /// A cell's metric spans its first and last column containing a pixel
    /// with non-zero alpha. Fully transparent cells measure `{0, 0}`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_atlas(image: &RgbaImage, layout: &AtlasLayout) -> MetricsResult<Self> {
        let (expected_width, expected_height) = layout.pixel_size();
        if image.width() != expected_width || image.height() != expected_height {
            return Err(MetricsError::DimensionMismatch {
                expected_width,
                expected_height,
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }
        if layout.total_characters > layout.cell_count() {
            return Err(MetricsError::TooManyCharacters {
                total: layout.total_characters,
                cells: layout.cell_count(),
            });
        }

        let mut metrics = Vec::with_capacity(layout.total_characters);
        for index in 0..layout.total_characters {
            let Some((origin_x, origin_y)) = layout.cell_origin(index) else {
                break;
            };

            let opaque_column = |column: u32| {
                (0..layout.cell_height)
                    .any(|row| image.get_pixel(origin_x + column, origin_y + row)[3] > 0)
            };
            let first = (0..layout.cell_width).find(|&c| opaque_column(c));
            let last = (0..layout.cell_width).rev().find(|&c| opaque_column(c));

            let metric = match (first, last) {
                (Some(first), Some(last)) => GlyphMetric::new((last - first + 1) as i32, first as i32),
                _ => GlyphMetric::default(),
            };
            metrics.push(metric);
        }

        log::info!("Glyph metrics table built: {} cells", metrics.len());
        Self::from_metrics(metrics)
    }

    /// Metric for a character, or `None` when it cannot be rendered
    pub fn metrics_for(&self, ch: char) -> Option<GlyphMetric> {
        char_index(ch).and_then(|index| self.metrics.get(index).copied())
    }

    /// Number of cells in the table
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the table has no cells
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
