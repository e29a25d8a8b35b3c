pub mod canvas;
pub mod config;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod placement;

use rayon::prelude::*;
use serde::Serialize;

use canvas::writer::CanvasWriter;
use canvas::{CellRef, MemoryCanvas};
use config::schema::LayoutConfig;
use error::GridError;
use extraction::PageExtractor;
use layout::grid::Grid;
use model::{PageTables, PageTokens};
use placement::PlacementResult;

/// One page after layout reconstruction.
#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    pub page_number: usize,
    pub grid: Grid,
    pub canvas: MemoryCanvas,
}

/// One page after zone placement.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedPage {
    pub page_number: usize,
    pub placements: Vec<PlacementResult>,
    pub canvas: MemoryCanvas,
}

/// Main API entry point: rebuild a grid for every page of a PDF.
pub fn reconstruct_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PageExtractor,
    config: &LayoutConfig,
) -> Result<Vec<PageLayout>, GridError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted pages"
    );
    Ok(reconstruct_pages(&pages, config))
}

/// Rebuild a grid for each page and write it to its own canvas at A1.
///
/// Pages share nothing, so they are processed in parallel; the output keeps
/// input order.
pub fn reconstruct_pages(pages: &[PageTokens], config: &LayoutConfig) -> Vec<PageLayout> {
    pages
        .par_iter()
        .map(|page| {
            let grid = layout::reconstruct_page(page, config);
            let mut canvas = MemoryCanvas::new();
            let mut writer = CanvasWriter::new(&mut canvas);
            writer.write_grid(&grid, CellRef::new(1, 1));
            writer.finish(&config.canvas.width_policy);
            PageLayout {
                page_number: page.page_number,
                grid,
                canvas,
            }
        })
        .collect()
}

/// Place each page's tables on its own canvas, one zone registry per page.
pub fn place_pages(pages: &[PageTables], config: &LayoutConfig) -> Vec<PlacedPage> {
    pages
        .par_iter()
        .map(|page| {
            let mut canvas = MemoryCanvas::new();
            let placements = placement::place_page(page, config, &mut canvas);
            PlacedPage {
                page_number: page.page_number,
                placements,
                canvas,
            }
        })
        .collect()
}
