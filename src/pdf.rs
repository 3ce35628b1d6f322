//! Calendar PDF rendering and export
//!
//! Renders the two-column table produced by [`crate::calendar`] into an A4
//! document: optional heading, shaded header row, thin cell borders, and
//! multi-line task cells. Rendering happens fully in memory; the export
//! entry points either return the document bytes (for hosts that trigger a
//! browser download themselves) or write them to a file under a
//! caller-supplied or default name.

use crate::calendar::{self, TasksByDate};
use crate::config::{ExportConfig, FontFace};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};
use std::path::{Path, PathBuf};

/// Default filename for a full-collection export
pub const DEFAULT_FULL_FILENAME: &str = "calendar.pdf";

/// Default filename for a month-scoped export
pub const DEFAULT_MONTH_FILENAME: &str = "month-calendar.pdf";

const PT_TO_MM: f32 = 25.4 / 72.0;
const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

/// Vertical padding inside a cell, in points
const CELL_PADDING_PT: f32 = 4.0;
/// Horizontal text inset inside a cell, in points
const CELL_INSET_PT: f32 = 4.0;
/// Line height as a multiple of the font size
const LINE_SPACING: f32 = 1.4;
/// Gap between the heading and the table, in points
const TITLE_GAP_PT: f32 = 10.0;

/// Export the full task collection as a PDF file.
///
/// `title` becomes the document heading (pass an empty string for none).
/// Returns the path written, defaulting to [`DEFAULT_FULL_FILENAME`] in the
/// current directory when `path` is `None`.
pub fn export_calendar_pdf(
    tasks_by_date: &TasksByDate,
    title: &str,
    path: Option<&Path>,
    config: &ExportConfig,
) -> Result<PathBuf> {
    let bytes = export_calendar_pdf_bytes(tasks_by_date, title, config)?;
    write_pdf(bytes, path, DEFAULT_FULL_FILENAME)
}

/// Export the month of `reference` as a PDF file.
///
/// The heading is derived from the reference date
/// ([`calendar::month_title`]). Returns the path written, defaulting to
/// [`DEFAULT_MONTH_FILENAME`] when `path` is `None`.
pub fn export_month_calendar_pdf(
    tasks_by_date: &TasksByDate,
    reference: NaiveDate,
    path: Option<&Path>,
    config: &ExportConfig,
) -> Result<PathBuf> {
    let bytes = export_month_calendar_pdf_bytes(tasks_by_date, reference, config)?;
    write_pdf(bytes, path, DEFAULT_MONTH_FILENAME)
}

/// Render the full task collection and return the document bytes.
pub fn export_calendar_pdf_bytes(
    tasks_by_date: &TasksByDate,
    title: &str,
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let table = calendar::build_table(tasks_by_date);
    render_table_pdf(title, &table, config)
}

/// Render the month of `reference` and return the document bytes.
pub fn export_month_calendar_pdf_bytes(
    tasks_by_date: &TasksByDate,
    reference: NaiveDate,
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let table = calendar::build_month_table(tasks_by_date, reference);
    render_table_pdf(&calendar::month_title(reference), &table, config)
}

/// Render a two-column table (header row first) into a finished PDF.
///
/// Rows that would cross the bottom margin start a new page; a row taller
/// than a whole page is split and its remaining lines continue on the next
/// page. A header-only table renders as a valid single-row document.
pub fn render_table_pdf(
    title: &str,
    table: &[[String; 2]],
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "calendar export",
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "content",
    );
    let normal = doc
        .add_builtin_font(builtin(config.font.normal))
        .map_err(|e| Error::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(builtin(config.font.bold))
        .map_err(|e| Error::Pdf(e.to_string()))?;

    let geometry = Geometry::new(config);
    let mut layer = doc.get_page(page).get_layer(layer);
    prepare_layer(&layer, config);

    let mut y = A4_HEIGHT_MM - geometry.margin;

    if !title.is_empty() {
        y -= config.title_size_pt * PT_TO_MM;
        layer.use_text(title, config.title_size_pt, Mm(geometry.margin), Mm(y), &bold);
        y -= TITLE_GAP_PT * PT_TO_MM;
    }

    let page_top = A4_HEIGHT_MM - geometry.margin;
    let fresh_capacity = geometry.lines_that_fit(page_top - geometry.margin);

    for (index, row) in table.iter().enumerate() {
        let is_header = index == 0;
        let lines_left: Vec<&str> = row[0].split('\n').collect();
        let lines_right: Vec<&str> = row[1].split('\n').collect();
        let total_lines = lines_left.len().max(lines_right.len());
        let mut offset = 0;

        // A row taller than the space left on the page is split: as many
        // lines as fit are drawn with their borders, the rest continue on
        // the next page.
        while offset < total_lines {
            let remaining = total_lines - offset;
            let capacity = geometry.lines_that_fit(y - geometry.margin);

            // Break to a fresh page when it would fit more of this row than
            // the space left here. A page break never repeats from the top
            // of a page, and at least one line is placed per segment, so the
            // loop makes progress even under a degenerate geometry.
            if capacity < remaining.min(fresh_capacity.max(1)) && y < page_top {
                let (next_page, next_layer) =
                    doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "content");
                layer = doc.get_page(next_page).get_layer(next_layer);
                prepare_layer(&layer, config);
                y = page_top;
                continue;
            }

            let take = remaining.min(capacity.max(1));
            let segment_height = geometry.row_height(take);

            if is_header {
                layer.set_fill_color(Color::Rgb(Rgb::new(
                    config.header_fill[0],
                    config.header_fill[1],
                    config.header_fill[2],
                    None,
                )));
                fill_rect(&layer, geometry.x0, y, geometry.x2 - geometry.x0, segment_height);
                layer.set_fill_color(black());
            }

            let font = if is_header { &bold } else { &normal };
            let segment_left = segment(&lines_left, offset, take);
            let segment_right = segment(&lines_right, offset, take);
            draw_cell_text(&layer, &geometry, config, segment_left, geometry.x0, y, font);
            draw_cell_text(&layer, &geometry, config, segment_right, geometry.x1, y, font);

            stroke_rect(&layer, geometry.x0, y, geometry.x1 - geometry.x0, segment_height);
            stroke_rect(&layer, geometry.x1, y, geometry.x2 - geometry.x1, segment_height);

            y -= segment_height;
            offset += take;
        }
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}

/// Page and table geometry in millimeters, derived once per document
struct Geometry {
    margin: f32,
    x0: f32,
    x1: f32,
    x2: f32,
    padding: f32,
    inset: f32,
    line_height: f32,
    font_height: f32,
}

impl Geometry {
    fn new(config: &ExportConfig) -> Self {
        let margin = config.margin_pt * PT_TO_MM;
        let x0 = margin;
        let x1 = x0 + config.date_column_width_pt * PT_TO_MM;
        let x2 = A4_WIDTH_MM - margin;
        Self {
            margin,
            x0,
            x1,
            x2,
            padding: CELL_PADDING_PT * PT_TO_MM,
            inset: CELL_INSET_PT * PT_TO_MM,
            line_height: config.font_size_pt * LINE_SPACING * PT_TO_MM,
            font_height: config.font_size_pt * PT_TO_MM,
        }
    }

    fn row_height(&self, lines: usize) -> f32 {
        2.0 * self.padding + lines as f32 * self.line_height
    }

    /// Number of text lines a row segment can hold in `available` vertical
    /// millimeters, after cell padding.
    fn lines_that_fit(&self, available: f32) -> usize {
        let usable = available - 2.0 * self.padding;
        if usable <= 0.0 {
            0
        } else {
            (usable / self.line_height) as usize
        }
    }
}

/// The `take` lines of a cell starting at `offset`. Cells shorter than the
/// row's tallest cell run out of lines early and contribute empty segments.
fn segment<'a>(lines: &'a [&'a str], offset: usize, take: usize) -> &'a [&'a str] {
    if offset >= lines.len() {
        return &[];
    }
    &lines[offset..(offset + take).min(lines.len())]
}

fn draw_cell_text(
    layer: &PdfLayerReference,
    geometry: &Geometry,
    config: &ExportConfig,
    lines: &[&str],
    x: f32,
    y_top: f32,
    font: &IndirectFontRef,
) {
    let mut baseline = y_top - geometry.padding - geometry.font_height;
    for line in lines {
        if !line.is_empty() {
            layer.use_text(
                *line,
                config.font_size_pt,
                Mm(x + geometry.inset),
                Mm(baseline),
                font,
            );
        }
        baseline -= geometry.line_height;
    }
}

fn prepare_layer(layer: &PdfLayerReference, config: &ExportConfig) {
    layer.set_outline_thickness(config.border_width_pt);
    layer.set_outline_color(black());
    layer.set_fill_color(black());
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn rect_ring(x: f32, y_top: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y_top)), false),
        (Point::new(Mm(x + width), Mm(y_top)), false),
        (Point::new(Mm(x + width), Mm(y_top - height)), false),
        (Point::new(Mm(x), Mm(y_top - height)), false),
    ]
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, y_top: f32, width: f32, height: f32) {
    layer.add_polygon(Polygon {
        rings: vec![rect_ring(x, y_top, width, height)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y_top: f32, width: f32, height: f32) {
    layer.add_polygon(Polygon {
        rings: vec![rect_ring(x, y_top, width, height)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn builtin(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Helvetica => BuiltinFont::Helvetica,
        FontFace::HelveticaBold => BuiltinFont::HelveticaBold,
        FontFace::HelveticaOblique => BuiltinFont::HelveticaOblique,
        FontFace::TimesRoman => BuiltinFont::TimesRoman,
        FontFace::TimesBold => BuiltinFont::TimesBold,
        FontFace::Courier => BuiltinFont::Courier,
    }
}

fn write_pdf(bytes: Vec<u8>, path: Option<&Path>, default_name: &str) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), "calendar PDF written");
    Ok(path)
}
