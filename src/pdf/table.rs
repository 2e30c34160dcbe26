use crate::fonts::FontStyle;

use super::Rgb;
use super::layout::{Align, PageFlow, aligned_x, baseline, cell_padding, mm, wrap_text};

pub(crate) struct Column {
    pub(crate) header: &'static str,
    /// Width in millimetres.
    pub(crate) width: f32,
    pub(crate) align: Align,
}

impl Column {
    pub(crate) const fn new(header: &'static str, width: f32, align: Align) -> Self {
        Self {
            header,
            width,
            align,
        }
    }
}

pub(crate) struct TableStyle {
    pub(crate) header_fill: Rgb,
    pub(crate) header_font_size: f32,
    pub(crate) header_height: f32,
    pub(crate) body_font_size: f32,
    pub(crate) row_height: f32,
}

struct RowLayout {
    height: f32,
    cell_lines: Vec<Vec<String>>,
}

/// Extra height per wrapped line beyond the first, relative to the font size.
const LINE_PITCH: f32 = 1.25;

fn layout_row(
    flow: &PageFlow<'_>,
    columns: &[Column],
    cells: &[String],
    style: FontStyle,
    font_size: f32,
    min_height: f32,
) -> RowLayout {
    let cell_lines: Vec<Vec<String>> = columns
        .iter()
        .zip(cells)
        .map(|(col, text)| {
            let text_w = (mm(col.width) - 2.0 * cell_padding()).max(0.0);
            wrap_text(text, text_w, |s| flow.text_width_in(s, style, font_size))
        })
        .collect();
    let max_lines = cell_lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
    RowLayout {
        height: min_height + (max_lines - 1) as f32 * font_size * LINE_PITCH,
        cell_lines,
    }
}

fn draw_row(
    flow: &mut PageFlow<'_>,
    columns: &[Column],
    layout: &RowLayout,
    fill: Option<Rgb>,
    line_height: f32,
    header: bool,
) {
    flow.ensure_room(layout.height);
    let row_top = flow.y();
    let font_size = flow.font_size();
    let mut cell_x = flow.x();

    for (col, lines) in columns.iter().zip(&layout.cell_lines) {
        let col_w = mm(col.width);
        if let Some(color) = fill {
            flow.fill_rect(cell_x, row_top, col_w, layout.height, color);
        }
        flow.stroke_rect(cell_x, row_top, col_w, layout.height);

        let align = if header { Align::Center } else { col.align };
        let first_baseline = baseline(row_top, line_height, font_size);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let text_x = aligned_x(cell_x, col_w, flow.text_width(line), align);
            flow.put_text(text_x, first_baseline + i as f32 * font_size * LINE_PITCH, line);
        }
        cell_x += col_w;
    }

    flow.ln(layout.height);
}

/// Bordered table with a filled header row. Rows never split across pages:
/// a row that does not fit moves to the next page as a whole.
pub(crate) fn render_table(
    flow: &mut PageFlow<'_>,
    columns: &[Column],
    rows: &[Vec<String>],
    style: &TableStyle,
) {
    let headers: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();

    flow.set_font(FontStyle::Bold, style.header_font_size);
    let header = layout_row(
        flow,
        columns,
        &headers,
        FontStyle::Bold,
        style.header_font_size,
        style.header_height,
    );
    draw_row(flow, columns, &header, Some(style.header_fill), style.header_height, true);

    flow.set_font(FontStyle::Regular, style.body_font_size);
    for (ri, row) in rows.iter().enumerate() {
        let layout = layout_row(
            flow,
            columns,
            row,
            FontStyle::Regular,
            style.body_font_size,
            style.row_height,
        );
        log::debug!(
            "TABLE row={} row_h={:.2} page={} y={:.2}",
            ri,
            layout.height,
            flow.page_number(),
            flow.y()
        );
        draw_row(flow, columns, &layout, None, style.row_height, false);
    }
}
