//! Page chrome: the title banner and page-number footer drawn on every page,
//! and the section banners and labeled fields that give the body its shape.

use crate::fonts::FontStyle;
use crate::pdf::Rgb;
use crate::pdf::layout::{Align, Cell, PageChrome, PageFlow, cell_padding, mm};

pub(super) struct ReportChrome<'t> {
    title: &'t str,
}

impl<'t> ReportChrome<'t> {
    pub(super) fn new(title: &'t str) -> Self {
        Self { title }
    }
}

impl PageChrome for ReportChrome<'_> {
    fn header(&self, flow: &mut PageFlow<'_>) {
        flow.set_font(FontStyle::Bold, 16.0);
        let mut banner = flow.text_color(Rgb::BLACK);
        banner.multi_cell_aligned(0.0, mm(10.0), self.title, Align::Center);
        banner.ln(mm(5.0));
    }

    fn footer(&self, flow: &mut PageFlow<'_>) {
        let footer_top = flow.geometry().height - mm(15.0);
        flow.set_y(footer_top);
        flow.set_font(FontStyle::Italic, 8.0);
        let label = format!("Page {}", flow.page_number());
        let mut footer = flow.text_color(Rgb::BLACK);
        footer.cell(0.0, mm(10.0), &label, Cell::inline().align(Align::Center));
    }
}

/// Full-width filled banner opening a section.
pub(super) fn section_title(flow: &mut PageFlow<'_>, title: &str) {
    flow.set_font(FontStyle::Bold, 14.0);
    // keep the banner with at least one line of its section
    flow.ensure_room(mm(10.0 + 3.0 + 8.0));
    log::debug!("Section {title:?} on page {}", flow.page_number());
    let mut banner = flow.text_color(Rgb::WHITE);
    banner.cell(0.0, mm(10.0), title, Cell::line().fill(Rgb::STEEL_BLUE));
    drop(banner);
    flow.ln(mm(3.0));
}

const LABEL_WIDTH_MM: f32 = 70.0;
const FIELD_HEIGHT_MM: f32 = 7.0;

/// `Label:` in bold in a fixed column, the value wrapped beside it.
pub(super) fn add_field(flow: &mut PageFlow<'_>, label: &str, value: &str) {
    flow.ensure_room(mm(FIELD_HEIGHT_MM));
    flow.set_font(FontStyle::Bold, 10.0);
    let label = format!("{label}:");
    // long labels push the value column right rather than overlapping it
    let label_w = mm(LABEL_WIDTH_MM).max(flow.text_width(&label) + 2.0 * cell_padding());
    flow.cell(label_w, mm(FIELD_HEIGHT_MM), &label, Cell::inline());
    flow.set_font(FontStyle::Regular, 10.0);
    flow.multi_cell(0.0, mm(FIELD_HEIGHT_MM), value);
}
