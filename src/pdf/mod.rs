pub(crate) mod layout;
pub(crate) mod table;

use chrono::{Datelike, NaiveDateTime, Timelike};
use pdf_writer::{Date, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::fonts::{FontStyle, register_fonts};

use layout::{PageChrome, PageFlow, PageGeometry};

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const ORANGE: Rgb = Rgb(255, 140, 0);
    pub const GRAY: Rgb = Rgb(100, 100, 100);
    pub const STEEL_BLUE: Rgb = Rgb(70, 130, 180);
    pub const LIGHT_GRAY: Rgb = Rgb(220, 220, 220);
    pub const LIGHT_BLUE: Rgb = Rgb(200, 220, 255);
}

/// A string drawn on a page. Positions are in points from the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub font_size: f32,
    pub style: FontStyle,
    pub color: Rgb,
}

/// What was drawn on one page, recorded alongside the content stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedPage {
    /// 1-based page number.
    pub number: usize,
    pub texts: Vec<PlacedText>,
    /// Stroked rectangles (table cell borders).
    pub rules: usize,
    /// Filled rectangles (banners, header rows).
    pub fills: usize,
}

impl RenderedPage {
    /// Visual lines of the page: texts sharing a baseline joined by a space.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<(f32, String)> = Vec::new();
        for t in &self.texts {
            match lines.last_mut() {
                Some((baseline, line)) if (*baseline - t.baseline).abs() < 0.5 => {
                    line.push(' ');
                    line.push_str(&t.text);
                }
                _ => lines.push((t.baseline, t.text.clone())),
            }
        }
        lines.into_iter().map(|(_, line)| line).collect()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// The first placed text containing `needle`.
    pub fn find(&self, needle: &str) -> Option<&PlacedText> {
        self.texts.iter().find(|t| t.text.contains(needle))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.find(needle).is_some()
    }
}

pub(crate) struct DocumentInfo<'a> {
    pub(crate) title: &'a str,
    pub(crate) created: NaiveDateTime,
    pub(crate) compress: bool,
}

const PRODUCER: &str = concat!("loan-report-pdf ", env!("CARGO_PKG_VERSION"));

fn pdf_date(at: &NaiveDateTime) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
}

/// Lay out a document with `body` and serialize it.
///
/// The page flow owns pagination: `chrome` is invoked for every page the
/// body's content spills onto. Returns the PDF bytes and the per-page record.
pub(crate) fn write_document(
    info: &DocumentInfo<'_>,
    chrome: &dyn PageChrome,
    body: impl FnOnce(&mut PageFlow<'_>),
) -> (Vec<u8>, Vec<RenderedPage>) {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let fonts = register_fonts(&mut pdf, &mut alloc);

    // Phase 1: lay out content into per-page streams
    let geometry = PageGeometry::a4();
    let mut flow = PageFlow::new(geometry, &fonts, chrome);
    body(&mut flow);
    let pages = flow.finish();
    let t_layout = t0.elapsed();

    // Phase 2: allocate page and content IDs now that page count is known
    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let info_id = alloc();

    let mut records = Vec::with_capacity(n);
    for (i, page) in pages.into_iter().enumerate() {
        let raw = page.content.finish();
        if info.compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[i], raw.as_slice());
        }
        records.push(page.record);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let font_pairs: Vec<(String, Ref)> = fonts
        .iter()
        .map(|entry| (entry.pdf_name.clone(), entry.font_ref))
        .collect();

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    pdf.document_info(info_id)
        .title(TextStr(info.title))
        .producer(TextStr(PRODUCER))
        .creation_date(pdf_date(&info.created));

    let bytes = pdf.finish();
    log::info!(
        "Document: pages={}, layout={:.1}ms, total={:.1}ms, {} bytes",
        n,
        t_layout.as_secs_f64() * 1000.0,
        t0.elapsed().as_secs_f64() * 1000.0,
        bytes.len(),
    );

    (bytes, records)
}
