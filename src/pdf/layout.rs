use std::ops::{Deref, DerefMut};

use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontSet, FontStyle, is_winansi, to_winansi_bytes};

use super::{PlacedText, RenderedPage, Rgb};

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

pub(crate) fn mm(v: f32) -> f32 {
    v * MM
}

/// Horizontal padding inside a cell, on each side.
pub(crate) fn cell_padding() -> f32 {
    mm(1.0)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PageGeometry {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) margin_left: f32,
    pub(crate) margin_top: f32,
    pub(crate) margin_right: f32,
    /// Distance from the bottom edge at which content breaks to a new page.
    pub(crate) break_margin: f32,
}

impl PageGeometry {
    pub(crate) fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_left: mm(10.0),
            margin_top: mm(10.0),
            margin_right: mm(10.0),
            break_margin: mm(15.0),
        }
    }

    fn break_line(&self) -> f32 {
        self.height - self.break_margin
    }
}

/// Drawn by the flow itself whenever a page is opened or closed.
pub(crate) trait PageChrome {
    fn header(&self, flow: &mut PageFlow<'_>);
    fn footer(&self, flow: &mut PageFlow<'_>);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

/// How a single line box is drawn and where the cursor goes afterwards.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cell {
    pub(crate) align: Align,
    pub(crate) fill: Option<Rgb>,
    pub(crate) line_break: bool,
}

impl Cell {
    pub(crate) fn inline() -> Self {
        Self {
            align: Align::Left,
            fill: None,
            line_break: false,
        }
    }

    pub(crate) fn line() -> Self {
        Self {
            line_break: true,
            ..Self::inline()
        }
    }

    pub(crate) fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }
}

pub(crate) struct PageBuffer {
    pub(crate) content: Content,
    pub(crate) record: RenderedPage,
}

impl PageBuffer {
    fn new(number: usize) -> Self {
        Self {
            content: Content::new(),
            record: RenderedPage {
                number,
                ..RenderedPage::default()
            },
        }
    }
}

/// Top-down cursor over a sequence of pages.
///
/// Coordinates handed to and returned from the flow are measured from the
/// top-left corner of the page; conversion to PDF user space (origin at the
/// bottom-left) happens only when drawing.
pub(crate) struct PageFlow<'a> {
    geometry: PageGeometry,
    fonts: &'a FontSet,
    chrome: &'a dyn PageChrome,
    finished: Vec<PageBuffer>,
    page: PageBuffer,
    x: f32,
    y: f32,
    font: FontStyle,
    font_size: f32,
    color: Rgb,
    auto_break: bool,
}

impl<'a> PageFlow<'a> {
    pub(crate) fn new(geometry: PageGeometry, fonts: &'a FontSet, chrome: &'a dyn PageChrome) -> Self {
        let mut flow = Self {
            geometry,
            fonts,
            chrome,
            finished: Vec::new(),
            page: PageBuffer::new(1),
            x: geometry.margin_left,
            y: geometry.margin_top,
            font: FontStyle::Regular,
            font_size: 10.0,
            color: Rgb::BLACK,
            auto_break: true,
        };
        flow.run_chrome(|chrome, flow| chrome.header(flow));
        flow
    }

    pub(crate) fn page_number(&self) -> usize {
        self.page.record.number
    }

    pub(crate) fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub(crate) fn x(&self) -> f32 {
        self.x
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn set_y(&mut self, y: f32) {
        self.x = self.geometry.margin_left;
        self.y = y;
    }

    pub(crate) fn set_font(&mut self, style: FontStyle, size: f32) {
        self.font = style;
        self.font_size = size;
    }

    pub(crate) fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Set the text color until the returned guard is dropped.
    pub(crate) fn text_color(&mut self, color: Rgb) -> ColorScope<'_, 'a> {
        let previous = std::mem::replace(&mut self.color, color);
        ColorScope {
            flow: self,
            previous,
        }
    }

    /// Width of `text` in the current font.
    pub(crate) fn text_width(&self, text: &str) -> f32 {
        self.text_width_in(text, self.font, self.font_size)
    }

    pub(crate) fn text_width_in(&self, text: &str, style: FontStyle, size: f32) -> f32 {
        self.fonts.get(style).text_width(text, size)
    }

    /// Width left between the cursor and the right margin.
    pub(crate) fn remaining_width(&self) -> f32 {
        self.geometry.width - self.geometry.margin_right - self.x
    }

    /// Move to the left margin, `h` points further down.
    pub(crate) fn ln(&mut self, h: f32) {
        self.x = self.geometry.margin_left;
        self.y += h;
    }

    /// Indent the cursor without drawing anything.
    pub(crate) fn skip(&mut self, w: f32) {
        self.x += w;
    }

    /// Start a new page if a box of height `h` would cross the break line.
    pub(crate) fn ensure_room(&mut self, h: f32) {
        if self.auto_break && self.y + h > self.geometry.break_line() {
            self.page_break();
        }
    }

    /// One line box at the cursor. A width of 0 extends to the right margin.
    pub(crate) fn cell(&mut self, w: f32, h: f32, text: &str, cell: Cell) {
        self.ensure_room(h);
        let w = if w == 0.0 { self.remaining_width() } else { w };
        let (x, y) = (self.x, self.y);

        if let Some(fill) = cell.fill {
            self.fill_rect(x, y, w, h, fill);
        }
        if !text.is_empty() {
            let text_x = aligned_x(x, w, self.text_width(text), cell.align);
            self.put_text(text_x, baseline(y, h, self.font_size), text);
        }

        if cell.line_break {
            self.ln(h);
        } else {
            self.x += w;
        }
    }

    /// Wrapped text in lines of height `h`, each starting at the current x.
    /// The cursor ends at the left margin below the last line.
    pub(crate) fn multi_cell(&mut self, w: f32, h: f32, text: &str) {
        self.multi_cell_aligned(w, h, text, Align::Left);
    }

    /// [`multi_cell`](Self::multi_cell) with every line aligned within `w`.
    pub(crate) fn multi_cell_aligned(&mut self, w: f32, h: f32, text: &str, align: Align) {
        let w = if w == 0.0 { self.remaining_width() } else { w };
        let start_x = self.x;
        let lines = self.wrap(text, w - 2.0 * cell_padding());
        for line in &lines {
            self.x = start_x;
            self.cell(w, h, line, Cell::line().align(align));
        }
    }

    /// Break `text` into lines no wider than `max_width` in the current font.
    pub(crate) fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        wrap_text(text, max_width, |s| self.text_width(s))
    }

    pub(crate) fn put_text(&mut self, x: f32, baseline: f32, text: &str) {
        if !is_winansi(text) {
            log::warn!("Text outside WinAnsi rendered with substitutes: {text:?}");
        }
        let entry = self.fonts.get(self.font);
        let Rgb(r, g, b) = self.color;
        let content = &mut self.page.content;
        content.begin_text();
        content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.set_font(Name(entry.pdf_name.as_bytes()), self.font_size);
        content.next_line(x, self.geometry.height - baseline);
        content.show(Str(&to_winansi_bytes(text)));
        content.end_text();

        self.page.record.texts.push(PlacedText {
            text: text.to_string(),
            x,
            baseline,
            font_size: self.font_size,
            style: self.font,
            color: self.color,
        });
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let Rgb(r, g, b) = color;
        let content = &mut self.page.content;
        content.save_state();
        content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.rect(x, self.geometry.height - y - h, w, h);
        content.fill_nonzero();
        content.restore_state();
        self.page.record.fills += 1;
    }

    pub(crate) fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let content = &mut self.page.content;
        content.save_state();
        content.set_line_width(mm(0.2));
        content.set_stroke_gray(0.0);
        content.rect(x, self.geometry.height - y - h, w, h);
        content.stroke();
        content.restore_state();
        self.page.record.rules += 1;
    }

    fn page_break(&mut self) {
        let x = self.x;
        log::debug!("Page break after page {} at y={:.1}", self.page_number(), self.y);
        self.close_page();
        let number = self.finished.len() + 1;
        self.page = PageBuffer::new(number);
        self.y = self.geometry.margin_top;
        self.run_chrome(|chrome, flow| chrome.header(flow));
        self.x = x;
    }

    fn close_page(&mut self) {
        self.run_chrome(|chrome, flow| chrome.footer(flow));
        let page = std::mem::replace(&mut self.page, PageBuffer::new(0));
        self.finished.push(page);
    }

    /// Chrome drawing never breaks the page and must not disturb the font
    /// and color of the content around it.
    fn run_chrome(&mut self, draw: impl FnOnce(&dyn PageChrome, &mut Self)) {
        let saved = (self.font, self.font_size, self.color);
        let chrome = self.chrome;
        self.auto_break = false;
        draw(chrome, self);
        self.auto_break = true;
        (self.font, self.font_size, self.color) = saved;
    }

    /// Close the last page and hand back every page in order.
    pub(crate) fn finish(mut self) -> Vec<PageBuffer> {
        self.close_page();
        self.finished
    }
}

/// Restores the previous text color when dropped.
pub(crate) struct ColorScope<'s, 'a> {
    flow: &'s mut PageFlow<'a>,
    previous: Rgb,
}

impl<'a> Deref for ColorScope<'_, 'a> {
    type Target = PageFlow<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.flow
    }
}

impl DerefMut for ColorScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.flow
    }
}

impl Drop for ColorScope<'_, '_> {
    fn drop(&mut self) {
        self.flow.color = self.previous;
    }
}

pub(crate) fn aligned_x(x: f32, w: f32, text_w: f32, align: Align) -> f32 {
    match align {
        Align::Left => x + cell_padding(),
        Align::Center => x + (w - text_w) / 2.0,
        Align::Right => x + w - cell_padding() - text_w,
    }
}

/// Baseline that vertically centers a line of `font_size` in a box of height `h`.
pub(crate) fn baseline(y: f32, h: f32, font_size: f32) -> f32 {
    y + 0.5 * h + 0.3 * font_size
}

/// Greedy word wrap. Explicit newlines always break; a word wider than a
/// whole line is split between characters. Returns at least one line.
pub(crate) fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                current.push(ch);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }

    lines
}
