//! Page layout: a fixed-line-height cursor over fixed-size pages.
//!
//! The cursor starts at the top margin and moves down one `line_height` per
//! line. When the next line would land below the bottom margin a new page is
//! started. There is no text wrapping: a line wider than the page is clipped by
//! the viewer.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use serde::{Deserialize, Serialize};

/// Font resource names registered by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// Page dimensions and text metrics, all in PDF points.
///
/// Default: A4 portrait, 50pt margins, 11pt text on a 14pt line grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin_left: 50.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            font_size: 11.0,
            line_height: 14.0,
        }
    }
}

impl PageGeometry {
    /// Baseline of the first line on a page.
    pub fn top_y(&self) -> f32 {
        self.height - self.margin_top
    }

    /// Number of lines that fit between the margins (at least one).
    pub fn lines_per_page(&self) -> usize {
        let usable = self.top_y() - self.margin_bottom;
        if usable <= 0.0 || self.line_height <= 0.0 {
            return 1;
        }
        (usable / self.line_height).floor() as usize + 1
    }
}

/// Drawing operations for one page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub operations: Vec<Operation>,
}

/// Stateful cursor: current page plus the line slot on that page.
pub struct PageLayout {
    geometry: PageGeometry,
    capacity: usize,
    finished: Vec<Page>,
    current: Page,
    line_on_page: usize,
}

impl PageLayout {
    pub fn new(geometry: PageGeometry) -> Self {
        let capacity = geometry.lines_per_page();
        Self {
            geometry,
            capacity,
            finished: Vec::new(),
            current: Page::default(),
            line_on_page: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    /// Baseline y of the next line.
    pub fn cursor_y(&self) -> f32 {
        self.geometry.top_y() - self.line_on_page as f32 * self.geometry.line_height
    }

    pub fn remaining_lines(&self) -> usize {
        self.capacity.saturating_sub(self.line_on_page)
    }

    /// Starts a new page when the current one has no room for `lines` more.
    pub fn new_page_if_needed(&mut self, lines: usize) {
        if self.line_on_page > 0 && self.remaining_lines() < lines.max(1) {
            self.start_page();
        }
    }

    pub fn start_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
        self.line_on_page = 0;
    }

    /// Writes one line at the left margin, breaking the page first if needed.
    pub fn write_line(&mut self, text: &str, font: Font, size: f32) {
        self.new_page_if_needed(1);
        self.draw_line(text, font, size, 0.0);
    }

    /// Writes one line without a page-break check. Lines past the bottom
    /// margin are drawn below it.
    pub fn write_line_unchecked(&mut self, text: &str, font: Font, size: f32, indent: f32) {
        self.draw_line(text, font, size, indent);
    }

    /// Moves the cursor down without drawing.
    pub fn advance(&mut self, lines: usize) {
        self.line_on_page += lines;
    }

    pub fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }

    fn draw_line(&mut self, text: &str, font: Font, size: f32, indent: f32) {
        let x = self.geometry.margin_left + indent;
        let y = self.cursor_y();
        if !text.is_empty() {
            self.current.operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
                Operation::new("Td", vec![x.into(), y.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]);
        }
        self.line_on_page += 1;
    }
}

/// Encodes text for the standard Type1 fonts. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (' '..='~').contains(&c) => c as u8,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
