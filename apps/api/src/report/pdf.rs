//! Draws report blocks onto PDF pages with `printpdf`'s built-in Helvetica.
//!
//! Coordinates are tracked in points from the top of the page and converted
//! to printpdf's bottom-left millimetre space when drawing.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::report::content::{Block, Tone};
use crate::report::layout::{
    line_advance, measure, wrap_text, MARGIN_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT, TEXT_WIDTH_PT,
};
use crate::report::ReportError;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const SUBHEADING_SIZE: f32 = 13.0;
const CALLOUT_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 11.0;

const LAYER_NAME: &str = "Layer 1";

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

struct PageCursor {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge, in points.
    y: f32,
    pages: usize,
}

impl PageCursor {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            mm(PAGE_WIDTH_PT),
            mm(PAGE_HEIGHT_PT),
            LAYER_NAME,
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN_PT,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN_PT;
        self.pages += 1;
    }

    /// Starts a new page if `height` does not fit above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT_PT - MARGIN_PT && self.y > MARGIN_PT {
            self.new_page();
        }
    }

    fn set_tone(&self, tone: Tone) {
        let (r, g, b) = tone.rgb();
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    /// Writes wrapped text; `centered` aligns each line to the page centre.
    fn write(&mut self, text: &str, size: f32, bold: bool, tone: Tone, centered: bool) {
        self.set_tone(tone);
        let advance = line_advance(size);
        for line in wrap_text(text, size, bold, TEXT_WIDTH_PT) {
            self.reserve(advance);
            let x = if centered {
                (PAGE_WIDTH_PT - measure(&line, size, bold)) / 2.0
            } else {
                MARGIN_PT
            };
            // Baseline sits one font-size below the cursor.
            let baseline = PAGE_HEIGHT_PT - (self.y + size);
            let font = if bold { &self.bold } else { &self.regular };
            self.layer
                .use_text(line, size, mm(x.max(MARGIN_PT)), mm(baseline), font);
            self.y += advance;
        }
        self.set_tone(Tone::Default);
    }

    fn space(&mut self, lines: f32) {
        self.y += line_advance(BODY_SIZE) * lines;
    }

    fn draw(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.write(text, TITLE_SIZE, true, Tone::Default, true),
            Block::Centered { text, size, tone } => self.write(text, *size, false, *tone, true),
            Block::Heading(text) => {
                self.reserve(line_advance(HEADING_SIZE) * 2.0);
                self.write(text, HEADING_SIZE, true, Tone::Default, false);
                self.space(0.5);
            }
            Block::SubHeading { text, tone } => {
                self.reserve(line_advance(SUBHEADING_SIZE) * 2.0);
                self.write(text, SUBHEADING_SIZE, true, *tone, false);
                self.space(0.3);
            }
            Block::Callout(text) => {
                self.write("Predicted Role:", SUBHEADING_SIZE, true, Tone::Highlight, false);
                self.write(text, CALLOUT_SIZE, true, Tone::Default, false);
                self.space(1.0);
            }
            Block::Text(text) => self.write(text, BODY_SIZE, false, Tone::Default, false),
            Block::Spacer(lines) => self.space(*lines),
            Block::PageBreak => self.new_page(),
        }
    }

    fn finish(self) -> Result<(Vec<u8>, usize), ReportError> {
        let pages = self.pages;
        let bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        Ok((bytes, pages))
    }
}

/// Renders blocks into PDF bytes, returning the bytes and the page count.
pub fn render_blocks(title: &str, blocks: &[Block]) -> Result<(Vec<u8>, usize), ReportError> {
    let mut cursor = PageCursor::new(title)?;
    for block in blocks {
        cursor.draw(block);
    }
    cursor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let blocks = vec![
            Block::Title("Career Outcome Analysis Report".to_string()),
            Block::Heading("Your Profile".to_string()),
            Block::Text("Degree: Business".to_string()),
        ];
        let (bytes, pages) = render_blocks("test", &blocks).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(pages, 1);
    }

    #[test]
    fn test_page_break_adds_page() {
        let blocks = vec![
            Block::Text("first".to_string()),
            Block::PageBreak,
            Block::Text("second".to_string()),
        ];
        let (_, pages) = render_blocks("test", &blocks).unwrap();
        assert_eq!(pages, 2);
    }

    #[test]
    fn test_overflowing_text_flows_to_next_page() {
        let blocks: Vec<Block> = (0..120)
            .map(|i| Block::Text(format!("Line {i}")))
            .collect();
        let (_, pages) = render_blocks("test", &blocks).unwrap();
        // 692pt of usable height at 13.75pt per line holds 50 lines.
        assert_eq!(pages, 3);
    }
}
