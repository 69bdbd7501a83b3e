//! A small flowing layout engine: a story of paragraphs, spacers and page
//! breaks is poured into a single frame per page and written with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, StringFormat, Stream, dictionary};

use super::fonts::{Font, encode_win_ansi};
use crate::export::ExportError;

const BORDER_PADDING: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const BLUE: Rgb = Rgb(0.0, 0.0, 1.0);
    pub const GRAY: Rgb = Rgb(0.5, 0.5, 0.5);

    fn operands(self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
    pub color: Rgb,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub border: Option<Rgb>,
}

impl ParagraphStyle {
    /// Left-aligned black text with leading at 1.2x the font size.
    pub const fn plain(font: Font, size: f32) -> Self {
        Self {
            font,
            size,
            leading: size * 1.2,
            color: Rgb::BLACK,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            border: None,
        }
    }

    pub const fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub const fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub const fn indent(mut self, left: f32, right: f32) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self
    }

    pub const fn border(mut self, color: Rgb) -> Self {
        self.border = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(String, ParagraphStyle),
    Spacer(f32),
    PageBreak,
}

impl Flowable {
    pub fn paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Flowable::Paragraph(text.into(), style)
    }
}

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    pub text: String,
    /// Last line of a hard line; never stretched when justifying.
    pub last: bool,
}

/// Greedy word wrap. Newlines in `text` are hard breaks; runs of whitespace
/// collapse to one space. A word wider than `width` gets a line to itself.
pub(crate) fn wrap_lines(text: &str, font: Font, size: f32, width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    for hard_line in text.lines() {
        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if font.text_width(&candidate, size) > width {
                lines.push(Line {
                    text: std::mem::replace(&mut current, word.to_string()),
                    last: false,
                });
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(Line {
                text: current,
                last: true,
            });
        }
    }
    lines
}

struct Composer {
    width: f32,
    height: f32,
    margins: Margins,
    pages: Vec<Content>,
    operations: Vec<Operation>,
    /// Distance from the top edge of the page to the next free point.
    cursor: f32,
}

impl Composer {
    fn new(setup: &PageSetup) -> Self {
        let (width, height) = setup.size.dimensions();
        Self {
            width,
            height,
            margins: setup.margins,
            pages: Vec::new(),
            operations: Vec::new(),
            cursor: setup.margins.top,
        }
    }

    fn frame_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }

    fn frame_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    fn at_top_of_page(&self) -> bool {
        self.cursor <= self.margins.top
    }

    fn new_page(&mut self) {
        let operations = std::mem::take(&mut self.operations);
        self.pages.push(Content { operations });
        self.cursor = self.margins.top;
    }

    fn add(&mut self, flowable: &Flowable) {
        match flowable {
            Flowable::Paragraph(text, style) => self.paragraph(text, style),
            Flowable::Spacer(height) => {
                if self.cursor + height > self.frame_bottom() {
                    self.new_page();
                } else {
                    self.cursor += height;
                }
            }
            Flowable::PageBreak => {
                if !self.operations.is_empty() {
                    self.new_page();
                }
            }
        }
    }

    fn paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        let width = self.frame_width() - style.left_indent - style.right_indent;
        let lines = wrap_lines(text, style.font, style.size, width);
        if lines.is_empty() {
            return;
        }

        if !self.at_top_of_page() {
            self.cursor += style.space_before;
        }
        if style.border.is_some() {
            self.cursor += BORDER_PADDING;
        }

        let x = self.margins.left + style.left_indent;
        let mut fragment_top = self.cursor;
        for line in &lines {
            if self.cursor + style.leading > self.frame_bottom() && !self.at_top_of_page() {
                if let Some(color) = style.border {
                    self.stroke_box(color, x, fragment_top, width, self.cursor);
                }
                self.new_page();
                fragment_top = self.cursor;
            }
            self.line(line, style, x, width);
            self.cursor += style.leading;
        }

        if let Some(color) = style.border {
            self.stroke_box(color, x, fragment_top, width, self.cursor);
            self.cursor += BORDER_PADDING;
        }
        self.cursor += style.space_after;
    }

    fn line(&mut self, line: &Line, style: &ParagraphStyle, x: f32, width: f32) {
        let line_width = style.font.text_width(&line.text, style.size);
        let gaps = line.text.matches(' ').count();
        let (x, word_spacing) = match style.align {
            Align::Left => (x, 0.0),
            Align::Center => (x + (width - line_width).max(0.0) / 2.0, 0.0),
            Align::Justify if !line.last && gaps > 0 => {
                (x, ((width - line_width) / gaps as f32).max(0.0))
            }
            Align::Justify => (x, 0.0),
        };
        let baseline = self.height - (self.cursor + style.size);

        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![style.font.resource_name().into(), style.size.into()],
            ),
            Operation::new("rg", style.color.operands()),
            Operation::new("Tw", vec![word_spacing.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(&line.text),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Strokes a padded box around a paragraph fragment spanning `top` to
    /// `bottom` (both measured from the top edge).
    fn stroke_box(&mut self, color: Rgb, x: f32, top: f32, width: f32, bottom: f32) {
        let y = self.height - bottom - BORDER_PADDING;
        let box_height = bottom - top + 2.0 * BORDER_PADDING;
        self.operations.extend([
            Operation::new("w", vec![1.0_f32.into()]),
            Operation::new("RG", color.operands()),
            Operation::new(
                "re",
                vec![
                    (x - BORDER_PADDING).into(),
                    y.into(),
                    (width + 2.0 * BORDER_PADDING).into(),
                    box_height.into(),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
    }

    fn finish(mut self) -> Vec<Content> {
        if !self.operations.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Lays out `story` and writes the resulting PDF to a byte buffer.
pub fn render(
    story: &[Flowable],
    setup: &PageSetup,
    info: &DocumentInfo,
) -> Result<Vec<u8>, ExportError> {
    let mut composer = Composer::new(setup);
    for flowable in story {
        composer.add(flowable);
    }
    let pages = composer.finish();

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => fonts });

    let (page_width, page_height) = setup.size.dimensions();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for content in pages {
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let info_id = document.add_object(dictionary! {
        "Title" => text_string(&info.title),
        "Author" => text_string(&info.author),
        "Subject" => text_string(&info.subject),
        "Keywords" => text_string(&info.keywords),
        "Producer" => text_string(concat!("thpu-export ", env!("CARGO_PKG_VERSION"))),
    });
    document.trailer.set("Info", info_id);

    document.compress();

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn text_string(value: &str) -> Object {
    Object::String(encode_win_ansi(value), StringFormat::Literal)
}
