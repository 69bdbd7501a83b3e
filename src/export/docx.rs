//! Word (OOXML) rendition of the white paper.
//!
//! The package is assembled by hand: fixed parts (content types,
//! relationships, styles, bullet numbering) are static, while the document
//! body and core properties are streamed through a quick-xml writer.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::markup::{self, Block};
use super::{
    DOCUMENT_SUBJECT, ExportError, KEY_METRICS, author_names, format_generated_on,
    numbered_title,
};
use crate::models::WhitePaper;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_COMMENTS: &str = "Generated from THPU White Paper API";

pub const PERFORMANCE_HEADER: [&str; 4] = ["Architecture", "Energy Efficiency", "Throughput", "Latency"];

pub const PERFORMANCE_ROWS: [[&str; 4]; 4] = [
    ["CPU", "1x", "1x", "1x"],
    ["GPU", "10x", "100x", "0.1x"],
    ["TPU", "100x", "1000x", "0.01x"],
    ["THPU", "1000x", "10000x", "0.001x"],
];

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>thpu-export</Application></Properties>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:color w:val="17365D"/><w:sz w:val="52"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="480" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="365F91"/><w:sz w:val="28"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="4F81BD"/><w:sz w:val="26"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="2"/></w:pPr><w:rPr><w:b/><w:i/><w:color w:val="4F81BD"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr><w:spacing w:after="60"/></w:pPr></w:style>
<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style>
</w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Justify {
    Center,
    Both,
}

impl Justify {
    fn value(self) -> &'static str {
        match self {
            Justify::Center => "center",
            Justify::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Run {
    text: String,
    bold: bool,
    italic: bool,
    /// Points; written as half-points.
    size: Option<u32>,
    font: Option<&'static str>,
}

impl Run {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn size(mut self, points: u32) -> Self {
        self.size = Some(points);
        self
    }

    fn font(mut self, name: &'static str) -> Self {
        self.font = Some(name);
        self
    }

    fn has_properties(&self) -> bool {
        self.bold || self.italic || self.size.is_some() || self.font.is_some()
    }
}

/// One run per inline bold span.
fn emphasized(text: &str) -> Vec<Run> {
    markup::bold_spans(text)
        .into_iter()
        .map(|(piece, bold)| if bold { Run::new(piece).bold() } else { Run::new(piece) })
        .collect()
}

/// Streams `word/document.xml`.
struct DocumentWriter {
    writer: Writer<Vec<u8>>,
}

impl DocumentWriter {
    fn new() -> Result<Self, ExportError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        writer.write_event(Event::Start(
            BytesStart::new("w:document").with_attributes([("xmlns:w", WORD_NS)]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), ExportError> {
        self.writer.write_event(Event::Empty(
            BytesStart::new(name).with_attributes(attributes.iter().copied()),
        ))?;
        Ok(())
    }

    fn paragraph(
        &mut self,
        style: Option<&str>,
        justify: Option<Justify>,
        runs: &[Run],
    ) -> Result<(), ExportError> {
        self.start("w:p")?;
        if style.is_some() || justify.is_some() {
            self.start("w:pPr")?;
            if let Some(style) = style {
                self.empty("w:pStyle", &[("w:val", style)])?;
            }
            if let Some(justify) = justify {
                self.empty("w:jc", &[("w:val", justify.value())])?;
            }
            self.end("w:pPr")?;
        }
        for run in runs {
            self.run(run)?;
        }
        self.end("w:p")
    }

    fn run(&mut self, run: &Run) -> Result<(), ExportError> {
        self.start("w:r")?;
        if run.has_properties() {
            self.start("w:rPr")?;
            if let Some(font) = run.font {
                self.empty("w:rFonts", &[("w:ascii", font), ("w:hAnsi", font), ("w:cs", font)])?;
            }
            if run.bold {
                self.empty("w:b", &[])?;
            }
            if run.italic {
                self.empty("w:i", &[])?;
            }
            if let Some(points) = run.size {
                let half_points = (points * 2).to_string();
                self.empty("w:sz", &[("w:val", half_points.as_str())])?;
            }
            self.end("w:rPr")?;
        }
        for (i, line) in run.text.split('\n').enumerate() {
            if i > 0 {
                self.empty("w:br", &[])?;
            }
            self.writer.write_event(Event::Start(
                BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
            ))?;
            self.writer.write_event(Event::Text(BytesText::new(line)))?;
            self.end("w:t")?;
        }
        self.end("w:r")
    }

    /// Level 0 is the document title.
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ExportError> {
        let style = match level {
            0 => "Title".to_string(),
            n => format!("Heading{}", n),
        };
        self.paragraph(Some(style.as_str()), None, &[Run::new(text)])
    }

    fn blank(&mut self) -> Result<(), ExportError> {
        self.paragraph(None, None, &[])
    }

    fn page_break(&mut self) -> Result<(), ExportError> {
        self.start("w:p")?;
        self.start("w:r")?;
        self.empty("w:br", &[("w:type", "page")])?;
        self.end("w:r")?;
        self.end("w:p")
    }

    fn table(&mut self, header: &[&str], rows: &[[&str; 4]]) -> Result<(), ExportError> {
        const COLUMN_WIDTH: &str = "2160";

        self.start("w:tbl")?;
        self.start("w:tblPr")?;
        self.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
        self.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        self.end("w:tblPr")?;
        self.start("w:tblGrid")?;
        for _ in header {
            self.empty("w:gridCol", &[("w:w", COLUMN_WIDTH)])?;
        }
        self.end("w:tblGrid")?;

        let header_row = header.iter().map(|cell| Run::new(*cell).bold());
        self.table_row(header_row)?;
        for row in rows {
            self.table_row(row.iter().map(|cell| Run::new(*cell)))?;
        }
        self.end("w:tbl")
    }

    fn table_row(&mut self, cells: impl Iterator<Item = Run>) -> Result<(), ExportError> {
        self.start("w:tr")?;
        for cell in cells {
            self.start("w:tc")?;
            self.start("w:tcPr")?;
            self.empty("w:tcW", &[("w:w", "2160"), ("w:type", "dxa")])?;
            self.end("w:tcPr")?;
            self.paragraph(None, None, &[cell])?;
            self.end("w:tc")?;
        }
        self.end("w:tr")
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        // US Letter with one-inch margins.
        self.start("w:sectPr")?;
        self.empty("w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
        self.empty(
            "w:pgMar",
            &[
                ("w:top", "1440"),
                ("w:right", "1440"),
                ("w:bottom", "1440"),
                ("w:left", "1440"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        self.end("w:sectPr")?;
        self.end("w:body")?;
        self.end("w:document")?;
        Ok(self.writer.into_inner())
    }
}

fn document_xml(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let mut doc = DocumentWriter::new()?;

    doc.heading(0, &paper.title)?;
    doc.blank()?;
    for author in &paper.authors {
        doc.paragraph(
            None,
            Some(Justify::Center),
            &[Run::new(author.name.as_str()).bold().size(14)],
        )?;
        doc.paragraph(
            None,
            Some(Justify::Center),
            &[Run::new(author.affiliation.as_str()).italic().size(12)],
        )?;
    }
    doc.blank()?;
    doc.paragraph(
        None,
        Some(Justify::Center),
        &[Run::new(format!("Generated on: {}", format_generated_on(generated_at))).size(12)],
    )?;
    doc.blank()?;
    doc.paragraph(
        None,
        Some(Justify::Center),
        &[Run::new(format!("Keywords: {}", paper.keywords.join(", "))).size(11)],
    )?;
    doc.page_break()?;

    doc.heading(1, "Abstract")?;
    doc.paragraph(None, Some(Justify::Both), &[Run::new(paper.abstract_text.as_str())])?;

    doc.heading(1, "Key Performance Achievements")?;
    for (metric, value) in KEY_METRICS {
        doc.paragraph(
            Some("ListBullet"),
            None,
            &[Run::new(format!("{}: ", metric)).bold(), Run::new(value)],
        )?;
    }
    doc.heading(2, "Performance Comparison")?;
    doc.table(&PERFORMANCE_HEADER, &PERFORMANCE_ROWS)?;
    doc.page_break()?;

    doc.heading(1, "Table of Contents")?;
    for (i, section) in paper.sections.iter().enumerate() {
        doc.paragraph(None, None, &[Run::new(numbered_title(i + 1, &section.title))])?;
    }
    doc.page_break()?;

    for (i, section) in paper.sections.iter().enumerate() {
        doc.heading(1, &numbered_title(i + 1, &section.title))?;
        for block in markup::blocks(&section.content) {
            match block {
                Block::Heading(text) => doc.heading(2, &text)?,
                Block::Subheading(text) => doc.heading(3, &text)?,
                Block::Bullets(items) => {
                    for item in items {
                        doc.paragraph(Some("ListBullet"), None, &emphasized(&item))?;
                    }
                }
                Block::Code(text) => {
                    doc.paragraph(None, None, &[Run::new(text).font("Courier New").size(10)])?
                }
                Block::Body(text) => doc.paragraph(None, Some(Justify::Both), &emphasized(&text))?,
            }
        }
        for figure in &section.figures {
            doc.blank()?;
            doc.paragraph(None, None, &[Run::new(figure.title.as_str()).bold().size(12)])?;
            doc.paragraph(None, None, &[Run::new(figure.caption.as_str()).italic().size(10)])?;
        }
    }

    doc.page_break()?;
    doc.heading(1, "References")?;
    for (i, reference) in paper.references.iter().enumerate() {
        let mut runs = vec![
            Run::new(format!("[{}] ", i + 1)).bold(),
            Run::new(format!(
                "{} by {} ({}). ",
                reference.title,
                reference.authors.join(", "),
                reference.year
            )),
            Run::new(reference.journal.as_str()).italic(),
        ];
        if let Some(doi) = &reference.doi {
            runs.push(Run::new(format!(". DOI: {}", doi)));
        }
        doc.paragraph(Some("Normal"), None, &runs)?;
    }

    doc.finish()
}

fn core_properties_xml(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(BytesStart::new("cp:coreProperties").with_attributes([
        (
            "xmlns:cp",
            "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
        ),
        ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
        ("xmlns:dcterms", "http://purl.org/dc/terms/"),
        ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ])))?;

    let timestamp = generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let fields = [
        ("dc:title", paper.title.clone()),
        ("dc:creator", author_names(paper)),
        ("dc:subject", DOCUMENT_SUBJECT.to_string()),
        ("cp:keywords", paper.keywords.join(", ")),
        ("dc:description", DOCUMENT_COMMENTS.to_string()),
    ];
    for (name, value) in &fields {
        writer.write_event(Event::Start(BytesStart::new(*name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(*name)))?;
    }
    for name in ["dcterms:created", "dcterms:modified"] {
        writer.write_event(Event::Start(
            BytesStart::new(name).with_attributes([("xsi:type", "dcterms:W3CDTF")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(&timestamp)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(writer.into_inner())
}

/// Builds the complete `.docx` package in memory.
pub fn render(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let document = document_xml(paper, generated_at)?;
    let core = core_properties_xml(paper, generated_at)?;

    let parts: [(&str, &[u8]); 8] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/document.xml", document.as_slice()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/numbering.xml", NUMBERING_XML.as_bytes()),
        ("docProps/core.xml", core.as_slice()),
        ("docProps/app.xml", APP_XML.as_bytes()),
    ];

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in parts {
        archive.start_file(name, options)?;
        archive.write_all(bytes)?;
    }
    tracing::debug!("Packed Word document ({} bytes of body XML)", document.len());

    Ok(archive.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::build_whitepaper;
    use quick_xml::Reader;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    fn part_text(xml: &str) -> String {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut text = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Text(event) => {
                    let value = event.unescape().unwrap();
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(value.trim());
                }
                Event::Eof => break,
                _ => {}
            }
        }
        text
    }

    #[test]
    fn package_contains_every_part() {
        let bytes = render(&build_whitepaper(), Utc::now()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn body_carries_sections_table_and_references() {
        let paper = build_whitepaper();
        let bytes = render(&paper, Utc::now()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");
        let text = part_text(&xml);

        for section in &paper.sections {
            assert!(text.contains(&section.title), "missing {}", section.title);
        }
        assert!(text.contains("Energy Efficiency Improvement:"));
        assert!(text.contains("10000x"));
        assert!(text.contains("[5]"));
        assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Courier New""#));
        assert!(!text.contains("**"));
    }

    #[test]
    fn core_properties_describe_the_paper() {
        let paper = build_whitepaper();
        let bytes = render(&paper, Utc::now()).unwrap();
        let text = part_text(&read_part(&bytes, "docProps/core.xml"));
        assert!(text.contains(&paper.title));
        assert!(text.contains(DOCUMENT_SUBJECT));
        assert!(text.contains(DOCUMENT_COMMENTS));
    }
}
