//! PDF renditions of the white paper: a detailed A4 report with colored
//! headings and a plain Letter-size version.

pub mod fonts;
pub mod layout;

use chrono::{DateTime, Utc};

use self::fonts::Font;
use self::layout::{
    Align, DocumentInfo, Flowable, Margins, PageSetup, PageSize, ParagraphStyle, Rgb,
};
use super::markup::{self, Block};
use super::{
    DOCUMENT_SUBJECT, ExportError, KEY_METRICS, author_names, format_generated_on,
    numbered_title,
};
use crate::models::WhitePaper;

pub const COPYRIGHT_NOTICE: &str = "© 2024 FactsUniv. All rights reserved.";

/// Achievement lines of the simple version, worded apart from the detailed
/// report's metric table.
const SIMPLE_METRICS: [&str; 4] = [
    "Energy Efficiency: 1000x improvement over traditional CPUs",
    "Throughput: 100x increase for AI workloads",
    "Latency: 10x reduction for inference tasks",
    "Adaptability: Infinite through neuromorphic learning",
];

/// Simple-version paragraphs this short (after marker removal) are dropped.
const MIN_SIMPLE_PARAGRAPH_CHARS: usize = 20;

mod detailed {
    use super::*;

    pub const SETUP: PageSetup = PageSetup {
        size: PageSize::A4,
        margins: Margins {
            top: 72.0,
            right: 72.0,
            bottom: 18.0,
            left: 72.0,
        },
    };

    pub const TITLE: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 18.0)
        .leading(22.0)
        .color(Rgb::BLUE)
        .align(Align::Center)
        .spacing(0.0, 30.0);

    pub const SUBTITLE: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 14.0)
        .leading(18.0)
        .align(Align::Center)
        .spacing(0.0, 12.0);

    pub const AFFILIATION: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 14.0)
        .leading(18.0)
        .align(Align::Center)
        .spacing(0.0, 12.0);

    pub const HEADING: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 16.0)
        .leading(20.0)
        .color(Rgb::BLUE)
        .spacing(20.0, 12.0);

    pub const SUBHEADING: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 14.0)
        .leading(18.0)
        .spacing(12.0, 8.0);

    pub const ITALIC_SUBHEADING: ParagraphStyle = ParagraphStyle::plain(Font::Italic, 14.0)
        .leading(18.0)
        .spacing(12.0, 8.0);

    pub const BODY: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 11.0)
        .leading(14.0)
        .align(Align::Justify)
        .spacing(0.0, 12.0);

    pub const BULLET: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 11.0)
        .leading(14.0)
        .indent(18.0, 0.0)
        .spacing(0.0, 6.0);

    pub const CODE: ParagraphStyle = ParagraphStyle::plain(Font::Mono, 10.0)
        .leading(13.0)
        .indent(18.0, 0.0)
        .spacing(0.0, 12.0);

    pub const ABSTRACT: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 10.0)
        .leading(13.0)
        .align(Align::Justify)
        .indent(36.0, 36.0)
        .spacing(0.0, 12.0)
        .border(Rgb::GRAY);
}

mod simple {
    use super::*;

    pub const SETUP: PageSetup = PageSetup {
        size: PageSize::Letter,
        margins: Margins {
            top: 72.0,
            right: 72.0,
            bottom: 72.0,
            left: 72.0,
        },
    };

    pub const TITLE: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 18.0)
        .leading(22.0)
        .align(Align::Center)
        .spacing(0.0, 30.0);

    pub const AUTHOR: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 14.0)
        .leading(18.0)
        .align(Align::Center)
        .spacing(0.0, 12.0);

    pub const HEADING: ParagraphStyle = ParagraphStyle::plain(Font::Bold, 14.0)
        .leading(18.0)
        .spacing(20.0, 12.0);

    pub const BODY: ParagraphStyle = ParagraphStyle::plain(Font::Regular, 11.0)
        .leading(14.0)
        .align(Align::Justify)
        .spacing(0.0, 12.0);
}

fn document_info(paper: &WhitePaper) -> DocumentInfo {
    DocumentInfo {
        title: paper.title.clone(),
        author: author_names(paper),
        subject: DOCUMENT_SUBJECT.to_string(),
        keywords: paper.keywords.join(", "),
    }
}

fn table_of_contents(paper: &WhitePaper, heading: ParagraphStyle, body: ParagraphStyle) -> Vec<Flowable> {
    let mut story = vec![Flowable::paragraph("Table of Contents", heading)];
    story.extend(
        paper
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| Flowable::paragraph(numbered_title(i + 1, &section.title), body)),
    );
    story
}

fn section_blocks(content: &str) -> Vec<Flowable> {
    use detailed::*;

    markup::blocks(content)
        .into_iter()
        .flat_map(|block| match block {
            Block::Heading(text) => vec![Flowable::paragraph(text, SUBHEADING)],
            Block::Subheading(text) => vec![Flowable::paragraph(text, ITALIC_SUBHEADING)],
            Block::Bullets(items) => items
                .into_iter()
                .map(|item| Flowable::paragraph(format!("• {}", markup::without_bold(&item)), BULLET))
                .collect(),
            Block::Code(text) => vec![Flowable::paragraph(text, CODE)],
            Block::Body(text) => vec![Flowable::paragraph(markup::without_bold(&text), BODY)],
        })
        .collect()
}

pub(crate) fn detailed_story(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Vec<Flowable> {
    use detailed::*;

    let mut story = vec![
        Flowable::paragraph(paper.title.as_str(), TITLE),
        Flowable::Spacer(30.0),
    ];
    for author in &paper.authors {
        story.push(Flowable::paragraph(author.name.as_str(), SUBTITLE));
        story.push(Flowable::paragraph(author.affiliation.as_str(), AFFILIATION));
        story.push(Flowable::Spacer(12.0));
    }
    story.extend([
        Flowable::Spacer(30.0),
        Flowable::paragraph(
            format!("Generated on: {}", format_generated_on(generated_at)),
            AFFILIATION,
        ),
        Flowable::Spacer(30.0),
        Flowable::paragraph(format!("Keywords: {}", paper.keywords.join(", ")), BODY),
        Flowable::PageBreak,
        Flowable::paragraph("Abstract", HEADING),
        Flowable::paragraph(paper.abstract_text.as_str(), ABSTRACT),
        Flowable::Spacer(30.0),
        Flowable::paragraph("Key Performance Achievements", HEADING),
    ]);
    story.extend(
        KEY_METRICS
            .iter()
            .map(|(metric, value)| Flowable::paragraph(format!("• {}: {}", metric, value), BODY)),
    );
    story.push(Flowable::PageBreak);
    story.extend(table_of_contents(paper, HEADING, BODY));
    story.push(Flowable::PageBreak);

    for section in &paper.sections {
        story.push(Flowable::paragraph(section.title.as_str(), HEADING));
        story.extend(section_blocks(&section.content));
        for figure in &section.figures {
            story.extend([
                Flowable::Spacer(20.0),
                Flowable::paragraph(figure.title.as_str(), SUBHEADING),
                Flowable::paragraph(figure.caption.as_str(), BODY),
                Flowable::Spacer(20.0),
            ]);
        }
        story.push(Flowable::PageBreak);
    }

    story.push(Flowable::paragraph("References", HEADING));
    story.extend(
        paper
            .references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                Flowable::paragraph(format!("[{}] {}", i + 1, reference.citation()), BODY)
            }),
    );
    story
}

pub(crate) fn simple_story(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Vec<Flowable> {
    use simple::*;

    let mut story = vec![
        Flowable::paragraph(paper.title.as_str(), TITLE),
        Flowable::Spacer(30.0),
    ];
    for author in &paper.authors {
        story.push(Flowable::paragraph(author.name.as_str(), AUTHOR));
        story.push(Flowable::paragraph(author.affiliation.as_str(), AUTHOR));
    }
    story.extend([
        Flowable::Spacer(30.0),
        Flowable::paragraph(
            format!("Generated: {}", format_generated_on(generated_at)),
            AUTHOR,
        ),
        Flowable::Spacer(30.0),
        Flowable::paragraph(format!("Keywords: {}", paper.keywords.join(", ")), BODY),
        Flowable::PageBreak,
        Flowable::paragraph("Abstract", HEADING),
        Flowable::paragraph(paper.abstract_text.as_str(), BODY),
        Flowable::Spacer(30.0),
        Flowable::paragraph("Key Performance Achievements", HEADING),
    ]);
    story.extend(
        SIMPLE_METRICS
            .iter()
            .map(|line| Flowable::paragraph(format!("• {}", line), BODY)),
    );
    story.push(Flowable::PageBreak);
    story.extend(table_of_contents(paper, HEADING, BODY));
    story.push(Flowable::PageBreak);

    for section in &paper.sections {
        story.push(Flowable::paragraph(section.title.as_str(), HEADING));
        story.extend(
            markup::paragraphs(&section.content)
                .map(markup::strip_markers)
                .filter(|text| text.chars().count() > MIN_SIMPLE_PARAGRAPH_CHARS)
                .map(|text| Flowable::paragraph(text, BODY)),
        );
        story.push(Flowable::Spacer(20.0));
    }

    story.push(Flowable::PageBreak);
    story.push(Flowable::paragraph("References", HEADING));
    story.extend(
        paper
            .references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                Flowable::paragraph(format!("[{}] {}", i + 1, reference.citation()), BODY)
            }),
    );
    story.push(Flowable::Spacer(30.0));
    story.push(Flowable::paragraph(COPYRIGHT_NOTICE, AUTHOR));
    story
}

/// A4 report with blue headings, a boxed abstract, per-section pages and
/// figure captions.
pub fn render_detailed(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let story = detailed_story(paper, generated_at);
    tracing::debug!("Rendering detailed PDF with {} flowables", story.len());
    layout::render(&story, &detailed::SETUP, &document_info(paper))
}

/// Letter-size plain text version with formatting markers stripped.
pub fn render_simple(paper: &WhitePaper, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let story = simple_story(paper, generated_at);
    tracing::debug!("Rendering simple PDF with {} flowables", story.len());
    layout::render(&story, &simple::SETUP, &document_info(paper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::build_whitepaper;

    fn texts(story: &[Flowable]) -> Vec<&str> {
        story
            .iter()
            .filter_map(|flowable| match flowable {
                Flowable::Paragraph(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn detailed_story_breaks_after_every_section() {
        let paper = build_whitepaper();
        let story = detailed_story(&paper, Utc::now());
        let breaks = story
            .iter()
            .filter(|flowable| matches!(flowable, Flowable::PageBreak))
            .count();
        // title page, abstract page, contents page, then one per section
        assert_eq!(breaks, 3 + paper.sections.len());
    }

    #[test]
    fn detailed_story_lists_sections_and_figures() {
        let paper = build_whitepaper();
        let story = detailed_story(&paper, Utc::now());
        let texts = texts(&story);
        for section in &paper.sections {
            assert!(texts.iter().filter(|text| **text == section.title).count() >= 2);
        }
        for figure in paper.sections.iter().flat_map(|section| &section.figures) {
            assert!(texts.contains(&figure.caption.as_str()));
        }
        assert!(texts.iter().any(|text| text.starts_with("[5] ")));
    }

    #[test]
    fn simple_story_drops_markers_and_short_paragraphs() {
        let paper = build_whitepaper();
        let story = simple_story(&paper, Utc::now());
        let texts = texts(&story);
        assert!(texts.iter().all(|text| !text.contains("**") && !text.contains("```")));
        assert!(texts.contains(&"3.1 Temporal Processing Core"));
        assert!(!texts.contains(&"**3.1 Temporal Processing Core**"));
        assert_eq!(texts.last(), Some(&COPYRIGHT_NOTICE));
    }

    #[test]
    fn simple_story_words_metrics_as_improvements() {
        let paper = build_whitepaper();
        let simple = simple_story(&paper, Utc::now());
        let simple = texts(&simple);
        assert!(simple.contains(&"• Energy Efficiency: 1000x improvement over traditional CPUs"));
        assert!(simple.contains(&"• Latency: 10x reduction for inference tasks"));
        assert!(!simple.contains(&"• Throughput Increase: 100x for AI workloads"));

        let detailed = detailed_story(&paper, Utc::now());
        assert!(texts(&detailed).contains(&"• Throughput Increase: 100x for AI workloads"));
    }

    #[test]
    fn detailed_pdf_spans_more_pages_than_sections() {
        let paper = build_whitepaper();
        let bytes = render_detailed(&paper, Utc::now()).unwrap();
        let document = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(document.get_pages().len() > paper.sections.len());
    }
}
