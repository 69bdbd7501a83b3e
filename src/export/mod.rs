//! Renders the white paper to PDF and Word documents.

pub mod client;
pub mod docx;
pub mod markup;
pub mod pdf;

use chrono::{DateTime, Utc};

use crate::models::WhitePaper;

pub use client::{ApiClient, DEFAULT_API_URL};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("PDF error: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    SimplePdf,
    Word,
}

impl ExportFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Pdf => "THPU_Revolutionary_White_Paper.pdf",
            Self::SimplePdf => "THPU_White_Paper_Simple.pdf",
            Self::Word => "THPU_Revolutionary_White_Paper.docx",
        }
    }

    pub fn render(
        self,
        paper: &WhitePaper,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Pdf => pdf::render_detailed(paper, generated_at),
            Self::SimplePdf => pdf::render_simple(paper, generated_at),
            Self::Word => docx::render(paper, generated_at),
        }
    }
}

/// Headline numbers printed ahead of the table of contents.
pub const KEY_METRICS: [(&str, &str); 4] = [
    ("Energy Efficiency Improvement", "1000x over traditional CPUs"),
    ("Throughput Increase", "100x for AI workloads"),
    ("Latency Reduction", "10x for inference tasks"),
    ("Adaptability", "Infinite through neuromorphic learning"),
];

pub const DOCUMENT_SUBJECT: &str = "Revolutionary Computing Architecture";

/// `June 01, 2025`
pub fn format_generated_on(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%B %d, %Y").to_string()
}

/// Table-of-contents and heading label. Section titles usually carry their
/// own number already; only unnumbered ones get `N. ` prepended.
pub fn numbered_title(position: usize, title: &str) -> String {
    if title.starts_with(|c: char| c.is_ascii_digit()) {
        title.to_string()
    } else {
        format!("{}. {}", position, title)
    }
}

pub fn author_names(paper: &WhitePaper) -> String {
    paper
        .authors
        .iter()
        .map(|author| author.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_on_spells_out_the_month() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_generated_on(at), "June 01, 2025");
    }

    #[test]
    fn numbered_title_does_not_double_number() {
        assert_eq!(numbered_title(1, "1. Introduction"), "1. Introduction");
        assert_eq!(numbered_title(3, "Appendix"), "3. Appendix");
    }

    #[test]
    fn default_file_names_match_format() {
        assert!(ExportFormat::Word.default_file_name().ends_with(".docx"));
        assert!(ExportFormat::Pdf.default_file_name().ends_with(".pdf"));
        assert_ne!(
            ExportFormat::Pdf.default_file_name(),
            ExportFormat::SimplePdf.default_file_name()
        );
    }
}
