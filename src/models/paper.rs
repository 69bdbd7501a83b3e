use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::StoredDocument;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub affiliation: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub year: i32,
    pub doi: Option<String>,
    pub url: Option<String>,
}

impl Reference {
    /// `Title by A, B (2024). Journal`, with `. DOI: ...` appended when known.
    pub fn citation(&self) -> String {
        let mut text = format!(
            "{} by {} ({}). {}",
            self.title,
            self.authors.join(", "),
            self.year,
            self.journal
        );
        if let Some(doi) = self.doi.as_deref() {
            text.push_str(&format!(". DOI: {}", doi));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub svg_content: Option<String>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitePaperSection {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Free-form nested blocks; the schema is up to whoever renders them.
    #[serde(default)]
    pub subsections: Vec<Map<String, Value>>,
    #[serde(default)]
    pub figures: Vec<Figure>,
    /// Reference ids. Not checked against the paper's reference list.
    #[serde(default)]
    pub references: Vec<String>,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitePaper {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub authors: Vec<Author>,
    pub keywords: Vec<String>,
    pub sections: Vec<WhitePaperSection>,
    pub references: Vec<Reference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: String,
}

impl StoredDocument for WhitePaper {
    const COLLECTION: &'static str = "whitepapers";
}
