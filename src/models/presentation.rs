use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paper::Figure;
use crate::db::StoredDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    Title,
    Content,
    Figure,
    Conclusion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationSlide {
    pub id: String,
    pub title: String,
    pub content: String,
    pub slide_type: SlideType,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub notes: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slides: Vec<PresentationSlide>,
    pub white_paper_id: String,
    pub created_at: DateTime<Utc>,
}

impl StoredDocument for Presentation {
    const COLLECTION: &'static str = "presentations";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_type_is_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_value(SlideType::Conclusion).unwrap(), "conclusion");
        assert_eq!(
            serde_json::from_value::<SlideType>(serde_json::json!("title")).unwrap(),
            SlideType::Title
        );
        assert!(serde_json::from_value::<SlideType>(serde_json::json!("appendix")).is_err());
    }
}
