use chrono::Utc;

use crate::models::{Presentation, PresentationSlide, SlideType, new_id};

pub const PRESENTATION_TITLE: &str = "THPU: Revolutionary Computing Architecture";

const DESCRIPTION: &str = "Presentation on Temporal-Holographic Processing Units and their transformative potential for artificial intelligence and computing";

struct SlideSeed {
    title: &'static str,
    body: &'static str,
    kind: SlideType,
    notes: &'static str,
}

const SLIDES: [SlideSeed; 12] = [
    SlideSeed {
        title: "Temporal-Holographic Processing Units",
        body: include_str!("text/slides/01_temporal_holographic_processing_units.md"),
        kind: SlideType::Title,
        notes: "Introduction slide highlighting the revolutionary nature of THPU technology",
    },
    SlideSeed {
        title: "The Computing Crisis",
        body: include_str!("text/slides/02_the_computing_crisis.md"),
        kind: SlideType::Content,
        notes: "Establish the problem that THPUs solve",
    },
    SlideSeed {
        title: "THPU Architecture Overview",
        body: include_str!("text/slides/03_thpu_architecture_overview.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Revolutionary Performance",
        body: include_str!("text/slides/04_revolutionary_performance.md"),
        kind: SlideType::Content,
        notes: "Emphasize the revolutionary nature of the performance improvements",
    },
    SlideSeed {
        title: "Temporal Processing Revolution",
        body: include_str!("text/slides/05_temporal_processing_revolution.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Holographic Memory System",
        body: include_str!("text/slides/06_holographic_memory_system.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Neuromorphic Adaptation",
        body: include_str!("text/slides/07_neuromorphic_adaptation.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Quantum-Inspired Superposition",
        body: include_str!("text/slides/08_quantum_inspired_superposition.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Transformative Applications",
        body: include_str!("text/slides/09_transformative_applications.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Implementation Roadmap",
        body: include_str!("text/slides/10_implementation_roadmap.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "Societal Impact",
        body: include_str!("text/slides/11_societal_impact.md"),
        kind: SlideType::Content,
        notes: "",
    },
    SlideSeed {
        title: "The Future is Now",
        body: include_str!("text/slides/12_the_future_is_now.md"),
        kind: SlideType::Conclusion,
        notes: "",
    },
];

/// Builds the slide deck, linked to the paper identified by `white_paper_id`.
pub fn build_presentation(white_paper_id: &str) -> Presentation {
    let slides = SLIDES
        .iter()
        .zip(1..)
        .map(|(seed, order)| PresentationSlide {
            id: new_id(),
            title: seed.title.to_string(),
            content: seed.body.trim_end().to_string(),
            slide_type: seed.kind,
            figures: Vec::new(),
            notes: seed.notes.to_string(),
            order,
        })
        .collect();

    Presentation {
        id: new_id(),
        title: PRESENTATION_TITLE.to_string(),
        description: DESCRIPTION.to_string(),
        slides,
        white_paper_id: white_paper_id.to_string(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_twelve_ordered_slides() {
        let deck = build_presentation("paper-id");

        assert_eq!(deck.slides.len(), 12);
        assert_eq!(deck.white_paper_id, "paper-id");
        assert!(deck.slides.windows(2).all(|w| w[0].order <= w[1].order));
        for slide in &deck.slides {
            assert!(!slide.title.is_empty());
            assert!(!slide.content.trim().is_empty());
        }
    }

    #[test]
    fn deck_opens_with_a_title_slide_and_closes_with_a_conclusion() {
        let deck = build_presentation("paper-id");
        let kinds: Vec<SlideType> = deck.slides.iter().map(|s| s.slide_type).collect();

        assert_eq!(kinds.first(), Some(&SlideType::Title));
        assert_eq!(kinds.last(), Some(&SlideType::Conclusion));
        assert!(kinds[1..11].iter().all(|k| *k == SlideType::Content));
        assert_eq!(deck.slides.iter().filter(|s| !s.notes.is_empty()).count(), 3);
    }
}
