use chrono::Utc;

use crate::models::{Author, Figure, Reference, WhitePaper, WhitePaperSection, new_id};

pub const PAPER_TITLE: &str =
    "Temporal-Holographic Processing Units: A Revolutionary Computing Architecture for the AI Era";

pub const PAPER_VERSION: &str = "1.0";

const ABSTRACT: &str = include_str!("text/paper/abstract.md");

const KEYWORDS: [&str; 8] = [
    "Temporal Computing",
    "Holographic Processing",
    "Neuromorphic Hardware",
    "Quantum-Inspired Computing",
    "AI Acceleration",
    "Energy Efficiency",
    "Parallel Processing",
    "Adaptive Systems",
];

struct ReferenceSeed {
    title: &'static str,
    authors: &'static [&'static str],
    journal: &'static str,
    year: i32,
    doi: &'static str,
}

const REFERENCES: [ReferenceSeed; 5] = [
    ReferenceSeed {
        title: "Temporal Computing: A New Paradigm for Information Processing",
        authors: &["Johnson, R.", "Liu, M.", "Patel, S."],
        journal: "Nature Computing",
        year: 2024,
        doi: "10.1038/s41586-024-07123-4",
    },
    ReferenceSeed {
        title: "Holographic Data Storage and Processing Systems",
        authors: &["Anderson, K.", "Thompson, J."],
        journal: "Science",
        year: 2023,
        doi: "10.1126/science.abcd1234",
    },
    ReferenceSeed {
        title: "Neuromorphic Hardware: From Biological Inspiration to Practical Implementation",
        authors: &["Williams, A.", "Brown, D.", "Davis, L."],
        journal: "IEEE Transactions on Neural Networks",
        year: 2024,
        doi: "10.1109/TNNLS.2024.12345",
    },
    ReferenceSeed {
        title: "Energy-Efficient Computing for Artificial Intelligence",
        authors: &["Garcia, M.", "Wilson, P."],
        journal: "Communications of the ACM",
        year: 2024,
        doi: "10.1145/3634567",
    },
    ReferenceSeed {
        title: "Quantum-Inspired Classical Computing Architectures",
        authors: &["Lee, H.", "Zhang, Q.", "Miller, R."],
        journal: "Physical Review Applied",
        year: 2023,
        doi: "10.1103/PhysRevApplied.20.054321",
    },
];

struct FigureSeed {
    title: &'static str,
    description: &'static str,
    caption: &'static str,
    svg: &'static str,
}

const FIGURES: [FigureSeed; 3] = [
    FigureSeed {
        title: "THPU Architecture Overview",
        description: "Conceptual diagram showing the integration of temporal processing, holographic storage, and neuromorphic adaptivity in THPUs",
        caption: "Figure 1: THPU combines temporal computing domains with holographic data processing and neuromorphic adaptation mechanisms",
        svg: include_str!("text/figures/thpu_architecture_overview.svg"),
    },
    FigureSeed {
        title: "Performance Comparison",
        description: "Energy efficiency and computational throughput comparison between THPUs and traditional architectures",
        caption: "Figure 2: THPUs demonstrate 1000x energy efficiency improvement and 100x throughput increase over traditional von Neumann architectures",
        svg: include_str!("text/figures/performance_comparison.svg"),
    },
    FigureSeed {
        title: "Temporal Processing Flow",
        description: "Illustration of how information flows through temporal processing domains in THPUs",
        caption: "Figure 3: Temporal processing enables continuous, flowing computations that mirror biological neural processing",
        svg: include_str!("text/figures/temporal_processing_flow.svg"),
    },
];

/// One section: title, body, indices into [`FIGURES`], range into [`REFERENCES`].
struct SectionSeed {
    title: &'static str,
    body: &'static str,
    figures: &'static [usize],
    references: std::ops::Range<usize>,
}

const SECTIONS: [SectionSeed; 8] = [
    SectionSeed {
        title: "1. Introduction",
        body: include_str!("text/paper/01_introduction.md"),
        figures: &[0],
        references: 0..3,
    },
    SectionSeed {
        title: "2. Background and Motivation",
        body: include_str!("text/paper/02_background_and_motivation.md"),
        figures: &[],
        references: 3..5,
    },
    SectionSeed {
        title: "3. THPU Architecture and Design",
        body: include_str!("text/paper/03_thpu_architecture_and_design.md"),
        figures: &[0, 2],
        references: 0..2,
    },
    SectionSeed {
        title: "4. Theoretical Foundations",
        body: include_str!("text/paper/04_theoretical_foundations.md"),
        figures: &[],
        references: 0..3,
    },
    SectionSeed {
        title: "5. Performance Analysis and Projections",
        body: include_str!("text/paper/05_performance_analysis_and_projections.md"),
        figures: &[1],
        references: 3..5,
    },
    SectionSeed {
        title: "6. Implementation Roadmap",
        body: include_str!("text/paper/06_implementation_roadmap.md"),
        figures: &[],
        references: 4..5,
    },
    SectionSeed {
        title: "7. Applications and Impact",
        body: include_str!("text/paper/07_applications_and_impact.md"),
        figures: &[],
        references: 0..5,
    },
    SectionSeed {
        title: "8. Conclusion and Future Work",
        body: include_str!("text/paper/08_conclusion_and_future_work.md"),
        figures: &[],
        references: 0..5,
    },
];

/// Builds the complete paper with fresh identifiers.
pub fn build_whitepaper() -> WhitePaper {
    let authors = vec![Author {
        name: "FactsUniv Research Team".to_string(),
        affiliation: "FactsUniv Computing Research Division".to_string(),
        email: "research@factsuniv.com".to_string(),
    }];

    let references: Vec<Reference> = REFERENCES
        .iter()
        .map(|seed| Reference {
            id: new_id(),
            title: seed.title.to_string(),
            authors: seed.authors.iter().map(|name| name.to_string()).collect(),
            journal: seed.journal.to_string(),
            year: seed.year,
            doi: Some(seed.doi.to_string()),
            url: None,
        })
        .collect();

    // Shared figures keep the same id wherever they are embedded.
    let figures: Vec<Figure> = FIGURES
        .iter()
        .map(|seed| Figure {
            id: new_id(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            image_url: None,
            svg_content: Some(seed.svg.trim_end().to_string()),
            caption: seed.caption.to_string(),
        })
        .collect();

    let sections = SECTIONS
        .iter()
        .zip(1..)
        .map(|(seed, order)| WhitePaperSection {
            id: new_id(),
            title: seed.title.to_string(),
            content: seed.body.trim_end().to_string(),
            subsections: Vec::new(),
            figures: seed.figures.iter().map(|&i| figures[i].clone()).collect(),
            references: references[seed.references.clone()]
                .iter()
                .map(|reference| reference.id.clone())
                .collect(),
            order,
        })
        .collect();

    let now = Utc::now();
    WhitePaper {
        id: new_id(),
        title: PAPER_TITLE.to_string(),
        abstract_text: ABSTRACT.trim_end().to_string(),
        authors,
        keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
        sections,
        references,
        created_at: now,
        updated_at: now,
        version: PAPER_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paper_has_the_full_outline() {
        let paper = build_whitepaper();

        assert!(paper.title.contains("Temporal-Holographic Processing Units"));
        assert_eq!(paper.sections.len(), 8);
        assert!(paper.references.len() >= 5);
        assert!(!paper.authors.is_empty());
        assert_eq!(paper.keywords.len(), 8);
        assert_eq!(paper.created_at, paper.updated_at);

        let orders: Vec<i32> = paper.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, (1..=8).collect::<Vec<_>>());
        for section in &paper.sections {
            assert!(!section.content.is_empty());
            assert!(!section.content.ends_with('\n'));
        }
    }

    #[test]
    fn section_reference_ids_point_into_the_reference_list() {
        let paper = build_whitepaper();
        let known: HashSet<&str> = paper.references.iter().map(|r| r.id.as_str()).collect();

        for section in &paper.sections {
            assert!(!section.references.is_empty(), "{} cites nothing", section.title);
            for id in &section.references {
                assert!(known.contains(id.as_str()));
            }
        }
        assert_eq!(paper.sections[6].references.len(), paper.references.len());
    }

    #[test]
    fn identifiers_are_unique_uuids() {
        let paper = build_whitepaper();
        let mut ids = vec![paper.id.clone()];
        ids.extend(paper.sections.iter().map(|s| s.id.clone()));
        ids.extend(paper.references.iter().map(|r| r.id.clone()));
        let figure_ids: HashSet<String> = paper
            .sections
            .iter()
            .flat_map(|s| s.figures.iter().map(|f| f.id.clone()))
            .collect();
        assert_eq!(figure_ids.len(), FIGURES.len());
        ids.extend(figure_ids);

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        for id in &ids {
            assert!(uuid::Uuid::parse_str(id).is_ok(), "{id} is not a uuid");
        }
    }

    #[test]
    fn embedded_figures_carry_svg() {
        let paper = build_whitepaper();
        let intro = &paper.sections[0].figures;
        let architecture = &paper.sections[2].figures;

        assert_eq!(intro.len(), 1);
        assert_eq!(architecture.len(), 2);
        assert_eq!(intro[0].id, architecture[0].id);
        assert_eq!(paper.sections[4].figures[0].title, "Performance Comparison");
        for figure in architecture {
            let svg = figure.svg_content.as_deref().unwrap();
            assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"));
        }
    }

    #[test]
    fn body_text_carries_the_headline_figures() {
        let paper = build_whitepaper();
        let text: String = paper.sections.iter().map(|s| s.content.as_str()).collect();
        assert!(text.contains("1000x energy efficiency"));
        assert!(text.contains("100x throughput"));
    }
}
