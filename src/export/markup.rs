//! Section text uses a handful of markdown-like markers. Paragraphs are
//! separated by blank lines and each one is classified as a whole.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `**text**`
    Heading(String),
    /// `*text*`
    Subheading(String),
    /// Lines starting with `- `, one entry per line.
    Bullets(Vec<String>),
    /// A paragraph fenced with triple backticks.
    Code(String),
    Body(String),
}

/// Non-blank paragraphs of `content`, trimmed.
pub fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

/// Markers are checked in order: bold, italic, bullet, code. Anything
/// unmatched is body text.
pub fn classify(paragraph: &str) -> Block {
    if paragraph.starts_with("**") && paragraph.ends_with("**") {
        Block::Heading(paragraph.replace("**", "").trim().to_string())
    } else if paragraph.starts_with('*') && paragraph.ends_with('*') {
        Block::Subheading(paragraph.replace('*', "").trim().to_string())
    } else if paragraph.starts_with("- ") {
        Block::Bullets(
            paragraph
                .lines()
                .map(|line| {
                    let line = line.trim();
                    line.strip_prefix("- ").unwrap_or(line).trim().to_string()
                })
                .filter(|item| !item.is_empty())
                .collect(),
        )
    } else if paragraph.starts_with("```") && paragraph.ends_with("```") {
        Block::Code(paragraph.replace("```", "").trim().to_string())
    } else {
        Block::Body(paragraph.to_string())
    }
}

pub fn blocks(content: &str) -> Vec<Block> {
    paragraphs(content).map(classify).collect()
}

/// Splits `text` on `**` pairs into `(segment, bold)` spans. Text with an
/// unbalanced marker is returned as a single plain span.
pub fn bold_spans(text: &str) -> Vec<(String, bool)> {
    let pieces: Vec<&str> = text.split("**").collect();
    if pieces.len() % 2 == 0 {
        return vec![(text.to_string(), false)];
    }
    pieces
        .into_iter()
        .enumerate()
        .filter(|(_, piece)| !piece.is_empty())
        .map(|(i, piece)| (piece.to_string(), i % 2 == 1))
        .collect()
}

/// `text` without inline bold markers.
pub fn without_bold(text: &str) -> String {
    bold_spans(text).into_iter().map(|(piece, _)| piece).collect()
}

/// Paragraph text with every marker removed.
pub fn strip_markers(paragraph: &str) -> String {
    paragraph.replace("**", "").replace('*', "").replace("```", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_paragraphs_are_dropped() {
        let content = "first\n\n   \n\nsecond\n\n";
        assert_eq!(paragraphs(content).collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn bold_paragraph_is_a_heading() {
        assert_eq!(
            classify("**3.1 Temporal Processing Core**"),
            Block::Heading("3.1 Temporal Processing Core".to_string())
        );
    }

    #[test]
    fn italic_paragraph_is_a_subheading() {
        assert_eq!(
            classify("*Advanced Computing Research Institute*"),
            Block::Subheading("Advanced Computing Research Institute".to_string())
        );
    }

    #[test]
    fn bold_wins_over_italic() {
        assert!(matches!(classify("**both**"), Block::Heading(_)));
    }

    #[test]
    fn bullet_paragraph_splits_per_line() {
        let block = classify("- Continuous computation\n- Natural handling\n- Reduced energy");
        assert_eq!(
            block,
            Block::Bullets(vec![
                "Continuous computation".to_string(),
                "Natural handling".to_string(),
                "Reduced energy".to_string(),
            ])
        );
    }

    #[test]
    fn fenced_paragraph_is_code() {
        let block = classify("```\ndW/dt = η · ∇P/∇W\n```");
        assert_eq!(block, Block::Code("dW/dt = η · ∇P/∇W".to_string()));
    }

    #[test]
    fn emphasis_that_does_not_close_the_paragraph_is_body() {
        // Italic label followed by a list: the paragraph does not end with `*`.
        let paragraph = "*Technical Objectives:*\n- Develop temporal processing logic gates";
        assert_eq!(classify(paragraph), Block::Body(paragraph.to_string()));
    }

    #[test]
    fn section_three_has_four_subsection_headings() {
        let paper = crate::content::build_whitepaper();
        let headings = blocks(&paper.sections[2].content)
            .into_iter()
            .filter(|block| matches!(block, Block::Heading(_)))
            .count();
        assert_eq!(headings, 4);
    }

    #[test]
    fn inline_bold_becomes_spans() {
        assert_eq!(
            bold_spans("1. **Theoretical Foundation**: principles"),
            vec![
                ("1. ".to_string(), false),
                ("Theoretical Foundation".to_string(), true),
                (": principles".to_string(), false),
            ]
        );
        assert_eq!(without_bold("**Research**: faster"), "Research: faster");
    }

    #[test]
    fn unbalanced_bold_marker_is_left_alone() {
        assert_eq!(bold_spans("a ** b"), vec![("a ** b".to_string(), false)]);
    }

    #[test]
    fn strip_markers_removes_all_emphasis_and_fences() {
        assert_eq!(strip_markers("**Bold** and *it* ```x```"), "Bold and it x");
    }
}
