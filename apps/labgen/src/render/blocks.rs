//! Styled blocks, the unit the document builder appends.
//!
//! Every constructor here is a pure `text → Block` transform. The typographic
//! rules per block type are fixed:
//!
//! | block      | size | style          | alignment |
//! |------------|------|----------------|-----------|
//! | title      | 16pt | bold           | justified |
//! | subheading | 14pt | bold           | left      |
//! | body       | 12pt | regular        | justified |
//! | code       | 12pt | italic         | left      |
//! | bullet     | 12pt | regular, list  | default   |

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Subheading,
    Body,
    Code,
    Bullet,
}

/// Run and paragraph formatting of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub size_pt: u8,
    pub bold: bool,
    pub italic: bool,
    /// `None` leaves the paragraph at the writer's default (used for list items).
    pub alignment: Option<Alignment>,
}

impl BlockStyle {
    pub const fn new(size_pt: u8) -> Self {
        Self {
            size_pt,
            bold: false,
            italic: false,
            alignment: None,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Font size in half-points, the unit DOCX run properties use.
    pub fn half_points(&self) -> usize {
        usize::from(self.size_pt) * 2
    }
}

pub const TITLE_STYLE: BlockStyle = BlockStyle::new(16).bold().aligned(Alignment::Justify);
pub const SUBHEADING_STYLE: BlockStyle = BlockStyle::new(14).bold().aligned(Alignment::Left);
pub const BODY_STYLE: BlockStyle = BlockStyle::new(12).aligned(Alignment::Justify);
pub const CODE_STYLE: BlockStyle = BlockStyle::new(12).italic().aligned(Alignment::Left);
pub const BULLET_STYLE: BlockStyle = BlockStyle::new(12);

/// One styled unit of document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub style: BlockStyle,
}

impl Block {
    /// Characters XML 1.0 cannot carry are dropped from `text`.
    pub fn new(kind: BlockKind, text: impl Into<String>, style: BlockStyle) -> Self {
        Self {
            kind,
            text: strip_xml_illegal(text.into()),
            style,
        }
    }

    /// The text split into lines, each line split at tabs.
    ///
    /// `"a\tb\nc"` → `[["a", "b"], ["c"]]`. Windows line endings are accepted.
    pub fn lines(&self) -> Vec<Vec<&str>> {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| line.split('\t').collect())
            .collect()
    }
}

/// Removes characters outside the XML 1.0 `Char` production: C0 controls other
/// than tab, LF and CR, plus U+FFFE and U+FFFF.
fn strip_xml_illegal(text: String) -> String {
    if text.chars().all(is_xml_char) {
        return text;
    }
    let cleaned: String = text.chars().filter(|c| is_xml_char(*c)).collect();
    warn!(
        "Dropped {} XML-illegal characters from document text",
        text.chars().count() - cleaned.chars().count()
    );
    cleaned
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Upper-cases the text.
pub fn title(text: &str) -> Block {
    Block::new(BlockKind::Title, text.to_uppercase(), TITLE_STYLE)
}

pub fn subheading(text: &str) -> Block {
    Block::new(BlockKind::Subheading, text, SUBHEADING_STYLE)
}

pub fn body(text: &str) -> Block {
    Block::new(BlockKind::Body, text, BODY_STYLE)
}

/// Verbatim, no highlighting.
pub fn code(text: &str) -> Block {
    Block::new(BlockKind::Code, text, CODE_STYLE)
}

pub fn bullet(text: &str) -> Block {
    Block::new(BlockKind::Bullet, text, BULLET_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_upper_cased_bold_16pt_justified() {
        let block = title("Topic: Inheritance in Java");
        assert_eq!(block.text, "TOPIC: INHERITANCE IN JAVA");
        assert_eq!(block.kind, BlockKind::Title);
        assert_eq!(block.style.size_pt, 16);
        assert!(block.style.bold);
        assert!(!block.style.italic);
        assert_eq!(block.style.alignment, Some(Alignment::Justify));
    }

    #[test]
    fn test_subheading_is_bold_14pt_left() {
        let block = subheading("1. OBJECTIVE");
        assert_eq!(block.text, "1. OBJECTIVE");
        assert_eq!(block.style, BlockStyle::new(14).bold().aligned(Alignment::Left));
    }

    #[test]
    fn test_body_is_regular_12pt_justified() {
        let block = body("Inheritance promotes reuse.");
        assert!(!block.style.bold && !block.style.italic);
        assert_eq!(block.style.size_pt, 12);
        assert_eq!(block.style.alignment, Some(Alignment::Justify));
    }

    #[test]
    fn test_code_is_italic_12pt_left_and_verbatim() {
        let src = "class A {\n    void f() {}\n}";
        let block = code(src);
        assert_eq!(block.text, src);
        assert!(block.style.italic);
        assert!(!block.style.bold);
        assert_eq!(block.style.alignment, Some(Alignment::Left));
    }

    #[test]
    fn test_bullet_leaves_alignment_to_list_default() {
        let block = bullet("Understand inheritance");
        assert_eq!(block.kind, BlockKind::Bullet);
        assert_eq!(block.style.size_pt, 12);
        assert_eq!(block.style.alignment, None);
    }

    #[test]
    fn test_half_points() {
        assert_eq!(TITLE_STYLE.half_points(), 32);
        assert_eq!(BODY_STYLE.half_points(), 24);
    }

    #[test]
    fn test_lines_split_on_newlines_and_tabs() {
        let block = code("int main() {\r\n\treturn 0;\n}");
        assert_eq!(
            block.lines(),
            vec![vec!["int main() {"], vec!["", "return 0;"], vec!["}"]]
        );
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let block = code("a\u{000C}b\u{0001}c\tx\u{FFFE}");
        assert_eq!(block.text, "abc\tx");
        assert_eq!(block.lines(), vec![vec!["abc", "x"]]);

        let clean = body("é → ok\r\n");
        assert_eq!(clean.text, "é → ok\r\n");
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(body("").lines(), vec![vec![""]]);
    }
}
