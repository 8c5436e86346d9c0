//! In-memory document builder and atomic DOCX writer.
//!
//! Blocks are collected first and only turned into a DOCX package on
//! `to_bytes`/`save`, so nothing touches the filesystem until the whole
//! report exists.

use std::io::{Cursor, Write};
use std::path::Path;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, SpecialIndentType, Start,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::render::blocks::{Alignment, Block, BlockKind};
use crate::render::page::PageSetup;

/// Numbering definition shared by every bullet block.
const BULLET_NUMBERING_ID: usize = 2;
const BULLET_GLYPH: &str = "\u{2022}";
const BULLET_INDENT_TWIPS: i32 = 720;
const BULLET_HANGING_TWIPS: i32 = 360;

/// Exclusively owned by one render call; discarded after saving.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    page: PageSetup,
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            blocks: Vec::new(),
        }
    }

    pub fn append(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn build_docx(&self) -> Docx {
        let margins = self.page.margins_twips();
        let mut docx = Docx::new()
            .page_margin(
                PageMargin::new()
                    .top(margins.top)
                    .bottom(margins.bottom)
                    .left(margins.left)
                    .right(margins.right),
            )
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                    Level::new(
                        0,
                        Start::new(1),
                        NumberFormat::new("bullet"),
                        LevelText::new(BULLET_GLYPH),
                        LevelJc::new("left"),
                    )
                    .indent(
                        Some(BULLET_INDENT_TWIPS),
                        Some(SpecialIndentType::Hanging(BULLET_HANGING_TWIPS)),
                        None,
                        None,
                    ),
                ),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

        for block in &self.blocks {
            docx = docx.add_paragraph(block_paragraph(block));
        }
        docx
    }

    /// Packs the document into DOCX bytes.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.build_docx()
            .build()
            .pack(&mut buffer)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(buffer.into_inner())
    }

    /// Writes the document to `destination`.
    ///
    /// The bytes go to a temporary file in the destination directory which is
    /// then renamed into place. On any failure the destination is untouched and
    /// the temporary file is removed.
    pub fn save(&self, destination: &Path) -> Result<(), AppError> {
        let write_err = |source: std::io::Error| AppError::Write {
            path: destination.to_path_buf(),
            source,
        };

        let bytes = self.to_bytes().map_err(write_err)?;

        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        debug!("Staging {} bytes at {}", bytes.len(), tmp.path().display());

        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(destination).map_err(|e| write_err(e.error))?;

        info!(
            "Wrote {} blocks to {}",
            self.blocks.len(),
            destination.display()
        );
        Ok(())
    }
}

/// One paragraph with a single run carrying the block's formatting.
/// Newlines become line breaks and tabs become tab stops inside the run.
fn block_paragraph(block: &Block) -> Paragraph {
    let style = &block.style;

    let mut run = Run::new().size(style.half_points());
    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }

    for (i, line) in block.lines().into_iter().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, segment) in line.into_iter().enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            if !segment.is_empty() {
                run = run.add_text(segment);
            }
        }
    }

    let mut paragraph = Paragraph::new().add_run(run);
    if let Some(alignment) = style.alignment {
        paragraph = paragraph.align(match alignment {
            Alignment::Left => AlignmentType::Left,
            Alignment::Justify => AlignmentType::Both,
        });
    }
    if block.kind == BlockKind::Bullet {
        paragraph =
            paragraph.numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0));
    }
    paragraph
}
