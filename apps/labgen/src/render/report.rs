//! Lab report layout. Turns a `LabReportRecord` into the fixed six-section document.
//!
//! Order: Title → Objective → Theory → Implementation → Output → Conclusion.

use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::LabReportRecord;
use crate::render::blocks::{body, bullet, code, subheading, title};
use crate::render::document::DocumentBuilder;
use crate::render::page::PageSetup;

pub const TITLE_PREFIX: &str = "TOPIC: ";
pub const OBJECTIVE_HEADING: &str = "1. OBJECTIVE";
pub const THEORY_HEADING: &str = "2. THEORY";
pub const IMPLEMENTATION_HEADING: &str = "3. IMPLEMENTATION";
pub const OUTPUT_HEADING: &str = "4. OUTPUT";
pub const CONCLUSION_HEADING: &str = "5. CONCLUSION";
/// Stands in for the program-output screenshot the student pastes in later.
pub const OUTPUT_PLACEHOLDER: &str = "[Screenshot will be added here]";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub page: PageSetup,
    /// Programming language named in the implementation heading,
    /// e.g. `Some("Java")` → "3. IMPLEMENTATION IN JAVA".
    pub language: Option<String>,
}

impl RenderOptions {
    fn implementation_heading(&self) -> String {
        match self.language.as_deref().map(str::trim) {
            Some(lang) if !lang.is_empty() => {
                format!("{IMPLEMENTATION_HEADING} IN {}", lang.to_uppercase())
            }
            _ => IMPLEMENTATION_HEADING.to_string(),
        }
    }
}

/// Lays out the report without touching the filesystem.
pub fn compose(record: &LabReportRecord, options: &RenderOptions) -> DocumentBuilder {
    let mut doc = DocumentBuilder::new(options.page);

    doc.append(title(&format!("{TITLE_PREFIX}{}", record.topic)));

    doc.append(subheading(OBJECTIVE_HEADING));
    for objective in &record.objectives {
        doc.append(bullet(objective));
    }

    doc.append(subheading(THEORY_HEADING))
        .append(body(&record.theory));

    doc.append(subheading(&options.implementation_heading()))
        .append(code(&record.implementation));

    doc.append(subheading(OUTPUT_HEADING))
        .append(body(OUTPUT_PLACEHOLDER));

    doc.append(subheading(CONCLUSION_HEADING))
        .append(body(&record.conclusion));

    doc
}

/// Renders `record` and writes it to `destination` atomically.
pub fn render_document(
    record: &LabReportRecord,
    destination: &Path,
    options: &RenderOptions,
) -> Result<(), AppError> {
    let doc = compose(record, options);
    info!(
        "Rendering report {:?}: {} blocks, {} objectives",
        record.topic,
        doc.blocks().len(),
        record.objectives.len()
    );
    doc.save(destination)
}
