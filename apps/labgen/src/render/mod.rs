// Document Renderer: LabReportRecord in, .docx file out.
// Block constructors are pure; only DocumentBuilder::save touches the filesystem.

pub mod blocks;
pub mod document;
pub mod page;
pub mod report;

pub use report::{render_document, RenderOptions};
