//! Documentation access: location maps, bodies, supplementary documents, and the
//! two literal extraction routines (line spans and delimiter-comment sections).

pub mod error;
pub mod markers;
pub mod source;
pub mod span;


pub use error::{DocsError, DocsResult};
pub use markers::{AuxiliarySection, auxiliary_sections, endpoint_section, render_auxiliary};
#[cfg(any(test, feature = "mock"))]
pub use source::MockDocumentSource;
pub use source::{BODY_FILENAME, DocumentSource, FsDocumentSource, MAP_FILENAME};
pub use span::extract_span;
