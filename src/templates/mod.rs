//! Visualization narration templates.
//!
//! A template document maps visualization ids to ordered step templates:
//!
//! ```json
//! { "batman-effect": [ { "stepNumber": 0, "template": "Close your eyes and breathe." } ] }
//! ```
//!
//! The stores in this module read such a document once, validate it into
//! [`VisualizationTemplates`], and hand out the cached mapping.

pub mod async_store;
pub mod error;
pub mod model;
pub mod source;
pub mod store;

pub use async_store::AsyncTemplateStore;
pub use error::TemplateError;
pub use model::{TemplateEntry, VisualizationTemplates};
pub use source::{AsyncFileSource, AsyncTemplateSource, EmbeddedSource, FileSource, TemplateSource};
pub use store::{global_store, TemplateStore};
