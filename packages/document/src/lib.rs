//! Rich-text document model for Folio content.
//!
//! Documents come from the content store as JSON. [`load_document`] accepts the
//! envelopes the store produces and returns the root nodes; [`load_source`]
//! additionally recognizes whole post documents.

pub mod ast;
pub mod error;
pub mod loader;
pub mod post;

pub use ast::{Decoration, HeadingLevel, LinkNode, Node, TextNode};
pub use error::{DocumentError, DocumentResult};
pub use loader::{content_from_value, load_document, load_file, load_source, Source};
pub use post::{Author, Category, CoverImage, Post, PostStatus, PostTag};
