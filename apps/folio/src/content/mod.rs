// Markdown content collections: frontmatter split, schema check, table of
// contents, listing.

pub mod collection;
pub mod frontmatter;
pub mod schema;
pub mod toc;

pub use collection::{load_collection, CollectionKind, LoadReport};
