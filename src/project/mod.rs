//! Batches of XQuery sources parsed together
//!
//! A [`SourceSet`] holds named in-memory sources, each with its own
//! [`Dialect`](crate::Dialect). Sources can be added one at a time or
//! collected from a directory tree; [`SourceSet::parse_all`] parses every
//! source in parallel.

mod source_set;

pub use source_set::{LoadError, ParsedSource, SOURCE_EXTENSIONS, SourceSet, collect_source_paths};
