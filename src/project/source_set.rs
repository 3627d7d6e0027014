use std::path::{Path, PathBuf};

use rayon::prelude::*;
use smol_str::SmolStr;
use thiserror::Error;

use crate::dialect::Dialect;
use crate::parser::{Parse, parse};

/// File extensions recognised as XQuery sources
pub const SOURCE_EXTENSIONS: &[&str] = &["xq", "xqy", "xql", "xqm", "xquery"];

/// Failure to read sources from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone)]
struct Source {
    name: SmolStr,
    text: String,
    dialect: Dialect,
}

/// Result of parsing one source of a [`SourceSet`]
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub name: SmolStr,
    pub dialect: Dialect,
    pub parse: Parse,
}

impl ParsedSource {
    pub fn is_well_formed(&self) -> bool {
        self.parse.is_well_formed()
    }
}

/// Named sources awaiting a parse
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: Vec<Source>,
    default_dialect: Dialect,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources added without an explicit dialect use `dialect`
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            sources: Vec::new(),
            default_dialect: dialect,
        }
    }

    pub fn default_dialect(&self) -> Dialect {
        self.default_dialect
    }

    /// Add a source in the default dialect, replacing any source of the same name
    pub fn add(&mut self, name: impl Into<SmolStr>, text: impl Into<String>) {
        let dialect = self.default_dialect;
        self.add_with_dialect(name, text, dialect);
    }

    pub fn add_with_dialect(&mut self, name: impl Into<SmolStr>, text: impl Into<String>, dialect: Dialect) {
        let source = Source {
            name: name.into(),
            text: text.into(),
            dialect,
        };
        match self.sources.iter_mut().find(|s| s.name == source.name) {
            Some(existing) => *existing = source,
            None => self.sources.push(source),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.sources.len();
        self.sources.retain(|s| s.name != name);
        self.sources.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name == name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.text.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Add every XQuery source below `dir`, named by its path relative to `dir`
    ///
    /// Returns the number of sources added.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let paths = collect_source_paths(dir)?;
        let loaded: Vec<(SmolStr, String)> = paths
            .par_iter()
            .map(|path| {
                let text = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
                let relative = path.strip_prefix(dir).unwrap_or(path.as_path());
                let name = relative.to_string_lossy().replace('\\', "/");
                Ok((SmolStr::from(name), text))
            })
            .collect::<Result<_, LoadError>>()?;

        let count = loaded.len();
        for (name, text) in loaded {
            self.add(name, text);
        }
        tracing::debug!(dir = %dir.display(), count, "loaded xquery sources");
        Ok(count)
    }

    /// Parse one source by name
    pub fn parse(&self, name: &str) -> Option<ParsedSource> {
        self.sources.iter().find(|s| s.name == name).map(parse_source)
    }

    /// Parse every source in parallel, in insertion order
    pub fn parse_all(&self) -> Vec<ParsedSource> {
        let parsed: Vec<ParsedSource> = self.sources.par_iter().map(parse_source).collect();
        let malformed = parsed.iter().filter(|p| !p.is_well_formed()).count();
        tracing::debug!(sources = parsed.len(), malformed, "parsed source set");
        parsed
    }
}

fn parse_source(source: &Source) -> ParsedSource {
    let parse = parse(&source.text, &source.dialect);
    if !parse.is_well_formed() {
        tracing::trace!(name = %source.name, errors = parse.errors().len(), "source has syntax errors");
    }
    ParsedSource {
        name: source.name.clone(),
        dialect: source.dialect,
        parse,
    }
}

/// Recursively collect XQuery source paths below `dir`, sorted
pub fn collect_source_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, results: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let read_dir_error = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_type = entry.file_type().map_err(read_dir_error)?;
        let path = entry.path();
        // Symlinked directories are not followed
        if file_type.is_dir() {
            collect_recursive(&path, results)?;
        } else if path.is_file() && is_source_path(&path) {
            results.push(path);
        }
    }
    Ok(())
}

fn is_source_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
