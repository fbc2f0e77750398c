//! Inline editing of report tables.
//!
//! A report is stored as markup. [`ReportDocument`] owns the parsed tree and
//! the list of regions that may be edited: the leaf text cells of the first
//! table, or of the whole document when it has no table. Cells holding an
//! image are never editable.

mod markup;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::ports::FileSystem;
use markup::Node;

/// Errors from parsing, editing, or saving a report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// A `<!--` without a matching `-->`.
    #[error("unterminated comment at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of the comment start.
        offset: usize,
    },
    /// A tag without its closing `>`.
    #[error("unterminated tag at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the tag start.
        offset: usize,
    },
    /// A closing tag with no open element of that name.
    #[error("closing tag </{tag}> at byte {offset} has no open element")]
    StrayClose {
        /// Lowercased tag name.
        tag: String,
        /// Byte offset of the closing tag.
        offset: usize,
    },
    /// No editable region with this index.
    #[error("no editable region #{0}")]
    UnknownRegion(usize),
    /// The sink refused the saved markup.
    #[error("failed to save report: {0}")]
    Sink(String),
}

/// Receives the serialised report on save.
pub trait ReportSink {
    /// Stores the markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup cannot be stored.
    fn store(&self, markup: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<F> ReportSink for F
where
    F: Fn(&str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>,
{
    fn store(&self, markup: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self(markup)
    }
}

/// Writes saved reports through the filesystem port.
pub struct FileSink<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> FileSink<'a> {
    /// Sink writing to `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }
}

impl ReportSink for FileSink<'_> {
    fn store(&self, markup: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.fs.write(&self.path, markup)
    }
}

/// An editable region as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRegion {
    /// Index to pass to [`ReportDocument::replace_text`].
    pub index: usize,
    /// Tag name of the region element.
    pub tag: String,
    /// Current visible text (`br` as newline).
    pub text: String,
}

/// Parsed report with its editable regions.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    nodes: Vec<Node>,
    regions: Vec<Vec<usize>>,
    table_scoped: bool,
    editing: bool,
}

impl ReportDocument {
    /// Parses report markup and locates its editable regions.
    ///
    /// # Errors
    ///
    /// Returns an error for unterminated tags or comments, or a closing tag
    /// with no matching open element.
    pub fn parse(source: &str) -> Result<Self, MarkupError> {
        let nodes = markup::parse(source)?;
        let table = markup::find_first(&nodes, "table");

        let mut regions = Vec::new();
        match &table {
            Some(path) => {
                if let Some(table_el) = markup::element_at(&nodes, path) {
                    let mut prefix = path.clone();
                    markup::leaf_text_paths(&table_el.children, &mut prefix, &mut regions);
                }
            }
            None => markup::leaf_text_paths(&nodes, &mut Vec::new(), &mut regions),
        }

        debug!(regions = regions.len(), table = table.is_some(), "report parsed");
        Ok(Self { nodes, regions, table_scoped: table.is_some(), editing: false })
    }

    /// Whether editing is confined to a table.
    #[must_use]
    pub fn is_table_scoped(&self) -> bool {
        self.table_scoped
    }

    /// Whether the edit affordance is currently shown.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Shows or hides the edit affordance on every region.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Editable regions in document order.
    #[must_use]
    pub fn regions(&self) -> Vec<EditRegion> {
        self.regions
            .iter()
            .enumerate()
            .filter_map(|(index, path)| {
                markup::element_at(&self.nodes, path).map(|el| EditRegion {
                    index,
                    tag: el.key.clone(),
                    text: el.text(),
                })
            })
            .collect()
    }

    /// Replaces the text of region `index`. The text is escaped and each
    /// newline becomes a `br`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnknownRegion`] for an index out of range.
    pub fn replace_text(&mut self, index: usize, text: &str) -> Result<(), MarkupError> {
        let path = self.regions.get(index).ok_or(MarkupError::UnknownRegion(index))?;
        let element = markup::element_at_mut(&mut self.nodes, path)
            .ok_or(MarkupError::UnknownRegion(index))?;
        element.children = markup::text_nodes(text);
        Ok(())
    }

    /// Serialises the document, with the edit affordance while editing.
    #[must_use]
    pub fn render(&self) -> String {
        if self.editing {
            markup::render(&self.nodes, &self.regions)
        } else {
            markup::render(&self.nodes, &[])
        }
    }

    /// Leaves edit mode and hands the serialised document to `sink`.
    ///
    /// Returns the markup that was stored.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Sink`] if the sink fails.
    pub fn save(&mut self, sink: &dyn ReportSink) -> Result<String, MarkupError> {
        self.editing = false;
        let markup = self.render();
        sink.store(&markup).map_err(|e| MarkupError::Sink(e.to_string()))?;
        debug!(bytes = markup.len(), "report saved");
        Ok(markup)
    }
}
