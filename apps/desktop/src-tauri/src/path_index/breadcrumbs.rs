//! Breadcrumb resolution for the library's directory filter.
//!
//! Given the currently selected directory and the index, produces the data
//! the breadcrumb bar renders: the ordered ancestor chain, the top-level
//! root choices, and per-crumb child choices (sibling-subtree jumps for
//! inner crumbs, descend-further options for the last one). Pure string
//! work; rendering lives entirely in the frontend.

use serde::Serialize;

use super::index::{DirEntry, DirectoryIndex};
use super::segmenter::SegmentedPath;

/// Synthetic label for the chain root when no directory is selected.
const ALL_DIRECTORIES_LABEL: &str = "All Directories";

/// One link of the breadcrumb chain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub label: String,
    pub path: String,
    pub is_current: bool,
    /// Immediate children under this crumb's path.
    pub children: Vec<DirEntry>,
}

/// Everything the breadcrumb bar needs for one render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbTrail {
    pub chain: Vec<Crumb>,
    /// Top-level choices across the whole index; populated only at the
    /// chain root (no directory selected).
    pub root_choices: Vec<DirEntry>,
}

/// Resolves `current_path` against the index.
///
/// Accumulation here goes through the same join rule as the index builder,
/// so every crumb path matches a stored path byte-for-byte; a crumb path
/// that doesn't match simply yields no children rather than an error.
pub fn resolve(current_path: &str, index: &DirectoryIndex) -> BreadcrumbTrail {
    if current_path.is_empty() {
        return BreadcrumbTrail {
            chain: vec![Crumb {
                label: ALL_DIRECTORIES_LABEL.to_string(),
                path: String::new(),
                is_current: true,
                children: Vec::new(),
            }],
            root_choices: index.root_entries(),
        };
    }

    let segmented = SegmentedPath::of(current_path);
    let accumulated = segmented.accumulated(index.paths());
    let last = accumulated.len().saturating_sub(1);

    let chain = segmented
        .components()
        .zip(accumulated.iter())
        .enumerate()
        .map(|(i, (component, path))| Crumb {
            label: component.to_string(),
            path: path.clone(),
            is_current: i == last,
            children: index.child_entries(path),
        })
        .collect();

    BreadcrumbTrail {
        chain,
        root_choices: Vec::new(),
    }
}
