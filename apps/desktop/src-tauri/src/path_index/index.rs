//! In-memory directory tree over the library's flat path list.
//!
//! The library store hands us an unordered list of absolute directory
//! paths (one per directory that contains at least one video). The index
//! turns that into a tree keyed by segment name, and answers the two
//! queries the breadcrumb filter needs: top-level roots and immediate
//! children of a given path. It never touches the filesystem; rebuilds
//! replace the whole index, there is no in-place mutation.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use super::segmenter::{SegmentedPath, compare_names, is_drive_token, join_child};

/// A navigable directory choice handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    pub name: String,
    pub path: String,
}

/// One node of the tree. `full_path` is the accumulated path in the
/// separator convention observed for this branch, reconstructible by
/// joining the ancestor segments.
#[derive(Debug, Clone)]
pub struct DirNode {
    pub name: String,
    pub full_path: String,
    /// True once any indexed path terminates at or passes through here —
    /// which, by construction, is every node.
    pub has_videos: bool,
    pub children: HashMap<String, DirNode>,
}

impl DirNode {
    fn new(name: &str, full_path: &str) -> DirNode {
        DirNode {
            name: name.to_string(),
            full_path: full_path.to_string(),
            has_videos: false,
            children: HashMap::new(),
        }
    }
}

/// Tree index over the flat path list, plus the list itself.
///
/// The flat list is retained because child lookups are a linear prefix
/// scan over it (child paths are then literal substrings of stored paths,
/// so they match the store byte-for-byte), and because drive-separator
/// inference needs the stored strings.
#[derive(Debug, Default)]
pub struct DirectoryIndex {
    roots: HashMap<String, DirNode>,
    paths: Vec<String>,
}

impl DirectoryIndex {
    /// Builds the index from a flat list of absolute directory paths.
    ///
    /// Separator detection is per path, so mixed conventions across
    /// entries are fine. Entries that segment to nothing (empty or
    /// whitespace-only strings) are skipped, not fatal. Rebuilding from
    /// the same input set yields the same tree regardless of input order.
    pub fn build(paths: &[String]) -> DirectoryIndex {
        let mut index = DirectoryIndex {
            roots: HashMap::new(),
            paths: paths.to_vec(),
        };

        for path in paths {
            let segmented = SegmentedPath::of(path);
            if segmented.is_empty() {
                debug!("Skipping unsegmentable library path: {:?}", path);
                continue;
            }
            let accumulated = segmented.accumulated(&index.paths);

            let mut current = &mut index.roots;
            for (component, full_path) in segmented.components().zip(accumulated.iter()) {
                let node = current
                    .entry(component.to_string())
                    .or_insert_with(|| DirNode::new(component, full_path));
                node.has_videos = true;
                current = &mut node.children;
            }
        }

        index
    }

    /// The stored flat path list, in input order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// One entry per distinct top-level root, sorted by name.
    ///
    /// POSIX roots render with their leading separator (`/data`); Windows
    /// roots render as the bare drive token (`C:`).
    pub fn root_entries(&self) -> Vec<DirEntry> {
        let mut entries: Vec<DirEntry> = self
            .roots
            .values()
            .filter(|node| node.has_videos)
            .map(|node| {
                let label = if is_drive_token(&node.name) {
                    node.name.clone()
                } else {
                    node.full_path.clone()
                };
                DirEntry {
                    name: label.clone(),
                    path: label,
                }
            })
            .collect();
        sort_entries(&mut entries);
        entries
    }

    /// Immediate children of `parent`, deduplicated by name and sorted.
    ///
    /// A stored path is a candidate iff it starts with `parent` and is
    /// strictly longer; the child name is the next segment after stripping
    /// the prefix and at most one separator. Never yields `parent` itself
    /// or anything deeper than one level.
    pub fn child_entries(&self, parent: &str) -> Vec<DirEntry> {
        if parent.is_empty() {
            return self.root_entries();
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for stored in &self.paths {
            let Some(rest) = stored.strip_prefix(parent) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let rest = rest.strip_prefix(['/', '\\']).unwrap_or(rest);
            let name = rest
                .split(['/', '\\'])
                .next()
                .unwrap_or_default()
                .to_string();
            if name.is_empty() || seen.contains(&name) {
                continue;
            }
            let path = join_child(parent, &name, &self.paths);
            seen.insert(name.clone());
            entries.push(DirEntry { name, path });
        }

        sort_entries(&mut entries);
        entries
    }
}

fn sort_entries(entries: &mut [DirEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}
