//! Directory index and breadcrumb resolution over the scanned library.
//!
//! Turns the flat list of video-containing directories into a navigable
//! tree (`index`), decomposes and re-joins path strings across the two
//! separator conventions (`segmenter`), and derives the breadcrumb bar
//! data (`breadcrumbs`). No filesystem access anywhere in this module.

mod breadcrumbs;
mod index;
mod segmenter;

#[cfg(test)]
mod breadcrumbs_test;

pub use breadcrumbs::{BreadcrumbTrail, resolve};
pub use index::{DirEntry, DirectoryIndex};
pub use segmenter::{compare_names, is_under, parent_path};
