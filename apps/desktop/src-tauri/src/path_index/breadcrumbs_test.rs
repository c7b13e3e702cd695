//! Tests for breadcrumb resolution.

use super::breadcrumbs::resolve;
use super::index::DirectoryIndex;

fn build(items: &[&str]) -> DirectoryIndex {
    DirectoryIndex::build(&items.iter().map(|s| s.to_string()).collect::<Vec<_>>())
}

#[test]
fn empty_path_yields_synthetic_root() {
    let index = build(&["/mnt/media/Action", "C:\\Movies"]);
    let trail = resolve("", &index);

    assert_eq!(trail.chain.len(), 1);
    assert_eq!(trail.chain[0].label, "All Directories");
    assert_eq!(trail.chain[0].path, "");
    assert!(trail.chain[0].is_current);
    assert_eq!(
        trail
            .root_choices
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>(),
        vec!["/mnt", "C:"]
    );
}

#[test]
fn chain_has_one_crumb_per_segment() {
    let index = build(&["/mnt/media/Action"]);
    let trail = resolve("/mnt/media/Action", &index);

    let labels: Vec<&str> = trail.chain.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["mnt", "media", "Action"]);
    let paths: Vec<&str> = trail.chain.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(paths, vec!["/mnt", "/mnt/media", "/mnt/media/Action"]);
    assert!(trail.root_choices.is_empty());
}

#[test]
fn only_last_crumb_is_current() {
    let index = build(&["/mnt/media/Action"]);
    let trail = resolve("/mnt/media/Action", &index);

    let current: Vec<bool> = trail.chain.iter().map(|c| c.is_current).collect();
    assert_eq!(current, vec![false, false, true]);
}

#[test]
fn crumb_paths_round_trip_windows_input() {
    let index = build(&["C:\\Movies\\Action"]);
    let trail = resolve("C:\\Movies\\Action", &index);

    assert_eq!(trail.chain.last().unwrap().path, "C:\\Movies\\Action");
    let labels: Vec<&str> = trail.chain.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["C:", "Movies", "Action"]);
}

#[test]
fn inner_crumbs_offer_sibling_jumps() {
    let index = build(&[
        "/mnt/media/Action",
        "/mnt/media/Comedy",
        "/mnt/archive/Old",
    ]);
    let trail = resolve("/mnt/media/Action", &index);

    // The "/mnt" crumb offers the subtrees reachable from it
    assert_eq!(
        trail.chain[0]
            .children
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>(),
        vec!["archive", "media"]
    );
    // The "media" crumb offers its own children for sideways jumps
    assert_eq!(
        trail.chain[1]
            .children
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Action", "Comedy"]
    );
}

#[test]
fn last_crumb_offers_descend_further_choices() {
    let index = build(&["/mnt/media/Action/HD", "/mnt/media/Action/SD"]);
    let trail = resolve("/mnt/media/Action", &index);

    assert_eq!(
        trail
            .chain
            .last()
            .unwrap()
            .children
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>(),
        vec!["HD", "SD"]
    );
}

#[test]
fn unknown_path_degrades_to_empty_children() {
    let index = build(&["/mnt/media"]);
    let trail = resolve("/elsewhere/deep", &index);

    assert_eq!(trail.chain.len(), 2);
    assert!(trail.chain.iter().all(|c| c.children.is_empty()));
}

#[test]
fn example_ordering_is_case_insensitive() {
    let index = build(&["C:\\Movies\\Action", "C:\\Movies\\Comedy", "/data/clips"]);
    let roots = index.root_entries();
    assert_eq!(
        roots
            .iter()
            .map(|e| (e.name.as_str(), e.path.as_str()))
            .collect::<Vec<_>>(),
        vec![("/data", "/data"), ("C:", "C:")]
    );
}
