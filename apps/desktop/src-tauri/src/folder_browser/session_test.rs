//! Tests for the navigation session state machine.
//!
//! The session does no I/O, so these tests drive it directly: issue a
//! request, fabricate the listing, feed it back through `apply`.

use super::session::{NavigationSession, SessionPhase, ViewMode};
use super::{BrowseError, FolderItem, FolderListing, NavigationRequest};

fn listing(path: &str, names: &[&str]) -> FolderListing {
    FolderListing {
        current_path: path.to_string(),
        items: names
            .iter()
            .map(|name| FolderItem {
                name: name.to_string(),
                path: format!("{path}/{name}"),
                is_directory: true,
            })
            .collect(),
    }
}

fn resolve(session: &mut NavigationSession, request: &NavigationRequest) {
    let applied = session.apply(request, Ok(listing(&request.path, &[])));
    assert!(applied);
}

/// open() then navigate to `path`, resolving both requests.
fn open_at(session: &mut NavigationSession, path: &str) {
    let request = session.open();
    resolve(session, &request);
    let request = session.navigate(path).unwrap();
    resolve(session, &request);
}

#[test]
fn open_resets_and_requests_root() {
    let mut session = NavigationSession::default();
    let request = session.open();
    assert_eq!(request.path, "");
    assert!(!request.add_to_history);
    assert_eq!(session.snapshot().phase, SessionPhase::Loading);

    resolve(&mut session, &request);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert_eq!(snapshot.current_path, "");
    assert!(!snapshot.can_go_back);
    assert!(!snapshot.can_go_forward);
    assert!(!snapshot.can_go_up);
}

#[test]
fn navigate_tracks_history() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");
    let request = session.navigate("/a/b").unwrap();
    resolve(&mut session, &request);

    assert_eq!(session.history(), ["/a", "/a/b"]);
    assert_eq!(session.history_index(), Some(1));
    assert_eq!(session.current_path(), "/a/b");
}

#[test]
fn back_then_navigate_discards_forward_branch() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");
    let request = session.navigate("/b").unwrap();
    resolve(&mut session, &request);
    let request = session.back().unwrap();
    resolve(&mut session, &request);
    let request = session.navigate("/c").unwrap();
    resolve(&mut session, &request);

    assert_eq!(session.history(), ["/a", "/c"]);
    assert_eq!(session.history_index(), Some(1));
}

#[test]
fn back_and_forward_replay_without_recording() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");
    let request = session.navigate("/b").unwrap();
    resolve(&mut session, &request);

    let request = session.back().unwrap();
    assert_eq!(request.path, "/a");
    assert!(!request.add_to_history);
    resolve(&mut session, &request);
    assert_eq!(session.current_path(), "/a");
    assert_eq!(session.history(), ["/a", "/b"]);

    let request = session.forward().unwrap();
    assert_eq!(request.path, "/b");
    resolve(&mut session, &request);
    assert_eq!(session.current_path(), "/b");
    assert_eq!(session.history(), ["/a", "/b"]);
}

#[test]
fn back_at_oldest_and_forward_at_newest_are_noops() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");

    assert!(session.back().is_none());
    assert!(session.forward().is_none());
    assert_eq!(session.history(), ["/a"]);
    assert_eq!(session.history_index(), Some(0));
    assert_eq!(session.snapshot().phase, SessionPhase::Ready);
}

#[test]
fn back_before_any_navigation_is_noop() {
    let mut session = NavigationSession::default();
    let request = session.open();
    resolve(&mut session, &request);

    assert!(session.back().is_none());
    assert!(session.forward().is_none());
}

#[test]
fn up_strips_last_segment_and_tracks_history() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a/b/c");

    let request = session.up().unwrap();
    assert_eq!(request.path, "/a/b");
    assert!(request.add_to_history);
    resolve(&mut session, &request);
    assert_eq!(session.history(), ["/a/b/c", "/a/b"]);
}

#[test]
fn up_at_browse_root_is_noop() {
    let mut session = NavigationSession::default();
    let request = session.open();
    resolve(&mut session, &request);

    assert!(session.up().is_none());
}

#[test]
fn stale_response_is_discarded() {
    let mut session = NavigationSession::default();
    let request = session.open();
    resolve(&mut session, &request);

    let first = session.navigate("/a").unwrap();
    let second = session.navigate("/b").unwrap();

    // Second (current) resolves first
    assert!(session.apply(&second, Ok(listing("/b", &["x"]))));
    // First resolves late; must not overwrite
    assert!(!session.apply(&first, Ok(listing("/a", &["y"]))));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_path, "/b");
    assert_eq!(snapshot.items[0].name, "x");
    assert_eq!(session.history(), ["/b"]);
}

#[test]
fn stale_error_is_discarded_too() {
    let mut session = NavigationSession::default();
    let request = session.open();
    resolve(&mut session, &request);

    let first = session.navigate("/a").unwrap();
    let second = session.navigate("/b").unwrap();
    resolve(&mut session, &second);

    assert!(!session.apply(&first, Err(BrowseError::NotFound("/a".to_string()))));
    assert_eq!(session.snapshot().phase, SessionPhase::Ready);
}

#[test]
fn failed_navigation_keeps_path_and_history() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");

    let request = session.navigate("/forbidden").unwrap();
    assert!(session.apply(
        &request,
        Err(BrowseError::PermissionDenied("/forbidden".to_string()))
    ));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Error);
    assert_eq!(snapshot.current_path, "/a");
    assert!(snapshot.error.unwrap().contains("/forbidden"));
    assert_eq!(session.history(), ["/a"]);
}

#[test]
fn refresh_does_not_grow_history() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");

    let request = session.refresh().unwrap();
    assert_eq!(request.path, "/a");
    assert!(!request.add_to_history);
    resolve(&mut session, &request);
    assert_eq!(session.history(), ["/a"]);
}

#[test]
fn renavigating_to_current_entry_is_not_recorded_twice() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");

    let request = session.navigate("/a").unwrap();
    resolve(&mut session, &request);
    assert_eq!(session.history(), ["/a"]);
    assert_eq!(session.history_index(), Some(0));
}

#[test]
fn switch_view_mode_triggers_refresh() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");

    let request = session.switch_view_mode(ViewMode::List).unwrap();
    assert_eq!(request.path, "/a");
    assert!(!request.add_to_history);
    assert_eq!(session.view_mode(), ViewMode::List);
    assert_eq!(session.snapshot().phase, SessionPhase::Loading);
}

#[test]
fn closed_session_ignores_everything() {
    let mut session = NavigationSession::default();
    let request = session.open();
    session.close();

    assert!(!session.apply(&request, Ok(listing("", &[]))));
    assert!(session.navigate("/a").is_none());
    assert!(session.back().is_none());
    assert!(session.refresh().is_none());
    assert_eq!(session.snapshot().phase, SessionPhase::Closed);
}

#[test]
fn reopen_after_close_starts_clean() {
    let mut session = NavigationSession::default();
    open_at(&mut session, "/a");
    session.close();

    let request = session.open();
    resolve(&mut session, &request);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.current_path, "");
    assert!(session.history().is_empty());
    assert!(!snapshot.can_go_back);
}

#[test]
fn view_mode_survives_close() {
    let mut session = NavigationSession::new(ViewMode::List);
    let request = session.open();
    resolve(&mut session, &request);
    session.close();
    assert_eq!(session.view_mode(), ViewMode::List);
}
