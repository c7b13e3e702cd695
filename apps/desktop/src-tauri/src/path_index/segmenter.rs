//! Path segmentation for the two separator conventions in the library.
//!
//! Scanned directory paths come back from the library store exactly as the
//! scanner recorded them, which means POSIX (`/mnt/media`) and Windows
//! (`C:\Movies`) conventions can coexist in one flat list. Everything that
//! joins segments back into full paths goes through [`accumulate_segments`]
//! so the result matches the stored strings byte-for-byte — prefix lookups
//! in the index break silently otherwise.

/// Which separator a path string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Slash,
    Backslash,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Backslash => '\\',
        }
    }

    /// Detects the separator of a single path. First occurrence wins;
    /// paths containing neither default to `Slash`.
    pub fn of_path(path: &str) -> Separator {
        for c in path.chars() {
            match c {
                '/' => return Separator::Slash,
                '\\' => return Separator::Backslash,
                _ => {}
            }
        }
        Separator::Slash
    }

    /// Detects the separator convention across a list of candidate paths,
    /// in order: the first path containing either separator decides.
    pub fn detect<'a>(paths: impl IntoIterator<Item = &'a str>) -> Separator {
        for path in paths {
            if path.contains('\\') {
                return Separator::Backslash;
            }
            if path.contains('/') {
                return Separator::Slash;
            }
        }
        Separator::Slash
    }
}

/// True iff `segment` is a Windows drive token: one ASCII letter plus `:`.
pub fn is_drive_token(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// A path decomposed into ordered components, tagged by dialect.
///
/// The drive token of a Windows path is kept out of `segments` so callers
/// never accidentally split or re-join it; [`SegmentedPath::components`]
/// yields it back as the first component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentedPath {
    Posix {
        /// Whether the original string started with its separator.
        absolute: bool,
        separator: Separator,
        segments: Vec<String>,
    },
    Windows {
        /// The drive token, e.g. `C:`.
        drive: String,
        segments: Vec<String>,
    },
}

impl SegmentedPath {
    /// Segments a path on its own separator, dropping empty components
    /// (leading, trailing, and doubled separators). A leading drive token
    /// selects the Windows dialect.
    pub fn of(path: &str) -> SegmentedPath {
        let separator = Separator::of_path(path);
        let mut segments: Vec<String> = path
            .split(separator.as_char())
            .filter(|part| !part.trim().is_empty())
            .map(str::to_string)
            .collect();

        if segments.first().is_some_and(|first| is_drive_token(first)) {
            let drive = segments.remove(0);
            SegmentedPath::Windows { drive, segments }
        } else {
            SegmentedPath::Posix {
                absolute: path.starts_with(separator.as_char()),
                separator,
                segments,
            }
        }
    }

    /// Ordered components, drive token first for Windows paths.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        let (head, rest) = match self {
            SegmentedPath::Posix { segments, .. } => (None, segments),
            SegmentedPath::Windows { drive, segments } => (Some(drive.as_str()), segments),
        };
        head.into_iter().chain(rest.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        match self {
            SegmentedPath::Posix { segments, .. } => segments.len(),
            SegmentedPath::Windows { segments, .. } => segments.len() + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The accumulated full path after each component, in order.
    ///
    /// `known_paths` is consulted only for the drive-separator heuristic of
    /// [`accumulate_segments`].
    pub fn accumulated(&self, known_paths: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        let mut prefix = String::new();
        for (i, component) in self.components().enumerate() {
            prefix = accumulate_segments(&prefix, component, i == 0, self, known_paths);
            out.push(prefix.clone());
        }
        out
    }
}

/// Joins one more segment onto an accumulated prefix.
///
/// The rule is asymmetric because drive-letter roots and POSIX roots have
/// different shapes, and because stored paths are not normalized:
///
/// - first Windows component: `C:` becomes `C:\` (or `C:/` when a known
///   stored path for that drive uses forward slashes — the first stored
///   path starting with the drive token decides, with no cross-checking
///   against later paths that might disagree; `\` when none match);
/// - first component of an absolute POSIX path: `/data`;
/// - otherwise: `prefix`, one separator inferred from the prefix itself
///   (skipped when the prefix already ends in one), then `segment`.
fn accumulate_segments(
    prefix: &str,
    segment: &str,
    is_first: bool,
    origin: &SegmentedPath,
    known_paths: &[String],
) -> String {
    if is_first && is_drive_token(segment) {
        let sep = drive_separator(segment, known_paths);
        return format!("{segment}{sep}");
    }
    if prefix.is_empty() {
        if let SegmentedPath::Posix {
            absolute: true,
            separator,
            ..
        } = origin
        {
            return format!("{}{segment}", separator.as_char());
        }
        return segment.to_string();
    }
    if prefix.ends_with('/') || prefix.ends_with('\\') {
        return format!("{prefix}{segment}");
    }
    let sep = if prefix.contains('\\') { '\\' } else { '/' };
    format!("{prefix}{sep}{segment}")
}

/// Picks the separator for a bare drive token: the first known path for
/// that drive decides, `\` when none match.
fn drive_separator(drive: &str, known_paths: &[String]) -> char {
    known_paths
        .iter()
        .find(|p| p.starts_with(drive) && p.len() > drive.len())
        .map(|p| Separator::detect([p.as_str()]).as_char())
        .unwrap_or('\\')
}

/// Joins a child name under a parent path, staying in the parent's
/// separator convention. Bare drive tokens consult `known_paths` the same
/// way [`accumulate_segments`] does.
pub fn join_child(parent: &str, name: &str, known_paths: &[String]) -> String {
    if parent.ends_with('/') || parent.ends_with('\\') {
        return format!("{parent}{name}");
    }
    if is_drive_token(parent) {
        let sep = drive_separator(parent, known_paths);
        return format!("{parent}{sep}{name}");
    }
    let sep = if parent.contains('\\') { '\\' } else { '/' };
    format!("{parent}{sep}{name}")
}

/// The parent of a path, computed from the path's own separator: the last
/// segment is dropped and the rest re-accumulated. Paths with at most one
/// segment have the browse root (`""`) as parent.
pub fn parent_path(path: &str) -> String {
    let segmented = SegmentedPath::of(path);
    if segmented.len() <= 1 {
        return String::new();
    }
    let known = [path.to_string()];
    let accumulated = segmented.accumulated(&known);
    accumulated[accumulated.len() - 2].clone()
}

/// True iff `path` equals `root` or lies somewhere beneath it. A plain
/// prefix check is not enough: `/ab` is not under `/a`, so the match must
/// end on a separator boundary. Roots that already end in a separator
/// (`/`, `C:\`) carry their own boundary.
pub fn is_under(path: &str, root: &str) -> bool {
    match path.strip_prefix(root) {
        Some(rest) => {
            rest.is_empty() || rest.starts_with(['/', '\\']) || root.ends_with(['/', '\\'])
        }
        None => false,
    }
}

/// Collation used for every entry list: case-insensitive lexicographic by
/// Unicode code point, raw name as tie-break. Deliberately total and
/// documented so the UI order is testable (`/data` sorts before `C:`).
pub fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
