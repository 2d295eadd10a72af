//! Platform path-list handling for classpath composition.

/// Separator between entries of a path list such as a classpath.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';

/// Separator between entries of a path list such as a classpath.
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Joins path-list entries with [`PATH_LIST_SEPARATOR`], skipping empty ones.
pub fn join_path_list<I, S>(entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for entry in entries {
        let entry = entry.as_ref();
        if entry.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(PATH_LIST_SEPARATOR);
        }
        out.push_str(entry);
    }
    out
}
