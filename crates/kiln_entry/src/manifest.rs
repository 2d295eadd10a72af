//! Parsing of the `META-INF/MANIFEST.MF` main section.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::EntryError;

/// Location of the manifest relative to the application root.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Main-section attributes of a JAR manifest.
///
/// Attributes are `Name: value` lines. A line starting with a single space
/// continues the previous value. The first blank line ends the main section;
/// per-entry sections after it are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: BTreeMap<String, String>,
}

impl Manifest {
    /// Parses manifest text.
    pub fn parse(content: &str) -> Self {
        let mut attributes: BTreeMap<String, String> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                if attributes.is_empty() {
                    continue;
                }
                break;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                if let Some(value) = current.as_ref().and_then(|k| attributes.get_mut(k)) {
                    value.push_str(rest);
                }
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_string();
                attributes.insert(key.clone(), value.trim().to_string());
                current = Some(key);
            }
        }

        Self { attributes }
    }

    /// Loads the manifest of the application at `app_root`.
    ///
    /// Returns `Ok(None)` if the application has no manifest.
    pub fn load(app_root: &Path) -> Result<Option<Self>, EntryError> {
        let path = app_root.join(MANIFEST_PATH);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EntryError::Io { path, source: e }),
        }
    }

    /// Returns the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Removes an attribute.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the manifest has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes() {
        let m = Manifest::parse(
            "Manifest-Version: 1.0\nStart-Class: com.example.App\nMain-Class: org.springframework.boot.loader.JarLauncher\n",
        );
        assert_eq!(m.get("Manifest-Version"), Some("1.0"));
        assert_eq!(m.get("Start-Class"), Some("com.example.App"));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn continuation_lines_join() {
        let m = Manifest::parse("Class-Path: lib/a.jar lib/b\n .jar\nMain-Class: Foo\n");
        assert_eq!(m.get("Class-Path"), Some("lib/a.jar lib/b.jar"));
        assert_eq!(m.get("Main-Class"), Some("Foo"));
    }

    #[test]
    fn crlf_line_endings() {
        let m = Manifest::parse("Main-Class: Foo\r\nClass-Path: x\r\n");
        assert_eq!(m.get("Main-Class"), Some("Foo"));
        assert_eq!(m.get("Class-Path"), Some("x"));
    }

    #[test]
    fn stops_at_first_section_break() {
        let m = Manifest::parse("Main-Class: Foo\n\nName: com/example/\nMain-Class: Bar\n");
        assert_eq!(m.get("Main-Class"), Some("Foo"));
        assert_eq!(m.get("Name"), None);
    }

    #[test]
    fn empty_content() {
        assert!(Manifest::parse("").is_empty());
    }

    #[test]
    fn load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Manifest::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn load_existing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("META-INF")).unwrap();
        std::fs::write(
            dir.path().join("META-INF").join("MANIFEST.MF"),
            "Start-Class: com.example.App\n",
        )
        .unwrap();
        let m = Manifest::load(dir.path()).unwrap().unwrap();
        assert_eq!(m.get("Start-Class"), Some("com.example.App"));
    }

    #[test]
    fn from_iterator_and_edit() {
        let mut m: Manifest = [("Start-Class", "A")].into_iter().collect();
        m.insert("Main-Class", "B");
        assert_eq!(m.remove("Start-Class").as_deref(), Some("A"));
        assert_eq!(m.get("Main-Class"), Some("B"));
    }
}
