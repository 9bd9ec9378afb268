use crate::build_config::has_spec_suffix;
use crate::sniff::sniff_file;
use crate::types::Candidate;
use oasprobe_spec::SourceFormat;
use std::path::Path;
use walkdir::WalkDir;

/// Walk limits for [`find_spec_files_with`].
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Deepest directory level visited below the root; `None` walks the
    /// whole tree.
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_links: false,
        }
    }
}

/// Lazy sequence of spec files under a root; see [`find_spec_files`].
pub struct SpecFiles {
    walk: Option<walkdir::IntoIter>,
}

impl Iterator for SpecFiles {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let walk = self.walk.as_mut()?;
        for entry in walk.by_ref().filter_map(|e| e.ok()) {
            if let Some(candidate) = candidate_from(&entry) {
                return Some(candidate);
            }
        }
        None
    }
}

fn candidate_from(entry: &walkdir::DirEntry) -> Option<Candidate> {
    if !entry.file_type().is_file() {
        return None;
    }
    let name = entry.file_name().to_str()?;
    if !has_spec_suffix(name) {
        return None;
    }
    let format = SourceFormat::from_location(name);
    if !sniff_file(entry.path(), format) {
        return None;
    }
    tracing::trace!(
        target: "oasprobe::discovery",
        path = %entry.path().display(),
        "candidate spec"
    );
    Some(Candidate {
        path: entry.path().to_path_buf(),
        format,
    })
}

/// Recursively finds `.json`, `.yaml`, and `.yml` files under `root` that
/// carry an `openapi` or `swagger` key. Extensions match exactly, as for
/// declared paths.
///
/// The walk is lazy: files are read and sniffed as the iterator advances.
/// Order follows directory enumeration and is not stable. A missing or
/// unreadable root yields nothing.
pub fn find_spec_files(root: &Path) -> SpecFiles {
    find_spec_files_with(root, &DiscoveryConfig::default())
}

/// [`find_spec_files`] with explicit walk limits.
pub fn find_spec_files_with(root: &Path, config: &DiscoveryConfig) -> SpecFiles {
    if !root.is_dir() {
        tracing::debug!(
            target: "oasprobe::discovery",
            root = %root.display(),
            "scan root is not a readable directory"
        );
        return SpecFiles { walk: None };
    }
    let mut walk = WalkDir::new(root)
        .min_depth(1)
        .follow_links(config.follow_links);
    if let Some(depth) = config.max_depth {
        walk = walk.max_depth(depth);
    }
    SpecFiles {
        walk: Some(walk.into_iter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn only_sniffed_spec_extensions_are_yielded() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/b/api.yml"), "openapi: 3.0.0\n").unwrap();
        fs::write(tmp.path().join("a/spec.json"), r#"{"swagger": "2.0"}"#).unwrap();
        fs::write(tmp.path().join("a/upper.JSON"), r#"{"swagger": "2.0"}"#).unwrap();
        fs::write(tmp.path().join("a/upper.YML"), "openapi: 3.0.0\n").unwrap();
        fs::write(tmp.path().join("a/readme.md"), "openapi: 3.0.0\n").unwrap();
        fs::write(tmp.path().join("a/config.yaml"), "server:\n  port: 80\n").unwrap();
        fs::write(tmp.path().join("a/broken.json"), "{").unwrap();

        let mut names: Vec<_> = find_spec_files(tmp.path())
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["api.yml", "spec.json"]);
    }

    #[test]
    fn formats_follow_extensions() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("x.json"), r#"{"openapi": "3.0.0"}"#).unwrap();
        let found: Vec<_> = find_spec_files(tmp.path()).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].format, SourceFormat::Json);
        assert!(found[0].location().ends_with("x.json"));
    }

    #[test]
    fn missing_root_is_empty() {
        let tmp = tempdir().unwrap();
        assert_eq!(find_spec_files(&tmp.path().join("nope")).count(), 0);
    }

    #[test]
    fn depth_limit_is_honoured() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("one/two")).unwrap();
        fs::write(tmp.path().join("top.yaml"), "openapi: 3.0.0\n").unwrap();
        fs::write(tmp.path().join("one/two/deep.yaml"), "openapi: 3.0.0\n").unwrap();
        let config = DiscoveryConfig {
            max_depth: Some(1),
            ..DiscoveryConfig::default()
        };
        assert_eq!(find_spec_files_with(tmp.path(), &config).count(), 1);
    }

    #[test]
    fn default_walk_has_no_depth_limit() {
        let tmp = tempdir().unwrap();
        let deep: std::path::PathBuf = (0..40).map(|i| format!("d{i}")).collect();
        fs::create_dir_all(tmp.path().join(&deep)).unwrap();
        fs::write(tmp.path().join(&deep).join("deep.yaml"), "openapi: 3.0.0\n").unwrap();

        let found: Vec<_> = find_spec_files(tmp.path()).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].location().ends_with("deep.yaml"));
    }
}
