//! The scan pipeline.
//!
//! Local candidates are processed on the rayon pool, network sources each on
//! their own thread, and the results are gathered before the single-writer
//! merge with declared paths.

use crate::merge::merge;
use crate::report::{RunReport, Skipped};
use oasprobe_discovery::{find_spec_files, plugin_configurations, scan_fragments};
use oasprobe_spec::{Spec, SpecError, SpecProcessor};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::thread;

/// Inputs of one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Directory walked for spec files.
    pub root: Option<PathBuf>,
    /// Raw build-configuration fragments (untrusted XML).
    pub build_configs: Vec<String>,
    /// Additional `http(s)://` sources.
    pub urls: Vec<String>,
}

/// Runs scan requests with one [`SpecProcessor`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    processor: SpecProcessor,
}

type Outcome = (String, Result<Spec, SpecError>);

impl Pipeline {
    pub fn new(processor: SpecProcessor) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &SpecProcessor {
        &self.processor
    }

    /// Discovers, processes, and merges everything `request` names.
    ///
    /// Per-location failures end up in [`RunReport::skipped`]; the scan
    /// itself does not fail.
    pub fn scan(&self, request: &ScanRequest) -> RunReport {
        let candidates: Vec<String> = request
            .root
            .as_deref()
            .map(|root| {
                find_spec_files(&absolute_root(root))
                    .map(|c| c.location())
                    .collect()
            })
            .unwrap_or_default();
        let urls = unique(&request.urls);
        tracing::info!(
            target: "oasprobe::pipeline",
            candidates = candidates.len(),
            urls = urls.len(),
            fragments = request.build_configs.len(),
            "starting scan"
        );

        let (local, remote) = thread::scope(|scope| {
            let fetches: Vec<_> = urls
                .iter()
                .map(|url| {
                    let processor = &self.processor;
                    (*url, scope.spawn(move || processor.process(url)))
                })
                .collect();

            let local: Vec<Outcome> = candidates
                .par_iter()
                .map(|location| (location.clone(), self.processor.process(location)))
                .collect();

            let remote: Vec<Outcome> = fetches
                .into_iter()
                .map(|(url, handle)| {
                    let outcome = handle.join().unwrap_or_else(|_| {
                        Err(SpecError::Fetch {
                            location: url.to_string(),
                            message: "fetch thread panicked".into(),
                        })
                    });
                    (url.to_string(), outcome)
                })
                .collect();
            (local, remote)
        });

        let mut discovered = Vec::new();
        let mut skipped = Vec::new();
        for (location, outcome) in local.into_iter().chain(remote) {
            match outcome {
                Ok(spec) => discovered.push(spec),
                Err(error) => skipped.push(Skipped::logged(location, error)),
            }
        }

        let declared = scan_fragments(&request.build_configs);
        for rejected in declared.rejected {
            skipped.push(Skipped::new(
                format!("build configuration fragment #{}", rejected.index),
                rejected.error,
            ));
        }

        let (specs, merge_skipped) = merge(discovered, &declared.paths, |path| {
            self.processor.process(path)
        });
        skipped.extend(merge_skipped);

        tracing::info!(
            target: "oasprobe::pipeline",
            specs = specs.len(),
            skipped = skipped.len(),
            "scan complete"
        );
        RunReport {
            specs,
            skipped,
            issues: Vec::new(),
        }
    }
}

/// Walk root as an absolute path, so discovered locations are absolute.
fn absolute_root(root: &Path) -> PathBuf {
    std::fs::canonicalize(root).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(root))
            .unwrap_or_else(|_| root.to_path_buf())
    })
}

fn unique(urls: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    urls.iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty() && seen.insert(*u))
        .collect()
}

/// Reads a build descriptor and returns the configuration fragments of
/// every plugin in `plugins`.
pub fn descriptor_fragments(path: &Path, plugins: &[String]) -> Result<Vec<String>, Skipped> {
    let location = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| Skipped::logged(&location, e))?;
    let mut fragments = Vec::new();
    for plugin in plugins {
        let found = plugin_configurations(&text, plugin).map_err(|e| Skipped::logged(&location, e))?;
        fragments.extend(found);
    }
    Ok(fragments)
}

/// Reads a raw build-configuration fragment from disk.
pub fn read_build_config(path: &Path) -> Result<String, Skipped> {
    std::fs::read_to_string(path).map_err(|e| Skipped::logged(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasprobe_spec::ExtractOptions;
    use oasprobe_test_utils::{pom_with_generator, SourceTree, INVENTORY_V3_YAML};
    use std::time::Duration;

    fn pipeline() -> Pipeline {
        Pipeline::new(
            SpecProcessor::with_timeout(Duration::from_secs(5), ExtractOptions::default()).unwrap(),
        )
    }

    #[test]
    fn urls_are_deduplicated_in_order() {
        let urls = vec![
            "https://b/x.yaml".to_string(),
            " https://a/y.yaml".to_string(),
            "https://b/x.yaml".to_string(),
            String::new(),
        ];
        assert_eq!(unique(&urls), vec!["https://b/x.yaml", "https://a/y.yaml"]);
    }

    #[test]
    fn descriptor_fragments_cover_requested_plugins() {
        let tree = SourceTree::new().unwrap();
        let pom = tree
            .write("pom.xml", &pom_with_generator(&["api/a.yaml"]))
            .unwrap();
        let plugins = vec![oasprobe_discovery::OPENAPI_GENERATOR_PLUGIN.to_string()];
        let fragments = descriptor_fragments(&pom, &plugins).unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("api/a.yaml"));

        let skipped = descriptor_fragments(&tree.root().join("missing.xml"), &plugins).unwrap_err();
        assert!(skipped.location.ends_with("missing.xml"));
    }

    #[test]
    fn declared_duplicates_of_discovered_files_are_not_added() {
        let tree = SourceTree::new().unwrap();
        tree.write("api/inventory.yaml", INVENTORY_V3_YAML).unwrap();
        let location = tree.location("api/inventory.yaml");

        let request = ScanRequest {
            root: Some(tree.root().to_path_buf()),
            build_configs: vec![format!("<inputSpec>{location}</inputSpec>")],
            urls: Vec::new(),
        };
        let report = pipeline().scan(&request);
        assert_eq!(report.specs.len(), 1);
        assert_eq!(report.specs[0].location, location);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn relative_roots_are_made_absolute() {
        assert!(absolute_root(Path::new(".")).is_absolute());
        assert!(absolute_root(Path::new("no/such/dir")).is_absolute());

        let tree = SourceTree::new().unwrap();
        tree.write("api/inventory.yaml", INVENTORY_V3_YAML).unwrap();
        let nested = tree.root().join("api").join("..");
        let report = pipeline().scan(&ScanRequest {
            root: Some(nested),
            ..ScanRequest::default()
        });
        assert_eq!(report.specs.len(), 1);
        let location = Path::new(&report.specs[0].location);
        assert!(location.is_absolute());
        assert!(!report.specs[0].location.contains(".."));
    }

    #[test]
    fn no_root_means_no_walk() {
        let report = pipeline().scan(&ScanRequest::default());
        assert!(report.specs.is_empty());
        assert!(report.skipped.is_empty());
    }
}
