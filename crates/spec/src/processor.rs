//! Single-location pipeline: load, classify and extract, resolve when
//! needed, then package the canonical form.

use crate::error::SpecError;
use crate::extract::{extract, ExtractOptions};
use crate::model::{SourceFormat, Spec};
use crate::package::{canonical_unresolved, encode_content};
use crate::resolve::Resolver;
use crate::source::{DefaultLoader, Source, SourceLoader};
use std::sync::Arc;
use std::time::Duration;

/// Turns one location (file path or URL) into a packaged [`Spec`].
///
/// Cheap to clone; clones share the loader.
#[derive(Clone)]
pub struct SpecProcessor {
    loader: Arc<dyn SourceLoader>,
    options: ExtractOptions,
}

impl SpecProcessor {
    pub fn new(loader: Arc<dyn SourceLoader>, options: ExtractOptions) -> Self {
        Self { loader, options }
    }

    /// Processor backed by [`DefaultLoader`] with the given fetch timeout.
    pub fn with_timeout(timeout: Duration, options: ExtractOptions) -> Result<Self, SpecError> {
        Ok(Self::new(Arc::new(DefaultLoader::new(timeout)?), options))
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    pub fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    /// Reads `location` and runs it through the whole pipeline.
    pub fn process(&self, location: &str) -> Result<Spec, SpecError> {
        let source = Source::parse(location)?;
        let bytes = self.loader.load(&source)?;
        self.process_bytes(location, &bytes)
    }

    /// Runs already-read bytes through the pipeline. `location` is the
    /// identity recorded on the spec and the base for relative references.
    pub fn process_bytes(&self, location: &str, bytes: &[u8]) -> Result<Spec, SpecError> {
        let format = SourceFormat::from_location(location);
        let extraction = extract(bytes, location, format, self.options)?;
        let mut spec = extraction.spec;

        let canonical = if spec.requires_resolution {
            let source = Source::parse(location)?;
            let mut resolver = Resolver::new(self.loader.as_ref());
            let resolved = resolver.resolve(&source, extraction.document)?;
            crate::document::to_yaml(&resolved)?.into_bytes()
        } else {
            canonical_unresolved(bytes, &extraction.document, extraction.format)?
        };

        spec.content = Some(encode_content(&canonical)?);
        tracing::debug!(
            target: "oasprobe::processor",
            location,
            canonical_bytes = canonical.len(),
            "packaged spec"
        );
        Ok(spec)
    }
}

impl std::fmt::Debug for SpecProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecProcessor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
