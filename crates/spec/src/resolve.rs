//! External reference flattening.
//!
//! Every `$ref` that points outside the document is replaced by the content
//! it points to. Flattening is one level deep: references carried in by the
//! inlined content are not followed, so reference cycles cannot expand
//! without bound. They are rewritten to stay valid from the root document.
//! A reference that cannot be followed is kept as written. Bookkeeping fields that have no place in the canonical
//! form are then stripped from the whole tree.

use crate::document::{parse_document, strip_fields, to_yaml};
use crate::error::SpecError;
use crate::extract::classify;
use crate::model::SourceFormat;
use crate::refs::is_local_ref;
use crate::source::{is_remote, Source, SourceLoader};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::Path;

/// Fields removed from every object of a resolved document.
pub const STRIPPED_FIELDS: [&str; 4] = ["style", "explode", "exampleSetFlag", "jsonSchema"];

const REF_KEY: &str = "$ref";

/// Flattens external references of one spec.
///
/// Referenced documents are loaded at most once per resolver.
pub struct Resolver<'a> {
    loader: &'a dyn SourceLoader,
    documents: HashMap<String, Value>,
}

impl<'a> Resolver<'a> {
    pub fn new(loader: &'a dyn SourceLoader) -> Self {
        Self {
            loader,
            documents: HashMap::new(),
        }
    }

    /// Loads `location`, flattens it, and returns the canonical YAML text.
    pub fn resolve_location(&mut self, location: &str) -> Result<String, SpecError> {
        let source = Source::parse(location)?;
        let bytes = self
            .loader
            .load(&source)
            .map_err(|e| SpecError::resolution(location, e.to_string()))?;
        let document = parse_document(&bytes, SourceFormat::from_location(location), location)
            .map_err(|e| SpecError::resolution(location, e.to_string()))?;
        let resolved = self.resolve(&source, document)?;
        to_yaml(&resolved)
    }

    /// Flattens an already parsed root document read from `source`.
    pub fn resolve(&mut self, source: &Source, mut document: Value) -> Result<Value, SpecError> {
        let location = source.to_string();
        let is_spec = document
            .as_mapping()
            .and_then(classify)
            .is_some();
        if !is_spec {
            return Err(SpecError::resolution(
                location,
                "document can not be parsed as an OpenAPI or Swagger specification",
            ));
        }

        let inlined = self.flatten(&mut document, source);
        strip_fields(&mut document, &STRIPPED_FIELDS);
        tracing::debug!(
            target: "oasprobe::resolve",
            location = %location,
            inlined,
            "flattened external references"
        );
        Ok(document)
    }

    /// Inlines external references under `value`, returning how many were replaced.
    ///
    /// A reference whose target cannot be loaded or found is left as written.
    fn flatten(&mut self, value: &mut Value, base: &Source) -> usize {
        match value {
            Value::Mapping(map) => {
                if let Some(target) = external_target(map) {
                    return match self.lookup(base, &target) {
                        Ok(mut replacement) => {
                            rebase_refs(&mut replacement, file_part(&target));
                            let merged = merge_siblings(replacement, map);
                            *value = merged;
                            1
                        }
                        Err(err) => {
                            tracing::warn!(
                                target: "oasprobe::resolve",
                                location = %base,
                                reference = %target,
                                error = %err,
                                "leaving unresolved reference in place"
                            );
                            0
                        }
                    };
                }
                map.iter_mut()
                    .map(|(_, child)| self.flatten(child, base))
                    .sum()
            }
            Value::Sequence(items) => items.iter_mut().map(|item| self.flatten(item, base)).sum(),
            Value::Tagged(tagged) => self.flatten(&mut tagged.value, base),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
        }
    }

    fn lookup(&mut self, base: &Source, target: &str) -> Result<Value, SpecError> {
        let (file, fragment) = match target.split_once('#') {
            Some((file, fragment)) => (file, fragment),
            None => (target, ""),
        };
        let source = base.join(file)?;
        let key = source.to_string();

        if !self.documents.contains_key(&key) {
            let bytes = self.loader.load(&source)?;
            let document = parse_document(&bytes, SourceFormat::from_location(&key), &key)?;
            self.documents.insert(key.clone(), document);
        }
        let document = &self.documents[&key];

        follow_pointer(document, fragment).cloned().ok_or_else(|| {
            SpecError::resolution(
                base.to_string(),
                format!("reference '{target}' points at nothing in {key}"),
            )
        })
    }
}

/// Flattens the spec at `location` with `loader` and renders canonical YAML.
pub fn resolve_to_yaml(loader: &dyn SourceLoader, location: &str) -> Result<String, SpecError> {
    Resolver::new(loader).resolve_location(location)
}

fn external_target(map: &Mapping) -> Option<String> {
    let target = map.get(REF_KEY)?.as_str()?.trim();
    if target.is_empty() || is_same_document(target) {
        None
    } else {
        Some(target.to_string())
    }
}

/// Pointers (`#/a`), anchors (`#pet`) and the bare `#` stay in the document.
fn is_same_document(target: &str) -> bool {
    is_local_ref(target) || target.starts_with('#')
}

fn file_part(target: &str) -> &str {
    target.split_once('#').map_or(target, |(file, _)| file)
}

fn is_absolute_target(target: &str) -> bool {
    is_remote(target) || target.starts_with('/') || Path::new(target).is_absolute()
}

/// Rewrites references inside content inlined from `file` so they still
/// point where they did, read from the root document.
///
/// Same-document targets gain the file prefix; relative file targets are
/// re-rooted at the directory of `file`.
fn rebase_refs(value: &mut Value, file: &str) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map.iter_mut() {
                if key.as_str() == Some(REF_KEY) {
                    if let Value::String(target) = child {
                        *target = rebase_target(target.trim(), file);
                    }
                } else {
                    rebase_refs(child, file);
                }
            }
        }
        Value::Sequence(items) => items.iter_mut().for_each(|item| rebase_refs(item, file)),
        Value::Tagged(tagged) => rebase_refs(&mut tagged.value, file),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn rebase_target(target: &str, file: &str) -> String {
    if target.starts_with('#') {
        return format!("{file}{target}");
    }
    if target.is_empty() || is_absolute_target(target) {
        return target.to_string();
    }
    let dir = file.rfind('/').map_or("", |i| &file[..=i]);
    format!("{dir}{target}")
}

/// Keys written next to `$ref` override the inlined object's own keys.
fn merge_siblings(replacement: Value, original: &Mapping) -> Value {
    let siblings: Vec<_> = original
        .iter()
        .filter(|(k, _)| k.as_str() != Some(REF_KEY))
        .collect();
    match replacement {
        Value::Mapping(mut inlined) if !siblings.is_empty() => {
            for (k, v) in siblings {
                inlined.insert(k.clone(), v.clone());
            }
            Value::Mapping(inlined)
        }
        other => other,
    }
}

/// Walks an RFC 6901 JSON pointer (`/a/b~1c/0`). An empty pointer is the
/// whole document.
fn follow_pointer<'v>(document: &'v Value, pointer: &str) -> Option<&'v Value> {
    let pointer = pointer.strip_prefix('/').unwrap_or(pointer);
    if pointer.is_empty() {
        return Some(document);
    }
    pointer.split('/').try_fold(document, |node, raw| {
        let token = raw.replace("~1", "/").replace("~0", "~");
        match node {
            Value::Mapping(map) => map.get(token.as_str()).or_else(|| {
                let n: u64 = token.parse().ok()?;
                map.get(Value::Number(n.into()))
            }),
            Value::Sequence(items) => items.get(token.parse::<usize>().ok()?),
            Value::Tagged(tagged) => follow_pointer(&tagged.value, &format!("/{raw}")),
            _ => None,
        }
    })
}
