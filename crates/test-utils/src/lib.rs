//! Shared test utilities for oasprobe crates.
//!
//! Provides scratch source trees, sample spec documents, and guards for
//! tests that touch process-global state.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// OpenAPI 3 document in JSON with one server and a bearer scheme.
pub const PETSTORE_V3_JSON: &str = r##"{
  "openapi": "3.0.1",
  "info": { "title": "Petstore", "version": "1.0.7" },
  "servers": [
    { "url": "https://petstore.example.com/v1", "description": "production" }
  ],
  "paths": {
    "/pets": {
      "get": {
        "responses": {
          "200": {
            "description": "ok",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }
          }
        }
      }
    }
  },
  "components": {
    "schemas": { "Pet": { "type": "object" } },
    "securitySchemes": {
      "bearer": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
    }
  }
}
"##;

/// OpenAPI 3 document in YAML with an insecure server and no schemes.
pub const INVENTORY_V3_YAML: &str = "openapi: 3.0.3
info:
  title: Inventory
  version: 2.1.0
servers:
  - url: http://inventory.internal
paths: {}
";

/// Swagger 2 document in JSON with an apiKey definition.
pub const USERS_V2_JSON: &str = r#"{
  "swagger": "2.0",
  "info": { "title": "Users", "version": "v2" },
  "paths": {},
  "securityDefinitions": {
    "apiKeyAuth": { "type": "apiKey", "name": "X-Key", "in": "header" }
  }
}
"#;

/// YAML that is not an API spec.
pub const NOT_A_SPEC_YAML: &str = "name: build\non:\n  push: {}\n";

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = oasprobe_test_utils::set_env_var("OASPROBE_DOC_VAR", Some("value"));
/// assert_eq!(std::env::var("OASPROBE_DOC_VAR").unwrap(), "value");
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// A scratch project tree that is removed when dropped.
pub struct SourceTree {
    pub tempdir: tempfile::TempDir,
}

impl SourceTree {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            tempdir: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    /// Writes `content` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Absolute location string of `relative`, as recorded on a spec.
    pub fn location(&self, relative: &str) -> String {
        self.root().join(relative).to_string_lossy().into_owned()
    }

    /// Lays out a small Maven-style project:
    /// - `src/main/resources/api/petstore.json`
    /// - `src/main/resources/api/inventory.yaml`
    /// - `src/main/resources/legacy/users.json`
    /// - `.github/workflow.yml` (not a spec)
    pub fn with_sample_project() -> std::io::Result<Self> {
        let tree = Self::new()?;
        tree.write("src/main/resources/api/petstore.json", PETSTORE_V3_JSON)?;
        tree.write("src/main/resources/api/inventory.yaml", INVENTORY_V3_YAML)?;
        tree.write("src/main/resources/legacy/users.json", USERS_V2_JSON)?;
        tree.write(".github/workflow.yml", NOT_A_SPEC_YAML)?;
        Ok(tree)
    }

    /// Create an RAII guard that sets HOME to this tree's root.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.root().to_string_lossy()))
    }
}

/// A build descriptor declaring `specs` through the OpenAPI generator
/// plugin, one execution per path.
pub fn pom_with_generator(specs: &[&str]) -> String {
    let executions: String = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            format!(
                "        <execution>\n          <id>gen-{i}</id>\n          <configuration>\n            <inputSpec>{spec}</inputSpec>\n            <generatorName>spring</generatorName>\n          </configuration>\n        </execution>\n"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>shop</artifactId>
  <build>
    <plugins>
      <plugin>
        <groupId>org.openapitools</groupId>
        <artifactId>openapi-generator-maven-plugin</artifactId>
        <executions>
{executions}        </executions>
      </plugin>
    </plugins>
  </build>
</project>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_unset_variable() {
        let _g = env_guard();
        const KEY: &str = "OASPROBE_TEST_UTILS_TEST_VAR";
        std::env::remove_var(KEY);

        {
            let _guard = set_env_var(KEY, Some("test_value"));
            assert_eq!(std::env::var(KEY).ok(), Some("test_value".to_string()));
        }
        assert!(std::env::var(KEY).is_err());
    }

    #[test]
    fn guard_restores_removed_variable() {
        let _g = env_guard();
        const KEY: &str = "OASPROBE_TEST_REMOVE_VAR";
        std::env::set_var(KEY, "exists");

        {
            let _guard = set_env_var(KEY, None);
            assert!(std::env::var(KEY).is_err());
        }
        assert_eq!(std::env::var(KEY).ok(), Some("exists".to_string()));
        std::env::remove_var(KEY);
    }

    #[test]
    fn test_sample_project_layout() {
        let tree = SourceTree::with_sample_project().expect("fixture creation");
        assert!(tree.root().join("src/main/resources/api/petstore.json").is_file());
        assert!(tree.root().join(".github/workflow.yml").is_file());
        assert!(tree
            .location("src/main/resources/legacy/users.json")
            .ends_with("users.json"));
    }

    #[test]
    fn test_pom_lists_every_spec() {
        let pom = pom_with_generator(&["a.yaml", "b.json"]);
        assert!(pom.contains("<inputSpec>a.yaml</inputSpec>"));
        assert!(pom.contains("<inputSpec>b.json</inputSpec>"));
        assert_eq!(pom.matches("<execution>").count(), 2);
    }
}
