//! Plugin execution configurations in a Maven build descriptor.

use crate::build_config::HardenedXml;
use crate::types::BuildConfigError;
use roxmltree::Node;

/// Plugin whose executions declare spec inputs by default.
pub const OPENAPI_GENERATOR_PLUGIN: &str = "org.openapitools:openapi-generator-maven-plugin";

/// Group assumed when a `<plugin>` omits `<groupId>`.
const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

/// Returns the raw `<configuration>` element of every `<execution>` of the
/// plugin keyed `groupId:artifactId`, in document order.
///
/// Plugins are matched wherever they appear (`build/plugins`,
/// `pluginManagement`, profiles). The descriptor is parsed with the same
/// hardened preset as the fragments themselves.
pub fn plugin_configurations(
    descriptor: &str,
    plugin_key: &str,
) -> Result<Vec<String>, BuildConfigError> {
    let document = HardenedXml::parse(descriptor)?;
    let fragments: Vec<String> = document
        .descendants()
        .filter(|node| is_named(node, "plugin") && plugin_id(node).as_deref() == Some(plugin_key))
        .flat_map(|plugin| children_named(plugin, "executions"))
        .flat_map(|executions| children_named(executions, "execution"))
        .flat_map(|execution| children_named(execution, "configuration"))
        .map(|configuration| descriptor[configuration.range()].to_string())
        .collect();

    tracing::debug!(
        target: "oasprobe::build_config",
        plugin = plugin_key,
        configurations = fragments.len(),
        "read plugin executions"
    );
    Ok(fragments)
}

fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_named(child, name))
}

fn child_text(node: &Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| is_named(child, name))
        .and_then(|child| child.text())
        .map(|text| text.trim().to_string())
}

fn plugin_id(plugin: &Node<'_, '_>) -> Option<String> {
    let artifact = child_text(plugin, "artifactId")?;
    let group = child_text(plugin, "groupId").unwrap_or_else(|| DEFAULT_PLUGIN_GROUP.to_string());
    Some(format!("{group}:{artifact}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_config::declared_spec_paths;
    use oasprobe_test_utils::pom_with_generator;

    #[test]
    fn execution_configurations_are_returned_raw() {
        let pom = pom_with_generator(&["api/orders.yaml", "api/users.json"]);
        let configs = plugin_configurations(&pom, OPENAPI_GENERATOR_PLUGIN).unwrap();
        assert_eq!(configs.len(), 2);
        assert!(configs[0].starts_with("<configuration>"));
        assert!(configs[0].ends_with("</configuration>"));
        assert_eq!(
            declared_spec_paths(&configs[1]).unwrap(),
            vec!["api/users.json"]
        );
    }

    #[test]
    fn other_plugins_are_ignored() {
        let pom = r#"<project>
  <build><plugins>
    <plugin>
      <artifactId>maven-compiler-plugin</artifactId>
      <executions><execution><configuration><spec>no.yaml</spec></configuration></execution></executions>
    </plugin>
    <plugin>
      <groupId>org.openapitools</groupId>
      <artifactId>openapi-generator-maven-plugin</artifactId>
      <configuration><inputSpec>plugin-level.yaml</inputSpec></configuration>
    </plugin>
  </plugins></build>
</project>"#;
        assert!(plugin_configurations(pom, OPENAPI_GENERATOR_PLUGIN)
            .unwrap()
            .is_empty());
        assert_eq!(
            plugin_configurations(pom, "org.apache.maven.plugins:maven-compiler-plugin")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn descriptors_with_a_dtd_are_refused() {
        let pom = r#"<?xml version="1.0"?>
<!DOCTYPE project [<!ENTITY spec SYSTEM "http://attacker.invalid/x">]>
<project><build><plugins/></build></project>"#;
        assert!(plugin_configurations(pom, OPENAPI_GENERATOR_PLUGIN).is_err());
    }
}
