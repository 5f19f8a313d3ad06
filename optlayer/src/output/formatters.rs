//! Output formatter implementations.

use crate::{Error, RawMapping, Result};

use super::OutputFormatter;

/// Returns the mapping without unset fields.
fn set_fields(mapping: &RawMapping) -> RawMapping {
    mapping
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn render_error(format: &'static str, message: impl ToString) -> Error {
    Error::Render {
        format,
        message: message.to_string(),
    }
}

/// Formatter for TOML output.
pub struct TomlFormatter;

impl OutputFormatter for TomlFormatter {
    fn format(&self, mapping: &RawMapping) -> Result<String> {
        // TOML has no null
        toml::to_string_pretty(&set_fields(mapping)).map_err(|e| render_error("toml", e))
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, mapping: &RawMapping) -> Result<String> {
        serde_yaml::to_string(mapping).map_err(|e| render_error("yaml", e))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, mapping: &RawMapping) -> Result<String> {
        serde_json::to_string_pretty(mapping).map_err(|e| render_error("json", e))
    }
}

/// Formatter for `PREFIX_FIELD=value` lines.
///
/// Values that contain whitespace, quotes or shell metacharacters are
/// double-quoted.
pub struct EnvFormatter {
    prefix: String,
}

impl EnvFormatter {
    /// Create a new env formatter for the given variable prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

/// Quotes a value if a shell or dotenv reader would misread it bare.
fn quote_env_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '$' | '#' | '`'));

    if needs_quotes {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$")
            .replace('`', "\\`");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

impl OutputFormatter for EnvFormatter {
    fn format(&self, mapping: &RawMapping) -> Result<String> {
        let lines: Vec<String> = set_fields(mapping)
            .iter()
            .map(|(key, value)| {
                let rendered = quote_env_value(&value.to_string());
                format!("{}{}={rendered}", self.prefix, key.to_uppercase())
            })
            .collect();

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn create_test_mapping() -> RawMapping {
        let mut map = RawMapping::new();
        map.insert("timeout".to_string(), Value::from(45));
        map.insert("name".to_string(), Value::from("default"));
        map.insert("ratio".to_string(), Value::Null);
        map
    }

    #[test]
    fn test_toml_formatter_omits_unset() {
        let output = TomlFormatter.format(&create_test_mapping()).unwrap();
        assert!(output.contains("timeout = 45"));
        assert!(output.contains("name = \"default\""));
        assert!(!output.contains("ratio"));
    }

    #[test]
    fn test_toml_formatter_output_is_readable_config() {
        let output = TomlFormatter.format(&create_test_mapping()).unwrap();
        let reparsed: toml::Table = output.parse().unwrap();
        assert_eq!(reparsed["timeout"].as_integer(), Some(45));
    }

    #[test]
    fn test_toml_formatter_empty() {
        let output = TomlFormatter.format(&RawMapping::new()).unwrap();
        assert!(output.trim().is_empty());
    }

    #[test]
    fn test_yaml_formatter() {
        let output = YamlFormatter.format(&create_test_mapping()).unwrap();
        assert!(output.contains("timeout: 45"));
        assert!(output.contains("name: default"));
        assert!(output.contains("ratio: null"));
    }

    #[test]
    fn test_json_formatter() {
        let output = JsonFormatter.format(&create_test_mapping()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["timeout"], 45);
        assert_eq!(parsed["name"], "default");
        assert!(parsed["ratio"].is_null());
    }

    #[test]
    fn test_env_formatter() {
        let output = EnvFormatter::new("MYAPP_")
            .format(&create_test_mapping())
            .unwrap();
        assert_eq!(output, "MYAPP_NAME=default\nMYAPP_TIMEOUT=45");
    }

    #[test]
    fn test_env_formatter_quotes() {
        let mut map = RawMapping::new();
        map.insert("name".to_string(), Value::from("two words"));
        map.insert("tags".to_string(), Value::List(vec![Value::from("a")]));
        let output = EnvFormatter::new("APP_").format(&map).unwrap();
        assert!(output.contains("APP_NAME=\"two words\""));
        assert!(output.contains("APP_TAGS=\"[\\\"a\\\"]\""));
    }

    #[test]
    fn test_quote_env_value() {
        assert_eq!(quote_env_value("plain"), "plain");
        assert_eq!(quote_env_value(""), "\"\"");
        assert_eq!(quote_env_value("a b"), "\"a b\"");
        assert_eq!(quote_env_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_env_value("$HOME"), "\"\\$HOME\"");
    }
}
