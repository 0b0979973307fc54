use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.wadlgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WadlgenConfig {
    /// Root directory searched recursively for `.xsd` and `.wadl` documents.
    pub api_root: String,
    /// Output directory for client-side models and enums.
    pub client_output: String,
    /// Output directory for server-side constructors and their index.
    pub server_output: String,
    pub naming: NamingConfig,
    pub http: HttpConfig,
    pub client: ClientConfig,
}

impl Default for WadlgenConfig {
    fn default() -> Self {
        Self {
            api_root: "wadl".to_string(),
            client_output: "models".to_string(),
            server_output: "wadltypegen".to_string(),
            naming: NamingConfig::default(),
            http: HttpConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

/// How type names are derived and matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// A target namespace containing this marker is the home namespace; types from
    /// any other namespace are prefixed with their source file name.
    pub home_namespace: String,
    /// Name fragment identifying list companions, e.g. `plcm-user-list` lists `plcm-user`.
    pub list_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            home_namespace: "polycom".to_string(),
            list_suffix: "-list".to_string(),
        }
    }
}

/// Which HTTP methods and statuses count when collecting paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub read_method: String,
    pub success_statuses: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            read_method: "GET".to_string(),
            success_statuses: vec!["200".to_string()],
        }
    }
}

/// Client model generation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub model_base: String,
    pub collection_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model_base: "PlcmModel".to_string(),
            collection_base: "PlcmCollection".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".wadlgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<WadlgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: WadlgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# wadlgen configuration
api_root: wadl            # searched recursively for .xsd and .wadl files
client_output: models     # *-model.js and *-enum.js
server_output: wadltypegen  # constructors and index.js

naming:
  home_namespace: polycom  # namespaces without this marker get a file-name prefix
  list_suffix: -list       # plcm-user-list is folded into plcm-user

http:
  read_method: GET
  success_statuses: ["200"]

client:
  model_base: PlcmModel
  collection_base: PlcmCollection
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WadlgenConfig::default();
        assert_eq!(config.api_root, "wadl");
        assert_eq!(config.client_output, "models");
        assert_eq!(config.server_output, "wadltypegen");
        assert_eq!(config.naming.home_namespace, "polycom");
        assert_eq!(config.naming.list_suffix, "-list");
        assert_eq!(config.http.read_method, "GET");
        assert_eq!(config.http.success_statuses, vec!["200"]);
        assert_eq!(config.client.model_base, "PlcmModel");
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
api_root: api
client_output: web/models
server_output: srv/types
naming:
  home_namespace: example.com
  list_suffix: -collection
http:
  read_method: GET
  success_statuses: ["200", "206"]
client:
  model_base: BaseModel
  collection_base: BaseCollection
"#;
        let config: WadlgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.api_root, "api");
        assert_eq!(config.client_output, "web/models");
        assert_eq!(config.server_output, "srv/types");
        assert_eq!(config.naming.home_namespace, "example.com");
        assert_eq!(config.naming.list_suffix, "-collection");
        assert_eq!(config.http.success_statuses.len(), 2);
        assert_eq!(config.client.model_base, "BaseModel");
        assert_eq!(config.client.collection_base, "BaseCollection");
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "api_root: schemas\n";
        let config: WadlgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.api_root, "schemas");
        // Defaults applied
        assert_eq!(config.client_output, "models");
        assert_eq!(config.naming.list_suffix, "-list");
    }

    #[test]
    fn test_default_content_parses() {
        let config: WadlgenConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.server_output, "wadltypegen");
        assert_eq!(config.client.collection_base, "PlcmCollection");
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = Path::new("definitely/not/here/.wadlgen.yaml");
        assert!(load_config(path).unwrap().is_none());
    }
}
