use serde::{Deserialize, Serialize};

/// Settings read from `.simgraph.toml`.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimgraphConfig {
    /// Label written to the `InteractionType` column of the edge list
    #[serde(default = "default_interaction_type")]
    pub interaction_type: String,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for SimgraphConfig {
    fn default() -> Self {
        Self {
            interaction_type: default_interaction_type(),
            output: OutputConfig::default(),
        }
    }
}

impl SimgraphConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_interaction_type(&self.interaction_type)?;
        self.output.validate()
    }
}

/// File names of the artifacts written into the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_adjacency_matrix")]
    pub adjacency_matrix: String,

    #[serde(default = "default_components")]
    pub components: String,

    #[serde(default = "default_component_matrices")]
    pub component_matrices: String,

    #[serde(default = "default_edge_list")]
    pub edge_list: String,

    #[serde(default = "default_summary")]
    pub summary: String,

    /// Whether to write the JSON run summary
    #[serde(default = "default_write_summary")]
    pub write_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            adjacency_matrix: default_adjacency_matrix(),
            components: default_components(),
            component_matrices: default_component_matrices(),
            edge_list: default_edge_list(),
            summary: default_summary(),
            write_summary: default_write_summary(),
        }
    }
}

impl OutputConfig {
    fn file_names(&self) -> [(&'static str, &str); 5] {
        [
            ("adjacency_matrix", self.adjacency_matrix.as_str()),
            ("components", self.components.as_str()),
            ("component_matrices", self.component_matrices.as_str()),
            ("edge_list", self.edge_list.as_str()),
            ("summary", self.summary.as_str()),
        ]
    }

    /// File names must be plain, non-empty and distinct.
    pub fn validate(&self) -> Result<(), String> {
        let names = self.file_names();
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(format!("output.{} must not be empty", field));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(format!(
                    "output.{} must be a plain file name, got '{}'",
                    field, name
                ));
            }
        }
        for (i, (field, name)) in names.iter().enumerate() {
            if let Some((other, _)) = names[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(format!(
                    "output.{} and output.{} both use '{}'",
                    field, other, name
                ));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_interaction_type(label: &str) -> Result<(), String> {
    if label.trim().is_empty() {
        return Err("interaction_type must not be empty".to_string());
    }
    if label.contains(['\t', '\n', '\r']) {
        return Err("interaction_type must not contain tabs or line breaks".to_string());
    }
    Ok(())
}

fn default_interaction_type() -> String {
    "pp".to_string()
}
fn default_adjacency_matrix() -> String {
    "adjacency_matrix.txt".to_string()
}
fn default_components() -> String {
    "components.txt".to_string()
}
fn default_component_matrices() -> String {
    "component_adjacency_matrices.txt".to_string()
}
fn default_edge_list() -> String {
    "edge_list.tsv".to_string()
}
fn default_summary() -> String {
    "summary.json".to_string()
}
fn default_write_summary() -> bool {
    true
}
