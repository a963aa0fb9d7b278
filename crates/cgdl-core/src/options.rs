use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized reader settings. Every field has a default so partial
/// configurations deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderOptions {
    /// Class that is open before the first `[[ ... ]]` line.
    pub default_class: String,
    /// Create the target of an outgoing edge when it does not exist yet.
    pub create_stub_nodes_for_edges: bool,
    /// Report identifier validation failures as errors; when off they are ignored.
    pub strict: bool,
    /// Accept `": Label"` as an edge to `Label` in the current class.
    pub allow_same_class_edge_shorthand: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            default_class: String::new(),
            create_stub_nodes_for_edges: true,
            strict: true,
            allow_same_class_edge_shorthand: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConfigError {
    pub field: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReaderOptionsParse {
    pub options: ReaderOptions,
    pub warnings: Vec<String>,
    pub errors: Vec<ConfigError>,
}

impl ReaderOptionsParse {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lenient adapter from a JSON object to [`ReaderOptions`].
///
/// Unknown keys become warnings; values of the wrong type become errors and
/// leave the default in place.
#[must_use]
pub fn parse_reader_options_value(value: &Value) -> ReaderOptionsParse {
    let mut parsed = ReaderOptionsParse::default();
    let Some(object) = value.as_object() else {
        parsed.errors.push(ConfigError {
            field: "$".to_string(),
            value: value.to_string(),
            message: "Reader options root must be a JSON object".to_string(),
        });
        return parsed;
    };

    for (key, raw_value) in object {
        match key.as_str() {
            "defaultClass" => match raw_value.as_str() {
                Some(class_name) => parsed.options.default_class = class_name.to_string(),
                None => push_type_error(&mut parsed, key, raw_value, "must be a string"),
            },
            "createStubNodesForEdges" => match raw_value.as_bool() {
                Some(flag) => parsed.options.create_stub_nodes_for_edges = flag,
                None => push_type_error(&mut parsed, key, raw_value, "must be a boolean"),
            },
            "strict" => match raw_value.as_bool() {
                Some(flag) => parsed.options.strict = flag,
                None => push_type_error(&mut parsed, key, raw_value, "must be a boolean"),
            },
            "allowSameClassEdgeShorthand" => match raw_value.as_bool() {
                Some(flag) => parsed.options.allow_same_class_edge_shorthand = flag,
                None => push_type_error(&mut parsed, key, raw_value, "must be a boolean"),
            },
            other => parsed
                .warnings
                .push(format!("Unsupported reader option '{other}' ignored")),
        }
    }

    parsed
}

fn push_type_error(parsed: &mut ReaderOptionsParse, field: &str, value: &Value, message: &str) {
    parsed.errors.push(ConfigError {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    });
}
