//! Input schema helpers
//!
//! Tool schemas are derived from a list of declared parameters: every
//! parameter is a string, parameters with a default carry it in the schema,
//! and parameters without one are required.

use serde_json::{Map, Value, json};

/// A declared string parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub description: &'static str,
    pub default: Option<&'static str>,
}

impl Param {
    /// A parameter the caller must supply
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            default: None,
        }
    }

    /// A parameter with a default value
    pub const fn optional(
        name: &'static str,
        description: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            default: Some(default),
        }
    }
}

/// Create a JSON Schema object type
///
/// # Arguments
///
/// * `properties` - Map of property names to their schemas
/// * `required` - List of required property names
pub fn object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Create a JSON Schema string type
pub fn string(title: &str, description: Option<&str>) -> Value {
    let mut schema = json!({
        "type": "string",
        "title": title,
    });
    if let Some(d) = description {
        schema["description"] = json!(d);
    }
    schema
}

/// `ticker` -> `Ticker`
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the object schema for a parameter list
pub fn params_schema(params: &[Param]) -> Value {
    let mut properties = Map::new();
    for param in params {
        let mut schema = string(&title_case(param.name), Some(param.description));
        if let Some(default) = param.default {
            schema["default"] = json!(default);
        }
        properties.insert(param.name.to_string(), schema);
    }

    let required = params
        .iter()
        .filter(|param| param.default.is_none())
        .map(|param| param.name)
        .collect();

    object(Value::Object(properties), required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_schema_required_and_defaults() {
        let schema = params_schema(&[
            Param::required("ticker", "Stock ticker symbol"),
            Param::optional("period", "Time period", "1mo"),
        ]);

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["ticker"]));
        assert_eq!(schema["properties"]["ticker"]["title"], "Ticker");
        assert_eq!(schema["properties"]["ticker"]["type"], "string");
        assert!(schema["properties"]["ticker"].get("default").is_none());
        assert_eq!(schema["properties"]["period"]["default"], "1mo");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ticker"), "Ticker");
        assert_eq!(title_case("expiration_date"), "Expiration Date");
    }

    #[test]
    fn test_string_without_description() {
        let schema = string("Name", None);
        assert!(schema.get("description").is_none());
    }
}
