//! Static tool catalog.
//!
//! Every tool is described by a `const` [`ToolDescriptor`] living next to its
//! handler in [`crate::tools`]. The catalog below is the fixed, ordered list
//! of `(descriptor, handler)` pairs; there is no runtime registration.

use crate::error::HandlerResult;
use crate::tools::{self, ToolArgs, ToolContext};
use crate::types::ToolResult;
use serde_json::{json, Map, Value};

/// Semantic type of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    StringList,
}

impl FieldKind {
    #[must_use]
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringList => "array",
        }
    }
}

/// Documented default of an optional argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    None,
    Str(&'static str),
    Integer(i64),
    Bool(bool),
    /// Resolved at call time (e.g. the working directory); documented only.
    Dynamic(&'static str),
}

/// One argument of a tool's input schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    pub default: FieldDefault,
    /// Closed set of accepted values for enumerated string fields.
    pub choices: &'static [&'static str],
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: FieldDefault::None,
            choices: &[],
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean, description)
    }

    pub const fn string_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::StringList, description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    pub const fn one_of(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    fn schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        if self.kind == FieldKind::StringList {
            prop.insert("items".into(), json!({ "type": "string" }));
        }
        prop.insert("description".into(), json!(self.description));
        match self.default {
            FieldDefault::Str(s) => {
                prop.insert("default".into(), json!(s));
            }
            FieldDefault::Integer(n) => {
                prop.insert("default".into(), json!(n));
            }
            FieldDefault::Bool(b) => {
                prop.insert("default".into(), json!(b));
            }
            FieldDefault::None | FieldDefault::Dynamic(_) => {}
        }
        if !self.choices.is_empty() {
            prop.insert("enum".into(), json!(self.choices));
        }
        Value::Object(prop)
    }
}

/// Name, description and input schema of a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    /// All-caps label used in `❌ <LABEL> ERROR: ...` envelopes.
    pub error_label: &'static str,
}

impl ToolDescriptor {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// JSON Schema for the tool's arguments. Undeclared fields are allowed.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));

        let required: Vec<&str> = self.required_fields().map(|f| f.name).collect();
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }
}

/// Tool handler: decoded arguments in, envelope (or error to encode) out.
pub type Handler = fn(&ToolArgs, &ToolContext) -> HandlerResult<ToolResult>;

/// A catalog slot.
#[derive(Debug, Clone, Copy)]
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub handler: Handler,
}

static CATALOG: [ToolEntry; 8] = [
    ToolEntry {
        descriptor: tools::codify::CODIFY,
        handler: tools::codify::execute_codify,
    },
    ToolEntry {
        descriptor: tools::codify::WRITE_CODIFIED_PATTERNS,
        handler: tools::codify::execute_write_patterns,
    },
    ToolEntry {
        descriptor: tools::review::CODE_ROASTER,
        handler: tools::review::execute_roast,
    },
    ToolEntry {
        descriptor: tools::todos::FIND_TODOS,
        handler: tools::todos::execute_find_todos,
    },
    ToolEntry {
        descriptor: tools::prd::GENERATE_PRD,
        handler: tools::prd::execute_generate_prd,
    },
    ToolEntry {
        descriptor: tools::prd::SAVE_PRD,
        handler: tools::prd::execute_save_prd,
    },
    ToolEntry {
        descriptor: tools::review::BUG_PREDICTOR,
        handler: tools::review::execute_bug_predictor,
    },
    ToolEntry {
        descriptor: tools::review::COMPLEXITY_ANALYZER,
        handler: tools::review::execute_complexity,
    },
];

/// All catalog entries, in advertised order.
#[must_use]
pub fn entries() -> &'static [ToolEntry] {
    &CATALOG
}

/// All tool descriptors, in advertised order.
pub fn list() -> impl ExactSizeIterator<Item = &'static ToolDescriptor> {
    CATALOG.iter().map(|e| &e.descriptor)
}

/// Looks up a tool by exact name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolEntry> {
    CATALOG.iter().find(|e| e.descriptor.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = list().map(|d| d.name).collect();
        assert_eq!(names.len(), entries().len());
    }

    #[test]
    fn test_list_is_stable() {
        let first: Vec<_> = list().copied().collect();
        let second: Vec<_> = list().copied().collect();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|d| d.name).collect::<Vec<_>>(),
            vec![
                "codify",
                "write_codified_patterns",
                "code_roaster",
                "find_todos",
                "generate_prd",
                "save_prd",
                "bug_predictor",
                "complexity_analyzer",
            ]
        );
    }

    #[test]
    fn test_required_fields_have_properties() {
        for descriptor in list() {
            let schema = descriptor.input_schema();
            let properties = schema["properties"].as_object().unwrap();
            if let Some(required) = schema.get("required") {
                for name in required.as_array().unwrap() {
                    let name = name.as_str().unwrap();
                    assert!(
                        properties.contains_key(name),
                        "{}: required field {name} has no property",
                        descriptor.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_schema_carries_defaults_and_choices() {
        let roaster = find("code_roaster").unwrap().descriptor.input_schema();
        let style = &roaster["properties"]["roastStyle"];
        assert_eq!(style["default"], json!("gentle"));
        assert_eq!(style["enum"], json!(["gentle", "spicy", "savage"]));
        assert_eq!(roaster["required"], json!(["filePath"]));

        let complexity = find("complexity_analyzer").unwrap().descriptor.input_schema();
        assert_eq!(complexity["properties"]["complexityThreshold"]["default"], json!(10));
        assert_eq!(complexity["properties"]["includeRefactoringTips"]["type"], json!("boolean"));
    }

    #[test]
    fn test_advertised_descriptions() {
        let described: Vec<_> = list().map(|d| (d.name, d.description)).collect();
        assert_eq!(
            described,
            vec![
                (
                    "codify",
                    "Read a file and return its content for AI analysis and codification of patterns/practices"
                ),
                (
                    "write_codified_patterns",
                    "Write analyzed patterns and practices to .github/copilot-instructions.md (GitHub Copilot standard location)"
                ),
                ("code_roaster", "Provide humorous (but constructive) code review comments"),
                (
                    "find_todos",
                    "Scan codebase for TODO, FIXME, HACK comments and prioritize them"
                ),
                (
                    "generate_prd",
                    "Generate a comprehensive Project Requirements Document using industry-standard template and output to /docs folder"
                ),
                ("save_prd", "Save generated PRD content to /docs folder"),
                ("bug_predictor", "Identify code patterns that commonly lead to bugs"),
                (
                    "complexity_analyzer",
                    "Measure cyclomatic complexity and suggest refactoring opportunities"
                ),
            ]
        );

        let roaster = find("code_roaster").unwrap().descriptor.input_schema();
        assert_eq!(
            roaster["properties"]["roastStyle"]["description"],
            json!("Style of roast: \"gentle\", \"spicy\", or \"savage\" (defaults to \"gentle\")")
        );
    }

    #[test]
    fn test_find_todos_has_no_required_fields() {
        let schema = find("find_todos").unwrap().descriptor.input_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(
            schema["properties"]["filePattern"]["default"],
            json!("**/*.{js,ts,jsx,tsx,md,py,java,c,cpp,h}")
        );
    }

    #[test]
    fn test_unknown_name_is_absent() {
        assert!(find("no_such_tool").is_none());
        assert!(find("CODIFY").is_none());
    }
}
