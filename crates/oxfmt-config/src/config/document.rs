//! Configuration document model
//!
//! [`ConfigDocument`] is what the loader returns: the parsed top-level
//! object, passed through untouched. The option set belongs to the
//! formatter, so nothing here validates values on the load path.
//!
//! [`FormatOptions`] is an on-demand typed view over the known fields,
//! including the `overrides` list and the `experimentalSortImports`
//! sub-configuration, with JSON Schema generation via schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    options: Map<String, Value>,
}

impl ConfigDocument {
    /// Create an empty document (no configuration found)
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already parsed top-level object
    pub fn from_map(options: Map<String, Value>) -> Self {
        Self { options }
    }

    /// Look up a raw option value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Whether the document has no options at all
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of top-level options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.options
    }

    /// Interpret the document through the typed option view
    ///
    /// Fails if a known field has the wrong shape. Unknown fields are ignored.
    pub fn options(&self) -> Result<FormatOptions, serde_json::Error> {
        serde_json::from_value(Value::Object(self.options.clone()))
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(options: Map<String, Value>) -> Self {
        Self::from_map(options)
    }
}

/// Line ending style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    Cr,
}

/// Where trailing commas are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    All,
    Es5,
    None,
}

/// When object property names are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteProps {
    AsNeeded,
    Consistent,
    Preserve,
}

/// Parentheses around a sole arrow function parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    Always,
    Avoid,
}

/// How objects are wrapped when they fit on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObjectWrap {
    Preserve,
    Collapse,
}

/// Import sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Known formatter options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Indent with tabs instead of spaces
    #[schemars(description = "Indent lines with tabs instead of spaces")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    /// Number of spaces per indentation level
    #[schemars(description = "Number of spaces per indentation level")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,

    /// Line width the printer wraps at
    #[schemars(description = "Maximum line width before wrapping")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u32>,

    #[schemars(description = "Line ending style: 'lf', 'crlf' or 'cr'")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_line: Option<EndOfLine>,

    #[schemars(description = "Use single quotes instead of double quotes")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,

    #[schemars(description = "Use single quotes in JSX attributes")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_single_quote: Option<bool>,

    #[schemars(description = "Quote object properties: 'as-needed', 'consistent' or 'preserve'")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_props: Option<QuoteProps>,

    #[schemars(description = "Trailing comma policy: 'all', 'es5' or 'none'")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,

    #[schemars(description = "Print semicolons at the end of statements")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,

    #[schemars(description = "Parentheses around a sole arrow function parameter")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_parens: Option<ArrowParens>,

    #[schemars(description = "Print spaces between brackets in object literals")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_spacing: Option<bool>,

    #[schemars(description = "Put the closing '>' of a multi-line element on the last line")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_same_line: Option<bool>,

    #[schemars(description = "Object wrapping: 'preserve' or 'collapse'")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_wrap: Option<ObjectWrap>,

    #[schemars(description = "Put one attribute per line in HTML, Vue and JSX")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_attribute_per_line: Option<bool>,

    /// Import sorting; absent means disabled
    #[schemars(description = "Sort import statements")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_sort_imports: Option<SortImportsOptions>,

    #[schemars(description = "Glob patterns of files the formatter skips")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,

    /// File-pattern-scoped option overrides, in declaration order
    #[schemars(description = "Options applied to files matching glob patterns")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<OverrideEntry>>,
}

impl FormatOptions {
    /// JSON Schema describing the known option fields
    pub fn json_schema() -> Value {
        schemars::schema_for!(FormatOptions).to_value()
    }
}

/// A set of options applied to files matching `files` but not `exclude_files`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideEntry {
    #[schemars(description = "Glob patterns of files this override applies to")]
    pub files: Vec<String>,

    #[schemars(description = "Glob patterns excluded from this override")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_files: Option<Vec<String>>,

    #[schemars(description = "Partial options merged over the top-level options")]
    #[serde(default)]
    pub options: FormatOptions,
}

/// Import sorting sub-configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortImportsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_side_effects: Option<bool>,

    /// Treat blank lines as boundaries between sorted groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_by_newline: Option<bool>,

    /// Treat comments as boundaries between sorted groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_by_comment: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub newlines_between: Option<bool>,

    /// Import path prefixes considered internal to the project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_pattern: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> ConfigDocument {
        match value {
            Value::Object(map) => ConfigDocument::from_map(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_empty_document() {
        let doc = ConfigDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.options().unwrap(), FormatOptions::default());
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({}));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let doc = document(json!({ "tabWidth": 4, "futureOption": [1, 2] }));

        assert_eq!(doc.get("futureOption"), Some(&json!([1, 2])));
        assert_eq!(doc.len(), 2);

        let options = doc.options().unwrap();
        assert_eq!(options.tab_width, Some(4));
    }

    #[test]
    fn test_typed_view() {
        let doc = document(json!({
            "useTabs": false,
            "tabWidth": 2,
            "printWidth": 100,
            "endOfLine": "crlf",
            "singleQuote": true,
            "quoteProps": "as-needed",
            "trailingComma": "es5",
            "semi": false,
            "experimentalSortImports": {
                "order": "desc",
                "ignoreCase": true,
                "internalPattern": ["~/", "@/"]
            },
            "overrides": [
                {
                    "files": ["*.test.ts"],
                    "excludeFiles": ["fixtures/**"],
                    "options": { "printWidth": 120 }
                }
            ]
        }));

        let options = doc.options().unwrap();
        assert_eq!(options.use_tabs, Some(false));
        assert_eq!(options.print_width, Some(100));
        assert_eq!(options.end_of_line, Some(EndOfLine::Crlf));
        assert_eq!(options.quote_props, Some(QuoteProps::AsNeeded));
        assert_eq!(options.trailing_comma, Some(TrailingComma::Es5));
        assert_eq!(options.semi, Some(false));

        let sort = options.experimental_sort_imports.unwrap();
        assert_eq!(sort.order, Some(SortOrder::Desc));
        assert_eq!(sort.ignore_case, Some(true));
        assert_eq!(
            sort.internal_pattern,
            Some(vec!["~/".to_string(), "@/".to_string()])
        );

        let overrides = options.overrides.unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].files, vec!["*.test.ts"]);
        assert_eq!(
            overrides[0].exclude_files,
            Some(vec!["fixtures/**".to_string()])
        );
        assert_eq!(overrides[0].options.print_width, Some(120));
    }

    #[test]
    fn test_typed_view_rejects_wrong_shape() {
        let doc = document(json!({ "tabWidth": "four" }));

        // The raw document is still available untouched
        assert_eq!(doc.get("tabWidth"), Some(&json!("four")));
        assert!(doc.options().is_err());
    }

    #[test]
    fn test_override_without_options() {
        let doc = document(json!({ "overrides": [{ "files": ["*.md"] }] }));
        let overrides = doc.options().unwrap().overrides.unwrap();
        assert_eq!(overrides[0].options, FormatOptions::default());
        assert_eq!(overrides[0].exclude_files, None);
    }

    #[test]
    fn test_json_schema_lists_known_fields() {
        let schema = FormatOptions::json_schema();
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .expect("schema has properties");

        assert!(properties.contains_key("tabWidth"));
        assert!(properties.contains_key("trailingComma"));
        assert!(properties.contains_key("overrides"));
        assert!(properties.contains_key("experimentalSortImports"));
    }
}
