//! Compiled template registry and rendering.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::{Context, Tera, Value};
use tracing::debug;

use crate::error::{describe, TemplateError, TemplateResult};

/// Handle to a template that has been parsed into a [`TemplateRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
    path: PathBuf,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the template was compiled from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Holds compiled templates and renders them.
///
/// Autoescaping is off: every template here produces JSON, and values that
/// need quoting go through the `jsonify` filter explicitly.
#[derive(Debug)]
pub struct TemplateRegistry {
    tera: Tera,
    compiled: HashMap<String, CompiledTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create an empty registry with the `jsonify` filter installed.
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("jsonify", jsonify);
        Self {
            tera,
            compiled: HashMap::new(),
        }
    }

    /// Parse a template file and register it under `name`.
    pub fn compile(&mut self, name: &str, path: &Path) -> TemplateResult<CompiledTemplate> {
        self.tera
            .add_template_file(path, Some(name))
            .map_err(|e| TemplateError::Invalid {
                name: name.to_string(),
                message: describe(&e),
            })?;

        let compiled = CompiledTemplate {
            name: name.to_string(),
            path: path.to_path_buf(),
        };
        debug!("Compiled template {} from {:?}", name, path);
        self.compiled.insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Look up a template compiled earlier.
    pub fn get(&self, name: &str) -> TemplateResult<&CompiledTemplate> {
        self.compiled
            .get(name)
            .ok_or_else(|| TemplateError::NotLoaded(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.compiled.contains_key(name)
    }

    /// Names of all compiled templates, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.compiled.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Render a compiled template with the given variables.
    pub fn render(&self, template: &CompiledTemplate, variables: &Context) -> TemplateResult<String> {
        self.tera
            .render(&template.name, variables)
            .map_err(|e| TemplateError::RenderingFailed {
                name: template.name.clone(),
                message: describe(&e),
            })
    }

    /// Render a template by name.
    pub fn render_named(&self, name: &str, variables: &Context) -> TemplateResult<String> {
        let template = self.get(name)?;
        self.render(template, variables)
    }
}

/// Serialize any value to compact JSON text.
///
/// Used as `{{ value | jsonify }}` to embed strings, lists and maps into
/// JSON documents with correct quoting.
pub fn jsonify(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    serde_json::to_string(value)
        .map(Value::String)
        .map_err(|e| tera::Error::msg(format!("jsonify: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(name: &str, source: &str) -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        registry.tera.add_raw_template(name, source).unwrap();
        registry.compiled.insert(
            name.to_string(),
            CompiledTemplate {
                name: name.to_string(),
                path: PathBuf::from(name),
            },
        );
        registry
    }

    #[test]
    fn test_jsonify_quotes_strings() {
        let out = jsonify(&Value::String("say \"hi\"".into()), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String(r#""say \"hi\"""#.to_string()));
    }

    #[test]
    fn test_jsonify_arrays() {
        let value = serde_json::json!(["build", "deploy-dev"]);
        let out = jsonify(&value, &HashMap::new()).unwrap();
        assert_eq!(out, Value::String(r#"["build","deploy-dev"]"#.to_string()));
    }

    #[test]
    fn test_render_uses_jsonify_filter() {
        let registry = registry_with("t", r#"{"name": {{ name | jsonify }}}"#);
        let mut ctx = Context::new();
        ctx.insert("name", "checkout-service");

        let out = registry.render_named("t", &ctx).unwrap();
        assert_eq!(out, r#"{"name": "checkout-service"}"#);
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let registry = registry_with("t.html", "{{ v }}");
        let mut ctx = Context::new();
        ctx.insert("v", "<a & b>");

        assert_eq!(registry.render_named("t.html", &ctx).unwrap(), "<a & b>");
    }

    #[test]
    fn test_whitespace_control_trims_once_per_boundary() {
        let registry = registry_with(
            "t",
            "[\n{%- for s in stages %}\n  {{ s | jsonify }}{% if not loop.last %},{% endif %}\n{%- endfor %}\n]",
        );
        let mut ctx = Context::new();
        ctx.insert("stages", &vec!["a", "b"]);

        let out = registry.render_named("t", &ctx).unwrap();
        assert_eq!(out, "[\n  \"a\",\n  \"b\"\n]");
    }

    #[test]
    fn test_render_missing_variable_fails() {
        let registry = registry_with("t", "{{ missing }}");
        let err = registry.render_named("t", &Context::new()).unwrap_err();
        assert!(matches!(err, TemplateError::RenderingFailed { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_registry_debug_lists_templates() {
        let registry = registry_with("pipeline.gopipeline.json.template", "{}");
        let debug = format!("{:?}", registry);
        assert!(debug.contains("TemplateRegistry"));
        assert!(debug.contains("pipeline.gopipeline.json.template"));
    }

    #[test]
    fn test_get_unknown_template() {
        let registry = TemplateRegistry::new();
        assert!(matches!(registry.get("nope"), Err(TemplateError::NotLoaded(_))));
    }
}
