//! Template loading functionality.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};
use crate::renderer::{CompiledTemplate, TemplateRegistry};
use crate::set::TemplateSet;

/// File suffix that marks a template document.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Loads named templates from a fixed directory.
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    /// Create a new template loader.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Load and compile every template in `set`.
    ///
    /// Fails on the first template that is missing or does not parse, so a
    /// broken template directory never gets as far as writing files.
    pub fn load_set(&self, set: &TemplateSet) -> TemplateResult<TemplateRegistry> {
        if !self.templates_path.is_dir() {
            return Err(TemplateError::DirectoryNotFound(self.templates_path.clone()));
        }

        let mut registry = TemplateRegistry::new();
        for name in set.names() {
            self.load(&mut registry, name)?;
        }

        info!(
            "Loaded {} template(s) from {:?}",
            registry.names().len(),
            self.templates_path
        );
        Ok(registry)
    }

    /// Compile a single template from the directory into `registry`.
    pub fn load(&self, registry: &mut TemplateRegistry, name: &str) -> TemplateResult<CompiledTemplate> {
        let path = self.templates_path.join(name);

        if !path.is_file() {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
                dir: self.templates_path.clone(),
            });
        }

        debug!("Loading template {} from {:?}", name, path);
        registry.compile(name, &path)
    }

    /// List template files available in the directory, sorted by name.
    pub fn list_available(&self) -> TemplateResult<Vec<String>> {
        if !self.templates_path.exists() {
            warn!("Templates directory does not exist: {:?}", self.templates_path);
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = WalkDir::new(&self.templates_path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(TEMPLATE_SUFFIX))
            .collect();

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_set(dir: &Path) -> TemplateSet {
        let set = TemplateSet::new("p.json.template", "e.json.template");
        fs::write(dir.join(&set.pipeline_template), "{{ pipeline_name | jsonify }}").unwrap();
        fs::write(dir.join(&set.environment_template), "{{ used_env }}").unwrap();
        set
    }

    #[test]
    fn test_load_set() {
        let temp = tempdir().unwrap();
        let set = write_set(temp.path());

        let registry = TemplateLoader::new(temp.path()).load_set(&set).unwrap();
        assert!(registry.contains("p.json.template"));
        assert!(registry.contains("e.json.template"));
    }

    #[test]
    fn test_load_set_missing_directory() {
        let temp = tempdir().unwrap();
        let loader = TemplateLoader::new(temp.path().join("nope"));

        let result = loader.load_set(&TemplateSet::default());
        assert!(matches!(result, Err(TemplateError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_load_set_missing_template_is_fatal() {
        let temp = tempdir().unwrap();
        let set = write_set(temp.path());
        fs::remove_file(temp.path().join(&set.environment_template)).unwrap();

        let err = TemplateLoader::new(temp.path()).load_set(&set).unwrap_err();
        match err {
            TemplateError::NotFound { name, .. } => assert_eq!(name, "e.json.template"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_set_malformed_template_is_fatal() {
        let temp = tempdir().unwrap();
        let set = write_set(temp.path());
        fs::write(temp.path().join(&set.pipeline_template), "{% for x in %}").unwrap();

        let err = TemplateLoader::new(temp.path()).load_set(&set).unwrap_err();
        assert!(matches!(err, TemplateError::Invalid { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_list_available() {
        let temp = tempdir().unwrap();
        write_set(temp.path());
        fs::write(temp.path().join("README.md"), "notes").unwrap();

        let names = TemplateLoader::new(temp.path()).list_available().unwrap();
        assert_eq!(names, vec!["e.json.template", "p.json.template"]);
    }

    #[test]
    fn test_list_available_empty_dir() {
        let temp = tempdir().unwrap();
        let names = TemplateLoader::new(temp.path().join("missing"))
            .list_available()
            .unwrap();
        assert!(names.is_empty());
    }
}
