//=========================================================================
// Template Provider
//=========================================================================
//
// Source of structural templates, keyed by path.
//
// Lookup failures are non-fatal: the orchestrator logs them and creates
// the screen with an empty container.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::element::Template;
use crate::core::error::TemplateError;

//=== TemplateProvider ====================================================

/// Resolves template paths to structural templates.
pub trait TemplateProvider {
    /// Loads the template stored at `path`.
    fn load(&self, path: &str) -> Result<Template, TemplateError>;
}

//=== InMemoryTemplates ===================================================

/// Templates held in a map, keyed by full path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<String, Template>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a template (builder form).
    pub fn with(mut self, path: impl Into<String>, template: Template) -> Self {
        self.insert(path, template);
        self
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, path: impl Into<String>, template: Template) {
        self.templates.insert(path.into(), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateProvider for InMemoryTemplates {
    fn load(&self, path: &str) -> Result<Template, TemplateError> {
        if path.is_empty() {
            return Err(TemplateError::EmptyPath);
        }
        self.templates
            .get(path)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(path.to_string()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
