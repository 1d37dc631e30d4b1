//! Handlebars-based template renderer.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Strict mode ensures that any `{{variable}}` referenced in a template must
//! be present in the data context, otherwise rendering returns an error.
//! This matters because templates produce contract source: a silently
//! missing variable would generate source that fails to compile with
//! confusing diagnostics far from the actual cause.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{Result, VaultError};

/// Template renderer using Handlebars with strict mode enabled.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| VaultError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_present_variables() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("height = {{h}}", &serde_json::json!({ "h": 42 }))
            .unwrap();
        assert_eq!(out, "height = 42");
    }

    #[test]
    fn strict_mode_rejects_missing_variables() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render("height = {{missing}}", &serde_json::json!({}));
        assert!(matches!(result, Err(VaultError::TemplateRender(_))));
    }
}
