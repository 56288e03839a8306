//! Template resolution and rendering
//!
//! The registry is built once at startup by listing the configured template
//! root: every file becomes a resolver named after the file. Rendering opens
//! the file per call (no caching), reads it line by line, and substitutes
//! `${identifier}` placeholders from the view result's model. A placeholder
//! with no matching model key is left verbatim, and lines are concatenated
//! without reinserting line breaks.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::RenderError;
use crate::view::ModelAndView;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{(.+?)\}").unwrap())
}

/// One template file, addressable by its view name.
#[derive(Debug)]
pub struct TemplateResolver {
    view_name: String,
    path: PathBuf,
}

impl TemplateResolver {
    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    /// Render the template against the view result's model.
    ///
    /// Fails only on I/O; missing model keys are not errors.
    pub fn parse(&self, mv: &ModelAndView) -> Result<String, RenderError> {
        let io_err = |source| RenderError::Io {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).map_err(io_err)?;
        let reader = BufReader::new(file);

        let mut output = String::new();
        for line in reader.lines() {
            let mut line = line.map_err(io_err)?;
            let keys: Vec<String> = placeholder_pattern()
                .captures_iter(&line)
                .map(|caps| caps[1].to_string())
                .collect();
            for key in keys {
                if let Some(value) = mv.model().get(&key) {
                    line = line.replace(&format!("${{{key}}}"), &text_form(value));
                }
            }
            output.push_str(&line);
        }
        Ok(output)
    }
}

/// The textual form substituted for a placeholder. JSON strings are used
/// unquoted; everything else renders as its JSON text.
fn text_form(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Startup-built collection of every template under the template root.
#[derive(Debug)]
pub struct TemplateRegistry {
    resolvers: Vec<TemplateResolver>,
}

impl TemplateRegistry {
    /// List the template root; every plain file becomes a resolver named
    /// after it. An unreadable root is fatal at startup.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self, RenderError> {
        let root = root.as_ref();
        let io_err = |source| RenderError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut resolvers = Vec::new();
        for dir_entry in fs::read_dir(root).map_err(io_err)? {
            let dir_entry = dir_entry.map_err(io_err)?;
            if !dir_entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            let view_name = dir_entry.file_name().to_string_lossy().into_owned();
            debug!(view = %view_name, "registered template");
            resolvers.push(TemplateResolver {
                view_name,
                path: dir_entry.path(),
            });
        }
        Ok(Self { resolvers })
    }

    /// First resolver whose view name equals the result's view identifier.
    pub fn resolve(&self, view: &str) -> Option<&TemplateResolver> {
        self.resolvers.iter().find(|r| r.view_name == view)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn registry_with(name: &str, content: &str) -> (tempfile::TempDir, TemplateRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let registry = TemplateRegistry::from_dir(dir.path()).unwrap();
        (dir, registry)
    }

    #[test]
    fn substitutes_every_known_placeholder() {
        let (_dir, registry) = registry_with("greeting.txt", "Hello ${name} at ${addr}");
        let mv = ModelAndView::new("greeting.txt")
            .with("name", "Alice")
            .with("addr", "NYC");
        let resolver = registry.resolve("greeting.txt").unwrap();
        assert_eq!(resolver.parse(&mv).unwrap(), "Hello Alice at NYC");
    }

    #[test]
    fn missing_key_stays_verbatim() {
        let (_dir, registry) = registry_with("t.txt", "Hello ${missing}");
        let resolver = registry.resolve("t.txt").unwrap();
        let rendered = resolver.parse(&ModelAndView::new("t.txt")).unwrap();
        assert_eq!(rendered, "Hello ${missing}");
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        let (_dir, registry) = registry_with("t.txt", "${x} and ${x}");
        let mv = ModelAndView::new("t.txt").with("x", "y");
        assert_eq!(registry.resolve("t.txt").unwrap().parse(&mv).unwrap(), "y and y");
    }

    #[test]
    fn lines_concatenate_without_breaks() {
        let (_dir, registry) = registry_with("t.txt", "${a}\n${b}\n");
        let mv = ModelAndView::new("t.txt").with("a", "one").with("b", "two");
        assert_eq!(registry.resolve("t.txt").unwrap().parse(&mv).unwrap(), "onetwo");
    }

    #[test]
    fn non_string_values_render_as_json_text() {
        let (_dir, registry) = registry_with("t.txt", "n=${n}");
        let mv = ModelAndView::new("t.txt").with("n", 42);
        assert_eq!(registry.resolve("t.txt").unwrap().parse(&mv).unwrap(), "n=42");
    }

    #[test]
    fn unknown_view_resolves_to_none() {
        let (_dir, registry) = registry_with("t.txt", "x");
        assert!(registry.resolve("other.txt").is_none());
    }

    #[test]
    fn unreadable_root_is_an_io_error() {
        let err = TemplateRegistry::from_dir("/definitely/not/a/dir").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
