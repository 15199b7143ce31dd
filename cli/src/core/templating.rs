//! # Wiregen Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders generated Rust sources. Both generated artifacts (the per-profile
//! wiring module and the registry) go through the same three steps:
//!
//! 1. Render an embedded Tera template with a serializable context
//! 2. Parse the rendered text with `syn` and pretty-print it with `prettyplease`,
//!    so whitespace in the template never leaks into the output
//! 3. Prefix the formatted body with the "do not edit" banner
//!
//! A template that renders into something `syn` cannot parse is a bug in the
//! inputs (for example a profile directory name that is not a valid path
//! segment). It is reported as `WiregenError::CodeGen` carrying the raw buffer
//! so the offending text can be inspected.
//!
//! ## Examples
//!
//! ```rust
//! let context = tera::Context::from_serialize(&data)?;
//! let source = templating::render_generated_source(
//!     "profile 'alpha'",
//!     &WIRING_TEMPLATE,
//!     &context,
//!     &["Profile: alpha".to_string()],
//! )?;
//! ```
//!
use crate::core::config::{engine_version, ENGINE_NAME};
use crate::core::error::{Result, WiregenError};
use anyhow::anyhow;
use tera::Tera;
use tracing::debug;

/// An embedded template: a registration name plus its text.
#[derive(Debug, Clone, Copy)]
pub struct SourceTemplate {
    pub name: &'static str,
    pub body: &'static str,
}

/// First line of every generated file.
pub const GENERATED_MARKER: &str = "// Code generated by wiregen. DO NOT EDIT.";

/// Renders `template` with `context` into an unformatted buffer.
pub fn render_template(
    target: &str,
    template: &SourceTemplate,
    context: &tera::Context,
) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(template.name, template.body)
        .and_then(|_| tera.render(template.name, context))
        .map_err(|e| {
            anyhow!(WiregenError::CodeGen {
                target: target.to_string(),
                message: format!("template '{}' failed: {}", template.name, error_chain(&e)),
                buffer: template.body.to_string(),
            })
        })
}

/// Parses `raw` as a Rust file and returns its canonical formatting.
///
/// # Errors
///
/// Returns `WiregenError::CodeGen` holding `raw` when it is not a valid Rust file.
pub fn format_source(target: &str, raw: &str) -> Result<String> {
    let file = syn::parse_file(raw).map_err(|e| {
        let start = e.span().start();
        anyhow!(WiregenError::CodeGen {
            target: target.to_string(),
            message: format!("{} (line {}, column {})", e, start.line, start.column),
            buffer: raw.to_string(),
        })
    })?;
    Ok(prettyplease::unparse(&file))
}

/// Builds the comment banner placed above every generated body.
///
/// Line breaks inside an extra line are folded into spaces so each one stays
/// a single `//` comment.
pub fn banner(extra_lines: &[String]) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_MARKER);
    out.push_str("\n//\n");
    out.push_str(&format!("// Engine: {} {}\n", ENGINE_NAME, engine_version()));
    for line in extra_lines {
        out.push_str("// ");
        out.push_str(&line.replace(['\r', '\n'], " "));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Renders, formats, and bannerizes one generated source file.
pub fn render_generated_source(
    target: &str,
    template: &SourceTemplate,
    context: &tera::Context,
    banner_lines: &[String],
) -> Result<String> {
    let raw = render_template(target, template, context)?;
    debug!("Rendered {} ({} bytes before formatting)", target, raw.len());
    let formatted = format_source(target, &raw)?;
    Ok(format!("{}{}", banner(banner_lines), formatted))
}

// Tera hides the useful part of a failure in the source chain.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: SourceTemplate = SourceTemplate {
        name: "greeting.rs",
        body: "pub fn {{ name }}() -> u8 {   {{ value }} }",
    };

    #[test]
    fn test_render_and_format() -> Result<()> {
        let mut context = tera::Context::new();
        context.insert("name", "answer");
        context.insert("value", &42);

        let source =
            render_generated_source("greeting", &GREETING, &context, &["Profile: demo".into()])?;

        assert!(source.starts_with(GENERATED_MARKER));
        assert!(source.contains("// Profile: demo\n"));
        assert!(source.contains(&format!("// Engine: {} ", ENGINE_NAME)));
        assert!(source.contains("pub fn answer() -> u8 {\n    42\n}\n"));
        Ok(())
    }

    #[test]
    fn test_banner_keeps_lines_single() {
        let text = banner(&["Profile: two\nlines".to_string()]);
        assert!(text.contains("// Profile: two lines\n"));
        assert!(text.lines().all(|line| line.is_empty() || line.starts_with("//")));
    }

    #[test]
    fn test_rendering_is_deterministic() -> Result<()> {
        let mut context = tera::Context::new();
        context.insert("name", "same");
        context.insert("value", &1);
        let first = render_generated_source("greeting", &GREETING, &context, &[])?;
        let second = render_generated_source("greeting", &GREETING, &context, &[])?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_invalid_output_is_codegen_error() {
        let mut context = tera::Context::new();
        context.insert("name", "not valid");
        context.insert("value", &1);

        let err = render_generated_source("greeting", &GREETING, &context, &[]).unwrap_err();
        match err.downcast_ref::<WiregenError>() {
            Some(WiregenError::CodeGen { buffer, .. }) => {
                assert!(buffer.contains("pub fn not valid()"));
            }
            other => panic!("expected CodeGen error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_template_syntax() {
        let broken = SourceTemplate {
            name: "broken.rs",
            body: "fn {{ name",
        };
        let err = render_template("broken", &broken, &tera::Context::new()).unwrap_err();
        assert!(err.to_string().contains("template 'broken.rs' failed"));
    }
}
