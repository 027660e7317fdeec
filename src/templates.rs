//! Prompt bodies, compiled in from `templates/`.
//!
//! Placeholders are written `{{name}}`. Rendering is single-pass: values are
//! inserted verbatim and never scanned for further placeholders, so file
//! content containing `{{...}}` comes through untouched. Unknown placeholders
//! are left as written.

/// A compiled-in text template.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Substitutes `vars` into the template. A single trailing newline of the
    /// template file is dropped.
    #[must_use]
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let source = self.source.strip_suffix('\n').unwrap_or(self.source);
        let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
        let mut out = String::with_capacity(source.len() + extra);
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                out.push_str(&rest[open..]);
                return out;
            };
            let key = &after[..close];
            match vars.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        out
    }
}

pub const CODIFY_DEFAULT_PROMPT: Template =
    Template::new(include_str!("../templates/codify_prompt.md"));
pub const CODIFY: Template = Template::new(include_str!("../templates/codify.md"));
pub const INSTRUCTIONS_HEADER: Template =
    Template::new(include_str!("../templates/instructions_header.md"));
pub const INSTRUCTIONS_SECTION: Template =
    Template::new(include_str!("../templates/instructions_section.md"));

pub const ROAST_GENTLE: Template = Template::new(include_str!("../templates/roast_gentle.md"));
pub const ROAST_SPICY: Template = Template::new(include_str!("../templates/roast_spicy.md"));
pub const ROAST_SAVAGE: Template = Template::new(include_str!("../templates/roast_savage.md"));
pub const ROAST: Template = Template::new(include_str!("../templates/roast.md"));

pub const TODO_ANALYSIS: Template = Template::new(include_str!("../templates/todo_analysis.md"));

pub const PRD_PROMPT: Template = Template::new(include_str!("../templates/prd_prompt.md"));
pub const PRD_GENERATE: Template = Template::new(include_str!("../templates/prd_generate.md"));
pub const PRD_SAVED: Template = Template::new(include_str!("../templates/prd_saved.md"));

pub const BUGS_QUICK: Template = Template::new(include_str!("../templates/bugs_quick.md"));
pub const BUGS_THOROUGH: Template = Template::new(include_str!("../templates/bugs_thorough.md"));
pub const BUGS_COMPREHENSIVE: Template =
    Template::new(include_str!("../templates/bugs_comprehensive.md"));
pub const BUGS: Template = Template::new(include_str!("../templates/bugs.md"));

pub const COMPLEXITY_PROMPT: Template =
    Template::new(include_str!("../templates/complexity_prompt.md"));
pub const COMPLEXITY_TIPS: Template =
    Template::new(include_str!("../templates/complexity_tips.md"));
pub const COMPLEXITY: Template = Template::new(include_str!("../templates/complexity.md"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_keys() {
        let t = Template::new("Hello {{name}}, {{name}}!\n");
        assert_eq!(t.render(&[("name", "Ada")]), "Hello Ada, Ada!");
    }

    #[test]
    fn test_render_is_single_pass() {
        let t = Template::new("{{content}} / {{lang}}");
        let out = t.render(&[("content", "x = {{lang}}"), ("lang", "js")]);
        assert_eq!(out, "x = {{lang}} / js");
    }

    #[test]
    fn test_unknown_and_unterminated_placeholders_are_kept() {
        let t = Template::new("{{missing}} and {{open");
        assert_eq!(t.render(&[]), "{{missing}} and {{open");
    }

    #[test]
    fn test_bundled_templates_have_no_stray_placeholders_after_render() {
        let rendered =
            CODIFY_DEFAULT_PROMPT.render(&[("language", "JS"), ("file_name", "a.js")]);
        assert!(!rendered.contains("{{"));
        assert!(rendered.contains("File: a.js"));
    }
}
