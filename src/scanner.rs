//! Grammar-aware extraction of partial references from a parsed template.
//!
//! The scanner walks a compiled [`Template`] in tree order and collects the
//! set of distinct partial names the template statically references, from
//! plain partial statements (`{{> header}}`) and partial block statements
//! (`{{#> layout}}...{{/layout}}`).
//!
//! Two kinds of references are deliberately not collected:
//!
//! - **Dynamic names.** A partial whose name is computed at render time
//!   (`{{> (whichPartial)}}`) cannot be resolved statically and is silently
//!   skipped.
//! - **Inline partials.** A name declared by an `inline` decorator
//!   (`{{#*inline "local"}}...{{/inline}}`) shadows external resolution for
//!   that name. Declarations are tracked as the walk goes, so a reference is
//!   excluded exactly when its name has already been declared at the moment
//!   the reference is visited; a reference that precedes the declaration in
//!   tree order still counts as external. There is no retroactive filtering.
//!
//! The scan is pure: no I/O, no side effects, unordered output.

use std::collections::HashSet;

use handlebars::template::{DecoratorTemplate, Parameter, Template, TemplateElement};

/// Collects unique partial names referenced by a template.
#[derive(Debug, Default)]
pub struct PartialScanner {
    partials: HashSet<String>,
    inline_partials: HashSet<String>,
}

impl PartialScanner {
    /// Scan a parsed template and return the set of partial names it
    /// references.
    pub fn scan(template: &Template) -> HashSet<String> {
        let mut scanner = Self::default();
        scanner.visit_template(template);
        scanner.partials
    }

    fn visit_template(&mut self, template: &Template) {
        for element in &template.elements {
            self.visit_element(element);
        }
    }

    fn visit_element(&mut self, element: &TemplateElement) {
        match element {
            TemplateElement::PartialExpression(partial) => {
                self.record_partial(partial);
            }
            TemplateElement::PartialBlock(partial) => {
                self.record_partial(partial);
                if let Some(body) = &partial.template {
                    self.visit_template(body);
                }
            }
            TemplateElement::DecoratorExpression(decorator)
            | TemplateElement::DecoratorBlock(decorator) => {
                self.record_inline_declaration(decorator);
                if let Some(body) = &decorator.template {
                    self.visit_template(body);
                }
            }
            TemplateElement::HelperBlock(helper) => {
                if let Some(body) = &helper.template {
                    self.visit_template(body);
                }
                if let Some(inverse) = &helper.inverse {
                    self.visit_template(inverse);
                }
            }
            _ => {}
        }
    }

    /// Record a partial or partial block statement, unless its name is
    /// dynamic or already shadowed by an inline declaration.
    fn record_partial(&mut self, partial: &DecoratorTemplate) {
        let Some(name) = static_name(&partial.name) else {
            return;
        };
        if !self.inline_partials.contains(name) {
            self.partials.insert(name.to_string());
        }
    }

    /// Track `{{#*inline "name"}}` declarations; the first parameter carries
    /// the declared name.
    fn record_inline_declaration(&mut self, decorator: &DecoratorTemplate) {
        if static_name(&decorator.name) != Some("inline") {
            return;
        }
        if let Some(name) = decorator.params.first().and_then(static_name) {
            self.inline_partials.insert(name.to_string());
        }
    }
}

/// The statically-known text of a name expression, if it has one.
///
/// Literal strings and plain path expressions qualify; subexpressions and
/// non-string literals are dynamic and yield `None`.
fn static_name(parameter: &Parameter) -> Option<&str> {
    match parameter {
        Parameter::Name(name) => Some(name),
        Parameter::Path(path) => Some(match path {
            handlebars::Path::Relative((_, raw)) => raw,
            handlebars::Path::Local((_, _, raw)) => raw,
        }),
        Parameter::Literal(value) => value.as_str(),
        Parameter::Subexpression(_) => None,
        _ => None,
    }
}
