//! Placeholder resolution and substitution.

use super::placeholder::placeholders;
use crate::document::node::TreeValue;
use crate::document::tree::TreeRef;
use crate::path;
use tracing::{debug, trace};

/// Supplies values for placeholder candidates.
///
/// `resolve` receives the whole template, the candidate path and the full
/// placeholder text, and returns the candidate's value if it has one. Any
/// `FnMut(&str, &str, &str) -> Option<TreeValue>` closure is a resolver.
pub trait Resolver {
    fn resolve(&mut self, template: &str, candidate: &str, matched: &str) -> Option<TreeValue>;
}

impl<F> Resolver for F
where
    F: FnMut(&str, &str, &str) -> Option<TreeValue>,
{
    fn resolve(&mut self, template: &str, candidate: &str, matched: &str) -> Option<TreeValue> {
        self(template, candidate, matched)
    }
}

/// The default resolver: looks each candidate up as a path in one tree.
#[derive(Debug, Clone, Copy)]
pub struct DataResolver<'a> {
    data: &'a TreeValue,
}

impl Resolver for DataResolver<'_> {
    fn resolve(&mut self, _template: &str, candidate: &str, _matched: &str) -> Option<TreeValue> {
        path::read(self.data, candidate).cloned()
    }
}

/// Builds the default resolver over a raw or wrapped tree.
pub fn data_resolver<'a>(data: impl Into<TreeRef<'a>>) -> DataResolver<'a> {
    DataResolver {
        data: data.into().value(),
    }
}

/// Renders an accepted candidate value, or `None` if the value cannot fill a placeholder.
///
/// Strings, numbers and records are accepted; nulls, booleans, sequences and
/// mappings are not.
fn render(value: &TreeValue) -> Option<String> {
    match value {
        TreeValue::String(s) => Some(s.clone()),
        TreeValue::Number(n) => Some(n.to_string()),
        TreeValue::Record(record) => Some(record.to_string()),
        _ => None,
    }
}

/// Template interpolation with a fixed policy for unresolved placeholders.
///
/// # Example
///
/// ```
/// use treequill::document::node::TreeValue;
/// use treequill::document::parser::parse_yaml;
/// use treequill::template::{data_resolver, Interpolator};
///
/// let data = parse_yaml("name: Ann\nsubject: 'Hello {{name}}'").unwrap();
/// let interpolator = Interpolator::new(false);
///
/// let resolved = interpolator.resolve_tree(&data, &mut data_resolver(&data));
/// assert_eq!(resolved.as_map().unwrap()["subject"], TreeValue::from("Hello Ann"));
/// assert_eq!(interpolator.interpolate("{{missing}}", &mut data_resolver(&data)), "{{missing}}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolator {
    erase_unknown: bool,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Interpolator {
    /// Creates an interpolator. With `erase_unknown`, unresolved placeholders
    /// are removed; otherwise they stay in the output verbatim.
    pub fn new(erase_unknown: bool) -> Self {
        Self { erase_unknown }
    }

    pub fn erase_unknown(&self) -> bool {
        self.erase_unknown
    }

    /// Substitutes every placeholder in `template`.
    ///
    /// Replacement is by matched text: once a placeholder is decided, every
    /// literal occurrence of the same text is replaced, so identical
    /// placeholders always render identically. The resolver is still invoked
    /// for each occurrence, in template order.
    pub fn interpolate<R: Resolver + ?Sized>(&self, template: &str, resolver: &mut R) -> String {
        let mut output = template.to_string();

        for placeholder in placeholders(template) {
            let replacement = placeholder.candidates.iter().find_map(|candidate| {
                resolver
                    .resolve(template, candidate, placeholder.text)
                    .and_then(|value| render(&value))
            });

            match replacement {
                Some(text) => {
                    trace!(placeholder = placeholder.text, "resolved");
                    output = output.replace(placeholder.text, &text);
                }
                None if self.erase_unknown => {
                    debug!(placeholder = placeholder.text, "erasing unresolved placeholder");
                    output = output.replace(placeholder.text, "");
                }
                None => {
                    debug!(placeholder = placeholder.text, "leaving unresolved placeholder");
                }
            }
        }

        output
    }

    /// Interpolates every string in a tree, mapping keys included.
    ///
    /// Sequences and mappings are rebuilt; record fields are interpolated in
    /// a copy of the record, keeping their names. Other scalars are copied
    /// unchanged.
    pub fn resolve_tree<R: Resolver + ?Sized>(&self, value: &TreeValue, resolver: &mut R) -> TreeValue {
        match value {
            TreeValue::String(s) => TreeValue::String(self.interpolate(s, resolver)),
            TreeValue::Array(items) => TreeValue::Array(
                items
                    .iter()
                    .map(|item| self.resolve_tree(item, resolver))
                    .collect(),
            ),
            TreeValue::Map(entries) => TreeValue::Map(
                entries
                    .iter()
                    .map(|(key, item)| {
                        (
                            self.interpolate(key, resolver),
                            self.resolve_tree(item, resolver),
                        )
                    })
                    .collect(),
            ),
            TreeValue::Record(record) => {
                let mut copy = record.clone();
                for name in record.field_names() {
                    if let Some(field) = record.field(&name) {
                        let resolved = self.resolve_tree(field, resolver);
                        copy.set_field(&name, resolved);
                    }
                }
                TreeValue::Record(copy)
            }
            other => other.clone(),
        }
    }
}

/// Substitutes the placeholders of `template` using `resolver`.
///
/// See [`Interpolator::interpolate`].
pub fn interpolate<R: Resolver>(template: &str, mut resolver: R, erase_unknown: bool) -> String {
    Interpolator::new(erase_unknown).interpolate(template, &mut resolver)
}

/// Interpolates every string in `value` using `resolver`.
///
/// See [`Interpolator::resolve_tree`].
pub fn resolve_tree<R: Resolver>(value: &TreeValue, mut resolver: R, erase_unknown: bool) -> TreeValue {
    Interpolator::new(erase_unknown).resolve_tree(value, &mut resolver)
}
