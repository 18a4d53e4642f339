//! The form builder: turns a [`Record`] into a [`Form`].
//!
//! For every declared field, in declaration order, the builder:
//!
//! 1. infers the form field type from the field kind,
//! 2. resolves the display name from the name tag,
//! 3. parses the options tag (`type=` and `name=` overrides),
//! 4. recurses into nested records, keyed by the declared name,
//! 5. asks the error lookup for the field's logical path,
//! 6. stringifies the current value,
//! 7. stores a [`FormField`] keyed by the declared name.
//!
//! Two namespaces are carried through the recursion. The logical namespace
//! holds declared names and is used to query errors. The HTML namespace holds
//! tag-resolved names and is used for the `name` attribute.
//!
//! The builder may allocate storage for nested sections: an unset
//! `Option<T>` nested record is filled with `T::default()` in the caller's
//! record, so a later decoding step can write into it. An unset slot whose
//! record type is already being built on the current path is left empty and
//! produces no entry, so self-referential records terminate.

use crate::form::{Form, FormEntry, FormField};
use crate::logging::build_span;
use crate::options::{parse_options, FieldOptions};
use crate::record::{FieldDescriptor, FieldKind, Record};
use crate::settings::{self, TagSettings};
use crate::value::ValueMap;

/// Looks up the errors of a field by its dot-joined logical path.
pub type ErrorLookup<'a> = dyn Fn(&str) -> Option<ValueMap> + 'a;

/// Builds [`Form`]s from records.
///
/// # Examples
///
/// ```
/// use htmlform_core::builder::FormBuilder;
/// use htmlform_core::record::{FieldDescriptor, FieldKind, FormValue, Record, Tags};
/// use htmlform_core::settings::TagSettings;
///
/// struct Search {
///     query: String,
/// }
///
/// static FIELDS: [FieldDescriptor; 1] =
///     [FieldDescriptor::new("query", FieldKind::Text, Tags::new(&[("schema", "q")]))];
///
/// impl Record for Search {
///     fn record_name(&self) -> &'static str {
///         "Search"
///     }
///     fn fields(&self) -> &'static [FieldDescriptor] {
///         &FIELDS
///     }
///     fn field_value(&self, _index: usize) -> String {
///         self.query.to_form_value()
///     }
/// }
///
/// let mut search = Search { query: "rust".into() };
/// let form = FormBuilder::new()
///     .with_settings(TagSettings::default())
///     .build(&mut search);
/// let field = form.field("query").unwrap();
/// assert_eq!(field.name, "q");
/// assert_eq!(field.field_type, "text");
/// assert_eq!(field.value, "rust");
/// ```
pub struct FormBuilder<'a> {
    settings: TagSettings,
    errors: Option<&'a ErrorLookup<'a>>,
}

impl Default for FormBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FormBuilder<'a> {
    /// Creates a builder using a snapshot of the process-wide tag settings.
    pub fn new() -> Self {
        Self {
            settings: settings::current(),
            errors: None,
        }
    }

    /// Uses `settings` instead of the process-wide settings.
    #[must_use]
    pub fn with_settings(mut self, settings: TagSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Attaches an error lookup.
    #[must_use]
    pub fn with_errors(mut self, lookup: &'a ErrorLookup<'a>) -> Self {
        self.errors = Some(lookup);
        self
    }

    /// Returns the settings this builder reads tags with.
    pub const fn settings(&self) -> &TagSettings {
        &self.settings
    }

    /// Builds the form of a top-level record.
    pub fn build(&self, record: &mut dyn Record) -> Form {
        self.build_in(record, &[], &[])
    }

    /// Builds the form of `record` placed under the given namespaces.
    ///
    /// # Panics
    ///
    /// Panics if a field described as [`FieldKind::Struct`] does not expose a
    /// nested record. That is a broken descriptor table, not bad input.
    pub fn build_in(
        &self,
        record: &mut dyn Record,
        namespace: &[String],
        html_namespace: &[String],
    ) -> Form {
        self.build_path(record, namespace, html_namespace, &mut Vec::new())
    }

    fn build_path(
        &self,
        record: &mut dyn Record,
        namespace: &[String],
        html_namespace: &[String],
        path: &mut Vec<&'static str>,
    ) -> Form {
        let record_name = record.record_name();
        let span = build_span(record_name, namespace);
        let _guard = span.enter();

        let mut form = Form::new();
        path.push(record.record_type());

        for (index, field) in record.fields().iter().enumerate() {
            let mut field_type: &str = field.kind.form_type();
            let mut name: &str = self.tagged_name(field);
            let options = self.options(field);

            if field.kind == FieldKind::Struct {
                if let Some(slot) = record.nested_slot(index) {
                    if !slot.is_set && path.contains(&slot.record_type) {
                        tracing::debug!(
                            field = field.name,
                            record = slot.record_type,
                            "not allocating recursive nested record"
                        );
                        continue;
                    }
                }
                let nested = record.nested_mut(index).unwrap_or_else(|| {
                    panic!(
                        "htmlform: field `{}` of `{record_name}` is described as a nested record but exposes none",
                        field.name
                    )
                });
                let nested_form = self.build_path(
                    nested,
                    &extended(namespace, field.name),
                    &extended(html_namespace, name),
                    path,
                );
                form.insert(field.name, FormEntry::Form(nested_form));
                continue;
            }

            if let Some(ft) = options.field_type() {
                field_type = ft;
            }
            if let Some(n) = options.name() {
                name = n;
            }

            let errors = self.errors.and_then(|lookup| {
                let path = extended(namespace, field.name).join(".");
                lookup(&path)
            });

            let html_name = extended(html_namespace, name).join(".");
            tracing::trace!(
                field = field.name,
                name = %html_name,
                field_type,
                has_errors = errors.is_some(),
                "built form field"
            );

            form.insert(
                field.name,
                FormEntry::Field(FormField::new(
                    html_name,
                    field_type,
                    record.field_value(index),
                    errors,
                    namespace.to_vec(),
                    html_namespace.to_vec(),
                )),
            );
        }

        path.pop();
        form
    }

    fn tagged_name(&self, field: &FieldDescriptor) -> &'static str {
        match field.tags.get(&self.settings.name_tag) {
            Some(n) if !n.is_empty() => n,
            _ => field.name,
        }
    }

    fn options(&self, field: &FieldDescriptor) -> FieldOptions {
        field
            .tags
            .get(&self.settings.options_tag)
            .map(parse_options)
            .unwrap_or_default()
    }
}

/// Builds a form with the process-wide tag settings.
///
/// Equivalent to [`FormBuilder::build_in`] on a builder created with
/// [`FormBuilder::new`] and, if given, [`FormBuilder::with_errors`].
pub fn create(
    record: &mut dyn Record,
    errors: Option<&ErrorLookup<'_>>,
    namespace: &[String],
    html_namespace: &[String],
) -> Form {
    let builder = FormBuilder {
        settings: settings::current(),
        errors,
    };
    builder.build_in(record, namespace, html_namespace)
}

fn extended(path: &[String], segment: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(segment.to_string());
    out
}
