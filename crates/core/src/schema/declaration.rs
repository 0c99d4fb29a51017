//! Declarations and schema extraction.

use super::field::FieldDescriptor;
use super::grammar::parse_fields;
use super::table::{Schema, SchemaBuilder};
use crate::error::{Error, Result};

/// Declarative description of a record type's columns.
///
/// Columns can come from a text block (see [`grammar`](super::grammar)),
/// from explicit `(name, descriptor)` pairs, or both. Explicit fields win
/// over same-named text entries and keep the text entry's position.
///
/// ```rust
/// use tillage_core::schema::{Declaration, FieldDescriptor};
///
/// let schema = Declaration::new("Crop")
///     .text("name: charfield, max_length=50\nseason: charfield")
///     .field("season", FieldDescriptor::string_with_len(20).choices(["spring", "summer"]))
///     .field("ripening_period", FieldDescriptor::integer().min(10).max(60))
///     .extract()
///     .unwrap();
///
/// let names: Vec<&str> = schema.column_names().collect();
/// assert_eq!(names, ["id", "name", "season", "ripening_period"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declaration {
    type_name: String,
    table_name: Option<String>,
    text: Option<String>,
    fields: Vec<(String, FieldDescriptor)>,
    lenient_foreign_keys: bool,
}

impl Declaration {
    /// Starts a declaration for the named record type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Overrides the derived table name.
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Appends a text block in the line grammar.
    pub fn text(mut self, block: impl AsRef<str>) -> Self {
        let block = block.as_ref();
        match &mut self.text {
            Some(text) => {
                text.push('\n');
                text.push_str(block);
            }
            None => self.text = Some(block.to_string()),
        }
        self
    }

    /// Adds an explicit field.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    /// Keeps foreign keys declared without `references=` instead of
    /// rejecting them. Such columns render without a references clause.
    pub fn lenient_foreign_keys(mut self, lenient: bool) -> Self {
        self.lenient_foreign_keys = lenient;
        self
    }

    /// Returns the record type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Extracts the schema described by this declaration.
    pub fn extract(&self) -> Result<Schema> {
        extract(self)
    }
}

/// Builds the schema for a declaration.
///
/// Pure and idempotent: the same declaration always yields an equal schema.
pub fn extract(declaration: &Declaration) -> Result<Schema> {
    let mut builder = SchemaBuilder::new(&declaration.type_name)?;
    if let Some(table) = &declaration.table_name {
        builder = builder.table_name(table)?;
    }

    if let Some(text) = &declaration.text {
        // Later text lines for the same name replace earlier ones.
        for (name, descriptor) in parse_fields(text, declaration.lenient_foreign_keys)? {
            builder = builder.set_field(name, descriptor)?;
        }
    }

    let mut explicit: Vec<&str> = Vec::with_capacity(declaration.fields.len());
    for (name, descriptor) in &declaration.fields {
        if explicit.contains(&name.as_str()) {
            return Err(Error::schema(format!(
                "field {} declared twice on {}",
                name, declaration.type_name
            )));
        }
        explicit.push(name);
        builder = builder.set_field(name, descriptor.clone())?;
    }

    builder.build()
}
