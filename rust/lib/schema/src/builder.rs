use tracing::{debug, warn};

use crate::assist::{AssistError, FieldAssistant};
use crate::config::PageGenerationConfig;
use crate::error::SchemaError;
use crate::model::{Constraint, Field, Index, References, Schema};
use crate::suggest::{boilerplate_fields, suggest, suggest_constraints, suggest_indexes};

/// Callback receiving every distinct schema state.
pub type ChangeFn = Box<dyn FnMut(&Schema) + Send>;

/// A single-property edit on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Type(String),
    Description(String),
    Required(bool),
    PrimaryKey(bool),
    ForeignKey(bool),
    References(Option<References>),
}

/// Result of an assistant-backed generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistOutcome {
    /// The assistant answered; the field list was replaced.
    Generated { fields: usize },
    /// The assistant failed. Existing fields were kept; an empty list was
    /// filled with the boilerplate fields. `message` is meant for the user.
    Fallback { message: String },
}

/// Editable schema state with change propagation.
///
/// Every mutating operation ends with [`SchemaBuilder::notify_if_changed`],
/// which serializes the schema and calls the change callback only when the
/// serialized form differs from the last one delivered. Equality is
/// structural, so an edit that restores a previous value is silent.
pub struct SchemaBuilder {
    schema: Schema,
    last_notified: Option<String>,
    on_change: Option<ChangeFn>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::from_schema(Schema::default())
    }

    pub fn from_schema(schema: Schema) -> Self {
        Self {
            schema,
            last_notified: None,
            on_change: None,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    pub fn fields(&self) -> &[Field] {
        &self.schema.fields
    }

    /// Install the change callback. The next sync delivers the current
    /// state even if it was delivered to a previous callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(&Schema) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
        self.last_notified = None;
    }

    /// Deliver the current state if it differs from the last delivered one.
    /// Returns whether the callback ran.
    pub fn notify_if_changed(&mut self) -> bool {
        let Some(callback) = self.on_change.as_mut() else {
            return false;
        };

        let serialized = match serde_json::to_string(&self.schema) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "schema serialization failed, change not delivered");
                return false;
            }
        };
        if self.last_notified.as_deref() == Some(serialized.as_str()) {
            return false;
        }

        debug!(table = %self.schema.table_name, fields = self.schema.fields.len(), "schema changed");
        callback(&self.schema);
        self.last_notified = Some(serialized);
        true
    }

    // =======================================================================
    // Page metadata
    // =======================================================================

    pub fn set_page_title(&mut self, title: impl Into<String>) {
        self.schema.page_title = title.into();
        self.notify_if_changed();
    }

    pub fn set_page_subtitle(&mut self, subtitle: impl Into<String>) {
        self.schema.page_subtitle = subtitle.into();
        self.notify_if_changed();
    }

    pub fn set_table_name(&mut self, table_name: impl Into<String>) {
        self.schema.table_name = table_name.into();
        self.notify_if_changed();
    }

    // =======================================================================
    // Fields
    // =======================================================================

    /// Append an empty `varchar(255)` field and return its position.
    pub fn add_field(&mut self) -> usize {
        self.schema.fields.push(Field::new("", "varchar(255)"));
        self.notify_if_changed();
        self.schema.fields.len() - 1
    }

    pub fn remove_field(&mut self, index: usize) -> Result<Field, SchemaError> {
        self.check_field(index)?;
        let removed = self.schema.fields.remove(index);
        self.notify_if_changed();
        Ok(removed)
    }

    /// Swap with the previous field. No-op at the top; returns whether it moved.
    pub fn move_field_up(&mut self, index: usize) -> Result<bool, SchemaError> {
        self.check_field(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.schema.fields.swap(index, index - 1);
        self.notify_if_changed();
        Ok(true)
    }

    /// Swap with the next field. No-op at the bottom; returns whether it moved.
    pub fn move_field_down(&mut self, index: usize) -> Result<bool, SchemaError> {
        self.check_field(index)?;
        if index + 1 == self.schema.fields.len() {
            return Ok(false);
        }
        self.schema.fields.swap(index, index + 1);
        self.notify_if_changed();
        Ok(true)
    }

    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> Result<(), SchemaError> {
        self.check_field(index)?;
        let field = &mut self.schema.fields[index];
        match update {
            FieldUpdate::Name(name) => field.name = name,
            FieldUpdate::Type(sql_type) => field.sql_type = sql_type,
            FieldUpdate::Description(description) => field.description = description,
            FieldUpdate::Required(required) => field.required = required,
            FieldUpdate::PrimaryKey(pk) => field.is_primary_key = pk,
            FieldUpdate::ForeignKey(fk) => field.is_foreign_key = fk,
            FieldUpdate::References(references) => field.references = references,
        }
        self.notify_if_changed();
        Ok(())
    }

    /// Replace fields, indexes and constraints with the suggestions for the
    /// current table name.
    pub fn apply_suggestions(&mut self) {
        let suggestion = suggest(&self.schema.table_name);
        self.schema.fields = suggestion.fields;
        self.schema.indexes = suggestion.indexes;
        self.schema.constraints = suggestion.constraints;
        self.notify_if_changed();
    }

    /// Wipe every field, index and constraint, but only if `confirm`
    /// (given the current field count) agrees. Returns whether the wipe
    /// happened.
    pub fn remove_all_fields(&mut self, confirm: impl FnOnce(usize) -> bool) -> bool {
        if !confirm(self.schema.fields.len()) {
            return false;
        }
        self.schema.fields.clear();
        self.schema.indexes.clear();
        self.schema.constraints.clear();
        self.notify_if_changed();
        true
    }

    /// Ask `assistant` for fields described by `context`.
    ///
    /// Never fails and never leaves the field list empty: on any error the
    /// current fields are kept, or the boilerplate fields are installed when
    /// there were none.
    pub async fn generate_with_assistant(
        &mut self,
        assistant: &dyn FieldAssistant,
        context: &str,
    ) -> AssistOutcome {
        let table_name = self.schema.table_name.clone();
        let answer = match assistant.suggest_fields(&table_name, context).await {
            Ok(fields) if fields.is_empty() => Err(AssistError::Empty),
            other => other,
        };
        match answer {
            Ok(fields) => {
                let count = fields.len();
                self.schema.indexes = suggest_indexes(&fields);
                self.schema.constraints = suggest_constraints(&fields);
                self.schema.fields = fields;
                self.notify_if_changed();
                AssistOutcome::Generated { fields: count }
            }
            Err(e) => {
                warn!(table = %table_name, error = %e, "field assistant failed, using fallback");
                if self.schema.fields.is_empty() {
                    self.schema.fields = boilerplate_fields();
                    self.notify_if_changed();
                }
                AssistOutcome::Fallback {
                    message: format!(
                        "Não foi possível gerar campos automaticamente ({}). Campos padrão mantidos.",
                        e
                    ),
                }
            }
        }
    }

    // =======================================================================
    // Indexes & constraints
    // =======================================================================

    pub fn add_index(&mut self, index: Index) {
        self.schema.indexes.push(index);
        self.notify_if_changed();
    }

    pub fn remove_index(&mut self, index: usize) -> Result<Index, SchemaError> {
        let len = self.schema.indexes.len();
        if index >= len {
            return Err(SchemaError::EntryIndexOutOfRange { index, len });
        }
        let removed = self.schema.indexes.remove(index);
        self.notify_if_changed();
        Ok(removed)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.schema.constraints.push(constraint);
        self.notify_if_changed();
    }

    pub fn remove_constraint(&mut self, index: usize) -> Result<Constraint, SchemaError> {
        let len = self.schema.constraints.len();
        if index >= len {
            return Err(SchemaError::EntryIndexOutOfRange { index, len });
        }
        let removed = self.schema.constraints.remove(index);
        self.notify_if_changed();
        Ok(removed)
    }

    // =======================================================================
    // Outputs
    // =======================================================================

    /// DDL for the current state.
    pub fn sql(&self) -> String {
        self.schema.sql()
    }

    pub fn to_generation_config(&self, base_path: impl Into<String>) -> PageGenerationConfig {
        PageGenerationConfig::from_schema(&self.schema, base_path)
    }

    fn check_field(&self, index: usize) -> Result<(), SchemaError> {
        let len = self.schema.fields.len();
        if index >= len {
            return Err(SchemaError::FieldIndexOutOfRange { index, len });
        }
        Ok(())
    }
}
