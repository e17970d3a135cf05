//! Collection definitions for Shiftdesk.
//!
//! Types for describing document collections in a store-agnostic way.
//! Adapters read these definitions when migrating and enforce the declared
//! unique indexes.

use serde::{Deserialize, Serialize};

/// Collection holding tenants.
pub const COMPANY_COLLECTION: &str = "company";
/// Collection holding platform users.
pub const USER_COLLECTION: &str = "user";
/// Collection holding daily analytics snapshots.
pub const ANALYTICS_COLLECTION: &str = "platform_analytics";

/// Name of the index on the snapshot `date` field.
pub const ANALYTICS_DATE_INDEX: &str = "idx_platform_analytics_date";

/// Represents a complete model (collection) definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDefinition {
    /// The name of the collection.
    pub name: String,
    /// The fields in each document.
    pub fields: Vec<Field>,
    /// Indexes on this collection.
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    /// Whether documents carry system-managed `created_at`/`updated_at`.
    #[serde(default)]
    pub timestamps: bool,
}

impl ModelDefinition {
    /// Creates a new model definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            indexes: Vec::new(),
            timestamps: false,
        }
    }

    /// Adds a field to the model.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds an index to the model.
    pub fn index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    /// Enables system-managed timestamps.
    pub fn timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// Gets a field by name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if a unique index covers exactly `column`.
    pub fn is_unique_on(&self, column: &str) -> bool {
        self.indexes
            .iter()
            .any(|i| i.unique && i.columns.len() == 1 && i.columns[0] == column)
    }
}

/// Represents a field in a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Dotted path of the field (e.g. `subscription.plan`).
    pub name: String,
    /// The data type of the field.
    pub field_type: FieldType,
    /// Whether this field is required.
    #[serde(default)]
    pub required: bool,
    /// Default value, as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Lower bound for numeric fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl Field {
    /// Creates a new required field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            min: None,
        }
    }

    /// Creates a new optional field.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::new(name, field_type)
        }
    }

    /// Sets a default value.
    pub fn default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets a lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }
}

/// Supported field types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    Double,
    Date,
    /// String restricted to a closed set of values.
    Enum(Vec<String>),
    /// Nested document of integer counters keyed by the given names.
    CounterMap(Vec<String>),
}

/// Represents an index definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexDefinition {
    /// Name of the index.
    pub name: String,
    /// Fields included in the index.
    pub columns: Vec<String>,
    /// Whether this is a unique index.
    #[serde(default)]
    pub unique: bool,
}

impl IndexDefinition {
    /// Creates a new index.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
        }
    }

    /// Creates a unique index.
    pub fn unique(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: true,
        }
    }
}

/// The complete set of collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// All model definitions.
    pub models: Vec<ModelDefinition>,
}

impl SchemaDefinition {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Adds a model, replacing any model with the same name.
    pub fn add_model(&mut self, model: ModelDefinition) {
        self.models.retain(|m| m.name != model.name);
        self.models.push(model);
    }

    /// Gets a model by name.
    pub fn get_model(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.name == name)
    }
}

/// Returns the platform collections.
///
/// With `unique_snapshot_date` the snapshot `date` index is unique, which
/// makes a second insert for the same day fail with a duplicate entry.
pub fn platform_schema(unique_snapshot_date: bool) -> Vec<ModelDefinition> {
    vec![
        company_model(),
        user_model(),
        analytics_model(unique_snapshot_date),
    ]
}

fn company_model() -> ModelDefinition {
    ModelDefinition::new(COMPANY_COLLECTION)
        .timestamps()
        .field(Field::new("id", FieldType::String))
        .field(Field::new("name", FieldType::String))
        .field(Field::new("is_active", FieldType::Boolean).default(true.into()))
        .field(Field::new("subscription.plan", FieldType::String).default("free".into()))
        .index(IndexDefinition::new(
            "idx_company_plan",
            vec!["subscription.plan".to_string()],
        ))
}

fn user_model() -> ModelDefinition {
    ModelDefinition::new(USER_COLLECTION)
        .timestamps()
        .field(Field::new("id", FieldType::String))
        .field(Field::new("email", FieldType::String))
        .field(Field::optional("name", FieldType::String))
        .field(Field::new(
            "role",
            FieldType::Enum(vec![
                "super_admin".to_string(),
                "admin".to_string(),
                "employee".to_string(),
            ]),
        ))
        .field(Field::new("is_active", FieldType::Boolean).default(true.into()))
        .field(Field::optional("company_id", FieldType::String))
        .index(IndexDefinition::unique(
            "idx_user_email",
            vec!["email".to_string()],
        ))
        .index(IndexDefinition::new(
            "idx_user_role",
            vec!["role".to_string(), "is_active".to_string()],
        ))
}

fn analytics_model(unique_date: bool) -> ModelDefinition {
    let counter = |name: &str| Field::new(name, FieldType::Integer).default(0.into()).min(0.0);
    let amount = |name: &str| Field::new(name, FieldType::Double).default(0.into()).min(0.0);
    let date_index = if unique_date {
        IndexDefinition::unique(ANALYTICS_DATE_INDEX, vec!["date".to_string()])
    } else {
        IndexDefinition::new(ANALYTICS_DATE_INDEX, vec!["date".to_string()])
    };

    ModelDefinition::new(ANALYTICS_COLLECTION)
        .timestamps()
        .field(Field::new("id", FieldType::String))
        .field(Field::new("date", FieldType::Date))
        .field(counter("total_companies"))
        .field(counter("active_companies"))
        .field(counter("total_super_admins"))
        .field(counter("total_branches"))
        .field(counter("total_employees"))
        .field(counter("active_employees"))
        .field(amount("total_revenue"))
        .field(amount("monthly_revenue"))
        .field(amount("yearly_revenue"))
        .field(Field::new(
            "subscription_breakdown",
            FieldType::CounterMap(vec![
                "free".to_string(),
                "basic".to_string(),
                "pro".to_string(),
                "enterprise".to_string(),
            ]),
        ))
        .field(counter("new_companies_this_month"))
        .field(counter("new_employees_this_month"))
        .field(Field::new("churn_rate", FieldType::Double).default(0.into()))
        .field(
            Field::new(
                "server_status",
                FieldType::Enum(vec![
                    "healthy".to_string(),
                    "warning".to_string(),
                    "critical".to_string(),
                ]),
            )
            .default("healthy".into()),
        )
        .field(Field::new("average_response_time", FieldType::Double).default(0.into()))
        .field(Field::new("error_rate", FieldType::Double).default(0.into()))
        .field(counter("total_shifts"))
        .field(counter("total_attendance_records"))
        .index(date_index)
}
