//! Product records and update payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::ValidationError;

/// Product row as stored
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Request body for create and full update
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// Overwrite every mutable field. The id is kept.
    pub fn replace_with(&mut self, fields: NewProduct) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
    }

    /// Apply a partial update from a JSON object.
    ///
    /// Only `name`, `description` and `price` are mutable. Any other key,
    /// `id` included, is skipped. A mutable key holding the wrong JSON type
    /// rejects the whole patch and leaves `self` untouched.
    ///
    /// Returns the names of the fields that were written.
    pub fn apply_patch(
        &mut self,
        fields: &Map<String, Value>,
    ) -> Result<Vec<&'static str>, ValidationError> {
        let mut patched = self.clone();
        let mut applied = Vec::new();

        for (key, value) in fields {
            match key.as_str() {
                "name" => {
                    patched.name = string_field("name", value)?;
                    applied.push("name");
                }
                "description" => {
                    patched.description = string_field("description", value)?;
                    applied.push("description");
                }
                "price" => {
                    patched.price = value.as_f64().ok_or(ValidationError::InvalidType {
                        field: "price",
                        expected: "a number",
                    })?;
                    applied.push("price");
                }
                _ => {}
            }
        }

        *self = patched;
        Ok(applied)
    }
}

fn string_field(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::InvalidType {
            field,
            expected: "a string",
        })
}
