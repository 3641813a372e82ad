//! Infraction records as stored and as received.

use rusqlite::types::Value as SqlValue;
use rusqlite::Row;
use serde::Serialize;
use serde_json::Value;

use crate::storage::error::{Result, StorageError};

/// A stored speed infraction.
///
/// `speed` is whatever the REAL column holds: a number normally, text when
/// the inserted value was not numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Infraction {
    pub id: i64,
    pub plate: String,
    pub speed: Value,
    pub timestamp: String,
}

impl Infraction {
    /// Map a `SELECT id, plate, speed, timestamp` row.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            plate: row.get(1)?,
            speed: to_json(row.get(2)?),
            timestamp: row.get(3)?,
        })
    }
}

/// Fields of an infraction about to be inserted.
///
/// Values are kept as received; column affinity decides how they are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInfraction {
    pub plate: Value,
    pub speed: Value,
    pub timestamp: Value,
}

impl NewInfraction {
    pub fn new(plate: impl Into<Value>, speed: impl Into<Value>, timestamp: impl Into<Value>) -> Self {
        Self {
            plate: plate.into(),
            speed: speed.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Bindable parameters in column order (plate, speed, timestamp).
    pub(crate) fn params(&self) -> Result<[SqlValue; 3]> {
        Ok([
            bind(1, &self.plate)?,
            bind(2, &self.speed)?,
            bind(3, &self.timestamp)?,
        ])
    }
}

fn to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => Value::from(f),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(bytes) => Value::from(bytes),
    }
}

fn bind(index: usize, value: &Value) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(SqlValue::Integer(i)),
            None => Ok(SqlValue::Real(n.as_f64().unwrap_or(f64::NAN))),
        },
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) => Err(StorageError::UnsupportedType { index, kind: "array" }),
        Value::Object(_) => Err(StorageError::UnsupportedType { index, kind: "object" }),
    }
}
