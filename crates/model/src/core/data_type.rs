use crate::error::ModelError;
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// Declared type of a stream variable, constant or store attribute.
///
/// Deserializes from any name the type map knows, case-insensitively, so
/// condition files may say `bigint` or `TEXT` as well as `long` or `string`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
    VarChar,
    Char,
    Enum,
    Json,
    Uuid,
    Date,
    Timestamp,
    Null,
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, DataType> = build_type_name_map();
}

impl DataType {
    /// Values of textual types are quoted when rendered into a filter.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            DataType::String
                | DataType::VarChar
                | DataType::Char
                | DataType::Enum
                | DataType::Uuid
                | DataType::Date
                | DataType::Timestamp
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::Long => "LONG",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Boolean => "BOOLEAN",
            DataType::String => "STRING",
            DataType::VarChar => "VARCHAR",
            DataType::Char => "CHAR",
            DataType::Enum => "ENUM",
            DataType::Json => "JSON",
            DataType::Uuid => "UUID",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Null => "NULL",
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_uppercase()
    }
}

impl FromStr for DataType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = Self::normalize_type_name(s);
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| ModelError::UnknownType(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn build_type_name_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("INT", Int),
        ("INTEGER", Int),
        ("LONG", Long),
        ("BIGINT", Long),
        ("FLOAT", Float),
        ("REAL", Float),
        ("DOUBLE", Double),
        ("DOUBLE PRECISION", Double),
        ("BOOL", Boolean),
        ("BOOLEAN", Boolean),
        ("STRING", String),
        ("TEXT", String),
        ("VARCHAR", VarChar),
        ("CHARACTER VARYING", VarChar),
        ("CHAR", Char),
        ("CHARACTER", Char),
        ("ENUM", Enum),
        ("JSON", Json),
        ("OBJECT", Json),
        ("UUID", Uuid),
        ("DATE", Date),
        ("TIMESTAMP", Timestamp),
        ("DATETIME", Timestamp),
        ("NULL", Null),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
