//! Schema data model
//!
//! Describes one database's tables and columns. Table order and column
//! order are preserved as found in the source document so that prompt
//! rendering is stable across runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Description of one database's schema
///
/// Empty is a valid state: an unknown db_id looks up to an empty
/// description rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescription {
    /// Tables keyed by name, in source order
    pub tables: IndexMap<String, TableSchema>,
}

impl SchemaDescription {
    /// Create an empty description
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this description has no tables
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of tables
    #[inline]
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Table names in source order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Add a table
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: TableSchema) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Render the schema as compact text for a reasoning prompt
    ///
    /// One line per table: `name(col1, col2 TYPE, ...)`.
    #[must_use]
    pub fn to_prompt_text(&self) -> String {
        let mut out = String::new();
        for (name, table) in &self.tables {
            out.push_str(name);
            out.push('(');
            for (i, column) in table.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&column.name);
                if let Some(data_type) = &column.data_type {
                    out.push(' ');
                    out.push_str(data_type);
                }
            }
            out.push_str(")\n");
        }
        out
    }
}

/// One table's column list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSchema {
    /// Columns in source order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create from column descriptors
    #[inline]
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Create from bare column names
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(ColumnDescriptor::named).collect(),
        }
    }
}

/// One column: a name plus an optional declared type
///
/// Deserializes from either a bare string (`"title"`) or an object
/// (`{"name": "year", "type": "INTEGER"}`), both of which occur in
/// schema documents in the wild.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Declared type, if the source carries one
    pub data_type: Option<String>,
}

impl ColumnDescriptor {
    /// Column with no declared type
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
        }
    }

    /// Column with a declared type
    #[inline]
    #[must_use]
    pub fn typed(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
        }
    }
}

impl<'de> Deserialize<'de> for ColumnDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Full {
                name: String,
                #[serde(rename = "type", default)]
                data_type: Option<String>,
            },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Ok(Self {
                name,
                data_type: None,
            }),
            Raw::Full { name, data_type } => Ok(Self { name, data_type }),
        }
    }
}
