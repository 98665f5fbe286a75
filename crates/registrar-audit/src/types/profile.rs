use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub kind: String, // "null" | "bool" | "int" | "float" | "str" | "array" | "object"
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldProfile {
    pub name: String,
    pub types: Vec<TypeCount>,
    pub nulls: u64,
    pub max_len: usize,
    pub has_array: bool,
    pub has_object: bool,
    pub column_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateKey {
    pub field: String,
    pub surrogate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTable {
    pub name: String,
    pub field: String,
    pub kind: String, // "array" | "object"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    pub table: String,
    pub records: u64,
    pub fields: Vec<FieldProfile>,
    pub primary_key: CandidateKey,
    pub children: Vec<ChildTable>,
}

impl TableProfile {
    pub fn field(&self, name: &str) -> Option<&FieldProfile> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub version: String,
    pub command: String,
    pub tables: Vec<TableProfile>,
}

impl ProfileReport {
    pub fn table(&self, name: &str) -> Option<&TableProfile> {
        self.tables.iter().find(|t| t.table == name)
    }
}
