//! Static catalog of the registrar tables.
//!
//! The catalog is the single source for DDL, load order, key checks and
//! foreign-key checks. Two revisions exist: `plaintext`, and `sealed`, where
//! each sensitive column `c` is stored as a `c_ct`/`c_iv` BLOB pair.

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use serde::Serialize;

use crate::types::RegistrarError;

/// Which column layout a database uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaRevision {
    Plaintext,
    Sealed,
}

impl SchemaRevision {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaRevision::Plaintext => "plaintext",
            SchemaRevision::Sealed => "sealed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plaintext" => Some(SchemaRevision::Plaintext),
            "sealed" => Some(SchemaRevision::Sealed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQLite storage class declared for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub not_null: bool,
}

#[derive(Debug, Serialize)]
pub struct ForeignKeyDef {
    pub columns: &'static [&'static str],
    pub parent: &'static str,
    pub parent_columns: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub primary_key: &'static [&'static str],
    pub foreign_keys: &'static [ForeignKeyDef],
    /// Columns replaced by ciphertext/IV pairs in the sealed revision.
    pub sealed: &'static [&'static str],
    /// Columns bound as associated data when sealing this table's values.
    pub aad: &'static [&'static str],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_sealed(&self, column: &str) -> bool {
        self.sealed.contains(&column)
    }

    /// Physical column names under the given revision, in declaration order.
    pub fn stored_columns(&self, revision: SchemaRevision) -> Vec<String> {
        let mut out = Vec::with_capacity(self.columns.len() + self.sealed.len());
        for col in self.columns {
            if revision == SchemaRevision::Sealed && self.is_sealed(col.name) {
                out.push(format!("{}_ct", col.name));
                out.push(format!("{}_iv", col.name));
            } else {
                out.push(col.name.to_string());
            }
        }
        out
    }

    /// Render the `CREATE TABLE` statement for this table.
    pub fn create_statement(&self, revision: SchemaRevision) -> String {
        let mut lines: Vec<String> = Vec::new();
        for col in self.columns {
            if revision == SchemaRevision::Sealed && self.is_sealed(col.name) {
                lines.push(format!("    {}_ct BLOB", col.name));
                lines.push(format!("    {}_iv BLOB", col.name));
            } else if col.not_null {
                lines.push(format!("    {} {} NOT NULL", col.name, col.ty.as_sql()));
            } else {
                lines.push(format!("    {} {}", col.name, col.ty.as_sql()));
            }
        }
        lines.push(format!("    PRIMARY KEY ({})", self.primary_key.join(", ")));
        for fk in self.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.columns.join(", "),
                fk.parent,
                fk.parent_columns.join(", ")
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
            self.name,
            lines.join(",\n")
        )
    }
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef { name, ty: ColumnType::Text, not_null: false }
}

const fn key(name: &'static str) -> ColumnDef {
    ColumnDef { name, ty: ColumnType::Text, not_null: true }
}

const fn int(name: &'static str) -> ColumnDef {
    ColumnDef { name, ty: ColumnType::Integer, not_null: false }
}

const fn real(name: &'static str) -> ColumnDef {
    ColumnDef { name, ty: ColumnType::Real, not_null: false }
}

const SECTION_KEY: &[&str] = &["course_id", "sec_id", "semester"];

pub static TABLES: &[TableDef] = &[
    TableDef {
        name: "time_slot",
        columns: &[
            key("time_slot_id"),
            key("day"),
            int("start_hr"),
            int("start_min"),
            int("end_hr"),
            int("end_min"),
        ],
        primary_key: &["time_slot_id", "day"],
        foreign_keys: &[],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "classroom",
        columns: &[key("building"), key("room_number"), int("capacity")],
        primary_key: &["building", "room_number"],
        foreign_keys: &[],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "department",
        columns: &[key("dept_name"), text("building"), real("budget")],
        primary_key: &["dept_name"],
        foreign_keys: &[],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "course",
        columns: &[key("course_id"), text("title"), text("dept_name"), int("credits")],
        primary_key: &["course_id"],
        foreign_keys: &[ForeignKeyDef {
            columns: &["dept_name"],
            parent: "department",
            parent_columns: &["dept_name"],
        }],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "student",
        columns: &[key("ID"), text("name"), text("dept_name"), int("tot_cred")],
        primary_key: &["ID"],
        foreign_keys: &[ForeignKeyDef {
            columns: &["dept_name"],
            parent: "department",
            parent_columns: &["dept_name"],
        }],
        sealed: &["name", "tot_cred"],
        aad: &["ID"],
    },
    TableDef {
        name: "instructor",
        columns: &[key("ID"), text("name"), text("dept_name"), real("salary")],
        primary_key: &["ID"],
        foreign_keys: &[ForeignKeyDef {
            columns: &["dept_name"],
            parent: "department",
            parent_columns: &["dept_name"],
        }],
        sealed: &["name", "salary"],
        aad: &["ID"],
    },
    TableDef {
        name: "section",
        columns: &[
            key("course_id"),
            key("sec_id"),
            key("semester"),
            int("year"),
            text("building"),
            text("room_number"),
            text("time_slot_id"),
        ],
        primary_key: SECTION_KEY,
        foreign_keys: &[ForeignKeyDef {
            columns: &["course_id"],
            parent: "course",
            parent_columns: &["course_id"],
        }],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "teaches",
        columns: &[
            key("ID"),
            key("course_id"),
            key("sec_id"),
            text("semester"),
            int("year"),
        ],
        primary_key: &["ID", "course_id", "sec_id"],
        foreign_keys: &[
            ForeignKeyDef {
                columns: &["ID"],
                parent: "instructor",
                parent_columns: &["ID"],
            },
            ForeignKeyDef {
                columns: SECTION_KEY,
                parent: "section",
                parent_columns: SECTION_KEY,
            },
        ],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "prereq",
        columns: &[key("course_id"), key("prereq_id")],
        primary_key: &["course_id", "prereq_id"],
        foreign_keys: &[
            ForeignKeyDef {
                columns: &["course_id"],
                parent: "course",
                parent_columns: &["course_id"],
            },
            ForeignKeyDef {
                columns: &["prereq_id"],
                parent: "course",
                parent_columns: &["course_id"],
            },
        ],
        sealed: &[],
        aad: &[],
    },
    TableDef {
        name: "takes",
        columns: &[
            key("ID"),
            key("course_id"),
            key("sec_id"),
            text("semester"),
            int("year"),
            text("grade"),
        ],
        primary_key: &["ID", "course_id", "sec_id"],
        foreign_keys: &[
            ForeignKeyDef {
                columns: &["ID"],
                parent: "student",
                parent_columns: &["ID"],
            },
            ForeignKeyDef {
                columns: SECTION_KEY,
                parent: "section",
                parent_columns: SECTION_KEY,
            },
        ],
        sealed: &["grade"],
        aad: &["ID", "course_id", "sec_id", "semester", "year"],
    },
    TableDef {
        name: "advisor",
        columns: &[key("i_ID"), key("s_ID")],
        primary_key: &["i_ID", "s_ID"],
        foreign_keys: &[
            ForeignKeyDef {
                columns: &["i_ID"],
                parent: "instructor",
                parent_columns: &["ID"],
            },
            ForeignKeyDef {
                columns: &["s_ID"],
                parent: "student",
                parent_columns: &["ID"],
            },
        ],
        sealed: &[],
        aad: &[],
    },
];

/// Look up a table by name.
pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().find(|t| t.name == name)
}

/// Look up a table by name, failing with `UnknownTable`.
pub fn require_table(name: &str) -> Result<&'static TableDef, RegistrarError> {
    table(name).ok_or_else(|| RegistrarError::UnknownTable(name.to_string()))
}

/// Full DDL for a revision, one statement per table in load order.
pub fn ddl(revision: SchemaRevision) -> Result<String, RegistrarError> {
    let mut out = String::new();
    for t in load_order()? {
        out.push_str(&t.create_statement(revision));
        out.push('\n');
    }
    Ok(out)
}

/// Tables ordered so that every foreign-key parent precedes its children.
pub fn load_order() -> Result<Vec<&'static TableDef>, RegistrarError> {
    let mut graph: DiGraph<&'static TableDef, ()> = DiGraph::new();
    let indices: Vec<_> = TABLES.iter().map(|t| graph.add_node(t)).collect();
    for (child_idx, child) in TABLES.iter().enumerate() {
        for fk in child.foreign_keys {
            let parent_idx = TABLES
                .iter()
                .position(|t| t.name == fk.parent)
                .ok_or_else(|| RegistrarError::UnknownTable(fk.parent.to_string()))?;
            if parent_idx != child_idx {
                graph.update_edge(indices[parent_idx], indices[child_idx], ());
            }
        }
    }
    let sorted = toposort(&graph, None).map_err(|cycle| {
        RegistrarError::Internal(format!(
            "foreign-key cycle through '{}'",
            graph[cycle.node_id()].name
        ))
    })?;
    Ok(sorted.into_iter().map(|idx| graph[idx]).collect())
}
