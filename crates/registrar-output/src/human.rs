use crate::human_helpers::{key_display, limited_lines, record_line, section_header};
use crate::OutputFormatter;
use registrar_audit::types::{
    IntegrityReport, LoadResult, ProfileReport, ReconcileReport, ScanResult, SchemaResult,
};

/// Plain text reports. Long lists are cut at `print_limit` entries.
pub struct HumanFormatter {
    pub print_limit: usize,
}

impl HumanFormatter {
    pub fn new(print_limit: usize) -> Self {
        Self { print_limit }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new(25)
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scan(&self, result: &ScanResult) -> String {
        if result.matched.is_empty() {
            return format!("No records found for student {}.\n", result.student_id);
        }

        let mut out = format!(
            "Found {} record(s) for student {}:\n",
            result.matched.len(),
            result.student_id
        );
        let lines: Vec<String> = result.matched.iter().map(record_line).collect();
        out.push_str(&limited_lines(&lines, self.print_limit));

        if result.duplicates.is_empty() {
            out.push_str("\nNo duplicate course registrations.\n");
        } else {
            out.push_str("\nDuplicate course registrations:\n");
            for d in &result.duplicates {
                out.push_str(&format!("  {}: {} times\n", d.course_id, d.count));
            }
        }
        out
    }

    fn format_schema(&self, result: &SchemaResult) -> String {
        result.ddl.clone()
    }

    fn format_load(&self, result: &LoadResult) -> String {
        let s = &result.summary;
        let mut out = format!(
            "Loaded {} row(s) into {} ({} schema, foreign keys {})\n",
            s.total_rows(),
            result.database,
            s.revision,
            if s.foreign_keys_enforced { "enforced" } else { "not enforced" },
        );
        for t in &s.tables {
            out.push_str(&format!("  {}: {}\n", t.table, t.rows));
        }
        out
    }

    fn format_integrity(&self, report: &IntegrityReport) -> String {
        let mut out = String::new();

        out.push_str(&section_header("ROW COUNTS (export vs database)"));
        for c in &report.row_counts {
            out.push_str(&format!(
                "- {}: export={} | database={} -> {}\n",
                c.table,
                c.export,
                c.database,
                c.status.as_str()
            ));
        }

        out.push_str(&section_header("CHECKSUMS by primary key (export vs database)"));
        for c in &report.checksums {
            out.push_str(&format!(
                "- {}: export={} | database={} -> {}\n",
                c.table,
                c.export,
                c.database,
                c.status.as_str()
            ));
        }

        for (title, tables) in [
            ("PRIMARY KEY UNIQUENESS (export)", &report.export_duplicates),
            ("PRIMARY KEY UNIQUENESS (database)", &report.database_duplicates),
        ] {
            out.push_str(&section_header(title));
            for t in tables {
                if t.duplicates.is_empty() {
                    out.push_str(&format!("- {}: OK (no duplicates)\n", t.table));
                    continue;
                }
                out.push_str(&format!("- {}: DUPLICATES found\n", t.table));
                let lines: Vec<String> = t
                    .duplicates
                    .iter()
                    .map(|d| format!("{} x{}", key_display(&d.key), d.count))
                    .collect();
                out.push_str(&limited_lines(&lines, self.print_limit));
            }
        }

        out.push_str(&section_header("FOREIGN KEY COMPLETENESS (database)"));
        for o in &report.orphans {
            let relation = format!(
                "{}({}) -> {}({})",
                o.table,
                o.columns.join(", "),
                o.parent,
                o.parent_columns.join(", ")
            );
            if o.orphans.is_empty() {
                out.push_str(&format!("- {}: OK\n", relation));
                continue;
            }
            out.push_str(&format!("- {}: ORPHANS found\n", relation));
            let lines: Vec<String> = o.orphans.iter().map(|k| key_display(k)).collect();
            out.push_str(&limited_lines(&lines, self.print_limit));
        }

        if !report.sealed_samples.is_empty() {
            out.push_str(&section_header("SEALED SAMPLES (export key vs stored ciphertext)"));
            for s in &report.sealed_samples {
                let key = key_display(&s.key);
                match (s.found, s.ciphertext_len, &s.iv_hex) {
                    (false, _, _) => out.push_str(&format!(
                        "- {}.{} {}: row not found\n",
                        s.table, s.column, key
                    )),
                    (true, len, iv) => out.push_str(&format!(
                        "- {}.{} {}: ciphertext_len={} | iv={}\n",
                        s.table,
                        s.column,
                        key,
                        len.map_or_else(|| "-".to_string(), |l| l.to_string()),
                        iv.as_deref().unwrap_or("-"),
                    )),
                }
            }
        }

        let issues = report.issue_count();
        if issues == 0 {
            out.push_str(&format!("\nIntegrity check clean ({} schema).\n", report.revision));
        } else {
            out.push_str(&format!("\n{} issue(s) found.\n", issues));
        }
        out
    }

    fn format_profile(&self, report: &ProfileReport) -> String {
        let mut out = String::new();
        for t in &report.tables {
            out.push_str(&section_header(&format!("{} ({} records)", t.table, t.records)));
            out.push_str(&format!(
                "primary key: {}{}\n",
                t.primary_key.field,
                if t.primary_key.surrogate { " (surrogate)" } else { "" }
            ));
            for f in &t.fields {
                let types: Vec<String> = f
                    .types
                    .iter()
                    .map(|c| format!("{}={}", c.kind, c.count))
                    .collect();
                out.push_str(&format!(
                    "  {}: {}  [{}] nulls={}\n",
                    f.name,
                    f.column_type,
                    types.join(" "),
                    f.nulls
                ));
            }
            for c in &t.children {
                out.push_str(&format!("  child table {} <- {} ({})\n", c.name, c.field, c.kind));
            }
        }
        if report.tables.is_empty() {
            out.push_str("No known collections in export.\n");
        }
        out
    }

    fn format_reconcile(&self, report: &ReconcileReport) -> String {
        let mut out = format!(
            "Advisor pairs: export={} | database={} | common={}\n",
            report.export_pairs, report.database_pairs, report.common
        );
        if report.matches() {
            out.push_str("Advisor pairs match.\n");
            return out;
        }
        if !report.export_only.is_empty() {
            out.push_str(&format!("\nOnly in export ({}):\n", report.export_only.len()));
            out.push_str(&limited_lines(&report.export_only, self.print_limit));
        }
        if !report.database_only.is_empty() {
            out.push_str(&format!("\nOnly in database ({}):\n", report.database_only.len()));
            out.push_str(&limited_lines(&report.database_only, self.print_limit));
        }
        out
    }
}
