//! Shared fixtures for the audit tests.

use registrar_core::cipher::{ColumnCipher, ColumnRef, SealedValue};
use registrar_core::export::ExportDocument;
use registrar_core::schema::SchemaRevision;
use registrar_core::sqlite::SqliteRegistrarStore;
use registrar_core::sqlite_load::LoadOptions;
use registrar_core::types::RegistrarError;
use serde_json::{json, Value};

/// Reverses the plaintext and uses the aad length as IV.
#[derive(Default)]
pub struct ReverseCipher;

impl ColumnCipher for ReverseCipher {
    fn seal(
        &self,
        _column: ColumnRef<'_>,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<SealedValue, RegistrarError> {
        Ok(SealedValue {
            ciphertext: plaintext.iter().rev().copied().collect(),
            iv: (aad.len() as u32).to_be_bytes().to_vec(),
        })
    }

    fn open(
        &self,
        _column: ColumnRef<'_>,
        sealed: &SealedValue,
        _aad: &[u8],
    ) -> Result<Vec<u8>, RegistrarError> {
        Ok(sealed.ciphertext.iter().rev().copied().collect())
    }
}

pub fn university() -> Value {
    json!({
        "department": [
            {"dept_name": "Comp. Sci.", "building": "Taylor", "budget": 100000},
            {"dept_name": "Physics", "building": "Watson", "budget": 70000}
        ],
        "course": [
            {"course_id": "CS-101", "title": "Intro. to Computer Science", "dept_name": "Comp. Sci.", "credits": 4},
            {"course_id": "PHY-101", "title": "Physical Principles", "dept_name": "Physics", "credits": 4}
        ],
        "instructor": [
            {"ID": "10101", "name": "Srinivasan", "dept_name": "Comp. Sci.", "salary": 65000},
            {"ID": "22222", "name": "Einstein", "dept_name": "Physics", "salary": 95000}
        ],
        "student": [
            {"ID": "00128", "name": "Zhang", "dept_name": "Comp. Sci.", "tot_cred": 102},
            {"ID": "12345", "name": "Shankar", "dept_name": "Comp. Sci.", "tot_cred": 32}
        ],
        "section": [
            {"course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017},
            {"course_id": "PHY-101", "sec_id": "1", "semester": "Fall", "year": 2017}
        ],
        "takes": [
            {"ID": "00128", "course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017, "grade": "A"},
            {"ID": "12345", "course_id": "CS-101", "sec_id": "1", "semester": "Fall", "year": 2017, "grade": "C"}
        ],
        "advisor": [
            {"i_ID": "10101", "s_ID": "12345"},
            {"i_ID": "22222", "s_ID": "00128"}
        ]
    })
}

pub fn doc(value: Value) -> ExportDocument {
    ExportDocument::from_value(value).unwrap()
}

/// An in-memory store holding `value`, foreign keys unenforced.
pub fn loaded(value: Value, revision: SchemaRevision) -> SqliteRegistrarStore {
    let cipher = ReverseCipher;
    let mut store = SqliteRegistrarStore::in_memory(revision).unwrap();
    let options = LoadOptions {
        enforce_foreign_keys: false,
        cipher: (revision == SchemaRevision::Sealed).then_some(&cipher as &dyn ColumnCipher),
        replace: false,
    };
    store.load_export(&doc(value), options).unwrap();
    store
}
