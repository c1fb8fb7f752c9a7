//! Parameterized queries for the pharmacy/hospital schema.
//!
//! Every statement is a fixed SQL string with `?n` placeholders; user input
//! only ever reaches the database as a bind parameter. Select queries return
//! a [`ResultSet`], an ordered snapshot of column names and stringified rows
//! that the page layer renders as a table and then discards.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ToSql};
use thiserror::Error;

/// Errors from query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The statement failed to prepare or execute.
    #[error("database query failed: {0}")]
    Sql(#[from] rusqlite::Error),
}

impl QueryError {
    /// Whether the underlying SQLite error was a constraint violation
    /// (duplicate primary key, broken foreign key, failed CHECK).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            QueryError::Sql(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// The ordered result of one select: column names plus one Vec of rendered
/// values per row. Consumed once by the page layer, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A validated patient record ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub pid: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub zip: i64,
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Runs one select and collects every row into a [`ResultSet`].
fn select(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<ResultSet, QueryError> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let ncols = columns.len();

    let mut out = Vec::new();
    let mut rows = stmt.query(params)?;
    while let Some(row) = rows.next()? {
        let mut rendered = Vec::with_capacity(ncols);
        for i in 0..ncols {
            rendered.push(render_value(row.get_ref(i)?));
        }
        out.push(rendered);
    }

    Ok(ResultSet {
        columns,
        rows: out,
    })
}

/// Whether a patient with the given id already exists.
pub fn patient_exists(conn: &Connection, pid: i64) -> Result<bool, QueryError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM patient WHERE pid = ?1)",
        [pid],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Inserts one patient row. Callers check [`patient_exists`] first.
pub fn insert_patient(conn: &Connection, patient: &NewPatient) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO patient (pid, name, age, gender, zip) VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            patient.pid,
            &patient.name,
            patient.age,
            &patient.gender,
            patient.zip,
        ),
    )?;
    Ok(())
}

/// All prescriptions issued to one patient.
pub fn prescriptions_for_patient(conn: &Connection, pid: i64) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT pid, case_id, qid, ndc
         FROM prescription_belongto_issue
         WHERE pid = ?1
         ORDER BY case_id",
        &[&pid],
    )
}

/// The doctor (and their hospital) who issued one prescription case.
pub fn doctors_for_case(
    conn: &Connection,
    pid: i64,
    case_id: i64,
) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT d.qid, d.doc_name, d.type, h.hos_name, h.zip
         FROM doctor_worksin d
         JOIN hospital h ON d.hid = h.hid
         WHERE d.qid = (SELECT qid FROM prescription_belongto_issue
                        WHERE pid = ?1 AND case_id = ?2)",
        &[&pid, &case_id],
    )
}

/// Doctors of one specialty, with the hospital each works in.
pub fn doctors_by_specialty(conn: &Connection, specialty: &str) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT d.qid, d.doc_name, d.type, h.hos_name, h.zip
         FROM doctor_worksin d
         JOIN hospital h ON d.hid = h.hid
         WHERE d.type = ?1
         ORDER BY d.qid",
        &[&specialty],
    )
}

/// Hospitals stocking at least `amount` units of a medicine, nearest zip
/// code first.
pub fn hospitals_with_stock(
    conn: &Connection,
    drug_name: &str,
    amount: i64,
    zip: i64,
) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT h.hos_name, h.zip
         FROM medicine m
         JOIN sell_in s ON m.ndc = s.ndc
         JOIN hospital h ON h.hid = s.hid
         WHERE m.med_name = ?1 AND s.quantity >= ?2
         ORDER BY ABS(?3 - h.zip)",
        &[&drug_name, &amount, &zip],
    )
}

/// Hospitals carrying a medicine identified by name and NDC code.
pub fn medicine_locations(
    conn: &Connection,
    drug_name: &str,
    ndc: &str,
) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT m.med_name, m.ndc, h.hos_name
         FROM medicine m
         JOIN sell_in s ON m.ndc = s.ndc
         JOIN hospital h ON s.hid = h.hid
         WHERE m.med_name = ?1 AND m.ndc = ?2",
        &[&drug_name, &ndc],
    )
}

/// Patient rows reachable from a patient id through the prescription table.
pub fn patients_of_prescriber(conn: &Connection, pid: i64) -> Result<ResultSet, QueryError> {
    select(
        conn,
        "SELECT DISTINCT p.name, p.pid
         FROM patient p
         JOIN prescription_belongto_issue i ON p.pid = i.pid
         JOIN doctor_worksin d ON i.qid = d.qid
         WHERE p.pid = ?1",
        &[&pid],
    )
}
