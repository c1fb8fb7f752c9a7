//! HTML page rendering.
//!
//! The whole UI is a handful of static forms plus a generic result table, so
//! pages are assembled as strings around one shared layout and served via
//! [`axum::response::Html`]. Every dynamic value passes through [`escape`]
//! before it reaches markup.

use axum::http::StatusCode;
use axum::response::Html;
use mediport_db::ResultSet;

/// Escapes the five HTML metacharacters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - mediport</title>\n\
         </head>\n\
         <body>\n\
         <nav>\n\
         <a href=\"/\">Home</a>\n\
         <a href=\"/patient\">Patients</a>\n\
         <a href=\"/prescription\">Prescriptions</a>\n\
         <a href=\"/finddoctor\">Find a doctor</a>\n\
         <a href=\"/findhospitalmed\">Find medicine</a>\n\
         <a href=\"/doctorfindmed\">Clinician: medicine</a>\n\
         <a href=\"/doctorfindpatient\">Clinician: patients</a>\n\
         </nav>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    ))
}

/// The inline message banner shown on a form after a validation failure or
/// an empty search.
fn banner(notice: Option<&str>) -> String {
    match notice {
        Some(msg) => format!("<p class=\"notice\">{}</p>\n", escape(msg)),
        None => String::new(),
    }
}

/// Renders a [`ResultSet`] as a table, or nothing when absent.
fn results(results: Option<&ResultSet>) -> String {
    let Some(rs) = results else {
        return String::new();
    };

    let mut out = String::from("<table border=\"1\">\n<tr>");
    for column in &rs.columns {
        out.push_str("<th>");
        out.push_str(&escape(column));
        out.push_str("</th>");
    }
    out.push_str("</tr>\n");
    for row in &rs.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

pub fn index_page() -> Html<String> {
    layout(
        "Pharmacy portal",
        "<p>Search prescriptions, doctors, and medicine stock, or register a new patient.</p>\n",
    )
}

pub fn another_page() -> Html<String> {
    layout("Another page", "<p>Nothing to see here.</p>\n")
}

pub fn patient_page(notice: Option<&str>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/add_patient\">\n\
         <label>Patient id <input name=\"pid\"></label>\n\
         <label>Name <input name=\"name\"></label>\n\
         <label>Age <input name=\"age\"></label>\n\
         <label>Gender\n\
         <select name=\"gender\">\n\
         <option value=\"\">--</option>\n\
         <option value=\"male\">male</option>\n\
         <option value=\"female\">female</option>\n\
         <option value=\"other\">other</option>\n\
         </select>\n\
         </label>\n\
         <label>Zip code <input name=\"zip\"></label>\n\
         <button type=\"submit\">Add patient</button>\n\
         </form>\n",
        banner = banner(notice),
    );
    layout("Register a patient", &body)
}

pub fn prescription_page(notice: Option<&str>, rows: Option<&ResultSet>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/search_prescription\">\n\
         <label>Patient id <input name=\"pid\"></label>\n\
         <button type=\"submit\">Search prescriptions</button>\n\
         </form>\n\
         {table}",
        banner = banner(notice),
        table = results(rows),
    );
    layout("Prescriptions", &body)
}

pub fn finddoctor_page(notice: Option<&str>, rows: Option<&ResultSet>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/search_doctor\">\n\
         <label>Patient id <input name=\"pid\"></label>\n\
         <label>Case number <input name=\"case_id\"></label>\n\
         <button type=\"submit\">Find my doctor</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/search_doctor_type\">\n\
         <label>Specialty <input name=\"type\"></label>\n\
         <button type=\"submit\">Find doctors by specialty</button>\n\
         </form>\n\
         {table}",
        banner = banner(notice),
        table = results(rows),
    );
    layout("Find a doctor", &body)
}

pub fn findhospitalmed_page(notice: Option<&str>, rows: Option<&ResultSet>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/search_near_med\">\n\
         <label>Medicine name <input name=\"drug_name\"></label>\n\
         <label>Amount <input name=\"amount\"></label>\n\
         <label>Your zip code <input name=\"zip\"></label>\n\
         <button type=\"submit\">Find nearby stock</button>\n\
         </form>\n\
         {table}",
        banner = banner(notice),
        table = results(rows),
    );
    layout("Find medicine near you", &body)
}

pub fn doctorfindmed_page(notice: Option<&str>, rows: Option<&ResultSet>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/doctor_search_medicine\">\n\
         <label>NDC <input name=\"ndc\"></label>\n\
         <label>Medicine name <input name=\"drug_name\"></label>\n\
         <button type=\"submit\">Search medicine</button>\n\
         </form>\n\
         {table}",
        banner = banner(notice),
        table = results(rows),
    );
    layout("Clinician: search medicine", &body)
}

pub fn doctorfindpatient_page(notice: Option<&str>, rows: Option<&ResultSet>) -> Html<String> {
    let body = format!(
        "{banner}\
         <form method=\"post\" action=\"/doctor_search_patients\">\n\
         <label>Patient id <input name=\"pid\"></label>\n\
         <button type=\"submit\">Search patients</button>\n\
         </form>\n\
         {table}",
        banner = banner(notice),
        table = results(rows),
    );
    layout("Clinician: search patients", &body)
}

/// The page body for an HTTP error response.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    layout(&title, &format!("<p>{}</p>\n", escape(message)))
}

// Thin async wrappers so the router can point straight at the static pages.

pub async fn index_handler() -> Html<String> {
    index_page()
}

pub async fn another_handler() -> Html<String> {
    another_page()
}

pub async fn patient_form_handler() -> Html<String> {
    patient_page(None)
}

pub async fn prescription_form_handler() -> Html<String> {
    prescription_page(None, None)
}

pub async fn finddoctor_form_handler() -> Html<String> {
    finddoctor_page(None, None)
}

pub async fn findhospitalmed_form_handler() -> Html<String> {
    findhospitalmed_page(None, None)
}

pub async fn doctorfindmed_form_handler() -> Html<String> {
    doctorfindmed_page(None, None)
}

pub async fn doctorfindpatient_form_handler() -> Html<String> {
    doctorfindpatient_page(None, None)
}
