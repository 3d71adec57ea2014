//! Export file naming.

/// Used when a student name has no ASCII letters or digits at all.
const FALLBACK_NAME: &str = "estudiante";

/// Lower-case the name and keep only `[a-z0-9]`.
pub fn sanitize_student_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// File name for an exported report, e.g. `reporte_anagarcia_conectores.pdf`.
pub fn export_file_name(student_name: &str, extension: &str) -> String {
    let sanitized = sanitize_student_name(student_name);
    let name = if sanitized.is_empty() {
        FALLBACK_NAME
    } else {
        &sanitized
    };
    format!("reporte_{name}_conectores.{extension}")
}
