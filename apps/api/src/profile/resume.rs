//! Simulated resume upload. The file is validated and given a storage key, but
//! its bytes are dropped; only the key is recorded on the profile.

use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Checks size and type, returning the key the resume would be stored under.
pub fn accept_resume(
    user_id: &str,
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("resume file is empty".to_string()));
    }
    if data.len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(format!(
            "resume is {} bytes; the limit is 5 MB",
            data.len()
        )));
    }

    let type_ok = match content_type {
        Some(ct) if ct != "application/octet-stream" => ACCEPTED_CONTENT_TYPES.contains(&ct),
        // Browsers sometimes omit the type; fall back to the extension.
        _ => extension(file_name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str())),
    };
    if !type_ok {
        return Err(AppError::Validation(
            "resume must be a PDF or Word document".to_string(),
        ));
    }

    Ok(format!(
        "resumes/{user_id}/{}-{}",
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    ))
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Keeps ASCII alphanumerics, dots, dashes and underscores; everything else
/// becomes '-'. Path separators never survive.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.trim_matches(['.', '-']).is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}
