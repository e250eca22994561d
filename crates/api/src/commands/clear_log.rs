//! Diagnostic log cleanup

use academy_enrol_domain::Result;

use crate::context::AppContext;

/// Delete the diagnostic log. Returns whether a file was removed.
///
/// # Errors
/// Returns `AcademyError::Io` when the file exists but cannot be removed.
pub fn clear_log(context: &AppContext) -> Result<bool> {
    let removed = context.log.clear()?;
    tracing::info!(path = %context.log.path().display(), removed, "diagnostic log cleared");
    Ok(removed)
}
