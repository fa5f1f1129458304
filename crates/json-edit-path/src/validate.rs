//! Validation functions for paths.

use crate::types::PathStep;
use crate::PathError;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validate a path.
///
/// # Errors
///
/// Returns [`PathError::PathTooLong`] if the path exceeds 256 steps.
///
/// # Example
///
/// ```
/// use json_edit_path::{validate_path, PathStep};
///
/// validate_path(&[PathStep::from("foo"), PathStep::Index(0)]).unwrap();
/// validate_path(&(0..300usize).map(PathStep::from).collect::<Vec<_>>()).unwrap_err();
/// ```
pub fn validate_path(path: &[PathStep]) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(())
}
