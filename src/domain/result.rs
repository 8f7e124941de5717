//! Result type alias for AutoVtex

use super::errors::AutoVtexError;

/// Result type alias for AutoVtex operations
///
/// # Examples
///
/// ```
/// use autovtex::domain::result::Result;
/// use autovtex::domain::errors::AutoVtexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AutoVtexError::Model("unknown sequence".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AutoVtexError>;
