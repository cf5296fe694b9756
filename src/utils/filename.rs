//! Upload filename handling.

/// Reasons a filename cannot be used for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename is `..`.
    PathTraversal,
    /// Filename contains control characters (CR, LF, NUL, etc.).
    ControlCharacter,
    /// Filename starts with a dot.
    Hidden,
    /// Filename is longer than [`MAX_FILENAME_LEN`] bytes.
    TooLong,
}

/// Longest filename accepted for storage, in bytes.
pub const MAX_FILENAME_LEN: usize = 200;

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::Hidden => "Invalid filename: names starting with '.' are not allowed",
            Self::TooLong => "Invalid filename: name is too long",
        }
    }
}

/// Strips any client-side directory components, keeping the last segment.
///
/// Both `/` and `\` count as separators since browsers on Windows may send
/// full paths.
pub fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}

/// Validates a flat filename (no directory components allowed).
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    // Rejecting control characters also keeps CRLF out of Content-Disposition.
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    if trimmed.len() > MAX_FILENAME_LEN {
        return Err(FilenameError::TooLong);
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("cube.stl"), "cube.stl");
        assert_eq!(base_name("models/cube.stl"), "cube.stl");
        assert_eq!(base_name("C:\\Users\\me\\scene.obj"), "scene.obj");
        assert_eq!(base_name("dir/"), "");
    }

    #[test]
    fn validate_flat_filename_accepts_valid_names() {
        assert!(validate_flat_filename("cube.stl").is_ok());
        assert!(validate_flat_filename("My Scene (final).OBJ").is_ok());
        assert!(validate_flat_filename("tête.stl").is_ok());
        assert_eq!(validate_flat_filename("  padded.obj  "), Ok("padded.obj"));
    }

    #[test]
    fn validate_flat_filename_rejects_empty() {
        assert_eq!(validate_flat_filename(""), Err(FilenameError::Empty));
        assert_eq!(validate_flat_filename("   "), Err(FilenameError::Empty));
    }

    #[test]
    fn validate_flat_filename_rejects_path_separators() {
        assert_eq!(
            validate_flat_filename("a/cube.stl"),
            Err(FilenameError::ContainsPathSeparator)
        );
        assert_eq!(
            validate_flat_filename("a\\cube.stl"),
            Err(FilenameError::ContainsPathSeparator)
        );
    }

    #[test]
    fn validate_flat_filename_rejects_traversal_and_hidden() {
        assert_eq!(validate_flat_filename(".."), Err(FilenameError::PathTraversal));
        assert_eq!(validate_flat_filename(".stl"), Err(FilenameError::Hidden));
    }

    #[test]
    fn validate_flat_filename_rejects_control_characters() {
        assert_eq!(
            validate_flat_filename("cube\r\n.stl"),
            Err(FilenameError::ControlCharacter)
        );
        assert_eq!(
            validate_flat_filename("cube\0.stl"),
            Err(FilenameError::ControlCharacter)
        );
    }

    #[test]
    fn validate_flat_filename_rejects_too_long() {
        let name = format!("{}.stl", "a".repeat(MAX_FILENAME_LEN));
        assert_eq!(validate_flat_filename(&name), Err(FilenameError::TooLong));
    }
}
