//! Accepted 3D model file formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File format of an uploaded model, decided from the filename extension only.
///
/// The file content is never inspected, so a renamed or corrupted file keeps
/// whatever format its name claimed at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Stl,
    Obj,
}

/// Returned when a string is not one of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported file format: {0:?}")]
pub struct UnsupportedFormat(pub String);

impl FileFormat {
    /// All accepted formats.
    pub const ALL: [FileFormat; 2] = [FileFormat::Stl, FileFormat::Obj];

    /// Lowercase name as stored in the database and returned over HTTP.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Stl => "stl",
            FileFormat::Obj => "obj",
        }
    }

    /// Derives the format from a filename's extension.
    ///
    /// The extension is the substring after the last `.`, compared
    /// case-insensitively. Names without a `.` have no extension.
    pub fn from_filename(filename: &str) -> Result<Self, UnsupportedFormat> {
        let (_, extension) = filename
            .rsplit_once('.')
            .ok_or_else(|| UnsupportedFormat(String::new()))?;
        extension.parse()
    }

    /// MIME type used when serving the file back.
    pub fn content_type(&self) -> &'static str {
        match self {
            FileFormat::Stl => "model/stl",
            FileFormat::Obj => "model/obj",
        }
    }
}

impl FromStr for FileFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(FileFormat::Stl),
            "obj" => Ok(FileFormat::Obj),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_accepts_known_extensions() {
        assert_eq!(FileFormat::from_filename("cube.stl"), Ok(FileFormat::Stl));
        assert_eq!(FileFormat::from_filename("scene.obj"), Ok(FileFormat::Obj));
    }

    #[test]
    fn test_from_filename_is_case_insensitive() {
        assert_eq!(FileFormat::from_filename("cube.STL"), Ok(FileFormat::Stl));
        assert_eq!(FileFormat::from_filename("Scene.Obj"), Ok(FileFormat::Obj));
    }

    #[test]
    fn test_from_filename_uses_last_extension() {
        assert_eq!(
            FileFormat::from_filename("archive.obj.stl"),
            Ok(FileFormat::Stl)
        );
        assert!(FileFormat::from_filename("model.stl.zip").is_err());
    }

    #[test]
    fn test_from_filename_rejects_other_extensions() {
        assert!(FileFormat::from_filename("readme.txt").is_err());
        assert!(FileFormat::from_filename("image.png").is_err());
        assert!(FileFormat::from_filename("trailing.").is_err());
    }

    #[test]
    fn test_from_filename_without_extension() {
        assert!(FileFormat::from_filename("cube").is_err());
        assert!(FileFormat::from_filename("stl").is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&FileFormat::Stl).unwrap(), "\"stl\"");
        let parsed: FileFormat = serde_json::from_str("\"obj\"").unwrap();
        assert_eq!(parsed, FileFormat::Obj);
    }

    #[test]
    fn test_display_matches_as_str() {
        for format in FileFormat::ALL {
            assert_eq!(format.to_string(), format.as_str());
        }
    }
}
