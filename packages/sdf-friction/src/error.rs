//! Error types for the friction patcher.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the friction patcher library.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Input is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Root element of the document is not `<sdf>`.
    #[error("Root element is not <sdf> (found <{found}>)")]
    InvalidRoot { found: String },

    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML writer rejected an event.
    #[error("XML serialization failed: {0}")]
    Serialize(String),

    /// A friction profile file could not be parsed.
    #[error("Invalid friction profile {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A friction coefficient is negative or not a finite number.
    #[error("Invalid friction coefficient {value} for link '{link}'. Expected a finite value >= 0")]
    InvalidCoefficient { link: String, value: f64 },

    /// A friction profile entry has an empty link name.
    #[error("Friction profile contains an entry without a link name")]
    EmptyLinkName,

    /// A friction profile names the same link more than once.
    #[error("Link '{0}' appears more than once in the friction profile")]
    DuplicateLink(String),
}

impl PatchError {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for patcher operations.
pub type Result<T> = std::result::Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_display() {
        let err = PatchError::InvalidRoot {
            found: "robot".to_string(),
        };
        assert!(err.to_string().starts_with("Root element is not <sdf>"));
        assert!(err.to_string().contains("<robot>"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = PatchError::io(
            "/tmp/missing.sdf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/tmp/missing.sdf"));
    }

    #[test]
    fn test_duplicate_link_display() {
        let err = PatchError::DuplicateLink("caster_wheel_link".to_string());
        assert_eq!(
            err.to_string(),
            "Link 'caster_wheel_link' appears more than once in the friction profile"
        );
    }
}
