//! Error types for glissade.

use std::io;

/// Errors produced by glissade.
///
/// Only [`GlissadeError::MissingElement`] is raised by the engine itself;
/// everything else the engine meets at runtime (missing attributes, unknown
/// anchors, degenerate geometry) is absorbed with a default and a warning.
#[derive(Debug, thiserror::Error)]
pub enum GlissadeError {
    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GlissadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_display() {
        let e = GlissadeError::MissingElement(".smooth-scroll-content".into());
        assert_eq!(
            format!("{e}"),
            "missing required element: .smooth-scroll-content"
        );
    }

    #[test]
    fn config_error_display() {
        let e = GlissadeError::Config("waypointPercShow out of range".into());
        assert_eq!(format!("{e}"), "config error: waypointPercShow out of range");
    }

    #[test]
    fn scenario_error_display() {
        let e = GlissadeError::Scenario("unknown parent 9".into());
        assert_eq!(format!("{e}"), "scenario error: unknown parent 9");
    }

    #[test]
    fn backend_error_display() {
        let e = GlissadeError::Backend("detached".into());
        assert_eq!(format!("{e}"), "backend error: detached");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: GlissadeError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: GlissadeError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: GlissadeError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(GlissadeError::Config("oops".into()));
        assert!(r.is_err());
    }
}
