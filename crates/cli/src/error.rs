//! Failures surfaced by the `lowpoly` binary.
//!
//! Every variant maps to its own process exit code so scripts can tell a bad
//! palette from a full disk without parsing stderr:
//!
//! | code | kind            | typical cause                                   |
//! |------|-----------------|-------------------------------------------------|
//! | 2    | (clap)          | unknown flag, unparsable number or color        |
//! | 10   | `pattern`       | zero-sized canvas, NaN displacement, huge count |
//! | 11   | `io`            | unreadable recipe, unwritable PNG               |
//! | 12   | `input`         | unknown palette, bad hex color, broken recipe   |
//! | 13   | `serialization` | JSON encoding failure                           |

use lowpoly_core::PatternError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Parameters the generator refused.
    Pattern(PatternError),
    /// Filesystem failure, already formatted with the offending path.
    Io(String),
    /// Something the user typed or wrote in a recipe.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pattern(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Short machine-readable label, reported alongside the message in
    /// `--json` mode.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Pattern(_) => "pattern",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Pattern(e) => e.fmt(f),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl From<PatternError> for CliError {
    fn from(e: PatternError) -> Self {
        match e {
            PatternError::Io(msg) => CliError::Io(msg),
            PatternError::InvalidColor(_)
            | PatternError::UnknownPalette(_)
            | PatternError::EmptyPalette => CliError::Input(e.to_string()),
            PatternError::InvalidDimensions { .. }
            | PatternError::InvalidParameter { .. }
            | PatternError::CountTooLarge(_) => CliError::Pattern(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(format!("JSON encoding failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_has_distinct_code_and_kind() {
        let cases = [
            (CliError::Pattern(PatternError::CountTooLarge(usize::MAX)), 10, "pattern"),
            (CliError::Io("png write failed".into()), 11, "io"),
            (CliError::Input("no such palette".into()), 12, "input"),
            (CliError::Serialization("bad float".into()), 13, "serialization"),
        ];
        for (err, code, kind) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn pattern_io_failure_becomes_cli_io() {
        let err = CliError::from(PatternError::Io("/tmp/x.png: permission denied".into()));
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn palette_problems_are_user_input() {
        for e in [
            PatternError::UnknownPalette("sunset".into()),
            PatternError::InvalidColor("#12".into()),
            PatternError::EmptyPalette,
        ] {
            assert_eq!(CliError::from(e).exit_code(), 12);
        }
    }

    #[test]
    fn generator_rejections_keep_their_message() {
        let err = CliError::from(PatternError::InvalidDimensions {
            width: 0.0,
            height: 10.0,
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("width"), "{err}");
    }

    #[test]
    fn json_failure_is_serialization() {
        let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err = CliError::from(source);
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().starts_with("JSON encoding failed"));
    }
}
