//! Error types for the parts of the crate that can genuinely fail.
//! Menu retrieval never returns these: its failures are page content and
//! live in `fetch::FetchOutcome`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid menu API base address '{value}'")]
    InvalidBase {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("menu API base address '{0}' cannot carry a path")]
    OpaqueBase(String),
}

#[derive(Debug, Error)]
pub enum MenuFileError {
    #[error("failed to read menu file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse menu file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("menu file {path} is inconsistent: {problem}")]
    Invalid { path: PathBuf, problem: MenuProblem },
}

/// Structural problems in an otherwise well-formed menu document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuProblem {
    #[error("category id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("category id 'all' is reserved for the show-everything filter")]
    ReservedId,

    #[error("category id is empty")]
    EmptyId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_problem_display() {
        assert_eq!(
            MenuProblem::DuplicateId("mains".into()).to_string(),
            "category id 'mains' appears more than once"
        );
        assert!(MenuProblem::ReservedId.to_string().contains("reserved"));
    }
}
