//! Terminal size from the environment

use thiserror::Error;

/// Variable holding the terminal height in rows
pub const ROWS_VAR: &str = "ROWS";
/// Variable holding the terminal width in columns
pub const COLUMNS_VAR: &str = "COLUMNS";

/// Size available for a screen, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: usize,
    pub rows: usize,
}

/// Terminal size lookup error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is not a number: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("terminal is too small: {cols}x{rows}")]
    TooSmall { cols: usize, rows: usize },
}

impl TerminalSize {
    /// Read `ROWS` and `COLUMNS`, keeping the last row free for the prompt
    pub fn from_env() -> Result<Self, SizeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`TerminalSize::from_env`], using `fallback` when the variables
    /// are missing or unusable
    pub fn from_env_or(fallback: Option<TerminalSize>) -> Result<Self, SizeError> {
        Self::from_lookup_or(|name| std::env::var(name).ok(), fallback)
    }

    /// Same as [`TerminalSize::from_env_or`] with a custom variable source
    pub fn from_lookup_or(
        lookup: impl Fn(&str) -> Option<String>,
        fallback: Option<TerminalSize>,
    ) -> Result<Self, SizeError> {
        match (Self::from_lookup(lookup), fallback) {
            (Ok(size), _) => Ok(size),
            (Err(e), Some(size)) => {
                tracing::debug!("using configured size {}x{}: {}", size.cols, size.rows, e);
                Ok(size)
            },
            (Err(e), None) => Err(e),
        }
    }

    /// Same as [`TerminalSize::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SizeError> {
        let rows = read_var(&lookup, ROWS_VAR)?;
        let cols = read_var(&lookup, COLUMNS_VAR)?;
        let rows = rows.saturating_sub(1);
        if rows == 0 || cols == 0 {
            return Err(SizeError::TooSmall { cols, rows });
        }
        Ok(Self { cols, rows })
    }
}

fn read_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<usize, SizeError> {
    let value = lookup(name).ok_or(SizeError::Missing(name))?;
    value.trim().parse().map_err(|_| SizeError::Invalid {
        name,
        value: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(rows: Option<&str>, cols: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let rows = rows.map(str::to_string);
        let cols = cols.map(str::to_string);
        move |name: &str| match name {
            ROWS_VAR => rows.clone(),
            COLUMNS_VAR => cols.clone(),
            _ => None,
        }
    }

    #[test]
    fn test_reserves_one_row() {
        let size = TerminalSize::from_lookup(vars(Some("24"), Some("80"))).unwrap();
        assert_eq!(size, TerminalSize { cols: 80, rows: 23 });
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(
            TerminalSize::from_lookup(vars(None, Some("80"))),
            Err(SizeError::Missing(ROWS_VAR))
        );
        assert_eq!(
            TerminalSize::from_lookup(vars(Some("24"), None)),
            Err(SizeError::Missing(COLUMNS_VAR))
        );
    }

    #[test]
    fn test_non_numeric_variable() {
        assert_eq!(
            TerminalSize::from_lookup(vars(Some("tall"), Some("80"))),
            Err(SizeError::Invalid {
                name: ROWS_VAR,
                value: "tall".to_string()
            })
        );
    }

    #[test]
    fn test_fallback_when_unset() {
        let fallback = Some(TerminalSize { cols: 40, rows: 12 });
        assert_eq!(
            TerminalSize::from_lookup_or(vars(None, None), fallback),
            Ok(TerminalSize { cols: 40, rows: 12 })
        );
        assert_eq!(
            TerminalSize::from_lookup_or(vars(Some("tall"), Some("80")), fallback),
            Ok(TerminalSize { cols: 40, rows: 12 })
        );
    }

    #[test]
    fn test_environment_wins_over_fallback() {
        let fallback = Some(TerminalSize { cols: 40, rows: 12 });
        assert_eq!(
            TerminalSize::from_lookup_or(vars(Some("24"), Some("80")), fallback),
            Ok(TerminalSize { cols: 80, rows: 23 })
        );
    }

    #[test]
    fn test_no_fallback_keeps_error() {
        assert_eq!(
            TerminalSize::from_lookup_or(vars(None, Some("80")), None),
            Err(SizeError::Missing(ROWS_VAR))
        );
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            TerminalSize::from_lookup(vars(Some("1"), Some("80"))),
            Err(SizeError::TooSmall { cols: 80, rows: 0 })
        );
    }
}
