//! Host-side errors
//!
//! The simulation itself never fails; everything here comes from the
//! terminal host and its configuration.

/// Errors raised while starting or running the terminal host
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = HostError::TerminalTooSmall {
            cols: 40,
            rows: 10,
            min_cols: 60,
            min_rows: 20,
        };
        assert_eq!(err.to_string(), "terminal is 40x10, need at least 60x20");

        let err = HostError::InvalidSettings("target_fps must be positive".into());
        assert!(err.to_string().contains("target_fps"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("nope");
        let err: HostError = parse.unwrap_err().into();
        assert!(matches!(err, HostError::Settings(_)));
    }
}
