use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Status {
    pub ok: bool,
    pub code: Option<i32>,
    pub reason: Option<String>,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            ok: true,
            code: Some(0),
            reason: None,
        }
    }

    pub fn err(code: i32, reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            code: Some(code),
            reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.ok
    }

    /// Process exit code for this status.
    ///
    /// With `legacy_exit` set a failed run still exits 0, which is how the
    /// tool historically behaved. Scripts cannot detect failures in that mode.
    pub fn exit_code(&self, legacy_exit: bool) -> i32 {
        if self.ok || legacy_exit {
            0
        } else {
            self.code.filter(|c| *c != 0).unwrap_or(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status_exits_zero() {
        let status = Status::ok();
        assert!(status.is_success());
        assert_eq!(status.exit_code(false), 0);
        assert_eq!(status.exit_code(true), 0);
    }

    #[test]
    fn test_failed_status_propagates_code() {
        let status = Status::err(3, "mongorestore exited with status 3");
        assert!(!status.is_success());
        assert_eq!(status.exit_code(false), 3);
    }

    #[test]
    fn test_legacy_exit_masks_failure() {
        let status = Status::err(127, "mongodump not found");
        assert_eq!(status.exit_code(true), 0);
    }

    #[test]
    fn test_failed_status_never_exits_zero() {
        let status = Status {
            ok: false,
            code: Some(0),
            reason: Some("killed by signal".to_string()),
        };
        assert_eq!(status.exit_code(false), 1);

        let status = Status {
            ok: false,
            code: None,
            reason: None,
        };
        assert_eq!(status.exit_code(false), 1);
    }
}
