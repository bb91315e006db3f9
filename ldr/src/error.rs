use anyhow::Error;
use lightdash::prelude::{LightdashError, StorageError};

/// Process exit code: 2 for authentication and configuration problems, 1 otherwise.
pub fn exit_code(err: &Error) -> i32 {
    if matches!(
        err.downcast_ref::<LightdashError>(),
        Some(
            LightdashError::Auth { .. }
                | LightdashError::Remote {
                    status: 401 | 403,
                    ..
                }
                | LightdashError::Storage {
                    source: StorageError::Config { .. }
                }
        )
    ) {
        return 2;
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_exit_2() {
        let err = Error::new(LightdashError::Auth {
            message: "no key".into(),
        });
        assert_eq!(exit_code(&err), 2);

        let err = Error::new(LightdashError::Remote {
            status: 401,
            status_text: "Unauthorized".into(),
            url: "u".into(),
            message: String::new(),
        });
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_other_errors_exit_1() {
        let err = Error::new(LightdashError::Remote {
            status: 500,
            status_text: "Internal Server Error".into(),
            url: "u".into(),
            message: String::new(),
        });
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("plain")), 1);
    }
}
