//! Endpoint authorization

use core::fmt;

use base64::engine::general_purpose;
use base64::Engine as _;

/// Authorization attached to a request
///
/// The [`Display`](fmt::Display) form is the exact value of the
/// `Authorization` header. `Debug` never shows credentials, and the type is
/// not serializable:
///
/// ```compile_fail
/// fn assert_serialize<T: serde::Serialize>() {}
/// assert_serialize::<endpoint_builder::Authorization>();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Bearer token, sent as `Bearer <token>`
    Bearer(String),
    /// Basic credentials, sent as `Basic <base64(username:password)>`
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Header value sent verbatim
    Raw(String),
}

impl Authorization {
    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(token) => write!(f, "Bearer {token}"),
            Self::Basic { username, password } => {
                let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
                write!(f, "Basic {encoded}")
            }
            Self::Raw(value) => f.write_str(value),
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Authorization::Bearer(..)"),
            Self::Basic { username, .. } => f
                .debug_struct("Authorization::Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Raw(_) => f.write_str("Authorization::Raw(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_value() {
        let auth = Authorization::Bearer("abc.def".to_string());
        assert_eq!(auth.header_value(), "Bearer abc.def");
    }

    #[test]
    fn test_basic_header_value() {
        let auth = Authorization::Basic {
            username: "Aladdin".to_string(),
            password: "open sesame".to_string(),
        };
        assert_eq!(auth.header_value(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn test_raw_header_value() {
        let auth = Authorization::Raw("Token xyz".to_string());
        assert_eq!(auth.to_string(), "Token xyz");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let auth = Authorization::Basic {
            username: "user".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", auth);
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));

        let bearer = format!("{:?}", Authorization::Bearer("secret".to_string()));
        assert!(!bearer.contains("secret"));
    }
}
