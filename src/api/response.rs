//! Response classification and payload decoding.
//!
//! Every way the fetch can fail is normalized here, at the data-source
//! boundary, into the three-variant [`FetchError`] taxonomy. The UI renders
//! the error's display form with a retry affordance; nothing past this
//! module inspects raw statuses or payload bytes.

use thiserror::Error;

use crate::domain::User;

/// Classified failure of a user-directory fetch.
///
/// `Clone`/`PartialEq` because the failure is application state: the page
/// phase carries it until the user retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connection,
    /// timeout). The host reports these with a zero status; the body then
    /// holds the transport error text.
    #[error("Unable to connect. Please check your connection.")]
    Transport {
        /// Host-provided description of the transport failure.
        detail: String,
    },

    /// The server answered with a non-success status.
    #[error("Server responded with HTTP {status}.")]
    Status {
        /// The non-2xx HTTP status code.
        status: u16,
    },

    /// The response body was not a decodable user collection.
    #[error("Received an unreadable response: {detail}")]
    Decode {
        /// Description of the decode failure.
        detail: String,
    },
}

/// Classifies a host response and decodes the user collection.
///
/// # Errors
///
/// - [`FetchError::Transport`] when `status` is 0 (no HTTP exchange happened)
/// - [`FetchError::Status`] for any non-2xx status
/// - [`FetchError::Decode`] when the body is not a JSON array of users
pub fn parse_users(status: u16, body: &[u8]) -> Result<Vec<User>, FetchError> {
    if status == 0 {
        return Err(FetchError::Transport {
            detail: String::from_utf8_lossy(body).into_owned(),
        });
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status });
    }

    serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_PAYLOAD: &str = r#"[
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }
    ]"#;

    #[test]
    fn decodes_a_successful_response() {
        let users = parse_users(200, VALID_PAYLOAD.as_bytes()).expect("decodable");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Leanne Graham");
    }

    #[test]
    fn empty_array_is_a_valid_collection() {
        let users = parse_users(200, b"[]").expect("decodable");
        assert!(users.is_empty());
    }

    #[test]
    fn zero_status_classifies_as_transport_failure() {
        let err = parse_users(0, b"connection refused").unwrap_err();

        assert_eq!(
            err,
            FetchError::Transport {
                detail: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn non_success_status_classifies_as_status_failure() {
        let err = parse_users(500, b"internal server error").unwrap_err();

        assert_eq!(err, FetchError::Status { status: 500 });
        assert_eq!(err.to_string(), "Server responded with HTTP 500.");
    }

    #[test]
    fn garbage_body_classifies_as_decode_failure() {
        let err = parse_users(200, b"<html>not json</html>").unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn non_array_json_classifies_as_decode_failure() {
        let err = parse_users(200, br#"{"users": []}"#).unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
