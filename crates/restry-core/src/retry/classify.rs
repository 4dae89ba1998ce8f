//! Classify HTTP status codes for the ServiceStack response convention.

/// Coarse class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx.
    Success,
    /// 401: the session is missing or expired.
    Unauthenticated,
    /// Server error that may go away on retry (500, 503).
    Transient,
    /// Any other status (typically surfaced to the caller).
    Other,
}

/// Classify an HTTP status code.
///
/// Only 500 and 503 are transient; 502/504 and friends are reported as
/// ordinary errors.
pub fn classify_http_status(code: u16) -> StatusClass {
    match code {
        200..=299 => StatusClass::Success,
        401 => StatusClass::Unauthenticated,
        500 | 503 => StatusClass::Transient,
        _ => StatusClass::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_2xx_success() {
        assert_eq!(classify_http_status(200), StatusClass::Success);
        assert_eq!(classify_http_status(204), StatusClass::Success);
        assert_eq!(classify_http_status(299), StatusClass::Success);
    }

    #[test]
    fn http_500_and_503_transient() {
        assert_eq!(classify_http_status(500), StatusClass::Transient);
        assert_eq!(classify_http_status(503), StatusClass::Transient);
    }

    #[test]
    fn other_5xx_not_transient() {
        assert_eq!(classify_http_status(502), StatusClass::Other);
        assert_eq!(classify_http_status(504), StatusClass::Other);
    }

    #[test]
    fn http_401_unauthenticated_and_4xx_other() {
        assert_eq!(classify_http_status(401), StatusClass::Unauthenticated);
        assert_eq!(classify_http_status(403), StatusClass::Other);
        assert_eq!(classify_http_status(400), StatusClass::Other);
        assert_eq!(classify_http_status(300), StatusClass::Other);
    }
}
