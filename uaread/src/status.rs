/// raw values from the OPC UA status code table (Part 6 CSV)
mod codes {
    pub(super) const GOOD: u32 = 0x0000_0000;
    pub(super) const BAD_UNEXPECTED_ERROR: u32 = 0x8001_0000;
    pub(super) const BAD_INTERNAL_ERROR: u32 = 0x8002_0000;
    pub(super) const BAD_COMMUNICATION_ERROR: u32 = 0x8005_0000;
    pub(super) const BAD_TIMEOUT: u32 = 0x800A_0000;
    pub(super) const BAD_SECURE_CHANNEL_ID_INVALID: u32 = 0x8022_0000;
    pub(super) const BAD_SESSION_ID_INVALID: u32 = 0x8025_0000;
    pub(super) const BAD_SESSION_CLOSED: u32 = 0x8026_0000;
    pub(super) const BAD_SESSION_NOT_ACTIVATED: u32 = 0x8027_0000;
    pub(super) const BAD_NODE_ID_INVALID: u32 = 0x8033_0000;
    pub(super) const BAD_NODE_ID_UNKNOWN: u32 = 0x8034_0000;
    pub(super) const BAD_ATTRIBUTE_ID_INVALID: u32 = 0x8035_0000;
}

/// Subset of the OPC UA status codes that this client interprets
///
/// Codes outside the subset are preserved verbatim in [`StatusCode::Unknown`]
/// so that nothing is lost when an error is surfaced to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCode {
    /// The operation succeeded
    Good,
    /// An unexpected error occurred
    BadUnexpectedError,
    /// An internal error occurred as a result of a programming or configuration error
    BadInternalError,
    /// A low level communication error occurred
    BadCommunicationError,
    /// The operation timed out
    BadTimeout,
    /// The specified secure channel is no longer valid
    BadSecureChannelIdInvalid,
    /// The session id is not valid
    BadSessionIdInvalid,
    /// The session was closed by the client
    BadSessionClosed,
    /// The session cannot be used because ActivateSession has not been called
    BadSessionNotActivated,
    /// The syntax of the node id is not valid
    BadNodeIdInvalid,
    /// The node id refers to a node that does not exist in the server address space
    BadNodeIdUnknown,
    /// The attribute is not supported for the specified node
    BadAttributeIdInvalid,
    /// A status code outside the interpreted subset
    Unknown(u32),
}

impl From<u32> for StatusCode {
    fn from(value: u32) -> Self {
        match value {
            codes::GOOD => StatusCode::Good,
            codes::BAD_UNEXPECTED_ERROR => StatusCode::BadUnexpectedError,
            codes::BAD_INTERNAL_ERROR => StatusCode::BadInternalError,
            codes::BAD_COMMUNICATION_ERROR => StatusCode::BadCommunicationError,
            codes::BAD_TIMEOUT => StatusCode::BadTimeout,
            codes::BAD_SECURE_CHANNEL_ID_INVALID => StatusCode::BadSecureChannelIdInvalid,
            codes::BAD_SESSION_ID_INVALID => StatusCode::BadSessionIdInvalid,
            codes::BAD_SESSION_CLOSED => StatusCode::BadSessionClosed,
            codes::BAD_SESSION_NOT_ACTIVATED => StatusCode::BadSessionNotActivated,
            codes::BAD_NODE_ID_INVALID => StatusCode::BadNodeIdInvalid,
            codes::BAD_NODE_ID_UNKNOWN => StatusCode::BadNodeIdUnknown,
            codes::BAD_ATTRIBUTE_ID_INVALID => StatusCode::BadAttributeIdInvalid,
            _ => StatusCode::Unknown(value),
        }
    }
}

impl From<StatusCode> for u32 {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Good => codes::GOOD,
            StatusCode::BadUnexpectedError => codes::BAD_UNEXPECTED_ERROR,
            StatusCode::BadInternalError => codes::BAD_INTERNAL_ERROR,
            StatusCode::BadCommunicationError => codes::BAD_COMMUNICATION_ERROR,
            StatusCode::BadTimeout => codes::BAD_TIMEOUT,
            StatusCode::BadSecureChannelIdInvalid => codes::BAD_SECURE_CHANNEL_ID_INVALID,
            StatusCode::BadSessionIdInvalid => codes::BAD_SESSION_ID_INVALID,
            StatusCode::BadSessionClosed => codes::BAD_SESSION_CLOSED,
            StatusCode::BadSessionNotActivated => codes::BAD_SESSION_NOT_ACTIVATED,
            StatusCode::BadNodeIdInvalid => codes::BAD_NODE_ID_INVALID,
            StatusCode::BadNodeIdUnknown => codes::BAD_NODE_ID_UNKNOWN,
            StatusCode::BadAttributeIdInvalid => codes::BAD_ATTRIBUTE_ID_INVALID,
            StatusCode::Unknown(value) => value,
        }
    }
}

impl StatusCode {
    /// Returns true if the status reports success
    pub fn is_good(self) -> bool {
        self == StatusCode::Good
    }

    /// Returns true if the status indicates that the session or secure
    /// channel was invalidated and will be re-established by the transport
    /// stack on the next call
    pub fn is_session_recoverable(self) -> bool {
        matches!(
            self,
            StatusCode::BadSecureChannelIdInvalid
                | StatusCode::BadSessionIdInvalid
                | StatusCode::BadSessionNotActivated
        )
    }
}

impl std::error::Error for StatusCode {}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StatusCode::Good => f.write_str("Good"),
            StatusCode::BadUnexpectedError => f.write_str("BadUnexpectedError"),
            StatusCode::BadInternalError => f.write_str("BadInternalError"),
            StatusCode::BadCommunicationError => f.write_str("BadCommunicationError"),
            StatusCode::BadTimeout => f.write_str("BadTimeout"),
            StatusCode::BadSecureChannelIdInvalid => f.write_str("BadSecureChannelIdInvalid"),
            StatusCode::BadSessionIdInvalid => f.write_str("BadSessionIdInvalid"),
            StatusCode::BadSessionClosed => f.write_str("BadSessionClosed"),
            StatusCode::BadSessionNotActivated => f.write_str("BadSessionNotActivated"),
            StatusCode::BadNodeIdInvalid => f.write_str("BadNodeIdInvalid"),
            StatusCode::BadNodeIdUnknown => f.write_str("BadNodeIdUnknown"),
            StatusCode::BadAttributeIdInvalid => f.write_str("BadAttributeIdInvalid"),
            StatusCode::Unknown(code) => write!(f, "unknown status code: 0x{code:08X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_known_codes_in_both_directions() {
        let codes = [
            (0x0000_0000, StatusCode::Good),
            (0x8022_0000, StatusCode::BadSecureChannelIdInvalid),
            (0x8025_0000, StatusCode::BadSessionIdInvalid),
            (0x8027_0000, StatusCode::BadSessionNotActivated),
            (0x8034_0000, StatusCode::BadNodeIdUnknown),
        ];

        for (raw, status) in codes {
            assert_eq!(StatusCode::from(raw), status);
            assert_eq!(u32::from(status), raw);
        }
    }

    #[test]
    fn preserves_unknown_codes() {
        let status = StatusCode::from(0x8099_0000);
        assert_eq!(status, StatusCode::Unknown(0x8099_0000));
        assert_eq!(u32::from(status), 0x8099_0000);
    }

    #[test]
    fn recoverable_set_is_exactly_the_session_and_channel_codes() {
        assert!(StatusCode::BadSecureChannelIdInvalid.is_session_recoverable());
        assert!(StatusCode::BadSessionIdInvalid.is_session_recoverable());
        assert!(StatusCode::BadSessionNotActivated.is_session_recoverable());

        assert!(!StatusCode::Good.is_session_recoverable());
        assert!(!StatusCode::BadSessionClosed.is_session_recoverable());
        assert!(!StatusCode::BadNodeIdUnknown.is_session_recoverable());
        assert!(!StatusCode::BadTimeout.is_session_recoverable());
        assert!(!StatusCode::Unknown(0x8099_0000).is_session_recoverable());
    }
}
