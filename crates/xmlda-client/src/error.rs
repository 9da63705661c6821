// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC XML-DA client error types.
//!
//! Every failure the client surfaces falls into one of five categories:
//!
//! ```text
//! XmlDaError
//! ├── Configuration - Invalid or missing construction parameters
//! ├── Transport     - Connection, timeout and HTTP status failures
//! ├── Fault         - SOAP Fault returned by the server
//! ├── Encoding      - Request could not be serialized
//! └── Decoding      - Reply envelope did not match the expected response
//! ```
//!
//! Per-item errors reported by the server inside a well-formed reply
//! (`Errors` lists, `ResultID` attributes) are not errors at this level; they
//! are part of the returned response.
//!
//! # Examples
//!
//! ```
//! use xmlda_client::error::{ConfigurationError, ErrorSeverity, XmlDaError};
//!
//! let error = XmlDaError::configuration(ConfigurationError::missing_field("server_url"));
//!
//! assert_eq!(error.category(), "configuration");
//! assert_eq!(error.severity(), ErrorSeverity::Critical);
//! assert_eq!(error.error_code().to_string(), "XD-0101");
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

// =============================================================================
// XmlDaError - Main Error Type
// =============================================================================

/// The main error type for OPC XML-DA client operations.
#[derive(Debug, Error)]
pub enum XmlDaError {
    /// Configuration errors, raised before any network activity.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// Transport-level failures.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// SOAP Fault returned by the server.
    #[error("{0}")]
    Fault(#[from] SoapFault),

    /// Request serialization failures.
    #[error("{0}")]
    Encoding(#[from] EncodingError),

    /// Reply deserialization failures.
    #[error("{0}")]
    Decoding(#[from] DecodingError),
}

impl XmlDaError {
    // =========================================================================
    // Factory Methods
    // =========================================================================

    /// Creates a configuration error.
    #[inline]
    pub fn configuration(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(error: TransportError) -> Self {
        Self::Transport(error)
    }

    /// Creates a fault error.
    #[inline]
    pub fn fault(fault: SoapFault) -> Self {
        Self::Fault(fault)
    }

    /// Creates an encoding error.
    #[inline]
    pub fn encoding(error: EncodingError) -> Self {
        Self::Encoding(error)
    }

    /// Creates a decoding error.
    #[inline]
    pub fn decoding(error: DecodingError) -> Self {
        Self::Decoding(error)
    }

    /// Creates a missing server URL error.
    pub fn missing_server_url() -> Self {
        Self::Configuration(ConfigurationError::missing_field("server_url"))
    }

    // =========================================================================
    // Error Properties
    // =========================================================================

    /// Returns `true` if this is a configuration error.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if this is a transport error.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the server answered with a SOAP Fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Returns `true` if the reply could not be decoded.
    #[inline]
    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_))
    }

    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration(_) => ErrorSeverity::Critical,
            Self::Transport(e) => e.severity(),
            Self::Fault(_) => ErrorSeverity::Error,
            Self::Encoding(_) => ErrorSeverity::Error,
            Self::Decoding(_) => ErrorSeverity::Error,
        }
    }

    /// Returns the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Transport(_) => "transport",
            Self::Fault(_) => "fault",
            Self::Encoding(_) => "encoding",
            Self::Decoding(_) => "decoding",
        }
    }

    /// Returns a structured error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Configuration(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
            Self::Fault(_) => ErrorCode::new(3, 1),
            Self::Encoding(e) => e.error_code(),
            Self::Decoding(e) => e.error_code(),
        }
    }

    /// Returns recovery hints for this error.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::Configuration(e) => e.recovery_hints(),
            Self::Transport(e) => e.recovery_hints(),
            Self::Fault(_) => vec![
                "Inspect the fault reason returned by the server",
                "Check the item names and paths in the request",
            ],
            Self::Encoding(_) => vec!["Check the request values for characters XML cannot carry"],
            Self::Decoding(_) => vec![
                "Verify the server URL points at an OPC XML-DA endpoint",
                "Capture the raw reply with RUST_LOG=xmlda_client=trace",
            ],
        }
    }

    /// Returns the tracing level for this error.
    pub fn tracing_level(&self) -> Level {
        self.severity().to_tracing_level()
    }

    /// Logs this error with appropriate level and context.
    ///
    /// The client never logs the errors it returns; this is for callers.
    pub fn log(&self, context: &str) {
        let code = self.error_code();

        if self.tracing_level() == Level::ERROR {
            tracing::error!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            );
        } else {
            tracing::warn!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            );
        }
    }
}

// =============================================================================
// ConfigurationError
// =============================================================================

/// Configuration errors detected while building a client.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing required field.
    #[error("Missing required configuration: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// Invalid server URL.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl {
        /// The invalid URL.
        url: String,
        /// Reason.
        reason: String,
    },

    /// Invalid timeout value.
    #[error("Invalid {name}: {duration:?} ({reason})")]
    InvalidTimeout {
        /// Which timeout was rejected.
        name: String,
        /// The invalid duration.
        duration: Duration,
        /// Reason.
        reason: String,
    },

    /// Invalid default locale.
    #[error("Invalid default locale '{locale}'")]
    InvalidLocale {
        /// The rejected locale tag.
        locale: String,
    },

    /// The HTTP client could not be created.
    #[error("Failed to create HTTP client: {source}")]
    HttpClient {
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },
}

impl ConfigurationError {
    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// Creates an invalid server URL error.
    pub fn invalid_server_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidServerUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid timeout error.
    pub fn invalid_timeout(
        name: impl Into<String>,
        duration: Duration,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTimeout {
            name: name.into(),
            duration,
            reason: reason.into(),
        }
    }

    /// Creates an invalid locale error.
    pub fn invalid_locale(locale: impl Into<String>) -> Self {
        Self::InvalidLocale {
            locale: locale.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingField { .. } => ErrorCode::new(1, 1),
            Self::InvalidServerUrl { .. } => ErrorCode::new(1, 2),
            Self::InvalidTimeout { .. } => ErrorCode::new(1, 3),
            Self::InvalidLocale { .. } => ErrorCode::new(1, 4),
            Self::HttpClient { .. } => ErrorCode::new(1, 5),
        }
    }

    /// Returns recovery hints.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::MissingField { .. } => vec![
                "Set the server URL on the builder or via XMLDA_SERVER_URL",
                "Or supply a transport explicitly with build_with_transport()",
            ],
            Self::InvalidServerUrl { .. } => vec![
                "Use format: http://hostname[:port]/path",
                "Example: http://localhost/XMLDA/opcxmldaserver.asmx",
            ],
            Self::InvalidTimeout { .. } => vec!["Timeouts must be greater than zero"],
            Self::InvalidLocale { .. } => vec!["Use an IETF language tag such as en-US"],
            Self::HttpClient { .. } => vec!["Check the TLS backend is available on this platform"],
        }
    }
}

// =============================================================================
// TransportError
// =============================================================================

/// HTTP transport failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("Failed to connect to '{endpoint}': {source}")]
    Connect {
        /// Target endpoint.
        endpoint: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete in time.
    #[error("Request to '{endpoint}' timed out after {duration:?}")]
    TimedOut {
        /// Target endpoint.
        endpoint: String,
        /// Configured timeout.
        duration: Duration,
    },

    /// The server answered with a non-success status and no SOAP Fault.
    #[error("Server '{endpoint}' returned HTTP {status}")]
    HttpStatus {
        /// Target endpoint.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as received.
        body: String,
    },

    /// Any other request or body failure.
    #[error("HTTP request to '{endpoint}' failed: {source}")]
    Request {
        /// Target endpoint.
        endpoint: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Failure reported by a non-HTTP transport.
    #[error("Transport '{endpoint}' failed: {message}")]
    Other {
        /// Target endpoint.
        endpoint: String,
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Classifies a `reqwest` error.
    pub fn from_reqwest(endpoint: impl Into<String>, timeout: Duration, source: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if source.is_timeout() {
            Self::TimedOut {
                endpoint,
                duration: timeout,
            }
        } else if source.is_connect() {
            Self::Connect { endpoint, source }
        } else {
            Self::Request { endpoint, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a timed out error.
    pub fn timed_out(endpoint: impl Into<String>, duration: Duration) -> Self {
        Self::TimedOut {
            endpoint: endpoint.into(),
            duration,
        }
    }

    /// Creates a generic transport error.
    pub fn other(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Returns the endpoint the failure relates to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Connect { endpoint, .. }
            | Self::TimedOut { endpoint, .. }
            | Self::HttpStatus { endpoint, .. }
            | Self::Request { endpoint, .. }
            | Self::Other { endpoint, .. } => endpoint,
        }
    }

    /// Returns the severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TimedOut { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connect { .. } => ErrorCode::new(2, 1),
            Self::TimedOut { .. } => ErrorCode::new(2, 2),
            Self::HttpStatus { .. } => ErrorCode::new(2, 3),
            Self::Request { .. } => ErrorCode::new(2, 4),
            Self::Other { .. } => ErrorCode::new(2, 5),
        }
    }

    /// Returns recovery hints.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::Connect { .. } => vec![
                "Check if the OPC XML-DA server is running",
                "Verify the server URL is correct",
                "Check firewall rules allow the connection",
            ],
            Self::TimedOut { .. } => vec![
                "Check network connectivity to the server",
                "Use the extended timeout profile for slow servers",
            ],
            Self::HttpStatus { .. } => vec![
                "Verify the server URL points at the XML-DA service endpoint",
                "Check server logs for the rejected request",
            ],
            Self::Request { .. } | Self::Other { .. } => vec!["Check network connectivity"],
        }
    }
}

// =============================================================================
// SoapFault
// =============================================================================

/// A SOAP 1.1 Fault returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SOAP fault {code}: {reason}")]
pub struct SoapFault {
    /// Fault code (e.g. `soap:Client`, `soap:Server`).
    pub code: String,

    /// Human readable fault string.
    pub reason: String,

    /// Fault actor, when the server reports one.
    pub actor: Option<String>,

    /// Text content of the fault detail, when present.
    pub detail: Option<String>,
}

impl SoapFault {
    /// Creates a new fault.
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
            actor: None,
            detail: None,
        }
    }

    /// Sets the fault detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the fault code without its namespace prefix.
    pub fn code_local_part(&self) -> &str {
        self.code.rsplit(':').next().unwrap_or(&self.code)
    }

    /// Returns `true` if the fault blames the request (`Client` code).
    pub fn is_client_fault(&self) -> bool {
        self.code_local_part().starts_with("Client")
    }
}

// =============================================================================
// EncodingError
// =============================================================================

/// Request serialization failures.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The request body could not be serialized.
    #[error("Failed to serialize '{element}' request: {message}")]
    Serialize {
        /// Root element being written.
        element: String,
        /// Serializer message.
        message: String,
    },
}

impl EncodingError {
    /// Creates a serialize error.
    pub fn serialize(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialize {
            element: element.into(),
            message: message.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Serialize { .. } => ErrorCode::new(4, 1),
        }
    }
}

// =============================================================================
// DecodingError
// =============================================================================

/// Reply deserialization failures.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// The reply is not well-formed XML or not a SOAP envelope.
    #[error("Malformed SOAP envelope: {reason}")]
    MalformedEnvelope {
        /// Reason.
        reason: String,
    },

    /// The envelope has no body element.
    #[error("SOAP envelope has no Body")]
    MissingBody,

    /// The body carries a different element than the operation's response.
    #[error("Expected '{expected}' in SOAP body, found '{actual}'")]
    UnexpectedElement {
        /// Expected element name.
        expected: String,
        /// Element name found.
        actual: String,
    },

    /// The body element does not match the response shape.
    #[error("Failed to deserialize '{element}': {source}")]
    Deserialize {
        /// Element being read.
        element: String,
        /// Underlying error.
        #[source]
        source: quick_xml::DeError,
    },
}

impl DecodingError {
    /// Creates a malformed envelope error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEnvelope {
            reason: reason.into(),
        }
    }

    /// Creates an unexpected element error.
    pub fn unexpected_element(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MalformedEnvelope { .. } => ErrorCode::new(5, 1),
            Self::MissingBody => ErrorCode::new(5, 2),
            Self::UnexpectedElement { .. } => ErrorCode::new(5, 3),
            Self::Deserialize { .. } => ErrorCode::new(5, 4),
        }
    }
}

// =============================================================================
// ErrorSeverity
// =============================================================================

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Warning - action may be required.
    Warning,
    /// Error - action required, but recoverable.
    Error,
    /// Critical - immediate action required.
    Critical,
}

impl ErrorSeverity {
    /// Converts to tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Warning => Level::WARN,
            Self::Error | Self::Critical => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
///
/// Format: `XD-XXYY` where XX is category and YY is specific error.
///
/// Categories:
/// - 1: Configuration
/// - 2: Transport
/// - 3: Fault
/// - 4: Encoding
/// - 5: Decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category (1-5).
    pub category: u8,
    /// Specific error within category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }

    /// Returns the full error code as a u16.
    pub fn as_u16(&self) -> u16 {
        (u16::from(self.category) << 8) | u16::from(self.code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XD-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// A Result type with XmlDaError.
pub type XmlDaResult<T> = Result<T, XmlDaError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_server_url_is_configuration() {
        let error = XmlDaError::missing_server_url();
        assert!(error.is_configuration());
        assert!(error.to_string().contains("server_url"));
        assert_eq!(error.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_error_code_format() {
        let code = ErrorCode::new(2, 3);
        assert_eq!(code.to_string(), "XD-0203");
        assert_eq!(code.as_u16(), 0x0203);
    }

    #[test]
    fn test_transport_error_accessors() {
        let error = TransportError::http_status("http://localhost/xmlda", 404, "not found");
        assert_eq!(error.endpoint(), "http://localhost/xmlda");
        assert_eq!(error.error_code(), ErrorCode::new(2, 3));

        let timeout = TransportError::timed_out("http://localhost/xmlda", Duration::from_secs(5));
        assert_eq!(timeout.severity(), ErrorSeverity::Warning);
        assert!(XmlDaError::transport(timeout).is_transport());
    }

    #[test]
    fn test_soap_fault() {
        let fault = SoapFault::new("soap:Client", "E_UNKNOWNITEMNAME");
        assert_eq!(fault.code_local_part(), "Client");
        assert!(fault.is_client_fault());
        assert_eq!(fault.to_string(), "SOAP fault soap:Client: E_UNKNOWNITEMNAME");

        let error = XmlDaError::from(fault);
        assert!(error.is_fault());
        assert_eq!(error.category(), "fault");
    }

    #[test]
    fn test_decoding_error() {
        let error = DecodingError::unexpected_element("ReadResponse", "WriteResponse");
        assert!(error.to_string().contains("ReadResponse"));
        assert!(error.to_string().contains("WriteResponse"));
        assert!(XmlDaError::decoding(error).is_decoding());
    }

    #[test]
    fn test_recovery_hints() {
        let error = XmlDaError::missing_server_url();
        assert!(error
            .recovery_hints()
            .iter()
            .any(|hint| hint.contains("XMLDA_SERVER_URL")));
    }

    #[test]
    fn test_severity_to_tracing_level() {
        assert_eq!(ErrorSeverity::Warning.to_tracing_level(), Level::WARN);
        assert_eq!(ErrorSeverity::Critical.to_tracing_level(), Level::ERROR);
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
    }
}
