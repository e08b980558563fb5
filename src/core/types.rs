use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::core::constants::{error_messages, http_status, timeouts};

/// One endpoint to probe, as configured.
///
/// Both fields default to the empty string when missing from the config
/// file so that an incomplete entry reaches the dispatcher and is
/// classified there instead of failing the whole config parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Absolute URL of the endpoint
    #[serde(default)]
    pub url: String,
    /// HTTP method, e.g. "GET"
    #[serde(default)]
    pub method: String,
}

impl EndpointSpec {
    pub fn new<U: Into<String>, M: Into<String>>(url: U, method: M) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
        }
    }

    /// A spec is runnable only when both URL and method are present.
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty() && !self.method.is_empty()
    }
}

impl fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", &self.method, &self.url)
    }
}

/// Why an attempt could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// URL or method missing; never sent
    InvalidConfig,
    /// Method/URL pair could not form a request
    Request,
    /// Connection, DNS, TLS or protocol failure
    Transport,
    /// Per-request timeout elapsed
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidConfig => "invalid config",
            FailureKind::Request => "request error",
            FailureKind::Transport => "transport error",
            FailureKind::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

/// Classified result of probing one [`EndpointSpec`].
///
/// `succeeded` and `failed` are independent: a reachable endpoint answering
/// with anything other than 200 has both set to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub spec: EndpointSpec,
    #[serde(serialize_with = "serialize_status_code")]
    pub status_code: Option<u16>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Option<Duration>,
    pub succeeded: bool,
    pub failed: bool,
    pub failure: Option<FailureKind>,
    pub error_message: Option<String>,
}

impl ProbeOutcome {
    /// Outcome for a response that came back, whatever its status.
    pub fn responded(spec: EndpointSpec, status_code: u16, duration: Duration) -> Self {
        Self {
            spec,
            status_code: Some(status_code),
            duration: Some(duration),
            succeeded: status_code == http_status::OK,
            failed: false,
            failure: None,
            error_message: None,
        }
    }

    /// Outcome for an attempt that never completed a round trip.
    pub fn failure(spec: EndpointSpec, kind: FailureKind, message: String) -> Self {
        Self {
            spec,
            status_code: None,
            duration: None,
            succeeded: false,
            failed: true,
            failure: Some(kind),
            error_message: Some(message),
        }
    }

    pub fn invalid_config(spec: EndpointSpec) -> Self {
        Self::failure(
            spec,
            FailureKind::InvalidConfig,
            error_messages::INVALID_REQUEST_CONFIG.to_string(),
        )
    }

    /// Status code, or 0 when no response was received.
    pub fn status(&self) -> u16 {
        self.status_code.unwrap_or(http_status::NO_RESPONSE)
    }

    /// Elapsed milliseconds, or -1 when there was no round trip.
    pub fn duration_ms(&self) -> i64 {
        self.duration
            .map(|d| d.as_millis() as i64)
            .unwrap_or(timeouts::NO_ROUND_TRIP_MS)
    }

    /// Reached the endpoint but got something other than 200.
    pub fn is_unexpected_status(&self) -> bool {
        !self.succeeded && !self.failed
    }

    pub fn is_timeout(&self) -> bool {
        self.failure == Some(FailureKind::Timeout)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.status_code, &self.error_message) {
            (Some(status), _) => write!(f, "{} - {} - {}ms", status, &self.spec, self.duration_ms()),
            (None, Some(message)) => write!(f, "{} - {}", &self.spec, message),
            (None, None) => write!(f, "{} - no outcome", &self.spec),
        }
    }
}

fn serialize_status_code<S: Serializer>(
    status: &Option<u16>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.unwrap_or(http_status::NO_RESPONSE))
}

fn serialize_duration_ms<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(
        duration
            .map(|d| d.as_millis() as i64)
            .unwrap_or(timeouts::NO_ROUND_TRIP_MS),
    )
}

/// All outcomes of one run, one per input spec, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    outcomes: Vec<ProbeOutcome>,
}

impl ResultSet {
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeOutcome> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn into_vec(self) -> Vec<ProbeOutcome> {
        self.outcomes
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed).count()
    }

    pub fn unexpected_status_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.is_unexpected_status())
            .count()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ProbeOutcome;
    type IntoIter = std::slice::Iter<'a, ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = ProbeOutcome;
    type IntoIter = std::vec::IntoIter<ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
