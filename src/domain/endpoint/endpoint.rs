//! Webhook endpoint entity and value objects.
//!
//! An endpoint is a forwarding rule: an opaque public id mapped to an owner
//! and a loopback target. The target restriction is the security boundary of
//! the whole system - a relayed webhook can only ever be replayed against
//! `http://localhost`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::domain::foundation::{EndpointId, Timestamp, UserId};

use super::EndpointError;

/// HTTP verbs an endpoint may be registered with.
///
/// Closed allow-list; parsing is case-insensitive and normalizes to the
/// upper-case wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(EndpointError::InvalidMethod(other.to_string())),
        }
    }
}

/// Validated forwarding target.
///
/// Must parse as a URL with scheme exactly `http` and hostname exactly
/// `localhost`. Port and path are the owner's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Parses and validates a target URL.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(raw).map_err(|_| EndpointError::InvalidTarget)?;
        if url.scheme() != "http" || url.host_str() != Some("localhost") {
            return Err(EndpointError::InvalidTarget);
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the target as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered forwarding rule.
///
/// Created and deleted by its owner via the management API, immutable
/// otherwise. Many endpoints per user, exactly one owner per endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    id: EndpointId,
    owner_id: UserId,
    target: TargetUrl,
    method: HttpMethod,
    created_at: Timestamp,
}

impl Endpoint {
    /// Creates a new endpoint with a fresh id, validating target and method.
    pub fn new(owner_id: UserId, target: &str, method: &str) -> Result<Self, EndpointError> {
        Ok(Self {
            id: EndpointId::new(),
            owner_id,
            target: TargetUrl::parse(target)?,
            method: method.parse()?,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes an endpoint from already-validated stored fields.
    pub fn from_parts(
        id: EndpointId,
        owner_id: UserId,
        target: TargetUrl,
        method: HttpMethod,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            target,
            method,
            created_at,
        }
    }

    pub fn id(&self) -> EndpointId {
        self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn target(&self) -> &TargetUrl {
        &self.target
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
