//! Per-request context threaded through the write lifecycle

use std::str::FromStr;

use crate::domain::Identity;
use crate::error::ParseEnumError;

/// HTTP method of the request being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// True for the resource-creation verb.
    pub fn is_creation(&self) -> bool {
        *self == HttpMethod::Post
    }
}

impl FromStr for HttpMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ParseEnumError { kind: "HTTP method", value: s.to_string() }),
        }
    }
}

/// Source of the authenticated principal for the current request.
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<&Identity>;
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    method: HttpMethod,
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn new(method: HttpMethod, identity: Option<Identity>) -> Self {
        Self { method, identity }
    }

    pub fn anonymous(method: HttpMethod) -> Self {
        Self::new(method, None)
    }

    pub fn authenticated(method: HttpMethod, identity: Identity) -> Self {
        Self::new(method, Some(identity))
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Same caller, different verb.
    pub fn with_method(&self, method: HttpMethod) -> Self {
        Self { method, identity: self.identity.clone() }
    }

    /// The caller's identity, or `Unauthenticated`.
    pub fn require_identity(&self) -> Result<&Identity, crate::error::DomainError> {
        self.identity.as_ref().ok_or(crate::error::DomainError::Unauthenticated)
    }
}

impl IdentityProvider for RequestContext {
    fn current_identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}
