//! API base address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base address of the REST backend, e.g. `https://chirp.example/api`.
///
/// The stored form never ends with a slash, so joining an endpoint always
/// produces exactly one separator.
///
/// # Example
///
/// ```
/// use chirp_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:8000/api/").unwrap();
/// assert_eq!(api.as_str(), "http://localhost:8000/api");
/// assert_eq!(api.endpoint("posts/1/"), "http://localhost:8000/api/posts/1/");
/// assert_eq!(api.endpoint("/feed/?page=2"), "http://localhost:8000/api/feed/?page=2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl {
    url: Url,
    base: String,
}

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: s.to_string(),
                reason: "must not contain a query or fragment".to_string(),
            }
            .into());
        }

        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        let base = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, base })
    }

    /// Joins an endpoint path onto the base address.
    ///
    /// Leading slashes on `endpoint` are collapsed so the result has a single
    /// separator. Trailing slashes are preserved; the backend treats them as
    /// significant.
    pub fn endpoint(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base, endpoint.trim_start_matches('/'))
    }

    /// Returns the base address without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.base)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_removed() {
        let api = ApiUrl::new("https://chirp.example/api/").unwrap();
        assert_eq!(api.as_str(), "https://chirp.example/api");
    }

    #[test]
    fn root_base_has_no_trailing_slash() {
        let api = ApiUrl::new("https://chirp.example").unwrap();
        assert_eq!(api.as_str(), "https://chirp.example");
        assert_eq!(api.endpoint("/users/me/"), "https://chirp.example/users/me/");
    }

    #[test]
    fn endpoint_collapses_leading_separators() {
        let api = ApiUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(api.endpoint("//posts/"), "http://localhost:8000/api/posts/");
        assert_eq!(api.endpoint("posts/"), "http://localhost:8000/api/posts/");
    }

    #[test]
    fn plain_http_rejected_for_remote_hosts() {
        let err = ApiUrl::new("http://chirp.example/api").unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn http_allowed_for_loopback() {
        assert!(ApiUrl::new("http://127.0.0.1:9000").is_ok());
        assert!(ApiUrl::new("http://localhost:8000/api").is_ok());
    }

    #[test]
    fn query_is_rejected() {
        assert!(ApiUrl::new("https://chirp.example/api?x=1").is_err());
    }

    #[test]
    fn trailing_slash_does_not_affect_equality() {
        let with = ApiUrl::new("https://chirp.example/api/").unwrap();
        let without = ApiUrl::new("https://chirp.example/api").unwrap();
        assert_eq!(with, without);
        assert_eq!(with.as_url().path(), "/api");
        assert_eq!(ApiUrl::new("https://chirp.example/api//").unwrap(), without);
    }

    #[test]
    fn serde_roundtrip_keeps_normalized_form() {
        let api = ApiUrl::new("https://chirp.example/api/").unwrap();
        let json = serde_json::to_string(&api).unwrap();
        assert_eq!(json, "\"https://chirp.example/api\"");
        let back: ApiUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(back, api);
    }
}
