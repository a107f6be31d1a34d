//! Server base URL

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Absolute URL that endpoint paths are appended to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse a base URL
    pub fn parse(url: &str) -> Result<Self, Error> {
        Self::try_from(Url::parse(url)?)
    }

    /// Underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Append path segments
    ///
    /// Exactly one `/` separates the base path and each segment, whatever
    /// separators the base ends with or the segments start or end with. Each
    /// segment is percent-encoded as a single path segment. Query and fragment
    /// of the base are not carried over.
    ///
    /// `.` and `..` segments are rejected with [`Error::InvalidUrl`] since they
    /// would be dropped from the URL.
    pub fn join<I, S>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);

        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&base_path);

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidUrl(self.0.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                let segment = segment.as_ref().trim_matches('/');
                match segment {
                    "" => {}
                    "." | ".." => {
                        return Err(Error::InvalidUrl(format!(
                            "Dot segment `{}` in path of {}",
                            segment, self.0
                        )))
                    }
                    _ => {
                        path.push(segment);
                    }
                }
            }
        }

        Ok(url)
    }
}

impl TryFrom<Url> for BaseUrl {
    type Error = Error;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url.to_string()));
        }
        Ok(Self(url))
    }
}

impl TryFrom<&str> for BaseUrl {
    type Error = Error;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        Self::parse(url)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        Self::parse(url)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::from_str(&s).map_err(serde::de::Error::custom)
    }
}
