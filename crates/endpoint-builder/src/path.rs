//! Endpoint paths

use core::fmt;

use thiserror::Error;

use crate::endpoint::Endpoint;

/// Path Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A path parameter has no value
    #[error("Missing value for path parameter `{0}`")]
    MissingParameter(&'static str),
    /// A path parameter was given an empty value
    #[error("Empty value for path parameter `{0}`")]
    EmptyParameter(&'static str),
    /// A path parameter was given `.` or `..`, which would not stay a segment
    #[error("Dot segment for path parameter `{0}`")]
    DotSegment(&'static str),
}

/// One component of an endpoint path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathComponent {
    /// Literal segment
    Constant(&'static str),
    /// Named segment filled in from [`PathParameters`]
    Parameter(&'static str),
}

impl PathComponent {
    /// Parse a component, `:name` becomes a parameter
    pub fn parse(component: &'static str) -> Self {
        match component.strip_prefix(':') {
            Some(name) => Self::Parameter(name),
            None => Self::Constant(component),
        }
    }
}

impl From<&'static str> for PathComponent {
    fn from(component: &'static str) -> Self {
        Self::parse(component)
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.write_str(value),
            Self::Parameter(name) => write!(f, ":{name}"),
        }
    }
}

/// Values for the parameter components of a path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParameters(Vec<(&'static str, String)>);

impl PathParameters {
    /// Empty set of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    /// Value of a parameter, the last one set wins
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Resolve the path segments of an endpoint
///
/// Parameters are substituted from [`Endpoint::path_parameters`] and kept as
/// single segments, so `.` and `..` are rejected. Constants are split on `/`
/// and empty parts are skipped, so `"v1/users/"` yields the two segments `v1`
/// and `users`.
pub fn resolve_path<E>(endpoint: &E) -> Result<Vec<String>, PathError>
where
    E: Endpoint,
{
    let parameters = endpoint.path_parameters();

    let mut segments = Vec::with_capacity(E::PATH.len());
    for component in E::PATH {
        match *component {
            PathComponent::Constant(value) => segments.extend(
                value
                    .split('/')
                    .filter(|part| !part.is_empty())
                    .map(str::to_string),
            ),
            PathComponent::Parameter(name) => {
                let value = parameters
                    .get(name)
                    .ok_or(PathError::MissingParameter(name))?;
                match value {
                    "" => return Err(PathError::EmptyParameter(name)),
                    "." | ".." => return Err(PathError::DotSegment(name)),
                    _ => {}
                }
                segments.push(value.to_string());
            }
        }
    }

    Ok(segments)
}
