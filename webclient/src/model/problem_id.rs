use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Empty problem id")]
    Empty,

    #[error("Not a problem route: '{0}' (expected '/problems/<id>/solve')")]
    NotProblemRoute(String),
}

static RE_SOLVE_ROUTE_PATH: Lazy<Regex> = lazy_regex!(r"^/problems/([^/?#]+)/solve/?$");

/// Problem identification.
/// (e.g.) "1", "42", "two-sum"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct ProblemId(String);

impl ProblemId {
    pub fn new(problem_id: impl AsRef<str>) -> Result<Self> {
        let s = problem_id.as_ref().trim();
        if s.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Derive the id from a navigation path of the form `/problems/:id/solve`.
    pub fn from_route_path(path: &str) -> Result<Self> {
        let Some(caps) = RE_SOLVE_ROUTE_PATH.captures(path) else {
            return Err(Error::NotProblemRoute(path.to_owned()));
        };
        Self::new(&caps[1])
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProblemId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<ProblemId> for String {
    fn from(value: ProblemId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_route_path_ok() {
        let id = |path: &str| ProblemId::from_route_path(path).map(String::from);
        assert_eq!(id("/problems/42/solve").unwrap(), "42");
        assert_eq!(id("/problems/two-sum/solve/").unwrap(), "two-sum");
    }

    #[test]
    fn from_route_path_ng() {
        let err = |path: &str| ProblemId::from_route_path(path).unwrap_err();
        assert!(matches!(err("/problems/42"), Error::NotProblemRoute(_)));
        assert!(matches!(err("/problems//solve"), Error::NotProblemRoute(_)));
        assert!(matches!(err("/"), Error::NotProblemRoute(_)));
        assert!(matches!(err(""), Error::NotProblemRoute(_)));
    }

    #[test]
    fn blank_id_is_rejected() {
        assert_eq!(ProblemId::new("  "), Err(Error::Empty));
        assert_eq!(ProblemId::new(" 7 ").unwrap().as_str(), "7");
    }
}
