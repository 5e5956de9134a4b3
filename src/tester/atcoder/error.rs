extern crate reqwest;

use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub struct Error(Box<Kind>);
#[derive(Debug)]
pub enum Kind {
    Builder(reqwest::Error),
    Fetch { url: String, source: reqwest::Error },
    Url(String),
    MissingCredentials,
    CSRF(String),
    LoginFailed(String),
    ProblemNotFound { contest: String, label: String },
    NoSamples,
    UnbalancedSamples(usize),
    MissingSampleKey(String),
}

pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Builder(err) => write!(f, "Error building client: {}", err),
            Kind::Fetch { url, source } => write!(f, "could not get HTML: {}: {}", url, source),
            Kind::Url(url) => write!(f, "invalid url: {}", url),
            Kind::MissingCredentials => f.write_str(
                "you need to provide username and password to test for the contest being held",
            ),
            Kind::CSRF(url) => write!(f, "could not find csrf token in {}", url),
            Kind::LoginFailed(username) => write!(
                f,
                "login error: username/password may be wrong for {}",
                username
            ),
            Kind::ProblemNotFound { contest, label } => write!(
                f,
                "could not find problem page for problem '{}' of contest '{}'",
                label, contest
            ),
            Kind::NoSamples => f.write_str("no sample elements found"),
            Kind::UnbalancedSamples(count) => write!(
                f,
                "number of sample elements should be even because it consists of pair of input/output. got: {}",
                count
            ),
            Kind::MissingSampleKey(key) => write!(f, "could not find '{}' in HTML", key),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind() {
            Kind::Builder(x) => Some(x),
            Kind::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}
impl Error {
    pub(crate) fn with_kind(kind: Kind) -> Self {
        Self(Box::new(kind))
    }
    pub fn kind(&self) -> &Kind {
        &self.0
    }
}

pub(super) fn fetch_error(url: &str) -> impl FnOnce(reqwest::Error) -> Error + '_ {
    move |source| {
        Error::with_kind(Kind::Fetch {
            url: url.to_owned(),
            source,
        })
    }
}
