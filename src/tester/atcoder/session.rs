extern crate reqwest;
extern crate scraper;

use super::{
    error::{fetch_error, Error, Kind, Result},
    retry::async_retry,
};
use crate::config::{
    atcoder::LOGIN_MARKER,
    http::{TIMEOUT, USER_AGENT, VERBOSE},
};
use log::{debug, info};
use reqwest::{
    cookie::{CookieStore, Jar},
    Client, Url,
};
use scraper::{Html, Selector};
use std::sync::Arc;

const ENTRY_BUTTON: &str = "form > button.btn-lg.center-block";
const CSRF_INPUT: &str = r#"input[name="csrf_token"]"#;

/// Cookie-carrying client for a single run.
///
/// Every page visited during a run must go through the same `Session`,
/// otherwise the identity obtained by [`Session::login`] is lost.
pub struct Session {
    client: Client,
    jar: Arc<Jar>,
    pub(super) base_url: Url,
}
impl Session {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::with_kind(Kind::Url(e.to_string())))?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar.clone())
            .timeout(TIMEOUT)
            .connection_verbose(VERBOSE)
            .build()
            .map_err(|e| Error::with_kind(Kind::Builder(e)))?;
        Ok(Session {
            client,
            jar,
            base_url,
        })
    }

    pub(super) fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::with_kind(Kind::Url(format!("{}: {}", path, e))))
    }

    /// Fetches `url` and returns the body of a successful response.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let client = &self.client;
        async_retry(|| async move { client.get(url).send().await?.error_for_status()?.text().await })
            .await
            .map_err(fetch_error(url))
    }

    /// A contest page showing the large participation button is running and
    /// requires a logged in session to see its tasks.
    pub async fn is_contest_being_held(&self, contest_url: &str) -> Result<bool> {
        let held = has_entry_button(&self.fetch(contest_url).await?);
        debug!("contest {} being held: {}", contest_url, held);
        Ok(held)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::with_kind(Kind::MissingCredentials));
        }
        let url = self.join("/login")?;
        let body = self.fetch(url.as_str()).await?;
        let csrf = find_csrf(&body).ok_or_else(|| Error::with_kind(Kind::CSRF(url.to_string())))?;

        let client = &self.client;
        let (url, csrf) = (url.as_str(), csrf.as_str());
        async_retry(|| async move {
            client
                .post(url)
                .form(&[
                    ("username", username),
                    ("password", password),
                    ("csrf_token", csrf),
                ])
                .send()
                .await?
                .error_for_status()
        })
        .await
        .map_err(fetch_error(url))?;

        if self.is_logged_in(username) {
            info!("logged in as {}", username);
            Ok(())
        } else {
            Err(Error::with_kind(Kind::LoginFailed(username.to_owned())))
        }
    }

    pub fn is_logged_in(&self, username: &str) -> bool {
        let marker = format!("{}{}", LOGIN_MARKER, username);
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().map(|s| s.contains(marker.as_str())).ok())
            .unwrap_or(false)
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

pub fn has_entry_button(body: &str) -> bool {
    Html::parse_document(body)
        .select(&selector(ENTRY_BUTTON))
        .next()
        .is_some()
}

/// Only the first token on the page is used.
pub fn find_csrf(body: &str) -> Option<String> {
    Html::parse_document(body)
        .select(&selector(CSRF_INPUT))
        .next()
        .and_then(|e| e.value().attr("value"))
        .map(str::to_owned)
}
