extern crate scraper;

use super::{
    error::{Error, Kind, Result},
    Session,
};
use log::debug;
use reqwest::Url;
use scraper::{Html, Selector};

pub fn contest_url(base_url: &str, contest: &str) -> String {
    format!(
        "{}/contests/{}",
        base_url.trim_end_matches('/'),
        contest.to_lowercase()
    )
}

pub fn task_index_url(base_url: &str, contest: &str) -> String {
    format!("{}/tasks", contest_url(base_url, contest))
}

/// Drops the last two path segments of a problem url, so
/// `.../contests/abc051/tasks/abc051_c` becomes `.../contests/abc051`.
pub fn contest_url_of(problem_url: &str) -> Option<String> {
    let mut url = Url::parse(problem_url).ok()?;
    let segments: Vec<String> = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if segments.len() < 2 {
        return None;
    }
    url.set_path(&segments[..segments.len() - 2].join("/"));
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

/// Returns the first task link, resolved against `base`, whose text matches
/// `label` ignoring case.
pub fn find_problem_url(body: &str, base: &Url, label: &str) -> Option<String> {
    let label = label.to_uppercase();
    let links = Selector::parse("td > a[href]").expect("static selector must parse");
    Html::parse_document(body)
        .select(&links)
        .find(|a| a.text().collect::<String>().trim().to_uppercase() == label)
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
        .map(String::from)
}

impl Session {
    pub async fn get_problem_url(&self, contest: &str, label: &str) -> Result<String> {
        let index = task_index_url(self.base_url.as_str(), contest);
        let body = self.fetch(index.as_str()).await?;
        let url = find_problem_url(&body, &self.base_url, label).ok_or_else(|| {
            Error::with_kind(Kind::ProblemNotFound {
                contest: contest.to_owned(),
                label: label.to_owned(),
            })
        })?;
        debug!("problem {} of {} is at {}", label, contest, url);
        Ok(url)
    }
}
