use crate::{
    account::Account,
    atcoder::{
        self,
        problem::{contest_url, contest_url_of},
        Kind, Markers, Session,
    },
    cache::SampleCache,
    checker,
    config::atcoder::BASE_URL,
    runner::ShellRunner,
    types::Sample,
};
use log::{info, warn};
use std::{io, path::PathBuf, time::Duration};
use termcolor::WriteColor;

/// Which problem to test against.
#[derive(Debug, Clone)]
pub enum Target {
    Label { contest: String, label: String },
    Url(String),
}

/// Already validated settings handed over by the front end.
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub target: Target,
    pub command: String,
    pub account: Option<Account>,
    pub markers: Markers,
    /// `None` disables the cache entirely.
    pub cache_dir: Option<PathBuf>,
    /// When false, stored samples are not read but fresh ones are still written.
    pub use_cache: bool,
    pub time_limit: Option<Duration>,
}
impl Options {
    pub fn new(target: Target, command: String) -> Self {
        Options {
            base_url: BASE_URL.to_owned(),
            target,
            command,
            account: None,
            markers: Markers::default(),
            cache_dir: None,
            use_cache: true,
            time_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Open,
    LoggedIn,
}

/// One run of the tool. The session lives as long as the tester.
pub struct Tester {
    options: Options,
    session: Session,
    cache: Option<SampleCache>,
    runner: ShellRunner,
}
impl Tester {
    pub fn new(options: Options) -> atcoder::Result<Self> {
        let session = Session::new(&options.base_url)?;
        let cache = options.cache_dir.clone().map(SampleCache::new);
        let runner = ShellRunner::new(options.time_limit);
        Ok(Tester {
            options,
            session,
            cache,
            runner,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn contest_url(&self) -> atcoder::Result<String> {
        match &self.options.target {
            Target::Label { contest, .. } => Ok(contest_url(&self.options.base_url, contest)),
            Target::Url(url) => contest_url_of(url)
                .ok_or_else(|| atcoder::Error::with_kind(Kind::Url(url.clone()))),
        }
    }

    /// Logs in when the contest is running.
    pub async fn prepare(&self) -> atcoder::Result<Access> {
        let contest = self.contest_url()?;
        if !self.session.is_contest_being_held(&contest).await? {
            return Ok(Access::Open);
        }
        info!("{} is being held, logging in", contest);
        let (username, password) = self
            .options
            .account
            .as_ref()
            .map_or(("", ""), |a| (a.username.as_str(), a.password.as_str()));
        self.session.login(username, password).await?;
        Ok(Access::LoggedIn)
    }

    pub async fn problem_url(&self) -> atcoder::Result<String> {
        match &self.options.target {
            Target::Label { contest, label } => self.session.get_problem_url(contest, label).await,
            Target::Url(url) => Ok(url.clone()),
        }
    }

    pub async fn samples(&self, problem_url: &str) -> atcoder::Result<Vec<Sample>> {
        if let (Some(cache), true) = (&self.cache, self.options.use_cache) {
            if let Some(samples) = cache.lookup(problem_url) {
                info!("using cached samples for {}", problem_url);
                return Ok(samples);
            }
        }
        let samples = self
            .session
            .fetch_samples(problem_url, &self.options.markers)
            .await?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(problem_url, &samples) {
                warn!("{}", e);
            }
        }
        Ok(samples)
    }

    pub async fn check<W: WriteColor>(&self, samples: &[Sample], out: &mut W) -> io::Result<bool> {
        checker::check(&self.runner, &self.options.command, samples, out).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tester(target: Target) -> Tester {
        Tester::new(Options::new(target, "cat".to_owned())).unwrap()
    }

    #[test]
    fn contest_url_from_label() {
        let t = tester(Target::Label {
            contest: "ABC051".to_owned(),
            label: "C".to_owned(),
        });
        assert_eq!(t.contest_url().unwrap(), "https://atcoder.jp/contests/abc051");
    }

    #[test]
    fn contest_url_from_problem_url() {
        let t = tester(Target::Url(
            "https://atcoder.jp/contests/abc051/tasks/abc051_c".to_owned(),
        ));
        assert_eq!(t.contest_url().unwrap(), "https://atcoder.jp/contests/abc051");
    }

    #[test]
    fn short_problem_url_is_rejected() {
        let t = tester(Target::Url("https://atcoder.jp".to_owned()));
        assert!(matches!(t.contest_url().unwrap_err().kind(), Kind::Url(_)));
    }

    #[tokio::test]
    async fn cached_samples_skip_the_network() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens here; any fetch would fail.
        let url = "http://127.0.0.1:9/contests/abc051/tasks/abc051_c";
        let cached = vec![Sample::new("3\n", "9\n")];
        SampleCache::new(dir.path()).store(url, &cached).unwrap();

        let mut options = Options::new(Target::Url(url.to_owned()), "cat".to_owned());
        options.base_url = "http://127.0.0.1:9".to_owned();
        options.cache_dir = Some(dir.path().to_owned());
        assert_eq!(Tester::new(options.clone()).unwrap().samples(url).await.unwrap(), cached);

        options.use_cache = false;
        let err = Tester::new(options).unwrap().samples(url).await.unwrap_err();
        assert!(matches!(err.kind(), Kind::Fetch { .. }));
    }
}
