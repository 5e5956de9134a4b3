extern crate clap;
extern crate directories;
extern crate termcolor;

use atc_tester::{
    account::{self, Account},
    atcoder::Markers,
    config::cache::DIR_NAME,
    tester::{Options, Target},
};
use clap::ArgMatches;
use directories::BaseDirs;
use std::{fs::File, time::Duration};
use termcolor::StandardStream;

fn value(matches: &ArgMatches, name: &str) -> Option<String> {
    matches
        .value_of(name)
        .map(|v| v.trim_matches(|c| c == '\'' || c == '"').to_owned())
        .filter(|v| !v.is_empty())
}

fn read_target(matches: &ArgMatches) -> Result<Target, String> {
    if let Some(url) = value(matches, "url") {
        return Ok(Target::Url(url));
    }
    let contest = value(matches, "contest")
        .ok_or("specify the contest you are challenging. e.g.) ABC051")?;
    let label =
        value(matches, "problem").ok_or("specify the problem you are solving. e.g.) C")?;
    Ok(Target::Label { contest, label })
}

fn read_account(matches: &ArgMatches) -> Result<Option<Account>, String> {
    if let Some(path) = value(matches, "account") {
        let file = File::open(&path).map_err(|e| format!("Error open {}: {}", path, e))?;
        return account::from_reader(file)
            .map(Some)
            .map_err(|e| format!("Error load account {}: {}", path, e));
    }
    Ok(match (value(matches, "username"), value(matches, "password")) {
        (None, None) => None,
        (username, password) => Some(Account::new(
            username.unwrap_or_default(),
            password.unwrap_or_default(),
        )),
    })
}

fn read_markers(matches: &ArgMatches) -> Result<Markers, String> {
    match value(matches, "locale").as_deref() {
        None | Some("ja") => Ok(Markers::japanese()),
        Some("en") => Ok(Markers::english()),
        Some(other) => Err(format!("unknown locale {}. Expected ja or en", other)),
    }
}

fn read_limit(matches: &ArgMatches) -> Result<Option<Duration>, String> {
    value(matches, "timeout")
        .map(|v| match v.parse::<f64>() {
            Ok(secs) if secs > 0.0 && secs.is_finite() => Ok(Duration::from_secs_f64(secs)),
            _ => Err(format!("invalid timeout {}", v)),
        })
        .transpose()
}

fn build_options(matches: &ArgMatches) -> Result<Options, String> {
    let target = read_target(matches)?;
    let command = value(matches, "command")
        .ok_or("specify the command to execute your program. e.g.) 'python c.py'")?;
    let mut options = Options::new(target, command);
    options.account = read_account(matches)?;
    options.markers = read_markers(matches)?;
    options.time_limit = read_limit(matches)?;
    options.use_cache = !matches.is_present("nocache");
    options.cache_dir = BaseDirs::new().map(|d| d.home_dir().join(DIR_NAME));
    Ok(options)
}

pub fn read_options(stdout: &mut StandardStream, matches: &ArgMatches) -> Option<Options> {
    crate::write::report(stdout, build_options(matches))
}
