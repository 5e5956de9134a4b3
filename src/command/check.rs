extern crate termcolor;

use crate::write::report;
use atc_tester::{
    atcoder,
    tester::{Access, Options, Tester},
    types::Sample,
};
use termcolor::StandardStream;

async fn acquire(stdout: &mut StandardStream, tester: &Tester) -> atcoder::Result<Vec<Sample>> {
    if tester.prepare().await? == Access::LoggedIn {
        write_ok!(stdout, "Success", "login success");
    }
    let url = tester.problem_url().await?;
    write_info!(stdout, "Info", "Checking samples of {}", url);
    tester.samples(&url).await
}

/// Runs the whole pipeline and returns the process exit code.
pub async fn check(stdout: &mut StandardStream, options: Options) -> i32 {
    let tester = match report(stdout, Tester::new(options)) {
        Some(t) => t,
        None => return 1,
    };
    let result = acquire(stdout, &tester).await;
    let samples = match report(stdout, result) {
        Some(v) => v,
        None => return 1,
    };
    let passed = tester.check(&samples, stdout).await;
    match report(stdout, passed) {
        Some(true) => 0,
        _ => 1,
    }
}
