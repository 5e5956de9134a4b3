extern crate futures;
extern crate termcolor;

use crate::{
    runner::{self, Run},
    types::Sample,
};
use futures::{pin_mut, stream, Stream, StreamExt};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

#[derive(Debug)]
pub enum Outcome {
    Success,
    Failure { actual: String },
    Error(runner::Error),
}
impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of running one sample. `index` starts at 1.
#[derive(Debug)]
pub struct Verdict<'a> {
    pub index: usize,
    pub sample: &'a Sample,
    pub outcome: Outcome,
}

fn write_status<W: WriteColor>(out: &mut W, color: Color, status: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))?;
    write!(out, "{}", status)?;
    out.reset()?;
    writeln!(out)
}

impl Verdict<'_> {
    pub fn render<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "sample {}: ", self.index)?;
        match &self.outcome {
            Outcome::Success => write_status(out, Color::Green, "SUCCESS"),
            Outcome::Error(e) => {
                write_status(out, Color::Red, "ERROR")?;
                writeln!(out, "{}", e)
            }
            Outcome::Failure { actual } => {
                write_status(out, Color::Red, "FAILURE")?;
                writeln!(out, "input:")?;
                write!(out, "{}", self.sample.input)?;
                writeln!(out, "expected output:")?;
                write!(out, "{}", self.sample.output)?;
                writeln!(out, "actual output:")?;
                write!(out, "{}", actual)
            }
        }
    }
}

/// Runs every sample in order, yielding one verdict each as it completes.
/// Output is compared byte for byte.
pub fn verdicts<'a, R: Run>(
    runner: &'a R,
    command: &'a str,
    samples: &'a [Sample],
) -> impl Stream<Item = Verdict<'a>> + 'a {
    stream::iter(samples.iter().enumerate()).then(move |(i, sample)| async move {
        let outcome = match runner.run(command, &sample.input).await {
            Ok(actual) if actual == sample.output => Outcome::Success,
            Ok(actual) => Outcome::Failure { actual },
            Err(e) => Outcome::Error(e),
        };
        Verdict {
            index: i + 1,
            sample,
            outcome,
        }
    })
}

/// Reports every sample to `out` and returns whether all of them passed.
///
/// A failed write does not stop the run; the first write error is returned
/// once every sample has been tried.
pub async fn check<R: Run, W: WriteColor>(
    runner: &R,
    command: &str,
    samples: &[Sample],
    out: &mut W,
) -> io::Result<bool> {
    let verdicts = verdicts(runner, command, samples);
    pin_mut!(verdicts);
    let mut success = true;
    let mut written = Ok(());
    while let Some(verdict) = verdicts.next().await {
        success &= verdict.outcome.is_success();
        if written.is_ok() {
            written = verdict.render(out);
        }
    }
    written?;
    out.flush()?;
    Ok(success)
}
