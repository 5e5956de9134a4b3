extern crate futures;
extern crate tokio;

use futures::future::BoxFuture;
use std::{
    error::Error as StdError,
    fmt, io,
    process::{ExitStatus, Stdio},
    time::Duration,
};
use tokio::{io::AsyncWriteExt, process::Command, time::timeout};

#[derive(Debug)]
pub enum Error {
    Spawn(io::Error),
    Io(io::Error),
    Exit { status: ExitStatus, stderr: String },
    Timeout(Duration),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "could not start command: {}", e),
            Self::Io(e) => write!(f, "error communicating with command: {}", e),
            Self::Exit { status, stderr } => {
                write!(f, "command exited with {}", status)?;
                if stderr.is_empty() {
                    Ok(())
                } else {
                    write!(f, "\n{}", stderr.trim_end())
                }
            }
            Self::Timeout(limit) => write!(f, "command timed out after {:?}", limit),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Spawn(e) | Self::Io(e) => Some(e),
            Self::Exit { .. } | Self::Timeout(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runs a command with `input` on its standard input and yields its
/// standard output.
pub trait Run {
    fn run<'a>(&'a self, command: &'a str, input: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Runs commands through the platform shell.
#[derive(Debug, Default, Clone)]
pub struct ShellRunner {
    limit: Option<Duration>,
}
impl ShellRunner {
    pub fn new(limit: Option<Duration>) -> Self {
        ShellRunner { limit }
    }

    fn command(command: &str) -> Command {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn execute(&self, command: &str, input: &str) -> Result<String> {
        let mut child = Self::command(command).spawn().map_err(Error::Spawn)?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "stdin not captured")))?;
        let feed = async move {
            let written = stdin.write_all(input.as_bytes()).await;
            drop(stdin);
            match written {
                // The program may exit without reading all of its input.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(Error::Io)?;
        fed.map_err(Error::Io)?;
        if !output.status.success() {
            return Err(Error::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
impl Run for ShellRunner {
    fn run<'a>(&'a self, command: &'a str, input: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            match self.limit {
                Some(limit) => timeout(limit, self.execute(command, input))
                    .await
                    .map_err(|_| Error::Timeout(limit))?,
                None => self.execute(command, input).await,
            }
        })
    }
}
