extern crate clap;
extern crate pretty_env_logger;
extern crate termcolor;
extern crate tokio;

use clap::{crate_description, crate_name, Arg, Command};
use pretty_env_logger::init_timed;
use std::{env, process};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[macro_use]
mod color;
mod command {
    pub mod check;
}
mod read;
mod write;

use command::check::check;
use read::read_options;

fn option<'a>(name: &'a str, help: &'a str) -> Arg<'a> {
    Arg::new(name).long(name).takes_value(true).help(help)
}

#[tokio::main]
async fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "warn");
    }
    init_timed();
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(get_version!("version"))
        .long_version(get_version!("long_version"))
        .arg(option("contest", "contest you are challenging. e.g.) ABC051"))
        .arg(option("problem", "problem you are solving. e.g.) C"))
        .arg(option("command", "command to execute your program. e.g.) 'python c.py'"))
        .arg(option("url", "url of the problem page, used instead of contest and problem"))
        .arg(option("username", "your username of atcoder account"))
        .arg(option("password", "your password of atcoder account"))
        .arg(option("account", "yaml file holding username and password"))
        .arg(option("locale", "language of the sample headings: ja or en"))
        .arg(option("timeout", "seconds a single sample may run"))
        .arg(
            Arg::new("nocache")
                .long("nocache")
                .help("if set, local cache of samples is not used"),
        )
        .get_matches();

    let code = match read_options(&mut stdout, &matches) {
        Some(options) => check(&mut stdout, options).await,
        None => 2,
    };
    let _ = stdout.reset();
    process::exit(code);
}
