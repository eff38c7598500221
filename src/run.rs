mod cli;

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::config::PASSWORD_ENV;

pub(crate) use cli::{as_cli, print_usage};

/// Flags that take a value. Everything else starting with `--` is a switch.
const VALUE_FLAGS: &[&str] = &[
    "--user",
    "--password",
    "--category",
    "--date",
    "--title",
    "--data-dir",
];

/// Value following `--name`, if present.
pub(crate) fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_switch(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// Arguments that are neither flags nor flag values. A lone `-` and
/// negative numbers such as `-4.50` count as positional.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

/// The first positional argument and everything else around it.
pub(crate) fn split_command(args: &[String]) -> Option<(&str, Vec<String>)> {
    let mut i = 0;
    while let Some(arg) = args.get(i) {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            i += 2;
        } else if arg.starts_with("--") {
            i += 1;
        } else {
            let mut rest = args.to_vec();
            rest.remove(i);
            return Some((arg.as_str(), rest));
        }
    }
    None
}

/// Password from `--password`, then the environment, then one line of stdin.
pub(crate) fn read_password(args: &[String]) -> Result<String> {
    if let Some(pw) = flag_value(args, "--password") {
        return Ok(pw.to_string());
    }
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(pw);
    }

    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
