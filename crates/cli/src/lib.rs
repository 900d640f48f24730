#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! The ferry command-line frontend. Loads the server inventory from
//! `~/.inventory.toml`, expands path variables in the content template,
//! establishes the SFTP session, and hands the resolved source and
//! destination to the transfer engine.
//!
//! Invocation is `ferry <server> <source>`; with either argument missing the
//! frontend prints a usage listing of the inventory's servers and the path
//! variable dictionary instead of failing.

mod error;
mod inventory;
mod session;
mod vars;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::{Arg, Command};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

pub use error::CliError;
pub use inventory::{Inventory, ServerConfig};
pub use vars::Variable;

/// Environment variable controlling log verbosity (tracing directives).
pub const LOG_ENV: &str = "FERRY_LOG";

/// Entry point: parses `args`, runs the requested upload, and reports
/// through the provided streams. Returns the process exit code.
pub fn run_with<A>(args: A, stdout: &mut dyn Write, stderr: &mut dyn Write) -> ExitCode
where
    A: IntoIterator<Item = OsString>,
{
    init_tracing();

    match run(args, stdout) {
        Ok(code) => code,
        Err(error) => {
            let _ = writeln!(stderr, "ferry: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run<A>(args: A, stdout: &mut dyn Write) -> Result<ExitCode, CliError>
where
    A: IntoIterator<Item = OsString>,
{
    let home = dirs::home_dir().ok_or(CliError::NoHome)?;
    let inventory = inventory::load(&home.join(filters::INVENTORY_MARKER))?;
    let variables = vars::builtin(&home);

    let matches = Command::new("ferry")
        .about("Mirrors local trees onto remote hosts over SFTP")
        .arg(Arg::new("server").value_name("SERVER"))
        .arg(Arg::new("source").value_name("SOURCE"))
        .try_get_matches_from(args);
    let matches = match matches {
        Ok(matches) => matches,
        Err(error) => {
            let _ = error.print();
            return Ok(if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    let (Some(server_name), Some(source)) = (
        matches.get_one::<String>("server"),
        matches.get_one::<String>("source"),
    ) else {
        print_usage(stdout, &inventory, &variables);
        return Ok(ExitCode::SUCCESS);
    };

    let server = inventory
        .servers
        .get(server_name)
        .ok_or_else(|| CliError::UnknownServer {
            name: server_name.clone(),
        })?;

    let content = vars::expand(&inventory.content, &variables);
    let content = if server.path_prefix.is_empty() {
        content
    } else {
        format!("{content}/{}", server.path_prefix)
    };
    let destination = if server.dest_prefix.is_empty() {
        "./".to_owned()
    } else {
        format!("{}/", server.dest_prefix)
    };

    let remote = session::connect(server)?;
    transfer::upload(&remote, &content, source, &destination)?;

    let _ = writeln!(stdout, "OK");
    Ok(ExitCode::SUCCESS)
}

fn print_usage(
    out: &mut dyn Write,
    inventory: &Inventory,
    variables: &BTreeMap<String, Variable>,
) {
    let _ = writeln!(out, "usage: ferry <server> <source>");
    let _ = writeln!(out);
    let _ = writeln!(out, "servers in inventory:");
    for (name, server) in &inventory.servers {
        let _ = writeln!(out, "   {name}: {} [{}]", server.uri, server.description);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "content path templates:");
    for (token, variable) in variables {
        let _ = writeln!(out, "   {token}: {} [{}]", variable.description, variable.path);
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
