//! Option resolution: turns a rank's argument vector into a `RunConfig`.
//!
//! The grammar is short options only. Each rank resolves its own argv
//! independently; only the leader (rank 0) prints help, but every rank gets
//! the same outcome so the group can exit together.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::config::RunConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::help::{write_help, PROGRAM_NAME};

/// Rank allowed to write help to the shared console
pub const LEADER_RANK: i32 = 0;

/// Outcome of resolving one argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every option was understood
    Resolved(RunConfig),
    /// `-h` was given; the caller should exit without sorting
    HelpRequested,
    /// The invocation is malformed; no configuration is produced
    Fatal(ConfigError),
}

/// Resolves argument vectors on behalf of one rank
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver {
    caller_rank: i32,
}

impl ConfigResolver {
    pub fn new(caller_rank: i32) -> Self {
        Self { caller_rank }
    }

    pub fn caller_rank(&self) -> i32 {
        self.caller_rank
    }

    /// Whether this rank prints help
    pub fn is_leader(&self) -> bool {
        self.caller_rank == LEADER_RANK
    }

    /// Resolve `args` (program name excluded), printing help to stdout
    pub fn resolve<I, T>(&self, args: I) -> Resolution
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.resolve_to(args, &mut out)
    }

    /// Resolve `args` (program name excluded), printing help to `out`
    pub fn resolve_to<I, T, W>(&self, args: I, out: &mut W) -> Resolution
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        W: Write,
    {
        match match_args(args) {
            Ok(Some(matches)) => Resolution::Resolved(config_from_matches(&matches)),
            Ok(None) => {
                if self.is_leader() {
                    if let Err(e) = write_help(out) {
                        eprintln!("{PROGRAM_NAME}: could not write help text: {e}");
                    }
                }
                Resolution::HelpRequested
            }
            Err(e) => Resolution::Fatal(e),
        }
    }
}

/// Resolve `args` for `caller_rank`, printing help to stdout
pub fn resolve<I, T>(args: I, caller_rank: i32) -> Resolution
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ConfigResolver::new(caller_rank).resolve(args)
}

/// Resolve `args` for `caller_rank`, printing help to `out`
pub fn resolve_to<I, T, W>(args: I, caller_rank: i32, out: &mut W) -> Resolution
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    ConfigResolver::new(caller_rank).resolve_to(args, out)
}

fn value_arg(id: &'static str, short: char, value_name: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .value_name(value_name)
        .num_args(1)
        .allow_hyphen_values(true)
        .value_parser(value_parser!(OsString))
        .action(ArgAction::Set)
}

fn flag_arg(id: &'static str, short: char) -> Arg {
    Arg::new(id).short(short).action(ArgAction::SetTrue)
}

/// The option grammar. Built-in help and version handling is replaced by an
/// explicit `-h` so that parsing stops at `-h` in argument order.
pub fn build_cli() -> Command {
    Command::new(PROGRAM_NAME)
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .arg(value_arg("input", 'f', "PATH"))
        .arg(value_arg("output", 'o', "PATH"))
        .arg(value_arg("attribute", 'a', "PATH"))
        .arg(value_arg("group", 'g', "PATH"))
        .arg(value_arg("key-index", 'k', "INT"))
        .arg(flag_arg("skew", 's'))
        .arg(flag_arg("key-only", 'e'))
        .arg(flag_arg("verbose", 'v'))
        .arg(flag_arg("no-write", 'm'))
        .arg(flag_arg("no-collect", 'c'))
        .arg(value_arg("weak-scale", 'l', "INT"))
        .arg(value_arg("threads", 't', "INT"))
        .arg(Arg::new("help").short('h').action(ArgAction::Help))
        // Non-option operands are ignored, as getopt does.
        .arg(
            Arg::new("operands")
                .num_args(0..)
                .value_parser(value_parser!(OsString))
                .action(ArgAction::Append)
                .hide(true),
        )
}

/// Parse `args`; `Ok(None)` means `-h` was reached.
fn match_args<I, T>(args: I) -> ConfigResult<Option<ArgMatches>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match build_cli().try_get_matches_from(args) {
        Ok(matches) => Ok(Some(matches)),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => Ok(None),
        Err(e) => Err(classify_error(&e)),
    }
}

fn invalid_arg(err: &clap::Error) -> Option<String> {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn classify_error(err: &clap::Error) -> ConfigError {
    let arg = invalid_arg(err);
    match (err.kind(), arg) {
        (ErrorKind::UnknownArgument, Some(token)) => ConfigError::unrecognized_option(&token),
        // clap renders the option as "-k <INT>"
        (ErrorKind::InvalidValue, Some(arg)) => {
            let option = arg.split_whitespace().next().unwrap_or(arg.as_str());
            ConfigError::missing_value(option)
        }
        _ => ConfigError::malformed(err.kind().as_str().unwrap_or("invalid arguments")),
    }
}

fn config_from_matches(matches: &ArgMatches) -> RunConfig {
    let mut config = RunConfig::new();

    let value = |id: &str| matches.get_one::<OsString>(id).cloned();
    if let Some(p) = value("input") {
        config.input_path = PathBuf::from(p);
    }
    if let Some(p) = value("output") {
        config.output_path = PathBuf::from(p);
    }
    if let Some(p) = value("attribute") {
        config.attribute_path = PathBuf::from(p);
    }
    if let Some(g) = value("group") {
        config.group_path = g;
    }

    // Replacement characters are not digits, so lossy text converts like the raw bytes.
    let int = |id: &str| value(id).map(|v| lenient_int(&v.to_string_lossy()));
    if let Some(k) = int("key-index") {
        config.key_index = k;
    }
    if let Some(length) = int("weak-scale") {
        config.enable_weak_scale(length);
    }
    if let Some(threads) = int("threads") {
        config.enable_threaded_local_sort(threads);
    }

    config.skew_data = matches.get_flag("skew");
    config.sort_key_only = matches.get_flag("key-only");
    config.verbose = matches.get_flag("verbose");
    config.write_result = !matches.get_flag("no-write");
    config.collect_data = !matches.get_flag("no-collect");

    config
}

/// Integer conversion with C `atoi` leniency: leading whitespace, an optional
/// sign, then as many decimal digits as are present. Text without leading
/// digits is 0; out-of-range values saturate.
pub fn lenient_int(text: &str) -> i32 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let limit = i64::from(i32::MAX) + 1;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(b - b'0')).min(limit);
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
