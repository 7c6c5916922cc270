//! Lenient argument scanner: classifies raw tokens before clap sees them.
//!
//! The scanner walks the argument list once. Known flags (short, long,
//! `--long=value`, clustered shorts, unique long prefixes) are rewritten
//! into canonical `--long` / `--long=value` tokens; tokens that look like
//! markdown files become input candidates; everything else is collected
//! as unknown. After `--` every token is an input candidate. The flag table is read from clap's own `Command`, so the
//! scanner and `Cli` can never disagree about which flags exist.
//!
//! Priority-exit flags (help, diagnostics, list-fonts, version) are found
//! by a separate pre-scan over the raw tokens so they win regardless of
//! what else is on the command line.

use std::ffi::OsString;

use clap::{CommandFactory, Parser};

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::options::is_markdown_path;

/// What to do with tokens the scanner does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownArgPolicy {
    /// Report them as warnings and carry on.
    #[default]
    Warn,
    /// Fail with `Error::UnknownArgument`.
    Reject,
}

/// Flags that perform a single informational action and exit.
///
/// Variant order is priority order: earlier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityAction {
    Help,
    Diagnostics,
    ListFonts,
    Version,
}

impl PriorityAction {
    const ORDERED: [PriorityAction; 4] = [
        PriorityAction::Help,
        PriorityAction::Diagnostics,
        PriorityAction::ListFonts,
        PriorityAction::Version,
    ];

    /// The clap argument id that triggers this action.
    fn arg_id(self) -> &'static str {
        match self {
            PriorityAction::Help => "help",
            PriorityAction::Diagnostics => "diagnostics",
            PriorityAction::ListFonts => "list_fonts",
            PriorityAction::Version => "version",
        }
    }
}

/// One named (non-positional) argument as clap defines it.
#[derive(Debug, Clone)]
struct FlagSpec {
    id: String,
    short: Option<char>,
    long: String,
    takes_value: bool,
}

/// Lookup table of every named flag `Cli` accepts, including clap's
/// generated `--help`.
#[derive(Debug, Clone)]
pub struct FlagTable {
    flags: Vec<FlagSpec>,
}

impl FlagTable {
    /// Builds the table from the `Cli` definition.
    pub fn from_cli() -> Self {
        let mut command = Cli::command();
        // Building materialises the auto-generated help argument.
        command.build();
        let flags = command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .filter_map(|arg| {
                Some(FlagSpec {
                    id: arg.get_id().to_string(),
                    short: arg.get_short(),
                    long: arg.get_long()?.to_string(),
                    takes_value: arg.get_action().takes_values(),
                })
            })
            .collect();
        Self { flags }
    }

    fn by_short(&self, c: char) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.short == Some(c))
    }

    /// Exact long name, else a prefix that matches exactly one flag.
    fn by_long(&self, name: &str) -> Option<&FlagSpec> {
        if name.is_empty() {
            return None;
        }
        if let Some(exact) = self.flags.iter().find(|f| f.long == name) {
            return Some(exact);
        }
        let mut matches = self.flags.iter().filter(|f| f.long.starts_with(name));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Ids of the flags a single raw token names, ignoring values.
    fn ids_in_token<'a>(&'a self, token: &str) -> Vec<&'a str> {
        if let Some(body) = token.strip_prefix("--") {
            let name = body.split_once('=').map_or(body, |(name, _)| name);
            return self.by_long(name).map(|f| vec![f.id.as_str()]).unwrap_or_default();
        }
        let Some(cluster) = token.strip_prefix('-') else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        for c in cluster.chars() {
            let Some(flag) = self.by_short(c) else {
                break;
            };
            ids.push(flag.id.as_str());
            if flag.takes_value {
                break;
            }
        }
        ids
    }
}

/// Converts the process arguments to strings.
///
/// Paths travel to pandoc and through the summary as text, so an argument
/// that is not valid UTF-8 is a usage error rather than being mangled.
pub fn collect_utf8(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| Error::NonUtf8Argument(arg.to_string_lossy().into_owned()))
        })
        .collect()
}

/// Returns the highest-priority exit action named anywhere before `--`.
pub fn priority_action(raw: &[String], table: &FlagTable) -> Option<PriorityAction> {
    let seen: Vec<&str> = raw
        .iter()
        .take_while(|token| token.as_str() != "--")
        .flat_map(|token| table.ids_in_token(token))
        .collect();
    PriorityAction::ORDERED
        .into_iter()
        .find(|action| seen.contains(&action.arg_id()))
}

/// Result of the lenient scan. Never fails on its own; `into_cli` turns
/// the collected problems into errors.
#[derive(Debug, Clone, Default)]
pub struct ScannedArgs {
    /// Canonical `--long` / `--long=value` tokens for clap.
    pub canonical: Vec<String>,
    /// Markdown-looking tokens not consumed as flag values.
    pub inputs: Vec<String>,
    /// Tokens that matched nothing.
    pub unknown: Vec<String>,
    /// A value-bearing flag that ended the argument list.
    pub missing_value: Option<String>,
    policy: UnknownArgPolicy,
}

impl ScannedArgs {
    /// The effective policy: `--strict` upgrades `Warn` to `Reject`.
    pub fn policy(&self) -> UnknownArgPolicy {
        if self.canonical.iter().any(|t| t == "--strict") {
            UnknownArgPolicy::Reject
        } else {
            self.policy
        }
    }

    /// Number of `--verbose` occurrences.
    pub fn verbosity(&self) -> u8 {
        let count = self.canonical.iter().filter(|t| *t == "--verbose").count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Validates the scan and parses the canonical tokens with clap.
    pub fn into_cli(self) -> Result<Cli> {
        let policy = self.policy();
        let ScannedArgs {
            canonical,
            inputs,
            unknown,
            missing_value,
            ..
        } = self;

        if let Some(flag) = missing_value {
            return Err(Error::MissingValue(flag));
        }
        if policy == UnknownArgPolicy::Reject {
            if let Some(token) = unknown.into_iter().next() {
                return Err(Error::UnknownArgument(token));
            }
        }
        let mut inputs = inputs.into_iter();
        let input = inputs.next();
        if let (Some(first), Some(second)) = (&input, inputs.next()) {
            return Err(Error::MultipleInputs {
                first: first.clone(),
                second,
            });
        }

        let mut argv = Vec::with_capacity(canonical.len() + 3);
        argv.push("mdpdf".to_string());
        argv.extend(canonical);
        if let Some(input) = input {
            argv.push("--".to_string());
            argv.push(input);
        }
        Cli::try_parse_from(argv).map_err(|e| {
            let message = e.to_string();
            let message = message.trim();
            Error::InvalidArgument(message.trim_start_matches("error: ").to_string())
        })
    }
}

/// Scans raw arguments (without the program name).
pub fn scan(raw: &[String], table: &FlagTable, policy: UnknownArgPolicy) -> ScannedArgs {
    let mut out = ScannedArgs {
        policy,
        ..ScannedArgs::default()
    };
    let mut tokens = raw.iter();

    while let Some(token) = tokens.next() {
        if token == "--" {
            // Explicitly positional: taken as input whatever the extension.
            out.inputs.extend(tokens.by_ref().cloned());
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let Some(flag) = table.by_long(name) else {
                out.unknown.push(token.clone());
                continue;
            };
            match (flag.takes_value, inline) {
                (true, Some(value)) => push_value(&mut out, flag, value),
                (true, None) => match tokens.next() {
                    Some(value) => push_value(&mut out, flag, value),
                    None => out.missing_value = Some(token.clone()),
                },
                (false, None) => out.canonical.push(format!("--{}", flag.long)),
                (false, Some(_)) => out.unknown.push(token.clone()),
            }
            continue;
        }

        match token.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() => {
                if let Err(pending) = scan_short_cluster(cluster, table, &mut tokens, &mut out) {
                    match pending {
                        ClusterError::Unknown => out.unknown.push(token.clone()),
                        ClusterError::MissingValue => out.missing_value = Some(token.clone()),
                    }
                }
            }
            _ => classify_bare(token, &mut out),
        }
    }

    out
}

enum ClusterError {
    Unknown,
    MissingValue,
}

/// Expands `-yv`, `-t heros` and `-theros`. Commits nothing unless every
/// character in the cluster is a known flag.
fn scan_short_cluster<'a>(
    cluster: &str,
    table: &FlagTable,
    tokens: &mut impl Iterator<Item = &'a String>,
    out: &mut ScannedArgs,
) -> std::result::Result<(), ClusterError> {
    let mut pending = Vec::new();
    for (offset, c) in cluster.char_indices() {
        let flag = table.by_short(c).ok_or(ClusterError::Unknown)?;
        if !flag.takes_value {
            pending.push(format!("--{}", flag.long));
            continue;
        }
        let attached = &cluster[offset + c.len_utf8()..];
        let attached = attached.strip_prefix('=').unwrap_or(attached);
        let value = if attached.is_empty() {
            tokens.next().ok_or(ClusterError::MissingValue)?.as_str()
        } else {
            attached
        };
        pending.push(format!("--{}={value}", flag.long));
        break;
    }
    out.canonical.extend(pending);
    Ok(())
}

fn push_value(out: &mut ScannedArgs, flag: &FlagSpec, value: &str) {
    out.canonical.push(format!("--{}={value}", flag.long));
}

fn classify_bare(token: &str, out: &mut ScannedArgs) {
    if is_markdown_path(token) {
        out.inputs.push(token.to_string());
    } else {
        out.unknown.push(token.to_string());
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
