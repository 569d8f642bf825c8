//! Command-line parsing.
//!
//! getopt-style: short options may be clustered (`-xy ARG`, `-yARG`), long
//! options take values as `--opt=VALUE` or, for required values, as the next
//! argument. `--` ends option parsing. Unknown options are reported and
//! skipped; a missing required value prints usage and exits.

use std::path::PathBuf;

use crate::trace::DEFAULT_TRACE_DIR;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status for a missing required option value.
pub const EXIT_USAGE: i32 = 2;

/// Parsed options for a normal run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub x: bool,
    pub y: Option<String>,
    /// Frame trace directory, from `--debug-output`.
    pub debug_output: Option<PathBuf>,
    /// JSON config file, from `--file`.
    pub config_file: Option<PathBuf>,
    pub positional: Vec<String>,
    /// Lines to show the user before starting.
    pub diagnostics: Vec<String>,
}

/// What `main` should do after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliArgs),
    /// Print `output` and exit with `code`.
    Exit { code: i32, output: String },
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [options] [args...]\n\
         -x\n\
         -y ARG\n\
         --file <config file>\n\
         --version\n\
         --debug-output [<directory>]\n\
         --help"
    )
}

/// Parses `args`, where the first item is the program name.
pub fn parse<I, S>(args: I) -> CliCommand
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let program = args.first().cloned().unwrap_or_else(|| "wolox".to_string());
    let mut out = CliArgs::default();

    let missing = |opt: &str, diagnostics: &[String]| {
        let mut output = diagnostics.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("error: missing argument for {opt}.\n"));
        output.push_str(&usage(&program));
        CliCommand::Exit {
            code: EXIT_USAGE,
            output,
        }
    };

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;

        if arg == "--" {
            out.positional.extend(args[i..].iter().cloned());
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((n, v)) => (n, Some(v.to_string())),
                None => (long, None),
            };
            match name {
                "version" => {
                    return CliCommand::Exit {
                        code: 0,
                        output: format!("VERSION: {VERSION}"),
                    }
                }
                "help" => {
                    return CliCommand::Exit {
                        code: 0,
                        output: usage(&program),
                    }
                }
                "debug-output" => {
                    let dir = inline.unwrap_or_else(|| DEFAULT_TRACE_DIR.to_string());
                    out.debug_output = Some(PathBuf::from(dir));
                }
                "file" => {
                    let value = match inline {
                        Some(v) => v,
                        None if i < args.len() => {
                            i += 1;
                            args[i - 1].clone()
                        }
                        None => return missing(arg, &out.diagnostics),
                    };
                    out.config_file = Some(PathBuf::from(value));
                }
                _ => out.diagnostics.push(format!("error: unknown option: {arg}")),
            }
            continue;
        }

        let Some(cluster) = arg.strip_prefix('-').filter(|c| !c.is_empty()) else {
            out.positional.push(arg.to_string());
            continue;
        };

        for (pos, c) in cluster.char_indices() {
            match c {
                'x' => {
                    out.x = true;
                    out.diagnostics.push("option: x []".to_string());
                }
                'y' => {
                    let rest = &cluster[pos + 1..];
                    let value = if !rest.is_empty() {
                        rest.to_string()
                    } else if i < args.len() {
                        i += 1;
                        args[i - 1].clone()
                    } else {
                        return missing("-y", &out.diagnostics);
                    };
                    out.diagnostics.push(format!("option: y [{value}]"));
                    out.y = Some(value);
                    break;
                }
                other => out.diagnostics.push(format!("error: unknown option: -{other}")),
            }
        }
    }

    let mut summary = String::from("Non-option arguments:");
    for arg in &out.positional {
        summary.push(' ');
        summary.push_str(arg);
    }
    out.diagnostics.push(summary);

    CliCommand::Run(out)
}
