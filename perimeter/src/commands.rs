use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("perimeter")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("perimeter")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("scan")
                .about(
                    "Passively assess one or more web targets: header hygiene, TLS, an \
                external transport audit, a bounded crawl and optional log triage.",
                )
                .arg(
                    arg!(-t --"target" <URL>)
                        .required(false)
                        .help("Target URL or host (repeatable; https:// is assumed)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-T --"targets-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of targets"),
                )
                .arg(
                    arg!(-l --"log-file" <PATH>)
                        .required(false)
                        .help("Access log to triage for every target"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"max-pages" <NUM>)
                        .required(false)
                        .help("Maximum pages visited per crawl")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"max-depth" <NUM>)
                        .required(false)
                        .help("Maximum link depth followed from the target")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout for baseline and crawl fetches")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--"tool-timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for one audit tool invocation")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("60"),
                )
                .arg(
                    arg!(--"tls-workers" <NUM>)
                        .required(false)
                        .help("Concurrent TLS probes across all targets")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("8"),
                )
                .arg(
                    arg!(--"tool-workers" <NUM>)
                        .required(false)
                        .help("Concurrent audit tool processes across all targets")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"crawl-workers" <NUM>)
                        .required(false)
                        .help("Concurrent crawls across all targets")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    arg!(--"no-render")
                        .required(false)
                        .help("Never use the render fallback while crawling")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"audit-tool" <PROGRAM>)
                        .required(false)
                        .help("External transport audit program, called as <PROGRAM> <host:port>")
                        .default_value("sslyze")
                        .conflicts_with("no-audit-tool"),
                )
                .arg(
                    arg!(--"no-audit-tool")
                        .required(false)
                        .help("Skip the external transport audit")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-q --"quiet" "Suppress banner and progress output")
                        .required(false)
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug)")
                        .required(false)
                        .action(clap::ArgAction::Count),
                ),
        )
}
