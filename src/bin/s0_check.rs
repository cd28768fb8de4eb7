/*
 * Copyright Cedar Contributors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *      https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Walks one or more directories for `*.yaml` test-case documents and
//! checks the loader's verdict on each one against the document's own
//! tag (`!swanson!successful-parse` or `!swanson!invalid-parse`).
//!
//! Mirrors the original project's `test-s0-parser` harness: a document
//! whose `module` field is itself a mapping is loaded and must succeed
//! or fail according to its tag; a scalar `module` is a placeholder
//! meaning "not yet implemented" and is only legal under
//! `!swanson!invalid-parse`.

use clap::Parser;
use itertools::Itertools;
use s0::loader::document::{DocumentNode, DocumentStream, ParseOutcome};
use s0::loader::{load_module, text_format};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

const SUCCESSFUL_PARSE_TAG: &str = "!swanson!successful-parse";
const INVALID_PARSE_TAG: &str = "!swanson!invalid-parse";

#[derive(Parser)]
#[command(about = "Load and type-check S0 module test cases")]
struct Args {
    /// Directories to walk for `*.yaml` test-case files.
    #[arg(required = true)]
    directories: Vec<PathBuf>,
}

struct CaseOutcome {
    name: String,
    passed: bool,
    diagnostic: Option<String>,
}

fn collect_yaml_files(directory: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
        .collect()
}

fn run_file(path: &Path, outcomes: &mut Vec<CaseOutcome>) -> Result<(), String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let source_name = path.display().to_string();
    let mut stream = text_format::Stream::from_str(&source);
    loop {
        let node = match stream.parse_document() {
            ParseOutcome::Document(node) => node,
            ParseOutcome::NoMoreDocuments => break,
            ParseOutcome::Error => {
                return Err(stream
                    .last_error()
                    .unwrap_or("unknown parse error")
                    .to_string())
            }
        };

        if !node.is_mapping() {
            return Err("expected a mapping test case".to_string());
        }
        let name_node = node
            .mapping_get("name")
            .ok_or_else(|| "test case must have a name".to_string())?;
        if !name_node.is_scalar() {
            return Err("test case name must be a scalar".to_string());
        }
        let name = String::from_utf8_lossy(name_node.scalar_content().unwrap_or_default())
            .into_owned();

        let module_node = node
            .mapping_get("module")
            .ok_or_else(|| "test case must have a module".to_string())?;

        if module_node.is_mapping() {
            let outcome = if node.has_tag(SUCCESSFUL_PARSE_TAG) {
                match load_module(module_node) {
                    Ok(_) => CaseOutcome {
                        name,
                        passed: true,
                        diagnostic: None,
                    },
                    Err(e) => {
                        let report = e.with_source(&source_name, &source);
                        CaseOutcome {
                            name,
                            passed: false,
                            diagnostic: Some(format!("{:?}", miette::Report::new(report))),
                        }
                    }
                }
            } else if node.has_tag(INVALID_PARSE_TAG) {
                match load_module(module_node) {
                    Ok(_) => CaseOutcome {
                        name,
                        passed: false,
                        diagnostic: Some("unexpected successful parse".to_string()),
                    },
                    Err(_) => CaseOutcome {
                        name,
                        passed: true,
                        diagnostic: None,
                    },
                }
            } else {
                return Err("test case has unknown tag".to_string());
            };
            outcomes.push(outcome);
        } else if module_node.is_scalar() {
            if node.has_tag(INVALID_PARSE_TAG) {
                outcomes.push(CaseOutcome {
                    name: format!("NIY {name}"),
                    passed: true,
                    diagnostic: None,
                });
            } else {
                return Err(
                    "test case module can only be scalar for an invalid parse".to_string(),
                );
            }
        } else {
            return Err("test case module must be a scalar or mapping".to_string());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut found = Vec::new();
    for directory in &args.directories {
        let here = collect_yaml_files(directory);
        debug!(directory = %directory.display(), count = here.len(), "collected test files");
        found.extend(here);
    }
    let files = found.into_iter().sorted().collect_vec();

    let mut outcomes = Vec::new();
    for path in &files {
        info!(file = %path.display(), "running test cases");
        if let Err(message) = run_file(path, &mut outcomes) {
            error!(file = %path.display(), %message, "malformed test case file");
            return ExitCode::FAILURE;
        }
    }

    println!("1..{}", outcomes.len());
    let mut any_failed = false;
    for (i, outcome) in outcomes.iter().enumerate() {
        let number = i + 1;
        if outcome.passed {
            println!("ok {number} - {}", outcome.name);
        } else {
            println!("not ok {number} - {}", outcome.name);
            any_failed = true;
            if let Some(diagnostic) = &outcome.diagnostic {
                for line in diagnostic.lines() {
                    println!("# {line}");
                }
            }
        }
    }

    if any_failed {
        warn!("one or more test cases failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
