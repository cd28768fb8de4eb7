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

//! Drives the loader over on-disk multi-document fixtures, the same
//! `name`/`module` shape and `!swanson!successful-parse` /
//! `!swanson!invalid-parse` tagging convention the `s0-check` harness
//! walks directories of.

use s0::loader::document::{DocumentNode, DocumentStream, ParseOutcome};
use s0::loader::{load_module, text_format::Stream};

const SUCCESSFUL_PARSE_TAG: &str = "!swanson!successful-parse";
const INVALID_PARSE_TAG: &str = "!swanson!invalid-parse";

fn run_fixture(path: &str) -> Vec<(String, bool)> {
    let mut stream = Stream::from_path(path).unwrap_or_else(|e| panic!("{path}: {e}"));
    let mut results = Vec::new();
    loop {
        let node = match stream.parse_document() {
            ParseOutcome::Document(node) => node,
            ParseOutcome::NoMoreDocuments => break,
            ParseOutcome::Error => panic!("{path}: parse error: {:?}", stream.last_error()),
        };

        let name_node = node.mapping_get("name").expect("case has a name");
        let name =
            String::from_utf8_lossy(name_node.scalar_content().unwrap_or_default()).into_owned();
        let module_node = node.mapping_get("module").expect("case has a module");

        if module_node.is_scalar() {
            assert!(
                node.has_tag(INVALID_PARSE_TAG),
                "{name}: a scalar module placeholder is only legal under invalid-parse"
            );
            results.push((name, true));
            continue;
        }

        let outcome = load_module(module_node);
        if node.has_tag(SUCCESSFUL_PARSE_TAG) {
            results.push((name.clone(), outcome.is_ok()));
        } else if node.has_tag(INVALID_PARSE_TAG) {
            results.push((name.clone(), outcome.is_err()));
        } else {
            panic!("{name}: document has neither a successful- nor invalid-parse tag");
        }
    }
    results
}

#[test]
fn successful_parse_fixtures_all_load() {
    for (name, passed) in run_fixture("tests/fixtures/successful_parse.yaml") {
        assert!(passed, "expected {name} to load successfully");
    }
}

#[test]
fn invalid_parse_fixtures_all_reject() {
    for (name, passed) in run_fixture("tests/fixtures/invalid_parse.yaml") {
        assert!(passed, "expected {name} to be rejected (or be a NIY placeholder)");
    }
}
