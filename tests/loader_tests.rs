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

//! End-to-end tests driving the loader through the shipped text-format
//! front end. Each case here corresponds to one of the concrete
//! scenarios.

use cool_asserts::assert_matches;
use s0::loader::document::{DocumentNode, DocumentStream, ParseOutcome};
use s0::loader::{load_module, text_format::Stream};
use s0::{Entity, LoadError};

fn load(source: &str) -> Result<Entity, LoadError> {
    let mut stream = Stream::from_str(source);
    let node = match stream.parse_document() {
        ParseOutcome::Document(node) => node,
        ParseOutcome::NoMoreDocuments => panic!("expected a document, found none"),
        ParseOutcome::Error => panic!("parse error: {:?}", stream.last_error()),
    };
    load_module(&node)
}

#[test]
fn empty_module_accepts() {
    let entity = load(
        r#"{
            inputs: { self: !s0!any {} },
            statements: [],
            invocation: !s0!invoke-closure { src: self, branch: body, parameters: {} }
        }"#,
    )
    .expect("a single invocation consuming the only input should load");

    assert_matches!(entity, Entity::Closure { named_blocks, .. } => {
        assert_eq!(named_blocks.len(), 1);
        assert!(named_blocks.get(&"module".into()).is_some());
    });
}

#[test]
fn duplicate_input_key_is_rejected() {
    let result = load(
        r#"{
            inputs: { a: !s0!any {}, a: !s0!any {} },
            statements: [],
            invocation: !s0!invoke-closure { src: a, branch: x, parameters: {} }
        }"#,
    );
    assert_matches!(result, Err(LoadError::DuplicateKey { name, .. }) => {
        assert_eq!(name, "a");
    });
}

#[test]
fn unknown_name_in_invocation_is_rejected() {
    let result = load(
        r#"{
            inputs: { a: !s0!any {} },
            statements: [],
            invocation: !s0!invoke-closure { src: b, branch: x, parameters: {} }
        }"#,
    );
    assert_matches!(result, Err(LoadError::Type(_)));
}

#[test]
fn name_consumed_twice_is_rejected() {
    let result = load(
        r#"{
            inputs: { a: !s0!any {}, b: !s0!any {} },
            statements: [],
            invocation: !s0!invoke-closure { src: a, branch: x, parameters: { a: c } }
        }"#,
    );
    assert_matches!(result, Err(LoadError::Type(_)));
}

#[test]
fn leftover_name_after_invocation_is_rejected() {
    let result = load(
        r#"{
            inputs: { a: !s0!any {}, b: !s0!any {} },
            statements: [],
            invocation: !s0!invoke-closure { src: a, branch: x, parameters: {} }
        }"#,
    );
    assert_matches!(result, Err(LoadError::Type(_)));
}

#[test]
fn created_atoms_are_consumed_by_the_invocation() {
    // `create-atom` adds both `a` and `b` to the working environment;
    // the invocation consumes `a` as `src` and `b` as the one
    // parameter `from`, leaving it empty.
    load(
        r#"{
            inputs: {},
            statements: [
                !s0!create-atom { dest: a },
                !s0!create-atom { dest: b }
            ],
            invocation: !s0!invoke-closure {
                src: a,
                branch: x,
                parameters: { b: c }
            }
        }"#,
    )
    .expect("both created names are consumed by the invocation");
}

#[test]
fn closure_with_zero_branches_is_rejected() {
    let result = load(
        r#"{
            inputs: { a: !s0!any {} },
            statements: [
                !s0!create-closure { dest: c, closed-over: [a], branches: {} }
            ],
            invocation: !s0!invoke-closure { src: c, branch: x, parameters: {} }
        }"#,
    );
    assert_matches!(result, Err(LoadError::Type(_)));
}

#[test]
fn malformed_document_is_a_document_error() {
    let mut stream = Stream::from_str("{ unterminated: ");
    let outcome = stream.parse_document();
    assert!(matches!(outcome, ParseOutcome::Error));
    assert!(stream.last_error().is_some());
}

#[test]
fn nested_create_closure_branch_is_its_own_block() {
    let entity = load(
        r#"{
            inputs: { a: !s0!any {} },
            statements: [
                !s0!create-closure {
                    dest: c,
                    closed-over: [a],
                    branches: {
                        only: {
                            inputs: { a: !s0!any {} },
                            statements: [],
                            invocation: !s0!invoke-closure { src: a, branch: x, parameters: {} }
                        }
                    }
                }
            ],
            invocation: !s0!invoke-closure { src: c, branch: only, parameters: {} }
        }"#,
    );
    entity.expect("a well-typed nested branch should load");
}
