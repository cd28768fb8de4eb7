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

//! The recursive-descent loader: tree document -> type-checked S0 IR.
//!
//! Every production here validates the node's shape, dispatches tagged
//! mappings to the right constructor, and recurses into children
//! before attaching them to the parent. Type-checking is not a
//! separate pass: [`load_block`] threads a working
//! [`EnvironmentType`] through [`EnvironmentType::add_statement`] and
//! [`EnvironmentType::add_invocation`] as it reads each statement and
//! the terminal invocation.

use crate::block::{Block, NamedBlocks};
use crate::entity::{Entity, Environment};
use crate::entity_type::EntityType;
use crate::environment_type::EnvironmentType;
use crate::environment_type_mapping::EnvironmentTypeMapping;
use crate::err::LoadError;
use crate::invocation::Invocation;
use crate::loader::document::DocumentNode;
use crate::name::{Name, NameSet};
use crate::name_mapping::NameMapping;
use crate::statement::Statement;

/// Shared prefix of every tag this loader recognizes.
pub const S0_TAG_PREFIX: &str = "!s0!";

mod tags {
    pub const ANY: &str = "!s0!any";
    pub const CLOSURE: &str = "!s0!closure";
    pub const METHOD: &str = "!s0!method";
    pub const OBJECT: &str = "!s0!object";
    pub const CREATE_ATOM: &str = "!s0!create-atom";
    pub const CREATE_CLOSURE: &str = "!s0!create-closure";
    pub const CREATE_LITERAL: &str = "!s0!create-literal";
    pub const CREATE_METHOD: &str = "!s0!create-method";
    pub const INVOKE_CLOSURE: &str = "!s0!invoke-closure";
    pub const INVOKE_METHOD: &str = "!s0!invoke-method";
}

fn require_mapping<N: DocumentNode>(what: &'static str, node: &N) -> Result<(), LoadError> {
    if node.is_mapping() {
        Ok(())
    } else {
        Err(LoadError::unexpected_kind(what, node.start_mark()))
    }
}

fn require_key<'n, N: DocumentNode>(
    what: &'static str,
    key: &'static str,
    node: &'n N,
) -> Result<&'n N, LoadError> {
    node.mapping_get(key)
        .ok_or_else(|| LoadError::missing_key(what, key, node.start_mark()))
}

fn load_name<N: DocumentNode>(node: &N) -> Result<Name, LoadError> {
    if !node.is_scalar() {
        return Err(LoadError::unexpected_kind("a scalar name", node.start_mark()));
    }
    Ok(Name::new(node.scalar_content().unwrap_or_default()))
}

/// Loads a sequence of scalar names into a [`NameSet`].
pub fn load_name_set<N: DocumentNode>(node: &N) -> Result<NameSet, LoadError> {
    if !node.is_sequence() {
        return Err(LoadError::unexpected_kind(
            "a sequence of names",
            node.start_mark(),
        ));
    }
    let mut set = NameSet::new();
    let size = node.sequence_size().unwrap_or(0);
    for i in 0..size {
        let item = node.sequence_at(i).expect("index within sequence_size");
        let name = load_name(item)?;
        if !set.add(name.clone()) {
            return Err(LoadError::duplicate_key(
                "name",
                name.display_lossy(),
                item.start_mark(),
            ));
        }
    }
    Ok(set)
}

/// Loads a mapping of scalar `from: to` pairs, as used by an
/// invocation's `parameters`. Each loaded entry's `type` field is
/// `any`, since invocation type-checking never inspects it.
pub fn load_name_mapping<N: DocumentNode>(node: &N) -> Result<NameMapping, LoadError> {
    require_mapping("a mapping of parameters", node)?;
    let mut mapping = NameMapping::new();
    let size = node.mapping_size().unwrap_or(0);
    for i in 0..size {
        let key = node.mapping_key_at(i).expect("index within mapping_size");
        let value = node.mapping_value_at(i).expect("index within mapping_size");
        let from = load_name(key)?;
        let to = load_name(value)?;
        if !mapping.add(from.clone(), to, EntityType::Any) {
            return Err(LoadError::duplicate_key(
                "parameter",
                from.display_lossy(),
                key.start_mark(),
            ));
        }
    }
    Ok(mapping)
}

/// Loads a mapping of `name: entity-type` pairs into an
/// [`EnvironmentType`], used for a block's `inputs` and for the
/// `inputs`/`elements` fields of method/object entity types.
pub fn load_environment_type<N: DocumentNode>(node: &N) -> Result<EnvironmentType, LoadError> {
    require_mapping("an environment type", node)?;
    let mut env = EnvironmentType::new();
    let size = node.mapping_size().unwrap_or(0);
    for i in 0..size {
        let key = node.mapping_key_at(i).expect("index within mapping_size");
        let value = node.mapping_value_at(i).expect("index within mapping_size");
        let name = load_name(key)?;
        let ty = load_entity_type(value)?;
        if env.add(name.clone(), ty).is_err() {
            return Err(LoadError::duplicate_key(
                "environment type key",
                name.display_lossy(),
                key.start_mark(),
            ));
        }
    }
    Ok(env)
}

/// Loads a mapping of `branch: environment-type` pairs, used by the
/// `closure` entity type's `branches` field.
pub fn load_environment_type_mapping<N: DocumentNode>(
    node: &N,
) -> Result<EnvironmentTypeMapping, LoadError> {
    require_mapping("a mapping of branch types", node)?;
    let mut mapping = EnvironmentTypeMapping::new();
    let size = node.mapping_size().unwrap_or(0);
    for i in 0..size {
        let key = node.mapping_key_at(i).expect("index within mapping_size");
        let value = node.mapping_value_at(i).expect("index within mapping_size");
        let name = load_name(key)?;
        let env = load_environment_type(value)?;
        if !mapping.add(name.clone(), env) {
            return Err(LoadError::duplicate_key(
                "branch type",
                name.display_lossy(),
                key.start_mark(),
            ));
        }
    }
    Ok(mapping)
}

/// Loads an entity type, dispatching on the node's tag.
pub fn load_entity_type<N: DocumentNode>(node: &N) -> Result<EntityType, LoadError> {
    require_mapping("an entity type", node)?;
    let mark = node.start_mark();
    match node.tag() {
        Some(tags::ANY) => Ok(EntityType::Any),
        Some(tags::CLOSURE) => {
            let branches = require_key("closure", "branches", node)?;
            Ok(EntityType::closure(load_environment_type_mapping(branches)?))
        }
        Some(tags::METHOD) => {
            let inputs = require_key("method", "inputs", node)?;
            Ok(EntityType::method(load_environment_type(inputs)?))
        }
        Some(tags::OBJECT) => {
            let elements = require_key("object", "elements", node)?;
            Ok(EntityType::object(load_environment_type(elements)?))
        }
        _ => Err(LoadError::unknown_tag("entity type", mark)),
    }
}

/// Loads a single statement, dispatching on the node's tag, without
/// folding it into any environment type — that's the caller's job
/// ([`load_statement_list`]), since only the caller has the working
/// environment type to thread through.
fn load_statement<N: DocumentNode>(node: &N) -> Result<Statement, LoadError> {
    require_mapping("a statement", node)?;
    let mark = node.start_mark();
    match node.tag() {
        Some(tags::CREATE_ATOM) => {
            let dest = load_name(require_key("create-atom", "dest", node)?)?;
            Ok(Statement::CreateAtom { dest })
        }
        Some(tags::CREATE_LITERAL) => {
            let dest = load_name(require_key("create-literal", "dest", node)?)?;
            let content_node = require_key("create-literal", "content", node)?;
            if !content_node.is_scalar() {
                return Err(LoadError::unexpected_kind(
                    "a scalar literal content",
                    content_node.start_mark(),
                ));
            }
            let content: Box<[u8]> = content_node.scalar_content().unwrap_or_default().into();
            Ok(Statement::CreateLiteral { dest, content })
        }
        Some(tags::CREATE_METHOD) => {
            let dest = load_name(require_key("create-method", "dest", node)?)?;
            let self_input = load_name(require_key("create-method", "self-input", node)?)?;
            let body_node = require_key("create-method", "body", node)?;
            let body = Box::new(load_block(body_node)?);
            Ok(Statement::CreateMethod {
                dest,
                self_input,
                body,
            })
        }
        Some(tags::CREATE_CLOSURE) => {
            let dest = load_name(require_key("create-closure", "dest", node)?)?;
            let closed_over_node = require_key("create-closure", "closed-over", node)?;
            let closed_over = load_name_set(closed_over_node)?;
            let branches_node = require_key("create-closure", "branches", node)?;
            let branches = load_named_blocks(branches_node)?;
            if branches.is_empty() {
                return Err(LoadError::Type(crate::err::TypeError::EmptyClosure {
                    mark,
                }));
            }
            Ok(Statement::CreateClosure {
                dest,
                closed_over,
                branches,
            })
        }
        _ => Err(LoadError::unknown_tag("statement", mark)),
    }
}

/// Loads a sequence of statements, folding each one into `working` as
/// it is read — this is the "type-checking happens inline during
/// loading" discipline the whole loader follows.
fn load_statement_list<N: DocumentNode>(
    node: &N,
    working: &mut EnvironmentType,
) -> Result<Vec<Statement>, LoadError> {
    if !node.is_sequence() {
        return Err(LoadError::unexpected_kind(
            "a sequence of statements",
            node.start_mark(),
        ));
    }
    let mut statements = Vec::new();
    let size = node.sequence_size().unwrap_or(0);
    for i in 0..size {
        let item = node.sequence_at(i).expect("index within sequence_size");
        let stmt = load_statement(item)?;
        working.add_statement(&stmt, item.start_mark())?;
        statements.push(stmt);
    }
    Ok(statements)
}

/// Loads an invocation, dispatching on the node's tag, and folds it
/// into `working`.
fn load_invocation<N: DocumentNode>(
    node: &N,
    working: &mut EnvironmentType,
) -> Result<Invocation, LoadError> {
    require_mapping("an invocation", node)?;
    let mark = node.start_mark();
    let inv = match node.tag() {
        Some(tags::INVOKE_CLOSURE) => {
            let src = load_name(require_key("invoke-closure", "src", node)?)?;
            let branch = load_name(require_key("invoke-closure", "branch", node)?)?;
            let parameters = match node.mapping_get("parameters") {
                Some(n) => load_name_mapping(n)?,
                None => NameMapping::new(),
            };
            Invocation::InvokeClosure {
                src,
                branch,
                parameters,
            }
        }
        Some(tags::INVOKE_METHOD) => {
            let src = load_name(require_key("invoke-method", "src", node)?)?;
            let method = load_name(require_key("invoke-method", "method", node)?)?;
            let parameters = match node.mapping_get("parameters") {
                Some(n) => load_name_mapping(n)?,
                None => NameMapping::new(),
            };
            Invocation::InvokeMethod {
                src,
                method,
                parameters,
            }
        }
        _ => return Err(LoadError::unknown_tag("invocation", mark)),
    };
    working.add_invocation(&inv, mark)?;
    Ok(inv)
}

/// Loads a mapping of `branch: block` pairs into [`NamedBlocks`].
fn load_named_blocks<N: DocumentNode>(node: &N) -> Result<NamedBlocks, LoadError> {
    require_mapping("a mapping of branches", node)?;
    let mut named_blocks = NamedBlocks::new();
    let size = node.mapping_size().unwrap_or(0);
    for i in 0..size {
        let key = node.mapping_key_at(i).expect("index within mapping_size");
        let value = node.mapping_value_at(i).expect("index within mapping_size");
        let name = load_name(key)?;
        let block = load_block(value)?;
        if !named_blocks.add(name.clone(), block) {
            return Err(LoadError::duplicate_key(
                "branch",
                name.display_lossy(),
                key.start_mark(),
            ));
        }
    }
    Ok(named_blocks)
}

/// Loads a block: its declared `inputs`, its `statements`, and its
/// terminal `invocation`. The block is accepted only if the working
/// environment type (a copy of `inputs`, threaded through every
/// statement and the invocation) is empty afterward.
pub fn load_block<N: DocumentNode>(node: &N) -> Result<Block, LoadError> {
    require_mapping("a block", node)?;
    let inputs_node = require_key("block", "inputs", node)?;
    let inputs = load_environment_type(inputs_node)?;

    let statements_node = require_key("block", "statements", node)?;
    let mut working = inputs.copy();
    let statements = load_statement_list(statements_node, &mut working)?;

    let invocation_node = require_key("block", "invocation", node)?;
    let invocation = load_invocation(invocation_node, &mut working)?;

    if !working.is_empty() {
        return Err(LoadError::Type(crate::err::TypeError::UnconsumedNames {
            remaining: working.len(),
            mark: invocation_node.start_mark(),
        }));
    }

    Ok(Block::new(inputs, statements, invocation))
}

/// Loads a module: a block wrapped as the single branch `module` of a
/// fresh closure with an empty environment.
pub fn load_module<N: DocumentNode>(node: &N) -> Result<Entity, LoadError> {
    let block = load_block(node)?;
    let mut named_blocks = NamedBlocks::new();
    named_blocks
        .add(Name::from("module"), block)
        .then_some(())
        .expect("a fresh NamedBlocks has no `module` entry yet");
    Ok(Entity::closure(Environment::new(), named_blocks))
}

/// Wraps a document front end's own parse failure (a bare string,
/// since it precedes any node existing to carry a mark) as a
/// [`LoadError`].
pub fn document_error(message: impl Into<String>) -> LoadError {
    LoadError::Document(message.into())
}
