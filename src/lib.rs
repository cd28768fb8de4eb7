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

//! Core implementation of S0: a minimal typed, capability-oriented
//! intermediate calculus.
//!
//! The crate is organized bottom-up, matching how a program is built:
//! names and name collections (`name`, `name_mapping`), entity types
//! and their subtyping (`entity_type`), environment types and the
//! incremental type-check operations (`environment_type`,
//! `environment_type_mapping`), the IR itself (`statement`,
//! `invocation`, `block`, `entity`), and finally the module loader
//! (`loader`), which reads a tree-structured document and produces a
//! type-checked module.

pub mod block;
pub mod entity;
pub mod entity_type;
pub mod environment_type;
pub mod environment_type_mapping;
pub mod err;
pub mod invocation;
pub mod loader;
pub mod name;
pub mod name_mapping;
pub mod statement;

pub use block::{Block, NamedBlocks};
pub use entity::{Atom, Entity, Environment};
pub use entity_type::{EntityType, EntityTypeKind};
pub use environment_type::EnvironmentType;
pub use environment_type_mapping::EnvironmentTypeMapping;
pub use err::{LoadError, LoadErrorReport, Mark, TypeError};
pub use invocation::Invocation;
pub use name::{Name, NameSet};
pub use name_mapping::NameMapping;
pub use statement::Statement;
