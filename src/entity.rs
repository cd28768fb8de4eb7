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

//! Entities: the runtime-shaped values that statements construct.
//!
//! This module fixes the *shape* of entities (what an atom, closure,
//! literal, method, or object owns) without giving them execution
//! semantics; running a block is out of scope here.

use crate::block::{Block, NamedBlocks};
use crate::name::Name;
use std::sync::Arc;

/// An opaque value with identity equality: two atoms are equal iff
/// they are the same allocation, never by any structural comparison.
#[derive(Debug, Clone)]
pub struct Atom(Arc<()>);

impl Atom {
    pub fn new() -> Self {
        Self(Arc::new(()))
    }
}

impl Default for Atom {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Atom {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Atom(Atom),
    Closure {
        env: Environment,
        named_blocks: NamedBlocks,
    },
    Literal {
        content: Box<[u8]>,
    },
    Method {
        self_name: Name,
        block: Arc<Block>,
    },
    Object {
        fields: Environment,
    },
}

impl Entity {
    pub fn atom() -> Self {
        Self::Atom(Atom::new())
    }

    pub fn closure(env: Environment, named_blocks: NamedBlocks) -> Self {
        Self::Closure { env, named_blocks }
    }

    pub fn literal(content: impl Into<Box<[u8]>>) -> Self {
        Self::Literal {
            content: content.into(),
        }
    }

    pub fn method(self_name: Name, block: Arc<Block>) -> Self {
        Self::Method { self_name, block }
    }

    pub fn object(fields: Environment) -> Self {
        Self::Object { fields }
    }
}

/// An ordered `Name -> Entity` map: the live bindings a block runs
/// against, and also the field map backing an `object` entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(Vec<(Name, Entity)>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &Name) -> Option<&Entity> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Add `name -> entity`. Fails if `name` is already present.
    #[must_use]
    pub fn add(&mut self, name: Name, entity: Entity) -> bool {
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push((name, entity));
        true
    }

    /// Remove and return `name`'s entity, if present.
    pub fn delete(&mut self, name: &Name) -> Option<Entity> {
        let idx = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn at(&self, index: usize) -> Option<(&Name, &Entity)> {
        self.0.get(index).map(|(n, e)| (n, e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Entity)> {
        self.0.iter().map(|(n, e)| (n, e))
    }
}
