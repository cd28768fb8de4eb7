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

//! Blocks: a typed sequence of statements terminated by an invocation.

use crate::environment_type::EnvironmentType;
use crate::invocation::Invocation;
use crate::name::Name;
use crate::statement::Statement;

/// A block owns its declared input type, its statement list, and its
/// terminal invocation. Construction is the loader's job: a `Block` is
/// only ever built once its working environment type has been checked
/// empty after the invocation (see `loader::module::load_block`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    inputs: EnvironmentType,
    statements: Vec<Statement>,
    invocation: Invocation,
}

impl Block {
    /// Construct a block directly from already-checked parts. Exposed
    /// for the loader and for tests that build blocks by hand; callers
    /// are responsible for the invariant that `invocation` leaves
    /// `inputs`, after all `statements` are folded in, empty.
    pub fn new(inputs: EnvironmentType, statements: Vec<Statement>, invocation: Invocation) -> Self {
        Self {
            inputs,
            statements,
            invocation,
        }
    }

    pub fn inputs(&self) -> &EnvironmentType {
        &self.inputs
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }
}

/// An ordered, duplicate-free collection of named blocks: a closure's
/// set of branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedBlocks(Vec<(Name, Block)>);

impl NamedBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &Name) -> Option<&Block> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    /// Add `name -> block`. Fails if `name` is already present.
    #[must_use]
    pub fn add(&mut self, name: Name, block: Block) -> bool {
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push((name, block));
        true
    }

    pub fn at(&self, index: usize) -> Option<(&Name, &Block)> {
        self.0.get(index).map(|(n, b)| (n, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Block)> {
        self.0.iter().map(|(n, b)| (n, b))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity_type::EntityType;
    use crate::name_mapping::NameMapping;

    fn trivial_block() -> Block {
        let mut inputs = EnvironmentType::new();
        inputs.add(Name::from("self"), EntityType::any()).unwrap();
        let invocation = Invocation::InvokeClosure {
            src: Name::from("self"),
            branch: Name::from("body"),
            parameters: NameMapping::new(),
        };
        Block::new(inputs, Vec::new(), invocation)
    }

    #[test]
    fn named_blocks_reject_duplicate_branch() {
        let mut nb = NamedBlocks::new();
        assert!(nb.add(Name::from("module"), trivial_block()));
        assert!(!nb.add(Name::from("module"), trivial_block()));
    }
}
