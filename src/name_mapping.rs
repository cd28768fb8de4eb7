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

//! Name mappings: the `(from, to, type)` triples used by invocation
//! parameters and by [`crate::environment_type::EnvironmentType::add_external_inputs`]
//! / [`crate::environment_type::EnvironmentType::add_internal_inputs`].

use crate::entity_type::EntityType;
use crate::name::Name;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    from: Name,
    to: Name,
    ty: EntityType,
}

/// An ordered sequence of `(from, to, type)` triples. `from` values are
/// unique across the mapping, and so are `to` values (independently of
/// each other): a single name may appear as a `from` in one entry and a
/// `to` in another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping(Vec<Entry>);

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `(from, to, ty)`. Fails if `from` is already a source in
    /// this mapping, or `to` is already a target.
    #[must_use]
    pub fn add(&mut self, from: Name, to: Name, ty: EntityType) -> bool {
        if self.get(&from).is_some() || self.get_from(&to).is_some() {
            return false;
        }
        self.0.push(Entry { from, to, ty });
        true
    }

    /// Look up the entry whose `from` is `name`.
    pub fn get(&self, from: &Name) -> Option<(&Name, &EntityType)> {
        self.0
            .iter()
            .find(|e| &e.from == from)
            .map(|e| (&e.to, &e.ty))
    }

    /// Look up the entry whose `to` is `name`.
    pub fn get_from(&self, to: &Name) -> Option<(&Name, &EntityType)> {
        self.0
            .iter()
            .find(|e| &e.to == to)
            .map(|e| (&e.from, &e.ty))
    }

    pub fn at(&self, index: usize) -> Option<(&Name, &Name, &EntityType)> {
        self.0.get(index).map(|e| (&e.from, &e.to, &e.ty))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Name, &EntityType)> {
        self.0.iter().map(|e| (&e.from, &e.to, &e.ty))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_duplicate_from_and_to() {
        let mut m = NameMapping::new();
        assert!(m.add(Name::from("a"), Name::from("x"), EntityType::any()));
        assert!(!m.add(Name::from("a"), Name::from("y"), EntityType::any()));
        assert!(!m.add(Name::from("b"), Name::from("x"), EntityType::any()));
        assert!(m.add(Name::from("b"), Name::from("y"), EntityType::any()));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn lookup_both_directions() {
        let mut m = NameMapping::new();
        m.add(Name::from("a"), Name::from("x"), EntityType::any());
        assert_eq!(m.get(&Name::from("a")).unwrap().0, &Name::from("x"));
        assert_eq!(m.get_from(&Name::from("x")).unwrap().0, &Name::from("a"));
        assert!(m.get(&Name::from("x")).is_none());
    }
}
