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

//! Entity types and their subtyping relation.
//!
//! `any` is the top type. `closure` and `method` are contravariant in
//! their input positions; `object` is covariant in its element types.
//! See [`EntityType::is_subtype_of`] for the exact rule per variant.

use crate::entity::Entity;
use crate::environment_type::EnvironmentType;
use crate::environment_type_mapping::EnvironmentTypeMapping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityType {
    /// Satisfied by any entity.
    Any,
    /// Satisfied by a closure whose branches are a superset of (or
    /// equal to) these, with each branch's actual input type a
    /// supertype of the declared one.
    Closure { branches: EnvironmentTypeMapping },
    /// Satisfied by a method whose body accepts at least `inputs`.
    Method { inputs: EnvironmentType },
    /// Satisfied by an object whose fields satisfy `elements`
    /// pointwise.
    Object { elements: EnvironmentType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTypeKind {
    Any,
    Closure,
    Method,
    Object,
}

impl EntityType {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn closure(branches: EnvironmentTypeMapping) -> Self {
        Self::Closure { branches }
    }

    pub fn method(inputs: EnvironmentType) -> Self {
        Self::Method { inputs }
    }

    pub fn object(elements: EnvironmentType) -> Self {
        Self::Object { elements }
    }

    pub fn kind(&self) -> EntityTypeKind {
        match self {
            Self::Any => EntityTypeKind::Any,
            Self::Closure { .. } => EntityTypeKind::Closure,
            Self::Method { .. } => EntityTypeKind::Method,
            Self::Object { .. } => EntityTypeKind::Object,
        }
    }

    /// `self <: other`: does every entity satisfying `self` also
    /// satisfy `other`? Equivalently, "`self` meets the requirement
    /// `other`".
    pub fn is_subtype_of(&self, other: &Self) -> bool {
        match (self, other) {
            (_, Self::Any) => true,
            (Self::Any, _) => false,
            (Self::Closure { branches: b1 }, Self::Closure { branches: b2 }) => {
                b1.len() == b2.len()
                    && b2.iter().all(|(name, req_env)| {
                        // contravariant: the declared branch (b2, the
                        // requirement) must be a supertype of the
                        // offered branch (b1) for that same branch name
                        b1.get(name)
                            .is_some_and(|have_env| req_env.is_subtype_of(have_env))
                    })
            }
            (Self::Method { inputs: i1 }, Self::Method { inputs: i2 }) => {
                // contravariant in inputs
                i2.is_subtype_of(i1)
            }
            (Self::Object { elements: e1 }, Self::Object { elements: e2 }) => {
                // covariant in elements
                e1.is_subtype_of(e2)
            }
            _ => false,
        }
    }

    /// Does `self` (as a requirement) accept `entity`?
    pub fn satisfied_by(&self, entity: &Entity) -> bool {
        match self {
            Self::Any => true,
            Self::Closure { branches } => match entity {
                Entity::Closure { named_blocks, .. } => branches.iter().all(|(name, req_env)| {
                    named_blocks
                        .get(name)
                        .is_some_and(|block| req_env.is_subtype_of(block.inputs()))
                }) && branches.len() == named_blocks.len(),
                _ => false,
            },
            Self::Method { inputs } => match entity {
                Entity::Method { block, .. } => inputs.is_subtype_of(block.inputs()),
                _ => false,
            },
            Self::Object { elements } => match entity {
                Entity::Object { fields } => elements.satisfied_by(fields),
                _ => false,
            },
        }
    }

    /// Does `have` (an offered type) meet this requirement?
    pub fn satisfied_by_type(&self, have: &Self) -> bool {
        have.is_subtype_of(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn any_is_top() {
        let closure = EntityType::closure(EnvironmentTypeMapping::new());
        assert!(closure.is_subtype_of(&EntityType::any()));
        assert!(EntityType::any().is_subtype_of(&EntityType::any()));
        assert!(!EntityType::any().is_subtype_of(&closure));
    }

    #[test]
    fn subtyping_is_reflexive() {
        let m = EnvironmentType::new();
        let method = EntityType::method(m.clone());
        assert!(method.is_subtype_of(&method));
        let object = EntityType::object(m);
        assert!(object.is_subtype_of(&object));
    }

    #[test]
    fn kind_identifies_each_variant() {
        assert_eq!(EntityType::any().kind(), EntityTypeKind::Any);
        assert_eq!(
            EntityType::closure(EnvironmentTypeMapping::new()).kind(),
            EntityTypeKind::Closure
        );
        assert_eq!(
            EntityType::method(EnvironmentType::new()).kind(),
            EntityTypeKind::Method
        );
        assert_eq!(
            EntityType::object(EnvironmentType::new()).kind(),
            EntityTypeKind::Object
        );
    }

    #[test]
    fn method_inputs_are_contravariant() {
        use crate::name::Name;
        let mut narrow = EnvironmentType::new();
        narrow.add(Name::from("a"), EntityType::any()).unwrap();
        let wide = EnvironmentType::new();
        // a method accepting `wide` (fewer requirements) can stand in
        // for one that only promises `narrow`
        let accepts_wide = EntityType::method(wide);
        let accepts_narrow = EntityType::method(narrow);
        assert!(accepts_wide.is_subtype_of(&accepts_narrow));
        assert!(!accepts_narrow.is_subtype_of(&accepts_wide));
    }
}
