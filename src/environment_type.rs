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

//! Environment types: ordered `Name -> EntityType` maps, and the
//! incremental type-check operations (`add_statement`, `add_invocation`)
//! that thread a "working" environment type through a block as it is
//! loaded.

use crate::entity::Environment;
use crate::entity_type::EntityType;
use crate::err::{Mark, TypeError};
use crate::invocation::Invocation;
use crate::name::Name;
use crate::name_mapping::NameMapping;
use crate::statement::Statement;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentType(Vec<(Name, EntityType)>);

impl EnvironmentType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, name: &Name) -> Option<usize> {
        self.0.iter().position(|(n, _)| n == name)
    }

    pub fn get(&self, name: &Name) -> Option<&EntityType> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn at(&self, index: usize) -> Option<(&Name, &EntityType)> {
        self.0.get(index).map(|(n, t)| (n, t))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &EntityType)> {
        self.0.iter().map(|(n, t)| (n, t))
    }

    /// Add `name -> ty`. Fails if `name` is already present.
    #[must_use]
    pub fn add(&mut self, name: Name, ty: EntityType) -> Result<(), (Name, EntityType)> {
        if self.get(&name).is_some() {
            return Err((name, ty));
        }
        self.0.push((name, ty));
        Ok(())
    }

    /// Remove and return `name`'s type, if present.
    pub fn delete(&mut self, name: &Name) -> Option<EntityType> {
        let idx = self.position(name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Move exactly `keys` from `src` into `dest`. Atomic: on any
    /// failure, neither map is changed.
    pub fn extract(dest: &mut Self, src: &mut Self, keys: &[Name]) -> Result<(), ()> {
        for key in keys {
            if src.get(key).is_none() || dest.get(key).is_some() {
                return Err(());
            }
        }
        for key in keys {
            // unwrap safe: presence just verified above and `keys` has
            // no duplicates-driven re-check since each key is looked up
            // fresh against the still-untouched `src`/`dest`
            let ty = src.delete(key).expect("checked above");
            dest.add(key.clone(), ty).expect("checked above");
        }
        Ok(())
    }

    /// Does every `(name, ty)` in `self` match a `(name, entity)` in
    /// `env` with `ty` satisfied by that entity, and are the key sets
    /// equal?
    pub fn satisfied_by(&self, env: &Environment) -> bool {
        self.len() == env.len()
            && self
                .0
                .iter()
                .all(|(name, ty)| env.get(name).is_some_and(|e| ty.satisfied_by(e)))
    }

    /// Same-key-set, pointwise `have[k] <: self[k]`, independent of
    /// either map's insertion order.
    pub fn satisfied_by_type(&self, have: &Self) -> bool {
        self.len() == have.len()
            && self.0.iter().all(|(name, want)| {
                have.get(name)
                    .is_some_and(|have_ty| have_ty.is_subtype_of(want))
            })
    }

    /// `self <: other`, used when an environment type itself appears in
    /// a subtyping position (object elements, `extract`-built branch
    /// comparisons). Equivalent to `other.satisfied_by_type(self)`.
    pub fn is_subtype_of(&self, other: &Self) -> bool {
        other.satisfied_by_type(self)
    }

    /// Insert, for each `(from, to, ty)` in `mapping`, the key `from`
    /// with type `ty`. Fails (leaving `self` unchanged) if any `from`
    /// is already present.
    pub fn add_external_inputs(&mut self, mapping: &NameMapping) -> Result<(), Name> {
        for (from, _, _) in mapping.iter() {
            if self.get(from).is_some() {
                return Err(from.clone());
            }
        }
        for (from, _, ty) in mapping.iter() {
            self.add(from.clone(), ty.clone()).expect("checked above");
        }
        Ok(())
    }

    /// Insert, for each `(from, to, ty)` in `mapping`, the key `to`
    /// with type `ty`. Fails (leaving `self` unchanged) if any `to` is
    /// already present.
    pub fn add_internal_inputs(&mut self, mapping: &NameMapping) -> Result<(), Name> {
        for (_, to, _) in mapping.iter() {
            if self.get(to).is_some() {
                return Err(to.clone());
            }
        }
        for (_, to, ty) in mapping.iter() {
            self.add(to.clone(), ty.clone()).expect("checked above");
        }
        Ok(())
    }

    /// Fold `stmt` into `self`, mutating it per the type-check
    /// operation table. `mark` locates the statement for diagnostics.
    pub fn add_statement(&mut self, stmt: &Statement, mark: Mark) -> Result<(), TypeError> {
        match stmt {
            Statement::CreateAtom { dest } => self.bind(dest.clone(), EntityType::Any, mark),
            Statement::CreateLiteral { dest, .. } => {
                self.bind(dest.clone(), EntityType::Any, mark)
            }
            Statement::CreateMethod { dest, .. } => {
                self.bind(dest.clone(), EntityType::Any, mark)
            }
            Statement::CreateClosure {
                dest,
                closed_over,
                branches,
            } => {
                if branches.is_empty() {
                    return Err(TypeError::EmptyClosure { mark });
                }
                if self.get(dest).is_some() {
                    return Err(TypeError::AlreadyBound {
                        name: dest.clone(),
                        mark,
                    });
                }
                for name in closed_over.iter() {
                    if self.get(name).is_none() {
                        return Err(TypeError::NotBound {
                            name: name.clone(),
                            mark,
                        });
                    }
                }
                for name in closed_over.iter() {
                    self.delete(name);
                }
                self.add(dest.clone(), EntityType::Any).expect("checked above");
                Ok(())
            }
        }
    }

    fn bind(&mut self, dest: Name, ty: EntityType, mark: Mark) -> Result<(), TypeError> {
        self.add(dest.clone(), ty)
            .map_err(|_| TypeError::AlreadyBound { name: dest, mark })
    }

    /// Fold `inv` into `self`: remove `src`, then each `from` of
    /// `parameters`, in sequence. A name used as both `src` and a
    /// `from` therefore fails on its second removal.
    pub fn add_invocation(&mut self, inv: &Invocation, mark: Mark) -> Result<(), TypeError> {
        let (src, parameters) = match inv {
            Invocation::InvokeClosure { src, parameters, .. } => (src, parameters),
            Invocation::InvokeMethod { src, parameters, .. } => (src, parameters),
        };
        self.delete(src).ok_or_else(|| TypeError::NotBound {
            name: src.clone(),
            mark,
        })?;
        for (from, _, _) in parameters.iter() {
            self.delete(from).ok_or_else(|| TypeError::NotBound {
                name: from.clone(),
                mark,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_rejects_duplicate() {
        let mut env = EnvironmentType::new();
        env.add(Name::from("a"), EntityType::any()).unwrap();
        assert!(env.add(Name::from("a"), EntityType::any()).is_err());
    }

    #[test]
    fn delete_round_trips_with_add() {
        let mut env = EnvironmentType::new();
        env.add(Name::from("a"), EntityType::any()).unwrap();
        let before = env.copy();
        let removed = env.delete(&Name::from("a"));
        assert_eq!(removed, Some(EntityType::any()));
        env.add(Name::from("a"), EntityType::any()).unwrap();
        assert_eq!(env, before);
    }

    #[test]
    fn extract_is_atomic_on_failure() {
        let mut dest = EnvironmentType::new();
        let mut src = EnvironmentType::new();
        src.add(Name::from("a"), EntityType::any()).unwrap();
        let dest_before = dest.copy();
        let src_before = src.copy();
        let result = EnvironmentType::extract(&mut dest, &mut src, &[Name::from("missing")]);
        assert!(result.is_err());
        similar_asserts::assert_eq!(dest, dest_before);
        similar_asserts::assert_eq!(src, src_before);
    }

    #[test]
    fn extract_moves_exactly_the_requested_keys() {
        let mut dest = EnvironmentType::new();
        let mut src = EnvironmentType::new();
        src.add(Name::from("a"), EntityType::any()).unwrap();
        src.add(Name::from("b"), EntityType::any()).unwrap();
        EnvironmentType::extract(&mut dest, &mut src, &[Name::from("a")]).unwrap();
        assert_eq!(dest.len(), 1);
        assert!(dest.get(&Name::from("a")).is_some());
        assert_eq!(src.len(), 1);
        assert!(src.get(&Name::from("b")).is_some());
    }

    #[test]
    fn satisfied_by_type_is_order_insensitive() {
        let mut a = EnvironmentType::new();
        a.add(Name::from("a"), EntityType::any()).unwrap();
        a.add(Name::from("b"), EntityType::any()).unwrap();
        let mut b = EnvironmentType::new();
        b.add(Name::from("b"), EntityType::any()).unwrap();
        b.add(Name::from("a"), EntityType::any()).unwrap();
        assert!(a.satisfied_by_type(&b));
        assert!(b.satisfied_by_type(&a));
    }

    #[test]
    fn add_external_vs_internal_inputs_key_by_from_or_to() {
        let mut mapping = NameMapping::new();
        mapping.add(Name::from("a"), Name::from("x"), EntityType::any());
        mapping.add(Name::from("b"), Name::from("y"), EntityType::any());

        let mut external = EnvironmentType::new();
        external.add_external_inputs(&mapping).unwrap();
        assert!(external.get(&Name::from("a")).is_some());
        assert!(external.get(&Name::from("x")).is_none());

        let mut internal = EnvironmentType::new();
        internal.add_internal_inputs(&mapping).unwrap();
        assert!(internal.get(&Name::from("x")).is_some());
        assert!(internal.get(&Name::from("a")).is_none());
    }

    #[test]
    fn invocation_removes_src_then_parameters_in_sequence() {
        let mut env = EnvironmentType::new();
        env.add(Name::from("a"), EntityType::any()).unwrap();
        env.add(Name::from("b"), EntityType::any()).unwrap();
        let mut parameters = NameMapping::new();
        parameters.add(Name::from("a"), Name::from("c"), EntityType::any());
        let inv = Invocation::InvokeClosure {
            src: Name::from("a"),
            branch: Name::from("x"),
            parameters,
        };
        // `a` is both src and a `from`: the second removal must fail
        let result = env.add_invocation(&inv, Mark::NONE);
        assert!(result.is_err());
    }

    #[test]
    fn invocation_consumes_src_and_all_parameter_froms() {
        let mut env = EnvironmentType::new();
        env.add(Name::from("a"), EntityType::any()).unwrap();
        env.add(Name::from("b"), EntityType::any()).unwrap();
        let mut parameters = NameMapping::new();
        parameters.add(Name::from("b"), Name::from("c"), EntityType::any());
        let inv = Invocation::InvokeClosure {
            src: Name::from("a"),
            branch: Name::from("x"),
            parameters,
        };
        env.add_invocation(&inv, Mark::NONE).unwrap();
        assert!(env.is_empty());
    }
}
