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

//! Environment-type mappings: ordered `Name -> EnvironmentType` maps,
//! used to describe a closure's branch signatures.

use crate::environment_type::EnvironmentType;
use crate::name::Name;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentTypeMapping(Vec<(Name, EnvironmentType)>);

impl EnvironmentTypeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &Name) -> Option<&EnvironmentType> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Add `name -> ty`. Fails if `name` is already present.
    #[must_use]
    pub fn add(&mut self, name: Name, ty: EnvironmentType) -> bool {
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push((name, ty));
        true
    }

    pub fn at(&self, index: usize) -> Option<(&Name, &EnvironmentType)> {
        self.0.get(index).map(|(n, t)| (n, t))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &EnvironmentType)> {
        self.0.iter().map(|(n, t)| (n, t))
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }
}
