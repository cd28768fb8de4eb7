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

//! Statements: the constructors a block's body is made of.

use crate::block::{Block, NamedBlocks};
use crate::name::{Name, NameSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateAtom {
        dest: Name,
    },
    CreateClosure {
        dest: Name,
        closed_over: NameSet,
        branches: NamedBlocks,
    },
    CreateLiteral {
        dest: Name,
        content: Box<[u8]>,
    },
    CreateMethod {
        dest: Name,
        self_input: Name,
        body: Box<Block>,
    },
}

impl Statement {
    pub fn dest(&self) -> &Name {
        match self {
            Self::CreateAtom { dest }
            | Self::CreateClosure { dest, .. }
            | Self::CreateLiteral { dest, .. }
            | Self::CreateMethod { dest, .. } => dest,
        }
    }
}
