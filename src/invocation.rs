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

//! Invocations: the single transfer of control that terminates a block.

use crate::name::Name;
use crate::name_mapping::NameMapping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    InvokeClosure {
        src: Name,
        branch: Name,
        parameters: NameMapping,
    },
    InvokeMethod {
        src: Name,
        method: Name,
        parameters: NameMapping,
    },
}

impl Invocation {
    pub fn src(&self) -> &Name {
        match self {
            Self::InvokeClosure { src, .. } | Self::InvokeMethod { src, .. } => src,
        }
    }

    pub fn parameters(&self) -> &NameMapping {
        match self {
            Self::InvokeClosure { parameters, .. } | Self::InvokeMethod { parameters, .. } => {
                parameters
            }
        }
    }
}
