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

//! The module loader: a document front end (this crate ships one, but
//! the loader is generic over any [`document::DocumentNode`] /
//! [`document::DocumentStream`] implementation) plus the recursive
//! descent that turns a tree document into type-checked S0 IR.

pub mod document;
pub mod module;
pub mod text_format;

pub use document::{DocumentNode, DocumentStream, NodeKind, ParseOutcome};
pub use module::{load_block, load_module, S0_TAG_PREFIX};
