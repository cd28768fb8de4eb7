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

//! The seam between the loader and whatever reads the tree-structured
//! textual notation. The loader (`loader::module`) is written entirely
//! against [`DocumentNode`]/[`DocumentStream`]; [`crate::loader::text_format`]
//! is the one concrete implementation shipped here, but any other
//! front end implementing these traits can be substituted without
//! touching the type checker.

use crate::err::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

/// A node in a parsed tree document: a scalar, a sequence, or a
/// mapping, optionally carrying a tag and always carrying a start
/// position for diagnostics.
///
/// Mapping pairs are exposed by index, in document order, and are
/// **not** deduplicated here — duplicate-key detection is strictly a
/// loader/IR concern (see `EnvironmentType::add` and friends).
pub trait DocumentNode: Sized {
    fn kind(&self) -> NodeKind;
    fn tag(&self) -> Option<&str>;
    fn has_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }
    fn start_mark(&self) -> Mark;

    fn scalar_content(&self) -> Option<&[u8]>;
    fn scalar_size(&self) -> Option<usize> {
        self.scalar_content().map(<[u8]>::len)
    }

    fn sequence_size(&self) -> Option<usize>;
    fn sequence_at(&self, index: usize) -> Option<&Self>;

    fn mapping_size(&self) -> Option<usize>;
    fn mapping_key_at(&self, index: usize) -> Option<&Self>;
    fn mapping_value_at(&self, index: usize) -> Option<&Self>;
    /// Look up the first mapping pair whose (scalar) key content equals
    /// `key`. Returns `None` both when this node isn't a mapping and
    /// when the key is absent, matching the "missing node" sentinel of
    /// the external interface.
    fn mapping_get(&self, key: &str) -> Option<&Self> {
        let size = self.mapping_size()?;
        for i in 0..size {
            let k = self.mapping_key_at(i)?;
            if k.scalar_content() == Some(key.as_bytes()) {
                return self.mapping_value_at(i);
            }
        }
        None
    }

    fn is_scalar(&self) -> bool {
        self.kind() == NodeKind::Scalar
    }
    fn is_sequence(&self) -> bool {
        self.kind() == NodeKind::Sequence
    }
    fn is_mapping(&self) -> bool {
        self.kind() == NodeKind::Mapping
    }
}

/// The outcome of asking a stream for its next document.
pub enum ParseOutcome<N> {
    Document(N),
    NoMoreDocuments,
    Error,
}

/// A source of zero or more tree documents, read in order.
pub trait DocumentStream {
    type Node: DocumentNode;

    fn parse_document(&mut self) -> ParseOutcome<Self::Node>;

    /// The most recent parse error, if the last `parse_document` call
    /// returned `ParseOutcome::Error`. Overwritten by the next call.
    fn last_error(&self) -> Option<&str>;
}
