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

//! A minimal flow-style tree-document reader.
//!
//! This is deliberately not a general YAML engine: no block-style
//! indentation, no anchors or aliases, no multi-line scalars beyond
//! quoted escapes. It reads just enough of the notation used by this
//! repository's fixtures — `{ key: value, ... }` mappings, `[ a, b ]`
//! sequences, bareword/quoted scalars, an optional leading `!tag`, and
//! `---`-separated documents — to drive the loader end to end.
//!
//! Mapping pairs are stored in the order they're read and are **not**
//! deduplicated; duplicate-key rejection happens one layer up, in the
//! IR collections the loader builds from these nodes.

use crate::err::Mark;
use crate::loader::document::{DocumentNode, DocumentStream, NodeKind, ParseOutcome};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    Scalar(Vec<u8>),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

/// A node produced by [`Stream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: Option<String>,
    mark: Mark,
    data: NodeData,
}

impl DocumentNode for Node {
    fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Scalar(_) => NodeKind::Scalar,
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Mapping(_) => NodeKind::Mapping,
        }
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn start_mark(&self) -> Mark {
        self.mark
    }

    fn scalar_content(&self) -> Option<&[u8]> {
        match &self.data {
            NodeData::Scalar(bytes) => Some(bytes),
            _ => None,
        }
    }

    fn sequence_size(&self) -> Option<usize> {
        match &self.data {
            NodeData::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }

    fn sequence_at(&self, index: usize) -> Option<&Self> {
        match &self.data {
            NodeData::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    fn mapping_size(&self) -> Option<usize> {
        match &self.data {
            NodeData::Mapping(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    fn mapping_key_at(&self, index: usize) -> Option<&Self> {
        match &self.data {
            NodeData::Mapping(pairs) => pairs.get(index).map(|(k, _)| k),
            _ => None,
        }
    }

    fn mapping_value_at(&self, index: usize) -> Option<&Self> {
        match &self.data {
            NodeData::Mapping(pairs) => pairs.get(index).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Reads zero or more documents out of an in-memory buffer.
pub struct Stream {
    bytes: Vec<u8>,
    pos: usize,
    line: usize,
    col: usize,
    last_error: Option<String>,
}

impl Stream {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
            line: 1,
            col: 1,
            last_error: None,
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes().to_vec())
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(bytes))
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn mark(&self) -> Mark {
        Mark::new(self.line, self.col, self.pos)
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn at_document_separator(&self) -> bool {
        self.peek() == Some(b'-')
            && self.peek_at(1) == Some(b'-')
            && self.peek_at(2) == Some(b'-')
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b',') => {
                    self.bump();
                }
                Some(b'#') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn is_bareword_char(c: u8) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, b'-' | b'_' | b'.' | b'/')
    }

    fn parse_tag(&mut self) -> Result<Option<String>, String> {
        if self.peek() != Some(b'!') {
            return Ok(None);
        }
        let start = self.mark();
        self.bump();
        let mut tag = String::from("!");
        while let Some(c) = self.peek() {
            if Self::is_bareword_char(c) || c == b'!' {
                tag.push(c as char);
                self.bump();
            } else {
                break;
            }
        }
        if tag == "!" {
            return Err(format!("empty tag at {start}"));
        }
        self.skip_ws_and_comments();
        Ok(Some(tag))
    }

    fn parse_quoted_scalar(&mut self) -> Result<Vec<u8>, String> {
        let start = self.mark();
        self.bump(); // opening quote
        let mut out = Vec::new();
        loop {
            match self.bump() {
                None => return Err(format!("unterminated string starting at {start}")),
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    Some(b'0') => out.push(0),
                    Some(b'n') => out.push(b'\n'),
                    Some(b't') => out.push(b'\t'),
                    Some(b'\\') => out.push(b'\\'),
                    Some(b'"') => out.push(b'"'),
                    Some(b'x') => {
                        let hi = self.bump().ok_or_else(|| format!("bad \\x escape at {start}"))?;
                        let lo = self.bump().ok_or_else(|| format!("bad \\x escape at {start}"))?;
                        let byte = u8::from_str_radix(&format!("{}{}", hi as char, lo as char), 16)
                            .map_err(|_| format!("bad \\x escape at {start}"))?;
                        out.push(byte);
                    }
                    Some(other) => return Err(format!("unknown escape `\\{}` at {start}", other as char)),
                    None => return Err(format!("unterminated escape at {start}")),
                },
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    fn parse_bareword_scalar(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(c) = self.peek() {
            if Self::is_bareword_char(c) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn parse_value(&mut self) -> Result<Node, String> {
        self.skip_ws_and_comments();
        let tag = self.parse_tag()?;
        self.skip_ws_and_comments();
        let mark = self.mark();
        match self.peek() {
            Some(b'{') => self.parse_mapping(tag, mark),
            Some(b'[') => self.parse_sequence(tag, mark),
            Some(b'"') => {
                let content = self.parse_quoted_scalar()?;
                Ok(Node {
                    tag,
                    mark,
                    data: NodeData::Scalar(content),
                })
            }
            Some(c) if Self::is_bareword_char(c) => {
                let content = self.parse_bareword_scalar();
                Ok(Node {
                    tag,
                    mark,
                    data: NodeData::Scalar(content),
                })
            }
            Some(other) => Err(format!("unexpected character `{}` at {mark}", other as char)),
            None => Err(format!("unexpected end of input at {mark}")),
        }
    }

    fn parse_mapping(&mut self, tag: Option<String>, mark: Mark) -> Result<Node, String> {
        self.bump(); // `{`
        let mut pairs = Vec::new();
        loop {
            self.skip_ws_and_comments();
            if self.peek() == Some(b'}') {
                self.bump();
                break;
            }
            if self.peek().is_none() {
                return Err(format!("unterminated mapping starting at {mark}"));
            }
            let key = self.parse_value()?;
            self.skip_ws_and_comments();
            if self.peek() != Some(b':') {
                return Err(format!(
                    "expected `:` after mapping key at {}",
                    key.start_mark()
                ));
            }
            self.bump();
            let value = self.parse_value()?;
            pairs.push((key, value));
        }
        Ok(Node {
            tag,
            mark,
            data: NodeData::Mapping(pairs),
        })
    }

    fn parse_sequence(&mut self, tag: Option<String>, mark: Mark) -> Result<Node, String> {
        self.bump(); // `[`
        let mut items = Vec::new();
        loop {
            self.skip_ws_and_comments();
            if self.peek() == Some(b']') {
                self.bump();
                break;
            }
            if self.peek().is_none() {
                return Err(format!("unterminated sequence starting at {mark}"));
            }
            items.push(self.parse_value()?);
        }
        Ok(Node {
            tag,
            mark,
            data: NodeData::Sequence(items),
        })
    }
}

impl DocumentStream for Stream {
    type Node = Node;

    fn parse_document(&mut self) -> ParseOutcome<Node> {
        self.skip_ws_and_comments();
        while self.at_document_separator() {
            self.bump();
            self.bump();
            self.bump();
            self.skip_ws_and_comments();
        }
        if self.peek().is_none() {
            return ParseOutcome::NoMoreDocuments;
        }
        match self.parse_value() {
            Ok(node) => ParseOutcome::Document(node),
            Err(e) => {
                self.last_error = Some(e);
                ParseOutcome::Error
            }
        }
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_tagged_mapping_with_nested_sequence() {
        let mut stream = Stream::from_str(
            r#"!s0!create-closure { dest: x, closed-over: [a, b], branches: {} }"#,
        );
        let node = match stream.parse_document() {
            ParseOutcome::Document(n) => n,
            _ => panic!("expected a document"),
        };
        assert!(node.has_tag("!s0!create-closure"));
        assert!(node.is_mapping());
        assert_eq!(
            node.mapping_get("dest").unwrap().scalar_content(),
            Some(&b"x"[..])
        );
        let closed_over = node.mapping_get("closed-over").unwrap();
        assert_eq!(closed_over.sequence_size(), Some(2));
    }

    #[test]
    fn preserves_duplicate_mapping_keys() {
        let mut stream = Stream::from_str("{ a: x, a: y }");
        let node = match stream.parse_document() {
            ParseOutcome::Document(n) => n,
            _ => panic!("expected a document"),
        };
        assert_eq!(node.mapping_size(), Some(2));
    }

    #[test]
    fn quoted_scalar_supports_escapes() {
        let mut stream = Stream::from_str(r#""a\0b\x41""#);
        let node = match stream.parse_document() {
            ParseOutcome::Document(n) => n,
            _ => panic!("expected a document"),
        };
        assert_eq!(node.scalar_content(), Some(&b"a\0bA"[..]));
    }

    #[test]
    fn reads_multiple_documents_separated_by_marker() {
        let mut stream = Stream::from_str("a\n---\nb\n");
        let first = match stream.parse_document() {
            ParseOutcome::Document(n) => n,
            _ => panic!("expected a document"),
        };
        assert_eq!(first.scalar_content(), Some(&b"a"[..]));
        let second = match stream.parse_document() {
            ParseOutcome::Document(n) => n,
            _ => panic!("expected a document"),
        };
        assert_eq!(second.scalar_content(), Some(&b"b"[..]));
        assert!(matches!(stream.parse_document(), ParseOutcome::NoMoreDocuments));
    }
}
