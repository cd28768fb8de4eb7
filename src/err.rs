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

//! Error types shared by the type checker and the loader.

use crate::name::Name;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A 1-based source position, used to locate diagnostics inside a loaded
/// document. `line` and `column` both start at 1; `offset` is the byte
/// offset `line`/`column` correspond to, used only to build a
/// [`SourceSpan`] for rendering. `(0, 0, 0)` means "no position
/// available" (used by errors raised directly against the in-memory
/// API, with no enclosing document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mark {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Mark {
    pub const NONE: Mark = Mark {
        line: 0,
        column: 0,
        offset: 0,
    };

    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// A zero-length span at this mark's byte offset, for labeling a
    /// rendered snippet.
    pub fn span(&self) -> SourceSpan {
        (self.offset, 0).into()
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::NONE {
            write!(f, "<unknown position>")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised by the type checker while folding a statement or an
/// invocation into a working [`crate::environment_type::EnvironmentType`].
///
/// These are the errors named in the type-check operation tables: a
/// `dest` that's already bound, a referenced name that's missing, or a
/// block whose working environment type isn't empty after its terminal
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TypeError {
    #[error("name `{name}` is already bound at {mark}")]
    AlreadyBound { name: Name, mark: Mark },

    #[error("name `{name}` is not bound at {mark}")]
    NotBound { name: Name, mark: Mark },

    #[error("`create-closure` needs at least one branch at {mark}")]
    EmptyClosure { mark: Mark },

    #[error("block has {remaining} unconsumed name(s) after its invocation at {mark}")]
    UnconsumedNames { remaining: usize, mark: Mark },
}

impl TypeError {
    /// The position this error was detected at, for labeling a rendered
    /// snippet.
    pub fn mark(&self) -> Mark {
        match self {
            Self::AlreadyBound { mark, .. }
            | Self::NotBound { mark, .. }
            | Self::EmptyClosure { mark }
            | Self::UnconsumedNames { mark, .. } => *mark,
        }
    }
}

/// Errors raised while loading a tree document into S0 IR.
///
/// `LoadError` is the single type a caller needs to render a rich
/// diagnostic (via `miette`) for a failed load; it subsumes the
/// structural, tag-dispatch, duplicate-key, and type-check failures the
/// loader can produce, each carrying the source position at which it was
/// detected.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("expected {expected} at {mark}")]
    UnexpectedKind { expected: &'static str, mark: Mark },

    #[error("{what} requires a `{key}` at {mark}")]
    MissingKey {
        what: &'static str,
        key: &'static str,
        mark: Mark,
    },

    #[error("unknown {what} at {mark}")]
    UnknownTag { what: &'static str, mark: Mark },

    #[error("duplicate {what} `{name}` at {mark}")]
    DuplicateKey {
        what: &'static str,
        name: String,
        mark: Mark,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeError),

    #[error("could not parse document: {0}")]
    Document(String),
}

impl LoadError {
    pub fn unexpected_kind(expected: &'static str, mark: Mark) -> Self {
        Self::UnexpectedKind { expected, mark }
    }

    pub fn missing_key(what: &'static str, key: &'static str, mark: Mark) -> Self {
        Self::MissingKey { what, key, mark }
    }

    pub fn unknown_tag(what: &'static str, mark: Mark) -> Self {
        Self::UnknownTag { what, mark }
    }

    pub fn duplicate_key(what: &'static str, name: impl Into<String>, mark: Mark) -> Self {
        Self::DuplicateKey {
            what,
            name: name.into(),
            mark,
        }
    }

    /// The position this error was detected at. `Document` errors carry
    /// no mark of their own, since they're raised by the document front
    /// end before any node exists to attach one to.
    pub fn mark(&self) -> Mark {
        match self {
            Self::UnexpectedKind { mark, .. }
            | Self::MissingKey { mark, .. }
            | Self::UnknownTag { mark, .. }
            | Self::DuplicateKey { mark, .. } => *mark,
            Self::Type(e) => e.mark(),
            Self::Document(_) => Mark::NONE,
        }
    }

    /// Pair this error with the document source it was raised against,
    /// producing a [`Diagnostic`] whose `source_code()`/`labels()` are
    /// backed by a real snippet and span instead of the derive's
    /// default `None`.
    pub fn with_source(self, name: impl AsRef<str>, source: impl AsRef<str>) -> LoadErrorReport {
        let span = self.mark().span();
        LoadErrorReport {
            source_code: NamedSource::new(name.as_ref(), source.as_ref().to_string()),
            span,
            error: self,
        }
    }
}

/// A [`LoadError`] together with the document source it was raised
/// against: the value a caller renders through a `miette` report
/// handler to get a source snippet with the failing span underlined.
#[derive(Debug, Error, Diagnostic)]
#[error("{error}")]
pub struct LoadErrorReport {
    #[source]
    error: LoadError,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{error}")]
    span: SourceSpan,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn with_source_backs_a_real_snippet_and_span() {
        let error = LoadError::missing_key("block", "invocation", Mark::new(2, 5, 12));
        let report = error.with_source("case.yaml", "inputs: {}\n   invocation missing\n");

        assert!(Diagnostic::source_code(&report).is_some());
        let labels: Vec<_> = Diagnostic::labels(&report)
            .expect("a label was attached via with_source")
            .collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 12);
    }
}
