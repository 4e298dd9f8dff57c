//! Class identifiers
//!
//! `ClassId` is the opaque string identifier that ranges over the class
//! universe `U` (spec §3). Two identifiers are equal iff their string forms
//! are equal; scoping/namespaces are flattened by the extractor before a
//! `ClassId` is ever constructed.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ClassId(Arc<str>);

impl ClassId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for ClassId {
    fn from(s: String) -> Self {
        Self(Arc::from(s.as_str()))
    }
}

impl std::borrow::Borrow<str> for ClassId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
