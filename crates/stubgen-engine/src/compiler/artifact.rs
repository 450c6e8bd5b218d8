//! Compiled artifacts

use std::fmt;

use rand::RngCore;

use crate::vm::WrapperClass;

/// Unique artifact name: 32 lowercase hex characters, random per build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Draw a fresh name.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The loadable unit produced by a successful build.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    name: ArtifactName,
    namespace: Option<String>,
    classes: Vec<WrapperClass>,
    source: String,
}

impl CompiledArtifact {
    pub(crate) fn new(
        name: ArtifactName,
        namespace: Option<String>,
        classes: Vec<WrapperClass>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name,
            namespace,
            classes,
            source: source.into(),
        }
    }

    pub fn name(&self) -> &ArtifactName {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Every class, in declaration order.
    pub fn classes(&self) -> &[WrapperClass] {
        &self.classes
    }

    /// Look up a class by simple or namespace-qualified name.
    pub fn class(&self, name: &str) -> Option<&WrapperClass> {
        self.classes
            .iter()
            .find(|c| c.name() == name || c.qualified_name() == name)
    }

    /// The source text the artifact was built from.
    pub fn source(&self) -> &str {
        &self.source
    }
}
