// Output destination names and normalisation

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Reserved output name for the process's standard error stream
pub const STDERR: &str = "stderr";

/// Reserved output name for the process's standard output stream
pub const STDOUT: &str = "stdout";

/// A single place log records are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Stderr,
    /// Opened for append, created if missing
    File(PathBuf),
}

impl Destination {
    /// Map an output name to a destination. Anything that is not a reserved
    /// stream name is a file path.
    pub fn parse(name: &str) -> Self {
        match name {
            STDOUT => Destination::Stdout,
            STDERR => Destination::Stderr,
            path => Destination::File(PathBuf::from(path)),
        }
    }
}

/// Deduplicate and sort the requested outputs.
///
/// An empty request resolves to `["stdout"]`. The result is ordered
/// lexicographically so the same set of outputs always resolves to the same
/// sequence regardless of how it was written in the configuration.
pub fn resolve_outputs<S: AsRef<str>>(requested: &[S]) -> Vec<String> {
    if requested.is_empty() {
        return vec![STDOUT.to_string()];
    }

    requested
        .iter()
        .map(|output| output.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
