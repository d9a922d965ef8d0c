use thiserror::Error;

/// Failure of a collection cycle.
///
/// Any of these aborts the whole request batch; no partial results are returned.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A call to the remote data source failed.
    #[error("could not {operation}: {cause:#}")]
    RemoteLookup { operation: String, cause: ohno::AppError },

    /// A requested namespace does not match any declared metric template.
    #[error("unsupported metric namespace '{namespace}': {reason}")]
    UnsupportedNamespace { namespace: String, reason: &'static str },
}

impl CollectError {
    /// Returns a closure that wraps a source error as [`CollectError::RemoteLookup`], for use with `map_err`.
    pub(crate) fn remote(operation: impl Into<String>) -> impl FnOnce(ohno::AppError) -> Self {
        let operation = operation.into();
        move |cause| Self::RemoteLookup { operation, cause }
    }

    pub(crate) fn unsupported(namespace: &impl ToString, reason: &'static str) -> Self {
        Self::UnsupportedNamespace {
            namespace: namespace.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_lookup_message() {
        let err = CollectError::remote("fetch repository 'acme/widget'")(ohno::app_err!("HTTP 502"));
        let msg = err.to_string();
        assert!(msg.starts_with("could not fetch repository 'acme/widget'"), "{msg}");
        assert!(msg.contains("HTTP 502"), "{msg}");
    }

    #[test]
    fn test_unsupported_message() {
        let err = CollectError::unsupported(&"raintank/apps/gitstats/org/acme", "unknown metric family");
        assert_eq!(
            err.to_string(),
            "unsupported metric namespace 'raintank/apps/gitstats/org/acme': unknown metric family"
        );
    }
}
