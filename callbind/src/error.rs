use std::sync::Arc;

use crate::Signature;

/// Errors reported while binding callbacks to event kinds.
///
/// Every variant is detected by [`Dispatcher::bind`](crate::Dispatcher::bind),
/// before the first event is dispatched. Dispatching itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Callback #{position} '{callback}' with signature {signature} matches no event kind")]
    UnmatchedCallback {
        position: usize,
        callback: Arc<str>,
        signature: Signature,
    },

    #[error("Event kind '{kind}' with signature {signature} requires a handler, but none was supplied")]
    MissingRequiredHandler {
        kind: &'static str,
        signature: Signature,
    },

    #[error("Callback #{position} '{callback}' with signature {signature} is shadowed by earlier callbacks")]
    ShadowedCallback {
        position: usize,
        callback: Arc<str>,
        signature: Signature,
    },
}

impl Error {
    /// Position of the offending callback in the supplied sequence, if the
    /// error concerns a callback rather than an event kind.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::UnmatchedCallback { position, .. } | Error::ShadowedCallback { position, .. } => {
                Some(*position)
            }
            Error::MissingRequiredHandler { .. } => None,
        }
    }
}
