use std::fmt;

use crate::{Args, Callback, IntoCallback, Signature};

/// Declaration of one event kind: its name, its parameter signature and an
/// optional default handler.
///
/// Kinds without a default are *required*: binding fails unless the caller
/// supplies a matching callback.
///
/// The argument tuple `A` given to the constructors fixes the signature, so
/// a default handler is checked against it at compile time.
///
/// ```rust
/// use callbind::EventKind;
///
/// let on_text = EventKind::<()>::required::<(String,)>("Text");
/// let on_tick = EventKind::<()>::optional::<(u64,), _>("Tick", |_: u64| ());
///
/// assert!(on_text.is_required());
/// assert!(!on_tick.is_required());
/// ```
pub struct EventKind<O> {
    name: &'static str,
    signature: Signature,
    default: Option<Callback<O>>,
}

impl<O: 'static> EventKind<O> {
    pub fn required<A: Args>(name: &'static str) -> Self {
        Self {
            name,
            signature: Signature::of::<A>(),
            default: None,
        }
    }

    pub fn optional<A, F>(name: &'static str, default: F) -> Self
    where
        A: Args,
        F: IntoCallback<O, A>,
    {
        let default = Callback::new(default).named(format!("{name}::default"));
        Self {
            name,
            signature: Signature::of::<A>(),
            default: Some(default),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn default_handler(&self) -> Option<&Callback<O>> {
        self.default.as_ref()
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn accepts(&self, callback: &Callback<O>) -> bool {
        callback.matches(&self.signature)
    }
}

impl<O> Clone for EventKind<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            signature: self.signature.clone(),
            default: self.default.clone(),
        }
    }
}

impl<O> fmt::Debug for EventKind<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKind")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("required", &self.default.is_none())
            .finish()
    }
}

impl<O> fmt::Display for EventKind<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}
