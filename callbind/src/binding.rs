use std::fmt;

use crate::{Args, BindingEntry, BindingReport, Callback, Event, Signature};

/// Where the callback bound to an event kind came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    /// Supplied by the caller, at this position in the supplied sequence.
    Supplied(usize),
    /// The event kind's default handler.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Supplied(position) => write!(f, "supplied #{position}"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// One resolved entry of a [`Binding`]: an event kind and its callback.
pub struct Bound<O> {
    kind: &'static str,
    signature: Signature,
    callback: Callback<O>,
    source: Source,
}

impl<O: 'static> Bound<O> {
    pub(crate) fn new(
        kind: &'static str,
        signature: Signature,
        callback: Callback<O>,
        source: Source,
    ) -> Self {
        Self {
            kind,
            signature,
            callback,
            source,
        }
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn callback(&self) -> &Callback<O> {
        &self.callback
    }

    #[inline]
    pub fn source(&self) -> Source {
        self.source
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.source == Source::Default
    }
}

impl<O> Clone for Bound<O> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            signature: self.signature.clone(),
            callback: self.callback.clone(),
            source: self.source,
        }
    }
}

impl<O> fmt::Debug for Bound<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("kind", &self.kind)
            .field("callback", &self.callback)
            .field("source", &self.source)
            .finish()
    }
}

/// The resolved mapping from every event kind of `E` to exactly one callback.
///
/// Produced by [`Dispatcher::bind`](crate::Dispatcher::bind). Entries are in
/// the declaration order of [`Event::kinds`] and never change afterwards, so
/// a binding can be shared read-only (for example behind an `Arc`) for the
/// whole lifetime of a dispatch loop.
pub struct Binding<E: Event> {
    entries: Vec<Bound<E::Output>>,
    trace_dispatch: bool,
}

impl<E: Event> Binding<E> {
    pub(crate) fn new(entries: Vec<Bound<E::Output>>, trace_dispatch: bool) -> Self {
        Self {
            entries,
            trace_dispatch,
        }
    }

    /// Runs the callback bound to the occurrence's kind and returns its output.
    ///
    /// No signature check happens here; everything was resolved at bind time.
    /// Whatever the callback returns, errors included, is passed through as is.
    #[inline]
    pub fn dispatch(&self, event: E) -> E::Output {
        event.route(self)
    }

    /// Invokes the callback bound to the kind at `index` with `args`.
    ///
    /// This is the primitive used by [`Event::route`] implementations.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a kind index of `E`, or if `A` is not the
    /// argument tuple declared for that kind. Both mean the `Event`
    /// implementation disagrees with its own [`Event::kinds`].
    pub fn call<A: Args>(&self, index: usize, args: A) -> E::Output {
        let Some(bound) = self.entries.get(index) else {
            panic!(
                "event kind index {index} out of range ({} kinds bound)",
                self.entries.len()
            );
        };

        if self.trace_dispatch {
            tracing::trace!(
                kind = bound.kind,
                callback = %bound.callback.name(),
                source = %bound.source,
                "dispatching"
            );
        }

        match bound.callback.invoke(args) {
            Some(output) => output,
            None => panic!(
                "arguments {} do not match event kind '{}' with signature {}",
                Signature::of::<A>(),
                bound.kind,
                bound.signature
            ),
        }
    }

    pub fn bound(&self, index: usize) -> Option<&Bound<E::Output>> {
        self.entries.get(index)
    }

    pub fn bound_for(&self, event: &E) -> Option<&Bound<E::Output>> {
        self.entries.get(event.kind_index())
    }

    /// Looks up an entry by kind name.
    pub fn get(&self, kind: &str) -> Option<&Bound<E::Output>> {
        self.entries.iter().find(|bound| bound.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bound<E::Output>> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn report(&self) -> BindingReport {
        let entries = self
            .entries
            .iter()
            .map(|bound| BindingEntry {
                kind: bound.kind.to_string(),
                signature: bound.signature.to_string(),
                callback: bound.callback.name().to_string(),
                source: bound.source,
            })
            .collect();
        BindingReport { entries }
    }
}

impl<E: Event> Clone for Binding<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            trace_dispatch: self.trace_dispatch,
        }
    }
}

impl<E: Event> fmt::Debug for Binding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
