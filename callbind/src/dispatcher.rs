use crate::{Binding, Bound, Callback, Config, Error, Event, EventKind, Result, Source};

/// Resolves caller-supplied callbacks against the event kinds of `E`.
///
/// - The kind table is taken from [`Event::kinds`] once, on construction.
/// - [`bind`](Dispatcher::bind) matches callbacks to kinds by parameter
///   signature and returns an immutable [`Binding`].
/// - [`Binding::dispatch`] then routes occurrences without any further
///   checks.
///
/// A dispatcher can bind any number of callback sequences; bindings do not
/// share state with each other or with the dispatcher.
///
/// See also: [`Event`], [`Callback`], [`Config`].
pub struct Dispatcher<E: Event> {
    kinds: Vec<EventKind<E::Output>>,
    config: Config,
}

impl<E: Event> Dispatcher<E> {
    /// Create a new dispatcher with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            kinds: E::kinds(),
            config,
        }
    }

    pub fn kinds(&self) -> &[EventKind<E::Output>] {
        &self.kinds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Binds every event kind to exactly one callback.
    ///
    /// Callbacks are considered in the order given:
    /// 1. each callback must match the signature of at least one kind,
    ///    otherwise [`Error::UnmatchedCallback`];
    /// 2. each kind takes the first callback whose signature equals its own;
    /// 3. a kind with no match falls back to its default handler, or fails
    ///    with [`Error::MissingRequiredHandler`] if it has none;
    /// 4. a callback selected for no kind is shadowed: logged, or rejected
    ///    with [`Error::ShadowedCallback`] when [`Config::deny_shadowed`] is set.
    pub fn bind<I>(&self, callbacks: I) -> Result<Binding<E>>
    where
        I: IntoIterator<Item = Callback<E::Output>>,
    {
        let callbacks: Vec<_> = callbacks.into_iter().collect();
        self.check_matched(&callbacks)?;

        let entries = self
            .kinds
            .iter()
            .map(|kind| self.resolve(kind, &callbacks))
            .collect::<Result<Vec<_>>>()?;

        self.check_shadowed(&callbacks, &entries)?;

        Ok(Binding::new(entries, self.config.trace_dispatch))
    }

    fn check_matched(&self, callbacks: &[Callback<E::Output>]) -> Result<()> {
        let unmatched = callbacks
            .iter()
            .enumerate()
            .find(|(_, cb)| !self.kinds.iter().any(|kind| kind.accepts(cb)));

        match unmatched {
            Some((position, cb)) => {
                tracing::debug!(
                    position,
                    callback = %cb.name(),
                    signature = %cb.signature(),
                    "Callback matches no event kind"
                );
                Err(Error::UnmatchedCallback {
                    position,
                    callback: cb.shared_name(),
                    signature: cb.signature().clone(),
                })
            }
            None => Ok(()),
        }
    }

    fn resolve(
        &self,
        kind: &EventKind<E::Output>,
        callbacks: &[Callback<E::Output>],
    ) -> Result<Bound<E::Output>> {
        let supplied = callbacks
            .iter()
            .enumerate()
            .find(|(_, cb)| kind.accepts(cb))
            .map(|(position, cb)| (cb.clone(), Source::Supplied(position)));

        let (callback, source) = match supplied {
            Some(found) => found,
            None => match kind.default_handler() {
                Some(default) => (default.clone(), Source::Default),
                None => {
                    tracing::debug!(kind = kind.name(), signature = %kind.signature(), "Missing required handler");
                    return Err(Error::MissingRequiredHandler {
                        kind: kind.name(),
                        signature: kind.signature().clone(),
                    });
                }
            },
        };

        tracing::debug!(
            kind = kind.name(),
            callback = %callback.name(),
            source = %source,
            "Event kind bound"
        );
        Ok(Bound::new(
            kind.name(),
            kind.signature().clone(),
            callback,
            source,
        ))
    }

    fn check_shadowed(
        &self,
        callbacks: &[Callback<E::Output>],
        entries: &[Bound<E::Output>],
    ) -> Result<()> {
        let selected = |position: usize| {
            entries
                .iter()
                .any(|bound| bound.source() == Source::Supplied(position))
        };

        for (position, cb) in callbacks.iter().enumerate() {
            if selected(position) {
                continue;
            }
            if self.config.deny_shadowed {
                tracing::debug!(
                    position,
                    callback = %cb.name(),
                    signature = %cb.signature(),
                    "Shadowed callback rejected"
                );
                return Err(Error::ShadowedCallback {
                    position,
                    callback: cb.shared_name(),
                    signature: cb.signature().clone(),
                });
            }
            tracing::warn!(
                position,
                callback = %cb.name(),
                signature = %cb.signature(),
                "Callback is shadowed by an earlier one and will never run"
            );
        }
        Ok(())
    }
}

impl<E: Event> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Binds `callbacks` with a default-configured [`Dispatcher`].
pub fn bind<E, I>(callbacks: I) -> Result<Binding<E>>
where
    E: Event,
    I: IntoIterator<Item = Callback<E::Output>>,
{
    Dispatcher::<E>::default().bind(callbacks)
}
