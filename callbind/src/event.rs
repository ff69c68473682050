use std::borrow::Cow;

use crate::{Binding, EventKind};

/// An occurrence type with a closed set of event kinds.
///
/// Implement this for the type your event source produces, usually an enum
/// with one variant per kind. The kinds returned by [`Event::kinds`] are the
/// only ones a [`Dispatcher`](crate::Dispatcher) recognizes, and their order
/// is the index returned by [`Event::kind_index`].
///
/// `#[derive(Event)]` (with the `macros` feature) generates all of this for
/// an enum: each variant becomes a kind named after the variant, its fields
/// form the signature, and `#[event(default = ..)]` attaches a default
/// handler.
///
/// # Manual implementation
///
/// [`Event::route`] must unpack the occurrence into exactly the argument
/// tuple declared for its kind and pass it to [`Binding::call`] together
/// with the kind's index.
///
/// ```rust
/// use callbind::{Binding, Event, EventKind};
///
/// enum Reading {
///     Value(f64),
///     Lost,
/// }
///
/// impl Event for Reading {
///     type Output = ();
///
///     fn kinds() -> Vec<EventKind<()>> {
///         vec![
///             EventKind::required::<(f64,)>("Value"),
///             EventKind::optional::<(), _>("Lost", || ()),
///         ]
///     }
///
///     fn kind_index(&self) -> usize {
///         match self {
///             Reading::Value(_) => 0,
///             Reading::Lost => 1,
///         }
///     }
///
///     fn route(self, binding: &Binding<Self>) {
///         match self {
///             Reading::Value(v) => binding.call(0, (v,)),
///             Reading::Lost => binding.call(1, ()),
///         }
///     }
/// }
/// ```
///
/// # Derive errors
///
/// The derive rejects input it cannot turn into event kinds. Only enums are
/// accepted:
///
/// ```compile_fail
/// use callbind::Event;
///
/// #[derive(Event)]
/// struct Tick(u64);
/// ```
///
/// and they need at least one variant:
///
/// ```compile_fail
/// use callbind::Event;
///
/// #[derive(Event)]
/// enum Never {}
/// ```
///
/// `output` is the only enum attribute:
///
/// ```compile_fail
/// use callbind::Event;
///
/// #[derive(Event)]
/// #[event(returns = u32)]
/// enum Counter {
///     Add(u32),
/// }
/// ```
///
/// `default` is the only variant attribute:
///
/// ```compile_fail
/// use callbind::Event;
///
/// #[derive(Event)]
/// enum Counter {
///     #[event(fallback = |_: u32| ())]
///     Add(u32),
/// }
/// ```
///
/// and it may be given once per variant:
///
/// ```compile_fail
/// use callbind::Event;
///
/// #[derive(Event)]
/// enum Counter {
///     #[event(default = |_: u32| (), default = |_: u32| ())]
///     Add(u32),
/// }
/// ```
pub trait Event: Sized + 'static {
    /// Return type shared by every handler of this event type.
    type Output: 'static;

    fn kinds() -> Vec<EventKind<Self::Output>>;

    fn kind_index(&self) -> usize;

    fn route(self, binding: &Binding<Self>) -> Self::Output;

    /// Returns a human-readable name for this occurrence.
    ///
    /// The default implementation returns the type name. The derive returns
    /// the variant name, which is also the kind name.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    impl Event for Ping {
        type Output = ();

        fn kinds() -> Vec<EventKind<()>> {
            vec![EventKind::required::<()>("Ping")]
        }

        fn kind_index(&self) -> usize {
            0
        }

        fn route(self, binding: &Binding<Self>) {
            binding.call(0, ())
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Ping.name().ends_with("Ping"));
    }

    #[test]
    fn test_kinds_are_declared_in_order() {
        let kinds = Ping::kinds();
        assert_eq!(kinds.len(), 1);
        assert_eq!(kinds[0].name(), "Ping");
        assert!(kinds[0].signature().is_void());
    }
}
