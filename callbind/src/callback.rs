use std::{
    any::{Any, type_name},
    fmt,
    marker::PhantomData,
    sync::Arc,
};

use crate::{Args, Signature};

type Handler<A, O> = Box<dyn Fn(A) -> O + Send + Sync>;

/// A caller-supplied callable with a known parameter signature.
///
/// The concrete closure is stored type-erased; only its [`Signature`], a
/// diagnostic name and its return type `O` are visible. The return type is
/// fixed by the compiler, while the parameters are matched against event
/// kinds by [`Dispatcher::bind`](crate::Dispatcher::bind).
///
/// Cloning is cheap: clones share the same underlying callable.
///
/// # Example
///
/// ```rust
/// use callbind::{Callback, Signature};
///
/// let cb: Callback<usize> = Callback::new(|text: String| text.len()).named("on_text");
/// assert_eq!(cb.name(), "on_text");
/// assert_eq!(cb.signature(), &Signature::of::<(String,)>());
/// assert_eq!(cb.invoke(("four".to_string(),)), Some(4));
/// ```
pub struct Callback<O> {
    name: Arc<str>,
    signature: Signature,
    handler: Arc<dyn Any + Send + Sync>,
    _output: PhantomData<fn() -> O>,
}

impl<O: 'static> Callback<O> {
    /// Wraps any `Fn` of up to six arguments returning `O`.
    ///
    /// The callback is named after the callable's type, which for function
    /// items is its path. Use [`Callback::named`] for something shorter.
    pub fn new<A, F>(f: F) -> Self
    where
        F: IntoCallback<O, A>,
    {
        f.into_callback()
    }

    fn from_handler<A: Args>(name: &str, handler: Handler<A, O>) -> Self {
        Self {
            name: Arc::from(name),
            signature: Signature::of::<A>(),
            handler: Arc::new(handler),
            _output: PhantomData,
        }
    }

    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn matches(&self, signature: &Signature) -> bool {
        &self.signature == signature
    }

    /// Calls the callback with `args`.
    ///
    /// Returns `None` when `A` is not this callback's argument tuple.
    pub fn invoke<A: Args>(&self, args: A) -> Option<O> {
        self.handler
            .downcast_ref::<Handler<A, O>>()
            .map(|handler| handler(args))
    }

    /// Whether both values share the same underlying callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }
}

impl<O> Clone for Callback<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            signature: self.signature.clone(),
            handler: self.handler.clone(),
            _output: PhantomData,
        }
    }
}

impl<O> fmt::Debug for Callback<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Conversion of a callable into a [`Callback`].
///
/// `A` is the argument tuple of the callable. It is implemented for every
/// `Fn(A0, .., An) -> O + Send + Sync + 'static` with up to six arguments,
/// so plain functions and closures can be passed wherever a callback is
/// expected. Closure parameters usually need type annotations.
pub trait IntoCallback<O, A>: Send + Sync + 'static {
    fn into_callback(self) -> Callback<O>;
}

macro_rules! impl_into_callback {
    ($($ty:ident $arg:ident),*) => {
        impl<F, O, $($ty),*> IntoCallback<O, ($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> O + Send + Sync + 'static,
            O: 'static,
            $($ty: 'static,)*
        {
            fn into_callback(self) -> Callback<O> {
                let handler: Handler<($($ty,)*), O> =
                    Box::new(move |($($arg,)*)| self($($arg),*));
                Callback::from_handler(type_name::<F>(), handler)
            }
        }
    };
}

impl_into_callback!();
impl_into_callback!(A0 a0);
impl_into_callback!(A0 a0, A1 a1);
impl_into_callback!(A0 a0, A1 a1, A2 a2);
impl_into_callback!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_into_callback!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_callback!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);

/// Builds a `Vec<Callback<_>>` from a list of callables, keeping their order.
///
/// ```rust
/// use callbind::{Callback, callbacks};
///
/// fn on_number(n: u32) {}
///
/// let cbs: Vec<Callback<()>> = callbacks![on_number, |s: String| drop(s)];
/// assert_eq!(cbs.len(), 2);
/// ```
#[macro_export]
macro_rules! callbacks {
    ($($f:expr),* $(,)?) => {
        vec![$($crate::Callback::new($f)),*]
    };
}
