use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A single parameter type of a callback or event kind.
///
/// Identity is the [`TypeId`]; the type name is kept only for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl Hash for ParamType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Ordered list of parameter types.
///
/// Two signatures are equal when they have the same arity and the same
/// parameter type at every position. The empty signature `()` describes
/// callbacks taking no arguments.
///
/// ```rust
/// use callbind::Signature;
///
/// let sig = Signature::of::<(u32, String)>();
/// assert_eq!(sig.arity(), 2);
/// assert_ne!(sig, Signature::of::<(String, u32)>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(Arc<[ParamType]>);

impl Signature {
    /// Signature of the argument tuple `A`.
    pub fn of<A: Args>() -> Self {
        A::signature()
    }

    pub fn new(params: impl IntoIterator<Item = ParamType>) -> Self {
        Self(params.into_iter().collect())
    }

    #[inline]
    pub fn params(&self) -> &[ParamType] {
        &self.0
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name)?;
        }
        write!(f, ")")
    }
}

/// Argument tuple accepted by a callback.
///
/// Implemented for tuples of `'static` types up to six elements. The unit
/// tuple `()` stands for "no arguments".
pub trait Args: 'static {
    fn signature() -> Signature;
}

macro_rules! impl_args {
    ($($ty:ident),*) => {
        impl<$($ty: 'static),*> Args for ($($ty,)*) {
            fn signature() -> Signature {
                let params: Vec<ParamType> = vec![$(ParamType::of::<$ty>()),*];
                Signature::new(params)
            }
        }
    };
}

impl_args!();
impl_args!(A0);
impl_args!(A0, A1);
impl_args!(A0, A1, A2);
impl_args!(A0, A1, A2, A3);
impl_args!(A0, A1, A2, A3, A4);
impl_args!(A0, A1, A2, A3, A4, A5);
