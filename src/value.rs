use alloc::boxed::Box;
use core::any::Any;
use core::any::TypeId;
use core::fmt;
use core::fmt::Debug;
use core::hash::Hash;
use core::hash::Hasher;

/// The runtime identity of a type.
///
/// Two tokens are equal exactly when they were taken from the same type.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Returns the token for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the type's name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Items whose type can be inspected at runtime.
///
/// A `None` item has no runtime type; checked views treat it as a mismatch.
pub trait Typed {
    /// Returns the item's runtime type, or `None` for a null item.
    fn runtime_type(&self) -> Option<TypeToken>;
}

impl Typed for Value {
    fn runtime_type(&self) -> Option<TypeToken> {
        Some(self.type_token())
    }
}

impl<T: Typed> Typed for Option<T> {
    fn runtime_type(&self) -> Option<TypeToken> {
        self.as_ref().and_then(Typed::runtime_type)
    }
}

trait Dynamic: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Dynamic) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
    fn dyn_clone(&self) -> Box<dyn Dynamic>;
    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn dyn_type_name(&self) -> &'static str;
}

impl<T> Dynamic for T
where
    T: Any + Clone + Debug + Eq + Hash + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Dynamic) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn dyn_clone(&self) -> Box<dyn Dynamic> {
        Box::new(self.clone())
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }

    fn dyn_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// A dynamically typed, hashable value.
///
/// `Value` lets heterogeneous items share one container, which is what the
/// checked views guard against. Values of different types are never equal.
///
/// # Examples
///
/// ```rust
/// use chain_hash::TypeToken;
/// use chain_hash::Value;
///
/// let one = Value::new(1i32);
/// assert_eq!(one, Value::new(1i32));
/// assert_ne!(one, Value::new(1i64));
/// assert_eq!(one.type_token(), TypeToken::of::<i32>());
/// assert_eq!(one.downcast_ref::<i32>(), Some(&1));
/// ```
pub struct Value(Box<dyn Dynamic>);

impl Value {
    /// Wraps `value`.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + Debug + Eq + Hash + Send + Sync,
    {
        Self(Box::new(value))
    }

    /// Returns the token of the wrapped type.
    pub fn type_token(&self) -> TypeToken {
        TypeToken {
            id: self.0.as_any().type_id(),
            name: self.0.dyn_type_name(),
        }
    }

    /// Returns `true` if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Returns the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self(self.0.dyn_clone())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_token().hash(state);
        self.0.dyn_hash(state);
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

macro_rules! value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new(value)
                }
            }
        )*
    };
}

value_from!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    &'static str,
    alloc::string::String,
);
