//! Named variables and the bindings that give them values.
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// A named variable of an expression over scalar `T`.
///
/// Symbols are identified by their name alone: equality, ordering and hashing all
/// look at the name, so a `Symbol` can key a map that is queried with a plain `&str`.
/// The scalar type only ties the symbol to the expressions it may appear in, which
/// lets `x + y` know what kind of [`Expression`](crate::expr::Expression) to build.
///
/// Cloning is cheap (the name is reference counted).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent, bound = ""))]
pub struct Symbol<T> {
    name: Arc<str>,
    #[cfg_attr(feature = "serde", serde(skip))]
    _scalar: PhantomData<fn() -> T>,
}

impl<T> Symbol<T> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            _scalar: PhantomData,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Symbol<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _scalar: PhantomData,
        }
    }
}

impl<T> PartialEq for Symbol<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Symbol<T> {}

impl<T> PartialOrd for Symbol<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Symbol<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<T> Hash for Symbol<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `str`'s hash for `Borrow<str>` lookups
        self.name().hash(state);
    }
}

impl<T> Borrow<str> for Symbol<T> {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl<T> AsRef<str> for Symbol<T> {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.name()).finish()
    }
}

impl<T> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> From<&str> for Symbol<T> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<T> From<String> for Symbol<T> {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Source of symbol values during evaluation.
///
/// Implemented for ordered and hashed maps keyed by [`Symbol`], `String` or `&str`,
/// and for slices and arrays of `(Symbol, value)` pairs.
pub trait Binding<T> {
    /// Value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<T>;
}

/// The usual binding: symbols in name order.
pub type ValueMap<T> = BTreeMap<Symbol<T>, T>;

impl<T, B: Binding<T> + ?Sized> Binding<T> for &B {
    #[inline]
    fn lookup(&self, name: &str) -> Option<T> {
        (**self).lookup(name)
    }
}

impl<T: Copy, K: Borrow<str> + Ord> Binding<T> for BTreeMap<K, T> {
    #[inline]
    fn lookup(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy, K: Borrow<str> + Hash + Eq, S: BuildHasher> Binding<T> for HashMap<K, T, S> {
    #[inline]
    fn lookup(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy> Binding<T> for [(Symbol<T>, T)] {
    fn lookup(&self, name: &str) -> Option<T> {
        self.iter()
            .find(|(symbol, _)| symbol.name() == name)
            .map(|&(_, value)| value)
    }
}

impl<T: Copy, const N: usize> Binding<T> for [(Symbol<T>, T); N] {
    #[inline]
    fn lookup(&self, name: &str) -> Option<T> {
        self.as_slice().lookup(name)
    }
}

impl<T: Copy> Binding<T> for Vec<(Symbol<T>, T)> {
    #[inline]
    fn lookup(&self, name: &str) -> Option<T> {
        self.as_slice().lookup(name)
    }
}
