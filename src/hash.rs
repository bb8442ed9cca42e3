//! Key hashing contract.
//!
//! `HashValue` is deliberately not `std::hash::Hash`: the trie needs a
//! stable 32-bit integer per key, computed the same way across runs and
//! across processes, which `std::hash::Hash` (fed through `DefaultHasher`,
//! randomly seeded per process) cannot provide on its own. Types that
//! already have a well-behaved `std::hash::Hash` impl can still opt in via
//! [`hash_via_std_hash`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Upper bound on the memoized string-hash cache before it is cleared.
const STRING_CACHE_CAP: usize = 255;

thread_local! {
    static STRING_HASH_CACHE: RefCell<HashMap<String, u32>> = RefCell::new(HashMap::new());
}

/// Produces the 32-bit integer hash the trie branches on.
///
/// Implementors must be deterministic: the same key always yields the same
/// hash within a process, and distinct keys that compare equal under `Eq`
/// must yield the same hash.
pub trait HashValue {
    /// Returns the 32-bit hash used to route this key through the trie.
    fn hash_value(&self) -> u32;
}

impl HashValue for bool {
    fn hash_value(&self) -> u32 {
        u32::from(*self)
    }
}

macro_rules! impl_hash_value_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl HashValue for $t {
                fn hash_value(&self) -> u32 {
                    // Mirrors the modulo-into-positive-31-bit-range rule for integer
                    // keys, computed widened so no width overflows mid-calculation.
                    let widened = i128::from(*self);
                    let reduced = widened.rem_euclid((1i128 << 31) - 1);
                    u32::try_from(reduced).expect("reduced value fits in 31 bits")
                }
            }
        )*
    };
}

impl_hash_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// JVM-style polynomial hash over UTF-16 code units: `h = 31h + c`.
fn jvm_string_hash(s: &str) -> u32 {
    let mut h: u32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(u32::from(unit));
    }
    h
}

fn memoized_string_hash(s: &str) -> u32 {
    STRING_HASH_CACHE.with(|cache| {
        if let Some(&h) = cache.borrow().get(s) {
            return h;
        }
        let h = jvm_string_hash(s);
        let mut cache = cache.borrow_mut();
        if cache.len() >= STRING_CACHE_CAP {
            cache.clear();
        }
        cache.insert(s.to_owned(), h);
        h
    })
}

impl HashValue for str {
    fn hash_value(&self) -> u32 {
        memoized_string_hash(self)
    }
}

impl HashValue for String {
    fn hash_value(&self) -> u32 {
        self.as_str().hash_value()
    }
}

impl<T: HashValue + ?Sized> HashValue for &T {
    fn hash_value(&self) -> u32 {
        (*self).hash_value()
    }
}

/// Derives a [`HashValue`] hash from an existing `std::hash::Hash` impl.
///
/// Intended for user types that already derive `Hash` and have no reason to
/// hand-write a `HashValue` impl. The two lower halves of a 64-bit
/// `DefaultHasher` digest are folded together, since `DefaultHasher`'s
/// output is not uniform enough in its low bits alone to trust directly.
#[must_use]
pub fn hash_via_std_hash<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    let digest = hasher.finish();
    (digest as u32) ^ ((digest >> 32) as u32)
}
