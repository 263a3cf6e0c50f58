/// A value that exposes a scalar key derived from its contents.
///
/// Implemented by values stored in a [`SplayTree`](crate::SplayTree) to allow
/// lookups with [`SplayTree::search_by_key()`](crate::SplayTree::search_by_key)
/// when the caller only holds the key and not a full value.
///
/// The order of the derived keys MUST agree with the [`Ord`] implementation
/// of the value itself, otherwise key lookups descend the wrong subtrees.
pub trait Keyed {
    /// The derived key type.
    type Key: Ord;

    /// Return the key for this value.
    fn key(&self) -> Self::Key;
}

macro_rules! impl_keyed_identity {
    ($($t:ty),*) => {
        $(
            impl Keyed for $t {
                type Key = $t;

                fn key(&self) -> Self::Key {
                    *self
                }
            }
        )*
    };
}

impl_keyed_identity!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
