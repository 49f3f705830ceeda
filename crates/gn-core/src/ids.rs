use core::fmt;
use core::num::NonZeroU32;

/// Compact identifier for nodes and edges of a network.
///
/// Stores `index + 1` so that `Option<Id>` stays the size of `Id`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index.
    pub fn from_index(index: u32) -> Self {
        match NonZeroU32::new(index.saturating_add(1)) {
            Some(v) => Self(v),
            None => Self(NonZeroU32::MIN),
        }
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// 0-based index as `usize`, for slicing solver arrays.
    pub fn idx(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

pub type NodeId = Id;
pub type EdgeId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = Id::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.idx(), i as usize);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }
}
