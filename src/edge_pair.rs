use crate::edge::EdgeKind;

/// The edges a handle drives, ordered by which one determines the window.
///
/// The primary edge follows the pointer; the secondary edge is derived from
/// it when the aspect ratio is locked. Side handles only fill one slot and
/// the center handle fills none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgePair {
    pub primary: Option<EdgeKind>,
    pub secondary: Option<EdgeKind>,
}

impl EdgePair {
    pub fn new(primary: Option<EdgeKind>, secondary: Option<EdgeKind>) -> Self {
        Self { primary, secondary }
    }

    pub fn swapped(self) -> Self {
        Self::new(self.secondary, self.primary)
    }

    pub fn iter(self) -> impl Iterator<Item = EdgeKind> {
        self.primary.into_iter().chain(self.secondary)
    }
}
