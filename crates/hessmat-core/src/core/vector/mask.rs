/// Per-scalar flags marking coordinates excluded from reductions and updates.
///
/// `true` means frozen. The mask is indexed like the coordinate vector it
/// accompanies, so an atom occupies three consecutive flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrozenMask {
    frozen: Vec<bool>,
}

impl FrozenMask {
    /// A mask of `len` scalars with nothing frozen.
    pub fn new(len: usize) -> Self {
        Self {
            frozen: vec![false; len],
        }
    }

    /// Builds a scalar mask from per-atom flags, freezing all three
    /// coordinates of each flagged atom.
    pub fn from_atoms(frozen_atoms: &[bool]) -> Self {
        Self {
            frozen: frozen_atoms
                .iter()
                .flat_map(|&frozen| [frozen; 3])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frozen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frozen.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `index` is not below [`FrozenMask::len`].
    #[inline]
    pub fn is_frozen(&self, index: usize) -> bool {
        self.frozen[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is not below [`FrozenMask::len`].
    pub fn set(&mut self, index: usize, frozen: bool) {
        self.frozen[index] = frozen;
    }

    /// Freezes the three scalars of `atom`.
    ///
    /// # Panics
    ///
    /// Panics if the mask has fewer than `3 * (atom + 1)` scalars.
    pub fn freeze_atom(&mut self, atom: usize) {
        self.frozen[atom * 3..atom * 3 + 3].fill(true);
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen.iter().filter(|&&frozen| frozen).count()
    }

    pub fn active_count(&self) -> usize {
        self.len() - self.frozen_count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.frozen
    }
}

impl From<Vec<bool>> for FrozenMask {
    fn from(frozen: Vec<bool>) -> Self {
        Self { frozen }
    }
}

impl FromIterator<bool> for FrozenMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            frozen: iter.into_iter().collect(),
        }
    }
}
