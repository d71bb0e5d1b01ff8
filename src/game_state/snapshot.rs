//! Revertible value holder.
//!
//! Every piece of mutable game state that make/unmake touches is wrapped in a
//! `Snapshot`: `update` pushes the old value before installing a new one and
//! `revert` pops it back. Updates and reverts must be strictly paired and
//! happen in LIFO order.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    current: T,
    history: Vec<T>,
}

impl<T> Snapshot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.current
    }

    /// Install `value`, remembering the previous one.
    #[inline]
    pub fn update(&mut self, value: T) {
        let prior = std::mem::replace(&mut self.current, value);
        self.history.push(prior);
    }

    /// Restore the value from before the latest `update`, returning the one
    /// being discarded. `None` (and no change) when there is nothing to revert.
    #[inline]
    pub fn revert(&mut self) -> Option<T> {
        let prior = self.history.pop()?;
        Some(std::mem::replace(&mut self.current, prior))
    }

    /// Replace the current value without recording history.
    #[inline]
    pub fn reset(&mut self, value: T) {
        self.current = value;
        self.history.clear();
    }
}

impl<T: Copy> Snapshot<T> {
    #[inline]
    pub fn value(&self) -> T {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;

    #[test]
    fn revert_restores_in_lifo_order() {
        let mut rights = Snapshot::new(0b1111u8);
        rights.update(0b1100);
        rights.update(0b0100);
        assert_eq!(rights.value(), 0b0100);

        assert_eq!(rights.revert(), Some(0b0100));
        assert_eq!(rights.value(), 0b1100);
        assert_eq!(rights.revert(), Some(0b1100));
        assert_eq!(rights.value(), 0b1111);
        assert_eq!(rights.revert(), None);
        assert_eq!(rights.value(), 0b1111);
    }

    #[test]
    fn reset_discards_history() {
        let mut file = Snapshot::new(Some(3u8));
        file.update(None);
        file.reset(Some(5));
        assert_eq!(file.revert(), None);
        assert_eq!(*file.get(), Some(5));
    }
}
