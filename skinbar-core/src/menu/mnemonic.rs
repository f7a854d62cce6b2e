//! Mnemonic letter registry of one menu tree.

use std::collections::VecDeque;

use indexmap::IndexMap;

/// What a mnemonic key press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicHit {
    /// The letter has a single owner: activate it.
    Activate(usize),
    /// The letter is shared: focus this owner, the next press moves on.
    Focus(usize),
}

/// Maps a mnemonic letter to the item indices that registered it.
///
/// Owners are kept in registration order. A press on a shared letter rotates
/// the front owner to the back, so consecutive presses cycle through them.
#[derive(Debug, Clone, Default)]
pub struct MnemonicIndex {
    entries: IndexMap<char, VecDeque<usize>>,
}

impl MnemonicIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `index` as an owner of `letter`. Letters are case-insensitive.
    pub fn register(&mut self, letter: char, index: usize) {
        let letter = fold(letter);
        self.entries.entry(letter).or_default().push_back(index);
    }

    /// Resolve a key press. Returns `None` for unknown letters.
    pub fn dispatch(&mut self, letter: char) -> Option<MnemonicHit> {
        let owners = self.entries.get_mut(&fold(letter))?;
        match owners.len() {
            0 => None,
            1 => owners.front().copied().map(MnemonicHit::Activate),
            _ => {
                let first = owners.pop_front()?;
                owners.push_back(first);
                Some(MnemonicHit::Focus(first))
            },
        }
    }

    /// Owners of a letter in their current cycling order.
    pub fn owners(&self, letter: char) -> Vec<usize> {
        self.entries
            .get(&fold(letter))
            .map(|owners| owners.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a letter is registered.
    pub fn contains(&self, letter: char) -> bool {
        self.entries.contains_key(&fold(letter))
    }

    /// Number of distinct letters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn fold(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_owner_activates() {
        let mut index = MnemonicIndex::new();
        index.register('f', 0);
        assert_eq!(index.dispatch('F'), Some(MnemonicHit::Activate(0)));
        assert_eq!(index.dispatch('f'), Some(MnemonicHit::Activate(0)));
    }

    #[test]
    fn test_shared_letter_cycles_in_registration_order() {
        let mut index = MnemonicIndex::new();
        index.register('n', 0);
        index.register('n', 2);
        index.register('n', 5);

        let presses: Vec<_> = (0..4).map(|_| index.dispatch('n')).collect();
        assert_eq!(
            presses,
            vec![
                Some(MnemonicHit::Focus(0)),
                Some(MnemonicHit::Focus(2)),
                Some(MnemonicHit::Focus(5)),
                Some(MnemonicHit::Focus(0)),
            ]
        );
        assert_eq!(index.owners('n'), vec![2, 5, 0]);
    }

    #[test]
    fn test_unknown_letter_ignored() {
        let mut index = MnemonicIndex::new();
        index.register('a', 1);
        assert_eq!(index.dispatch('z'), None);
        assert!(!index.contains('z'));
        assert_eq!(index.len(), 1);
    }
}
