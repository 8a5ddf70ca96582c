use indexmap::IndexSet;
use serde::Serialize;

/// Position of a metric card in the rendered card sequence.
pub type CardIndex = usize;

/// Cards the user starred. Membership only changes through [`PinSet::toggle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PinSet {
    pinned: IndexSet<CardIndex>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `index` and reports whether it is pinned now.
    pub fn toggle(&mut self, index: CardIndex) -> bool {
        if self.pinned.shift_remove(&index) {
            false
        } else {
            self.pinned.insert(index);
            true
        }
    }

    pub fn is_pinned(&self, index: CardIndex) -> bool {
        self.pinned.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }

    /// Pinned indices in the order they were pinned.
    pub fn iter(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.pinned.iter().copied()
    }

    /// Pinned items first in pin order, then the rest in their original order.
    pub fn pinned_first<'a, T>(&self, items: &'a [T]) -> Vec<(CardIndex, &'a T)> {
        let mut ordered: Vec<(CardIndex, &'a T)> = self
            .iter()
            .filter_map(|index| items.get(index).map(|item| (index, item)))
            .collect();
        ordered.extend(
            items
                .iter()
                .enumerate()
                .filter(|(index, _)| !self.is_pinned(*index)),
        );
        ordered
    }
}

impl Extend<CardIndex> for PinSet {
    /// Toggles each index in turn.
    fn extend<I: IntoIterator<Item = CardIndex>>(&mut self, iter: I) {
        for index in iter {
            self.toggle(index);
        }
    }
}
