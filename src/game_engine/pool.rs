use std::collections::BTreeSet;

use tracing::debug;

use crate::game_engine::{
    errors::{GameError, SelectionError},
    models::{Container, Content, SidebarEntry},
    random::RandomSource,
    rules::{DENOMINATIONS, ITEM_LABELS, MAX_ITEMS},
};

/// The row of hidden containers plus everything revealed about them so far.
pub struct ContainerPool {
    containers: Vec<Container>,
    player: Option<usize>,
    /// Denominations the sidebar should tick off.
    opened_denominations: BTreeSet<u64>,
    /// Denominations displaced by items at build time.
    item_denominations: BTreeSet<u64>,
}

impl ContainerPool {
    /// Shuffle the board into the containers and convert `item_count` of them
    /// into items.
    ///
    /// The containers holding the lowest and highest denominations are never
    /// converted, so both extremes always stay in play.
    pub fn build(rng: &mut dyn RandomSource, item_count: usize) -> Result<Self, GameError> {
        if item_count > MAX_ITEMS {
            return Err(GameError::TooManyItems { requested: item_count, max: MAX_ITEMS });
        }

        let mut values = DENOMINATIONS.to_vec();

        // Fisher-Yates shuffle
        for i in (1..values.len()).rev() {
            let j = rng.index(i + 1);
            values.swap(i, j);
        }

        let mut containers: Vec<Container> = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Container { index, content: Content::Cash(value), opened: false })
            .collect();

        let lowest = DENOMINATIONS.iter().copied().min().unwrap_or(0);
        let highest = DENOMINATIONS.iter().copied().max().unwrap_or(0);
        let mut interior: Vec<usize> = containers
            .iter()
            .filter(|c| {
                let v = c.content.denomination();
                v != lowest && v != highest
            })
            .map(|c| c.index)
            .collect();

        // Partial shuffle: the first `item_count` slots become a uniform sample.
        let item_count = item_count.min(interior.len());
        for k in 0..item_count {
            let j = k + rng.index(interior.len() - k);
            interior.swap(k, j);
        }
        interior.truncate(item_count);

        let mut item_denominations = BTreeSet::new();
        for &idx in &interior {
            let label = ITEM_LABELS[rng.index(ITEM_LABELS.len())];
            let replaced_value = containers[idx].content.denomination();
            item_denominations.insert(replaced_value);
            containers[idx].content = Content::Item { label: label.to_string(), replaced_value };
        }

        debug!(item_count, items = ?interior, "container pool built");

        Ok(ContainerPool {
            containers,
            player: None,
            opened_denominations: BTreeSet::new(),
            item_denominations,
        })
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn get(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The player's container, once claimed.
    pub fn player(&self) -> Option<usize> {
        self.player
    }

    pub fn player_content(&self) -> Option<&Content> {
        self.player.map(|i| &self.containers[i].content)
    }

    pub fn item_count(&self) -> usize {
        self.item_denominations.len()
    }

    pub fn opened_denominations(&self) -> &BTreeSet<u64> {
        &self.opened_denominations
    }

    fn check_range(&self, index: usize) -> Result<(), SelectionError> {
        if index < self.containers.len() {
            Ok(())
        } else {
            Err(SelectionError::OutOfRange { index })
        }
    }

    /// Make `index` the player's container. Only allowed once.
    pub fn claim(&mut self, index: usize) -> Result<(), SelectionError> {
        self.check_range(index)?;
        if let Some(current) = self.player {
            return Err(SelectionError::AlreadyPicked { current });
        }
        if self.containers[index].opened {
            return Err(SelectionError::AlreadyOpened { index });
        }
        self.player = Some(index);
        Ok(())
    }

    /// Open a non-player container and return what it held.
    pub fn open(&mut self, index: usize) -> Result<Content, SelectionError> {
        self.check_range(index)?;
        if self.player == Some(index) {
            return Err(SelectionError::OwnContainer { index });
        }
        let container = &mut self.containers[index];
        if container.opened {
            return Err(SelectionError::AlreadyOpened { index });
        }
        container.opened = true;
        self.opened_denominations.insert(container.content.denomination());
        debug!(index, content = %container.content, "container opened");
        Ok(container.content.clone())
    }

    /// Cash values still hidden, in index order. Includes the player's
    /// container; items contribute nothing.
    pub fn remaining_numeric_values(&self) -> Vec<u64> {
        self.containers
            .iter()
            .filter(|c| !c.opened)
            .filter_map(|c| c.content.cash())
            .collect()
    }

    /// Unopened containers other than the player's.
    pub fn unopened_count(&self) -> usize {
        self.closed_others().len()
    }

    /// Indices of unopened containers other than the player's.
    pub fn closed_others(&self) -> Vec<usize> {
        self.containers
            .iter()
            .filter(|c| !c.opened && Some(c.index) != self.player)
            .map(|c| c.index)
            .collect()
    }

    /// Exchange the contents of two containers.
    pub fn swap(&mut self, from: usize, to: usize) -> Result<(), SelectionError> {
        self.check_range(from)?;
        self.check_range(to)?;
        if from == to {
            return Err(SelectionError::SameContainer { index: to });
        }
        if self.containers[to].opened {
            return Err(SelectionError::AlreadyOpened { index: to });
        }
        let moved = self.containers[from].content.clone();
        self.containers[from].content = std::mem::replace(&mut self.containers[to].content, moved);
        Ok(())
    }

    /// Point the player's selection at another container. Callers validate
    /// the target through [`ContainerPool::swap`] first.
    pub(crate) fn reassign_player(&mut self, index: usize) {
        self.player = Some(index);
    }

    /// Sidebar rows in board order.
    pub fn sidebar(&self) -> Vec<SidebarEntry> {
        DENOMINATIONS
            .iter()
            .map(|&denomination| SidebarEntry {
                denomination,
                seen: self.opened_denominations.contains(&denomination),
                item_occupied: self.item_denominations.contains(&denomination),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::random::{ScriptedRandom, SeededRandom};

    fn pool(seed: u64, items: usize) -> ContainerPool {
        ContainerPool::build(&mut SeededRandom::seeded(seed), items).unwrap()
    }

    fn sorted_denominations(p: &ContainerPool) -> Vec<u64> {
        let mut all: Vec<u64> = p.containers().iter().map(|c| c.content.denomination()).collect();
        all.sort_unstable();
        all
    }

    #[test]
    fn every_denomination_lands_in_exactly_one_container() {
        for seed in [1u64, 42, 999, 0xDEAD_BEEF] {
            for items in 0..=MAX_ITEMS {
                let p = pool(seed, items);
                assert_eq!(p.len(), DENOMINATIONS.len());
                assert_eq!(sorted_denominations(&p), DENOMINATIONS.to_vec(), "seed={seed} items={items}");
            }
        }
    }

    #[test]
    fn item_count_is_honoured_and_extremes_stay_cash() {
        for seed in 0..50u64 {
            let p = pool(seed, 3);
            let items: Vec<&Container> = p.containers().iter().filter(|c| c.content.is_item()).collect();
            assert_eq!(items.len(), 3, "seed={seed}");
            assert_eq!(p.item_count(), 3);
            for c in items {
                let v = c.content.denomination();
                assert_ne!(v, 1, "lowest converted (seed={seed})");
                assert_ne!(v, 1_000_000, "highest converted (seed={seed})");
                assert!(ITEM_LABELS.contains(&c.content.item_label().unwrap_or("")));
            }
        }
    }

    #[test]
    fn too_many_items_is_rejected() {
        let err = ContainerPool::build(&mut SeededRandom::seeded(1), 4).err();
        assert_eq!(err, Some(GameError::TooManyItems { requested: 4, max: 3 }));
    }

    #[test]
    fn identity_shuffle_keeps_board_order() {
        // Scripting j = i at every Fisher-Yates step leaves the list untouched.
        let script: Vec<usize> = (1..DENOMINATIONS.len()).rev().collect();
        let mut rng = ScriptedRandom::new().with_indices(script);
        let p = ContainerPool::build(&mut rng, 0).unwrap();
        let values: Vec<u64> = p.containers().iter().map(|c| c.content.denomination()).collect();
        assert_eq!(values, DENOMINATIONS.to_vec());
    }

    #[test]
    fn opening_rules() {
        let mut p = pool(7, 0);
        p.claim(0).unwrap();
        assert_eq!(p.claim(5), Err(SelectionError::AlreadyPicked { current: 0 }));
        assert_eq!(p.open(0), Err(SelectionError::OwnContainer { index: 0 }));
        assert_eq!(p.open(26), Err(SelectionError::OutOfRange { index: 26 }));

        let content = p.open(3).unwrap();
        assert!(p.containers()[3].opened);
        assert!(p.opened_denominations().contains(&content.denomination()));
        assert_eq!(p.open(3), Err(SelectionError::AlreadyOpened { index: 3 }));
    }

    #[test]
    fn remaining_values_include_player_and_skip_items_and_opened() {
        let mut p = pool(11, 2);
        let first_cash = p.containers().iter().find(|c| !c.content.is_item()).map(|c| c.index).unwrap();
        p.claim(first_cash).unwrap();
        assert_eq!(p.remaining_numeric_values().len(), 24);
        assert_eq!(p.unopened_count(), 25);

        let other = p.closed_others()[0];
        let opened = p.open(other).unwrap();
        let expected = if opened.is_item() { 24 } else { 23 };
        assert_eq!(p.remaining_numeric_values().len(), expected);
        assert_eq!(p.unopened_count(), 24);
        assert!(p.remaining_numeric_values().contains(&p.player_content().unwrap().denomination()));
    }

    #[test]
    fn opening_an_item_marks_its_displaced_denomination() {
        let mut p = pool(3, 3);
        let items: Vec<usize> = p.containers().iter().filter(|c| c.content.is_item()).map(|c| c.index).collect();
        let mut expected = BTreeSet::new();
        for idx in items {
            expected.insert(p.open(idx).unwrap().denomination());
        }
        assert_eq!(p.opened_denominations(), &expected);
        let flagged: Vec<u64> = p.sidebar().iter().filter(|e| e.item_occupied).map(|e| e.denomination).collect();
        assert_eq!(flagged, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn swap_exchanges_contents_and_validates_target() {
        let mut p = pool(5, 0);
        p.claim(2).unwrap();
        p.open(9).unwrap();
        let before_2 = p.containers()[2].content.clone();
        let before_4 = p.containers()[4].content.clone();

        assert_eq!(p.swap(2, 2), Err(SelectionError::SameContainer { index: 2 }));
        assert_eq!(p.swap(2, 9), Err(SelectionError::AlreadyOpened { index: 9 }));

        p.swap(2, 4).unwrap();
        assert_eq!(p.containers()[2].content, before_4);
        assert_eq!(p.containers()[4].content, before_2);
        assert_eq!(sorted_denominations(&p), DENOMINATIONS.to_vec());
    }

    #[test]
    fn sidebar_follows_board_order() {
        let p = pool(1, 0);
        let rows = p.sidebar();
        assert_eq!(rows.len(), DENOMINATIONS.len());
        assert!(rows.iter().zip(DENOMINATIONS.iter()).all(|(r, &d)| r.denomination == d));
        assert!(rows.iter().all(|r| !r.seen && !r.item_occupied));
    }
}
