use serde::{Deserialize, Serialize};

use super::{Monster, MonsterId};

/// Slot arena holding every monster in the world
///
/// Ids stay valid until the monster is removed; freed slots are reused,
/// so a handle must be re-checked after any removal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterList {
    slots: Vec<Option<Monster>>,
}

impl MonsterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a monster and return its id
    pub fn insert(&mut self, mut monster: Monster) -> MonsterId {
        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        let id = MonsterId(index as u32 + 1);
        monster.id = id;
        self.slots[index] = Some(monster);
        id
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.slot(id).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.slot(id).and_then(move |i| self.slots[i].as_mut())
    }

    pub fn remove(&mut self, id: MonsterId) -> Option<Monster> {
        self.slot(id).and_then(|i| self.slots[i].take())
    }

    pub fn contains(&self, id: MonsterId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.slots.iter().flatten()
    }

    fn slot(&self, id: MonsterId) -> Option<usize> {
        let index = (id.0 as usize).checked_sub(1)?;
        (index < self.slots.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;
    use crate::dungeon::Grid;
    use crate::monster::RaceTable;

    fn kobold(rng: &mut GameRng) -> Monster {
        let table = RaceTable::standard();
        let id = table.find_by_name("kobold").unwrap();
        Monster::new(id, table.get(id).unwrap(), 1, Grid::new(3, 3), rng)
    }

    #[test]
    fn test_ids_are_stable_and_reused() {
        let mut rng = GameRng::new(42);
        let mut list = MonsterList::new();
        let a = list.insert(kobold(&mut rng));
        let b = list.insert(kobold(&mut rng));
        assert_ne!(a, b);
        assert_eq!(list.get(b).unwrap().id, b);

        list.remove(a);
        assert!(!list.contains(a));
        assert_eq!(list.len(), 1);

        let c = list.insert(kobold(&mut rng));
        assert_eq!(c, a);
    }

    #[test]
    fn test_zero_id_is_never_valid() {
        let list = MonsterList::new();
        assert!(list.get(MonsterId(0)).is_none());
    }
}
