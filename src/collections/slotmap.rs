/// A key into a [`SlotMap`]. Keys carry the generation of the slot they were
/// handed out for, so a key outlives its value without aliasing whatever
/// gets inserted into the slot next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}
impl SlotKey {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    // Err holds the next free slot
    value: Result<T, u32>,
}

#[derive(Debug)]
pub struct SlotMap<T> {
    head: u32,
    len: usize,
    entries: Vec<Slot<T>>,
}
impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T> SlotMap<T> {
    pub fn new() -> Self {
        Self {
            head: u32::MAX,
            len: 0,
            entries: vec![],
        }
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }
    pub fn get(&self, key: SlotKey) -> Option<&T> {
        self.entries
            .get(key.index())
            .filter(|s| s.generation == key.generation)
            .and_then(|s| s.value.as_ref().ok())
    }
    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.entries
            .get_mut(key.index())
            .filter(|s| s.generation == key.generation)
            .and_then(|s| s.value.as_mut().ok())
    }
    pub fn insert(&mut self, value: T) -> SlotKey {
        self.len += 1;
        if self.head == u32::MAX {
            let index = self.entries.len() as u32;
            self.entries.push(Slot { generation: 0, value: Ok(value) });
            SlotKey { index, generation: 0 }
        } else {
            let index = self.head;
            let slot = &mut self.entries[index as usize];
            // released slots always hold the free list link
            if let Err(next) = core::mem::replace(&mut slot.value, Ok(value)) {
                self.head = next;
            }
            SlotKey { index, generation: slot.generation }
        }
    }
    /// Removes the value behind `key`. Stale keys are ignored.
    pub fn release(&mut self, key: SlotKey) -> Option<T> {
        let slot = self.entries.get_mut(key.index())?;
        if slot.generation != key.generation || slot.value.is_err() {
            return None;
        }
        let old = core::mem::replace(&mut slot.value, Err(self.head));
        slot.generation = slot.generation.wrapping_add(1);
        self.head = key.index;
        self.len -= 1;
        old.ok()
    }
}
pub struct Iter<'a, T> {
    entries: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotKey, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        for (i, slot) in self.entries.by_ref() {
            if let Ok(v) = &slot.value {
                return Some((SlotKey { index: i as u32, generation: slot.generation }, v));
            }
        }
        None
    }
}
impl<T> SlotMap<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { entries: self.entries.iter().enumerate() }
    }
}
