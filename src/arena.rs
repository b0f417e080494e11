//! Generation-tagged handle storage.
//!
//! Containers and frames are identified by `(slot, generation)` pairs. A slot may be
//! reused once its occupant is gone, but only with a newer generation, so a handle
//! that outlived its occupant never resolves to the new one.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use thiserror::Error;

/// Raw `(slot, generation)` pair behind every typed handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle {
    pub slot: u32,
    pub generation: u32,
}

impl RawHandle {
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }
}

/// Typed handle that can be stored in an [`Arena`].
pub trait ArenaKey: Copy + Eq {
    fn from_raw(raw: RawHandle) -> Self;
    fn raw(self) -> RawHandle;
}

/// Returned when an insert carries an older generation than the slot's occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stale handle {slot}:{generation} (slot holds generation {current})")]
pub struct StaleHandle {
    pub slot: u32,
    pub generation: u32,
    pub current: u32,
}

struct Entry<T> {
    generation: u32,
    value: T,
}

/// Slot storage keyed by generation-tagged handles.
///
/// Lookups only succeed when both slot and generation match. The arena does not
/// allocate handles itself; identities are issued by the host (see
/// [`HandleAllocator`]) and the arena validates them. Slots are opaque to the
/// arena and stored sparsely, so any `u32` slot costs one entry.
pub struct Arena<K: ArenaKey, T> {
    slots: BTreeMap<u32, Entry<T>>,
    _key: PhantomData<K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            _key: PhantomData,
        }
    }

    /// Store `value` under `key`.
    ///
    /// An occupant with the same or an older generation is replaced and returned.
    /// An occupant with a newer generation wins and the insert is rejected.
    pub fn insert(&mut self, key: K, value: T) -> Result<Option<T>, StaleHandle> {
        let raw = key.raw();
        if let Some(current) = self.slots.get(&raw.slot).map(|entry| entry.generation) {
            if current > raw.generation {
                return Err(StaleHandle {
                    slot: raw.slot,
                    generation: raw.generation,
                    current,
                });
            }
        }

        let previous = self.slots.insert(
            raw.slot,
            Entry {
                generation: raw.generation,
                value,
            },
        );
        match previous {
            // Only a same-generation replacement hands the old value back; an older
            // generation belonged to a different occupant that is simply gone.
            Some(entry) if entry.generation == raw.generation => Ok(Some(entry.value)),
            _ => Ok(None),
        }
    }

    pub fn get(&self, key: K) -> Option<&T> {
        let raw = key.raw();
        match self.slots.get(&raw.slot) {
            Some(entry) if entry.generation == raw.generation => Some(&entry.value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let raw = key.raw();
        match self.slots.get_mut(&raw.slot) {
            Some(entry) if entry.generation == raw.generation => Some(&mut entry.value),
            _ => None,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Remove the occupant if `key` still names it.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let raw = key.raw();
        if !self.contains(key) {
            return None;
        }
        self.slots.remove(&raw.slot).map(|entry| entry.value)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live occupants in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots.iter().map(|(slot, entry)| {
            (
                K::from_raw(RawHandle::new(*slot, entry.generation)),
                &entry.value,
            )
        })
    }
}

/// Issues fresh handles, reusing released slots with a bumped generation.
///
/// This is the host side of the identity contract: whoever instantiates frames or
/// containers owns an allocator and hands the resulting handles to the engine.
pub struct HandleAllocator<K: ArenaKey> {
    generations: Vec<u32>,
    free: Vec<u32>,
    _key: PhantomData<K>,
}

impl<K: ArenaKey> Default for HandleAllocator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey> HandleAllocator<K> {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: Vec::new(),
            _key: PhantomData,
        }
    }

    pub fn allocate(&mut self) -> K {
        if let Some(slot) = self.free.pop() {
            let generation = self.generations[slot as usize];
            return K::from_raw(RawHandle::new(slot, generation));
        }
        let slot = self.generations.len() as u32;
        self.generations.push(1);
        K::from_raw(RawHandle::new(slot, 1))
    }

    /// Release `key` so its slot can be reused. Returns false for stale handles.
    pub fn release(&mut self, key: K) -> bool {
        let raw = key.raw();
        match self.generations.get_mut(raw.slot as usize) {
            Some(generation) if *generation == raw.generation => {
                *generation = generation.wrapping_add(1).max(1);
                self.free.push(raw.slot);
                true
            }
            _ => false,
        }
    }
}
