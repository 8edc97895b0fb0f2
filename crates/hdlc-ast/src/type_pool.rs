//! Interning of bit-vector types.

use std::cell::RefCell;

use bumpalo::Bump;
use hdlc_num::BitVectorKind;
use rustc_hash::FxHashMap;

use crate::types::{BitVectorType, Direction};

/// Uniques bit-vector types by `(direction, kind, width)`. The flipped
/// twin is materialized and cross-linked the moment either of the pair
/// is first requested.
pub struct TypePool<'a> {
    arena: &'a Bump,
    bit_vector_types:
        RefCell<FxHashMap<(Direction, BitVectorKind, usize), &'a BitVectorType<'a>>>,
}

impl<'a> TypePool<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            bit_vector_types: RefCell::new(FxHashMap::default()),
        }
    }

    /// The unique instance for this triple.
    pub fn bit_vector_type(
        &self,
        direction: Direction,
        kind: BitVectorKind,
        bit_width: usize,
    ) -> &'a BitVectorType<'a> {
        let key = (direction, kind, bit_width);
        if let Some(&existing) = self.bit_vector_types.borrow().get(&key) {
            return existing;
        }
        let created: &'a BitVectorType<'a> =
            self.arena.alloc(BitVectorType::new(direction, kind, bit_width));
        let flipped_direction = direction.flipped();
        if flipped_direction == direction {
            created.link_flipped(created);
            self.bit_vector_types.borrow_mut().insert(key, created);
        } else {
            let twin: &'a BitVectorType<'a> =
                self.arena
                    .alloc(BitVectorType::new(flipped_direction, kind, bit_width));
            created.link_flipped(twin);
            twin.link_flipped(created);
            let mut map = self.bit_vector_types.borrow_mut();
            map.insert(key, created);
            map.insert((flipped_direction, kind, bit_width), twin);
        }
        created
    }

    /// Number of distinct bit-vector types created so far.
    pub fn len(&self) -> usize {
        self.bit_vector_types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bit_vector_types.borrow().is_empty()
    }
}
