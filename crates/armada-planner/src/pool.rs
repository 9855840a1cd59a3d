use armada_forecast::MoveOrder;

/// Handle into the [`OrderPool`]. The generation counter catches use of a
/// handle whose slot has since been released and reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct PoolSlot {
    order: MoveOrder,
    generation: u32,
    live: bool,
}

/// Slab of move orders that outlive a single planning pass.
///
/// Released slots go on a free list and are reissued with a bumped
/// generation, so order churn across turns does not reallocate.
#[derive(Debug, Default)]
pub struct OrderPool {
    slots: Vec<PoolSlot>,
    free: Vec<u32>,
}

impl OrderPool {
    pub fn new() -> Self {
        OrderPool::default()
    }

    pub fn checkout(&mut self, order: MoveOrder) -> OrderHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(!slot.live);
            slot.order = order;
            slot.live = true;
            return OrderHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(PoolSlot {
            order,
            generation: 0,
            live: true,
        });
        OrderHandle { index, generation: 0 }
    }

    pub fn get(&self, handle: OrderHandle) -> &MoveOrder {
        let slot = &self.slots[handle.index as usize];
        debug_assert!(slot.live, "order was released");
        debug_assert_eq!(slot.generation, handle.generation, "stale order handle");
        &slot.order
    }

    pub fn get_mut(&mut self, handle: OrderHandle) -> &mut MoveOrder {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert!(slot.live, "order was released");
        debug_assert_eq!(slot.generation, handle.generation, "stale order handle");
        &mut slot.order
    }

    pub fn release(&mut self, handle: OrderHandle) {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert!(slot.live, "double release");
        debug_assert_eq!(slot.generation, handle.generation, "stale order handle");
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
    }

    pub fn release_all(&mut self, handles: &[OrderHandle]) {
        for &handle in handles {
            self.release(handle);
        }
    }

    /// Number of live orders.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots ever allocated, live or not.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }
}
