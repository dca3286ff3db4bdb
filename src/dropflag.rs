//! This module is for testing only

use std::rc::Rc;
use std::cell::RefCell;

pub type DropFlag<T> = Rc<RefCell<T>>;

/// Increments the shared counter every time an instance is dropped.
pub struct DropCounter {
    pub drops: DropFlag<usize>,
}

impl DropCounter {
    pub fn new(drops: &DropFlag<usize>) -> DropCounter {
        DropCounter { drops: drops.clone() }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        *self.drops.borrow_mut() += 1;
    }
}

pub struct DroppableWithData {
    pub data: i32,
    pub drops: DropFlag<usize>,
}

impl DroppableWithData {
    pub fn new(data: i32, drops: &DropFlag<usize>) -> DroppableWithData {
        DroppableWithData { data, drops: drops.clone() }
    }
}

impl Drop for DroppableWithData {
    fn drop(&mut self) {
        *self.drops.borrow_mut() += 1;
    }
}

#[test]
fn dropflag() {
    let drops = DropFlag::new(RefCell::new(0));
    let counter = DropCounter::new(&drops);
    assert_eq!(0, *drops.borrow());
    std::mem::drop(counter);
    assert_eq!(1, *drops.borrow());
}
