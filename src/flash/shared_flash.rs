use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex as BlockingMutex};

use crate::driver::transport::Transport;

use super::s25fl::S25fl;

/// A driver that can be reached from more than one execution context.
///
/// Each [`SharedFlash::lock`] call holds the mutex for the whole closure, so
/// chip select framed sequences from different callers never interleave.
pub struct SharedFlash<M: RawMutex, T: Transport> {
    flash: BlockingMutex<M, RefCell<S25fl<T>>>,
}

impl<M: RawMutex, T: Transport> SharedFlash<M, T> {
    pub fn new(flash: S25fl<T>) -> Self {
        Self {
            flash: BlockingMutex::new(RefCell::new(flash)),
        }
    }

    pub fn lock<R>(&self, f: impl FnOnce(&mut S25fl<T>) -> R) -> R {
        self.flash.lock(|flash| f(&mut flash.borrow_mut()))
    }

    pub fn total_size(&self) -> u32 {
        self.flash.lock(|flash| flash.borrow().total_size())
    }

    pub fn into_inner(self) -> S25fl<T> {
        self.flash.into_inner().into_inner()
    }
}
