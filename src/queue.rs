//! Command hand-off between the protocol stack and the light task.
//!
//! The decoder usually runs in interrupt or radio-task context while the
//! controller is polled from the main loop. The queue is guarded by
//! `critical-section` and stores commands in a fixed-size `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::command::{AddressInfo, Command};

/// Command together with its addressing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEnvelope {
    pub address: AddressInfo,
    pub command: Command,
}

/// The queue had no free slot; the envelope is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub CommandEnvelope);

/// Nothing was queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmpty;

/// Bounded multi-producer command queue
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<CommandEnvelope, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Receiving side, owned by the controller
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    pub fn try_send(&self, envelope: CommandEnvelope) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(envelope).map_err(QueueFull)
        })
    }

    pub fn try_receive(&self) -> Result<CommandEnvelope, QueueEmpty> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(QueueEmpty)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Queue a command addressed to `address`
    ///
    /// Returns `Err(QueueFull(envelope))` if the queue is full.
    pub fn try_send(&self, address: AddressInfo, command: Command) -> Result<(), QueueFull> {
        self.queue.try_send(CommandEnvelope { address, command })
    }
}

#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<CommandEnvelope, QueueEmpty> {
        self.queue.try_receive()
    }
}
