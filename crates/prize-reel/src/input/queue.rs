use std::cell::RefCell;
use std::rc::Rc;

/// Commands the hosting page can send to a mounted wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelCommand {
    /// Start a play: spin the reels, or draw in bulk.
    Spin,
    /// Abandon the current play and return to rest.
    Reset,
}

/// A queue of commands.
/// The page pushes through a [`WheelHandle`]; the wheel drains it each frame.
#[derive(Debug)]
pub struct CommandQueue {
    commands: Vec<WheelCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(4),
        }
    }

    pub fn push(&mut self, command: WheelCommand) {
        self.commands.push(command);
    }

    /// Drain all pending commands in the order they were sent.
    pub fn drain(&mut self) -> Vec<WheelCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable command handle given to the page once the wheel is ready.
/// Commands take effect on the wheel's next frame.
#[derive(Debug, Clone)]
pub struct WheelHandle {
    queue: Rc<RefCell<CommandQueue>>,
}

impl WheelHandle {
    pub(crate) fn new(queue: Rc<RefCell<CommandQueue>>) -> Self {
        Self { queue }
    }

    pub fn spin(&self) {
        self.queue.borrow_mut().push(WheelCommand::Spin);
    }

    pub fn reset(&self) {
        self.queue.borrow_mut().push(WheelCommand::Reset);
    }

    /// Number of commands not yet picked up by the wheel.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = CommandQueue::new();
        q.push(WheelCommand::Spin);
        q.push(WheelCommand::Reset);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![WheelCommand::Spin, WheelCommand::Reset]);
        assert!(q.is_empty());
    }

    #[test]
    fn handles_share_one_queue() {
        let queue = Rc::new(RefCell::new(CommandQueue::new()));
        let a = WheelHandle::new(Rc::clone(&queue));
        let b = a.clone();
        a.spin();
        b.reset();
        assert_eq!(b.pending(), 2);
        assert_eq!(queue.borrow_mut().drain(), vec![WheelCommand::Spin, WheelCommand::Reset]);
        assert_eq!(a.pending(), 0);
    }
}
