//! Input plumbing: the command queue and the terminal key mapping.
//!
//! On hardware the four control buttons would push commands into the queue
//! from their poll callbacks; the terminal simulator maps keyboard keys
//! instead. Either way the queue is drained once per scheduling pass of the
//! driving loop, so every board mutation stays serialized on one logical
//! execution context. Debounce timing belongs to the button adapter, never
//! to the engine.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Command;

/// Maximum commands applied per scheduling pass.
const DRAIN_BATCH: usize = 16;

/// Cloneable producer half of the command queue, handed to input adapters.
#[derive(Debug, Clone)]
pub struct CommandSender(Sender<Command>);

impl CommandSender {
    /// Queue one command. A disconnected consumer means the session loop
    /// already ended, so the command is silently dropped.
    pub fn send(&self, command: Command) {
        let _ = self.0.send(command);
    }
}

/// Single-consumer command queue between input adapters and the game loop.
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Create a producer handle for an input adapter.
    pub fn sender(&self) -> CommandSender {
        CommandSender(self.tx.clone())
    }

    /// Queue one command directly (used by the simulator's key handler).
    pub fn push(&self, command: Command) {
        let _ = self.tx.send(command);
    }

    /// Drain pending commands, at most one batch per scheduling pass.
    pub fn drain(&self) -> ArrayVec<Command, DRAIN_BATCH> {
        let mut batch = ArrayVec::new();
        while !batch.is_full() {
            match self.rx.try_recv() {
                Ok(command) => batch.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        batch
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a key press onto one of the four button commands.
pub fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),
        _ => None,
    }
}

/// Quit keys for the simulator: q, Esc, or Ctrl+C.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let queue = CommandQueue::new();
        queue.push(Command::MoveLeft);
        queue.push(Command::RotateCw);
        queue.push(Command::MoveRight);

        let batch = queue.drain();
        assert_eq!(
            batch.as_slice(),
            &[Command::MoveLeft, Command::RotateCw, Command::MoveRight]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_sender_feeds_the_same_queue() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        sender.send(Command::RotateCcw);
        assert_eq!(queue.drain().as_slice(), &[Command::RotateCcw]);
    }

    #[test]
    fn test_drain_is_bounded_per_pass() {
        let queue = CommandQueue::new();
        for _ in 0..DRAIN_BATCH + 4 {
            queue.push(Command::MoveLeft);
        }
        assert_eq!(queue.drain().len(), DRAIN_BATCH);
        assert_eq!(queue.drain().len(), 4);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(map_key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(map_key(KeyCode::Up), Some(Command::RotateCw));
        assert_eq!(map_key(KeyCode::Char('z')), Some(Command::RotateCcw));
        assert_eq!(map_key(KeyCode::Enter), None);
    }
}
