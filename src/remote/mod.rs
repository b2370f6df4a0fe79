//! Remote Input
//!
//! Button presses from the remote collaborators, already decoded into
//! [`RemoteEvent`](crate::RemoteEvent)s, and the bounded queue that carries
//! them to the tick loop.

pub mod keymap;
pub mod listener;
pub mod queue;

pub use keymap::{Input, Keymap};
pub use listener::KeyboardListener;
pub use queue::{EventQueue, SharedQueue};
