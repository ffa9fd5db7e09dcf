//! Interactive terminal chat experience for chatmate.
//!
//! This module wires the core conversation loop to the terminal: welcome
//! banner, readline or piped input, and the reply renderer with a thinking
//! spinner. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod renderer;
