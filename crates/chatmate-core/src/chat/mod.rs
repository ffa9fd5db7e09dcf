//! Chat domain for chatmate.
//!
//! - `history`: bounded conversation history anchored by the system message
//! - `client`: completion client that turns history into a reply
//! - `input`: classification of raw input lines and the line source port
//! - `output`: the presentation port the loop reports to
//! - `conversation`: the RUNNING/TERMINATED conversation loop

pub mod client;
pub mod conversation;
pub mod history;
pub mod input;
pub mod output;
