/// Reply assembly
///
/// Notification outcomes are removed before this point; what remains is
/// shaped into the final reply.

use crate::protocol::{Reply, ResponseEnvelope};

/// Whether the input was a single request or an array of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Batch,
}

/// Build the reply from ordered per-candidate envelopes
///
/// Returns `None` when there is nothing to send, which is distinct from an
/// empty array.
pub fn assemble(mode: Mode, mut outcomes: Vec<ResponseEnvelope>) -> Option<Reply> {
    match (mode, outcomes.len()) {
        (_, 0) => None,
        (Mode::Single, 1) => outcomes.pop().map(Reply::Single),
        _ => Some(Reply::Batch(outcomes)),
    }
}
