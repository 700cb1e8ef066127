//! Host timer capability.
//!
//! The core never owns a clock. Anything that must happen later is handed to
//! the host as a [`TimerEvent`]; when the timer fires the host feeds the same
//! event back through `Card::handle(CardEvent::Timer(..))`.

use crate::gesture::ScrollToken;
use crate::machine::CommitHandle;
use crate::particles::{Emitter, ParticleHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Pending open should be committed.
    Commit(CommitHandle),
    /// The "scrolling" flag window armed with this token ran out.
    ScrollIdle(ScrollToken),
    /// Periodic emitter tick.
    Emit(Emitter),
    /// A particle outlived its animation.
    Expire(ParticleHandle),
    /// Remove the burst with this generation.
    ClearBurst(u64),
}

pub trait Timers {
    /// Fire `event` once after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId;
    /// Fire `event` every `period_ms` until cleared.
    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerId;
    /// Cancel a timeout or interval. Unknown or already fired ids are ignored.
    fn clear(&mut self, id: TimerId);
}
