//! Open/close state machine.
//!
//! [`StateMachine::step`] is a pure function of the current machine and one
//! [`Input`]; it returns the next machine and the effects the caller must
//! perform. Timers, particles and rendering never appear here.

use crate::config::CardConfig;
use smallvec::SmallVec;

/// Token for one scheduled commit. A `CommitElapsed` carrying any other
/// handle than the one held by `Opening` is stale and ignored, which is how a
/// cancelled commit is invalidated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommitHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenState {
    Closed,
    Opening(CommitHandle),
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// New open progress from the gesture accumulator.
    Progress(f32),
    /// Direct open request (click on the closed card).
    OpenRequested,
    CommitElapsed(CommitHandle),
    Close,
    Replay,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ScheduleCommit { handle: CommitHandle, delay_ms: u32 },
    CancelCommit(CommitHandle),
    /// Write this value through the accumulator.
    SyncProgress(f32),
    SetLetterOpen(bool),
    ClearScrolling,
    SetCelebration(bool),
    SpawnBurst,
    StartParticles,
    StopParticles,
    StartAmbient,
    StopAmbient,
    RestartCardStack,
    CloseLetterModal,
    ResetParallax,
}

pub type Effects = SmallVec<[Effect; 10]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateMachine {
    state: OpenState,
    issued: u64,
    commit_delay_ms: u32,
    cancel_threshold: f32,
    reduced_motion: bool,
}

impl StateMachine {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            state: OpenState::Closed,
            issued: 0,
            commit_delay_ms: config.commit_delay_ms,
            cancel_threshold: config.cancel_threshold,
            reduced_motion: config.reduced_motion,
        }
    }

    pub fn state(&self) -> OpenState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OpenState::Open
    }

    pub fn pending_commit(&self) -> Option<CommitHandle> {
        match self.state {
            OpenState::Opening(h) => Some(h),
            _ => None,
        }
    }

    pub fn step(self, input: Input) -> (Self, Effects) {
        let mut effects = Effects::new();
        let next = match (self.state, input) {
            (OpenState::Closed, Input::Progress(p)) if p >= 1.0 => self.begin_open(&mut effects),
            (OpenState::Closed, Input::OpenRequested) => self.begin_open(&mut effects),

            (OpenState::Opening(h), Input::Progress(p)) if p < self.cancel_threshold => {
                effects.push(Effect::CancelCommit(h));
                effects.push(Effect::SetLetterOpen(false));
                self.with_state(OpenState::Closed)
            }
            (OpenState::Opening(h), Input::CommitElapsed(fired)) if fired == h => {
                commit_effects(&mut effects);
                self.with_state(OpenState::Open)
            }

            (state, Input::Close) => {
                if let OpenState::Opening(h) = state {
                    effects.push(Effect::CancelCommit(h));
                }
                effects.extend([
                    Effect::SyncProgress(0.0),
                    Effect::SetLetterOpen(false),
                    Effect::ClearScrolling,
                    Effect::SetCelebration(false),
                    Effect::StopParticles,
                    Effect::StopAmbient,
                    Effect::CloseLetterModal,
                    Effect::ResetParallax,
                ]);
                self.with_state(OpenState::Closed)
            }

            (OpenState::Open, Input::Replay) => {
                effects.extend([
                    Effect::SpawnBurst,
                    Effect::StartParticles,
                    Effect::RestartCardStack,
                ]);
                self
            }

            // Everything else is a no-op: sub-threshold progress while closed,
            // re-entering Opening, gestures while open, stale commits, replay
            // before the card is open.
            _ => self,
        };
        if next.state != self.state {
            log::info!("[card] {:?} -> {:?}", self.state, next.state);
        }
        (next, effects)
    }

    fn begin_open(mut self, effects: &mut Effects) -> Self {
        effects.extend([
            Effect::SyncProgress(1.0),
            Effect::SetLetterOpen(true),
            Effect::ClearScrolling,
        ]);
        if self.reduced_motion {
            commit_effects(effects);
            return self.with_state(OpenState::Open);
        }
        self.issued += 1;
        let handle = CommitHandle(self.issued);
        effects.push(Effect::ScheduleCommit {
            handle,
            delay_ms: self.commit_delay_ms,
        });
        self.with_state(OpenState::Opening(handle))
    }

    fn with_state(mut self, state: OpenState) -> Self {
        self.state = state;
        self
    }
}

fn commit_effects(effects: &mut Effects) {
    effects.extend([
        Effect::SetCelebration(true),
        Effect::SpawnBurst,
        Effect::StartParticles,
        Effect::StartAmbient,
    ]);
}
