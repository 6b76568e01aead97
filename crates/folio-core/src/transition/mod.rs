mod controller;
mod phase;

pub use controller::{
    NavigationSnapshot, NavigatorEvent, RejectReason, RequestOutcome, TransitionController,
    TransitionState,
};
pub use phase::{AnimationPhase, Direction, TransitionMode};
