use serde::{Deserialize, Serialize};

/// How a navigation request is sequenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Exit the old page first, then swap after the kickoff delay (gestures)
    #[default]
    Sequential,
    /// Swap immediately (explicit navigation)
    Direct,
}

/// Direction the rendering layer should slide in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Lower order to higher order
    Forward,
    Backward,
}

impl Direction {
    /// Direction for moving from `from` to `to` by catalog order
    pub fn between(from: u32, to: u32) -> Self {
        if to >= from {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Single animation preset selector for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    #[default]
    Idle,
    ExitingForward,
    ExitingBackward,
    EnteringForward,
    EnteringBackward,
}

impl AnimationPhase {
    pub fn exiting(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::ExitingForward,
            Direction::Backward => Self::ExitingBackward,
        }
    }

    pub fn entering(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self::EnteringForward,
            Direction::Backward => Self::EnteringBackward,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Idle => None,
            Self::ExitingForward | Self::EnteringForward => Some(Direction::Forward),
            Self::ExitingBackward | Self::EnteringBackward => Some(Direction::Backward),
        }
    }
}
