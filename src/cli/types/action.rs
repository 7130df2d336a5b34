//! The closed set of recordable game actions.

use crate::error::StatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One recordable in-game action.
///
/// The taxonomy is closed: anything outside these sixteen codes is rejected
/// at the append boundary rather than stored as an opaque string.
///
/// # Examples
///
/// ```rust
/// use courtlog::ActionType;
///
/// let action: ActionType = "2PM".parse().unwrap();
/// assert_eq!(action, ActionType::TwoPointMade);
/// assert_eq!(action.points(), 2);
/// assert_eq!(action.to_string(), "2PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    TwoPointMade,
    TwoPointMiss,
    ThreePointMade,
    ThreePointMiss,
    FreeThrowMade,
    FreeThrowMiss,
    OffensiveRebound,
    DefensiveRebound,
    Assist,
    Steal,
    Block,
    Turnover,
    PersonalFoul,
    FoulDrawn,
    SubIn,
    SubOut,
}

impl ActionType {
    /// All sixteen action codes, in box-score column order.
    pub const ALL: [ActionType; 16] = [
        ActionType::TwoPointMade,
        ActionType::TwoPointMiss,
        ActionType::ThreePointMade,
        ActionType::ThreePointMiss,
        ActionType::FreeThrowMade,
        ActionType::FreeThrowMiss,
        ActionType::OffensiveRebound,
        ActionType::DefensiveRebound,
        ActionType::Assist,
        ActionType::Steal,
        ActionType::Block,
        ActionType::Turnover,
        ActionType::PersonalFoul,
        ActionType::FoulDrawn,
        ActionType::SubIn,
        ActionType::SubOut,
    ];

    /// The short code used on the wire, in the database, and in exports.
    pub fn code(&self) -> &'static str {
        match self {
            ActionType::TwoPointMade => "2PM",
            ActionType::TwoPointMiss => "2PA",
            ActionType::ThreePointMade => "3PM",
            ActionType::ThreePointMiss => "3PA",
            ActionType::FreeThrowMade => "FTM",
            ActionType::FreeThrowMiss => "FTA",
            ActionType::OffensiveRebound => "OREB",
            ActionType::DefensiveRebound => "DREB",
            ActionType::Assist => "AST",
            ActionType::Steal => "STL",
            ActionType::Block => "BLK",
            ActionType::Turnover => "TOV",
            ActionType::PersonalFoul => "PF",
            ActionType::FoulDrawn => "PFD",
            ActionType::SubIn => "SUB_IN",
            ActionType::SubOut => "SUB_OUT",
        }
    }

    /// Points this action adds to the scoring team (0 for non-scoring actions).
    pub fn points(&self) -> u32 {
        match self {
            ActionType::TwoPointMade => 2,
            ActionType::ThreePointMade => 3,
            ActionType::FreeThrowMade => 1,
            _ => 0,
        }
    }

    /// True for the three actions that move the score.
    pub fn is_scoring(&self) -> bool {
        self.points() > 0
    }

    /// True for substitution bookkeeping actions, which carry no stat effect.
    pub fn is_substitution(&self) -> bool {
        matches!(self, ActionType::SubIn | ActionType::SubOut)
    }

    /// True for field-goal attempts (made or missed, two or three points).
    pub fn is_field_goal_attempt(&self) -> bool {
        matches!(
            self,
            ActionType::TwoPointMade
                | ActionType::TwoPointMiss
                | ActionType::ThreePointMade
                | ActionType::ThreePointMiss
        )
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ActionType {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "2PM" => Ok(ActionType::TwoPointMade),
            "2PA" => Ok(ActionType::TwoPointMiss),
            "3PM" => Ok(ActionType::ThreePointMade),
            "3PA" => Ok(ActionType::ThreePointMiss),
            "FTM" => Ok(ActionType::FreeThrowMade),
            "FTA" => Ok(ActionType::FreeThrowMiss),
            "OREB" => Ok(ActionType::OffensiveRebound),
            "DREB" => Ok(ActionType::DefensiveRebound),
            "AST" => Ok(ActionType::Assist),
            "STL" => Ok(ActionType::Steal),
            "BLK" => Ok(ActionType::Block),
            "TOV" => Ok(ActionType::Turnover),
            "PF" => Ok(ActionType::PersonalFoul),
            "PFD" => Ok(ActionType::FoulDrawn),
            "SUB_IN" => Ok(ActionType::SubIn),
            "SUB_OUT" => Ok(ActionType::SubOut),
            _ => Err(StatError::InvalidAction {
                action: s.to_string(),
            }),
        }
    }
}
