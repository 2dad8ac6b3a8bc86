//! Ladder-based opponent planner.
//!
//! This module plans a whole turn for one side:
//!
//! 1. **Rolls**: once per turn, for multi-action play and aggression
//!
//! 2. **Ladder walk**: each tier is an ordered list of candidate generators
//!    - Examples: "Emergency Defense", "Lethal Search", "Strategic Deployment"
//!    - The first generator that proposes a candidate wins, unless a blunder
//!      roll picks a random viable one instead
//!
//! 3. **Simulation**: chosen actions run on a private [`PlanBoard`] so the
//!    next ladder step sees their effect
//!
//! 4. **Termination**: the plan always ends with `EndTurn`
//!
//! # Core Components
//!
//! - [`OpponentPlanner`]: Main planner implementing [`crate::TurnProvider`]
//! - [`generators`]: One pure function per ladder step
//! - [`Score`]: Structured utility score attached to every candidate
//! - [`PlanContext`]: Shared blackboard for the generators
//! - [`lookahead`]: Expected-exchange projection for the expert ladder

pub mod board;
pub mod context;
pub mod generators;
pub mod lookahead;
pub mod planner;
pub mod scoring;
pub mod types;

// Re-export public API
pub use board::PlanBoard;
pub use context::PlanContext;
pub use lookahead::{Projection, project};
pub use planner::{OpponentPlanner, Rung};
pub use scoring::Score;
pub use types::{Candidate, Generator, PlanStep, Stance, TurnPlan};
