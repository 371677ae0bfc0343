//! Application layer - use cases and services

pub mod commands;
pub mod services;
pub mod session;
pub mod submission;
pub mod swap_form;

pub use commands::{Cli, CommandExecutor, Commands};
pub use services::{MarketData, MarketDataService};
pub use session::{Session, SessionCommand};
pub use submission::{SimulatedSubmitter, SubmitResult, SwapSubmitter};
pub use swap_form::{FeedStatus, SwapForm};
