//! Swap submission boundary

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{SubmissionCfg, SubmissionMode};
use crate::domain::swap::SwapFormState;
use crate::shared::utils::generate_id;

/// Outcome shown to the user after submitting
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    pub success: bool,
    pub message: String,
}

impl SubmitResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Accepts a completed form; failures are reported in the result
#[async_trait]
pub trait SwapSubmitter: Send + Sync {
    async fn submit(&self, state: &SwapFormState) -> SubmitResult;
}

/// Pretends to execute the swap after a fixed delay
pub struct SimulatedSubmitter {
    delay: Duration,
    mode: SubmissionMode,
}

impl SimulatedSubmitter {
    pub fn new(mode: SubmissionMode, delay: Duration) -> Self {
        Self { delay, mode }
    }

    pub fn from_config(cfg: &SubmissionCfg) -> Self {
        Self::new(cfg.mode, Duration::from_millis(cfg.delay_ms))
    }

    pub fn succeeding() -> Self {
        Self::new(SubmissionMode::Simulate, Duration::ZERO)
    }

    pub fn failing() -> Self {
        Self::new(SubmissionMode::Fail, Duration::ZERO)
    }
}

#[async_trait]
impl SwapSubmitter for SimulatedSubmitter {
    async fn submit(&self, state: &SwapFormState) -> SubmitResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (from, to) = match (&state.from_token, &state.to_token) {
            (Some(from), Some(to)) => (from.symbol.as_str(), to.symbol.as_str()),
            _ => return SubmitResult::failure("Swap failed: token selection incomplete"),
        };

        match self.mode {
            SubmissionMode::Simulate => {
                let receipt = generate_id();
                info!(receipt = %receipt, "Simulated swap {} {} -> {} {}", state.from_amount, from, state.to_amount, to);
                SubmitResult::success(format!(
                    "Successfully swapped {} {} for {} {} (receipt {})",
                    state.from_amount, from, state.to_amount, to, receipt
                ))
            }
            SubmissionMode::Fail => {
                warn!("Rejected swap {} -> {}", from, to);
                SubmitResult::failure("Swap failed. Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Token;

    fn completed() -> SwapFormState {
        SwapFormState {
            from_token: Some(Token::new("ETH", Some(2000.0))),
            to_token: Some(Token::new("USDC", Some(1.0))),
            from_amount: "1".to_string(),
            to_amount: "2000".to_string(),
            last_edited: None,
        }
    }

    #[tokio::test]
    async fn test_simulated_success() {
        let result = SimulatedSubmitter::succeeding().submit(&completed()).await;
        assert!(result.success);
        assert!(result.message.starts_with("Successfully swapped 1 ETH for 2000 USDC"));
    }

    #[tokio::test]
    async fn test_failing_stub() {
        let result = SimulatedSubmitter::failing().submit(&completed()).await;
        assert_eq!(result, SubmitResult::failure("Swap failed. Please try again."));
    }

    #[tokio::test]
    async fn test_incomplete_form_fails() {
        let mut state = completed();
        state.to_token = None;
        let result = SimulatedSubmitter::succeeding().submit(&state).await;
        assert!(!result.success);
    }
}
