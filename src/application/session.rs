//! Line-driven swap form session

use anyhow::Result;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::services::MarketDataService;
use crate::application::submission::SwapSubmitter;
use crate::application::swap_form::{FeedStatus, SwapForm};
use crate::shared::types::Side;

pub const HELP: &str = "\
Commands:
  send <SYMBOL>        choose the token to send
  receive <SYMBOL>     choose the token to receive
  pay <amount>         edit the amount to send (empty clears it)
  get <amount>         edit the amount to receive (empty clears it)
  max                  send the largest amount within the limit
  flip                 swap both sides
  tokens <side> [q]    list tokens for a side, optionally filtered
  submit               confirm the swap
  retry                reload token prices
  reset                clear the form
  show                 print the form
  quit                 leave";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Select(Side, String),
    Edit(Side, String),
    Max,
    Flip,
    Tokens(Side, String),
    Submit,
    Retry,
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "send" | "receive" if rest.is_empty() => {
                return Err(anyhow::anyhow!("Usage: {} <SYMBOL>", word));
            }
            "send" => SessionCommand::Select(Side::From, rest.to_string()),
            "receive" => SessionCommand::Select(Side::To, rest.to_string()),
            "pay" => SessionCommand::Edit(Side::From, rest.to_string()),
            "get" => SessionCommand::Edit(Side::To, rest.to_string()),
            "max" => SessionCommand::Max,
            "flip" | "swap" => SessionCommand::Flip,
            "tokens" => {
                let (side, search) = match rest.split_once(char::is_whitespace) {
                    Some((side, search)) => (side, search.trim()),
                    None => (rest, ""),
                };
                SessionCommand::Tokens(side.parse()?, search.to_string())
            }
            "submit" | "confirm" => SessionCommand::Submit,
            "retry" => SessionCommand::Retry,
            "reset" => SessionCommand::Reset,
            "show" | "" => SessionCommand::Show,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(anyhow::anyhow!("Unknown command: {} (try `help`)", other)),
        };
        Ok(command)
    }
}

pub struct Session {
    form: SwapForm,
    service: MarketDataService,
    submitter: Arc<dyn SwapSubmitter>,
}

impl Session {
    pub fn new(form: SwapForm, service: MarketDataService, submitter: Arc<dyn SwapSubmitter>) -> Self {
        Self {
            form,
            service,
            submitter,
        }
    }

    pub fn form(&self) -> &SwapForm {
        &self.form
    }

    /// Load prices, then read commands from stdin until `quit` or EOF
    pub async fn run(mut self) -> Result<()> {
        self.form.load(&self.service).await;
        println!("{}", render(&self.form));
        println!("Type `help` for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match line.parse::<SessionCommand>() {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            match self.execute(command).await {
                Some(output) => println!("{}", output),
                None => break,
            }
        }
        Ok(())
    }

    /// Apply one command and describe the result; `None` ends the session
    pub async fn execute(&mut self, command: SessionCommand) -> Option<String> {
        debug!(?command, "session command");
        let output = match command {
            SessionCommand::Select(side, symbol) => match self.form.select(side, &symbol) {
                Ok(()) => render(&self.form),
                Err(e) => e.to_string(),
            },
            SessionCommand::Edit(side, raw) => {
                self.form.edit(side, &raw);
                render(&self.form)
            }
            SessionCommand::Max => {
                if self.form.apply_max() {
                    render(&self.form)
                } else {
                    "Select a priced token to send first".to_string()
                }
            }
            SessionCommand::Flip => {
                if self.form.flip().await {
                    render(&self.form)
                } else {
                    "Select both tokens before swapping sides".to_string()
                }
            }
            SessionCommand::Tokens(side, search) => render_tokens(&self.form, side, &search),
            SessionCommand::Submit => {
                let submitted = self.form.submit(self.submitter.as_ref()).await.is_some();
                if submitted {
                    render(&self.form)
                } else {
                    render_errors(&self.form)
                }
            }
            SessionCommand::Retry => {
                self.form.load(&self.service).await;
                render(&self.form)
            }
            SessionCommand::Reset => {
                self.form.reset();
                render(&self.form)
            }
            SessionCommand::Show => render(&self.form),
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => return None,
        };
        Some(output)
    }
}

/// Text rendering of the whole form
pub fn render(form: &SwapForm) -> String {
    match form.status() {
        FeedStatus::Loading => return "Loading token prices...".to_string(),
        FeedStatus::Failed(message) => {
            return format!("Error: {}\nType `retry` to try again.", message)
        }
        FeedStatus::Ready => {}
    }

    let mut out = String::new();
    render_side(&mut out, form, Side::From, "Amount to send");
    let _ = writeln!(out, "  [flip]");
    render_side(&mut out, form, Side::To, "Amount to receive");

    if let Some(rate) = form.rate_line() {
        let _ = writeln!(out, "{}", rate);
    }
    if let Some(result) = form.submit_result() {
        let tag = if result.success { "OK" } else { "FAILED" };
        let _ = writeln!(out, "[{}] {}", tag, result.message);
    }
    let _ = write!(
        out,
        "Confirm Swap: {}",
        if form.is_form_valid() { "ready" } else { "incomplete" }
    );
    out
}

fn render_side(out: &mut String, form: &SwapForm, side: Side, label: &str) {
    let state = form.state();
    let symbol = state
        .token(side)
        .map(|t| t.symbol.as_str())
        .unwrap_or("Select token");
    let price = form.price_line(side).unwrap_or_default();
    let _ = writeln!(out, "{:<18} {:<12} {}", label, symbol, price);

    let amount = state.amount(side);
    let amount = if amount.is_empty() { "0.0" } else { amount };
    let hint = if side == Side::From && form.is_amount_over_limit() {
        let max = state
            .token(side)
            .and_then(|t| t.price)
            .and_then(|p| form.validator().max_amount_display(p))
            .unwrap_or_default();
        format!("Max: {}", max)
    } else {
        form.usd_value(side).unwrap_or_default()
    };
    let _ = writeln!(out, "  {:<30} {}", amount, hint);
}

fn render_errors(form: &SwapForm) -> String {
    let mut out = String::new();
    for (field, error) in form.errors() {
        let _ = writeln!(out, "{}: {}", field, error);
    }
    out.trim_end().to_string()
}

fn render_tokens(form: &SwapForm, side: Side, search: &str) -> String {
    let tokens = form.picker(side, search);
    if tokens.is_empty() {
        return "No tokens found".to_string();
    }
    let mut out = String::new();
    for token in tokens {
        let price = token.price.map(crate::shared::utils::format_price).unwrap_or_default();
        let _ = writeln!(out, "{:<12} {}", token.symbol, price);
    }
    out.trim_end().to_string()
}
