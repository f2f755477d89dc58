use clap::{Parser, Subcommand};
use token_common::{Address, Amount, Call};

#[derive(Debug, Parser)]
#[command(name = "token-node")]
#[command(about = "Single-owner token ledger CLI")]
pub struct Cli {
    /// Path to the JSON config file. Created with defaults when missing.
    #[arg(long, global = true, default_value = "config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a fresh ledger snapshot owned by OWNER
    Deploy {
        #[arg(long, required_unless_present = "genesis")]
        owner: Option<Address>,
        /// Units credited to the owner (defaults to 1,000,000)
        #[arg(long)]
        supply: Option<Amount>,
        /// Read owner and initial supply from a genesis JSON file instead
        #[arg(long, value_name = "FILE", conflicts_with_all = ["owner", "supply"])]
        genesis: Option<String>,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Apply one operation to the snapshot as CALLER
    Call {
        #[arg(long)]
        caller: Address,
        #[command(subcommand)]
        op: Operation,
    },
    /// Print ledger views
    Show {
        /// Account to report balance and whitelist status for
        #[arg(long)]
        account: Option<Address>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum Operation {
    Approve { spender: Address, amount: Amount },
    Transfer { to: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },
    Mint { to: Address, amount: Amount },
    Burn { from: Address, amount: Amount },
    /// Attach VALUE native funds and buy the same number of units
    Buy { value: Amount },
    Sell { amount: Amount },
    EditWhitelist { account: Address },
}

impl From<Operation> for Call {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Approve { spender, amount } => Call::Approve { spender, amount },
            Operation::Transfer { to, amount } => Call::Transfer { to, amount },
            Operation::TransferFrom { from, to, amount } => Call::TransferFrom { from, to, amount },
            Operation::Mint { to, amount } => Call::Mint { to, amount },
            Operation::Burn { from, amount } => Call::Burn { from, amount },
            Operation::Buy { value } => Call::Buy { value },
            Operation::Sell { amount } => Call::Sell { amount },
            Operation::EditWhitelist { account } => Call::EditWhitelist { account },
        }
    }
}
