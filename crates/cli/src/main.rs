//! Fraudwatch CLI - Main entry point
//!
//! ```bash
//! fraudwatch init
//! fraudwatch rule add --name large-rub --expression "amount >= 1000 AND currency = 'RUB'" --priority 1
//! fraudwatch rule validate "amount>100 and currency='RUB'"
//! fraudwatch rule list
//! fraudwatch rule disable <id>
//! fraudwatch evaluate --amount 101.51 --currency RUB --merchant-id merchant_001
//! ```

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "fraudwatch")]
#[command(about = "Fraudwatch - rule-based fraud detection", long_about = None)]
struct Cli {
    /// SQLite database file path
    #[arg(long, default_value = "data/fraudwatch.db", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,

    /// Fraud rule management
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Evaluate a transaction against the enabled rules
    Evaluate {
        /// Transaction amount
        #[arg(long)]
        amount: Decimal,
        /// 3-letter currency code
        #[arg(long)]
        currency: String,
        /// Merchant id
        #[arg(long)]
        merchant_id: Option<String>,
        /// Originating IP address
        #[arg(long)]
        ip_address: Option<String>,
        /// Device id
        #[arg(long)]
        device_id: Option<String>,
        /// User id (random when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,
    },
}

#[derive(Subcommand)]
enum RuleAction {
    /// Create a rule from DSL text (stored in normalized form)
    Add {
        /// Globally unique rule name
        #[arg(long)]
        name: String,
        /// Rule DSL expression
        #[arg(long)]
        expression: String,
        /// Lower priority evaluates first
        #[arg(long, default_value = "100")]
        priority: i32,
        /// Human-readable description
        #[arg(long, default_value = "")]
        description: String,
        /// Create the rule disabled
        #[arg(long)]
        disabled: bool,
    },

    /// List all rules
    List,

    /// Disable a rule (logical delete)
    Disable {
        /// Rule id
        id: Uuid,
    },

    /// Validate DSL text without storing anything
    Validate {
        /// Rule DSL expression
        expression: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init(&cli.db).await?,

        Commands::Rule { action } => match action {
            RuleAction::Add {
                name,
                expression,
                priority,
                description,
                disabled,
            } => {
                commands::rule_add(&cli.db, name, expression, priority, description, !disabled)
                    .await?
            }
            RuleAction::List => commands::rule_list(&cli.db).await?,
            RuleAction::Disable { id } => commands::rule_disable(&cli.db, id).await?,
            RuleAction::Validate { expression } => commands::rule_validate(&expression)?,
        },

        Commands::Evaluate {
            amount,
            currency,
            merchant_id,
            ip_address,
            device_id,
            user_id,
        } => {
            commands::evaluate(
                &cli.db,
                amount,
                currency,
                merchant_id,
                ip_address,
                device_id,
                user_id.unwrap_or_else(Uuid::new_v4),
            )
            .await?
        }
    }

    Ok(())
}
