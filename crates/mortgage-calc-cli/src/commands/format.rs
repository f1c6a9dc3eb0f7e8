use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use mortgage_calc_core::format::format_currency;

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format
    #[arg(long)]
    pub value: Decimal,

    /// Show two fractional digits
    #[arg(long)]
    pub decimals: bool,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "result": {
            "formatted": format_currency(args.value, args.decimals),
        }
    }))
}
