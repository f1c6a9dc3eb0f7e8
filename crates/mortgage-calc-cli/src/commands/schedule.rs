use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use mortgage_calc_core::mortgage::{self, MortgageLimits, MortgageRequest};
use mortgage_calc_core::schedule::{annuity_payment, Prepayment, PrepaymentStrategy};

use crate::input;

/// Arguments for a mortgage schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price
    #[arg(long)]
    pub total_amount: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 12 for 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Prepayment as MONTH:AMOUNT, may be repeated
    #[arg(long = "prepayment", value_parser = parse_prepayment, allow_hyphen_values = true)]
    pub prepayments: Vec<Prepayment>,

    /// reduce_payment or reduce_term (anything else reduces the term)
    #[arg(long, default_value = "reduce_payment")]
    pub strategy: String,

    /// Skip the loan, rate and down payment limits
    #[arg(long)]
    pub no_limits: bool,
}

/// Arguments for a single annuity payment
#[derive(Args)]
pub struct AnnuityArgs {
    /// Outstanding balance
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub annual_rate: Decimal,

    /// Remaining term in months
    #[arg(long)]
    pub months: u32,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: MortgageRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageRequest {
            total_amount: args
                .total_amount
                .ok_or("--total-amount is required (or provide --input)")?,
            down_payment: args.down_payment.unwrap_or(Decimal::ZERO),
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            prepayments: args.prepayments,
            strategy: PrepaymentStrategy::from(args.strategy.as_str()),
            apply_limits: !args.no_limits,
            limits: MortgageLimits::default(),
        }
    };

    let result = mortgage::calculate_mortgage(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_annuity(args: AnnuityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.annual_rate < Decimal::ZERO {
        return Err("--annual-rate cannot be negative".into());
    }
    let monthly_rate = args.annual_rate / dec!(12) / dec!(100);
    let payment = annuity_payment(args.principal, monthly_rate, args.months);
    Ok(json!({
        "result": {
            "monthly_payment": payment,
            "monthly_rate": monthly_rate,
            "months": args.months,
        }
    }))
}

/// Parse `MONTH:AMOUNT`, e.g. `12:500000`.
fn parse_prepayment(s: &str) -> Result<Prepayment, String> {
    let (month, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MONTH:AMOUNT, got '{s}'"))?;
    let month: i64 = month
        .trim()
        .parse()
        .map_err(|e| format!("invalid month '{month}': {e}"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(Prepayment::new(month, amount))
}
