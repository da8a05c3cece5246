use crate::reports;
use clap::Args;
use std::path::PathBuf;
use tourforge::api;
use tourforge::error::TfResult;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// City file, one `x y` pair per line
    #[arg(short, long)]
    pub cities: PathBuf,

    /// Comma-separated city indices, e.g. "0,3,2,1"
    #[arg(short, long)]
    pub order: String,
}

pub fn run(args: ValidateArgs) -> TfResult<()> {
    let eval = api::evaluate_order(&args.cities, &args.order)?;
    reports::print_order_report(&eval);
    Ok(())
}
