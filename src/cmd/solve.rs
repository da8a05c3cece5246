use crate::reports;
use clap::{ArgMatches, Args};
use std::path::PathBuf;
use tourforge::api::{self, ReportFormat};
use tourforge::config::RunParams;
use tourforge::error::{TfResult, TourForgeError};
use tourforge::optimizer::ProgressCallback;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// City file, one `x y` pair per line
    #[arg(short, long)]
    pub cities: PathBuf,

    /// JSON parameter file; flags given on the command line win
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Single island, no migration
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    #[arg(long, default_value_t = ReportFormat::Table, value_parser = ReportFormat::parse)]
    pub format: ReportFormat,

    #[command(flatten)]
    pub run: RunParams,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_epoch(&self, node: usize, epoch: usize, best_length: f64) {
        info!("node {} epoch {}: best {:.3}", node, epoch, best_length);
    }
}

pub fn run(args: SolveArgs, matches: Option<&ArgMatches>) -> TfResult<()> {
    let mut params = match &args.params {
        Some(path) => {
            info!("Loading parameters from {}", path.display());
            let mut file_params =
                RunParams::load_from_file(path).map_err(TourForgeError::Config)?;
            match matches {
                Some(m) => file_params.merge_from_cli(&args.run, m),
                None => warn!("No argument matches available, CLI overrides ignored"),
            }
            file_params
        }
        None => args.run.clone(),
    };

    if args.sequential {
        params = params.into_sequential();
    }

    info!(
        "Solving {} with {} node(s) x {} island(s), population {}",
        args.cities.display(),
        params.nodes,
        params.islands_per_node,
        params.population_size
    );

    let report = api::solve_file(&args.cities, params, &LogProgress)?;

    match args.format {
        ReportFormat::Table => reports::print_run_report(&report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
