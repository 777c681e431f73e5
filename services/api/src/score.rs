use std::path::PathBuf;

use clap::Args;
use crediflow::config::AppConfig;
use crediflow::error::AppError;
use crediflow::scoring::SubjectId;

use crate::infra::build_score_service;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Subject identifier (or a legacy identity known to the fallback table)
    #[arg(long)]
    pub(crate) subject: String,
    /// Override the configured ledger data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) fn run_score(mut args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(data_dir) = args.data_dir.take() {
        config.data.data_dir = data_dir;
    }

    let service = build_score_service(&config);
    let report = service.score_subject(&SubjectId(args.subject))?;

    println!(
        "[{}] {}",
        report.generated_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
        report.result.narrative
    );
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serializes")
    );
    Ok(())
}
