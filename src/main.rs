//! Rebalance-reviewers entrypoint, run as a pull request workflow step.

use std::process::ExitCode;

use ortho_config::OrthoConfig;
use reviewer_rebalancer::github::event::running_in_actions;
use reviewer_rebalancer::logging::init_logging;
use reviewer_rebalancer::report::report_failure;
use reviewer_rebalancer::{
    ActionsContext, OctocrabReviewerGateway, PersonalAccessToken, RebalanceError,
    RebalancerConfig, ReviewerRebalancer,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if report_failure(&error, running_in_actions()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RebalanceError> {
    let config = load_config()?;
    init_logging()?;

    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    tracing::info!("Token obtained");

    let locator = config.resolve_locator(&ActionsContext::from_env())?;
    tracing::info!(
        "Owner: {}, Repo: {}, PR Number: {}",
        locator.owner().as_str(),
        locator.repository().as_str(),
        locator.number().get()
    );

    let gateway = OctocrabReviewerGateway::for_token(&token, &locator)?;
    ReviewerRebalancer::new(&gateway).rebalance(&locator).await?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RebalanceError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RebalancerConfig, RebalanceError> {
    RebalancerConfig::load().map_err(|error| RebalanceError::Configuration {
        message: error.to_string(),
    })
}
