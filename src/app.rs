use crate::app_config::AppConfig;
use crate::dataset::load_into_session;
use crate::domain::events::SessionEvent;
use crate::position::{acquire, new_location_service};
use crate::presenter::present;
use crate::session::{Coordinator, SessionState};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError};
use tracing::{info, instrument};

/// Runs one session: acquires the position and loads the dataset concurrently, presents every
/// state change and returns the final state once both acquisitions have reported.
#[instrument(skip_all)]
pub async fn run(config: &AppConfig) -> Result<SessionState, AppError> {
    let (tx, rx) = mpsc::channel::<SessionEvent>(config.core().event_buffer_size());
    let coordinator = Coordinator::new(rx, config.selector().results());

    let presenter = task::spawn(present(coordinator.views()));
    let session = task::spawn(coordinator.listen());
    info!("✅  Started session");

    let location_service = new_location_service(config.location())?;
    let options = config.location().options();
    let position_tx = tx.clone();
    task::spawn(async move {
        acquire(location_service.as_ref(), options, position_tx).await;
    });

    task::spawn(load_into_session(
        config.dataset().source().clone(),
        config.dataset().schema().clone(),
        Client::new(),
        tx,
    ));

    let state = session.await?;
    presenter.await?;
    Ok(state)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not create the location service client: {0}")]
    LocationClient(#[from] reqwest::Error),
    #[error(transparent)]
    JoinError(#[from] JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::{AppConfigBuilder, Location};
    use crate::dataset::{DatasetErrorKind, DatasetSource};
    use crate::position::PositionError;
    use crate::session::{SessionPhase, Slot};
    use std::time::Duration;
    use test_log::test;

    fn nearest_names(state: &SessionState) -> Vec<&str> {
        state.results().iter().map(|r| r.record().attribute("name").unwrap()).collect()
    }

    #[test(tokio::test)]
    async fn finds_the_nearest_hospital() -> Result<(), AppError> {
        let config = AppConfigBuilder::new().build();

        let state = run(&config).await?;

        assert_eq!(state.phase(), SessionPhase::Selected);
        assert_eq!(nearest_names(&state), vec!["Victoria Hospital"]);
        assert_eq!(state.results()[0].record().attribute("fax"), Some("N/A"));
        Ok(())
    }

    #[test(tokio::test)]
    async fn finds_the_k_nearest_hospitals() -> Result<(), AppError> {
        let config = AppConfigBuilder::new().results(2).build();

        let state = run(&config).await?;

        assert_eq!(nearest_names(&state), vec!["Victoria Hospital", "Bowring Hospital"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn loads_the_dataset_without_a_location_service() -> Result<(), AppError> {
        let config = AppConfigBuilder::new().location(Location::Disabled).build();

        let state = run(&config).await?;

        assert_eq!(state.phase(), SessionPhase::PositionError(PositionError::Unsupported));
        assert_eq!(state.dataset().value().map(|d| d.len()), Some(3));
        Ok(())
    }

    #[test(tokio::test)]
    async fn reports_a_permission_denial_while_the_dataset_loads() -> Result<(), AppError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/position")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;
        let config = AppConfigBuilder::new()
            .location(Location::Http {
                url: format!("{}/position", server.url()),
                high_accuracy: true,
                timeout: Duration::from_secs(5),
            })
            .build();

        let state = run(&config).await?;

        mock.assert();
        assert_eq!(state.phase(), SessionPhase::PositionError(PositionError::PermissionDenied));
        assert!(matches!(state.dataset(), Slot::Ready(_)));
        assert!(state.results().is_empty());
        Ok(())
    }

    #[test(tokio::test)]
    async fn ends_in_a_dataset_error_for_a_missing_dataset() -> Result<(), AppError> {
        let source = DatasetSource::from(std::env::temp_dir().join("nearby-nowhere.csv").to_string_lossy().as_ref());
        let config = AppConfigBuilder::new().dataset_source(source).build();

        let state = run(&config).await?;

        assert_eq!(state.phase(), SessionPhase::DatasetError(DatasetErrorKind::Load));
        assert!(matches!(state.position(), Slot::Ready(_)));
        Ok(())
    }
}
