// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probe for the favorites endpoint.
// Purpose: Ensure the target accepts connections without arbitrary sleeps.
// Dependencies: favorites-client, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use favorites_client::FavoritesClient;
use favorites_contract::FavoriteForm;
use tokio::time::sleep;

/// Polls the favorites endpoint until any HTTP response arrives or `timeout` expires.
///
/// The probe is a bodiless `GET`, which the contract answers with 405 and never
/// persists.
pub async fn wait_for_target_ready(
    client: &FavoritesClient,
    timeout: Duration,
) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match client.get_favorites(&FavoriteForm::new()).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "target readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(50)).await;
            }
        }
    }
}
