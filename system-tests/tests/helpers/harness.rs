// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Contract Target Harness
// Description: Resolves the deployment under test and builds clients for it.
// Purpose: Give every suite the same target, timeout, and session setup.
// Dependencies: favorites-client, system-tests
// ============================================================================

use std::time::Duration;

use favorites_client::ClientConfig;
use favorites_client::FavoritesClient;
use favorites_contract::MessageCheck;
use system_tests::config::SystemTestConfig;
use url::Url;

use super::contract_stub::ContractStubHandle;
use super::contract_stub::spawn_contract_stub;
use super::readiness::wait_for_target_ready;
use super::timeouts::resolve_timeout;

/// Default per-request timeout for suites.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Deployment under test plus the stub that backs it, when one was started.
pub struct ContractTarget {
    config: SystemTestConfig,
    base_url: Url,
    stub: Option<ContractStubHandle>,
}

impl ContractTarget {
    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the loopback stub, or `None` for an external deployment.
    pub fn stub(&self) -> Option<&ContractStubHandle> {
        self.stub.as_ref()
    }

    /// Returns the configured message comparison mode.
    pub fn message_check(&self) -> MessageCheck {
        self.config.message_check
    }

    /// Builds a client config with the resolved timeout.
    pub fn client_config(&self, timeout: Duration) -> Result<ClientConfig, String> {
        ClientConfig::new(self.base_url.clone())
            .map(|config| config.with_timeout(resolve_timeout(timeout, &self.config)))
            .map_err(|err| err.to_string())
    }

    /// Builds a client with an empty cookie jar.
    pub fn client(&self, timeout: Duration) -> Result<FavoritesClient, String> {
        FavoritesClient::new(self.client_config(timeout)?).map_err(|err| err.to_string())
    }

    /// Builds a client and logs it in, failing when no session cookie is stored.
    pub async fn session(&self, timeout: Duration) -> Result<FavoritesClient, String> {
        let client = self.client(timeout)?;
        let info = client.login().await.map_err(|err| format!("login failed: {err}"))?;
        if !info.cookie_set || !client.has_session() {
            return Err(format!("login returned {} without a session cookie", info.status));
        }
        Ok(client)
    }
}

/// Resolves the target from the environment, starting the stub when no URL is set.
pub async fn resolve_target() -> Result<ContractTarget, String> {
    let config = SystemTestConfig::load()?;
    let (base_url, stub) = match config.base_url.clone() {
        Some(url) => (url, None),
        None => {
            let stub = spawn_contract_stub()?;
            (stub.base_url().clone(), Some(stub))
        }
    };
    let target = ContractTarget {
        config,
        base_url,
        stub,
    };
    let probe = target.client(REQUEST_TIMEOUT)?;
    wait_for_target_ready(&probe, resolve_timeout(Duration::from_secs(10), &target.config))
        .await?;
    Ok(target)
}
