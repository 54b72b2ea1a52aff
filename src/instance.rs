// Instance verification and the per-run gate in front of file operations.
//
// A "PUT instance" is identified by answering `PUT <uri>/api/signature` with
// 200 and a JSON body whose `verifier` field equals the shared token below.
// This is a sanity check against pointing the CLI at an unrelated server,
// not an authentication mechanism: any server echoing the literal passes.

use crate::config::{Config, ConfigStore};
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Fixed token a compatible instance returns from the handshake endpoint.
pub const VERIFIER_TOKEN: &str = "ArafOrzCatMan";

/// Handshake endpoint, relative to the instance URI. (An earlier protocol
/// revision used `/verifier`; only `/api/signature` is supported.)
const SIGNATURE_ENDPOINT: &str = "/api/signature";

/// Pure scheme precondition, checked before any I/O.
fn check_scheme(uri: &str, allow_insecure: bool) -> Result<()> {
    if uri.starts_with("https://") || (allow_insecure && uri.starts_with("http://")) {
        Ok(())
    } else {
        Err(Error::InvalidUriScheme)
    }
}

/// Check that `uri` points at a compatible instance. Persisting the URI is
/// the caller's job; on failure this only returns the error and leaves any
/// stored configuration untouched.
pub fn verify_instance(client: &Client, uri: &str, allow_insecure: bool) -> Result<()> {
    check_scheme(uri, allow_insecure)?;

    let url = format!("{}{}", uri, SIGNATURE_ENDPOINT);
    let resp = client.put(url).send().map_err(Error::Network)?;
    if resp.status() != StatusCode::OK {
        return Err(Error::Verification(format!(
            "handshake returned {}",
            resp.status()
        )));
    }

    let body: serde_json::Value = resp
        .json()
        .map_err(|_| Error::Verification("handshake body is not valid JSON".into()))?;
    match body.get("verifier").and_then(serde_json::Value::as_str) {
        Some(token) if token == VERIFIER_TOKEN => Ok(()),
        _ => Err(Error::Verification("verifier token mismatch".into())),
    }
}

/// Tracks whether the stored instance URI has been verified during this run,
/// so repeated commands inside one invocation handshake at most once. Owned
/// by `main` and passed to each call site; not persisted.
pub struct InstanceGate {
    verified: bool,
}

impl InstanceGate {
    pub fn new() -> Self {
        InstanceGate { verified: false }
    }

    /// Make sure a verified instance URI is configured, prompting for one
    /// via `prompt_uri` when none is stored. No-op once verified this run.
    pub fn ensure_ready<F>(
        &mut self,
        store: &ConfigStore,
        client: &Client,
        allow_insecure: bool,
        prompt_uri: F,
    ) -> Result<()>
    where
        F: FnOnce() -> Result<String>,
    {
        if self.verified {
            return Ok(());
        }

        match store.load() {
            Ok(config) if !config.instance_uri.is_empty() => {
                verify_instance(client, &config.instance_uri, allow_insecure)?;
                // Value on disk is unchanged, no re-save needed.
                self.verified = true;
                Ok(())
            }
            _ => {
                let instance_uri = prompt_uri()?.trim().to_string();
                verify_instance(client, &instance_uri, allow_insecure)?;
                store.save(&Config { instance_uri })?;
                self.verified = true;
                println!("Instance URI saved.");
                Ok(())
            }
        }
    }

    /// Administrative "set a new instance URI": drop any verified state,
    /// then run the same verify-and-save sequence.
    pub fn set_instance(
        &mut self,
        store: &ConfigStore,
        client: &Client,
        allow_insecure: bool,
        uri: &str,
    ) -> Result<()> {
        self.verified = false;
        verify_instance(client, uri, allow_insecure)?;
        store.save(&Config {
            instance_uri: uri.to_string(),
        })?;
        self.verified = true;
        Ok(())
    }
}

impl Default for InstanceGate {
    fn default() -> Self {
        Self::new()
    }
}
