// File operations against a configured instance. Each operation is one
// blocking HTTP round trip; the instance gate must have passed before any
// of these are called.

use crate::config::ConfigStore;
use crate::error::{Error, Result};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Build the one blocking client shared by the handshake and file calls.
/// Requests are bounded so a hung server cannot block the CLI forever.
/// With `allow_insecure` the client also accepts self-signed certificates.
pub fn http_client(allow_insecure: bool) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .danger_accept_invalid_certs(allow_insecure)
        .build()
        .map_err(Error::Network)
}

/// Client bound to the configured instance URI.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// One entry of the server's file listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteFile {
    pub key: String,
    pub size: i64,
    pub last_modified: String,
    #[serde(default)]
    pub storage_class: String,
    #[serde(default)]
    pub owner: Owner,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Owner {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListFilesResponse {
    contents: Vec<RemoteFile>,
}

fn expect_ok(resp: Response) -> Result<Response> {
    if resp.status() != StatusCode::OK {
        return Err(Error::UnexpectedStatus(resp.status()));
    }
    Ok(resp)
}

impl ApiClient {
    /// Bind a client to the instance URI currently on disk.
    pub fn from_store(store: &ConfigStore, client: Client) -> Result<Self> {
        let config = store.load()?;
        Ok(ApiClient {
            client,
            base_url: config.instance_uri,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/file`: fetch the full listing.
    pub fn list_files(&self) -> Result<Vec<RemoteFile>> {
        let resp = self
            .client
            .get(self.url("/api/file"))
            .send()
            .map_err(Error::Network)?;
        let listing: ListFilesResponse = expect_ok(resp)?.json().map_err(Error::Network)?;
        Ok(listing.contents)
    }

    /// `POST /api/file?share=<bool>`: multipart upload of one local file.
    /// When sharing, the response body carries the public link.
    pub fn upload(&self, path: &Path, share: bool) -> Result<Option<String>> {
        let file = File::open(path)?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();

        let part = multipart::Part::reader(file)
            .file_name(file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(Error::Network)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("name", file_name);

        let resp = self
            .client
            .post(self.url("/api/file"))
            .query(&[("share", share)])
            .multipart(form)
            .send()
            .map_err(Error::Network)?;
        let resp = expect_ok(resp)?;

        if share {
            let link = resp.text().map_err(Error::Network)?;
            Ok(Some(link.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// `DELETE /api/file` with the file name in a JSON body.
    pub fn remove(&self, file_name: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/api/file"))
            .json(&json!({ "fileName": file_name }))
            .send()
            .map_err(Error::Network)?;
        expect_ok(resp)?;
        Ok(())
    }

    /// `PUT /api/file/?oldName=&newName=`. The server reads the query
    /// parameters; the names travel in the body as well.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/api/file/"))
            .query(&[("oldName", old_name), ("newName", new_name)])
            .json(&json!({ "oldName": old_name, "newName": new_name }))
            .send()
            .map_err(Error::Network)?;
        expect_ok(resp)?;
        Ok(())
    }

    /// `GET /api/file/download?name=`: stream the body into `dest`.
    /// `dest` defaults to the remote name in the current directory.
    pub fn download(&self, file_name: &str, dest: Option<PathBuf>) -> Result<PathBuf> {
        let dest = dest.unwrap_or_else(|| PathBuf::from(file_name));
        let resp = self
            .client
            .get(self.url("/api/file/download"))
            .query(&[("name", file_name)])
            .send()
            .map_err(Error::Network)?;
        let mut resp = expect_ok(resp)?;

        let mut out = File::create(&dest)?;
        resp.copy_to(&mut out).map_err(Error::Network)?;
        Ok(dest)
    }
}
