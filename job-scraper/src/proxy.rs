use crate::types::Result;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

pub const DEFAULT_PROXY_HOST: &str = "proxy.apify.com";
pub const DEFAULT_PROXY_PORT: u16 = 8000;
pub const DEFAULT_PROXY_USERNAME: &str = "groups-RESIDENTIAL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl ProxyConfig {
    /// Residential proxy on the default host with the given password
    pub fn residential(password: String) -> Self {
        Self {
            host: DEFAULT_PROXY_HOST.to_owned(),
            port: DEFAULT_PROXY_PORT,
            username: DEFAULT_PROXY_USERNAME.to_owned(),
            password,
        }
    }

    pub fn server_arg(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Chrome cannot take proxy credentials on the command line, so an unpacked
/// extension answering the auth challenge is loaded alongside `--proxy-server`.
/// The directory is removed when this value is dropped.
#[derive(Debug)]
pub struct ProxyAuthExtension {
    dir: TempDir,
}

impl ProxyAuthExtension {
    pub async fn write(proxy: &ProxyConfig) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("proxy-auth-").tempdir()?;
        tokio::fs::write(
            dir.path().join("manifest.json"),
            serde_json::to_vec_pretty(&manifest())?,
        )
        .await?;
        tokio::fs::write(dir.path().join("background.js"), background_script(proxy)?).await?;
        log::debug!("wrote proxy auth extension to {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn manifest() -> serde_json::Value {
    json!({
        "manifest_version": 3,
        "name": "Proxy Auth",
        "version": "1.0.0",
        "permissions": ["proxy", "webRequest", "webRequestAuthProvider"],
        "host_permissions": ["<all_urls>"],
        "background": { "service_worker": "background.js" },
    })
}

fn background_script(proxy: &ProxyConfig) -> Result<String> {
    let credentials = serde_json::to_string(&json!({
        "username": proxy.username,
        "password": proxy.password,
    }))?;
    Ok(format!(
        r#"const authCredentials = {credentials};

chrome.webRequest.onAuthRequired.addListener(
  (details, callback) => callback({{ authCredentials }}),
  {{ urls: ["<all_urls>"] }},
  ["asyncBlocking"]
);
"#
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    fn proxy() -> ProxyConfig {
        ProxyConfig {
            host: "proxy.example.com".to_owned(),
            port: 3128,
            username: "user".to_owned(),
            password: r#"pa"ss\word"#.to_owned(),
        }
    }

    #[test]
    fn test_residential_defaults() {
        let proxy = ProxyConfig::residential("secret".to_owned());
        assert_eq!(proxy.server_arg(), "http://proxy.apify.com:8000");
        assert_eq!(proxy.username, "groups-RESIDENTIAL");
    }

    #[test]
    fn test_background_script_escapes_credentials() {
        let script = background_script(&proxy()).unwrap();
        assert!(script.contains(r#"{"username":"user","password":"pa\"ss\\word"}"#));
        assert!(script.contains("onAuthRequired"));
    }

    #[tokio::test]
    async fn test_write_extension_files() {
        let extension = ProxyAuthExtension::write(&proxy()).await.unwrap();
        let manifest: serde_json::Value = serde_json::from_slice(
            &std::fs::read(extension.path().join("manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["manifest_version"], 3);
        assert_eq!(manifest["background"]["service_worker"], "background.js");
        let script = std::fs::read_to_string(extension.path().join("background.js")).unwrap();
        assert!(script.contains(r#""username":"user""#));
    }

    #[tokio::test]
    async fn test_extension_removed_on_drop() {
        let extension = ProxyAuthExtension::write(&proxy()).await.unwrap();
        let path = extension.path().to_path_buf();
        assert!(path.is_dir());
        drop(extension);
        assert!(!path.exists());
    }
}
