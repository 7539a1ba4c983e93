//! Registration of the Mandrill transport

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    transport::mandrill::{MandrillTransport, ReqwestClient},
    MailManager,
};

/// Name the transport is registered under
pub const NAME: &str = "mandrill";

/// Default configuration, written by [`publish_config`]
pub const CONFIG_TEMPLATE: &str = include_str!("../../config/mandrill.toml");

/// Registers the `mandrill` transport
///
/// The transport is built from `services.mandrill` (API key and HTTP client
/// options), `mandrill.url` and the `mail` sender, and publishes its events
/// to [`MailManager::events`]. A missing secret results in an empty key.
pub fn register(manager: &mut MailManager) {
    manager.extend(NAME, |config, events| {
        let client = ReqwestClient::with_options(&config.services.mandrill.client)?;
        let transport = MandrillTransport::new(
            client,
            config.mandrill_secret(),
            config.mandrill.url.as_str(),
        )
        .with_sender(config.sender())
        .with_dispatcher(events.clone());

        Ok(Arc::new(transport))
    });
}

/// Writes [`CONFIG_TEMPLATE`] to `dir/mandrill.toml`
///
/// An existing file is only replaced if `force` is set. Returns the path of
/// the file if it was written.
pub fn publish_config<P: AsRef<Path>>(dir: P, force: bool) -> io::Result<Option<PathBuf>> {
    let path = dir.as_ref().join("mandrill.toml");
    if path.exists() && !force {
        return Ok(None);
    }

    fs::create_dir_all(dir.as_ref())?;
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(Some(path))
}

#[cfg(test)]
mod test {
    use std::fs;

    use figment::{
        providers::{Format, Toml},
        Figment,
    };

    use super::{publish_config, register, CONFIG_TEMPLATE, NAME};
    use crate::{Config, MailManager};

    #[test]
    fn registered_under_mandrill() {
        let mut manager = MailManager::new(Config::default());
        register(&mut manager);
        register(&mut manager);

        assert!(manager.has(NAME));
        let mailer = manager.default_mailer().unwrap();
        assert_eq!(mailer.name(), "mandrill");
    }

    #[test]
    fn template_is_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mandrill.toml");
        fs::write(&path, CONFIG_TEMPLATE).unwrap();

        let config: Config = Figment::new()
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn publish_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");

        let path = publish_config(&config_dir, false).unwrap().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);

        fs::write(&path, "[mandrill]\nurl = \"http://localhost\"\n").unwrap();
        assert_eq!(publish_config(&config_dir, false).unwrap(), None);
        assert!(fs::read_to_string(&path).unwrap().contains("localhost"));

        assert_eq!(publish_config(&config_dir, true).unwrap(), Some(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }
}
