//! Resolution of transports by name
//!
//! A [`MailManager`] maps transport names to factories. A transport is
//! created the first time its name is resolved, and the same instance is
//! returned afterwards.
//!
//! ```rust,no_run
//! use lettre_mandrill::{manager, Config, MailManager, Message};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
//! let mut manager = MailManager::new(Config::load("config/mail.toml")?);
//! manager::mandrill::register(&mut manager);
//!
//! let message = Message::builder()
//!     .from("nobody@domain.tld".parse()?)
//!     .to("hei@domain.tld".parse()?)
//!     .subject("Happy new year")
//!     .build()?;
//! manager.default_mailer()?.deliver(&message)?;
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{transport::mandrill::Dispatcher, BoxError, Config, Error, Mailer};

pub mod mandrill;

type Factory =
    Box<dyn Fn(&Config, &Dispatcher) -> Result<Arc<dyn Mailer>, BoxError> + Send + Sync>;

/// Registry of named transports
pub struct MailManager {
    config: Config,
    events: Dispatcher,
    factories: HashMap<String, Factory>,
    mailers: Mutex<HashMap<String, Arc<dyn Mailer>>>,
}

impl MailManager {
    /// Creates a manager without any transport
    pub fn new(config: Config) -> Self {
        Self {
            config,
            events: Dispatcher::new(),
            factories: HashMap::new(),
            mailers: Mutex::new(HashMap::new()),
        }
    }

    /// Configuration passed to the factories
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatcher shared with the transports created by this manager
    pub fn events(&self) -> &Dispatcher {
        &self.events
    }

    /// Registers `factory` under `name`, replacing any previous one
    ///
    /// A transport already created under that name is dropped.
    pub fn extend<N, F>(&mut self, name: N, factory: F)
    where
        N: Into<String>,
        F: Fn(&Config, &Dispatcher) -> Result<Arc<dyn Mailer>, BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        self.mailers
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Whether a factory is registered under `name`
    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the transport registered under `name`, creating it on first use
    pub fn mailer(&self, name: &str) -> Result<Arc<dyn Mailer>, Error> {
        let mut mailers = self.mailers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mailer) = mailers.get(name) {
            return Ok(Arc::clone(mailer));
        }

        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownTransport(name.to_owned()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(transport = name, "creating transport");

        let mailer = factory(&self.config, &self.events).map_err(Error::Transport)?;
        mailers.insert(name.to_owned(), Arc::clone(&mailer));
        Ok(mailer)
    }

    /// Returns the transport named by `mail.default`
    pub fn default_mailer(&self) -> Result<Arc<dyn Mailer>, Error> {
        self.mailer(&self.config.mail.default)
    }
}

impl Default for MailManager {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for MailManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transports: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        transports.sort_unstable();

        f.debug_struct("MailManager")
            .field("config", &self.config)
            .field("events", &self.events)
            .field("transports", &transports)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::{
        fmt,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use super::MailManager;
    use crate::{message::Message, BoxError, Config, Error, Transport};

    struct NullTransport;

    impl Transport for NullTransport {
        type Ok = ();
        type Error = BoxError;

        fn send(&self, _message: &Message) -> Result<(), BoxError> {
            Ok(())
        }
    }

    impl fmt::Display for NullTransport {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null")
        }
    }

    #[test]
    fn mailers_are_created_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);

        let mut manager = MailManager::default();
        manager.extend("null", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NullTransport))
        });

        let first = manager.mailer("null").unwrap();
        let second = manager.mailer("null").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(first.name(), "null");
    }

    #[test]
    fn extend_replaces_factory_and_instance() {
        let mut manager = MailManager::default();
        manager.extend("null", |_, _| Ok(Arc::new(NullTransport)));
        let first = manager.mailer("null").unwrap();

        manager.extend("null", |_, _| Ok(Arc::new(NullTransport)));
        let second = manager.mailer("null").unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_transport() {
        let manager = MailManager::default();
        assert!(!manager.has("ses"));
        assert!(matches!(
            manager.mailer("ses"),
            Err(Error::UnknownTransport(name)) if name == "ses"
        ));
    }

    #[test]
    fn factory_failure_is_not_cached() {
        let mut manager = MailManager::default();
        manager.extend("broken", |_, _| Err("no credentials".into()));

        let err = manager.mailer("broken").err().unwrap();
        assert_eq!(
            err.to_string(),
            "transport could not be created: no credentials"
        );
        assert!(manager.mailer("broken").is_err());
    }

    #[test]
    fn default_mailer_follows_config() {
        let mut config = Config::default();
        config.mail.default = "null".to_owned();

        let mut manager = MailManager::new(config);
        manager.extend("null", |_, _| Ok(Arc::new(NullTransport)));

        assert_eq!(manager.default_mailer().unwrap().name(), "null");
        assert!(format!("{manager:?}").contains("transports: [\"null\"]"));
    }
}
