use std::sync::Arc;

use crate::collab::http::{Directory, HttpNotifier};
use crate::config;
use crate::error;
use crate::schedule::AccessGuard;
use crate::sec::authn::passcode::Authenticator;
use crate::time::SystemClock;

pub struct Shared {
    directory: Directory,
    notifier: HttpNotifier,
    passcodes: Authenticator,
    guard: AccessGuard,
    clock: SystemClock,
}

pub type ArcShared = Arc<Shared>;

impl Shared {
    pub fn from_config(config: &config::Config) -> error::Result<Shared> {
        tracing::debug!("creating Shared state");

        Ok(Shared {
            directory: Directory::from_config(config)?,
            notifier: HttpNotifier::from_config(config)?,
            passcodes: Authenticator::from_config(config),
            guard: AccessGuard::from_config(config),
            clock: SystemClock,
        })
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn notifier(&self) -> &HttpNotifier {
        &self.notifier
    }

    pub fn passcodes(&self) -> &Authenticator {
        &self.passcodes
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    pub fn clock(&self) -> &SystemClock {
        &self.clock
    }
}

impl AsRef<Directory> for Shared {
    fn as_ref(&self) -> &Directory {
        &self.directory
    }
}
