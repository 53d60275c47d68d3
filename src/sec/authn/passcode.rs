use ccs_lib::sec::authn::passcode::{derive_code, window_index};

use crate::config::{Config, Kdf};
use crate::time::{Clock, SystemClock};

const IDENTITY_KEY_BYTES: usize = 32;

/// derives and checks the short lived codes that gate an organization
/// admin's first login.
///
/// each identity gets its own mac key, expanded from the root key with the
/// identity string as the kdf info. a leaked code or a brute forced key for
/// one identity says nothing about any other. the window math itself lives
/// in ccs-lib so issuer and verifier cannot drift apart.
#[derive(Clone)]
pub struct Authenticator<C = SystemClock> {
    kdf: Kdf,
    clock: C,
}

impl Authenticator {
    pub fn from_config(config: &Config) -> Authenticator {
        Authenticator::new(config.settings.master_key.as_bytes(), SystemClock)
    }
}

impl<C> Authenticator<C>
where
    C: Clock
{
    pub fn new(root_key: &[u8], clock: C) -> Authenticator<C> {
        Authenticator {
            kdf: Kdf::new(None, root_key),
            clock,
        }
    }

    fn identity_key(&self, identity: &str) -> [u8; IDENTITY_KEY_BYTES] {
        let mut okm = [0u8; IDENTITY_KEY_BYTES];

        // infallible, the requested length is far below the hkdf limit
        self.kdf.expand(identity.as_bytes(), &mut okm).unwrap();

        okm
    }

    fn derive_at(&self, identity: &str, window: i64) -> String {
        let key = self.identity_key(identity);

        derive_code(&key, identity, window)
    }

    /// the code for an identity at the current window plus `window_offset`
    /// buckets
    pub fn derive(&self, identity: &str, window_offset: i64) -> String {
        let window = window_index(self.clock.now_millis()) + window_offset;

        self.derive_at(identity, window)
    }

    /// accepts the current window's code and the previous window's. a code
    /// issued at the start of a bucket lives ten minutes, one issued at the
    /// end lives five
    pub fn verify(&self, identity: &str, given: &str) -> bool {
        let current = window_index(self.clock.now_millis());

        given == self.derive_at(identity, current)
            || given == self.derive_at(identity, current - 1)
    }
}

#[cfg(test)]
pub fn test_authenticator<C>(clock: C) -> Authenticator<C>
where
    C: Clock
{
    Authenticator::new(b"fixed test root key", clock)
}

#[cfg(test)]
mod test {
    use super::*;

    use ccs_lib::sec::authn::passcode::{passcode_valid, WINDOW_MILLIS};

    use crate::time::FixedClock;

    const IDENTITY: &str = "admin@org.com";

    fn tamper(code: &str) -> String {
        let replacement = if code.starts_with('0') { "F" } else { "0" };

        format!("{replacement}{}", &code[1..])
    }

    #[test]
    fn issued_code_verifies_immediately() {
        let auth = test_authenticator(FixedClock::at_millis(0));
        let code = auth.derive(IDENTITY, 0);

        assert!(passcode_valid(&code));
        assert!(auth.verify(IDENTITY, &code));
    }

    #[test]
    fn code_survives_into_the_next_window() {
        let issuer = test_authenticator(FixedClock::at_millis(0));
        let code = issuer.derive(IDENTITY, 0);

        let late = test_authenticator(FixedClock::at_millis(2 * WINDOW_MILLIS - 1));

        assert!(late.verify(IDENTITY, &code), "code rejected inside the tolerance band");
    }

    #[test]
    fn code_dies_after_two_full_windows() {
        let issuer = test_authenticator(FixedClock::at_millis(0));
        let code = issuer.derive(IDENTITY, 0);

        let too_late = test_authenticator(FixedClock::at_millis(2 * WINDOW_MILLIS));

        assert!(!too_late.verify(IDENTITY, &code));
    }

    #[test]
    fn previous_window_offset_matches_earlier_derivation() {
        let earlier = test_authenticator(FixedClock::at_millis(0));
        let current = test_authenticator(FixedClock::at_millis(WINDOW_MILLIS));

        assert_eq!(current.derive(IDENTITY, -1), earlier.derive(IDENTITY, 0));
    }

    #[test]
    fn wrong_code_never_verifies() {
        let auth = test_authenticator(FixedClock::at_millis(0));
        let code = auth.derive(IDENTITY, 0);

        assert!(!auth.verify(IDENTITY, &tamper(&code)));
        assert!(!auth.verify(IDENTITY, ""));
    }

    #[test]
    fn identities_use_distinct_keys() {
        let auth = test_authenticator(FixedClock::at_millis(0));

        let alice = auth.derive("alice@org.com", 0);
        let bob = auth.derive("bob@org.com", 0);

        assert_ne!(alice, bob);
        assert!(!auth.verify("bob@org.com", &alice), "one identity's code opened another's gate");
    }

    #[test]
    fn derivation_is_stable_within_a_window() {
        let start = test_authenticator(FixedClock::at_millis(0));
        let end = test_authenticator(FixedClock::at_millis(WINDOW_MILLIS - 1));

        assert_eq!(start.derive(IDENTITY, 0), end.derive(IDENTITY, 0));
    }
}
