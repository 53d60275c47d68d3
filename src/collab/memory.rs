use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::schedule::{Meeting, MeetingFields};
use crate::user::{Profile, ProfileFields};

use super::{AccountId, Accounts, Error, Meetings, Notifier, Profiles};

struct AccountRecord {
    id: String,
    email: String,
    password: String,
}

/// stand in for the account service and document store
pub struct Memory {
    next_id: AtomicUsize,
    accounts: Mutex<Vec<AccountRecord>>,
    profiles: Mutex<Vec<Profile>>,
    meetings: Mutex<Vec<Meeting>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            next_id: AtomicUsize::new(1),
            accounts: Mutex::new(Vec::new()),
            profiles: Mutex::new(Vec::new()),
            meetings: Mutex::new(Vec::new()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn meetings_len(&self) -> usize {
        self.meetings.lock().unwrap().len()
    }

    pub fn profile_by_email(&self, email: &str) -> Option<Profile> {
        self.profiles.lock()
            .unwrap()
            .iter()
            .find(|p| p.email == email)
            .cloned()
    }
}

impl Accounts for Memory {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        _username: &str,
    ) -> Result<AccountId, Error> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.email == email) {
            return Err(Error::Conflict(format!("account exists for {email}")));
        }

        let id = self.next_id("acct");

        accounts.push(AccountRecord {
            id: id.clone(),
            email: String::from(email),
            password: String::from(password),
        });

        Ok(id)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AccountId, Error> {
        self.accounts.lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.id.clone())
            .ok_or(Error::Unauthorized)
    }
}

impl Profiles for Memory {
    async fn create_profile(&self, fields: ProfileFields) -> Result<Profile, Error> {
        let profile = Profile {
            id: self.next_id("prof"),
            account_id: fields.account_id,
            email: fields.email,
            username: fields.username,
            role: fields.role,
            passcode_validated: fields.passcode_validated,
        };

        self.profiles.lock().unwrap().push(profile.clone());

        Ok(profile)
    }

    async fn profile_for_account(&self, account_id: &str) -> Result<Option<Profile>, Error> {
        Ok(self.profiles.lock()
            .unwrap()
            .iter()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn set_passcode_validated(&self, id: &str) -> Result<Profile, Error> {
        let mut profiles = self.profiles.lock().unwrap();

        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Err(Error::Response(format!("no profile document {id}")));
        };

        profile.passcode_validated = true;

        Ok(profile.clone())
    }
}

impl Meetings for Memory {
    async fn create_meeting(&self, fields: MeetingFields) -> Result<Meeting, Error> {
        let meeting = Meeting {
            id: self.next_id("meet"),
            admin_id: fields.admin_id,
            user_email: fields.user_email,
            date: fields.date,
            time: fields.time,
            status: fields.status,
        };

        self.meetings.lock().unwrap().push(meeting.clone());

        Ok(meeting)
    }

    async fn meetings_for_admin(&self, admin_id: &str) -> Result<Vec<Meeting>, Error> {
        Ok(self.meetings.lock()
            .unwrap()
            .iter()
            .filter(|m| m.admin_id == admin_id)
            .cloned()
            .collect())
    }

    async fn meetings_for_user(&self, email: &str) -> Result<Vec<Meeting>, Error> {
        Ok(self.meetings.lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_email == email)
            .cloned()
            .collect())
    }
}

pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), Error> {
        self.sent.lock().unwrap().push((
            String::from(recipient),
            String::from(subject),
            String::from(body),
        ));

        Ok(())
    }
}

pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<(), Error> {
        Err(Error::Response(String::from("notifier offline")))
    }
}
