use reqwest::Url;
use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::error::{self, Context};
use crate::schedule::{Meeting, MeetingFields};
use crate::user::{Profile, ProfileFields};

use super::{AccountId, Accounts, Error, Meetings, Notifier, Profiles};

/// http client for the managed account service and document store.
///
/// one deployment, one project, two collections. every request carries the
/// project id and server key headers. document ids are minted client side,
/// the way the backing service expects them
pub struct Directory {
    client: reqwest::Client,
    endpoint: Url,
    project: String,
    key: String,
    database: String,
    profiles_collection: String,
    meetings_collection: String,
}

#[derive(Serialize)]
struct CreateAccount<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateSession<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AccountDocument {
    id: String,
}

#[derive(Serialize)]
struct CreateDocument<T> {
    id: String,
    data: T,
}

#[derive(Deserialize)]
struct Document<T> {
    id: String,
    data: T,
}

#[derive(Deserialize)]
struct DocumentList<T> {
    documents: Vec<Document<T>>,
}

#[derive(Serialize)]
struct PatchValidated {
    data: ValidatedData,
}

#[derive(Serialize)]
struct ValidatedData {
    passcode_validated: bool,
}

impl Document<ProfileFields> {
    fn into_profile(self) -> Profile {
        Profile {
            id: self.id,
            account_id: self.data.account_id,
            email: self.data.email,
            username: self.data.username,
            role: self.data.role,
            passcode_validated: self.data.passcode_validated,
        }
    }
}

impl Document<MeetingFields> {
    fn into_meeting(self) -> Meeting {
        Meeting {
            id: self.id,
            admin_id: self.data.admin_id,
            user_email: self.data.user_email,
            date: self.data.date,
            time: self.data.time,
            status: self.data.status,
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    if status == reqwest::StatusCode::CONFLICT {
        let body = response.text().await.unwrap_or_default();

        return Err(Error::Conflict(body));
    }

    if !status.is_success() {
        return Err(Error::Response(format!("unexpected status {status}")));
    }

    Ok(response)
}

impl Directory {
    pub fn from_config(config: &Config) -> error::Result<Directory> {
        let settings = &config.settings.directory;

        let endpoint = Url::parse(&settings.endpoint).context(format!(
            "invalid directory endpoint: \"{}\"", settings.endpoint
        ))?;

        Ok(Directory {
            client: reqwest::Client::new(),
            endpoint,
            project: settings.project.clone(),
            key: settings.key.clone(),
            database: settings.database.clone(),
            profiles_collection: settings.profiles_collection.clone(),
            meetings_collection: settings.meetings_collection.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.endpoint.join(path).unwrap();

        self.client.request(method, url)
            .header("x-directory-project", &self.project)
            .header("x-directory-key", &self.key)
    }

    fn documents_path(&self, collection: &str) -> String {
        format!("/v1/databases/{}/collections/{collection}/documents", self.database)
    }

    async fn create_document<T>(&self, collection: &str, data: T) -> Result<Document<T>, Error>
    where
        T: Serialize + for<'de> Deserialize<'de>
    {
        let body = CreateDocument {
            id: nanoid::nanoid!(),
            data,
        };

        let response = self.request(reqwest::Method::POST, &self.documents_path(collection))
            .json(&body)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn query_documents<T>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document<T>>, Error>
    where
        T: for<'de> Deserialize<'de>
    {
        let response = self.request(reqwest::Method::GET, &self.documents_path(collection))
            .query(&[(field, value)])
            .send()
            .await?;

        let list: DocumentList<T> = check_status(response).await?.json().await?;

        Ok(list.documents)
    }
}

impl Accounts for Directory {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AccountId, Error> {
        let response = self.request(reqwest::Method::POST, "/v1/accounts")
            .json(&CreateAccount {
                email,
                password,
                name: username,
            })
            .send()
            .await?;

        let account: AccountDocument = check_status(response).await?.json().await?;

        Ok(account.id)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AccountId, Error> {
        let response = self.request(reqwest::Method::POST, "/v1/accounts/sessions")
            .json(&CreateSession {
                email,
                password,
            })
            .send()
            .await?;

        let account: AccountDocument = check_status(response).await?.json().await?;

        Ok(account.id)
    }
}

impl Profiles for Directory {
    async fn create_profile(&self, fields: ProfileFields) -> Result<Profile, Error> {
        let document = self.create_document(&self.profiles_collection, fields).await?;

        Ok(document.into_profile())
    }

    async fn profile_for_account(&self, account_id: &str) -> Result<Option<Profile>, Error> {
        let mut documents = self.query_documents::<ProfileFields>(
            &self.profiles_collection,
            "account_id",
            account_id
        ).await?;

        if documents.is_empty() {
            Ok(None)
        } else {
            Ok(Some(documents.swap_remove(0).into_profile()))
        }
    }

    async fn set_passcode_validated(&self, id: &str) -> Result<Profile, Error> {
        let path = format!("{}/{id}", self.documents_path(&self.profiles_collection));

        let response = self.request(reqwest::Method::PATCH, &path)
            .json(&PatchValidated {
                data: ValidatedData {
                    passcode_validated: true,
                },
            })
            .send()
            .await?;

        let document: Document<ProfileFields> = check_status(response).await?.json().await?;

        Ok(document.into_profile())
    }
}

impl Meetings for Directory {
    async fn create_meeting(&self, fields: MeetingFields) -> Result<Meeting, Error> {
        let document = self.create_document(&self.meetings_collection, fields).await?;

        Ok(document.into_meeting())
    }

    async fn meetings_for_admin(&self, admin_id: &str) -> Result<Vec<Meeting>, Error> {
        let documents = self.query_documents::<MeetingFields>(
            &self.meetings_collection,
            "admin_id",
            admin_id
        ).await?;

        Ok(documents.into_iter().map(Document::into_meeting).collect())
    }

    async fn meetings_for_user(&self, email: &str) -> Result<Vec<Meeting>, Error> {
        let documents = self.query_documents::<MeetingFields>(
            &self.meetings_collection,
            "user_email",
            email
        ).await?;

        Ok(documents.into_iter().map(Document::into_meeting).collect())
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    recipient: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// outbound mail over the dispatcher's http endpoint
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNotifier {
    pub fn from_config(config: &Config) -> error::Result<HttpNotifier> {
        let settings = &config.settings.notifier;

        let endpoint = Url::parse(&settings.endpoint).context(format!(
            "invalid notifier endpoint: \"{}\"", settings.endpoint
        ))?;

        Ok(HttpNotifier {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

impl Notifier for HttpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), Error> {
        let url = self.endpoint.join("/v1/messages").unwrap();

        let response = self.client.post(url)
            .json(&SendMessage {
                recipient,
                subject,
                body,
            })
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }
}
