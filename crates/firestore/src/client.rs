//! HTTP client for the Firestore REST API.

use std::time::Duration;

use fintrack_core::errors::{Error, Result};
use fintrack_core::Session;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::document::{Document, Fields, Value};
use crate::errors::{error_for_status, FirestoreError};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Public Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Field every user-owned document carries.
const OWNER_FIELD: &str = "userId";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryResponse {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

/// Client for the documents of one Firestore project.
///
/// Every call is made on behalf of a [`Session`]: its ID token is sent as the
/// bearer credential, so the project's security rules apply to the user.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    documents_url: String,
}

impl FirestoreClient {
    /// # Arguments
    ///
    /// * `base_url` - REST root, [`DEFAULT_FIRESTORE_URL`] or an emulator address
    /// * `project_id` - Firebase project id
    /// * `timeout` - per-request timeout, 30 seconds when `None`
    pub fn new(base_url: &str, project_id: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                base_url.trim_end_matches('/'),
                project_id
            ),
        })
    }

    fn headers(&self, session: &Session) -> Result<HeaderMap> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", session.id_token))
            .map_err(|e| Error::Auth(format!("Invalid ID token format: {}", e)))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth_header);
        Ok(headers)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, id)
    }

    /// Reads the body, mapping non-success statuses to errors.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> std::result::Result<T, FirestoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_for_status(status, &body, path));
        }

        serde_json::from_str(&body)
            .map_err(|e| FirestoreError::Decode(format!("{} ({})", e, path)))
    }

    /// All documents in `collection` owned by the session's user.
    pub async fn list_owned(&self, session: &Session, collection: &str) -> Result<Vec<Document>> {
        let url = format!("{}:runQuery", self.documents_url);
        debug!("[Firestore] runQuery {} for {}", collection, session.user_id);

        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": OWNER_FIELD },
                        "op": "EQUAL",
                        "value": Value::string(session.user_id.as_str()),
                    }
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .headers(self.headers(session)?)
            .json(&query)
            .send()
            .await
            .map_err(FirestoreError::from)?;

        let rows: Vec<RunQueryResponse> = self.parse_response(response, collection).await?;
        Ok(rows.into_iter().filter_map(|row| row.document).collect())
    }

    /// A single document, which must belong to the session's user.
    pub async fn get_owned(&self, session: &Session, collection: &str, id: &str) -> Result<Document> {
        let document = self.get_document(session, collection, id).await?;
        let owned = matches!(
            document.fields.get(OWNER_FIELD),
            Some(Value::StringValue(owner)) if *owner == session.user_id
        );
        if !owned {
            return Err(FirestoreError::NotFound(format!("{}/{}", collection, id)).into());
        }
        Ok(document)
    }

    /// A single document by path, without an ownership check.
    pub async fn get_document(&self, session: &Session, collection: &str, id: &str) -> Result<Document> {
        let url = self.document_url(collection, id);
        let path = format!("{}/{}", collection, id);
        debug!("[Firestore] GET {}", path);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(session)?)
            .send()
            .await
            .map_err(FirestoreError::from)?;

        Ok(self.parse_response(response, &path).await?)
    }

    /// Creates a document with a generated id. The owner field is added here.
    pub async fn create_owned(
        &self,
        session: &Session,
        collection: &str,
        mut fields: Fields,
    ) -> Result<Document> {
        fields.insert(OWNER_FIELD.to_string(), Value::string(session.user_id.as_str()));
        let url = format!("{}/{}", self.documents_url, collection);
        debug!("[Firestore] POST {}", collection);

        let response = self
            .client
            .post(&url)
            .headers(self.headers(session)?)
            .json(&WriteBody { fields: &fields })
            .send()
            .await
            .map_err(FirestoreError::from)?;

        Ok(self.parse_response(response, collection).await?)
    }

    /// Writes `fields` to the document at `collection/id`.
    ///
    /// With a mask only the listed fields change and the document must
    /// already exist; without one the document is created or replaced.
    pub async fn patch_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: &Fields,
        mask: Option<&[&str]>,
    ) -> Result<Document> {
        let url = self.document_url(collection, id);
        let path = format!("{}/{}", collection, id);
        debug!("[Firestore] PATCH {} mask={:?}", path, mask);

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(mask) = mask {
            query.extend(mask.iter().map(|field| ("updateMask.fieldPaths", *field)));
            query.push(("currentDocument.exists", "true"));
        }

        let response = self
            .client
            .patch(&url)
            .headers(self.headers(session)?)
            .query(&query)
            .json(&WriteBody { fields })
            .send()
            .await
            .map_err(FirestoreError::from)?;

        Ok(self.parse_response(response, &path).await?)
    }

    /// Deletes a document that must exist.
    pub async fn delete_document(&self, session: &Session, collection: &str, id: &str) -> Result<()> {
        let url = self.document_url(collection, id);
        let path = format!("{}/{}", collection, id);
        debug!("[Firestore] DELETE {}", path);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(session)?)
            .query(&[("currentDocument.exists", "true")])
            .send()
            .await
            .map_err(FirestoreError::from)?;

        let _: serde_json::Value = self.parse_response(response, &path).await?;
        Ok(())
    }

    /// Updates selected fields of a document owned by the session's user.
    pub async fn update_owned(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: &Fields,
        mask: &[&str],
    ) -> Result<Document> {
        self.get_owned(session, collection, id).await?;
        self.patch_document(session, collection, id, fields, Some(mask))
            .await
    }

    /// Deletes a document owned by the session's user.
    pub async fn delete_owned(&self, session: &Session, collection: &str, id: &str) -> Result<()> {
        self.get_owned(session, collection, id).await?;
        self.delete_document(session, collection, id).await
    }
}
