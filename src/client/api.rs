//! HTTP client for the task API.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::http::Message;
use crate::tasks::{NewTask, Task, TaskPatch};

/// Collection URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/tasks";

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::InvalidUrl(_) => None,
        }
    }
}

/// Client bound to one tasks collection URL.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    collection: Url,
}

impl TaskClient {
    pub fn new(collection_url: &str) -> Result<Self, ClientError> {
        let collection = Url::parse(collection_url.trim_end_matches('/'))
            .map_err(|_| ClientError::InvalidUrl(collection_url.to_string()))?;
        if collection.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(collection_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            collection,
        })
    }

    pub fn collection_url(&self) -> &str {
        self.collection.as_str()
    }

    fn task_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.collection.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// `GET` the collection.
    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let resp = self.client.get(self.collection.clone()).send().await?;
        decode(resp).await
    }

    /// `POST` a new task with `completed = false`.
    pub async fn create(&self, text: &str) -> Result<Task, ClientError> {
        let resp = self
            .client
            .post(self.collection.clone())
            .json(&NewTask::new(text).completed(false))
            .send()
            .await?;
        decode(resp).await
    }

    /// `PUT` the supplied fields of `patch`.
    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task, ClientError> {
        let resp = self
            .client
            .put(self.task_url(id)?)
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    /// `DELETE` a task; returns the server's confirmation.
    pub async fn delete(&self, id: &str) -> Result<Message, ClientError> {
        let resp = self.client.delete(self.task_url(id)?).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<Message>(&text) {
        Ok(body) => body.message,
        Err(_) if text.is_empty() => status.canonical_reason().unwrap_or("error").to_string(),
        Err(_) => text,
    };
    Err(ClientError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_url_appends_id() {
        let client = TaskClient::new("http://localhost:5000/api/tasks/").unwrap();
        assert_eq!(client.collection_url(), "http://localhost:5000/api/tasks");
        assert_eq!(
            client.task_url("abc").unwrap().as_str(),
            "http://localhost:5000/api/tasks/abc"
        );
        assert_eq!(
            client.task_url("a/b").unwrap().as_str(),
            "http://localhost:5000/api/tasks/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            TaskClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            TaskClient::new("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
