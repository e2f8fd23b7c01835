//! CRUD calls for the signed-in user's tasks.
//!
//! All endpoints require a bearer token; the server answers 401 without one,
//! which surfaces here as [`ApiError::Unauthorized`]. No automatic logout
//! happens on 401; pages decide what to do with the error.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use super::api::ApiClient;
use super::types::{Task, TaskCreate, TaskResponse, TaskUpdate};
use crate::error::ApiError;

const TASKS_PATH: &str = "/tasks";

fn task_path(id: i64) -> String {
    format!("{TASKS_PATH}/{id}")
}

#[derive(Clone)]
pub struct TaskApi {
    client: ApiClient,
}

impl TaskApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every task of the current user.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response: TaskResponse = self.client.get(TASKS_PATH).await?;
        Ok(response.tasks.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the request, or [`ApiError::Parse`] if the
    /// response carries no task.
    pub async fn get(&self, id: i64) -> Result<Task, ApiError> {
        let response: TaskResponse = self.client.get(&task_path(id)).await?;
        expect_task(response)
    }

    /// # Errors
    ///
    /// As [`TaskApi::get`].
    pub async fn create(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        let response: TaskResponse = self.client.post(TASKS_PATH, task).await?;
        expect_task(response)
    }

    /// # Errors
    ///
    /// As [`TaskApi::get`].
    pub async fn update(&self, id: i64, changes: &TaskUpdate) -> Result<Task, ApiError> {
        let response: TaskResponse = self.client.put(&task_path(id), changes).await?;
        expect_task(response)
    }

    /// Delete a task, returning the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request.
    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let response: TaskResponse = self.client.delete(&task_path(id)).await?;
        Ok(response.message)
    }
}

fn expect_task(response: TaskResponse) -> Result<Task, ApiError> {
    response
        .task
        .ok_or_else(|| ApiError::Parse("response did not include a task".to_owned()))
}
