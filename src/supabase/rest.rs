//! Store endpoints (REST layer over the hosted Postgres).
//!
//! Row filters are passed as `column=eq.value` style query pairs, exactly as
//! the platform expects them. All calls authenticate as the service role.

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{SupabaseClient, SupabaseError};

/// Media type that asks the store for exactly one row.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

impl SupabaseClient {
    /// Fetch all rows matching `query`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .http()
            .get(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .query(query)
            .send()
            .await?;

        Self::handle_rest_response(table, response).await
    }

    /// Fetch exactly one row; zero matches surface as [`SupabaseError::NotFound`].
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SupabaseError> {
        let response = self
            .http()
            .get(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .header(ACCEPT, SINGLE_OBJECT)
            .query(query)
            .send()
            .await?;

        Self::handle_rest_response(table, response).await
    }

    /// Insert one row and return the stored representation.
    pub async fn insert_returning<T, B>(&self, table: &str, row: &B) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .http()
            .post(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(row)
            .send()
            .await?;

        Self::handle_rest_response(table, response).await
    }

    /// Insert a batch of rows and return the stored representations.
    pub async fn insert_many_returning<T, B>(
        &self,
        table: &str,
        rows: &[B],
    ) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .http()
            .post(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;

        Self::handle_rest_response(table, response).await
    }

    /// Update the single row matching `query` with the provided columns.
    pub async fn update_single<T, B>(
        &self,
        table: &str,
        query: &[(&str, &str)],
        changes: &B,
    ) -> Result<T, SupabaseError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .http()
            .patch(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .query(query)
            .json(changes)
            .send()
            .await?;

        Self::handle_rest_response(table, response).await
    }

    /// Delete all rows matching `query`, returning how many went away.
    pub async fn delete(&self, table: &str, query: &[(&str, &str)]) -> Result<u64, SupabaseError> {
        let response = self
            .http()
            .delete(self.rest_url(table))
            .bearer_auth(self.service_role_key())
            .header("Prefer", "return=representation")
            .query(query)
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = Self::handle_rest_response(table, response).await?;
        Ok(rows.len() as u64)
    }

    async fn handle_rest_response<T: DeserializeOwned>(
        table: &str,
        response: reqwest::Response,
    ) -> Result<T, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        // Singular requests answer 406 when no row matched.
        if status == StatusCode::NOT_ACCEPTABLE {
            return Err(SupabaseError::NotFound(table.to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
