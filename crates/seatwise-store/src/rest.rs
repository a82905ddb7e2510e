//! PostgREST-style HTTP implementation of [`EntityStore`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use seatwise_core::{Error, Result, StoreConfig};

use crate::{EntityStore, Filters};

/// HTTP client for a hosted table store speaking PostgREST conventions
/// (`/rest/v1/{table}`, `column=eq.value` filters).
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

/// Render equality filters as PostgREST query parameters.
fn eq_params(filters: Filters<'_>) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|(column, value)| (column.to_string(), format!("eq.{}", value)))
        .collect()
}

#[async_trait]
impl EntityStore for RestStore {
    async fn insert(&self, table: &str, record: Value) -> Result<Value> {
        debug!("Inserting into {}", table);
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(|e| Error::Http(format!("insert into {} failed: {}", table, e)))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "insert into {} returned {}: {}",
                table, status, body
            )));
        }

        // PostgREST echoes created rows as an array
        let created: Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("insert response from {}: {}", table, e)))?;
        match created {
            Value::Array(mut rows) if !rows.is_empty() => Ok(rows.remove(0)),
            other => Ok(other),
        }
    }

    async fn select(&self, table: &str, filters: Filters<'_>) -> Result<Vec<Value>> {
        let mut params = eq_params(filters);
        params.push(("select".into(), "*".into()));

        let response = self
            .authed(self.client.get(self.table_url(table)))
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Http(format!("select from {} failed: {}", table, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "select from {} returned {}: {}",
                table, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("select response from {}: {}", table, e)))
    }

    async fn delete(&self, table: &str, filters: Filters<'_>) -> Result<()> {
        let response = self
            .authed(self.client.delete(self.table_url(table)))
            .query(&eq_params(filters))
            .send()
            .await
            .map_err(|e| Error::Http(format!("delete from {} failed: {}", table, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "delete from {} returned {}: {}",
                table, status, body
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_params() {
        let filters = [("contact", "ann@x".to_string()), ("name", "Ann".to_string())];
        assert_eq!(
            eq_params(&filters),
            vec![
                ("contact".to_string(), "eq.ann@x".to_string()),
                ("name".to_string(), "eq.Ann".to_string()),
            ]
        );
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new(&StoreConfig {
            base_url: "https://example.supabase.co/".into(),
            api_key: "key".into(),
        });
        assert_eq!(
            store.table_url("customers"),
            "https://example.supabase.co/rest/v1/customers"
        );
    }
}
