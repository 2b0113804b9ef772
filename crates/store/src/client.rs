//! Thin JSON CRUD client for the hosted row store.
//!
//! The store exposes generic row collections at `{base_url}/rows/{table}`
//! authenticated by an API key. This client performs one request per
//! operation and applies no retry, backoff, or caching; callers receive
//! a fresh snapshot on every read.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use tourdesk_core::availability::Block;
use tourdesk_core::payments::{LedgerEntry, Order};
use tourdesk_shared::config::StoreConfig;
use tourdesk_shared::types::{BlockId, LedgerEntryId};

use crate::error::StoreError;
use crate::records::{blocks_from_values, entries_from_values, orders_from_values};
use crate::records::{BlockRow, LedgerEntryRow, OrderRow};

const BLOCKS_TABLE: &str = "tour_blocks";
const ORDERS_TABLE: &str = "orders";
const LEDGER_TABLE: &str = "order_ledger";

/// Client for the hosted row storage service.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key);
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rows/{table}", self.base_url)
    }

    fn row_url(&self, table: &str, id: &str) -> String {
        format!("{}/rows/{table}/{id}", self.base_url)
    }

    async fn get_rows(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Value>, StoreError> {
        debug!(table, "Fetching rows");
        let response = self
            .http
            .get(self.table_url(table))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        debug!(table, "Inserting row");
        let response = self
            .http
            .post(self.table_url(table))
            .json(row)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn update_row<T: Serialize + Sync>(
        &self,
        table: &str,
        id: &str,
        row: &T,
    ) -> Result<(), StoreError> {
        debug!(table, id, "Updating row");
        let response = self
            .http
            .patch(self.row_url(table, id))
            .json(row)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), StoreError> {
        debug!(table, id, "Deleting row");
        let response = self.http.delete(self.row_url(table, id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Fetches every block row and ingests it; malformed rows are
    /// skipped with a warning.
    pub async fn list_blocks(&self) -> Result<Vec<Block>, StoreError> {
        let values = self.get_rows(BLOCKS_TABLE, &[]).await?;
        Ok(blocks_from_values(values))
    }

    /// Inserts a new block.
    pub async fn insert_block(&self, block: &Block) -> Result<(), StoreError> {
        self.insert_row(BLOCKS_TABLE, &BlockRow::from(block)).await
    }

    /// Replaces an existing block's row.
    pub async fn update_block(&self, block: &Block) -> Result<(), StoreError> {
        self.update_row(BLOCKS_TABLE, &block.id.to_string(), &BlockRow::from(block))
            .await
    }

    /// Deletes a block row.
    pub async fn delete_block(&self, id: BlockId) -> Result<(), StoreError> {
        self.delete_row(BLOCKS_TABLE, &id.to_string()).await
    }

    /// Fetches every order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let values = self.get_rows(ORDERS_TABLE, &[]).await?;
        Ok(orders_from_values(values))
    }

    /// Inserts an order row.
    ///
    /// Orders normally arrive through the booking flow outside this
    /// system; this exists for the development seeder.
    pub async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        self.insert_row(ORDERS_TABLE, &OrderRow::from(order)).await
    }

    /// Finds an order by its business number.
    pub async fn find_order(&self, order_number: &str) -> Result<Option<Order>, StoreError> {
        let values = self
            .get_rows(ORDERS_TABLE, &[("order_number", order_number)])
            .await?;
        Ok(orders_from_values(values).into_iter().next())
    }

    /// Fetches every ledger entry across all orders.
    ///
    /// Used when payment statuses are derived for a whole order list in
    /// one pass instead of one fetch per order.
    pub async fn list_all_ledger_entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        let values = self.get_rows(LEDGER_TABLE, &[]).await?;
        Ok(entries_from_values(values))
    }

    /// Fetches the ledger entries recorded against an order.
    pub async fn list_ledger_entries(
        &self,
        order_number: &str,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let values = self
            .get_rows(LEDGER_TABLE, &[("order_number", order_number)])
            .await?;
        Ok(entries_from_values(values))
    }

    /// Appends a ledger entry.
    pub async fn insert_ledger_entry(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        self.insert_row(LEDGER_TABLE, &LedgerEntryRow::from(entry))
            .await
    }

    /// Deletes a ledger entry. Entries are never edited, only inserted
    /// or deleted.
    pub async fn delete_ledger_entry(&self, id: LedgerEntryId) -> Result<(), StoreError> {
        self.delete_row(LEDGER_TABLE, &id.to_string()).await
    }
}
