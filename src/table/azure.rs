//! AzureTableStore - Azure Table Storage (and Azurite) over the REST API.
//!
//! Requests use the JSON "nometadata" format. Authentication is SharedKeyLite
//! when the connection string carries an account key, otherwise the SAS
//! token is appended to every request URL.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value};
use sha2::Sha256;
use tracing::debug;
use url::Url;

use super::{ConnectionString, TableEntity, TableError, TableStore};

const API_VERSION: &str = "2019-02-02";
const ACCEPT_JSON: &str = "application/json;odata=nometadata";
const NEXT_PARTITION_KEY: &str = "x-ms-continuation-NextPartitionKey";
const NEXT_ROW_KEY: &str = "x-ms-continuation-NextRowKey";

/// Table store talking to the Azure Table service.
#[derive(Clone)]
pub struct AzureTableStore {
    client: Client,
    account_name: String,
    account_key: Option<Vec<u8>>,
    sas_token: Option<String>,
    endpoint: Url,
}

impl AzureTableStore {
    /// Build a store from parsed connection settings.
    pub fn new(connection: ConnectionString) -> Result<Self, TableError> {
        let endpoint = Url::parse(&connection.table_endpoint).map_err(|e| {
            TableError::InvalidConnectionString(format!(
                "bad table endpoint {}: {}",
                connection.table_endpoint, e
            ))
        })?;
        let account_key = connection
            .account_key
            .as_deref()
            .map(|key| BASE64.decode(key))
            .transpose()
            .map_err(|e| {
                TableError::InvalidConnectionString(format!("AccountKey is not base64: {}", e))
            })?;

        Ok(Self {
            client: Client::new(),
            account_name: connection.account_name,
            account_key,
            sas_token: connection.sas_token,
            endpoint,
        })
    }

    /// Parse a connection string and build a store from it.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, TableError> {
        Self::new(ConnectionString::parse(connection_string)?)
    }

    /// The table service endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn resource_url(&self, resource: &str, query: Option<&str>) -> Result<Url, TableError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TableError::InvalidConnectionString(format!(
                    "table endpoint {} cannot carry a path",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .push(resource);

        let query = match (query, self.sas_token.as_deref()) {
            (Some(query), Some(sas)) => Some(format!("{}&{}", query, sas)),
            (Some(query), None) => Some(query.to_string()),
            (None, Some(sas)) => Some(sas.to_string()),
            (None, None) => None,
        };
        url.set_query(query.as_deref());
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, TableError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let mut builder = self
            .client
            .request(method, url.clone())
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header("DataServiceVersion", "3.0")
            .header("MaxDataServiceVersion", "3.0;NetFx")
            .header("Accept", ACCEPT_JSON);

        if let Some(key) = &self.account_key {
            let signature = sign(key, &string_to_sign(&date, &self.account_name, url.path()))?;
            builder = builder.header(
                "Authorization",
                format!("SharedKeyLite {}:{}", self.account_name, signature),
            );
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, TableError> {
        builder
            .send()
            .await
            .map_err(|e| TableError::Transport(e.to_string()))
    }
}

#[async_trait]
impl TableStore for AzureTableStore {
    async fn create_table(&self, table: &str) -> Result<(), TableError> {
        let url = self.resource_url("Tables", None)?;
        let builder = self
            .request(Method::POST, url)?
            .header("Prefer", "return-no-content")
            .json(&json!({ "TableName": table }));

        let response = self.send(builder).await?;
        match response.status() {
            StatusCode::CONFLICT => Err(TableError::AlreadyExists(table.to_string())),
            status if status.is_success() => {
                debug!(table, "created table");
                Ok(())
            }
            _ => Err(backend_error(response).await),
        }
    }

    async fn list_entities(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<TableEntity>, TableError> {
        let filter = format!("$filter=PartitionKey eq '{}'", escape_key(partition_key));
        let mut continuation: Option<(String, String)> = None;
        let mut entities = Vec::new();

        loop {
            let query = match &continuation {
                Some((next_pk, next_rk)) => format!(
                    "{}&NextPartitionKey={}&NextRowKey={}",
                    filter, next_pk, next_rk
                ),
                None => filter.clone(),
            };
            let url = self.resource_url(&format!("{}()", table), Some(&query))?;
            let response = self.send(self.request(Method::GET, url)?).await?;
            if !response.status().is_success() {
                return Err(backend_error(response).await);
            }

            let next = continuation_from(&response);
            let body: Value = response
                .json()
                .await
                .map_err(|e| TableError::Encoding(e.to_string()))?;
            let rows = body
                .get("value")
                .and_then(Value::as_array)
                .ok_or_else(|| TableError::Encoding("query response has no value array".into()))?;
            for row in rows {
                entities.push(entity_from_json(row)?);
            }

            match next {
                Some(next) => continuation = Some(next),
                None => break,
            }
        }

        Ok(entities)
    }

    async fn get_entity(
        &self,
        table: &str,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<TableEntity>, TableError> {
        let url = self.resource_url(&entity_path(table, partition_key, row_key), None)?;
        let response = self.send(self.request(Method::GET, url)?).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| TableError::Encoding(e.to_string()))?;
                entity_from_json(&body).map(Some)
            }
            _ => Err(backend_error(response).await),
        }
    }

    async fn upsert_entity(&self, table: &str, entity: &TableEntity) -> Result<(), TableError> {
        let url = self.resource_url(
            &entity_path(table, &entity.partition_key, &entity.row_key),
            None,
        )?;
        let builder = self
            .request(Method::PUT, url)?
            .json(&entity_to_json(entity));

        let response = self.send(builder).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(backend_error(response).await)
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// SharedKeyLite string-to-sign for the Table service.
fn string_to_sign(date: &str, account_name: &str, path: &str) -> String {
    format!("{}\n/{}{}", date, account_name, path)
}

fn sign(key: &[u8], string_to_sign: &str) -> Result<String, TableError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| TableError::InvalidConnectionString(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Single quotes inside OData key literals are doubled.
fn escape_key(key: &str) -> String {
    key.replace('\'', "''")
}

fn entity_path(table: &str, partition_key: &str, row_key: &str) -> String {
    format!(
        "{}(PartitionKey='{}',RowKey='{}')",
        table,
        escape_key(partition_key),
        escape_key(row_key)
    )
}

fn continuation_from(response: &Response) -> Option<(String, String)> {
    let headers = response.headers();
    let next_pk = headers.get(NEXT_PARTITION_KEY)?.to_str().ok()?.to_string();
    let next_rk = headers
        .get(NEXT_ROW_KEY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Some((next_pk, next_rk))
}

async fn backend_error(response: Response) -> TableError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    TableError::Backend { status, message }
}

fn entity_to_json(entity: &TableEntity) -> Value {
    let mut body = Map::new();
    body.insert("PartitionKey".into(), json!(entity.partition_key));
    body.insert("RowKey".into(), json!(entity.row_key));
    for (name, value) in &entity.properties {
        body.insert(name.clone(), value.clone());
    }
    Value::Object(body)
}

fn is_system_property(name: &str) -> bool {
    name == "Timestamp" || name.starts_with("odata.") || name.contains("@odata.")
}

fn entity_from_json(value: &Value) -> Result<TableEntity, TableError> {
    let object = value
        .as_object()
        .ok_or_else(|| TableError::Encoding("entity is not a JSON object".into()))?;
    let key = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TableError::Encoding(format!("entity has no {}", name)))
    };
    let partition_key = key("PartitionKey")?;
    let row_key = key("RowKey")?;

    let properties = object
        .iter()
        .filter(|(name, _)| {
            name.as_str() != "PartitionKey" && name.as_str() != "RowKey" && !is_system_property(name)
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    Ok(TableEntity::with_properties(partition_key, row_key, properties))
}
