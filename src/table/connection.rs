//! Azure storage connection strings (`Key=Value;Key=Value;...`).

use std::collections::HashMap;

use super::TableError;

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_TABLE_ENDPOINT: &str = "http://127.0.0.1:10002/devstoreaccount1";

/// Connection string for the local Azurite emulator.
pub const DEVELOPMENT_CONNECTION_STRING: &str = "DefaultEndpointsProtocol=http;AccountName=devstoreaccount1;AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;TableEndpoint=http://127.0.0.1:10002/devstoreaccount1;";

/// The settings the table client needs, resolved from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub account_name: String,
    /// Base64 account key, used for SharedKeyLite signing.
    pub account_key: Option<String>,
    /// SAS query string (without the leading `?`).
    pub sas_token: Option<String>,
    /// Table service endpoint without a trailing slash.
    pub table_endpoint: String,
}

impl ConnectionString {
    /// Parse a connection string.
    ///
    /// `UseDevelopmentStorage=true` resolves to the Azurite defaults. The
    /// table endpoint is taken from `TableEndpoint` or derived from the
    /// protocol, account name and endpoint suffix.
    pub fn parse(input: &str) -> Result<Self, TableError> {
        let settings: HashMap<String, String> = input
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(|part| {
                part.split_once('=')
                    .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            })
            .collect();

        if settings
            .get("usedevelopmentstorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self {
                account_name: DEV_ACCOUNT_NAME.to_string(),
                account_key: Some(DEV_ACCOUNT_KEY.to_string()),
                sas_token: None,
                table_endpoint: DEV_TABLE_ENDPOINT.to_string(),
            });
        }

        let sas_token = settings
            .get("sharedaccesssignature")
            .map(|sas| sas.trim_start_matches('?').to_string());
        let account_key = settings.get("accountkey").cloned();
        let account_name = settings.get("accountname").cloned();

        let table_endpoint = match settings.get("tableendpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let account = account_name.as_deref().ok_or_else(|| {
                    TableError::InvalidConnectionString(
                        "AccountName or TableEndpoint is required".into(),
                    )
                })?;
                let protocol = settings
                    .get("defaultendpointsprotocol")
                    .map(String::as_str)
                    .unwrap_or("https");
                let suffix = settings
                    .get("endpointsuffix")
                    .map(String::as_str)
                    .unwrap_or("core.windows.net");
                format!("{}://{}.table.{}", protocol, account, suffix)
            }
        };

        if account_key.is_none() && sas_token.is_none() {
            return Err(TableError::InvalidConnectionString(
                "AccountKey or SharedAccessSignature is required".into(),
            ));
        }

        let account_name = match account_name {
            Some(name) => name,
            None if account_key.is_some() => {
                return Err(TableError::InvalidConnectionString(
                    "AccountName is required with AccountKey".into(),
                ))
            }
            None => String::new(),
        };

        Ok(Self {
            account_name,
            account_key,
            sas_token,
            table_endpoint,
        })
    }
}
