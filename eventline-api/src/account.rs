use chrono::{DateTime, Utc};
use eventline_client::{RequestError, Transport};

use crate::call::fetch;
use crate::query::{segment, with_query, ListResponse, Pagination};
use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: Id,
    pub org_id: Id,
    pub name: String,
    pub email_address: String,
    pub disabled: bool,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_login_time: Option<DateTime<Utc>>,
    pub role: String,
    pub last_project_id: Option<Id>,
    pub settings: AccountSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    pub date_format: DateFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Relative,
    Absolute,
}

pub async fn list_accounts(
    transport: &dyn Transport,
    pagination: &Pagination,
) -> Result<ListResponse<Account>, RequestError> {
    fetch(transport, &with_query("/v0/accounts", &pagination.to_query())).await
}

pub async fn get_account(transport: &dyn Transport, id: &str) -> Result<Account, RequestError> {
    fetch(transport, &format!("/v0/accounts/id/{}", segment(id))).await
}

/// The account owning the credentials the transport was built with.
pub async fn get_current_account(transport: &dyn Transport) -> Result<Account, RequestError> {
    fetch(transport, "/v0/account").await
}
