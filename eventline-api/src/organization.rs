use eventline_client::{RequestError, Transport};

use crate::call::fetch;
use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Organization {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub contact_email_address: String,
    /// Whether non-essential mail from the platform is accepted.
    pub non_essential_mail_opt_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_id_number: Option<String>,
}

/// Organization associated with the credentials in use.
pub async fn get_organization(transport: &dyn Transport) -> Result<Organization, RequestError> {
    fetch(transport, "/v0/org").await
}
