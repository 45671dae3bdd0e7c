//! Wire DTOs for the invoicing backend's JSON bodies.
//!
//! Field names follow the backend's camelCase contract. Decoding goes through
//! these types first and is mapped into domain records in one pass.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    CredentialsUpdate, ModuleCredentials, NewUser, ReportRow, User, UserId, UserRole,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) id: i64,
    pub(super) username: String,
    pub(super) role: String,
    #[serde(default)]
    pub(super) admin_creator: bool,
    pub(super) hospital_service_credentials: Option<String>,
    pub(super) pharmacy_service_credentials: Option<String>,
    pub(super) insurance_service_credentials: Option<String>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|err| format!("user {}: {err}", self.id))?;
        Ok(User::new(
            UserId::new(self.id),
            self.username,
            role,
            self.admin_creator,
            ModuleCredentials {
                hospital: self.hospital_service_credentials.unwrap_or_default(),
                pharmacy: self.pharmacy_service_credentials.unwrap_or_default(),
                insurance: self.insurance_service_credentials.unwrap_or_default(),
            },
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateUserRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
    pub(super) role: &'static str,
    pub(super) hospital_service_credentials: &'a str,
    pub(super) pharmacy_service_credentials: &'a str,
    pub(super) insurance_service_credentials: &'a str,
}

impl<'a> From<&'a NewUser> for CreateUserRequestDto<'a> {
    fn from(user: &'a NewUser) -> Self {
        let credentials = user.credentials();
        Self {
            username: user.username(),
            password: user.password(),
            role: user.role().as_str(),
            hospital_service_credentials: &credentials.hospital,
            pharmacy_service_credentials: &credentials.pharmacy,
            insurance_service_credentials: &credentials.insurance,
        }
    }
}

/// Body of `PUT /users/{username}/credentials`; `newPassword` is omitted when
/// the password is kept.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateCredentialsRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) new_password: Option<&'a str>,
    pub(super) hospital_service_credentials: &'a str,
    pub(super) pharmacy_service_credentials: &'a str,
    pub(super) insurance_service_credentials: &'a str,
}

impl<'a> From<&'a CredentialsUpdate> for UpdateCredentialsRequestDto<'a> {
    fn from(update: &'a CredentialsUpdate) -> Self {
        let credentials = update.credentials();
        Self {
            new_password: update.new_password(),
            hospital_service_credentials: &credentials.hospital,
            pharmacy_service_credentials: &credentials.pharmacy,
            insurance_service_credentials: &credentials.insurance,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderResponseDto {
    pub(super) order_id: i64,
    #[serde(default)]
    pub(super) client_name: Option<String>,
    #[serde(default)]
    pub(super) client_nit: Option<String>,
    pub(super) provider_name: Option<String>,
    pub(super) total_amount: Option<f64>,
    pub(super) total_taxes: Option<f64>,
    pub(super) invoice_pdf_url: Option<String>,
    pub(super) order_date: Option<NaiveDateTime>,
}

impl From<OrderResponseDto> for ReportRow {
    fn from(dto: OrderResponseDto) -> Self {
        Self {
            order_id: dto.order_id,
            client_name: dto.client_name.unwrap_or_default(),
            client_nit: dto.client_nit.unwrap_or_default(),
            provider_name: dto.provider_name.filter(|name| !name.is_empty()),
            order_date: dto.order_date,
            total_taxes: dto.total_taxes,
            total_amount: dto.total_amount,
            invoice_pdf_path: dto.invoice_pdf_url.filter(|url| !url.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_user_with_null_credentials() {
        let dto: UserDto = serde_json::from_value(json!({
            "id": 3,
            "username": "farmacia",
            "role": "MODULE_PHARMACY",
            "adminCreator": false,
            "hospitalServiceCredentials": null,
            "pharmacyServiceCredentials": "p-key",
            "insuranceServiceCredentials": null
        }))
        .expect("decode user");

        let user = dto.into_domain().expect("known role");
        assert_eq!(user.role(), UserRole::ModulePharmacy);
        assert_eq!(user.credentials().pharmacy, "p-key");
        assert!(user.credentials().hospital.is_empty());
    }

    #[test]
    fn unknown_role_fails_mapping() {
        let dto: UserDto = serde_json::from_value(json!({
            "id": 3, "username": "x", "role": "AUDITOR", "adminCreator": false
        }))
        .expect("decode user");
        assert!(dto.into_domain().is_err());
    }

    #[test]
    fn blank_password_is_left_out_of_update_body() {
        let update =
            CredentialsUpdate::new("clinic", Some(String::new()), ModuleCredentials::default());
        let body = serde_json::to_value(UpdateCredentialsRequestDto::from(&update))
            .expect("serialise update");
        assert_eq!(
            body,
            json!({
                "hospitalServiceCredentials": "",
                "pharmacyServiceCredentials": "",
                "insuranceServiceCredentials": ""
            })
        );
    }

    #[test]
    fn order_maps_missing_provider_and_pdf_to_none() {
        let dto: OrderResponseDto = serde_json::from_value(json!({
            "orderId": 11,
            "clientName": "Clinica Norte",
            "clientNit": "900123",
            "providerName": "",
            "totalAmount": 119.0,
            "totalTaxes": 19.0,
            "invoicePdfUrl": null,
            "orderDate": "2024-01-05T10:30:00.123",
            "items": [],
            "createdByUsername": "clinic"
        }))
        .expect("decode order");

        let row = ReportRow::from(dto);
        assert_eq!(row.provider_name, None);
        assert_eq!(row.invoice_pdf_path, None);
        assert!(row.order_date.is_some());
    }
}
