//! Read models mirroring the Epos Now API schema.
//!
//! These are transient DTOs: materialized from a provider response, handed to
//! the caller, then dropped. Nothing here is persisted or mutated.
//!
//! Resource models deserialize from key-folded JSON (see [`crate::json`]), so
//! multi-word fields carry an explicit folded `deserialize` name. Outbound they
//! serialize in camelCase.
//!
//! [`TokenResponse`] is the exception: its field names are the OAuth wire names
//! and are kept verbatim in both directions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Response from the provider's token endpoint.
///
/// Forwarded to the caller unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    /// Opaque bearer token for API calls.
    pub access_token: String,
    /// Token type, usually `Bearer`.
    pub token_type: String,
    /// Lifetime of the access token in seconds from issuance.
    pub expires_in: i64,
    /// Opaque token used to obtain a new access token.
    pub refresh_token: String,
}

/// A product in the point-of-sale catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub sku: String,
}

/// A customer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct Customer {
    pub id: i32,
    #[serde(rename(deserialize = "firstname"))]
    pub first_name: String,
    #[serde(rename(deserialize = "lastname"))]
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// A completed sale with its line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct Sale {
    pub id: i32,
    /// When the sale happened. Zone-less provider timestamps are taken as UTC.
    #[serde(
        rename(deserialize = "saledate"),
        deserialize_with = "deserialize_provider_datetime"
    )]
    pub sale_date: Option<DateTime<Utc>>,
    pub total: f64,
    #[serde(rename(deserialize = "customerid"))]
    pub customer_id: i32,
    pub items: Vec<SaleItem>,
}

/// A single line of a [`Sale`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct SaleItem {
    #[serde(rename(deserialize = "productid"))]
    pub product_id: i32,
    #[serde(rename(deserialize = "productname"))]
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp or a bare
/// `YYYY-MM-DD` date (midnight). Zone-less values are taken as UTC.
fn deserialize_provider_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_provider_datetime(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn parse_provider_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_str_case_insensitive, from_str_or_default};
    use chrono::TimeZone;

    #[test]
    fn token_response_keeps_wire_names() {
        let json = r#"{"access_token":"a","token_type":"Bearer","expires_in":3600,"refresh_token":"r"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.refresh_token, "r");

        let back = serde_json::to_value(&token).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(json).unwrap());
    }

    #[test]
    fn token_response_missing_fields_default() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"a"}"#).unwrap();
        assert_eq!(token.access_token, "a");
        assert_eq!(token.expires_in, 0);
        assert!(token.refresh_token.is_empty());
    }

    #[test]
    fn product_with_pascal_case_fields() {
        let json = r#"[{"ID":1,"Name":"Widget","Price":9.99,"Description":"Blue","SKU":"W-1"}]"#;
        let products: Vec<Product> = from_str_or_default(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].price, 9.99);
        assert_eq!(products[0].sku, "W-1");
    }

    #[test]
    fn customer_multi_word_fields() {
        let json = r#"{"Id":4,"FirstName":"Ada","last_name":"Lovelace","EMAIL":"ada@example.com"}"#;
        let customer: Customer = from_str_case_insensitive(json).unwrap();
        assert_eq!(customer.first_name, "Ada");
        assert_eq!(customer.last_name, "Lovelace");
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.phone, "");
    }

    #[test]
    fn sale_with_items_and_naive_date() {
        let json = r#"{
            "Id": 10,
            "SaleDate": "2024-03-15T10:30:00",
            "Total": 12.5,
            "CustomerId": 4,
            "Items": [
                {"ProductId": 1, "ProductName": "Widget", "Quantity": 2, "Price": 6.25}
            ]
        }"#;
        let sale: Sale = from_str_case_insensitive(json).unwrap();
        assert_eq!(sale.id, 10);
        assert_eq!(
            sale.sale_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(sale.customer_id, 4);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].product_name, "Widget");
        assert_eq!(sale.items[0].quantity, 2);
    }

    #[test]
    fn sale_with_rfc3339_date() {
        let sale: Sale =
            from_str_case_insensitive(r#"{"SaleDate":"2024-03-15T10:30:00+01:00"}"#).unwrap();
        assert_eq!(
            sale.sale_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn sale_with_date_only_is_midnight_utc() {
        let sales: Vec<Sale> =
            from_str_or_default(r#"[{"Id":1,"SaleDate":"2024-03-15","Total":2.0}]"#).unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(
            sales[0].sale_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(sales[0].total, 2.0);
    }

    #[test]
    fn sale_without_date_or_items() {
        let sale: Sale = from_str_case_insensitive(r#"{"Id":1,"SaleDate":null}"#).unwrap();
        assert!(sale.sale_date.is_none());
        assert!(sale.items.is_empty());
    }

    #[test]
    fn sale_with_garbage_date_fails() {
        let result: Result<Sale, _> = from_str_case_insensitive(r#"{"SaleDate":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn models_serialize_camel_case() {
        let customer = Customer {
            id: 1,
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert!(value.get("first_name").is_none());
    }
}
