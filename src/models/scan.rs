use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::order::Order;

/// Entrada del historial de escaneos. Se persiste con nombres camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanHistoryEntry {
    pub order_id: String,
    pub order_data: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub scanned_at: String,
}

impl ScanHistoryEntry {
    pub fn new(order: Order, image_url: Option<String>, scanned_at: DateTime<Utc>) -> Self {
        Self {
            order_id: order.id.clone(),
            order_data: order,
            image_url,
            scanned_at: scanned_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Identidad para la lista: el mismo pedido puede aparecer varias veces
    pub fn display_key(&self) -> String {
        format!("{}-{}", self.order_id, self.scanned_at)
    }
}

/// Respuesta de /scan-upload/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanUploadResponse {
    #[serde(default)]
    pub success: bool,
    pub cloudinary: CloudinaryAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_preview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloudinaryAsset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order() -> Order {
        serde_json::from_str(r#"{"id":42,"reference":"CMD-42","status":"packed"}"#).unwrap()
    }

    #[test]
    fn entry_uses_camel_case_and_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let entry = ScanHistoryEntry::new(order(), Some("https://cdn/x.jpg".into()), at);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["orderId"], "42");
        assert_eq!(json["imageUrl"], "https://cdn/x.jpg");
        assert_eq!(json["scannedAt"], "2024-05-01T08:30:00.000Z");
        assert_eq!(json["orderData"]["reference"], "CMD-42");
        assert_eq!(entry.display_key(), "42-2024-05-01T08:30:00.000Z");
    }

    #[test]
    fn missing_image_url_stays_absent() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let entry = ScanHistoryEntry::new(order(), None, at);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("imageUrl"));

        let back: ScanHistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn upload_response_requires_cloudinary_url() {
        let ok: ScanUploadResponse = serde_json::from_str(
            r#"{"success":true,"cloudinary":{"url":"https://cdn/1.jpg","bytes":1024},"log_id":9}"#,
        )
        .unwrap();
        assert_eq!(ok.cloudinary.url, "https://cdn/1.jpg");
        assert_eq!(ok.log_id, Some(9));

        assert!(serde_json::from_str::<ScanUploadResponse>(r#"{"success":true}"#).is_err());
    }
}
