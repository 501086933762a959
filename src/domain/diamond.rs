//! Wire-shape models for the provider's diamond records
//!
//! Field names follow the provider's GraphQL schema (a mix of snake_case and
//! camelCase); unknown fields in responses are tolerated and dropped.

use serde::{Deserialize, Serialize};

/// Grading certificate attached to a stone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Option<String>,
    pub lab: Option<String>,
    pub shape: Option<String>,
    #[serde(rename = "certNumber")]
    pub cert_number: Option<String>,
    pub cut: Option<String>,
    pub carats: Option<f64>,
    pub clarity: Option<String>,
    pub color: Option<String>,
    pub polish: Option<String>,
    pub symmetry: Option<String>,
    pub fluorescence: Option<String>,
    pub measurements: Option<String>,
    pub date_created: Option<String>,
}

/// Physical dimensions in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub express_timeline: Option<String>,
    pub standard_timeline: Option<String>,
}

/// A single stone as returned by the provider
///
/// `price` is the provider's wholesale price; `original_price` is absent on
/// the wire and populated only when a pricing markup has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diamond {
    pub id: String,
    pub video: Option<String>,
    pub image: Option<String>,
    pub availability: Option<String>,
    #[serde(rename = "supplierStockId")]
    pub supplier_stock_id: Option<String>,
    pub brown: Option<String>,
    pub green: Option<String>,
    pub milky: Option<String>,
    #[serde(rename = "eyeClean")]
    pub eye_clean: Option<String>,
    pub blue: Option<String>,
    pub gray: Option<String>,
    pub other: Option<String>,
    pub certificate: Option<Certificate>,
    pub delivery_time: Option<DeliveryTime>,
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub depth: Option<f64>,
    pub table: Option<f64>,
    pub girdle: Option<String>,
    pub culet: Option<String>,
    pub measurements: Option<Measurements>,
    pub mine_of_origin: Option<String>,
    pub country_of_origin: Option<String>,
}

/// Cursor information for a result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_next_page: Option<bool>,
    pub has_previous_page: Option<bool>,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<Diamond>,
    pub total_count: u64,
    pub page_info: Option<PageInfo>,
}

/// Image/video/certificate summary for a stone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondMedia {
    pub image: Option<String>,
    pub video: Option<String>,
    pub certificate: Option<CertificateSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateSummary {
    #[serde(rename = "certNumber")]
    pub cert_number: Option<String>,
    pub lab: Option<String>,
}

/// Outcome of a connection probe against the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub total_count: Option<u64>,
    pub message: String,
}

/// 1-based pagination for search calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
        }
    }

    /// Zero-based record offset sent to the provider
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_is_zero_based() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(2, 20).offset(), 20);
        assert_eq!(Pagination::new(3, 50).offset(), 100);
    }

    #[test]
    fn test_pagination_clamps_page_to_one() {
        assert_eq!(Pagination::new(0, 20).offset(), 0);
    }

    #[test]
    fn test_diamond_deserializes_from_provider_shape() {
        let json = serde_json::json!({
            "id": "dia-1",
            "video": null,
            "image": "https://img.example/dia-1.jpg",
            "availability": "AVAILABLE",
            "supplierStockId": "STK-9",
            "eyeClean": "Yes",
            "certificate": {
                "id": "cert-1",
                "lab": "GIA",
                "shape": "ROUND",
                "certNumber": "123456",
                "carats": 1.02,
                "clarity": "VS1",
                "color": "D"
            },
            "price": 4250.0,
            "measurements": { "length": 6.4, "width": 6.42, "depth": 3.95 }
        });

        let diamond: Diamond = serde_json::from_value(json).unwrap();

        assert_eq!(diamond.id, "dia-1");
        assert_eq!(diamond.supplier_stock_id.as_deref(), Some("STK-9"));
        assert_eq!(diamond.price, Some(4250.0));
        assert_eq!(diamond.original_price, None);

        let certificate = diamond.certificate.unwrap();
        assert_eq!(certificate.cert_number.as_deref(), Some("123456"));
        assert_eq!(certificate.carats, Some(1.02));
    }

    #[test]
    fn test_unknown_response_fields_are_tolerated() {
        let json = serde_json::json!({
            "id": "dia-2",
            "price": 900.0,
            "some_future_field": { "nested": true }
        });

        let diamond: Diamond = serde_json::from_value(json).unwrap();
        assert_eq!(diamond.id, "dia-2");
    }

    #[test]
    fn test_original_price_is_not_serialized_when_absent() {
        let diamond: Diamond = serde_json::from_value(serde_json::json!({
            "id": "dia-3",
            "price": 100.0
        }))
        .unwrap();

        let serialized = serde_json::to_value(&diamond).unwrap();
        assert!(!serialized.as_object().unwrap().contains_key("original_price"));
    }

    #[test]
    fn test_search_page_deserializes() {
        let json = serde_json::json!({
            "items": [{ "id": "dia-1", "price": 1000.0 }],
            "total_count": 314,
            "page_info": {
                "has_next_page": true,
                "has_previous_page": false,
                "start_cursor": "a",
                "end_cursor": "b"
            }
        });

        let page: SearchPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 314);
        assert_eq!(page.page_info.unwrap().has_next_page, Some(true));
    }
}
