// Directory envelope and record deserialization against the backend's
// inconsistent JSON (string/number ids and coordinates, 0/1 booleans).

use bookmap::api::{parse_directory, DirectoryError};
use bookmap::models::{DirectoryResponse, StoreRecord, UNSPECIFIED_TYPE};

#[test]
fn record_accepts_string_and_number_fields() {
    let json = r#"{
        "id": 42,
        "store_name": "ร้านหนังสือสุริวงศ์",
        "store_type": "ร้านหนังสือทั่วไป",
        "province": "เชียงใหม่",
        "district": "เมืองเชียงใหม่",
        "subdistrict": "ช้างคลาน",
        "latitude": "18.7838",
        "longitude": 98.9853,
        "image_urls": "a.jpg, b.jpg",
        "thumbnail_url": "thumb.jpg",
        "total_images": "2",
        "has_images": 1
    }"#;

    let record: StoreRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, "42");
    assert_eq!(record.total_images, 2);
    assert!(record.has_images);
    let c = record.coordinate().unwrap();
    assert_eq!((c.lat, c.lon), (18.7838, 98.9853));
    assert_eq!(record.image_url_list(), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn missing_optional_fields_default() {
    let json = r#"{"id": "7", "store_name": "ร้านไม่มีข้อมูล"}"#;
    let record: StoreRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.type_label(), UNSPECIFIED_TYPE);
    assert!(record.coordinate().is_none());
    assert!(record.image_url_list().is_empty());
    assert_eq!(record.total_images, 0);
    assert!(!record.has_images);
}

#[test]
fn success_envelope_yields_snapshot_in_order() {
    let json = r#"{
        "status": "success",
        "data": [
            {"id": "1", "store_name": "ก", "latitude": "18.1", "longitude": "99.1"},
            {"id": "2", "store_name": "ข", "latitude": "18.2", "longitude": "99.2"}
        ]
    }"#;
    let body: DirectoryResponse = serde_json::from_str(json).unwrap();
    let snapshot = parse_directory(body).unwrap();
    let ids: Vec<_> = snapshot.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn failure_envelope_surfaces_the_message() {
    let json = r#"{"status": "error", "message": "ไม่พบข้อมูล"}"#;
    let body: DirectoryResponse = serde_json::from_str(json).unwrap();
    let err = parse_directory(body).unwrap_err();
    let api = err.downcast_ref::<DirectoryError>().unwrap();
    assert!(matches!(api, DirectoryError::Api { message } if message == "ไม่พบข้อมูล"));
}

#[test]
fn failure_without_message_still_errors() {
    let json = r#"{"status": "maintenance"}"#;
    let body: DirectoryResponse = serde_json::from_str(json).unwrap();
    let err = parse_directory(body).unwrap_err();
    assert!(err.to_string().contains("maintenance"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_live_directory() {
    let snapshot = bookmap::Client::default().fetch_directory().unwrap();
    assert!(!snapshot.is_empty());
}
