// Detail modal navigation: store/image cursors, wrapping, swipe.

use bookmap::modal::{ModalNavigator, SWIPE_THRESHOLD};
use bookmap::models::StoreRecord;

fn store(id: &str, name: &str, store_type: &str, image_urls: &str) -> StoreRecord {
    StoreRecord {
        id: id.to_string(),
        store_name: name.to_string(),
        store_type: Some(store_type.to_string()),
        province: "เชียงใหม่".into(),
        district: "เมืองเชียงใหม่".into(),
        subdistrict: String::new(),
        latitude: "18.7838".into(),
        longitude: "98.9853".into(),
        image_urls: image_urls.to_string(),
        thumbnail_url: None,
        total_images: image_urls.split(',').filter(|s| !s.trim().is_empty()).count() as u32,
        has_images: !image_urls.is_empty(),
    }
}

/// Two stores at one coordinate, as in the deployed data.
fn colocated_pair() -> Vec<StoreRecord> {
    vec![
        store("1", "ร้านหนังสือสุริวงศ์", "ร้านหนังสือทั่วไป", "a.jpg,b.jpg,c.jpg"),
        store("2", "ซีเอ็ดบุ๊ค", "ห้างสรรพสินค้า", ""),
    ]
}

#[test]
fn open_resets_cursors_and_requires_nonempty_group() {
    let mut nav = ModalNavigator::new();
    nav.open(Vec::new());
    assert!(!nav.is_open());

    nav.open(colocated_pair());
    assert!(nav.is_open());
    assert_eq!((nav.store_index(), nav.image_index()), (0, 0));
    assert_eq!(nav.group().len(), 2);
}

#[test]
fn next_store_cycles_back_to_start_after_length_steps() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    let len = nav.group().len();
    for _ in 0..len {
        nav.next_store();
    }
    assert_eq!(nav.store_index(), 0);
}

#[test]
fn prev_store_from_zero_wraps_to_last() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    nav.prev_store();
    assert_eq!(nav.store_index(), nav.group().len() - 1);
}

#[test]
fn switching_store_resets_image_cursor() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    nav.next_image();
    assert_eq!(nav.image_index(), 1);
    nav.next_store();
    assert_eq!(nav.image_index(), 0);
    nav.prev_store();
    assert_eq!(nav.image_index(), 0);
}

#[test]
fn go_to_store_ignores_out_of_range() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    nav.go_to_store(1);
    assert_eq!(nav.store_index(), 1);
    nav.go_to_store(5);
    assert_eq!(nav.store_index(), 1);
}

#[test]
fn image_navigation_wraps_and_stays_at_zero_without_images() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());

    // Three images on the first store.
    nav.next_image();
    nav.next_image();
    assert_eq!(nav.image_index(), 2);
    nav.next_image();
    assert_eq!(nav.image_index(), 0);
    nav.prev_image();
    assert_eq!(nav.image_index(), 2);

    // Second store has no images at all.
    nav.next_store();
    nav.next_image();
    nav.prev_image();
    assert_eq!(nav.image_index(), 0);
}

#[test]
fn swipe_respects_threshold_and_direction() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());

    nav.on_swipe(-(SWIPE_THRESHOLD + 1.0)); // drag left: advance
    assert_eq!(nav.image_index(), 1);
    nav.on_swipe(SWIPE_THRESHOLD + 1.0); // drag right: back
    assert_eq!(nav.image_index(), 0);
    nav.on_swipe(-(SWIPE_THRESHOLD / 2.0)); // below threshold: ignored
    assert_eq!(nav.image_index(), 0);
}

#[test]
fn swipe_ignored_for_single_image_store() {
    let mut nav = ModalNavigator::new();
    nav.open(vec![store("1", "ร้านเดียว", "ร้านหนังสือทั่วไป", "only.jpg")]);
    nav.on_swipe(-200.0);
    assert_eq!(nav.image_index(), 0);
}

#[test]
fn navigation_is_noop_while_closed() {
    let mut nav = ModalNavigator::new();
    nav.next_store();
    nav.prev_store();
    nav.next_image();
    nav.on_swipe(-200.0);
    assert_eq!((nav.store_index(), nav.image_index()), (0, 0));
    assert!(nav.current_store().is_none());

    nav.open(colocated_pair());
    nav.close();
    nav.next_store();
    assert_eq!(nav.store_index(), 0);
    assert!(nav.group().is_empty());
}

#[test]
fn close_and_reopen_resets_to_first_store_and_image() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    nav.next_store();
    nav.close();
    nav.open(colocated_pair());
    assert_eq!((nav.store_index(), nav.image_index()), (0, 0));
}

#[test]
fn location_title_names_district_for_multi_store_groups() {
    let mut nav = ModalNavigator::new();
    nav.open(colocated_pair());
    assert_eq!(
        nav.location_title().as_deref(),
        Some("เมืองเชียงใหม่ (2 ร้าน)")
    );

    nav.close();
    nav.open(vec![store("9", "ร้านเดียว", "ร้านหนังสือทั่วไป", "")]);
    assert_eq!(nav.location_title().as_deref(), Some("ร้านเดียว"));
}
