//! Shared cafe builders for unit tests.

use super::{CafeForm, HttpsUrl, NewCafe, SeatingCapacity};

/// A valid cafe record with the given name.
pub(crate) fn new_cafe(name: &str) -> NewCafe {
    NewCafe {
        name: name.to_owned(),
        map_url: HttpsUrl::new("https://maps.example/cafe").expect("valid map url"),
        img_url: HttpsUrl::new("https://img.example/cafe.jpg").expect("valid img url"),
        location: "Shoreditch".to_owned(),
        has_sockets: true,
        has_toilet: false,
        has_wifi: true,
        can_take_calls: false,
        seats: SeatingCapacity::TenToTwenty,
        coffee_price: "£2.80".to_owned(),
    }
}

/// A valid add-cafe submission for "Blue Bottle".
pub(crate) fn blue_bottle_form() -> CafeForm {
    CafeForm {
        name: Some("Blue Bottle".into()),
        location: Some("Shoreditch".into()),
        map_url: Some("https://maps.example/blue".into()),
        img_url: Some("https://img.example/blue.jpg".into()),
        has_sockets: Some("1".into()),
        has_toilet: Some("0".into()),
        has_wifi: Some("1".into()),
        can_take_calls: Some("0".into()),
        seats: Some("1".into()),
        coffee_price: Some("£2.80".into()),
    }
}
