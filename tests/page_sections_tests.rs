use chrono::Datelike;
use serde_json::{json, Value};

use tablesite_lib::{
    core::types::PageSnapshot,
    page::sections::{populate, NavLinks, SocialNetwork},
    reservation::selector::{NO_TABLES_TEXT, PLACEHOLDER_TEXT},
};

fn full_payload() -> Value {
    json!({
        "business": {
            "id": 3,
            "name": "Kapadokya Cafe",
            "slug": "kapadokya",
            "website": {
                "website_title": "Kapadokya | Since 1998",
                "about_title": "Our story",
                "about_description": "Family run since 1998.",
                "about_image": "/media/about.jpg",
                "contact_phone": "+90 555 000 00 00",
                "contact_email": "hello@kapadokya.test",
                "contact_address": "Main street 1",
                "contact_working_hours": "09:00 - 23:00",
                "map_latitude": 38.64,
                "map_longitude": "34.83",
                "map_zoom_level": 17,
                "instagram_url": "https://instagram.com/kapadokya",
                "facebook_url": "https://facebook.com/kapadokya",
                "twitter_url": "",
                "show_menu": true,
                "show_contact": true,
                "show_map": true,
                "allow_reservations": true
            }
        },
        "menu": {
            "Soups": [{"id": 1, "name": "Lentil", "description": "Red lentil", "price": 85.5}],
            "Drinks": [
                {"id": 2, "name": "Tea", "price": 0},
                {"id": 3, "name": "Ayran", "image": "/media/ayran.jpg"}
            ]
        },
        "tables": [
            {"id": 10, "table_number": 1},
            {"id": 11, "table_number": "2"}
        ],
        "layout": {"elements": [{"type": "table", "id": 10}]}
    })
}

fn snapshot(payload: Value) -> PageSnapshot {
    PageSnapshot::from_value(payload).expect("valid payload")
}

#[test]
fn fully_configured_site_populates_every_section() {
    let page = populate(&snapshot(full_payload()));

    assert_eq!(page.title, "Kapadokya | Since 1998");
    assert_eq!(page.nav_logo, "Kapadokya Cafe");
    assert!(page.nav_links.about && page.nav_links.menu);
    assert!(page.nav_links.contact && page.nav_links.reservation);

    let about = page.about.expect("about");
    assert_eq!(about.title, "Our story");
    assert_eq!(about.image.as_deref(), Some("/media/about.jpg"));

    let contact = page.contact.expect("contact");
    let phone = contact.phone.expect("phone");
    assert_eq!(phone.href, "tel:+90 555 000 00 00");
    assert_eq!(contact.email.expect("email").href, "mailto:hello@kapadokya.test");
    assert_eq!(contact.working_hours.as_deref(), Some("09:00 - 23:00"));

    assert_eq!(page.footer.business_name, "Kapadokya Cafe");
    assert_eq!(page.footer.year, chrono::Local::now().year());
}

#[test]
fn menu_keeps_category_order_and_hides_zero_prices() {
    let page = populate(&snapshot(full_payload()));
    let menu = page.menu.expect("menu");

    let titles: Vec<&str> = menu.iter().map(|block| block.title.as_str()).collect();
    assert_eq!(titles, vec!["Soups", "Drinks"]);
    assert_eq!(menu[0].items[0].price, Some(85.5));
    assert_eq!(menu[1].items[0].price, None);
    assert_eq!(menu[1].items[1].image.as_deref(), Some("/media/ayran.jpg"));
    assert_eq!(menu[1].items[1].description, "");
}

#[test]
fn reservation_selector_lists_tables_after_placeholder() {
    let page = populate(&snapshot(full_payload()));
    let selector = &page.reservation.expect("reservation").selector;

    let options: Vec<(&str, &str, bool)> = selector
        .options()
        .iter()
        .map(|option| (option.value.as_str(), option.display_text.as_str(), option.disabled))
        .collect();
    assert_eq!(
        options,
        vec![
            ("", PLACEHOLDER_TEXT, true),
            ("10", "Table 1", false),
            ("11", "Table 2", false)
        ]
    );
    assert!(!selector.is_disabled());
    assert_eq!(selector.selected_value(), None);
}

#[test]
fn reservation_selector_is_disabled_without_tables() {
    let mut payload = full_payload();
    payload["tables"] = json!([]);
    let page = populate(&snapshot(payload));
    let selector = &page.reservation.expect("reservation").selector;

    assert!(selector.is_disabled());
    assert_eq!(selector.options().len(), 1);
    assert_eq!(selector.options()[0].display_text, NO_TABLES_TEXT);
}

#[test]
fn map_embed_uses_coordinates_and_zoom() {
    let page = populate(&snapshot(full_payload()));
    assert_eq!(
        page.map.expect("map").src,
        "https://maps.google.com/maps?q=38.64,34.83&hl=tr&z=17&output=embed"
    );

    let mut payload = full_payload();
    payload["business"]["website"]["map_zoom_level"] = Value::Null;
    let page = populate(&snapshot(payload));
    assert!(page.map.expect("map").src.contains("&z=15&"));
}

#[test]
fn social_links_follow_fixed_order_and_skip_blanks() {
    let page = populate(&snapshot(full_payload()));
    let networks: Vec<SocialNetwork> = page.social_links.iter().map(|link| link.network).collect();
    assert_eq!(networks, vec![SocialNetwork::Facebook, SocialNetwork::Instagram]);
}

#[test]
fn unconfigured_sections_are_left_out() {
    let page = populate(&snapshot(json!({
        "business": {"name": "Bare", "website": {"show_menu": true, "show_contact": true}},
        "menu": {}
    })));

    assert_eq!(page.title, "Bare");
    assert!(page.about.is_none());
    assert!(page.menu.is_none());
    assert!(page.contact.is_none());
    assert!(page.reservation.is_none());
    assert!(page.map.is_none());
    assert!(page.social_links.is_empty());
    assert_eq!(page.nav_links, NavLinks::default());
}

#[test]
fn layout_falls_back_to_business_layout() {
    let top_level = snapshot(json!({
        "business": {"website": {}, "layout": [{"type": "wall"}]},
        "layout": {"elements": [{"type": "table", "id": 1}]}
    }));
    assert_eq!(
        top_level.raw_layout(),
        Some(&json!({"elements": [{"type": "table", "id": 1}]}))
    );

    let fallback = snapshot(json!({
        "business": {"website": {}, "layout": [{"type": "wall"}]},
        "layout": null
    }));
    assert_eq!(fallback.raw_layout(), Some(&json!([{"type": "wall"}])));

    let absent = snapshot(json!({"business": {"website": {}}}));
    assert!(absent.raw_layout().is_none());
    assert!(absent.tables.is_empty());
    assert!(absent.menu.is_empty());
}

#[test]
fn payload_without_business_is_rejected() {
    let err = PageSnapshot::from_value(json!({"menu": {}, "tables": []})).unwrap_err();
    assert_eq!(err.code(), "INVALID_RESPONSE");
}
