use chrono::Datelike;
use serde::Serialize;

use crate::{
    core::types::{MenuItem, PageSnapshot, WebsiteSettings},
    floorplan::modal::FloorPlanModal,
    reservation::{form::ReservationForm, selector::TableSelector},
};

const DEFAULT_MAP_ZOOM: &str = "15";

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NavLinks {
    pub about: bool,
    pub menu: bool,
    pub contact: bool,
    pub reservation: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AboutSection {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuEntry {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    /// Raw amount; currency formatting is left to the host.
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuCategoryBlock {
    pub title: String,
    pub items: Vec<MenuEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ContactSection {
    pub phone: Option<ContactLink>,
    pub email: Option<ContactLink>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
}

impl ContactSection {
    fn has_entries(&self) -> bool {
        self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.working_hours.is_some()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapEmbed {
    pub src: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    Twitter,
}

impl SocialNetwork {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter/X",
        }
    }

    pub fn icon_url(&self) -> &'static str {
        match self {
            Self::Facebook => "https://simpleicons.org/icons/facebook.svg",
            Self::Instagram => "https://simpleicons.org/icons/instagram.svg",
            Self::Twitter => "https://simpleicons.org/icons/x.svg",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SocialLink {
    pub network: SocialNetwork,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationSection {
    pub selector: TableSelector,
    pub form: ReservationForm,
    pub floor_plan: FloorPlanModal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Footer {
    pub business_name: String,
    pub year: i32,
}

/// The populated page. Sections the business did not configure are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub nav_logo: String,
    pub nav_links: NavLinks,
    pub about: Option<AboutSection>,
    pub menu: Option<Vec<MenuCategoryBlock>>,
    pub contact: Option<ContactSection>,
    pub reservation: Option<ReservationSection>,
    pub map: Option<MapEmbed>,
    pub social_links: Vec<SocialLink>,
    pub footer: Footer,
}

pub fn populate(snapshot: &PageSnapshot) -> PageView {
    let business = &snapshot.business;
    let website = snapshot.website();
    let business_name = business.display_name().to_string();

    let about = about_section(website);
    let menu = menu_section(snapshot);
    let contact = contact_section(website);
    let reservation = reservation_section(snapshot);

    let nav_links = NavLinks {
        about: about.is_some(),
        menu: menu.is_some(),
        contact: contact.is_some(),
        reservation: reservation.is_some(),
    };

    tracing::info!(
        business = %business_name,
        about = nav_links.about,
        menu = nav_links.menu,
        contact = nav_links.contact,
        reservation = nav_links.reservation,
        "page populated"
    );

    PageView {
        title: non_empty(website.website_title.as_deref()).unwrap_or_else(|| business_name.clone()),
        nav_logo: business_name.clone(),
        nav_links,
        about,
        menu,
        contact,
        reservation,
        map: map_embed(website),
        social_links: social_links(website),
        footer: Footer {
            business_name,
            year: chrono::Local::now().year(),
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(ToString::to_string)
}

fn about_section(website: &WebsiteSettings) -> Option<AboutSection> {
    let title = non_empty(website.about_title.as_deref())?;
    let description = non_empty(website.about_description.as_deref())?;
    Some(AboutSection {
        title,
        description,
        image: non_empty(website.about_image.as_deref()),
    })
}

fn menu_section(snapshot: &PageSnapshot) -> Option<Vec<MenuCategoryBlock>> {
    if website_flag(snapshot.website().show_menu) && !snapshot.menu.is_empty() {
        Some(
            snapshot
                .menu
                .iter()
                .map(|category| MenuCategoryBlock {
                    title: category.name.clone(),
                    items: category.items.iter().map(menu_entry).collect(),
                })
                .collect(),
        )
    } else {
        None
    }
}

fn menu_entry(item: &MenuItem) -> MenuEntry {
    MenuEntry {
        name: item.name.clone().unwrap_or_default(),
        description: item.description.clone().unwrap_or_default(),
        image: non_empty(item.image.as_deref()),
        price: item.price.filter(|price| *price != 0.0),
    }
}

fn contact_section(website: &WebsiteSettings) -> Option<ContactSection> {
    if !website_flag(website.show_contact) {
        return None;
    }
    let section = ContactSection {
        phone: non_empty(website.contact_phone.as_deref()).map(|phone| ContactLink {
            href: format!("tel:{phone}"),
            text: phone,
        }),
        email: non_empty(website.contact_email.as_deref()).map(|email| ContactLink {
            href: format!("mailto:{email}"),
            text: email,
        }),
        address: non_empty(website.contact_address.as_deref()),
        working_hours: non_empty(website.contact_working_hours.as_deref()),
    };
    section.has_entries().then_some(section)
}

fn reservation_section(snapshot: &PageSnapshot) -> Option<ReservationSection> {
    if snapshot.website().allow_reservations != Some(true) {
        return None;
    }
    Some(ReservationSection {
        selector: TableSelector::from_tables(&snapshot.tables),
        form: ReservationForm::new(),
        floor_plan: FloorPlanModal::new(),
    })
}

fn map_embed(website: &WebsiteSettings) -> Option<MapEmbed> {
    if !website_flag(website.show_map) {
        return None;
    }
    let latitude = non_empty(website.map_latitude.as_deref())?;
    let longitude = non_empty(website.map_longitude.as_deref())?;
    let zoom = non_empty(website.map_zoom_level.as_deref())
        .filter(|zoom| zoom != "0")
        .unwrap_or_else(|| DEFAULT_MAP_ZOOM.to_string());
    Some(MapEmbed {
        src: format!(
            "https://maps.google.com/maps?q={latitude},{longitude}&hl=tr&z={zoom}&output=embed"
        ),
    })
}

fn social_links(website: &WebsiteSettings) -> Vec<SocialLink> {
    [
        (SocialNetwork::Facebook, &website.facebook_url),
        (SocialNetwork::Instagram, &website.instagram_url),
        (SocialNetwork::Twitter, &website.twitter_url),
    ]
    .into_iter()
    .filter_map(|(network, url)| {
        non_empty(url.as_deref()).map(|url| SocialLink { network, url })
    })
    .collect()
}

fn website_flag(flag: Option<bool>) -> bool {
    flag.unwrap_or(false)
}
