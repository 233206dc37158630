//! Volunteer activity entity.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::Location;
use crate::domain::serde_utils::{lenient_u64, location_or_name, string_or_number};

/// Backend activity identifier (`id` or Mongo-style `_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Creates new id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns id as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ActivityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number::deserialize(deserializer).map(Self)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activity categories offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Social aid.
    BantuanSosial,
    /// Disaster relief.
    Bencana,
}

impl Category {
    /// All selectable categories in display order.
    pub const ALL: [Self; 2] = [Self::BantuanSosial, Self::Bencana];

    /// Returns the wire value.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BantuanSosial => "bantuan-sosial",
            Self::Bencana => "bencana",
        }
    }

    /// Returns the human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BantuanSosial => "Bantuan Sosial",
            Self::Bencana => "Bencana",
        }
    }

    /// Parses a wire value.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// A volunteer registered for an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Volunteer {
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account username.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

impl Volunteer {
    /// Returns the best available name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or("Volunteer")
    }
}

/// A donation made towards an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Donor name, absent for anonymous gifts.
    #[serde(default)]
    pub donor_name: Option<String>,
    /// Amount in rupiah.
    #[serde(default, deserialize_with = "lenient_u64::deserialize")]
    pub amount: u64,
    /// Optional message from the donor.
    #[serde(default)]
    pub message: Option<String>,
}

impl Donation {
    /// Returns donor name or `Anonymous`.
    #[must_use]
    pub fn donor(&self) -> &str {
        self.donor_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp 1.250.000`.
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

/// Volunteer activity as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity id.
    #[serde(alias = "_id")]
    pub id: ActivityId,
    /// Title (older records use `name`).
    #[serde(default, alias = "name")]
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Location, when set.
    #[serde(default, deserialize_with = "location_or_name::deserialize")]
    pub location: Option<Location>,
    /// Ordered image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Fundraising target.
    #[serde(default, deserialize_with = "lenient_u64::deserialize")]
    pub target_money: u64,
    /// Money collected so far.
    #[serde(default, deserialize_with = "lenient_u64::deserialize")]
    pub collected_money: u64,
    /// Number of volunteers collected so far.
    #[serde(default, deserialize_with = "lenient_u64::deserialize")]
    pub collected_volunteer: u64,
    /// Registered volunteers.
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    /// Donations received.
    #[serde(default)]
    pub donations: Vec<Donation>,
    /// Scheduled date, ISO 8601.
    #[serde(default)]
    pub date: Option<String>,
    /// Creation timestamp, ISO 8601.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp, ISO 8601.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Activity {
    /// Returns location name or the placeholder.
    #[must_use]
    pub fn location_name(&self) -> &str {
        self.location
            .as_ref()
            .map_or(super::location::LOCATION_PLACEHOLDER, Location::display_name)
    }

    /// Returns the first `max_chars` characters of the description, with an
    /// ellipsis when cut.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    /// Returns the category label, or the raw slug for unknown categories.
    #[must_use]
    pub fn category_label(&self) -> &str {
        Category::from_slug(&self.category)
            .map_or(self.category.as_str(), |category| category.label())
    }

    /// Returns the first image, including the legacy field.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .first()
            .or(self.image_url.as_ref())
            .map(String::as_str)
    }

    /// Returns registered volunteer count, preferring the list over the counter.
    #[must_use]
    pub fn volunteer_count(&self) -> u64 {
        if self.volunteers.is_empty() {
            self.collected_volunteer
        } else {
            self.volunteers.len() as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_json() -> &'static str {
        r#"{
            "_id": "65a1",
            "title": "Beach Cleanup Day",
            "description": "Pick up plastic along the shore.",
            "location": {"name": "Ancol Beach", "lat": -6.12, "lng": 106.84},
            "images": ["https://img/1.jpg"],
            "category": "bencana",
            "targetMoney": "5000000",
            "collectedMoney": 1250000,
            "volunteers": [{"name": "Rina"}, {"email": "budi@example.com"}],
            "donations": [{"amount": 50000}, {"donorName": "Sari", "amount": "100000", "message": "Semangat"}]
        }"#
    }

    #[test]
    fn test_deserialize_full_activity() {
        let activity: Activity = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(activity.id.as_str(), "65a1");
        assert_eq!(activity.title, "Beach Cleanup Day");
        assert_eq!(activity.location_name(), "Ancol Beach");
        assert_eq!(activity.target_money, 5_000_000);
        assert_eq!(activity.collected_money, 1_250_000);
        assert_eq!(activity.volunteer_count(), 2);
        assert_eq!(activity.category_label(), "Bencana");
        assert_eq!(activity.donations[0].donor(), "Anonymous");
        assert_eq!(activity.volunteers[1].display_name(), "budi@example.com");
    }

    #[test]
    fn test_deserialize_legacy_activity() {
        let activity: Activity = serde_json::from_str(
            r#"{"id": 7, "name": "Food Drive", "location": "Bandung", "imageUrl": "https://img/x.png"}"#,
        )
        .unwrap();

        assert_eq!(activity.id.as_str(), "7");
        assert_eq!(activity.title, "Food Drive");
        assert_eq!(activity.location_name(), "Bandung");
        assert_eq!(activity.cover_image(), Some("https://img/x.png"));
        assert_eq!(activity.volunteer_count(), 0);
    }

    #[test]
    fn test_unknown_category_shows_raw_slug() {
        let activity: Activity =
            serde_json::from_str(r#"{"id": "1", "category": "pendidikan"}"#).unwrap();
        assert_eq!(activity.category_label(), "pendidikan");
    }

    #[test]
    fn test_missing_location_uses_placeholder() {
        let activity: Activity = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(activity.location_name(), "Location TBA");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let mut activity: Activity = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        activity.description = "é".repeat(130);

        let excerpt = activity.excerpt(120);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 123);

        activity.description = "short".to_string();
        assert_eq!(activity.excerpt(120), "short");
    }

    #[test_case(0, "Rp 0" ; "zero")]
    #[test_case(999, "Rp 999" ; "hundreds")]
    #[test_case(1000, "Rp 1.000" ; "thousand")]
    #[test_case(1_250_000, "Rp 1.250.000" ; "millions")]
    fn test_format_rupiah(amount: u64, expected: &str) {
        assert_eq!(format_rupiah(amount), expected);
    }

    #[test]
    fn test_category_slugs() {
        assert_eq!(Category::from_slug("bantuan-sosial"), Some(Category::BantuanSosial));
        assert_eq!(Category::from_slug("unknown"), None);
        assert_eq!(Category::Bencana.label(), "Bencana");
    }
}
