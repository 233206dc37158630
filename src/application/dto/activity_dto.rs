//! Activity editor form.

use crate::domain::entities::{Activity, Category, LOCATION_PLACEHOLDER, Location};
use crate::domain::errors::ApiError;
use crate::domain::ports::ActivityDraft;
use crate::domain::serde_utils::parse_amount;

/// Editable copy of an activity, shared by the create and edit screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityForm {
    /// Title, required.
    pub title: String,
    /// Description, required.
    pub description: String,
    /// Category, required.
    pub category: Option<Category>,
    /// Location, optional.
    pub location: Location,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Target money as typed.
    pub target_money: String,
}

impl ActivityForm {
    /// Pre-fills the form from an existing activity.
    #[must_use]
    pub fn from_activity(activity: &Activity) -> Self {
        let mut images = activity.images.clone();
        if images.is_empty() {
            images.extend(activity.image_url.clone());
        }

        Self {
            title: activity.title.clone(),
            description: activity.description.clone(),
            category: Category::from_slug(&activity.category),
            location: activity.location.clone().unwrap_or_default(),
            images,
            target_money: if activity.target_money == 0 {
                String::new()
            } else {
                activity.target_money.to_string()
            },
        }
    }

    /// Appends an image URL. Blank input is ignored.
    pub fn add_image(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.images.push(url.to_string());
        true
    }

    /// Removes the image at `index`.
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Checks required fields and builds the request body.
    ///
    /// # Errors
    /// Returns a validation error when title, description or category is missing.
    pub fn validate(&self) -> Result<ActivityDraft, ApiError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ApiError::validation("Title and description are required."));
        }

        let Some(category) = self.category else {
            return Err(ApiError::validation("Category is required."));
        };

        let name = if self.location.name.trim().is_empty() {
            LOCATION_PLACEHOLDER.to_string()
        } else {
            self.location.name.trim().to_string()
        };

        Ok(ActivityDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            location: Location {
                name,
                lat: self.location.lat,
                lng: self.location.lng,
            },
            images: self.images.clone(),
            category: category.slug().to_string(),
            target_money: parse_amount(&self.target_money),
        })
    }
}
