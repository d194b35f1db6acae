use crate::price::parse_price;
use serde::{Deserialize, Serialize};

/// A catalog entity. Immutable once loaded.
///
/// Optional facets default on absence: numeric fields read as `0`, collections
/// deserialize to empty vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display price as supplied by the catalog, e.g. `"$49.99"`.
    pub price: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub water_bodies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,
}

impl ProductRecord {
    pub fn new(id: &str, name: &str, category: &str, price: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: price.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
            image: String::new(),
            in_stock: true,
            rating: None,
            reviews: None,
            water_bodies: Vec::new(),
            activities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_water_bodies(mut self, water_bodies: &[&str]) -> Self {
        self.water_bodies = water_bodies.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn with_activities(mut self, activities: &[&str]) -> Self {
        self.activities = activities.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = Some(rating);
        self.reviews = Some(reviews);
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }

    /// Rating clamped to the 0-5 scale, `0.0` when unrated.
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.map(|r| r.clamp(0.0, 5.0)).unwrap_or(0.0)
    }

    pub fn review_count(&self) -> u32 {
        self.reviews.unwrap_or(0)
    }

    /// Numeric price, or `None` when the display string cannot be parsed.
    pub fn parsed_price(&self) -> Option<f64> {
        parse_price(&self.price)
    }

    /// Lowercased name, description and tags joined into one searchable blob.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len() + self.description.len() + self.tags.len() * 16,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.description);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_on_absence() {
        let json = r#"{
            "id": "p1",
            "name": "Dry Bag",
            "description": "Keeps gear dry",
            "price": "$19.99",
            "category": "Gear",
            "tags": ["waterproof"],
            "image": "/img/dry-bag.jpg",
            "inStock": true
        }"#;

        let product: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, None);
        assert_eq!(product.rating_or_zero(), 0.0);
        assert_eq!(product.review_count(), 0);
        assert!(product.water_bodies.is_empty());
        assert!(product.activities.is_empty());
    }

    #[test]
    fn test_camel_case_facets() {
        let json = r#"{
            "id": "p2",
            "name": "Lake Tahoe Board Shorts",
            "description": "Quick-dry shorts",
            "price": "$45.00",
            "category": "Apparel",
            "tags": ["board shorts", "swimming"],
            "image": "",
            "inStock": false,
            "rating": 4.5,
            "reviews": 120,
            "waterBodies": ["Lake Tahoe"],
            "activities": ["swimming"]
        }"#;

        let product: ProductRecord = serde_json::from_str(json).unwrap();
        assert!(!product.in_stock);
        assert_eq!(product.water_bodies, vec!["Lake Tahoe".to_string()]);
        assert_eq!(product.review_count(), 120);
        assert_eq!(product.parsed_price(), Some(45.0));
    }

    #[test]
    fn test_rating_clamped() {
        let product = ProductRecord::new("p", "Kayak", "Boats", "$500").with_rating(7.0, 3);
        assert_eq!(product.rating_or_zero(), 5.0);
    }

    #[test]
    fn test_searchable_text_is_lowercase_and_includes_tags() {
        let product = ProductRecord::new("p", "Lake Tahoe Board Shorts", "Apparel", "$45")
            .with_description("Quick-dry")
            .with_tags(&["Board Shorts", "Swimming"]);

        let text = product.searchable_text();
        assert!(text.contains("lake tahoe board shorts"));
        assert!(text.contains("quick-dry"));
        assert!(text.contains("swimming"));
        assert!(!text.contains("Swimming"));
    }
}
