use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: String,
    pub location_url: String,
    pub logo_url: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Brewery {
    pub fn new(name: String, description: String, location_url: String, logo_url: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            description,
            location_url,
            logo_url,
            created_at: None,
        }
    }
}

/// Partial update of a brewery. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreweryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl BreweryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location_url.is_none()
            && self.logo_url.is_none()
    }

    pub fn apply_to(&self, brewery: &mut Brewery) {
        if let Some(name) = &self.name {
            brewery.name = name.clone();
        }
        if let Some(description) = &self.description {
            brewery.description = description.clone();
        }
        if let Some(location_url) = &self.location_url {
            brewery.location_url = location_url.clone();
        }
        if let Some(logo_url) = &self.logo_url {
            brewery.logo_url = logo_url.clone();
        }
    }
}
