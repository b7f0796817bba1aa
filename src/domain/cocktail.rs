use serde::{Deserialize, Serialize};

use super::EntityName;

// Width of cocktail_materials.unit
const MAX_UNIT_LENGTH: usize = 32;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Cocktail{
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub created_at: i64,
    pub updated_at: i64
}

/// A cocktail together with the materials it is made of.
///
/// The zero value (id 0, empty name) stands for "no such cocktail".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CocktailDetail{
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub materials: Vec<Material>,
    pub created_at: i64,
    pub updated_at: i64
}

/// `quantity` is absent when the material is listed in a shop's cocktail detail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Material{
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<MaterialQuantity>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MaterialQuantity{
    pub quantity: i64,
    pub unit: String
}

impl MaterialQuantity {
    pub fn parse(quantity: i64, unit: String) -> Result<MaterialQuantity, String>{
        if quantity <= 0 {
            return Err(format!("quantity must be positive, got {}", quantity));
        }

        let unit = unit.trim();

        if unit.is_empty() {
            return Err("unit must not be empty".to_string());
        }

        if unit.chars().count() > MAX_UNIT_LENGTH {
            return Err(format!("{} is longer than {} characters", unit, MAX_UNIT_LENGTH));
        }

        Ok(Self{ quantity, unit: unit.to_string() })
    }
}

#[derive(Debug, Clone)]
pub struct NewCocktail{
    pub name: EntityName,
    pub image_url: Option<String>,
    pub materials: Vec<NewMaterial>
}

#[derive(Debug, Clone)]
pub struct NewMaterial{
    pub name: EntityName,
    pub quantity: MaterialQuantity
}

impl CocktailDetail {
    pub fn from_cocktail(cocktail: Cocktail, materials: Vec<Material>) -> Self {
        CocktailDetail{
            id: cocktail.id,
            name: cocktail.name,
            image_url: cocktail.image_url,
            materials,
            created_at: cocktail.created_at,
            updated_at: cocktail.updated_at
        }
    }
}
