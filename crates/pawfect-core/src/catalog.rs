//! Adoptable pets and the browse-page category filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Dog,
    Cat,
    Bird,
    #[serde(rename = "Small Animals")]
    SmallAnimals,
    Others,
}

impl Category {
    /// Filter buttons, in display order.
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Dog,
        Category::Cat,
        Category::Bird,
        Category::SmallAnimals,
        Category::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Dog => "Dog",
            Category::Cat => "Cat",
            Category::Bird => "Bird",
            Category::SmallAnimals => "Small Animals",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "all" => Ok(Category::All),
            "dog" | "dogs" => Ok(Category::Dog),
            "cat" | "cats" => Ok(Category::Cat),
            "bird" | "birds" => Ok(Category::Bird),
            "small animals" | "small" => Ok(Category::SmallAnimals),
            "others" | "other" => Ok(Category::Others),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn symbol(self) -> char {
        match self {
            Gender::Male => '♂',
            Gender::Female => '♀',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u32,
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub age: Option<String>,
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Pets listed on the browse page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pets: Vec<Pet>,
}

/// Shown when a filter matches nothing.
pub const NO_PETS_MESSAGE: &str = "No pets found in this category.";

impl Default for Catalog {
    fn default() -> Self {
        let pet = |id, name: &str, breed: &str, age: &str, image: &str, category, gender| Pet {
            id,
            name: name.to_string(),
            breed: breed.to_string(),
            age: Some(age.to_string()),
            image: image.to_string(),
            category,
            gender,
        };
        Self {
            pets: vec![
                pet(1, "Max", "Golden Retriever", "2 years", "pet-dog-1.jpg", Category::Dog, Some(Gender::Male)),
                pet(2, "Luna", "Tabby", "18 months", "pet-cat-1.jpg", Category::Cat, Some(Gender::Female)),
                pet(3, "Sunny & Pip", "Parrot & Hamster", "1 year", "pet-small-1.jpg", Category::SmallAnimals, None),
                pet(4, "Bailey", "Corgi", "3 years", "pet-dog-2.jpg", Category::Dog, Some(Gender::Male)),
            ],
        }
    }
}

impl Catalog {
    pub fn new(pets: Vec<Pet>) -> Self {
        Self { pets }
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Pets in `category`; `All` returns every pet.
    pub fn filter(&self, category: Category) -> Vec<&Pet> {
        self.pets
            .iter()
            .filter(|p| category == Category::All || p.category == category)
            .collect()
    }
}
