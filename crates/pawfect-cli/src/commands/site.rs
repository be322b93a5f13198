//! The `pawfect pets` and `contact` commands.

use anyhow::Result;

use pawfect_core::catalog::{Catalog, Category, NO_PETS_MESSAGE};
use pawfect_core::forms::ContactForm;

pub fn pets(category: Category) -> Result<()> {
    let catalog = Catalog::default();
    let pets = catalog.filter(category);

    let filters: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    println!("Categories: {}", filters.join(" | "));
    println!("Category: {category}");
    if pets.is_empty() {
        println!("{NO_PETS_MESSAGE}");
        return Ok(());
    }
    for pet in pets {
        let mut line = format!("  {} ({}", pet.name, pet.breed);
        if let Some(age) = &pet.age {
            line.push_str(&format!(", {age}"));
        }
        line.push(')');
        if let Some(gender) = pet.gender {
            line.push_str(&format!(" {}", gender.symbol()));
        }
        println!("{line}");
    }
    Ok(())
}

pub fn contact(name: String, email: String, message: String) -> Result<()> {
    let mut form = ContactForm {
        name,
        email,
        message,
    };
    let notice = form.submit()?;
    println!("{notice}");
    Ok(())
}
