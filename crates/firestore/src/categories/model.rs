use fintrack_core::categories::{
    is_hex_color, Category, CategoryIcon, CategoryUpdate, NewCategory, DEFAULT_CATEGORY_COLOR,
};
use fintrack_core::constants::collections::CATEGORIES;
use fintrack_core::records::MalformedRecord;
use fintrack_core::transactions::TransactionType;

use crate::document::{Document, Fields, Value};

/// Converts a stored category. A missing color or icon falls back to the
/// editor defaults; a present but unknown icon is rejected.
pub fn category_from_document(document: &Document) -> Result<Category, MalformedRecord> {
    let r = document.reader(CATEGORIES);
    let icon = match r.opt_string("icon")? {
        Some(name) => name.parse::<CategoryIcon>().map_err(|e| {
            MalformedRecord::invalid_field(CATEGORIES, r.id(), "icon", e.to_string())
        })?,
        None => CategoryIcon::default(),
    };
    let color = r
        .opt_string("color")?
        .filter(|c| is_hex_color(c))
        .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());

    Ok(Category {
        id: r.id().to_string(),
        user_id: r.string("userId")?,
        name: r.string("name")?,
        category_type: r.parsed::<TransactionType>("type")?,
        color,
        icon,
    })
}

pub fn new_category_fields(new_category: &NewCategory) -> Fields {
    Fields::from([
        ("name".to_string(), Value::string(new_category.name.trim())),
        (
            "type".to_string(),
            Value::string(new_category.category_type.as_str()),
        ),
        ("color".to_string(), Value::string(new_category.color.as_str())),
        ("icon".to_string(), Value::string(new_category.icon.name())),
    ])
}

pub fn category_update_fields(update: &CategoryUpdate) -> (Fields, Vec<&'static str>) {
    let mut fields = Fields::new();
    let mut mask = Vec::new();
    if let Some(name) = &update.name {
        fields.insert("name".to_string(), Value::string(name.trim()));
        mask.push("name");
    }
    if let Some(kind) = update.category_type {
        fields.insert("type".to_string(), Value::string(kind.as_str()));
        mask.push("type");
    }
    if let Some(color) = &update.color {
        fields.insert("color".to_string(), Value::string(color.as_str()));
        mask.push("color");
    }
    if let Some(icon) = update.icon {
        fields.insert("icon".to_string(), Value::string(icon.name()));
        mask.push("icon");
    }
    (fields, mask)
}
