//! Theme catalog: ten named themes plus numbered ones cycling through the
//! five categories.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "minimal";
const NUMBERED_THEMES: std::ops::RangeInclusive<u32> = 11..=50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Minimal,
    Professional,
    Modern,
    Creative,
    Corporate,
}

impl ThemeCategory {
    const CYCLE: [ThemeCategory; 5] = [
        ThemeCategory::Minimal,
        ThemeCategory::Professional,
        ThemeCategory::Modern,
        ThemeCategory::Creative,
        ThemeCategory::Corporate,
    ];

    /// Parses a gallery filter value (`minimal`, `modern`, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::CYCLE
            .into_iter()
            .find(|c| c.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            ThemeCategory::Minimal => "minimal",
            ThemeCategory::Professional => "professional",
            ThemeCategory::Modern => "modern",
            ThemeCategory::Creative => "creative",
            ThemeCategory::Corporate => "corporate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    pub category: ThemeCategory,
}

const NAMED: &[(&str, &str, ThemeCategory)] = &[
    ("minimal", "Classic Minimal", ThemeCategory::Minimal),
    ("professional-blue", "Professional Blue", ThemeCategory::Professional),
    ("modern-gradient", "Modern Gradient", ThemeCategory::Modern),
    ("creative-bold", "Creative Bold", ThemeCategory::Creative),
    ("corporate-formal", "Corporate Formal", ThemeCategory::Corporate),
    ("minimal-white", "Minimalist White", ThemeCategory::Minimal),
    ("tech-savvy", "Tech Savvy", ThemeCategory::Modern),
    ("executive", "Executive Suite", ThemeCategory::Professional),
    ("artistic", "Artistic Flair", ThemeCategory::Creative),
    ("business-pro", "Business Pro", ThemeCategory::Corporate),
];

/// All themes in gallery order.
pub fn catalog() -> Vec<ThemeInfo> {
    let named = NAMED.iter().map(|(id, name, category)| ThemeInfo {
        id: id.to_string(),
        name: name.to_string(),
        category: *category,
    });
    let numbered = NUMBERED_THEMES.map(|i| ThemeInfo {
        id: format!("theme-{i}"),
        name: format!("Theme {i}"),
        category: ThemeCategory::CYCLE[((i - 11) % 5) as usize],
    });
    named.chain(numbered).collect()
}

/// Themes in one category, or the whole catalog for `None`.
pub fn filter(category: Option<ThemeCategory>) -> Vec<ThemeInfo> {
    catalog()
        .into_iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect()
}

pub fn find(id: &str) -> Option<ThemeInfo> {
    catalog().into_iter().find(|t| t.id == id)
}
