#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// The fixed set of expense categories. Not user-editable.
pub const CATEGORIES: &[Category] = &[
    Category::new("1", "Savings", "savings"),
    Category::new("2", "Food", "food"),
    Category::new("3", "House", "house"),
    Category::new("4", "Leisure", "leisure"),
    Category::new("5", "Health", "health"),
    Category::new("6", "Subscriptions", "subscriptions"),
    Category::new("7", "Transport", "transport"),
    Category::new("8", "Utilities", "utilities"),
    Category::new("9", "Other", "other"),
];

impl Category {
    pub const fn new(id: &'static str, name: &'static str, icon: &'static str) -> Self {
        Self { id, name, icon }
    }

    pub fn all() -> &'static [Category] {
        CATEGORIES
    }

    /// Find a category by ID.
    pub fn find_by_id(id: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.id == id)
    }

    /// Find a category by name (case-insensitive).
    pub fn find_by_name(name: &str) -> Option<&'static Category> {
        let lower = name.to_lowercase();
        CATEGORIES.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Resolve user input that may be either a category ID or a name.
    pub fn lookup(input: &str) -> Option<&'static Category> {
        let input = input.trim();
        Self::find_by_id(input).or_else(|| Self::find_by_name(input))
    }

    /// Position in `CATEGORIES`, used by cycling selectors.
    pub fn index_of(id: &str) -> Option<usize> {
        CATEGORIES.iter().position(|c| c.id == id)
    }

    /// Single-width glyph shown next to the name in lists.
    pub fn glyph(&self) -> &'static str {
        match self.icon {
            "savings" => "$",
            "food" => "ƒ",
            "house" => "⌂",
            "leisure" => "♫",
            "health" => "+",
            "subscriptions" => "↻",
            "transport" => "→",
            "utilities" => "ϟ",
            _ => "•",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
