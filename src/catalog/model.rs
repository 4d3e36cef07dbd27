/// Section assigned to abilities listed before any `###` heading.
pub const DEFAULT_SECTION: &str = "その他";

/// Which catalog a source issue enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    /// Move tables: name, english, category, power, accuracy, description.
    Moves,
    /// Ability tables grouped by `###` sections: name, english, trigger, category.
    Abilities,
}

impl TicketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moves => "moves",
            Self::Abilities => "abilities",
        }
    }

    /// Japanese noun used in rendered sub-issues.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Moves => "技",
            Self::Abilities => "特性",
        }
    }
}

/// A move row from a catalog table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveRecord {
    pub japanese: String,
    pub english: String,
    /// Damage class column (物理 / 特殊 / 変化).
    pub category: String,
    pub power: String,
    pub accuracy: String,
    /// Free-text effect description; the categorization signal.
    pub description: String,
}

impl MoveRecord {
    /// Map cells positionally. Missing trailing cells become empty strings.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            japanese: next(),
            english: next(),
            category: next(),
            power: next(),
            accuracy: next(),
            description: next(),
        }
    }
}

/// An ability row from a catalog table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityRecord {
    pub japanese: String,
    pub english: String,
    /// When the ability fires (e.g. 場に出たとき).
    pub trigger: String,
    pub category: String,
    /// Owning `###` section, or [`DEFAULT_SECTION`].
    pub section: String,
}

impl AbilityRecord {
    /// Map cells positionally and attach the owning section.
    pub fn from_cells(cells: Vec<String>, section: Option<&str>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            japanese: next(),
            english: next(),
            trigger: next(),
            category: next(),
            section: section
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SECTION)
                .to_string(),
        }
    }
}
