//! Effect categorization and bucketing.
//!
//! Moves are categorized by keyword rules over their description; abilities
//! are grouped by their table section (or trigger when the section is blank).

use std::borrow::Cow;

use crate::catalog::{AbilityRecord, MoveRecord};

/// Effect category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Burn,
    Paralysis,
    Freeze,
    Poison,
    Sleep,
    Flinch,
    Recoil,
    Healing,
    StatChange,
    Weather,
    Terrain,
    SwitchOrFlee,
    Protection,
    Confusion,
    CriticalHit,
    PowerModifier,
    Charge,
    Copy,
    Item,
    Ability,
    TypeChange,
    NoEffect,
    /// No rule matched.
    Other,
}

impl MoveCategory {
    /// Stable ASCII key, used in logs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Burn => "burn",
            Self::Paralysis => "paralysis",
            Self::Freeze => "freeze",
            Self::Poison => "poison",
            Self::Sleep => "sleep",
            Self::Flinch => "flinch",
            Self::Recoil => "recoil",
            Self::Healing => "healing",
            Self::StatChange => "stat-change",
            Self::Weather => "weather",
            Self::Terrain => "terrain",
            Self::SwitchOrFlee => "switch-or-flee",
            Self::Protection => "protection",
            Self::Confusion => "confusion",
            Self::CriticalHit => "critical-hit",
            Self::PowerModifier => "power-modifier",
            Self::Charge => "charge",
            Self::Copy => "copy",
            Self::Item => "item",
            Self::Ability => "ability",
            Self::TypeChange => "type-change",
            Self::NoEffect => "no-effect",
            Self::Other => "other",
        }
    }

    /// Bucket name shown in sub-issue titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Burn => "やけど付与",
            Self::Paralysis => "まひ付与",
            Self::Freeze => "こおり付与",
            Self::Poison => "どく付与",
            Self::Sleep => "ねむり付与",
            Self::Flinch => "ひるみ付与",
            Self::Recoil => "反動ダメージ",
            Self::Healing => "HP回復",
            Self::StatChange => "能力変化",
            Self::Weather => "天候関連",
            Self::Terrain => "フィールド変化",
            Self::SwitchOrFlee => "交代・逃走",
            Self::Protection => "防御技",
            Self::Confusion => "こんらん付与",
            Self::CriticalHit => "急所率上昇",
            Self::PowerModifier => "威力変化",
            Self::Charge => "チャージ技",
            Self::Copy => "コピー系",
            Self::Item => "道具関連",
            Self::Ability => "特性関連",
            Self::TypeChange => "タイプ変化",
            Self::NoEffect => "効果なし",
            Self::Other => "その他",
        }
    }
}

/// A keyword rule: every group must have at least one keyword present in the
/// lower-cased description.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub all_of: &'static [&'static [&'static str]],
    pub category: MoveCategory,
}

impl Rule {
    pub const fn new(all_of: &'static [&'static [&'static str]], category: MoveCategory) -> Self {
        Self { all_of, category }
    }

    /// `lowered` must already be lower-case.
    pub fn matches(&self, lowered: &str) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|kw| lowered.contains(kw)))
    }
}

/// Move rules in precedence order. The first match wins, so reordering
/// changes how overlapping descriptions are grouped.
pub const MOVE_RULES: &[Rule] = &[
    Rule::new(&[&["burn"]], MoveCategory::Burn),
    Rule::new(&[&["paralyze"]], MoveCategory::Paralysis),
    Rule::new(&[&["freeze"]], MoveCategory::Freeze),
    Rule::new(&[&["poison"]], MoveCategory::Poison),
    Rule::new(&[&["sleep"]], MoveCategory::Sleep),
    Rule::new(&[&["flinch"]], MoveCategory::Flinch),
    Rule::new(&[&["recoil"]], MoveCategory::Recoil),
    Rule::new(&[&["heal", "recover", "drain"]], MoveCategory::Healing),
    Rule::new(&[&["stat"]], MoveCategory::StatChange),
    Rule::new(&[&["weather"]], MoveCategory::Weather),
    Rule::new(&[&["terrain"]], MoveCategory::Terrain),
    Rule::new(&[&["switch", "flee"]], MoveCategory::SwitchOrFlee),
    Rule::new(&[&["protect", "block"]], MoveCategory::Protection),
    Rule::new(&[&["confuse"]], MoveCategory::Confusion),
    Rule::new(&[&["critical"]], MoveCategory::CriticalHit),
    Rule::new(&[&["power"], &["double", "higher"]], MoveCategory::PowerModifier),
    Rule::new(&[&["charge", "turn"]], MoveCategory::Charge),
    Rule::new(&[&["copy", "mimic"]], MoveCategory::Copy),
    Rule::new(&[&["item"]], MoveCategory::Item),
    Rule::new(&[&["ability"]], MoveCategory::Ability),
    Rule::new(&[&["type"], &["change"]], MoveCategory::TypeChange),
    Rule::new(&[&["nothing"]], MoveCategory::NoEffect),
];

/// Categorize a move description. Total: falls back to [`MoveCategory::Other`].
pub fn categorize_move(description: &str) -> MoveCategory {
    let lowered = description.to_lowercase();
    MOVE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(MoveCategory::Other)
}

/// Records that know which bucket they belong to.
pub trait Categorize {
    fn bucket_name(&self) -> Cow<'_, str>;
}

impl Categorize for MoveRecord {
    fn bucket_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(categorize_move(&self.description).label())
    }
}

impl Categorize for AbilityRecord {
    fn bucket_name(&self) -> Cow<'_, str> {
        if self.section.is_empty() {
            Cow::Borrowed(&self.trigger)
        } else {
            Cow::Borrowed(&self.section)
        }
    }
}

/// A named group of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<R> {
    pub name: String,
    pub records: Vec<R>,
}

/// Buckets in first-seen order; records keep parse order within a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets<R> {
    buckets: Vec<Bucket<R>>,
}

impl<R> Default for Buckets<R> {
    fn default() -> Self {
        Self { buckets: Vec::new() }
    }
}

impl<R> Buckets<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to `name`, creating the bucket on first sight.
    pub fn push(&mut self, name: &str, record: R) {
        match self.buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => bucket.records.push(record),
            None => self.buckets.push(Bucket {
                name: name.to_string(),
                records: vec![record],
            }),
        }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.name.as_str()).collect()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&[R]> {
        self.buckets
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.records.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket<R>> {
        self.buckets.iter()
    }
}

impl<R: Categorize> FromIterator<R> for Buckets<R> {
    fn from_iter<I: IntoIterator<Item = R>>(records: I) -> Self {
        let mut buckets = Self::new();
        for record in records {
            let name = record.bucket_name().into_owned();
            buckets.push(&name, record);
        }
        buckets
    }
}

impl<R> IntoIterator for Buckets<R> {
    type Item = Bucket<R>;
    type IntoIter = std::vec::IntoIter<Bucket<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Buckets<R> {
    type Item = &'a Bucket<R>;
    type IntoIter = std::slice::Iter<'a, Bucket<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_SECTION;

    fn mv(english: &str, description: &str) -> MoveRecord {
        MoveRecord {
            english: english.to_string(),
            description: description.to_string(),
            ..MoveRecord::default()
        }
    }

    fn ability(english: &str, trigger: &str, section: &str) -> AbilityRecord {
        AbilityRecord {
            english: english.to_string(),
            trigger: trigger.to_string(),
            section: section.to_string(),
            ..AbilityRecord::default()
        }
    }

    #[test]
    fn test_categorize_move_single_keywords() {
        assert_eq!(categorize_move("May burn the target."), MoveCategory::Burn);
        assert_eq!(categorize_move("May paralyze the target."), MoveCategory::Paralysis);
        assert_eq!(categorize_move("May freeze the target."), MoveCategory::Freeze);
        assert_eq!(categorize_move("Badly poisons the target."), MoveCategory::Poison);
        assert_eq!(categorize_move("Puts the target to sleep."), MoveCategory::Sleep);
        assert_eq!(categorize_move("May cause flinching."), MoveCategory::Flinch);
        assert_eq!(categorize_move("User receives recoil damage."), MoveCategory::Recoil);
        assert_eq!(categorize_move("Raises the user's Attack stat."), MoveCategory::StatChange);
        assert_eq!(categorize_move("Changes the weather to rain."), MoveCategory::Weather);
        assert_eq!(categorize_move("Sets Grassy Terrain."), MoveCategory::Terrain);
        assert_eq!(categorize_move("Confuses the target."), MoveCategory::Confusion);
        assert_eq!(categorize_move("High critical hit ratio."), MoveCategory::CriticalHit);
        assert_eq!(categorize_move("Uses the target's held item."), MoveCategory::Item);
        assert_eq!(categorize_move("Suppresses the target's ability."), MoveCategory::Ability);
        assert_eq!(categorize_move("Does nothing."), MoveCategory::NoEffect);
    }

    #[test]
    fn test_categorize_move_any_of_groups() {
        assert_eq!(categorize_move("Heals the user."), MoveCategory::Healing);
        assert_eq!(categorize_move("User recovers half its max HP."), MoveCategory::Healing);
        assert_eq!(categorize_move("Drains half the damage dealt."), MoveCategory::Healing);
        assert_eq!(categorize_move("User switches out."), MoveCategory::SwitchOrFlee);
        assert_eq!(categorize_move("Allows the user to flee."), MoveCategory::SwitchOrFlee);
        assert_eq!(categorize_move("Protects the user."), MoveCategory::Protection);
        assert_eq!(categorize_move("Blocks the target's escape."), MoveCategory::Protection);
        assert_eq!(categorize_move("Charges on first turn."), MoveCategory::Charge);
        assert_eq!(categorize_move("Uses a copy of the target's last move."), MoveCategory::Copy);
        assert_eq!(categorize_move("Mimics a move."), MoveCategory::Copy);
    }

    #[test]
    fn test_categorize_move_is_case_insensitive() {
        assert_eq!(categorize_move("BURNS EVERYTHING"), MoveCategory::Burn);
        assert_eq!(categorize_move("Paralyze"), MoveCategory::Paralysis);
    }

    #[test]
    fn test_categorize_move_precedence() {
        assert_eq!(categorize_move("May burn or paralyze the target."), MoveCategory::Burn);
        assert_eq!(categorize_move("May paralyze or burn the target."), MoveCategory::Burn);
        // "stat" outranks "switch".
        assert_eq!(categorize_move("Lowers a stat, then the user switches out."), MoveCategory::StatChange);
        // "heal" outranks "turn".
        assert_eq!(categorize_move("Heals at the end of each turn."), MoveCategory::Healing);
    }

    #[test]
    fn test_categorize_move_power_requires_both_parts() {
        assert_eq!(categorize_move("Power doubles if the user moved last."), MoveCategory::PowerModifier);
        assert_eq!(categorize_move("Higher power when HP is low."), MoveCategory::PowerModifier);
        // "power" alone is not enough.
        assert_eq!(categorize_move("A powerful blow."), MoveCategory::Other);
        // "double" alone is not enough either.
        assert_eq!(categorize_move("Hits twice, a double strike."), MoveCategory::Other);
    }

    #[test]
    fn test_categorize_move_type_change_requires_both_parts() {
        assert_eq!(categorize_move("Changes the user's type."), MoveCategory::TypeChange);
        assert_eq!(categorize_move("Super effective against Water type."), MoveCategory::Other);
    }

    #[test]
    fn test_categorize_move_fallback() {
        assert_eq!(categorize_move(""), MoveCategory::Other);
        assert_eq!(categorize_move("A plain attack."), MoveCategory::Other);
    }

    #[test]
    fn test_rule_table_order() {
        let keys: Vec<&str> = MOVE_RULES.iter().map(|r| r.category.key()).collect();
        assert_eq!(keys.first(), Some(&"burn"));
        assert_eq!(keys.last(), Some(&"no-effect"));
        let pos = |k: &str| keys.iter().position(|x| *x == k).unwrap();
        assert!(pos("burn") < pos("paralysis"));
        assert!(pos("critical-hit") < pos("power-modifier"));
        assert!(pos("power-modifier") < pos("charge"));
        assert!(pos("ability") < pos("type-change"));
        assert_eq!(keys.len(), 22);
    }

    #[test]
    fn test_move_buckets_first_seen_order() {
        let moves = vec![
            mv("Thunderbolt", "May paralyze the target."),
            mv("Ember", "May burn the target."),
            mv("Nuzzle", "Paralyzes the target."),
            mv("Tackle", "A plain attack."),
        ];
        let buckets: Buckets<MoveRecord> = moves.into_iter().collect();
        assert_eq!(buckets.names(), vec!["まひ付与", "やけど付与", "その他"]);
        let paralysis: Vec<&str> = buckets
            .get("まひ付与")
            .unwrap()
            .iter()
            .map(|m| m.english.as_str())
            .collect();
        assert_eq!(paralysis, vec!["Thunderbolt", "Nuzzle"]);
        assert_eq!(buckets.record_count(), 4);
    }

    #[test]
    fn test_move_buckets_idempotent() {
        let moves = vec![
            mv("A", "burn and paralyze"),
            mv("B", "drains HP"),
            mv("C", "power doubles"),
            mv("D", "burns"),
        ];
        let first: Buckets<MoveRecord> = moves.clone().into_iter().collect();
        let second: Buckets<MoveRecord> = moves.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.names(), vec!["やけど付与", "HP回復", "威力変化"]);
    }

    #[test]
    fn test_ability_buckets_by_section_then_trigger() {
        let abilities = vec![
            ability("Intimidate", "場に出たとき", "場に出たとき"),
            ability("Levitate", "常時", DEFAULT_SECTION),
            ability("Klutz", "常時", ""),
            ability("Drought", "場に出たとき", "場に出たとき"),
        ];
        let buckets: Buckets<AbilityRecord> = abilities.into_iter().collect();
        assert_eq!(buckets.names(), vec!["場に出たとき", DEFAULT_SECTION, "常時"]);
        assert_eq!(buckets.get("場に出たとき").unwrap().len(), 2);
        assert_eq!(buckets.get(DEFAULT_SECTION).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_buckets() {
        let buckets: Buckets<MoveRecord> = Vec::<MoveRecord>::new().into_iter().collect();
        assert!(buckets.is_empty());
        assert_eq!(buckets.len(), 0);
        assert_eq!(buckets.record_count(), 0);
    }
}
