//! Card categories derived from the rendered type line.

use crate::constants::CARD_TEXT_BREAK;
use crate::locale::Locale;

/// Category a rendered card is filed under by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Spell,
    Trap,
    Pendulum,
    Synchro,
    Xyz,
    Fusion,
    Link,
    Ritual,
    EffectMonster,
    NormalMonster,
}

/// Spell/Trap win over everything else.
const SPELL_TRAP: &[CardCategory] = &[CardCategory::Spell, CardCategory::Trap];

/// Extra deck and ritual types, checked after Pendulum and before Effect.
const SPECIAL_SUMMONS: &[CardCategory] = &[
    CardCategory::Synchro,
    CardCategory::Xyz,
    CardCategory::Fusion,
    CardCategory::Link,
    CardCategory::Ritual,
];

const MONSTER_KEYWORDS: &[&str] = &["怪獸", "Monster"];
const EFFECT_KEYWORDS: &[&str] = &["效果", "Effect"];

impl CardCategory {
    pub fn all() -> &'static [CardCategory] {
        &[
            CardCategory::Spell,
            CardCategory::Trap,
            CardCategory::Pendulum,
            CardCategory::Synchro,
            CardCategory::Xyz,
            CardCategory::Fusion,
            CardCategory::Link,
            CardCategory::Ritual,
            CardCategory::EffectMonster,
            CardCategory::NormalMonster,
        ]
    }

    /// Filter bar label in the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::ZhTw => match self {
                CardCategory::Spell => "魔法",
                CardCategory::Trap => "陷阱",
                CardCategory::Pendulum => "靈擺",
                CardCategory::Synchro => "同步",
                CardCategory::Xyz => "超量",
                CardCategory::Fusion => "融合",
                CardCategory::Link => "連結",
                CardCategory::Ritual => "儀式",
                CardCategory::EffectMonster => "效果",
                CardCategory::NormalMonster => "通常",
            },
            Locale::En => match self {
                CardCategory::Spell => "Spell",
                CardCategory::Trap => "Trap",
                CardCategory::Pendulum => "Pendulum",
                CardCategory::Synchro => "Synchro",
                CardCategory::Xyz => "Xyz",
                CardCategory::Fusion => "Fusion",
                CardCategory::Link => "Link",
                CardCategory::Ritual => "Ritual",
                CardCategory::EffectMonster => "Effect-Monster",
                CardCategory::NormalMonster => "Normal-Monster",
            },
        }
    }

    /// Look up a category by its label in any locale.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().iter().copied().find(|category| {
            Locale::all()
                .iter()
                .any(|locale| category.label(*locale) == label)
        })
    }

    /// Substrings of the type line that mark this category.
    ///
    /// Only meaningful for the categories matched by keyword; the two monster
    /// categories are decided by [`categorize`] itself.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            CardCategory::Spell => &["魔法", "Spell"],
            CardCategory::Trap => &["陷阱", "Trap"],
            CardCategory::Pendulum => &["靈擺", "Pendulum"],
            CardCategory::Synchro => &["同步", "Synchro"],
            CardCategory::Xyz => &["超量", "Xyz"],
            CardCategory::Fusion => &["融合", "Fusion"],
            CardCategory::Link => &["連結", "Link"],
            CardCategory::Ritual => &["儀式", "Ritual"],
            CardCategory::EffectMonster | CardCategory::NormalMonster => &[],
        }
    }

    fn matches(&self, card_type: &str) -> bool {
        self.keywords().iter().any(|kw| card_type.contains(kw))
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Extract the card type from a description, e.g. "Synchro/Effect Monster".
fn type_line(text: &str) -> Option<&str> {
    text.split(CARD_TEXT_BREAK).map(str::trim).find_map(|line| {
        Locale::all()
            .iter()
            .find_map(|locale| line.strip_prefix(locale.type_prefix()))
            .map(str::trim)
    })
}

/// Classify a rendered card description by its "Type:" line.
///
/// The description is split on `<br>`; the first line starting with the
/// type label decides. Without such a line the card counts as a normal monster.
pub fn categorize(text: &str) -> CardCategory {
    let Some(card_type) = type_line(text) else {
        return CardCategory::NormalMonster;
    };

    if let Some(category) = SPELL_TRAP.iter().find(|c| c.matches(card_type)) {
        return *category;
    }

    if CardCategory::Pendulum.matches(card_type) {
        return CardCategory::Pendulum;
    }

    if let Some(category) = SPECIAL_SUMMONS.iter().find(|c| c.matches(card_type)) {
        return *category;
    }

    if contains_any(card_type, MONSTER_KEYWORDS) && contains_any(card_type, EFFECT_KEYWORDS) {
        return CardCategory::EffectMonster;
    }

    CardCategory::NormalMonster
}

/// Selection of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Show every card and the summary
    All,
    /// Show only cards of one category
    Only(CardCategory),
    /// Label that names no category; nothing matches
    Unknown,
}

impl CategoryFilter {
    /// Parse a filter button label in any supported locale.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if Locale::all().iter().any(|l| l.all_label() == trimmed) {
            return CategoryFilter::All;
        }
        match CardCategory::from_label(trimmed) {
            Some(category) => CategoryFilter::Only(category),
            None => {
                log::warn!("⚠️ Unknown filter label: {:?}", label);
                CategoryFilter::Unknown
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Whether a card of `category` stays visible under this filter.
    pub fn admits(&self, category: CardCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
            CategoryFilter::Unknown => false,
        }
    }
}
