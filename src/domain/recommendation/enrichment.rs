//! Presentation fields attached to each recommended category.
//!
//! Nothing here affects ranking. The default enricher works from a table of
//! category descriptions plus fixed keyword tables.

use serde::Serialize;

use crate::domain::foundation::IntegrityWarning;
use crate::domain::interest::RiasecScores;

const FALLBACK_DESCRIPTION: &str = "This career cluster aligns with your personality and interests.";
const DEFAULT_ICON: &str = "🎯";
const SHORT_DESCRIPTION_LIMIT: usize = 300;

/// First matching keyword wins, so order matters.
const ICONS: &[(&str, &str)] = &[
    ("education", "👩‍🏫"),
    ("training", "🎓"),
    ("hospitality", "🏨"),
    ("tourism", "🧳"),
    ("health", "🩺"),
    ("science", "⚕️"),
    ("stem", "🔬"),
    ("technology", "💻"),
    ("engineering", "⚙️"),
    ("mathematics", "📊"),
    ("art", "🎨"),
    ("arts", "🎭"),
    ("av", "🎬"),
    ("business", "💼"),
    ("finance", "💰"),
    ("marketing", "📈"),
    ("agriculture", "🌾"),
    ("food", "🍽️"),
    ("natural", "🌿"),
    ("resources", "🌍"),
    ("government", "🏛️"),
    ("public", "📋"),
    ("human", "👥"),
    ("services", "🤝"),
    ("law", "⚖️"),
    ("public safety", "🚨"),
    ("corrections", "🔒"),
    ("security", "🛡️"),
    ("manufacturing", "🏭"),
    ("construction", "🏗️"),
    ("transportation", "🚛"),
    ("distribution", "📦"),
    ("logistics", "🚚"),
];

/// Presentation fields for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterDetails {
    pub icon: String,
    pub description: String,
    pub short_description: String,
    pub why_it_fits: String,
    pub natural_skills: Vec<String>,
    pub growth_skills: Vec<String>,
    pub spark_interest: String,
}

/// Pluggable enrichment step.
pub trait ClusterEnricher: Send + Sync {
    /// `blended` is the fused six-dimension profile the ranking used.
    fn enrich(&self, category: &str, label: &str, blended: &RiasecScores) -> ClusterDetails;
}

/// Category descriptions with forgiving name lookup.
#[derive(Debug, Clone, Default)]
pub struct CategoryDescriptions {
    entries: Vec<(String, String)>,
}

impl CategoryDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a description. Blank values are ignored and the first
    /// description for a name (compared case-insensitively) wins.
    pub fn insert(&mut self, category: &str, description: &str) -> bool {
        let category = category.trim();
        let description = description.trim();
        if category.is_empty() || description.is_empty() {
            return false;
        }
        let key = category.to_uppercase();
        if self.entries.iter().any(|(name, _)| name.to_uppercase() == key) {
            return false;
        }
        self.entries.push((category.to_string(), description.to_string()));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact name, then case-insensitive, then punctuation-insensitive, then
    /// substring containment for names longer than five characters.
    pub fn lookup(&self, category: &str) -> Option<&str> {
        let category = category.trim();
        if category.is_empty() {
            return None;
        }
        let upper = category.to_uppercase();
        let loose = loose_key(category);

        let found = self
            .entries
            .iter()
            .find(|(name, _)| name == category)
            .or_else(|| self.entries.iter().find(|(name, _)| name.to_uppercase() == upper))
            .or_else(|| self.entries.iter().find(|(name, _)| loose_key(name) == loose))
            .or_else(|| {
                self.entries.iter().find(|(name, _)| {
                    let key = name.to_uppercase();
                    key.chars().count() > 5
                        && upper.chars().count() > 5
                        && (key.contains(&upper) || upper.contains(&key))
                })
            });
        found.map(|(_, description)| description.as_str())
    }
}

/// Upper-cased, keeping only alphanumerics and single spaces.
fn loose_key(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Default enricher backed by [`CategoryDescriptions`] and keyword tables.
#[derive(Debug, Clone, Default)]
pub struct StaticClusterEnricher {
    descriptions: CategoryDescriptions,
}

impl StaticClusterEnricher {
    pub fn new(descriptions: CategoryDescriptions) -> Self {
        Self { descriptions }
    }

    pub fn descriptions(&self) -> &CategoryDescriptions {
        &self.descriptions
    }

    /// Warning for a category without a description. Nothing is reported
    /// when no descriptions were loaded at all; the catalog loader already
    /// covers that case at startup.
    pub fn missing_description(&self, category: &str) -> Option<IntegrityWarning> {
        if self.descriptions.is_empty() || self.descriptions.lookup(category).is_some() {
            None
        } else {
            Some(IntegrityWarning::missing_description(category))
        }
    }
}

impl ClusterEnricher for StaticClusterEnricher {
    fn enrich(&self, category: &str, label: &str, blended: &RiasecScores) -> ClusterDetails {
        let description = match self.descriptions.lookup(category) {
            Some(text) => text.to_string(),
            None => {
                if let Some(warning) = self.missing_description(category) {
                    warning.log();
                }
                FALLBACK_DESCRIPTION.to_string()
            }
        };
        ClusterDetails {
            icon: icon_for(category).to_string(),
            short_description: short_description(&description, category),
            why_it_fits: why_it_fits(label, blended),
            natural_skills: natural_skills(category, label),
            growth_skills: growth_skills(category),
            spark_interest: spark_interest(category),
            description,
        }
    }
}

pub fn icon_for(category: &str) -> &'static str {
    let lower = category.to_lowercase();
    ICONS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// First two sentences of `description`, capped at 300 characters.
pub fn short_description(description: &str, category: &str) -> String {
    if description.is_empty() {
        return format!(
            "{} offers diverse career opportunities that align with your interests and personality.",
            category
        );
    }
    let mut pieces: Vec<&str> = description.split(". ").collect();
    if pieces.len() <= 1 {
        pieces = description.split('\n').collect();
    }
    let short = match pieces.len() {
        n if n >= 3 => format!("{}.", pieces[..2].join(". ")),
        2 => pieces.join(". "),
        _ => pieces[0].to_string(),
    };
    if short.chars().count() > SHORT_DESCRIPTION_LIMIT {
        let head: String = short.chars().take(SHORT_DESCRIPTION_LIMIT - 3).collect();
        format!("{}...", head)
    } else {
        short
    }
}

pub fn why_it_fits(label: &str, blended: &RiasecScores) -> String {
    let top: Vec<String> = blended.ranked().iter().take(2).map(|c| c.to_string()).collect();
    format!("Aligned with: {} • High {} interest", label, top.join(" / "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Education,
    Hospitality,
    Health,
    Technical,
    Business,
    Creative,
    General,
}

/// Keyword family of a category. `engineering` only counts towards the
/// technical family for natural skills.
fn family(category: &str, include_engineering: bool) -> Family {
    let lower = category.to_lowercase();
    let has = |k: &str| lower.contains(k);
    if has("education") || has("training") {
        Family::Education
    } else if has("hospitality") || has("tourism") {
        Family::Hospitality
    } else if has("health") || has("science") {
        Family::Health
    } else if has("stem") || has("technology") || (include_engineering && has("engineering")) {
        Family::Technical
    } else if has("business") || has("finance") {
        Family::Business
    } else if has("art") || has("creative") {
        Family::Creative
    } else {
        Family::General
    }
}

fn strings(items: [&str; 4]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Four natural skills for `category`.
///
/// Label-driven additions ("Understanding others' needs" for F, "Logical
/// analysis" for T) replace base skills from the end, so they survive the
/// cap of four instead of being appended past it.
pub fn natural_skills(category: &str, label: &str) -> Vec<String> {
    let base = match family(category, true) {
        Family::Education => strings([
            "Clear communication",
            "Patience with learners",
            "Listening and empathy",
            "Organizing information",
        ]),
        Family::Hospitality => strings([
            "Friendliness and warmth",
            "Teamwork and cooperation",
            "Handling new situations",
            "Paying attention to guests' needs",
        ]),
        Family::Health => strings([
            "Caring for others",
            "Following rules and procedures",
            "Noticing details",
            "Staying calm in serious situations",
        ]),
        Family::Technical => strings([
            "Problem-solving",
            "Analytical thinking",
            "Attention to detail",
            "Logical reasoning",
        ]),
        Family::Business => strings([
            "Organization",
            "Data analysis",
            "Strategic thinking",
            "Communication",
        ]),
        Family::Creative => strings([
            "Creative expression",
            "Visual thinking",
            "Innovation",
            "Imagination",
        ]),
        Family::General => strings(["Problem-solving", "Communication", "Adaptability", "Teamwork"]),
    };

    let mentions = |needle: &str| base.iter().any(|s| s.to_lowercase().contains(needle));
    let mut additions = Vec::new();
    if label.contains('F') && !mentions("empathy") {
        additions.push("Understanding others' needs".to_string());
    }
    if label.contains('T') && !mentions("analytical") {
        additions.push("Logical analysis".to_string());
    }

    let keep = base.len() - additions.len();
    base.into_iter().take(keep).chain(additions).collect()
}

pub fn growth_skills(category: &str) -> Vec<String> {
    match family(category, false) {
        Family::Education => strings([
            "Classroom or group management",
            "Creative lesson design",
            "Using digital tools for teaching",
            "Giving constructive feedback",
        ]),
        Family::Hospitality => strings([
            "Time and stress management",
            "Planning and coordination",
            "Intercultural understanding",
            "Customer service strategies",
        ]),
        Family::Health => strings([
            "Scientific thinking",
            "Decision-making under pressure",
            "Health communication",
            "Using medical or lab technology",
        ]),
        Family::Technical => strings([
            "Advanced technical skills",
            "Research methodology",
            "Collaborative problem-solving",
            "Staying updated with technology",
        ]),
        Family::Business => strings([
            "Leadership",
            "Financial analysis",
            "Strategic planning",
            "Market understanding",
        ]),
        Family::Creative => strings([
            "Advanced techniques",
            "Professional presentation",
            "Industry networking",
            "Business skills for artists",
        ]),
        Family::General => strings([
            "Industry-specific knowledge",
            "Advanced problem-solving",
            "Leadership",
            "Professional networking",
        ]),
    }
}

pub fn spark_interest(category: &str) -> String {
    match family(category, false) {
        Family::Education => "If you enjoy helping friends understand topics or guiding others, this cluster can turn that strength into a meaningful career path.".to_string(),
        Family::Hospitality => "If you like the idea of working with people, events, and travel, this cluster lets you turn those interests into exciting real-world experiences.".to_string(),
        Family::Health => "If you're curious about how the body works or like supporting others when they're unwell, Health Science offers many meaningful paths to explore.".to_string(),
        Family::Technical => "If you're fascinated by how things work and enjoy solving complex problems, this cluster offers endless opportunities to innovate and create.".to_string(),
        Family::Business => "If you're drawn to strategy, organization, and making things happen, this cluster lets you turn those interests into impactful career paths.".to_string(),
        Family::Creative => "If you're drawn to creative expression and visual storytelling, this cluster lets you turn your artistic interests into professional opportunities.".to_string(),
        Family::General => format!(
            "If you're interested in {}, this cluster offers diverse paths that align with your personality and interests.",
            category
        ),
    }
}
