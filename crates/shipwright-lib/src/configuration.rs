//! Root configuration state and its installed entries.

use serde::{Deserialize, Serialize};

use crate::library::Library;
use crate::modifiers::Modifiers;

/// Name given to configurations that were never named.
pub const DEFAULT_SHIP_NAME: &str = "Untitled Ship";

/// One part attached to the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledEntry {
    /// Immutable once assigned; removal is always by this id.
    pub instance_id: String,
    pub def_id: String,
    pub location: String,
    /// 0, 1 or 2; anything higher is treated as 0.
    pub miniaturization: u8,
    /// Chassis default part: free of monetary cost but still draws capacity.
    pub is_stock: bool,
    /// Doubles capacity draw and multiplies monetary cost by five.
    pub is_non_standard: bool,
    pub modifiers: Modifiers,
}

/// Crew training tier. Serialized by label; unknown labels read as `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CrewQuality {
    Untrained,
    #[default]
    Normal,
    Skilled,
    Expert,
    Ace,
}

/// Skill, attack and challenge-level modifiers granted by a crew tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrewStats {
    pub skill: i32,
    pub attack: i32,
    pub challenge_level: i32,
}

impl CrewQuality {
    pub const ALL: [CrewQuality; 5] = [
        CrewQuality::Untrained,
        CrewQuality::Normal,
        CrewQuality::Skilled,
        CrewQuality::Expert,
        CrewQuality::Ace,
    ];

    pub fn stats(self) -> CrewStats {
        let (skill, attack, challenge_level) = match self {
            CrewQuality::Untrained => (0, -5, -1),
            CrewQuality::Normal => (5, 0, 0),
            CrewQuality::Skilled => (6, 2, 1),
            CrewQuality::Expert => (8, 5, 2),
            CrewQuality::Ace => (12, 10, 4),
        };
        CrewStats {
            skill,
            attack,
            challenge_level,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CrewQuality::Untrained => "Untrained",
            CrewQuality::Normal => "Normal",
            CrewQuality::Skilled => "Skilled",
            CrewQuality::Expert => "Expert",
            CrewQuality::Ace => "Ace",
        }
    }

    /// Parse a tier label; unknown labels fall back to `Normal`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl From<String> for CrewQuality {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<CrewQuality> for String {
    fn from(quality: CrewQuality) -> Self {
        quality.label().to_string()
    }
}

/// Everything the user has chosen for one ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub name: String,
    pub chassis_id: String,
    pub template_id: Option<String>,
    /// Installation order matters for "last one wins" statistics.
    pub entries: Vec<InstalledEntry>,
    /// Whether the designer holds the starship-designer feat.
    pub engineering: bool,
    /// Cargo tonnage converted into capacity budget.
    pub cargo_to_ep_amount: f64,
    /// Percentage of escape capacity given up for budget (0-100).
    pub escape_pods_to_ep_pct: u32,
    pub crew_quality: CrewQuality,
    pub libraries: Vec<Library>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: DEFAULT_SHIP_NAME.to_string(),
            chassis_id: String::new(),
            template_id: None,
            entries: Vec::new(),
            engineering: false,
            cargo_to_ep_amount: 0.0,
            escape_pods_to_ep_pct: 0,
            crew_quality: CrewQuality::Normal,
            libraries: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn new(chassis_id: impl Into<String>) -> Self {
        Self {
            chassis_id: chassis_id.into(),
            ..Self::default()
        }
    }

    pub fn entry(&self, instance_id: &str) -> Option<&InstalledEntry> {
        self.entries.iter().find(|e| e.instance_id == instance_id)
    }

    pub fn entry_mut(&mut self, instance_id: &str) -> Option<&mut InstalledEntry> {
        self.entries.iter_mut().find(|e| e.instance_id == instance_id)
    }

    pub fn library(&self, id: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.id == id)
    }

    pub fn library_mut(&mut self, id: &str) -> Option<&mut Library> {
        self.libraries.iter_mut().find(|l| l.id == id)
    }

    /// Clear per-ship choices, keeping libraries and crew quality.
    pub fn reset(&mut self) {
        self.template_id = None;
        self.entries.clear();
        self.engineering = false;
        self.name.clear();
        self.cargo_to_ep_amount = 0.0;
        self.escape_pods_to_ep_pct = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_crew_quality_falls_back_to_normal() {
        let parsed: CrewQuality = serde_json::from_str("\"Legendary\"").expect("falls back");
        assert_eq!(parsed, CrewQuality::Normal);
        assert_eq!(CrewQuality::from_label("ace"), CrewQuality::Ace);
        assert_eq!(CrewQuality::from_label("??"), CrewQuality::Normal);
        assert_eq!(CrewQuality::Ace.stats().attack, 10);
    }
}
