use crate::domain::model::{normalize_country_name, Continent};
use std::collections::HashMap;

use Continent::{Africa, America, Asia, Europe, Oceania};

/// 國家對應洲別的靜態表 (名稱已正規化)
pub const CONTINENT_TABLE: &[(&str, Continent)] = &[
    // America
    ("United States", America),
    ("Puerto Rico", America),
    ("Canada", America),
    ("Uruguay", America),
    ("Costa Rica", America),
    ("Chile", America),
    ("Panama", America),
    ("Trinidad And Tobago", America),
    ("Mexico", America),
    ("Argentina", America),
    ("Brazil", America),
    ("Ecuador", America),
    ("Dominican Republic", America),
    ("Colombia", America),
    ("Paraguay", America),
    ("Venezuela", America),
    ("Peru", America),
    // Africa
    ("South Africa", Africa),
    ("Mauritius", Africa),
    ("Libya", Africa),
    ("Tunisia", Africa),
    ("Kenya", Africa),
    ("Algeria", Africa),
    ("Ghana", Africa),
    ("Nigeria", Africa),
    ("Egypt", Africa),
    ("Zimbabwe", Africa),
    ("Morocco", Africa),
    ("Uganda", Africa),
    // Asia
    ("Singapore", Asia),
    ("Hong Kong (China)", Asia),
    ("United Arab Emirates", Asia),
    ("Qatar", Asia),
    ("Israel", Asia),
    ("South Korea", Asia),
    ("Japan", Asia),
    ("Oman", Asia),
    ("Bahrain", Asia),
    ("Saudi Arabia", Asia),
    ("Taiwan", Asia),
    ("China", Asia),
    ("Malaysia", Asia),
    ("Thailand", Asia),
    ("Jordan", Asia),
    ("Kazakhstan", Asia),
    ("Lebanon", Asia),
    ("Armenia", Asia),
    ("Iraq", Asia),
    ("Uzbekistan", Asia),
    ("Vietnam", Asia),
    ("Philippines", Asia),
    ("Kyrgyzstan", Asia),
    ("Bangladesh", Asia),
    ("Iran", Asia),
    ("Nepal", Asia),
    ("Sri Lanka", Asia),
    ("Pakistan", Asia),
    ("Kuwait", Asia),
    ("India", Asia),
    ("Turkey", Asia),
    ("Indonesia", Asia),
    // Europe
    ("Switzerland", Europe),
    ("Luxembourg", Europe),
    ("Iceland", Europe),
    ("Denmark", Europe),
    ("Netherlands", Europe),
    ("Norway", Europe),
    ("United Kingdom", Europe),
    ("Ireland", Europe),
    ("Germany", Europe),
    ("Sweden", Europe),
    ("Finland", Europe),
    ("Belgium", Europe),
    ("Austria", Europe),
    ("France", Europe),
    ("Italy", Europe),
    ("Spain", Europe),
    ("Cyprus", Europe),
    ("Czech Republic", Europe),
    ("Slovenia", Europe),
    ("Estonia", Europe),
    ("Poland", Europe),
    ("Malta", Europe),
    ("Croatia", Europe),
    ("Lithuania", Europe),
    ("Slovakia", Europe),
    ("Latvia", Europe),
    ("Portugal", Europe),
    ("Bulgaria", Europe),
    ("Hungary", Europe),
    ("Romania", Europe),
    ("Greece", Europe),
    ("Montenegro", Europe),
    ("Serbia", Europe),
    ("Bosnia And Herzegovina", Europe),
    ("North Macedonia", Europe),
    ("Albania", Europe),
    ("Moldova", Europe),
    ("Belarus", Europe),
    ("Georgia", Europe),
    ("Ukraine", Europe),
    ("Russia", Europe),
    // Oceania
    ("Australia", Oceania),
    ("New Zealand", Oceania),
];

/// Country name to continent lookup. Unmapped names resolve to `Continent::Unknown`.
#[derive(Debug, Clone)]
pub struct ContinentMap {
    entries: HashMap<String, Continent>,
}

impl ContinentMap {
    pub fn builtin() -> Self {
        let entries = CONTINENT_TABLE
            .iter()
            .map(|(name, continent)| (name.to_string(), *continent))
            .collect();
        Self { entries }
    }

    /// 加入或覆蓋對應 (名稱會先正規化)
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Continent)>,
    {
        for (name, continent) in overrides {
            self.entries.insert(normalize_country_name(name), continent);
        }
        self
    }

    pub fn lookup(&self, country: &str) -> Continent {
        self.entries
            .get(country)
            .copied()
            .unwrap_or(Continent::Unknown)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.entries.contains_key(country)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContinentMap {
    fn default() -> Self {
        Self::builtin()
    }
}
