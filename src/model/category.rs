//! Closed vocabulary of particle category tags and set-style queries over it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown particle category: '{0}'")]
pub struct ParseCategoryError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Lepton,
    Antilepton,
    Fermion,
    Boson,
    Baryon,
    Antibaryon,
    Neutrino,
    Antineutrino,
    Matter,
    Antimatter,
    Stable,
    Unstable,
    Charged,
    Uncharged,
    Element,
    Isotope,
    Ion,
    Electron,
    Positron,
    Proton,
    Neutron,
    Nonmetal,
    PostTransitionMetal,
    Metalloid,
    AlkaliMetal,
    AlkalineEarthMetal,
    Halogen,
    TransitionMetal,
    NobleGas,
    Lanthanide,
    Actinide,
}

const ALL: [Category; 31] = [
    Category::Lepton,
    Category::Antilepton,
    Category::Fermion,
    Category::Boson,
    Category::Baryon,
    Category::Antibaryon,
    Category::Neutrino,
    Category::Antineutrino,
    Category::Matter,
    Category::Antimatter,
    Category::Stable,
    Category::Unstable,
    Category::Charged,
    Category::Uncharged,
    Category::Element,
    Category::Isotope,
    Category::Ion,
    Category::Electron,
    Category::Positron,
    Category::Proton,
    Category::Neutron,
    Category::Nonmetal,
    Category::PostTransitionMetal,
    Category::Metalloid,
    Category::AlkaliMetal,
    Category::AlkalineEarthMetal,
    Category::Halogen,
    Category::TransitionMetal,
    Category::NobleGas,
    Category::Lanthanide,
    Category::Actinide,
];

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Lepton => "lepton",
            Category::Antilepton => "antilepton",
            Category::Fermion => "fermion",
            Category::Boson => "boson",
            Category::Baryon => "baryon",
            Category::Antibaryon => "antibaryon",
            Category::Neutrino => "neutrino",
            Category::Antineutrino => "antineutrino",
            Category::Matter => "matter",
            Category::Antimatter => "antimatter",
            Category::Stable => "stable",
            Category::Unstable => "unstable",
            Category::Charged => "charged",
            Category::Uncharged => "uncharged",
            Category::Element => "element",
            Category::Isotope => "isotope",
            Category::Ion => "ion",
            Category::Electron => "electron",
            Category::Positron => "positron",
            Category::Proton => "proton",
            Category::Neutron => "neutron",
            Category::Nonmetal => "nonmetal",
            Category::PostTransitionMetal => "post-transition metal",
            Category::Metalloid => "metalloid",
            Category::AlkaliMetal => "alkali metal",
            Category::AlkalineEarthMetal => "alkaline earth metal",
            Category::Halogen => "halogen",
            Category::TransitionMetal => "transition metal",
            Category::NobleGas => "noble gas",
            Category::Lanthanide => "lanthanide",
            Category::Actinide => "actinide",
        }
    }

    /// Whether this tag names a periodic table series rather than a
    /// particle classification.
    pub fn is_periodic_series(&self) -> bool {
        matches!(
            self,
            Category::Nonmetal
                | Category::PostTransitionMetal
                | Category::Metalloid
                | Category::AlkaliMetal
                | Category::AlkalineEarthMetal
                | Category::Halogen
                | Category::TransitionMetal
                | Category::NobleGas
                | Category::Lanthanide
                | Category::Actinide
        )
    }

    pub fn iter() -> impl Iterator<Item = Category> {
        ALL.iter().copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ParseCategoryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub type CategorySet = BTreeSet<Category>;

/// A membership query: every `require` tag must be present, at least one
/// `any_of` tag (when given) must be present, and no `exclude` tag may be.
///
/// Tags are kept as raw strings and checked against the vocabulary only when
/// the query is evaluated, so that a misspelled tag surfaces as an error at
/// the point of use.
///
/// ```
/// use particle_forge::CategoryQuery;
///
/// let query = CategoryQuery::new()
///     .require(&["matter"])
///     .exclude(&["antimatter"]);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    require: Vec<String>,
    any_of: Vec<String>,
    exclude: Vec<String>,
}

/// A [`CategoryQuery`] whose tags have all been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub require: CategorySet,
    pub any_of: CategorySet,
    pub exclude: CategorySet,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    UnknownCategory(#[from] ParseCategoryError),

    #[error("category '{0}' is both required and excluded")]
    Contradictory(Category),

    #[error("a category query needs at least one tag")]
    Empty,
}

impl CategoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, tags: &[&str]) -> Self {
        self.require.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn any_of(mut self, tags: &[&str]) -> Self {
        self.any_of.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn exclude(mut self, tags: &[&str]) -> Self {
        self.exclude.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn validate(&self) -> Result<ValidatedQuery, QueryError> {
        let require = parse_tags(&self.require)?;
        let any_of = parse_tags(&self.any_of)?;
        let exclude = parse_tags(&self.exclude)?;

        if require.is_empty() && any_of.is_empty() && exclude.is_empty() {
            return Err(QueryError::Empty);
        }

        if let Some(tag) = exclude
            .iter()
            .find(|t| require.contains(t) || any_of.contains(t))
        {
            return Err(QueryError::Contradictory(*tag));
        }

        Ok(ValidatedQuery {
            require,
            any_of,
            exclude,
        })
    }
}

impl ValidatedQuery {
    pub fn matches(&self, categories: &CategorySet) -> bool {
        self.require.is_subset(categories)
            && (self.any_of.is_empty() || !self.any_of.is_disjoint(categories))
            && self.exclude.is_disjoint(categories)
    }
}

fn parse_tags(tags: &[String]) -> Result<CategorySet, ParseCategoryError> {
    tags.iter().map(|t| t.parse()).collect()
}
