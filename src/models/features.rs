use serde::{Deserialize, Serialize};

/// Number of columns the scaler and cluster model were fitted on
pub const FEATURE_COUNT: usize = 11;

/// Column order of [`FeatureVector`]. Fitted artifacts depend on this exact order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "release_date",
    "popularity",
    "duration_ms",
    "explicit",
    "is_rock",
    "is_pop",
    "is_jazz",
    "is_electronic",
    "is_classical",
    "is_blues",
    "is_indie",
];

/// Canonical genres recognised by the tagger, in feature-column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Rock,
    Pop,
    Jazz,
    Electronic,
    Classical,
    Blues,
    Indie,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Rock,
        Genre::Pop,
        Genre::Jazz,
        Genre::Electronic,
        Genre::Classical,
        Genre::Blues,
        Genre::Indie,
    ];

    /// Lowercase keyword searched for inside free-text genre strings
    pub fn keyword(self) -> &'static str {
        match self {
            Genre::Rock => "rock",
            Genre::Pop => "pop",
            Genre::Jazz => "jazz",
            Genre::Electronic => "electronic",
            Genre::Classical => "classical",
            Genre::Blues => "blues",
            Genre::Indie => "indie",
        }
    }
}

/// Binary genre indicators derived from an artist's genre strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFlags {
    pub is_rock: bool,
    pub is_pop: bool,
    pub is_jazz: bool,
    pub is_electronic: bool,
    pub is_classical: bool,
    pub is_blues: bool,
    pub is_indie: bool,
}

impl GenreFlags {
    pub fn set(&mut self, genre: Genre) {
        match genre {
            Genre::Rock => self.is_rock = true,
            Genre::Pop => self.is_pop = true,
            Genre::Jazz => self.is_jazz = true,
            Genre::Electronic => self.is_electronic = true,
            Genre::Classical => self.is_classical = true,
            Genre::Blues => self.is_blues = true,
            Genre::Indie => self.is_indie = true,
        }
    }

    pub fn contains(&self, genre: Genre) -> bool {
        match genre {
            Genre::Rock => self.is_rock,
            Genre::Pop => self.is_pop,
            Genre::Jazz => self.is_jazz,
            Genre::Electronic => self.is_electronic,
            Genre::Classical => self.is_classical,
            Genre::Blues => self.is_blues,
            Genre::Indie => self.is_indie,
        }
    }

    /// Flags in feature-column order
    pub fn values(&self) -> [bool; 7] {
        [
            self.is_rock,
            self.is_pop,
            self.is_jazz,
            self.is_electronic,
            self.is_classical,
            self.is_blues,
            self.is_indie,
        ]
    }
}

/// Raw, unscaled model input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Feature vector after the fitted scaler has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector(Vec<f64>);

impl ScaledVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
