use serde::{Deserialize, Serialize};

/// Personality dimension used for scoring.
///
/// Declaration order is the tie-break priority: when two categories reach
/// the same total, the one listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Talk,
    Depth,
    Spark,
    Focus,
}

impl Category {
    /// Every category, in tie-break priority order.
    pub const ALL: [Category; 4] = [
        Category::Talk,
        Category::Depth,
        Category::Spark,
        Category::Focus,
    ];

    /// Wire name (`talk`, `depth`, `spark`, `focus`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Talk => "talk",
            Category::Depth => "depth",
            Category::Spark => "spark",
            Category::Focus => "focus",
        }
    }

    /// Position in [`Category::ALL`]. Used as the numeric payload of stage events.
    pub fn index(self) -> usize {
        match self {
            Category::Talk => 0,
            Category::Depth => 1,
            Category::Spark => 2,
            Category::Focus => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One non-negative weight per category.
///
/// Serves both as the weight vector carried by a choice and as the running
/// totals of a session. Fields missing from JSON input count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub talk: u32,
    pub depth: u32,
    pub spark: u32,
    pub focus: u32,
}

impl Weights {
    pub const ZERO: Weights = Weights::new(0, 0, 0, 0);

    pub const fn new(talk: u32, depth: u32, spark: u32, focus: u32) -> Self {
        Self { talk, depth, spark, focus }
    }

    /// A vector with `value` on a single category and zero elsewhere.
    pub fn only(category: Category, value: u32) -> Self {
        let mut w = Self::ZERO;
        *w.get_mut(category) = value;
        w
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Talk => self.talk,
            Category::Depth => self.depth,
            Category::Spark => self.spark,
            Category::Focus => self.focus,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut u32 {
        match category {
            Category::Talk => &mut self.talk,
            Category::Depth => &mut self.depth,
            Category::Spark => &mut self.spark,
            Category::Focus => &mut self.focus,
        }
    }

    /// Component-wise sum. Saturates instead of wrapping.
    pub fn add(&mut self, other: &Weights) {
        for category in Category::ALL {
            let slot = self.get_mut(category);
            *slot = slot.saturating_add(other.get(category));
        }
    }
}
