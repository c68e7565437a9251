use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Crime category columns scored per region.
///
/// Variants are declared in weighting order; every per-category loop walks
/// `Category::ALL` so sums are accumulated in the same order everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Rape")]
    Rape,
    #[serde(rename = "WT")]
    WomenTrafficking,
    #[serde(rename = "K&A")]
    KidnapAssault,
    #[serde(rename = "AoM")]
    AssaultOnModesty,
    #[serde(rename = "AoW")]
    AssaultOnWomen,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Rape,
        Category::WomenTrafficking,
        Category::KidnapAssault,
        Category::AssaultOnModesty,
        Category::AssaultOnWomen,
    ];

    /// Column header used for this category in the input table
    pub fn column(self) -> &'static str {
        match self {
            Category::Rape => "Rape",
            Category::WomenTrafficking => "WT",
            Category::KidnapAssault => "K&A",
            Category::AssaultOnModesty => "AoM",
            Category::AssaultOnWomen => "AoW",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One value per category, addressed by `Category` instead of column name.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryValues<T>([T; 5]);

impl<T> CategoryValues<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self(Category::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryValues<U> {
        CategoryValues::from_fn(|c| f(c, &self[c]))
    }
}

impl<T> Index<Category> for CategoryValues<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.0[category.position()]
    }
}

impl<T> IndexMut<Category> for CategoryValues<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.position()]
    }
}
