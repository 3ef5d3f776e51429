pub mod loader;
pub mod problem;
pub mod record;

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::problem::Problem;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("quiz problem `{id}` is missing its question, choices or correct answer")]
    MalformedQuiz { id: String },
    #[error("problem `{id}` has no recognizable shape (type tag: {tag:?})")]
    UnknownVariant { id: String, tag: Option<String> },
    #[error("problem `{id}` declares category `{declared}` but is stored under `{expected}`")]
    CategoryMismatch {
        id: String,
        declared: String,
        expected: String,
    },
    #[error("failed to read catalog file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Read-only access to practice problems grouped by category.
///
/// Ordering returned by `categories` and `list_by_category` must be stable for
/// the lifetime of the catalog; slide navigation indexes into those lists.
pub trait Catalog {
    fn categories(&self) -> Vec<&str>;

    /// Problems stored under `category`, in catalog order. Unknown keys yield
    /// an empty slice.
    fn list_by_category(&self, category: &str) -> &[Problem];

    fn find_by_id(&self, category: &str, id: &str) -> Option<&Problem> {
        self.list_by_category(category).iter().find(|p| p.id == id)
    }

    fn contains_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    fn position_of(&self, category: &str, id: &str) -> Option<usize> {
        self.list_by_category(category)
            .iter()
            .position(|p| p.id == id)
    }
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn categories(&self) -> Vec<&str> {
        (**self).categories()
    }

    fn list_by_category(&self, category: &str) -> &[Problem] {
        (**self).list_by_category(category)
    }
}

impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    fn categories(&self) -> Vec<&str> {
        (**self).categories()
    }

    fn list_by_category(&self, category: &str) -> &[Problem] {
        (**self).list_by_category(category)
    }
}

impl<T: Catalog + ?Sized> Catalog for Rc<T> {
    fn categories(&self) -> Vec<&str> {
        (**self).categories()
    }

    fn list_by_category(&self, category: &str) -> &[Problem] {
        (**self).list_by_category(category)
    }
}

/// In-memory catalog. Categories keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    categories: Vec<(String, Vec<Problem>)>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(category, problems)` pairs. Each problem's `category` is
    /// overwritten with the key it is stored under.
    pub fn from_lists<I, K>(lists: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<Problem>)>,
        K: Into<String>,
    {
        let mut catalog = Self::new();
        for (key, problems) in lists {
            catalog.insert_category(key.into(), problems);
        }
        catalog
    }

    /// Insert or replace a category. Replacing keeps the original position.
    /// Later duplicates of an id within the list are dropped.
    pub fn insert_category(&mut self, key: String, problems: Vec<Problem>) {
        let mut deduped: Vec<Problem> = Vec::with_capacity(problems.len());
        for mut problem in problems {
            if deduped.iter().any(|p| p.id == problem.id) {
                tracing::warn!(category = %key, id = %problem.id, "duplicate problem id skipped");
                continue;
            }
            problem.category.clone_from(&key);
            deduped.push(problem);
        }

        if let Some(slot) = self.categories.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = deduped;
        } else {
            self.categories.push((key, deduped));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.categories.iter().map(|(_, list)| list.len()).sum()
    }
}

impl Catalog for StaticCatalog {
    fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|(k, _)| k.as_str()).collect()
    }

    fn list_by_category(&self, category: &str) -> &[Problem] {
        self.categories
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }
}
