//! Runtime course list.
//!
//! Seeded from the configuration at process start and never persisted.
//! Reads take the shared lock; `add` is the single writer and holds the
//! exclusive lock for the whole check-and-append.

use std::sync::RwLock;

#[derive(Debug)]
pub struct CourseCatalog {
    inner: RwLock<Vec<String>>,
}

impl CourseCatalog {
    pub fn new(seed: &[String]) -> Self {
        let mut courses: Vec<String> = Vec::with_capacity(seed.len());
        for c in seed {
            let c = c.trim();
            if !c.is_empty() && !courses.iter().any(|x| x == c) {
                courses.push(c.to_string());
            }
        }
        Self {
            inner: RwLock::new(courses),
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn first(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .first()
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|c| c == name)
    }

    /// Append a course. Blank or already-known names are ignored and
    /// return `None`; otherwise the trimmed name is returned.
    pub fn add(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut courses = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if courses.iter().any(|c| c == name) {
            return None;
        }
        courses.push(name.to_string());
        Some(name.to_string())
    }
}
