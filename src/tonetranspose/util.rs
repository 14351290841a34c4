use std::cell::RefCell;
use std::fmt;

use itertools::Itertools;

use crate::tonetranspose::tone::NoteNameType;

/// Renders `[a, b, c]`, or `[]` for an empty iterable.
pub fn bracketed<I, D>(iterable: I) -> String
    where
        I: IntoIterator<Item = D>,
        D: fmt::Display,
{
    format!("[{}]", iterable.into_iter().join(", "))
}

/// Holds the last value computed for one `NoteNameType`.
///
/// Asking for the same type again returns the stored value; asking for a
/// different one recomputes and replaces it. The cache belongs to a single
/// owner and is not `Sync`.
#[derive(Debug, Clone, Default)]
pub struct ModeCache<T> {
    entry: RefCell<Option<(NoteNameType, T)>>,
}

impl<T: Clone> ModeCache<T> {
    pub fn new() -> Self {
        ModeCache { entry: RefCell::new(None) }
    }

    pub fn get_or_compute<F>(&self, mode: NoteNameType, compute: F) -> T
        where
            F: FnOnce() -> T,
    {
        let mut entry = self.entry.borrow_mut();
        match entry.as_ref() {
            Some((cached_mode, value)) if *cached_mode == mode => value.clone(),
            _ => {
                let value = compute();
                *entry = Some((mode, value.clone()));
                value
            }
        }
    }

    pub fn cached_mode(&self) -> Option<NoteNameType> {
        self.entry.borrow().as_ref().map(|(mode, _)| *mode)
    }

    pub fn clear(&self) {
        self.entry.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn bracketed_lists() {
        assert_eq!(bracketed(vec![0, 4, 7]), "[0, 4, 7]");
        assert_eq!(bracketed(Vec::<i32>::new()), "[]");
    }

    #[test]
    fn recomputes_only_on_mode_change() {
        let calls = Cell::new(0);
        let cache: ModeCache<String> = ModeCache::new();
        let compute = |label: &str| {
            calls.set(calls.get() + 1);
            label.to_string()
        };

        assert_eq!(cache.get_or_compute(NoteNameType::Flat, || compute("flat")), "flat");
        assert_eq!(cache.get_or_compute(NoteNameType::Flat, || compute("again")), "flat");
        assert_eq!(calls.get(), 1);

        assert_eq!(cache.get_or_compute(NoteNameType::Sharp, || compute("sharp")), "sharp");
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.cached_mode(), Some(NoteNameType::Sharp));

        cache.clear();
        assert_eq!(cache.cached_mode(), None);
    }
}
