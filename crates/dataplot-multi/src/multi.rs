//! The broadcast proxy and its reducer policies

use std::fmt;
use std::ops::Index;
use tracing::debug;

/// A policy for combining the per-item results of a broadcast call
pub trait Reducer: Clone {
    /// Name shown when the proxy is displayed
    fn name(&self) -> &str;
}

/// Combine per-item results of type `U` into one value
pub trait Reduce<U>: Reducer {
    type Output;

    /// Reduce the ordered results; `reflex` is the caller's reflex key
    fn reduce(&self, results: Vec<U>, reflex: Option<String>) -> Self::Output;
}

/// Default policy: wrap the results in a new proxy
///
/// The new proxy keeps the reflex key but falls back to the default reducer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collect;

impl Reducer for Collect {
    fn name(&self) -> &str {
        "collect"
    }
}

impl<U> Reduce<U> for Collect {
    type Output = Multi<U, Collect>;

    fn reduce(&self, results: Vec<U>, reflex: Option<String>) -> Self::Output {
        Multi {
            items: results,
            reducer: Collect,
            reflex,
        }
    }
}

/// Collapse all-`None` results to `None`
///
/// Otherwise the results are wrapped in a proxy that keeps cleaning. Calls
/// returning `()` reduce to `()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cleaner;

impl Reducer for Cleaner {
    fn name(&self) -> &str {
        "cleaner"
    }
}

impl<U> Reduce<Option<U>> for Cleaner {
    type Output = Option<Multi<Option<U>, Cleaner>>;

    fn reduce(&self, results: Vec<Option<U>>, _reflex: Option<String>) -> Self::Output {
        if results.iter().all(Option::is_none) {
            return None;
        }
        Some(Multi::new(results).with_reducer(Cleaner))
    }
}

impl Reduce<()> for Cleaner {
    type Output = ();

    fn reduce(&self, _results: Vec<()>, _reflex: Option<String>) -> Self::Output {}
}

/// A reducer built from a closure over the result list
#[derive(Clone)]
pub struct FnReducer<F> {
    name: &'static str,
    f: F,
}

impl<F> FnReducer<F> {
    pub fn new(f: F) -> Self {
        Self { name: "custom", f }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<F: Clone> Reducer for FnReducer<F> {
    fn name(&self) -> &str {
        self.name
    }
}

impl<U, V, F> Reduce<U> for FnReducer<F>
where
    F: Fn(Vec<U>) -> V + Clone,
{
    type Output = V;

    fn reduce(&self, results: Vec<U>, _reflex: Option<String>) -> V {
        (self.f)(results)
    }
}

/// Ordered group of items that a single operation fans out over
///
/// The reducer and the reflex key are fixed at construction. With a reflex
/// key set, every item after the first receives the previous item's result.
#[derive(Debug, Clone, PartialEq)]
pub struct Multi<T, R = Collect> {
    items: Vec<T>,
    reducer: R,
    reflex: Option<String>,
}

impl<T> Multi<T, Collect> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            reducer: Collect,
            reflex: None,
        }
    }
}

impl<T, R: Reducer> Multi<T, R> {
    /// Replace the call reducer
    pub fn with_reducer<R2: Reducer>(self, reducer: R2) -> Multi<T, R2> {
        Multi {
            items: self.items,
            reducer,
            reflex: self.reflex,
        }
    }

    /// Name the reflex passed from each item's result to the next item
    pub fn with_reflex(mut self, key: impl Into<String>) -> Self {
        self.reflex = Some(key.into());
        self
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    pub fn reflex(&self) -> Option<&str> {
        self.reflex.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Read a derived value from every item
    ///
    /// The new proxy keeps this proxy's reducer and reflex key.
    pub fn get<U, F>(&self, f: F) -> Multi<U, R>
    where
        F: FnMut(&T) -> U,
    {
        Multi {
            items: self.items.iter().map(f).collect(),
            reducer: self.reducer.clone(),
            reflex: self.reflex.clone(),
        }
    }

    /// Invoke `f` on every item in order and reduce the results
    ///
    /// `f` receives the item index, the item, and the previous item's result
    /// when a reflex key is set.
    pub fn call<U, F>(&self, mut f: F) -> R::Output
    where
        R: Reduce<U>,
        F: FnMut(usize, &T, Option<&U>) -> U,
    {
        debug!(items = self.items.len(), reducer = self.reducer.name(), "broadcasting call");
        let mut results: Vec<U> = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let reflex = if self.reflex.is_some() { results.last() } else { None };
            let result = f(i, item, reflex);
            results.push(result);
        }
        self.reducer.reduce(results, self.reflex.clone())
    }

    /// Like [`Multi::call`], stopping at the first error
    pub fn try_call<U, E, F>(&self, mut f: F) -> Result<R::Output, E>
    where
        R: Reduce<U>,
        F: FnMut(usize, &T, Option<&U>) -> Result<U, E>,
    {
        debug!(items = self.items.len(), reducer = self.reducer.name(), "broadcasting call");
        let mut results: Vec<U> = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let reflex = if self.reflex.is_some() { results.last() } else { None };
            let result = f(i, item, reflex)?;
            results.push(result);
        }
        Ok(self.reducer.reduce(results, self.reflex.clone()))
    }

    /// Like [`Multi::call`] with mutable access to the items
    pub fn call_mut<U, F>(&mut self, mut f: F) -> R::Output
    where
        R: Reduce<U>,
        F: FnMut(usize, &mut T, Option<&U>) -> U,
    {
        let chained = self.reflex.is_some();
        let mut results: Vec<U> = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter_mut().enumerate() {
            let reflex = if chained { results.last() } else { None };
            let result = f(i, item, reflex);
            results.push(result);
        }
        self.reducer.reduce(results, self.reflex.clone())
    }

    /// Like [`Multi::try_call`] with mutable access to the items
    pub fn try_call_mut<U, E, F>(&mut self, mut f: F) -> Result<R::Output, E>
    where
        R: Reduce<U>,
        F: FnMut(usize, &mut T, Option<&U>) -> Result<U, E>,
    {
        let chained = self.reflex.is_some();
        let mut results: Vec<U> = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter_mut().enumerate() {
            let reflex = if chained { results.last() } else { None };
            let result = f(i, item, reflex)?;
            results.push(result);
        }
        Ok(self.reducer.reduce(results, self.reflex.clone()))
    }

    /// The last item
    pub fn single(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn into_single(self) -> Option<T> {
        self.items.into_iter().last()
    }
}

impl<T, R> Index<usize> for Multi<T, R> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T, R> IntoIterator for Multi<T, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, R> IntoIterator for &'a Multi<T, R> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Multi<T, Collect> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Multi::new(iter.into_iter().collect())
    }
}

impl<T: fmt::Display, R: Reducer> fmt::Display for Multi<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Multi(reducer={}, reflex={}) of {}:",
            self.reducer.name(),
            self.reflex.as_deref().unwrap_or("None"),
            self.items.len()
        )?;
        for item in &self.items {
            write!(f, "\n- {}", item.to_string().replace('\n', "\n  "))?;
        }
        Ok(())
    }
}

/// A broadcast argument: the same value for every item, or one value per item
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<T> {
    Same(T),
    Each(Vec<T>),
}

impl<T> Arg<T> {
    /// The argument handed to item `i`
    pub fn at(&self, i: usize) -> Option<&T> {
        match self {
            Arg::Same(value) => Some(value),
            Arg::Each(values) => values.get(i),
        }
    }
}

impl<T, R> From<Multi<T, R>> for Arg<T> {
    fn from(multi: Multi<T, R>) -> Self {
        Arg::Each(multi.items)
    }
}

/// Either a plain value or a proxy of values
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T, R = Collect> {
    One(T),
    Many(Multi<T, R>),
}

/// The last element of a proxy, or the plain value unchanged
pub fn single<T, R: Reducer>(x: OneOrMany<T, R>) -> Option<T> {
    match x {
        OneOrMany::One(value) => Some(value),
        OneOrMany::Many(multi) => multi.into_single(),
    }
}
