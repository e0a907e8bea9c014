//! `SliceExt` / `VecExt`: Collection queries
//!
//! Every matcher-driven operation funnels through [`Matcher::matches`], and
//! every aggregate through [`Projector::project`]. Nothing here inspects the
//! shape of a matcher or projector itself.
//!
//! Mutating operations live on [`VecExt`]; each has a copying counterpart on
//! [`SliceExt`] and both go through the same edit routine.

use crate::collate::compare_values;
use crate::index;
use crate::{Matchable, Matcher, Projector, Value};
use rand::Rng;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

// ═══════════════════════════════════════════════════════════════════════════════
// SliceExt
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only queries and copying edits over slices.
///
/// ```
/// use sucre::{Matcher, Projector, SliceExt};
///
/// let words = ["fee", "fo", "fum"];
/// assert_eq!(words.sorted_by(&Projector::from("length"), false), ["fo", "fee", "fum"]);
///
/// let nums = [1, 2, 3, 4];
/// assert_eq!(nums.find_index(&Matcher::predicate(|n: &i32| n % 2 == 0)), Some(1));
/// assert_eq!([1, 3, 5].intersect(&[5, 7, 9]), [5]);
/// ```
pub trait SliceExt<T> {
    // ── Indexing ────────────────────────────────────────────────────────────

    /// Element at `index`; negative counts from the end, `wrap` takes it modulo the length.
    fn at(&self, index: isize, wrap: bool) -> Option<&T>;
    /// [`at`](Self::at) for each index, resolved independently.
    fn at_each(&self, indexes: &[isize], wrap: bool) -> Vec<Option<&T>>;
    /// Everything from `index` on.
    fn slice_from(&self, index: isize) -> &[T];
    /// Everything before `index`.
    fn slice_to(&self, index: isize) -> &[T];
    /// The first `n` elements, clamped.
    fn first_n(&self, n: usize) -> &[T];
    /// The last `n` elements, clamped.
    fn last_n(&self, n: usize) -> &[T];

    // ── Matching ────────────────────────────────────────────────────────────

    /// First matching element.
    fn find(&self, matcher: &Matcher<T>) -> Option<&T>
    where
        T: Matchable;
    /// First match at or after `start`; with `wrap`, the search continues from the front.
    fn find_from(&self, matcher: &Matcher<T>, start: isize, wrap: bool) -> Option<&T>
    where
        T: Matchable;
    /// Index of the first match.
    fn find_index(&self, matcher: &Matcher<T>) -> Option<usize>
    where
        T: Matchable;
    /// [`find_from`](Self::find_from), returning the index.
    fn find_index_from(&self, matcher: &Matcher<T>, start: isize, wrap: bool) -> Option<usize>
    where
        T: Matchable;
    /// Every matching element, in order.
    fn find_all(&self, matcher: &Matcher<T>) -> Vec<&T>
    where
        T: Matchable;
    /// Copies of the matching elements.
    fn filter_by(&self, matcher: &Matcher<T>) -> Vec<T>
    where
        T: Matchable + Clone;
    /// Number of matches.
    fn count_by(&self, matcher: &Matcher<T>) -> usize
    where
        T: Matchable;
    /// Copies of the elements that do not match.
    fn exclude(&self, matcher: &Matcher<T>) -> Vec<T>
    where
        T: Matchable + Clone;
    /// Every element matches. True when empty.
    fn every(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable;
    /// Some element matches.
    fn some(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable;
    /// No element matches.
    fn none(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable;

    // ── Projection ──────────────────────────────────────────────────────────

    /// Partition by projected value. Missing projections group under `"null"`.
    fn group_by(&self, projector: &Projector<T>) -> BTreeMap<String, Vec<T>>
    where
        T: Matchable + Clone;
    /// Stable sort by projected value, strings collated.
    fn sorted_by(&self, projector: &Projector<T>, descending: bool) -> Vec<T>
    where
        T: Matchable + Clone;
    /// First occurrence of each distinct element.
    fn unique(&self) -> Vec<T>
    where
        T: Matchable + Clone;
    /// First occurrence of each distinct projected value.
    fn unique_by(&self, projector: &Projector<T>) -> Vec<T>
    where
        T: Matchable + Clone;
    /// Elements tied for the smallest projected value.
    fn min_of(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable;
    /// Elements tied for the largest projected value.
    fn max_of(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable;
    /// Elements whose projected value occurs least often.
    fn least(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable;
    /// Elements whose projected value occurs most often.
    fn most(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable;
    /// Sum of the numeric projections.
    fn sum_of(&self, projector: &Projector<T>) -> f64
    where
        T: Matchable;
    /// Mean of the numeric projections, `None` if there are none.
    fn average_of(&self, projector: &Projector<T>) -> Option<f64>
    where
        T: Matchable;

    // ── Sets ────────────────────────────────────────────────────────────────

    /// Distinct elements present in both.
    fn intersect(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone;
    /// Distinct elements present in either.
    fn union(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone;
    /// Elements not present in `other`. Duplicates are kept.
    fn subtract(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone;

    // ── Copying edits ───────────────────────────────────────────────────────

    /// Copy with `items` inserted at `index` (appended when `None`).
    fn include<I>(&self, items: I, index: Option<isize>) -> Vec<T>
    where
        T: Clone,
        I: IntoIterator<Item = T>;

    // ── Randomness ──────────────────────────────────────────────────────────

    /// Shuffled copy.
    fn randomize(&self) -> Vec<T>
    where
        T: Clone;
    /// Shuffled copy using `rng`.
    fn randomize_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T>
    where
        T: Clone;
    /// One element chosen uniformly.
    fn sample(&self) -> Option<&T>;
    /// `n` distinct positions chosen uniformly, clamped to the length.
    fn sample_n(&self, n: usize) -> Vec<&T>;
}

impl<T> SliceExt<T> for [T] {
    fn at(&self, index: isize, wrap: bool) -> Option<&T> {
        index::resolve(self.len(), index, wrap).map(|i| &self[i])
    }

    fn at_each(&self, indexes: &[isize], wrap: bool) -> Vec<Option<&T>> {
        indexes.iter().map(|&i| self.at(i, wrap)).collect()
    }

    fn slice_from(&self, index: isize) -> &[T] {
        &self[index::bound(self.len(), index)..]
    }

    fn slice_to(&self, index: isize) -> &[T] {
        &self[..index::bound(self.len(), index)]
    }

    fn first_n(&self, n: usize) -> &[T] {
        &self[..n.min(self.len())]
    }

    fn last_n(&self, n: usize) -> &[T] {
        &self[self.len().saturating_sub(n)..]
    }

    fn find(&self, matcher: &Matcher<T>) -> Option<&T>
    where
        T: Matchable,
    {
        self.find_index(matcher).map(|i| &self[i])
    }

    fn find_from(&self, matcher: &Matcher<T>, start: isize, wrap: bool) -> Option<&T>
    where
        T: Matchable,
    {
        self.find_index_from(matcher, start, wrap).map(|i| &self[i])
    }

    fn find_index(&self, matcher: &Matcher<T>) -> Option<usize>
    where
        T: Matchable,
    {
        self.iter().position(|e| matcher.matches(e))
    }

    fn find_index_from(&self, matcher: &Matcher<T>, start: isize, wrap: bool) -> Option<usize>
    where
        T: Matchable,
    {
        let len = self.len();
        let begin = if wrap {
            index::resolve(len, start, true)?
        } else {
            index::bound(len, start)
        };
        let tail = (begin..len).find(|&i| matcher.matches(&self[i]));
        if tail.is_some() || !wrap {
            return tail;
        }
        (0..begin).find(|&i| matcher.matches(&self[i]))
    }

    fn find_all(&self, matcher: &Matcher<T>) -> Vec<&T>
    where
        T: Matchable,
    {
        self.iter().filter(|e| matcher.matches(e)).collect()
    }

    fn filter_by(&self, matcher: &Matcher<T>) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        self.iter().filter(|e| matcher.matches(e)).cloned().collect()
    }

    fn count_by(&self, matcher: &Matcher<T>) -> usize
    where
        T: Matchable,
    {
        self.iter().filter(|e| matcher.matches(e)).count()
    }

    fn exclude(&self, matcher: &Matcher<T>) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        edit(Cow::Borrowed(self), |v| retain_unmatched(v, matcher)).into_owned()
    }

    fn every(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable,
    {
        self.iter().all(|e| matcher.matches(e))
    }

    fn some(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable,
    {
        self.iter().any(|e| matcher.matches(e))
    }

    fn none(&self, matcher: &Matcher<T>) -> bool
    where
        T: Matchable,
    {
        !self.some(matcher)
    }

    fn group_by(&self, projector: &Projector<T>) -> BTreeMap<String, Vec<T>>
    where
        T: Matchable + Clone,
    {
        let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
        for element in self {
            let key = projector
                .project(element)
                .unwrap_or_default()
                .to_string();
            groups.entry(key).or_default().push(element.clone());
        }
        groups
    }

    fn sorted_by(&self, projector: &Projector<T>, descending: bool) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        let mut keyed: Vec<(Value, &T)> = self
            .iter()
            .map(|e| (projector.project(e).unwrap_or_default(), e))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ord = compare_values(a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        keyed.into_iter().map(|(_, e)| e.clone()).collect()
    }

    fn unique(&self) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        self.unique_by(&Projector::Identity)
    }

    fn unique_by(&self, projector: &Projector<T>) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|e| seen.insert(projected_key(projector, e)))
            .cloned()
            .collect()
    }

    fn min_of(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable,
    {
        extremes(self, projector, Ordering::Less)
    }

    fn max_of(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable,
    {
        extremes(self, projector, Ordering::Greater)
    }

    fn least(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable,
    {
        by_frequency(self, projector, Ordering::Less)
    }

    fn most(&self, projector: &Projector<T>) -> Vec<&T>
    where
        T: Matchable,
    {
        by_frequency(self, projector, Ordering::Greater)
    }

    fn sum_of(&self, projector: &Projector<T>) -> f64
    where
        T: Matchable,
    {
        numbers(self, projector).sum()
    }

    fn average_of(&self, projector: &Projector<T>) -> Option<f64>
    where
        T: Matchable,
    {
        let (sum, count) = numbers(self, projector).fold((0.0, 0_u32), |(s, c), n| (s + n, c + 1));
        (count > 0).then(|| sum / f64::from(count))
    }

    fn intersect(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        let theirs = key_set(other);
        let mut seen = HashSet::new();
        self.iter()
            .filter(|e| {
                let key = e.to_value().canonical_key();
                theirs.contains(&key) && seen.insert(key)
            })
            .cloned()
            .collect()
    }

    fn union(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        let mut seen = HashSet::new();
        self.iter()
            .chain(other)
            .filter(|e| seen.insert(e.to_value().canonical_key()))
            .cloned()
            .collect()
    }

    fn subtract(&self, other: &[T]) -> Vec<T>
    where
        T: Matchable + Clone,
    {
        let theirs = key_set(other);
        self.iter()
            .filter(|e| !theirs.contains(&e.to_value().canonical_key()))
            .cloned()
            .collect()
    }

    fn include<I>(&self, items: I, index: Option<isize>) -> Vec<T>
    where
        T: Clone,
        I: IntoIterator<Item = T>,
    {
        edit(Cow::Borrowed(self), |v| insert_items(v, items, index)).into_owned()
    }

    fn randomize(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.randomize_with(&mut rand::thread_rng())
    }

    fn randomize_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = self.to_vec();
        shuffle(&mut out, rng);
        out
    }

    fn sample(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self[rand::thread_rng().gen_range(0..self.len())])
    }

    fn sample_n(&self, n: usize) -> Vec<&T> {
        let mut rng = rand::thread_rng();
        let mut positions: Vec<usize> = (0..self.len()).collect();
        let take = n.min(positions.len());
        // Partial Fisher-Yates: only the first `take` slots are settled.
        for i in 0..take {
            let j = rng.gen_range(i..positions.len());
            positions.swap(i, j);
        }
        positions[..take].iter().map(|&i| &self[i]).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VecExt
// ═══════════════════════════════════════════════════════════════════════════════

/// In-place edits. Each returns `&mut Self` for chaining.
///
/// ```
/// use sucre::{Matcher, SliceExt, VecExt};
///
/// let mut v = vec![1, 2, 3, 2];
/// v.remove_where(&Matcher::from(2)).add([9], Some(0));
/// assert_eq!(v, [9, 1, 3]);
///
/// let v = [1, 2, 3, 2];
/// assert_eq!(v.exclude(&Matcher::from(2)), [1, 3]);
/// ```
pub trait VecExt<T> {
    /// Insert `items` at `index` (appended when `None`).
    fn add<I>(&mut self, items: I, index: Option<isize>) -> &mut Self
    where
        T: Clone,
        I: IntoIterator<Item = T>;

    /// Drop every matching element.
    fn remove_where(&mut self, matcher: &Matcher<T>) -> &mut Self
    where
        T: Matchable + Clone;

    /// Drop the elements from `start` through `end` inclusive (just `start`
    /// when `end` is `None`). Out-of-range positions are ignored.
    fn remove_at(&mut self, start: isize, end: Option<isize>) -> &mut Self
    where
        T: Clone;
}

impl<T> VecExt<T> for Vec<T> {
    fn add<I>(&mut self, items: I, index: Option<isize>) -> &mut Self
    where
        T: Clone,
        I: IntoIterator<Item = T>,
    {
        edit_in_place(self, |v| insert_items(v, items, index));
        self
    }

    fn remove_where(&mut self, matcher: &Matcher<T>) -> &mut Self
    where
        T: Matchable + Clone,
    {
        edit_in_place(self, |v| retain_unmatched(v, matcher));
        self
    }

    fn remove_at(&mut self, start: isize, end: Option<isize>) -> &mut Self
    where
        T: Clone,
    {
        edit_in_place(self, |v| remove_range(v, start, end));
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shared routines
// ═══════════════════════════════════════════════════════════════════════════════

/// Apply `op` to a borrowed slice (copying first) or to an owned vector (in place).
fn edit<'a, T: Clone>(mut target: Cow<'a, [T]>, op: impl FnOnce(&mut Vec<T>)) -> Cow<'a, [T]> {
    op(target.to_mut());
    target
}

fn edit_in_place<T: Clone>(v: &mut Vec<T>, op: impl FnOnce(&mut Vec<T>)) {
    let owned: Cow<'_, [T]> = Cow::Owned(std::mem::take(v));
    *v = edit(owned, op).into_owned();
}

fn insert_items<T>(v: &mut Vec<T>, items: impl IntoIterator<Item = T>, index: Option<isize>) {
    let at = index::insertion(v.len(), index);
    v.splice(at..at, items);
}

fn retain_unmatched<T: Matchable>(v: &mut Vec<T>, matcher: &Matcher<T>) {
    v.retain(|e| !matcher.matches(e));
}

fn remove_range<T>(v: &mut Vec<T>, start: isize, end: Option<isize>) {
    let len = v.len();
    let Some(first) = index::resolve(len, start, false) else {
        return;
    };
    let last = end.map_or(first, |e| index::bound(len, e).min(len - 1));
    if first <= last {
        v.drain(first..=last);
    }
}

fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

fn projected_key<T: Matchable>(projector: &Projector<T>, element: &T) -> String {
    projector.project(element).unwrap_or_default().canonical_key()
}

fn key_set<T: Matchable>(items: &[T]) -> HashSet<String> {
    items.iter().map(|e| e.to_value().canonical_key()).collect()
}

/// Elements whose projection is extreme in direction `want`. Elements with no
/// projection are skipped.
fn extremes<'a, T: Matchable>(items: &'a [T], projector: &Projector<T>, want: Ordering) -> Vec<&'a T> {
    let mut best: Option<Value> = None;
    let mut out = Vec::new();
    for element in items {
        let Some(value) = projector.project(element) else {
            continue;
        };
        let ord = best.as_ref().map_or(want, |b| compare_values(&value, b));
        if ord == want {
            best = Some(value);
            out.clear();
            out.push(element);
        } else if ord == Ordering::Equal {
            out.push(element);
        }
    }
    out
}

/// Members of the rarest (`Less`) or commonest (`Greater`) projected value.
/// Ties go to the value seen first.
fn by_frequency<'a, T: Matchable>(items: &'a [T], projector: &Projector<T>, want: Ordering) -> Vec<&'a T> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&'a T>> = HashMap::new();
    for element in items {
        let key = projected_key(projector, element);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(element);
    }
    let mut chosen: Option<&String> = None;
    for key in &order {
        let better = chosen.is_none_or(|c| groups[key].len().cmp(&groups[c].len()) == want);
        if better {
            chosen = Some(key);
        }
    }
    chosen
        .and_then(|key| groups.remove(key))
        .unwrap_or_default()
}

fn numbers<'a, T: Matchable>(items: &'a [T], projector: &'a Projector<T>) -> impl Iterator<Item = f64> + 'a {
    items
        .iter()
        .filter_map(|e| projector.project(e).and_then(|v| if v.is_number() { v.as_f64() } else { None }))
}
