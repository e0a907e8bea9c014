//! Text benchmarks: case transforms, inflection, and templates.

use divan::{black_box, Bencher};
use sucre::prelude::*;

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Case
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = ["caps_lock", "moz-border-radius", "TheManWithoutAPast"])]
fn camelize(s: &str) -> String {
    black_box(s).camelize(true)
}

#[divan::bench(args = ["capsLock", "HTMLParser", "a_farewell_to_arms"])]
fn underscore(s: &str) -> String {
    black_box(s).underscore()
}

#[divan::bench(args = ["raiders_of_the_lost_ark", "x-men: the last stand"])]
fn titleize(s: &str) -> String {
    black_box(s).titleize()
}

#[divan::bench]
fn parameterize_accented() -> String {
    black_box("  Ménage à trois, encore une fois!  ").parameterize()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Inflection
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench(args = ["post", "octopus", "person", "sheep", "matrix"])]
fn pluralize(s: &str) -> String {
    black_box(s).pluralize()
}

#[divan::bench(args = ["posts", "octopi", "people", "analyses"])]
fn singularize(s: &str) -> String {
    black_box(s).singularize()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Templates and truncation
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn assign_named_and_positional(bencher: Bencher) {
    let args = [Value::from("Mr."), Value::object([("name", "Franklin"), ("age", "14")])];
    bencher.bench_local(|| black_box("Welcome, {1} {name}. You are {age} today.").assign(&args));
}

#[divan::bench(args = [20, 200, 2000])]
fn truncate_words(bencher: Bencher, length: usize) {
    let text = "just sittin on the dock of the bay ".repeat(100);
    let options = Truncate::default().split(false);
    bencher.bench_local(|| black_box(&text).truncate_text(length, &options));
}
