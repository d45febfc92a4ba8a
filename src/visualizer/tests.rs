use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_millis(400);

fn seeded() -> Visualizer<StdRng> {
    Visualizer::with_rng(INTERVAL, StdRng::seed_from_u64(7))
}

#[test]
fn heights_stay_within_range() {
    let mut v = seeded();
    let start = Instant::now();
    v.set_playing(true, start);
    for step in 1..50 {
        v.tick(start + INTERVAL * step);
        assert!(v.heights().iter().all(|&h| h <= MAX_HEIGHT));
    }
}

#[test]
fn paused_bars_are_frozen() {
    let mut v = seeded();
    let before = *v.heights();
    let now = Instant::now();
    assert!(!v.tick(now));
    assert!(!v.tick(now + INTERVAL * 10));
    assert_eq!(*v.heights(), before);
}

#[test]
fn playing_bars_change_once_per_interval() {
    let mut v = seeded();
    let start = Instant::now();
    v.set_playing(true, start);
    let first = *v.heights();

    assert!(!v.tick(start + INTERVAL / 2));
    assert_eq!(*v.heights(), first);

    assert!(v.tick(start + INTERVAL));
    assert_ne!(*v.heights(), first);
}

#[test]
fn stopping_freezes_at_current_heights() {
    let mut v = seeded();
    let start = Instant::now();
    v.set_playing(true, start);
    v.tick(start + INTERVAL);
    let at_stop = *v.heights();

    v.set_playing(false, start + INTERVAL);
    assert!(!v.is_playing());
    assert!(!v.tick(start + INTERVAL * 5));
    assert_eq!(*v.heights(), at_stop);
}
