mod helpers;

use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

use helpers::{never_used, test_now, used_days_ago};
use stride::rotation::stats::summarize;
use stride::rotation::store::{select_and_consume, ContentStore, InMemoryPool};
use stride::rotation::{
    priority, rank, select, select_with_rng, ContentItem, RotationError, SelectOptions,
    NEVER_USED_PRIORITY,
};

#[test]
fn never_used_is_picked_more_often_than_used_yesterday() {
    let pool = vec![never_used("fresh"), used_days_ago("stale", 1)];
    let mut rng = StdRng::seed_from_u64(42);
    let options = SelectOptions::unfiltered();

    let draws = 10_000;
    let mut fresh = 0;
    for _ in 0..draws {
        if select_with_rng(&pool, test_now(), &options, &mut rng).unwrap().id == "fresh" {
            fresh += 1;
        }
    }

    assert!(fresh > draws - fresh, "fresh picked {fresh} of {draws}");
    // Rank weights 100 and 50 put the expected share near two thirds.
    let share = fresh as f64 / draws as f64;
    assert!((0.62..0.72).contains(&share), "share was {share}");
}

#[test]
fn priority_is_monotone_and_below_never_used() {
    let mut previous = 0;
    for days in 0..=1000 {
        let p = priority(&used_days_ago("x", days), test_now());
        assert!(p >= previous, "priority dropped at day {days}: {previous} -> {p}");
        assert!(p < NEVER_USED_PRIORITY, "day {days} reached {p}");
        previous = p;
    }
    assert_eq!(priority(&never_used("x"), test_now()), NEVER_USED_PRIORITY);
}

#[test]
fn band_edges_use_whole_elapsed_days() {
    let just_under_a_week = ContentItem::new(
        "a",
        Some(test_now() - Duration::days(6) - Duration::hours(12)),
    );
    assert_eq!(priority(&just_under_a_week, test_now()), 1);
    assert_eq!(priority(&used_days_ago("b", 7), test_now()), 14);
}

#[test]
fn very_old_items_rank_by_age() {
    let pool = vec![used_days_ago("150d", 150), used_days_ago("400d", 400)];
    let ids: Vec<String> = rank(&pool, test_now()).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["400d", "150d"]);
}

#[test]
fn empty_pool_is_an_error() {
    assert_eq!(select(&[], test_now()), Err(RotationError::EmptyPool));
}

#[test]
fn singleton_pool_always_returns_its_item() {
    let pool = vec![used_days_ago("only", 0)];
    for _ in 0..100 {
        assert_eq!(select(&pool, test_now()).unwrap(), "only");
    }
}

#[test]
fn ranking_orders_by_staleness() {
    let pool = vec![
        used_days_ago("recent", 1),
        used_days_ago("ancient", 200),
        used_days_ago("medium", 20),
        never_used("fresh"),
    ];
    let ids: Vec<String> = rank(&pool, test_now()).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["fresh", "ancient", "medium", "recent"]);
}

#[test]
fn excluded_ids_are_never_returned() {
    let pool = vec![never_used("a"), never_used("b"), used_days_ago("c", 3)];
    let options = SelectOptions {
        exclude: HashSet::from(["a".to_string()]),
        limit: None,
    };
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let picked = select_with_rng(&pool, test_now(), &options, &mut rng).unwrap();
        assert_ne!(picked.id, "a");
    }
}

#[test]
fn weekly_rotation_reaches_every_item() {
    let pool = InMemoryPool::new((0..10).map(|i| never_used(&format!("quote-{i}"))).collect());
    let options = SelectOptions::default();
    let mut rng = StdRng::seed_from_u64(7);

    let mut clock = test_now();
    let mut picks: HashMap<String, usize> = HashMap::new();
    for _ in 0..1000 {
        let stamp = pool.select_and_mark(clock, &options, &mut rng).unwrap();
        assert_eq!(stamp.last_used_at, clock);
        *picks.entry(stamp.id).or_default() += 1;
        clock += Duration::days(7);
    }

    assert_eq!(picks.len(), 10);
    let items = pool.into_items();
    let summary = summarize(&items, clock);
    assert_eq!(summary.total, 10);
    assert_eq!(summary.never_used, 0);
}

#[test]
fn consume_through_the_store_trait() {
    let store: Box<dyn ContentStore> = Box::new(InMemoryPool::new(vec![
        never_used("fresh"),
        used_days_ago("old", 40),
    ]));
    let options = SelectOptions {
        exclude: HashSet::new(),
        limit: Some(1),
    };
    let mut rng = StdRng::seed_from_u64(11);

    let first = select_and_consume(store.as_ref(), test_now(), &options, &mut rng).unwrap();
    assert_eq!(first.id, "fresh");
    // "fresh" is now priority 1, so the 40-day-old item leads.
    let second = select_and_consume(store.as_ref(), test_now(), &options, &mut rng).unwrap();
    assert_eq!(second.id, "old");

    let snapshot = store.snapshot().unwrap();
    assert!(snapshot.iter().all(|item| item.last_used_at == Some(test_now())));
}
