//! # Ranking and Selection
//!
//! Orders evaluated entities by composite score and derives secondary
//! selections without disturbing the primary order:
//!
//! - [`rank_by_score`] sorts descending with a stable sort, so entities
//!   with equal scores keep their original input order and ranks are
//!   1-based.
//! - [`best_by`] / [`worst_by`] scan the original slice in a fresh pass
//!   per criterion. Selections never re-sort or mutate a ranked list;
//!   the primary ranking stays intact no matter how many selections are
//!   taken from the same entities.
//! - [`top_metrics`] / [`bottom_metrics`] extract strengths and
//!   weaknesses from a sub-score map (ties resolve in sorted-id order).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricValues;

/// One entity with its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    /// 1-based rank; rank 1 holds the maximum score
    pub rank: u32,
    pub item: T,
}

/// Sort descending by `score`, assigning 1-based ranks.
///
/// The sort is stable: entities with equal scores keep their input
/// order. Non-finite scores compare as equal and likewise keep input
/// order.
pub fn rank_by_score<T, F>(items: Vec<T>, score: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> f64,
{
    let mut items = items;
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Ranked {
            rank: (index + 1) as u32,
            item,
        })
        .collect()
}

/// The item with the maximum key; first wins on ties.
pub fn best_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// The item with the minimum key; first wins on ties.
pub fn worst_by<T, F>(items: &[T], key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    best_by(items, |item| -key(item))
}

/// Top `count` metric ids by sub-score, descending.
pub fn top_metrics(sub_scores: &MetricValues, count: usize) -> Vec<String> {
    let mut entries: Vec<(&String, f64)> =
        sub_scores.iter().map(|(id, score)| (id, *score)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries
        .into_iter()
        .take(count)
        .map(|(id, _)| id.clone())
        .collect()
}

/// Bottom `count` metric ids by sub-score, ascending.
pub fn bottom_metrics(sub_scores: &MetricValues, count: usize) -> Vec<String> {
    let mut entries: Vec<(&String, f64)> =
        sub_scores.iter().map(|(id, score)| (id, *score)).collect();
    entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    entries
        .into_iter()
        .take(count)
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Entity {
        name: &'static str,
        score: f64,
        price: f64,
    }

    fn entities() -> Vec<Entity> {
        vec![
            Entity { name: "A", score: 72.0, price: 120_000.0 },
            Entity { name: "B", score: 88.0, price: 150_000.0 },
            Entity { name: "C", score: 72.0, price: 90_000.0 },
        ]
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_by_score(entities(), |e| e.score);
        assert_eq!(ranked[0].item.name, "B");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tied = vec![
            Entity { name: "A", score: 50.0, price: 1.0 },
            Entity { name: "B", score: 50.0, price: 2.0 },
            Entity { name: "C", score: 50.0, price: 3.0 },
        ];
        let ranked = rank_by_score(tied, |e| e.score);
        let names: Vec<&str> = ranked.iter().map(|r| r.item.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_rank_one_holds_maximum() {
        let ranked = rank_by_score(entities(), |e| e.score);
        let max = entities().iter().map(|e| e.score).fold(f64::MIN, f64::max);
        assert_eq!(ranked[0].item.score, max);
    }

    #[test]
    fn test_selections_scan_original_order() {
        let items = entities();
        let best = best_by(&items, |e| e.score).unwrap();
        assert_eq!(best.name, "B");

        let cheapest = worst_by(&items, |e| e.price).unwrap();
        assert_eq!(cheapest.name, "C");

        // Selections leave the source slice untouched.
        assert_eq!(items, entities());
    }

    #[test]
    fn test_best_by_first_wins_ties() {
        let tied = vec![
            Entity { name: "A", score: 10.0, price: 0.0 },
            Entity { name: "B", score: 10.0, price: 0.0 },
        ];
        assert_eq!(best_by(&tied, |e| e.score).unwrap().name, "A");
        assert_eq!(worst_by(&tied, |e| e.score).unwrap().name, "A");
    }

    #[test]
    fn test_empty_selection() {
        let empty: Vec<Entity> = vec![];
        assert!(best_by(&empty, |e| e.score).is_none());
    }

    #[test]
    fn test_top_and_bottom_metrics() {
        let sub: MetricValues = BTreeMap::from([
            ("speed".to_string(), 91.0),
            ("cost".to_string(), 35.0),
            ("quality".to_string(), 78.0),
            ("uptime".to_string(), 60.0),
        ]);
        assert_eq!(top_metrics(&sub, 2), vec!["speed", "quality"]);
        assert_eq!(bottom_metrics(&sub, 2), vec!["cost", "uptime"]);
    }

    #[test]
    fn test_metric_ties_resolve_by_id_order() {
        let sub: MetricValues = BTreeMap::from([
            ("beta".to_string(), 50.0),
            ("alpha".to_string(), 50.0),
        ]);
        assert_eq!(top_metrics(&sub, 1), vec!["alpha"]);
        assert_eq!(bottom_metrics(&sub, 1), vec!["alpha"]);
    }
}
