//! Percentile rank of a player value against a community percentile table.

use std::collections::HashMap;

use crate::models::{MetricPercentile, MetricSample};

/// Percentile of `value` within `community`.
///
/// The nine table points are ordered so the first point is the "best" side
/// for the metric's direction, the bracket containing `value` is located, and
/// the percentile is read off the line through that bracket. Values outside
/// the table extrapolate along the outermost bracket, so results can fall
/// outside `0..=100`.
///
/// A bracket whose two community values are equal has no slope; it resolves
/// to the midpoint of the bracket's percentiles.
pub fn percentile_rank(value: f64, community: &MetricSample, lower_is_better: bool) -> f64 {
    let mut points = community.points();
    if !lower_is_better {
        points.reverse();
    }

    let bracket = points
        .windows(2)
        .find(|pair| {
            let (first, second) = (pair[0].1, pair[1].1);
            if lower_is_better {
                first <= value && value <= second
            } else {
                first >= value && value > second
            }
        })
        .map(|pair| (pair[0], pair[1]))
        .unwrap_or((points[0], points[points.len() - 1]));

    let percentile = interpolate(bracket.0, bracket.1, value);

    if lower_is_better {
        100.0 - percentile
    } else {
        percentile
    }
}

/// Solve the line through two `(percentile, value)` points for the percentile
/// at `value`.
fn interpolate((x1, y1): (f64, f64), (x2, y2): (f64, f64), value: f64) -> f64 {
    let slope = (y2 - y1) / (x2 - x1);
    if slope == 0.0 {
        return (x1 + x2) / 2.0;
    }
    let intercept = y1 - slope * x1;
    (value - intercept) / slope
}

/// Percentile for every metric present in both tables, using the player's
/// average as the value. Sorted by metric name.
pub fn percentile_report(
    player: &HashMap<String, MetricSample>,
    community: &HashMap<String, MetricSample>,
    lower_is_better: &[&str],
) -> Vec<MetricPercentile> {
    let mut report: Vec<MetricPercentile> = player
        .iter()
        .filter_map(|(metric, sample)| {
            let table = community.get(metric)?;
            let lower = lower_is_better.contains(&metric.as_str());
            Some(MetricPercentile {
                metric: metric.clone(),
                value: sample.avg,
                lower_is_better: lower,
                percentile: percentile_rank(sample.avg, table, lower),
            })
        })
        .collect();

    report.sort_by(|a, b| a.metric.cmp(&b.metric));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Table where value == percentile, so expected ranks are easy to read.
    fn linear_table() -> MetricSample {
        MetricSample {
            avg: 50.0,
            std: 10.0,
            percentile1: 1.0,
            percentile5: 5.0,
            percentile10: 10.0,
            percentile25: 25.0,
            percentile50: 50.0,
            percentile75: 75.0,
            percentile90: 90.0,
            percentile95: 95.0,
            percentile99: 99.0,
        }
    }

    fn skewed_table() -> MetricSample {
        MetricSample {
            avg: 6.1,
            std: 3.0,
            percentile1: 0.0,
            percentile5: 1.0,
            percentile10: 2.0,
            percentile25: 3.5,
            percentile50: 5.5,
            percentile75: 8.0,
            percentile90: 11.0,
            percentile95: 13.0,
            percentile99: 18.0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_median_maps_to_fifty() {
        for table in [linear_table(), skewed_table()] {
            let rank = percentile_rank(table.percentile50, &table, false);
            assert!(close(rank, 50.0), "got {}", rank);
        }
    }

    #[test]
    fn test_interpolates_inside_bracket() {
        let table = skewed_table();
        // halfway between p50 (5.5) and p75 (8.0)
        let rank = percentile_rank(6.75, &table, false);
        assert!(close(rank, 62.5), "got {}", rank);
    }

    #[test]
    fn test_lower_is_better_inverts() {
        let table = skewed_table();
        // 2.0 deaths sits at p10 of the community, which is the 90th best
        let rank = percentile_rank(2.0, &table, true);
        assert!(close(rank, 90.0), "got {}", rank);

        let median = percentile_rank(table.percentile50, &table, true);
        assert!(close(median, 50.0), "got {}", median);
    }

    #[test]
    fn test_extrapolates_beyond_table() {
        let table = linear_table();

        let above = percentile_rank(120.0, &table, false);
        assert!(close(above, 120.0), "got {}", above);

        let below = percentile_rank(-10.0, &table, false);
        assert!(close(below, -10.0), "got {}", below);

        let best_lower = percentile_rank(-10.0, &table, true);
        assert!(close(best_lower, 110.0), "got {}", best_lower);
    }

    #[test]
    fn test_extreme_points() {
        let table = skewed_table();
        assert!(close(percentile_rank(18.0, &table, false), 99.0));
        assert!(close(percentile_rank(0.0, &table, false), 1.0));
    }

    #[test]
    fn test_flat_bracket_resolves_to_midpoint() {
        let mut table = linear_table();
        table.percentile5 = 1.0;

        // (1, 1.0)..(5, 1.0) is flat: midpoint percentile 3, inverted
        let rank = percentile_rank(1.0, &table, true);
        assert!(rank.is_finite());
        assert!(close(rank, 97.0), "got {}", rank);
    }

    #[test]
    fn test_constant_table_is_finite() {
        let mut table = linear_table();
        for value in [
            &mut table.percentile1,
            &mut table.percentile5,
            &mut table.percentile10,
            &mut table.percentile25,
            &mut table.percentile50,
            &mut table.percentile75,
            &mut table.percentile90,
            &mut table.percentile95,
            &mut table.percentile99,
        ] {
            *value = 3.0;
        }

        assert!(close(percentile_rank(3.0, &table, false), 50.0));
        assert!(close(percentile_rank(7.0, &table, false), 50.0));
    }

    #[test]
    fn test_percentile_report() {
        let mut player = HashMap::new();
        let mut community = HashMap::new();

        let mut player_kills = linear_table();
        player_kills.avg = 75.0;
        let mut player_deaths = linear_table();
        player_deaths.avg = 25.0;

        player.insert("kills".to_string(), player_kills);
        player.insert("deaths".to_string(), player_deaths);
        player.insert("obscure".to_string(), linear_table());
        community.insert("kills".to_string(), linear_table());
        community.insert("deaths".to_string(), linear_table());

        let report = percentile_report(&player, &community, &["deaths"]);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].metric, "deaths");
        assert!(report[0].lower_is_better);
        assert!(close(report[0].percentile, 75.0));
        assert_eq!(report[1].metric, "kills");
        assert!(close(report[1].percentile, 75.0));
    }
}
