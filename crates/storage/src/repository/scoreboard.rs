use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::dto::scoreboard::{CategoryScore, ScoreboardEntry};
use crate::error::Result;
use crate::repository::decimal_to_f64;

#[derive(FromRow)]
struct ScoreboardRow {
    id: i32,
    name: String,
    registration_number: Option<String>,
    total_scores: i64,
    average_score: Decimal,
    judges_count: i64,
}

#[derive(FromRow)]
struct CategoryScoreRow {
    participant_id: i32,
    category_id: i32,
    category_name: String,
    points: i32,
    weighted_points: i32,
}

pub struct ScoreboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active participants ranked by mean score. Rank is derived here on
    /// every read from the distinct sorted averages, never stored.
    pub async fn scoreboard(&self) -> Result<Vec<ScoreboardEntry>> {
        let rows = sqlx::query_as::<_, ScoreboardRow>(
            r#"
            SELECT
                p.id,
                p.name,
                p.registration_number,
                COUNT(s.id) AS total_scores,
                ROUND(COALESCE(AVG(s.points), 0), 2) AS average_score,
                COUNT(DISTINCT s.judge_id) AS judges_count
            FROM participants p
            LEFT JOIN scores s ON p.id = s.participant_id
            WHERE p.is_active = TRUE
            GROUP BY p.id, p.name, p.registration_number
            ORDER BY average_score DESC, p.name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let category_rows = sqlx::query_as::<_, CategoryScoreRow>(
            r#"
            SELECT
                s.participant_id,
                s.category_id,
                c.name AS category_name,
                s.points,
                s.points * c.weight AS weighted_points
            FROM scores s
            JOIN categories c ON s.category_id = c.id
            WHERE c.is_active = TRUE
            ORDER BY s.participant_id, s.category_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_participant: HashMap<i32, Vec<CategoryScore>> = HashMap::new();
        for row in category_rows {
            by_participant
                .entry(row.participant_id)
                .or_default()
                .push(CategoryScore {
                    category_id: row.category_id,
                    category_name: row.category_name,
                    points: row.points,
                    weighted_points: row.weighted_points,
                });
        }

        let ranks = dense_ranks(&rows.iter().map(|r| r.average_score).collect::<Vec<_>>());

        let entries = rows
            .into_iter()
            .zip(ranks)
            .map(|(row, rank)| ScoreboardEntry {
                rank,
                id: row.id,
                name: row.name,
                registration: row.registration_number,
                total_scores: row.total_scores,
                average_score: decimal_to_f64(row.average_score),
                judges_count: row.judges_count,
                category_scores: by_participant.remove(&row.id).unwrap_or_default(),
            })
            .collect();

        Ok(entries)
    }
}

/// Dense ranking over averages already sorted descending: equal values
/// share a rank and the next distinct value takes the next integer.
fn dense_ranks(sorted_averages: &[Decimal]) -> Vec<i64> {
    let mut ranks = Vec::with_capacity(sorted_averages.len());
    let mut rank = 0i64;
    let mut previous: Option<Decimal> = None;

    for &average in sorted_averages {
        if previous != Some(average) {
            rank += 1;
            previous = Some(average);
        }
        ranks.push(rank);
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avg(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn ties_share_a_rank() {
        let averages = vec![avg("90.00"), avg("85.00"), avg("85.00"), avg("70.00")];
        assert_eq!(dense_ranks(&averages), vec![1, 2, 2, 3]);
    }

    #[test]
    fn next_distinct_value_is_not_skipped() {
        let averages = vec![avg("85.00"), avg("85.00"), avg("85.00"), avg("84.99")];
        assert_eq!(dense_ranks(&averages), vec![1, 1, 1, 2]);
    }

    #[test]
    fn distinct_values_rank_sequentially() {
        let averages = vec![avg("95.50"), avg("80.00"), avg("62.33")];
        assert_eq!(dense_ranks(&averages), vec![1, 2, 3]);
    }

    #[test]
    fn empty_scoreboard_has_no_ranks() {
        assert!(dense_ranks(&[]).is_empty());
    }
}
