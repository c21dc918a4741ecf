mod builder;
mod config;
pub mod manual;

use log::{debug, info};

pub use crate::builder::Builder;
pub use crate::config::*;

// **** Private structures ****

// The decision matrix is row-major: matrix[i][j] is the value of data row i
// for criterion j, in criterion column order.
type DecisionMatrix = Vec<Vec<f64>>;

/// Returns the ordered subset of columns that take part in the analysis:
/// every column except the first one (the row label) and except any column
/// literally named `Score` or `Rank`, which are treated as prior-run
/// artifacts and regenerated.
///
/// Each entry carries the position of the column in the input schema.
pub fn criterion_columns(columns: &[String]) -> Vec<(usize, &str)> {
    columns
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, name)| name.as_str() != SCORE_COLUMN && name.as_str() != RANK_COLUMN)
        .map(|(idx, name)| (idx, name.as_str()))
        .collect()
}

/// Ranks the rows of the dataset by their closeness to the ideal solution.
///
/// Arguments:
/// * `dataset` the rectangular dataset to rank. The first column is the row
///   label; any `Score`/`Rank` columns from a previous run are stripped and
///   recomputed.
/// * `params` the raw weight and impact strings, one comma-separated token
///   per criterion column.
///
/// The output keeps the rows in their input order; the ordering is expressed
/// only through the appended `Rank` column. Rows with equal scores keep their
/// relative input order and receive consecutive distinct ranks.
pub fn rank_dataset(
    dataset: &Dataset,
    params: &RankingParams,
) -> Result<RankedDataset, RankingErrors> {
    info!(
        "rank_dataset: processing {:?} rows with {:?} columns",
        dataset.rows.len(),
        dataset.columns.len()
    );

    let weight_text = params.weights.trim();
    let impact_text = params.impacts.trim();
    if weight_text.is_empty() || impact_text.is_empty() {
        return Err(RankingErrors::MissingParameters);
    }
    if dataset.rows.is_empty() {
        return Err(RankingErrors::EmptyDataset);
    }
    for row in dataset.rows.iter() {
        if row.len() != dataset.columns.len() {
            return Err(RankingErrors::RaggedRow {
                expected: dataset.columns.len(),
                found: row.len(),
            });
        }
    }

    let criteria = criterion_columns(&dataset.columns);
    let weight_tokens: Vec<&str> = weight_text.split(',').map(|t| t.trim()).collect();
    let impact_tokens: Vec<&str> = impact_text.split(',').map(|t| t.trim()).collect();
    if criteria.len() != weight_tokens.len() || criteria.len() != impact_tokens.len() {
        return Err(RankingErrors::CriteriaMismatch {
            criteria: criteria.len(),
            weights: weight_tokens.len(),
            impacts: impact_tokens.len(),
        });
    }
    let weights = parse_weights(&weight_tokens)?;
    let impacts = parse_impacts(&impact_tokens)?;

    for ((_, name), (weight, impact)) in criteria.iter().zip(weights.iter().zip(impacts.iter())) {
        info!("Criterion: {}: weight {} impact {:?}", name, weight, impact);
    }

    let matrix = decision_matrix(dataset, &criteria)?;
    let scores = topsis_scores(&matrix, &weights, &impacts);
    let ranks = dense_ranks(&scores);
    debug!("rank_dataset: scores: {:?} ranks: {:?}", scores, ranks);

    Ok(assemble(dataset, scores, ranks))
}

fn parse_weights(tokens: &[&str]) -> Result<Vec<f64>, RankingErrors> {
    let mut res: Vec<f64> = Vec::new();
    for token in tokens.iter() {
        match token.parse::<f64>() {
            Ok(w) if w.is_finite() => res.push(w),
            _ => {
                return Err(RankingErrors::InvalidWeight {
                    token: token.to_string(),
                })
            }
        }
    }
    Ok(res)
}

fn parse_impacts(tokens: &[&str]) -> Result<Vec<Impact>, RankingErrors> {
    let mut res: Vec<Impact> = Vec::new();
    for token in tokens.iter() {
        match *token {
            "+" => res.push(Impact::Benefit),
            "-" => res.push(Impact::Cost),
            _ => {
                return Err(RankingErrors::InvalidImpact {
                    token: token.to_string(),
                })
            }
        }
    }
    Ok(res)
}

// Coerces the criterion cells into the numeric decision matrix. Fails on the
// first cell without a numeric value so that the caller gets a clear signal
// to clean the input instead of a silently wrong ranking.
fn decision_matrix(
    dataset: &Dataset,
    criteria: &[(usize, &str)],
) -> Result<DecisionMatrix, RankingErrors> {
    let mut matrix: DecisionMatrix = Vec::with_capacity(dataset.rows.len());
    for (row_idx, row) in dataset.rows.iter().enumerate() {
        let mut values: Vec<f64> = Vec::with_capacity(criteria.len());
        for (col_idx, name) in criteria.iter() {
            match row[*col_idx].as_f64() {
                Some(v) => values.push(v),
                None => {
                    return Err(RankingErrors::NonNumericCell {
                        column: name.to_string(),
                        // Data rows are numbered from 1, the header not counted.
                        row: row_idx + 1,
                    });
                }
            }
        }
        matrix.push(values);
    }
    Ok(matrix)
}

// Vector normalization followed by weighting. A column whose norm is zero
// normalizes to all zeros: it cannot discriminate between rows and must not
// divide by zero.
fn weighted_matrix(matrix: &[Vec<f64>], weights: &[f64]) -> DecisionMatrix {
    let num_rows = matrix.len();
    let num_criteria = weights.len();
    let mut weighted: DecisionMatrix = vec![vec![0.0; num_criteria]; num_rows];
    for j in 0..num_criteria {
        let norm = matrix.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt();
        debug!("weighted_matrix: column {:?} norm {:?}", j, norm);
        if norm == 0.0 {
            continue;
        }
        for (i, row) in matrix.iter().enumerate() {
            weighted[i][j] = row[j] / norm * weights[j];
        }
    }
    weighted
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

// The closeness coefficients, one per row, each in [0, 1].
fn topsis_scores(matrix: &[Vec<f64>], weights: &[f64], impacts: &[Impact]) -> Vec<f64> {
    let num_criteria = weights.len();
    let weighted = weighted_matrix(matrix, weights);

    // The ideal and anti-ideal reference points, per column.
    let mut best: Vec<f64> = vec![0.0; num_criteria];
    let mut worst: Vec<f64> = vec![0.0; num_criteria];
    for j in 0..num_criteria {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in weighted.iter() {
            lo = lo.min(row[j]);
            hi = hi.max(row[j]);
        }
        match impacts[j] {
            Impact::Benefit => {
                best[j] = hi;
                worst[j] = lo;
            }
            Impact::Cost => {
                best[j] = lo;
                worst[j] = hi;
            }
        }
    }
    debug!("topsis_scores: best: {:?} worst: {:?}", best, worst);

    weighted
        .iter()
        .map(|row| {
            let d_best = euclidean(row, &best);
            let d_worst = euclidean(row, &worst);
            let denom = d_best + d_worst;
            // A row at zero distance from both reference points only happens
            // when every weighted column is identical across rows. Scored 0.
            if denom == 0.0 {
                0.0
            } else {
                d_worst / denom
            }
        })
        .collect()
}

// Dense 1-based ranks from a stable sort by descending score. Equal scores
// keep their original row order, so the earlier row takes the better rank.
fn dense_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut ranks: Vec<u32> = vec![0; scores.len()];
    for (position, &row) in order.iter().enumerate() {
        ranks[row] = (position + 1) as u32;
    }
    ranks
}

// Reattaches the pass-through columns and appends Score and Rank, keeping
// the input row order.
fn assemble(dataset: &Dataset, scores: Vec<f64>, ranks: Vec<u32>) -> RankedDataset {
    let kept: Vec<usize> = dataset
        .columns
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            *idx == 0 || (name.as_str() != SCORE_COLUMN && name.as_str() != RANK_COLUMN)
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut columns: Vec<String> = kept.iter().map(|&idx| dataset.columns[idx].clone()).collect();
    columns.push(SCORE_COLUMN.to_string());
    columns.push(RANK_COLUMN.to_string());

    let rows: Vec<Vec<CellValue>> = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells: Vec<CellValue> = kept.iter().map(|&idx| row[idx].clone()).collect();
            cells.push(CellValue::Text(format!("{:.4}", scores[i])));
            cells.push(CellValue::Int(ranks[i] as i64));
            cells
        })
        .collect();

    RankedDataset {
        columns,
        rows,
        scores,
        ranks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut builder = Builder::new().columns(columns);
        for row in rows.iter() {
            builder.add_row_simple(row).unwrap();
        }
        builder.build().unwrap()
    }

    fn params(weights: &str, impacts: &str) -> RankingParams {
        RankingParams::new(weights, impacts)
    }

    // The 4x2 scenario where row 3 dominates everyone on both benefit
    // criteria and row 2 is dominated by everyone.
    fn phones() -> Dataset {
        dataset(
            &["Model", "Price", "Storage"],
            &[
                &["m-1", "250", "16"],
                &["m-2", "200", "16"],
                &["m-3", "300", "32"],
                &["m-4", "275", "32"],
            ],
        )
    }

    #[test]
    fn dominance_scenario() {
        let ranked = rank_dataset(&phones(), &params("1,1", "+,+")).unwrap();
        assert_eq!(ranked.ranks, vec![3, 4, 1, 2]);
        // The dominating row coincides with the ideal point, the dominated
        // one with the anti-ideal point.
        assert!((ranked.scores[2] - 1.0).abs() < 1e-12);
        assert!(ranked.scores[1].abs() < 1e-12);
    }

    #[test]
    fn result_columns_and_formatting() {
        let ranked = rank_dataset(&phones(), &params("1,1", "+,+")).unwrap();
        assert_eq!(ranked.columns, vec!["Model", "Price", "Storage", "Score", "Rank"]);
        let last_two: Vec<CellValue> = ranked.rows[2][3..].to_vec();
        assert_eq!(
            last_two,
            vec![CellValue::Text("1.0000".to_string()), CellValue::Int(1)]
        );
        assert_eq!(ranked.rows[0][3], CellValue::Text("0.2260".to_string()));
        assert_eq!(ranked.rows[3][3], CellValue::Text("0.8781".to_string()));
    }

    #[test]
    fn scores_bounded_and_ranks_are_a_permutation() {
        let ranked = rank_dataset(&phones(), &params("2,0.5", "+,-")).unwrap();
        for score in ranked.scores.iter() {
            assert!((0.0..=1.0).contains(score), "score out of bounds: {}", score);
        }
        let mut sorted = ranked.ranks.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn row_order_is_preserved() {
        let input = phones();
        let ranked = rank_dataset(&input, &params("1,1", "+,+")).unwrap();
        for (input_row, ranked_row) in input.rows.iter().zip(ranked.rows.iter()) {
            assert_eq!(input_row[0], ranked_row[0]);
            assert_eq!(input_row[1], ranked_row[1]);
            assert_eq!(input_row[2], ranked_row[2]);
        }
    }

    #[test]
    fn normalized_columns_have_unit_norm() {
        let matrix = vec![
            vec![250.0, 16.0],
            vec![200.0, 16.0],
            vec![300.0, 32.0],
            vec![275.0, 32.0],
        ];
        // With unit weights the weighted matrix is the normalized matrix.
        let weighted = weighted_matrix(&matrix, &[1.0, 1.0]);
        for j in 0..2 {
            let sum: f64 = weighted.iter().map(|row| row[j] * row[j]).sum();
            assert!((sum - 1.0).abs() < 1e-9, "column {} norm {}", j, sum);
        }
    }

    #[test]
    fn reanalysis_of_own_output_is_idempotent() {
        let p = params("1,1", "+,+");
        let first = rank_dataset(&phones(), &p).unwrap();
        let again = Dataset {
            columns: first.columns.clone(),
            rows: first.rows.clone(),
        };
        let second = rank_dataset(&again, &p).unwrap();
        assert_eq!(first.ranks, second.ranks);
        for (a, b) in first.scores.iter().zip(second.scores.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(first.columns, second.columns);
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn previous_score_and_rank_columns_are_stripped() {
        let input = dataset(
            &["Name", "Score", "Cost", "Rank"],
            &[&["a", "0.5000", "100", "2"], &["b", "0.9000", "200", "1"]],
        );
        let ranked = rank_dataset(&input, &params("1", "-")).unwrap();
        assert_eq!(ranked.columns, vec!["Name", "Cost", "Score", "Rank"]);
        // Lower cost wins.
        assert_eq!(ranked.ranks, vec![1, 2]);
    }

    #[test]
    fn all_zero_column_contributes_nothing() {
        let input = dataset(
            &["Name", "Unused", "Value"],
            &[&["a", "0", "5"], &["b", "0", "7"]],
        );
        let ranked = rank_dataset(&input, &params("1,1", "+,+")).unwrap();
        assert_eq!(ranked.ranks, vec![2, 1]);
        assert!(ranked.scores[0].abs() < 1e-12);
        assert!((ranked.scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_row_scores_zero_and_ranks_first() {
        let input = dataset(&["Name", "Value"], &[&["only", "42"]]);
        let ranked = rank_dataset(&input, &params("1", "+")).unwrap();
        assert_eq!(ranked.scores, vec![0.0]);
        assert_eq!(ranked.ranks, vec![1]);
    }

    #[test]
    fn identical_rows_tie_in_input_order() {
        let input = dataset(
            &["Name", "A", "B"],
            &[&["x", "1", "2"], &["y", "1", "2"], &["z", "1", "1"]],
        );
        let ranked = rank_dataset(&input, &params("1,1", "+,+")).unwrap();
        // x and y tie with the best score; the earlier row takes rank 1.
        assert_eq!(ranked.ranks, vec![1, 2, 3]);
        assert!((ranked.scores[0] - ranked.scores[1]).abs() < 1e-12);
    }

    #[test]
    fn cost_impact_prefers_lower_values() {
        let input = dataset(&["Name", "Price"], &[&["cheap", "100"], &["dear", "200"]]);
        let ranked = rank_dataset(&input, &params("1", "-")).unwrap();
        assert_eq!(ranked.ranks, vec![1, 2]);
    }

    #[test]
    fn mismatched_counts_report_all_three() {
        let input = dataset(&["Name", "A", "B", "C"], &[&["x", "1", "2", "3"]]);
        let res = rank_dataset(&input, &params("1,1", "+,+,-"));
        assert_eq!(
            res,
            Err(RankingErrors::CriteriaMismatch {
                criteria: 3,
                weights: 2,
                impacts: 3,
            })
        );
        let message = format!("{}", res.unwrap_err());
        assert!(message.contains("3 criterion columns"));
        assert!(message.contains("2 weights"));
        assert!(message.contains("3 impacts"));
    }

    #[test]
    fn missing_parameters_detected_first() {
        let empty = Dataset {
            columns: vec!["Name".to_string(), "A".to_string()],
            rows: vec![],
        };
        assert_eq!(
            rank_dataset(&empty, &params("", "+")),
            Err(RankingErrors::MissingParameters)
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let empty = Dataset {
            columns: vec!["Name".to_string(), "A".to_string()],
            rows: vec![],
        };
        assert_eq!(
            rank_dataset(&empty, &params("1", "+")),
            Err(RankingErrors::EmptyDataset)
        );
    }

    #[test]
    fn non_numeric_weight_token_is_rejected() {
        let input = dataset(&["Name", "A"], &[&["x", "1"]]);
        assert_eq!(
            rank_dataset(&input, &params("abc", "+")),
            Err(RankingErrors::InvalidWeight {
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn unknown_impact_token_is_rejected() {
        let input = dataset(&["Name", "A"], &[&["x", "1"]]);
        assert_eq!(
            rank_dataset(&input, &params("1", "*")),
            Err(RankingErrors::InvalidImpact {
                token: "*".to_string()
            })
        );
    }

    #[test]
    fn non_numeric_cell_fails_the_whole_run() {
        let input = dataset(
            &["Name", "Price"],
            &[&["x", "100"], &["y", "n/a"], &["z", "300"]],
        );
        assert_eq!(
            rank_dataset(&input, &params("1", "+")),
            Err(RankingErrors::NonNumericCell {
                column: "Price".to_string(),
                row: 2,
            })
        );
    }

    #[test]
    fn empty_cell_is_not_numeric() {
        let input = dataset(&["Name", "Price"], &[&["x", "100"], &["y", ""]]);
        assert_eq!(
            rank_dataset(&input, &params("1", "+")),
            Err(RankingErrors::NonNumericCell {
                column: "Price".to_string(),
                row: 2,
            })
        );
    }

    #[test]
    fn ragged_row_is_rejected() {
        let input = Dataset {
            columns: vec!["Name".to_string(), "A".to_string()],
            rows: vec![vec![CellValue::Text("x".to_string())]],
        };
        assert_eq!(
            rank_dataset(&input, &params("1", "+")),
            Err(RankingErrors::RaggedRow {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn criterion_columns_skip_label_and_artifacts() {
        let columns: Vec<String> = ["Name", "A", "Score", "B", "Rank"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let criteria = criterion_columns(&columns);
        assert_eq!(criteria, vec![(1, "A"), (3, "B")]);
    }

    #[test]
    fn weights_do_not_need_to_sum_to_one() {
        // Scaling the whole weight vector rescales both distances equally,
        // leaving the closeness scores unchanged.
        let a = rank_dataset(&phones(), &params("1,1", "+,+")).unwrap();
        let b = rank_dataset(&phones(), &params("10,10", "+,+")).unwrap();
        for (x, y) in a.scores.iter().zip(b.scores.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
        assert_eq!(a.ranks, b.ranks);
    }
}
