use seqevolve::data::codec::{EncodedBatch, CHANNELS};
use seqevolve::engines::oracle::{CommandOracle, FnOracle, OracleAdapter, OutputShape};
use seqevolve::{Individual, Result, SeqEvolveError};
use std::cell::Cell;

/// Deterministic stub: weighted position sum of channel indices.
fn positional_score(batch: &EncodedBatch) -> Result<Vec<f64>> {
    Ok((0..batch.batch)
        .map(|i| {
            let item = batch.item(i);
            let mut score = 0.0;
            for channel in 0..CHANNELS {
                for position in 0..batch.length {
                    if item[channel * batch.length + position] == 1.0 {
                        score += (channel * (position + 1)) as f64;
                    }
                }
            }
            score
        })
        .collect())
}

fn individuals(seqs: &[&str]) -> Vec<Individual> {
    seqs.iter().map(|s| s.parse().unwrap()).collect()
}

#[test]
fn test_batch_and_single_scores_agree() {
    let adapter = OracleAdapter::new(FnOracle(positional_score), OutputShape::Scalar);

    let batch = adapter.score(&individuals(&["ACGT", "TTGA", "CCAG"])).unwrap();
    let single = adapter.score(&individuals(&["TTGA"])).unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(single, vec![batch[1]]);
}

#[test]
fn test_default_batch_size_bounds_oracle_calls() {
    let calls = Cell::new(0usize);
    let largest = Cell::new(0usize);
    let oracle = FnOracle(|batch: &EncodedBatch| {
        calls.set(calls.get() + 1);
        largest.set(largest.get().max(batch.batch));
        positional_score(batch)
    });
    let adapter = OracleAdapter::new(oracle, OutputShape::Scalar);
    assert_eq!(adapter.batch_size(), 32);

    let seqs: Vec<String> = (0..70)
        .map(|i| ["ACGT", "TGCA", "GGGG"][i % 3].to_string())
        .collect();
    let pop: Vec<Individual> = seqs.iter().map(|s| s.parse().unwrap()).collect();

    let scores = adapter.score(&pop).unwrap();
    assert_eq!(scores.len(), 70);
    assert_eq!(calls.get(), 3);
    assert_eq!(largest.get(), 32);

    let reference = OracleAdapter::new(FnOracle(positional_score), OutputShape::Scalar)
        .with_batch_size(1)
        .score(&pop)
        .unwrap();
    assert_eq!(scores, reference);
}

#[test]
fn test_multichannel_shape_is_fixed_at_construction() {
    // Scalar adapter over a two-column oracle must fail, not guess.
    let two_columns = |batch: &EncodedBatch| -> Result<Vec<f64>> {
        Ok((0..batch.batch).flat_map(|i| [i as f64, 9.0]).collect())
    };
    let scalar = OracleAdapter::new(FnOracle(two_columns), OutputShape::Scalar);
    assert!(matches!(
        scalar.score(&individuals(&["AC", "GT"])),
        Err(SeqEvolveError::ShapeMismatch(_))
    ));

    let multi = OracleAdapter::new(
        FnOracle(two_columns),
        OutputShape::from_channels(2, 0).unwrap(),
    );
    assert_eq!(multi.score(&individuals(&["AC", "GT"])).unwrap(), vec![0.0, 1.0]);
}

#[cfg(unix)]
#[test]
fn test_command_oracle_end_to_end() {
    // Scores are the count of A (first channel), plus a second unused column.
    let script = "awk '{s=0; for(i=1;i<=NF/4;i++) s+=$i; print s, -s}'";
    let oracle = CommandOracle::new("sh", "unused_checkpoint", 2).with_args(vec![
        "-c".to_string(),
        script.to_string(),
        "scorer".to_string(),
    ]);
    let adapter = OracleAdapter::new(oracle, OutputShape::from_channels(2, 0).unwrap())
        .with_batch_size(2);

    let scores = adapter
        .score(&individuals(&["AAAA", "ACGT", "TTTT", "AATT", "CAAA"]))
        .unwrap();
    assert_eq!(scores, vec![4.0, 1.0, 0.0, 2.0, 3.0]);
}

#[cfg(unix)]
#[test]
fn test_command_oracle_failure_is_unavailable() {
    let oracle = CommandOracle::new("sh", "unused_checkpoint", 1).with_args(vec![
        "-c".to_string(),
        "echo 'no device' >&2; exit 3".to_string(),
        "scorer".to_string(),
    ]);
    let adapter = OracleAdapter::new(oracle, OutputShape::Scalar);

    match adapter.score(&individuals(&["ACGT"])) {
        Err(SeqEvolveError::OracleUnavailable(message)) => assert!(message.contains("no device")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_infinite_scores_fail_the_batch() {
    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let adapter = OracleAdapter::new(
            FnOracle(move |batch: &EncodedBatch| {
                let mut scores = vec![0.5; batch.batch];
                scores[batch.batch - 1] = bad;
                Ok(scores)
            }),
            OutputShape::Scalar,
        )
        .with_batch_size(2);

        let result = adapter.score(&individuals(&["ACGT", "TTGA", "CCAG"]));
        match result {
            Err(SeqEvolveError::ShapeMismatch(msg)) => assert!(msg.contains("batch 0"), "{}", msg),
            other => panic!("expected shape mismatch for {}, got {:?}", bad, other),
        }
    }
}
