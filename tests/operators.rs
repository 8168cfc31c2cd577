use rand::rngs::StdRng;
use rand::SeedableRng;
use seqevolve::engines::generation::operators::{
    crossover_two_point, select_best, select_tournament, tournament_selection, FrequencyMutator,
};
use seqevolve::{Individual, Symbol, SymbolFrequencies};

fn parse(seq: &str) -> Individual {
    seq.parse().unwrap()
}

fn scored(seq: &str, fitness: f64) -> Individual {
    let mut ind = parse(seq);
    ind.fitness = Some(fitness);
    ind
}

#[test]
fn test_mutation_with_zero_indpb_is_noop() {
    let mutator = FrequencyMutator::new(&SymbolFrequencies::uniform()).unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ind = parse("ACGTACGTAC");
        mutator.mutate(&mut ind, 0.0, &mut rng);
        assert_eq!(ind.sequence_string(), "ACGTACGTAC");
    }
}

#[test]
fn test_mutation_with_full_indpb_changes_every_position() {
    let freqs = SymbolFrequencies::new([0.1, 0.2, 0.3, 0.4]).unwrap();
    let mutator = FrequencyMutator::new(&freqs).unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = parse("ACGTACGTACGTACGTACGT");
        let mut ind = original.clone();
        mutator.mutate(&mut ind, 1.0, &mut rng);

        assert_eq!(ind.len(), original.len());
        for (before, after) in original.sequence.iter().zip(&ind.sequence) {
            assert_ne!(before, after);
        }
        assert!(ind.fitness.is_none());
    }
}

#[test]
fn test_mutation_follows_target_frequencies() {
    // From T, A should be drawn with probability 0.7 / 0.9.
    let freqs = SymbolFrequencies::new([0.7, 0.1, 0.1, 0.1]).unwrap();
    let mutator = FrequencyMutator::new(&freqs).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let mut ind = Individual::new(vec![Symbol::T; 4000]);
    mutator.mutate(&mut ind, 1.0, &mut rng);

    let a_count = ind.sequence.iter().filter(|s| **s == Symbol::A).count();
    let share = a_count as f64 / 4000.0;
    assert!((share - 0.7 / 0.9).abs() < 0.05, "share of A was {}", share);
}

#[test]
fn test_mutation_never_draws_zero_frequency_symbols() {
    let freqs = SymbolFrequencies::new([0.5, 0.5, 0.0, 0.0]).unwrap();
    let mutator = FrequencyMutator::new(&freqs).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let mut ind = Individual::new(vec![Symbol::G; 500]);
    mutator.mutate(&mut ind, 1.0, &mut rng);
    assert!(ind.sequence.iter().all(|s| *s == Symbol::A || *s == Symbol::C));
}

#[test]
fn test_crossover_swaps_one_contiguous_segment() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut a = parse("AAAAAAAAAAAA");
        let mut b = parse("TTTTTTTTTTTT");
        crossover_two_point(&mut a, &mut b, &mut rng);

        assert_eq!(a.len(), 12);
        assert_eq!(b.len(), 12);

        let swapped: Vec<usize> = (0..12).filter(|&i| a.sequence[i] == Symbol::T).collect();
        assert!(!swapped.is_empty());
        let first = swapped[0];
        let last = swapped[swapped.len() - 1];
        assert_eq!(swapped.len(), last - first + 1, "segment not contiguous");
        assert!(first >= 1, "cut points start at 1");

        for i in 0..12 {
            assert_ne!(a.sequence[i], b.sequence[i]);
        }
    }
}

#[test]
fn test_crossover_on_identical_parents() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut a = parse("GATTACAGATTACA");
        let mut b = a.clone();
        crossover_two_point(&mut a, &mut b, &mut rng);
        assert_eq!(a.sequence_string(), "GATTACAGATTACA");
        assert_eq!(b.sequence_string(), "GATTACAGATTACA");
    }
}

#[test]
fn test_crossover_length_one_is_noop() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut a = scored("A", 1.0);
    let mut b = scored("T", 2.0);
    crossover_two_point(&mut a, &mut b, &mut rng);
    assert_eq!(a.sequence_string(), "A");
    assert_eq!(b.sequence_string(), "T");
}

#[test]
fn test_tournament_of_one_is_uniform() {
    let pool = vec![scored("A", 1.0), scored("C", 100.0), scored("G", 3.0), scored("T", 4.0)];
    let mut rng = StdRng::seed_from_u64(2024);

    let mut counts = [0usize; 4];
    for _ in 0..4000 {
        let winner = tournament_selection(&pool, 1, &mut rng).unwrap();
        counts[winner.sequence[0].index()] += 1;
    }
    for count in counts {
        assert!((800..1200).contains(&count), "counts {:?}", counts);
    }
}

#[test]
fn test_tournament_of_population_size_returns_best() {
    let pool = vec![scored("A", 1.0), scored("C", 7.0), scored("G", 3.0), scored("T", 4.0)];
    let mut rng = StdRng::seed_from_u64(5);

    let selected = select_tournament(&pool, pool.len(), pool.len(), &mut rng).unwrap();
    assert_eq!(selected.len(), 4);
    assert!(selected.iter().all(|i| i.sequence_string() == "C"));
}

#[test]
fn test_tournament_is_deterministic_for_fixed_seed() {
    let pool: Vec<Individual> = (0..10).map(|i| scored("ACGT", i as f64)).collect();

    let first = select_tournament(&pool, 10, 3, &mut StdRng::seed_from_u64(8)).unwrap();
    let second = select_tournament(&pool, 10, 3, &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_select_best_tolerates_nan_fitness() {
    let pool: Vec<Individual> = (0..64)
        .map(|i| scored("ACGT", if i % 3 == 0 { f64::NAN } else { i as f64 }))
        .collect();

    let top = select_best(&pool, 10);
    assert_eq!(top.len(), 10);

    let finite: Vec<f64> = top
        .iter()
        .filter_map(|i| i.fitness)
        .filter(|f| !f.is_nan())
        .collect();
    assert!(finite.windows(2).all(|w| w[0] >= w[1]));
}
