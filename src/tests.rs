#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use unordered_pair::UnorderedPair;

    use crate::builder::{Builder, BuilderInvalidReason, SquareDomainBuilder};
    use crate::domain::Domain;
    use crate::generator::{GenerationFailure, GeneratorConfig, PathGenerator};
    use crate::grid::Grid;
    use crate::location::Location;
    use crate::minimizer::{ClueMinimizer, MinimizerConfig, ScanOrder};
    use crate::path::{Path, PathError};
    use crate::puzzle::{Puzzle, PuzzleConfig, PuzzleGenerator};
    use crate::shape::SquareStep;
    use crate::verifier::{Uniqueness, Verifier};
    use crate::walk::{Backbite, WalkSampler};

    fn rect(width: usize, height: usize) -> Domain {
        SquareDomainBuilder::with_dims((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
            .build()
            .unwrap()
    }

    fn snake() -> Path {
        Path::try_from(vec![
            Location(0, 0), Location(0, 1), Location(0, 2),
            Location(1, 2), Location(1, 1), Location(1, 0),
            Location(2, 0), Location(2, 1), Location(2, 2),
        ]).unwrap()
    }

    fn assert_walk(domain: &Domain, walk: &[Location]) {
        assert!(walk.iter().all(|location| domain.contains(*location)));
        assert!(walk.iter().tuple_windows().all(|(a, b)| domain.connects(*a, *b)));
        assert_eq!(walk.iter().unique().count(), walk.len());
    }

    // removing any one intermediate clue on its own must break uniqueness
    fn assert_locally_minimal(domain: &Domain, puzzle: &Puzzle) {
        let verifier = Verifier::new(domain);
        let waypoints = puzzle.waypoints();
        for index in 1..waypoints.len() - 1 {
            let mut shorter = waypoints.to_vec();
            shorter.remove(index);
            assert!(!verifier.is_unique(puzzle.start(), &Grid::from_waypoints(domain, &shorter)),
                    "clue at {:?} was removable", waypoints[index]);
        }
    }

    #[test]
    fn domain_with_holes() {
        let domain = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .drop_location(Location(1, 1))
            .drop_location(Location(2, 0))
            .build()
            .unwrap();

        assert_eq!(format!("{}", domain), "..
. .
...
");
        assert_eq!(domain.cell_count(), 7);
        assert!(!domain.contains(Location(1, 1)));
        assert!(!domain.contains(Location(3, 0)));
        assert_eq!(domain.neighbors(Location(1, 0)), vec![Location(0, 0)]);
        assert_eq!(domain.locations().count(), 7);
    }

    #[test]
    fn retain_predicate() {
        // an L: the top right 2x2 block removed
        let domain = SquareDomainBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(4).unwrap()))
            .retain(|Location(x, y)| x < 2 || y >= 2)
            .build()
            .unwrap();

        assert_eq!(format!("{}", domain), "..
..
....
....
");
        assert_eq!(domain.cell_count(), 12);
        assert!(domain.is_connected());
    }

    #[test]
    fn walls() {
        let domain = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .disconnect(UnorderedPair::from((Location(0, 0), Location(1, 0))))
            .disconnect_around(Location(2, 2), vec![SquareStep::Up])
            .build()
            .unwrap();

        assert_eq!(domain.neighbors(Location(0, 0)), vec![Location(0, 1)]);
        assert_eq!(domain.step(Location(0, 0), SquareStep::Right), None);
        assert_eq!(domain.step(Location(0, 0), SquareStep::Down), Some(Location(0, 1)));
        assert_eq!(domain.step(Location(2, 2), SquareStep::Up), None);
        assert_eq!(domain.step(Location(0, 0), SquareStep::Up), None);
        assert!(!domain.connects(Location(1, 0), Location(0, 0)));
        assert_eq!(domain.cell_count(), 9);
    }

    #[test]
    fn builder_invalid() {
        let mut builder = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()));
        builder.drop_location(Location(3, 0));
        assert_eq!(builder.build().err(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));

        // later features are ignored once invalid
        builder.drop_location(Location(0, 0));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));

        let empty = SquareDomainBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()))
            .drop_location(Location(0, 0))
            .drop_location(Location(1, 0))
            .is_valid()
            .cloned();
        assert_eq!(empty, Some(vec![BuilderInvalidReason::EmptyDomain]));
    }

    #[test]
    fn disconnected_domain() {
        let domain = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()))
            .drop_location(Location(1, 0))
            .build()
            .unwrap();

        assert!(!domain.is_connected());
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(PathGenerator::new(&domain, GeneratorConfig::default()).generate(&mut rng), Err(GenerationFailure::Disconnected));
    }

    #[test]
    fn path_validation() {
        assert_eq!(Path::try_from(Vec::<Location>::new()), Err(PathError::Empty));
        assert_eq!(Path::try_from(vec![Location(0, 0), Location(1, 1)]), Err(PathError::Gap(Location(0, 0), Location(1, 1))));
        assert_eq!(
            Path::try_from(vec![Location(0, 0), Location(0, 1), Location(0, 0)]),
            Err(PathError::Revisited(Location(0, 0))),
        );

        let path = snake();
        assert_eq!(path.start(), Location(0, 0));
        assert_eq!(path.end(), Location(2, 2));
        assert!(path.is_hamiltonian(&rect(3, 3)));
        assert!(!path.is_hamiltonian(&rect(3, 4)));
    }

    #[test]
    fn grid_from_path() {
        let domain = rect(3, 3);
        let grid = snake().to_grid(&domain);

        assert_eq!(format!("{}", grid), "167
258
349
");
        assert_eq!(grid, snake().to_grid(&domain));
        assert_eq!(grid.clue_count(), 9);
        assert_eq!(grid.clue(Location(1, 0)), 6);
        assert_eq!(grid.clue(Location(5, 5)), 0);
        assert_eq!(grid.waypoints(), snake().locations().to_vec());
    }

    #[test]
    fn wide_grid_display() {
        let domain = rect(4, 3);
        let path = Path::try_from(vec![
            Location(0, 0), Location(1, 0), Location(2, 0), Location(3, 0),
            Location(3, 1), Location(2, 1), Location(1, 1), Location(0, 1),
            Location(0, 2), Location(1, 2), Location(2, 2), Location(3, 2),
        ]).unwrap();

        assert_eq!(format!("{}", path.to_grid(&domain)), " 1  2  3  4
 8  7  6  5
 9 10 11 12
");
    }

    #[test]
    fn verify_fully_clued() {
        let domain = rect(3, 3);
        let verifier = Verifier::new(&domain);

        assert_eq!(verifier.verify(Location(0, 0), &snake().to_grid(&domain)), Uniqueness::Unique);
        assert_eq!(verifier.solve(Location(0, 0), &snake().to_grid(&domain)), Some(snake()));
    }

    #[test]
    fn verify_blank() {
        let domain = rect(3, 3);
        let verifier = Verifier::new(&domain);
        let blank = Grid::empty(&domain);

        assert_eq!(verifier.verify(Location(0, 0), &blank), Uniqueness::Ambiguous);
        assert_eq!(verifier.count_solutions(Location(0, 0), &blank, 100), Some(8));
        assert_eq!(verifier.count_solutions(Location(0, 0), &blank, 3), Some(3));
        assert_eq!(Verifier::new(&rect(2, 2)).count_solutions(Location(0, 0), &Grid::empty(&rect(2, 2)), 100), Some(2));

        let solution = verifier.solve(Location(0, 0), &blank).unwrap();
        assert!(solution.is_hamiltonian(&domain));
        assert_eq!(solution.start(), Location(0, 0));
    }

    #[test]
    fn verify_unsolvable() {
        // no Hamiltonian path of a 3x1 strip starts in the middle
        let strip = rect(3, 1);
        assert_eq!(Verifier::new(&strip).verify(Location(1, 0), &Grid::empty(&strip)), Uniqueness::Unsolvable);

        let domain = rect(3, 3);
        let verifier = Verifier::new(&domain);
        let grid = snake().to_grid(&domain);
        // starting anywhere but clue 1
        assert_eq!(verifier.verify(Location(2, 2), &grid), Uniqueness::Unsolvable);
        assert_eq!(verifier.verify(Location(7, 7), &grid), Uniqueness::Unsolvable);
        // wrong shape
        assert_eq!(verifier.verify(Location(0, 0), &Grid::empty(&rect(4, 4))), Uniqueness::Unsolvable);
        // clues that skip a number can never be reached
        let mut skipping = grid.clone();
        skipping.cells[Location(0, 1).as_index()] = 3;
        assert_eq!(verifier.verify(Location(0, 0), &skipping), Uniqueness::Unsolvable);
        assert_eq!(verifier.solve(Location(0, 0), &skipping), None);
    }

    #[test]
    fn verify_node_limit() {
        let domain = rect(4, 4);
        let verifier = Verifier::new(&domain).with_node_limit(1);
        let blank = Grid::empty(&domain);

        assert_eq!(verifier.verify(Location(0, 0), &blank), Uniqueness::Undecided);
        assert!(!verifier.is_unique(Location(0, 0), &blank));
        assert_eq!(verifier.count_solutions(Location(0, 0), &blank, 2), None);
    }

    #[test]
    fn verify_single_cell() {
        let domain = rect(1, 1);
        let grid = Grid::from_waypoints(&domain, &[Location(0, 0)]);
        assert_eq!(Verifier::new(&domain).verify(Location(0, 0), &grid), Uniqueness::Unique);
    }

    #[test]
    fn backbite_right_reverses_loop() {
        let domain = rect(2, 2);
        let path = Path::try_from(vec![Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]).unwrap();
        let mut sampler = WalkSampler::from_path(&domain, path);

        assert_eq!(sampler.backbite_right(SquareStep::Up), Backbite::Reversed);
        assert_eq!(sampler.walk(), &[Location(0, 0), Location(0, 1), Location(1, 1), Location(1, 0)]);
        assert_eq!(sampler.backbite_right(SquareStep::Right), Backbite::Rejected);
        assert_eq!(sampler.backbite_left(SquareStep::Left), Backbite::Rejected);
    }

    #[test]
    fn backbite_left_extends() {
        let domain = rect(3, 1);
        let mut sampler = WalkSampler::new(&domain, Location(1, 0)).unwrap();

        assert_eq!(sampler.backbite_left(SquareStep::Right), Backbite::Extended);
        assert_eq!(sampler.walk(), &[Location(1, 0), Location(2, 0)]);
        assert_eq!(sampler.backbite_left(SquareStep::Left), Backbite::Extended);
        assert_eq!(sampler.walk(), &[Location(2, 0), Location(1, 0), Location(0, 0)]);
        assert!(sampler.is_hamiltonian());
        assert_eq!(sampler.backbite_left(SquareStep::Up), Backbite::Rejected);

        assert!(WalkSampler::new(&domain, Location(0, 1)).is_none());
    }

    #[test]
    fn backbite_invariants() {
        let domain = SquareDomainBuilder::with_dims((NonZero::new(5).unwrap(), NonZero::new(4).unwrap()))
            .drop_location(Location(2, 2))
            .disconnect(UnorderedPair::from((Location(0, 0), Location(0, 1))))
            .build()
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut sampler = WalkSampler::new(&domain, Location(3, 1)).unwrap();
        let mut outcomes = HashSet::new();

        for _ in 0..5000 {
            let before = sampler.walk().to_vec();
            let outcome = sampler.backbite(&mut rng);
            outcomes.insert(outcome);
            let after = sampler.walk();

            match outcome {
                Backbite::Rejected => assert_eq!(before, after),
                Backbite::Reversed => {
                    assert_eq!(before.len(), after.len());
                    assert_eq!(before.iter().sorted().collect_vec(), after.iter().sorted().collect_vec());
                    // one end stays put
                    assert!(before[0] == after[0] || before[before.len() - 1] == after[after.len() - 1]);
                }
                Backbite::Extended => {
                    assert_eq!(before.len() + 1, after.len());
                    assert!(!before.contains(&after[after.len() - 1]));
                }
            }
            assert_walk(&domain, after);
        }

        assert_eq!(outcomes.len(), 3);
    }

    #[test]
    fn attempts_per_batch() {
        assert_eq!(GeneratorConfig::default().attempts_per_batch(9), 518);
        assert_eq!(GeneratorConfig::default().attempts_per_batch(0), 1);
    }

    #[test]
    fn generate_hamiltonian() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for domain in [
            rect(4, 4),
            rect(6, 6),
            rect(1, 5),
            SquareDomainBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(4).unwrap()))
                .retain(|Location(x, y)| x < 2 || y >= 2)
                .build()
                .unwrap(),
            SquareDomainBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(4).unwrap()))
                .drop_location(Location(1, 1))
                .build()
                .unwrap(),
        ] {
            let path = PathGenerator::new(&domain, GeneratorConfig::default()).generate(&mut rng).unwrap();

            assert_eq!(path.len(), domain.cell_count());
            assert!(path.is_hamiltonian(&domain));
            assert_eq!(path.iter().copied().collect::<HashSet<_>>(), domain.locations().collect::<HashSet<_>>());
        }
    }

    #[test]
    fn generate_budget_exhausted() {
        // a plus sign: connected, but four dead ends
        let domain = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .drop_location(Location(0, 0))
            .drop_location(Location(2, 0))
            .drop_location(Location(0, 2))
            .drop_location(Location(2, 2))
            .build()
            .unwrap();
        let config = GeneratorConfig { max_batches: 3, ..Default::default() };
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        assert!(domain.is_connected());
        assert_eq!(PathGenerator::new(&domain, config).generate(&mut rng), Err(GenerationFailure::BudgetExhausted { batches: 3 }));
    }

    #[test]
    fn sample_walk() {
        let domain = rect(8, 8);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let config = GeneratorConfig { attempts_scale: 0.01, ..Default::default() };
        let walk = PathGenerator::new(&domain, config).sample_walk(&mut rng).unwrap();

        assert!(walk.len() <= domain.cell_count());
        assert_walk(&domain, walk.locations());
    }

    #[test]
    fn generate_circuit() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let even = rect(4, 4);
        let circuit = PathGenerator::new(&even, GeneratorConfig::default()).generate_circuit(&mut rng).unwrap();
        assert!(circuit.is_hamiltonian(&even));
        assert!(even.connects(circuit.start(), circuit.end()));

        let odd = rect(3, 3);
        let near = PathGenerator::new(&odd, GeneratorConfig::default()).generate_circuit(&mut rng).unwrap();
        assert!(near.is_hamiltonian(&odd));
        assert_eq!(near.start().manhattan_distance(&near.end()), 2);
    }

    #[test]
    fn minimize_snake() {
        let domain = rect(3, 3);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let puzzle = ClueMinimizer::new(&domain, MinimizerConfig::default()).minimize(&snake(), &mut rng);

        assert_eq!(format!("{}", puzzle.grid()), "1..
.3.
2.4
");
        assert_eq!(puzzle.waypoints(), &[Location(0, 0), Location(0, 2), Location(1, 1), Location(2, 2)]);
        assert_eq!(puzzle.solution(), &snake());
        assert_eq!(Verifier::new(&domain).solve(puzzle.start(), puzzle.grid()), Some(snake()));
        assert_locally_minimal(&domain, &puzzle);
    }

    #[test]
    fn minimize_cannot_reduce() {
        let domain = rect(2, 1);
        let path = Path::try_from(vec![Location(0, 0), Location(1, 0)]).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let puzzle = ClueMinimizer::new(&domain, MinimizerConfig::default()).minimize(&path, &mut rng);

        assert_eq!(puzzle.grid(), &path.to_grid(&domain));
        assert_eq!(puzzle.clue_count(), 2);
    }

    #[test]
    fn minimize_undecidable_is_left_alone() {
        let domain = rect(3, 3);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let config = MinimizerConfig { node_limit: Some(1), ..Default::default() };
        let puzzle = ClueMinimizer::new(&domain, config).minimize(&snake(), &mut rng);

        assert_eq!(puzzle.clue_count(), 9);
    }

    #[test]
    fn minimize_generated_is_local_minimum() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for (domain, scan_order) in [
            (rect(3, 3), ScanOrder::Reverse),
            (rect(3, 3), ScanOrder::Shuffled),
            (rect(4, 4), ScanOrder::Reverse),
            (rect(4, 4), ScanOrder::Shuffled),
        ] {
            for _ in 0..3 {
                let path = PathGenerator::new(&domain, GeneratorConfig::default()).generate(&mut rng).unwrap();
                let config = MinimizerConfig { scan_order, ..Default::default() };
                let puzzle = ClueMinimizer::new(&domain, config).minimize(&path, &mut rng);

                assert!(Verifier::new(&domain).is_unique(puzzle.start(), puzzle.grid()));
                assert_eq!(puzzle.waypoints()[0], path.start());
                assert_eq!(puzzle.waypoints()[puzzle.clue_count() - 1], path.end());
                assert_eq!(Verifier::new(&domain).solve(puzzle.start(), puzzle.grid()).as_ref(), Some(&path));
                assert_locally_minimal(&domain, &puzzle);
            }
        }
    }

    #[test]
    fn puzzle_generator_is_reproducible() {
        let domain = rect(5, 5);
        let first = PuzzleGenerator::with_seed(domain.clone(), PuzzleConfig::default(), 99).generate().unwrap();
        let second = PuzzleGenerator::with_seed(domain.clone(), PuzzleConfig::default(), 99).generate().unwrap();

        assert_eq!(first, second);
        assert!(first.solution().is_hamiltonian(&domain));
        assert!(Verifier::new(&domain).is_unique(first.start(), first.grid()));
    }

    #[test]
    fn puzzle_display_with_holes() {
        let builder = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(2).unwrap()))
            .drop_location(Location(1, 1))
            .clone();
        let mut generator = PuzzleGenerator::from_builder(&builder, PuzzleConfig::default(), Some(4)).unwrap();
        let puzzle = generator.generate().unwrap();
        let rendered = format!("{}", puzzle);
        let second_row = rendered.lines().nth(1).unwrap();

        assert_eq!(second_row.chars().nth(1), Some(' '));
        assert!(puzzle.solution().is_hamiltonian(generator.domain()));
    }

    #[test]
    fn puzzle_generator_invalid_domain() {
        let builder = SquareDomainBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
            .drop_location(Location(0, 9))
            .clone();

        assert_eq!(
            PuzzleGenerator::from_builder(&builder, PuzzleConfig::default(), None).err(),
            Some(GenerationFailure::InvalidDomain(vec![BuilderInvalidReason::FeatureOutOfBounds])),
        );
    }

    #[cfg(feature = "wasm")]
    #[test]
    fn wasm_generate() {
        use crate::wasm::generate_puzzle;

        let puzzle = generate_puzzle(4, 3, Some(8)).unwrap();
        assert_eq!((puzzle.width(), puzzle.height()), (4, 3));
        assert_eq!(puzzle.grid().len(), 12);
        assert_eq!(puzzle.solution().len(), 24);
        assert_eq!(puzzle.grid().iter().filter(|clue| **clue == 1).count(), 1);

        assert!(generate_puzzle(0, 3, None).is_err());
    }
}
