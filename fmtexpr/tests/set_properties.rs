use fmtexpr::prelude::*;
use fmtexpr::set::{OrderedSet, difference_by_prefix, join, unique, unique_append, unique_partition};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const ROUNDS: usize = 256;

fn random_sequence(rng: &mut impl Rng, alphabet: &[u32]) -> Vec<u32> {
    let len = rng.random_range(0..24);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

#[test]
fn unique_is_idempotent_and_stable() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5e7);
    let alphabet: Vec<u32> = (0..10).collect();

    for _ in 0..ROUNDS {
        let seq = random_sequence(&mut rng, &alphabet);
        let once = unique(seq.iter().copied());
        let twice = unique(once.iter().copied());
        assert_eq!(once, twice, "unique must be idempotent on {:?}", seq);

        // Stable: the order of first occurrences in the input.
        let mut expected = Vec::new();
        for x in &seq {
            if !expected.contains(x) {
                expected.push(*x);
            }
        }
        assert_eq!(once.as_slice(), expected.as_slice());
    }
}

#[test]
fn partition_accounts_for_every_element() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xd0b);
    let alphabet: Vec<u32> = (0..6).collect();

    for _ in 0..ROUNDS {
        let seq = random_sequence(&mut rng, &alphabet);
        let partition = unique_partition(seq.iter().copied());

        assert_eq!(partition.first_seen, unique(seq.iter().copied()));
        assert_eq!(
            partition.first_seen.len() + partition.duplicates.len(),
            seq.len()
        );
        for x in &alphabet {
            let count = seq.iter().filter(|y| *y == x).count();
            let extra = partition.duplicates.iter().filter(|y| *y == x).count();
            assert_eq!(extra, count.saturating_sub(1), "extra occurrences of {}", x);
        }
    }
}

#[test]
fn difference_by_prefix_matches_filtering() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xd1f);
    let alphabet: Vec<u32> = (0..12).collect();

    for _ in 0..ROUNDS {
        let full = unique(random_sequence(&mut rng, &alphabet));
        let prefix = unique(random_sequence(&mut rng, &alphabet));

        let diff = difference_by_prefix(&full, &prefix);
        let expected: OrderedSet<u32> = full.iter().filter(|x| !prefix.contains(x)).copied().collect();
        assert_eq!(diff, expected, "full = {:?}, prefix = {:?}", full, prefix);
    }
}

#[test]
fn unique_append_never_reorders_the_accumulator() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xacc);
    let alphabet: Vec<u32> = (0..8).collect();

    for _ in 0..ROUNDS {
        let acc: OrderedSet<u32> = random_sequence(&mut rng, &alphabet).into_iter().collect();
        let items = random_sequence(&mut rng, &alphabet);
        let merged = unique_append(acc.clone(), items.iter().copied());

        assert_eq!(&merged[..acc.len()], acc.as_slice());
        assert_eq!(
            unique(merged.iter().copied()),
            unique(join([acc.as_slice(), items.as_slice()]))
        );
    }
}

#[test]
fn random_packs_report_consistently() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x9ac);
    let vars: Vec<Variable> = (0..6).map(|i| declare_variable(format!("v{}", i))).collect();

    for _ in 0..64 {
        let mut entities: Vec<Entity> = Vec::new();
        for _ in 0..rng.random_range(0..10) {
            let lhs = &vars[rng.random_range(0..vars.len())];
            if rng.random_bool(0.5) {
                entities.push(lhs.bind(rng.random_range(0..100)).into());
            } else {
                let rhs = &vars[rng.random_range(0..vars.len())];
                entities.push((lhs + rhs).into());
            }
        }
        let pack = Pack::new(entities);
        let report = pack.dependency_report();

        let bindings: Vec<Ident> = pack.iter().filter_map(|e| e.binding().cloned()).collect();
        assert_eq!(
            report.bound_variables().len() + report.duplicate_bindings().len(),
            bindings.len()
        );
        for unsatisfied in report.unsatisfied_dependencies() {
            assert!(!bindings.contains(unsatisfied));
            assert!(report.all_dependencies().contains(unsatisfied));
        }
        assert_eq!(
            report.satisfied_dependencies().len() + report.unsatisfied_dependencies().len(),
            report.all_dependencies().len()
        );

        let expected_errors =
            report.duplicate_bindings().len() + report.unsatisfied_dependencies().len();
        match pack.validate() {
            Ok(_) => assert_eq!(expected_errors, 0),
            Err(errors) => assert_eq!(errors.len(), expected_errors),
        }
    }
}
