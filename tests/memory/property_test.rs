/*!
 * Partition Invariant Properties
 * Random request streams never corrupt the address space
 */

use partition_sim::memory::{FitStrategy, MemoryError, PartitionManager};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate { pid: u32, size: usize },
    Release { pid: u32 },
}

fn fit_strategy() -> impl Strategy<Value = FitStrategy> {
    prop_oneof![
        Just(FitStrategy::FirstFit),
        Just(FitStrategy::BestFit),
        Just(FitStrategy::WorstFit),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..8, 0usize..48).prop_map(|(pid, size)| Op::Allocate { pid, size }),
        2 => (0u32..8).prop_map(|pid| Op::Release { pid }),
    ]
}

fn apply(manager: &mut PartitionManager, strategy: FitStrategy, op: &Op) -> Result<(), MemoryError> {
    match *op {
        Op::Allocate { pid, size } => manager.allocate(strategy, size, pid).map(|_| ()),
        Op::Release { pid } => manager.release(pid).map(|_| ()),
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_stream(
        total in 1usize..256,
        fit in fit_strategy(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut manager = PartitionManager::new(total).unwrap();

        for op in &ops {
            let before = manager.partitions().to_vec();
            let result = apply(&mut manager, fit, op);

            prop_assert!(manager.verify().is_ok(), "{:?}", manager.verify());
            prop_assert!(manager.partitions().iter().all(|p| p.size > 0));
            prop_assert_eq!(
                manager.partitions().iter().map(|p| p.size).sum::<usize>(),
                total
            );
            prop_assert!(manager
                .partitions()
                .windows(2)
                .all(|pair| !(pair[0].is_free() && pair[1].is_free())));

            match result {
                Ok(()) => {
                    let grown = manager.partitions().len() as isize - before.len() as isize;
                    if matches!(op, Op::Allocate { .. }) {
                        prop_assert!(grown == 0 || grown == 1);
                    }
                }
                Err(_) => {
                    prop_assert_eq!(manager.partitions(), before.as_slice());
                }
            }
        }
    }

    #[test]
    fn allocate_then_release_is_identity(
        total in 16usize..256,
        fit in fit_strategy(),
        setup in prop::collection::vec(op(), 0..32),
        size in 1usize..64,
    ) {
        let mut manager = PartitionManager::new(total).unwrap();
        for op in &setup {
            let _ = apply(&mut manager, fit, op);
        }
        let before = manager.partitions().to_vec();

        // Fresh pid outside the setup range
        let pid = 1_000;
        if manager.allocate(fit, size, pid).is_ok() {
            prop_assert_eq!(manager.release(pid), Ok(size));
        }
        prop_assert_eq!(manager.partitions(), before.as_slice());
    }

    #[test]
    fn release_unknown_is_not_found(
        total in 1usize..128,
        setup in prop::collection::vec(op(), 0..16),
    ) {
        let mut manager = PartitionManager::new(total).unwrap();
        for op in &setup {
            let _ = apply(&mut manager, FitStrategy::FirstFit, op);
        }
        let before = manager.partitions().to_vec();

        prop_assert_eq!(manager.release(500), Err(MemoryError::NotFound(500)));
        prop_assert_eq!(manager.partitions(), before.as_slice());
    }
}
