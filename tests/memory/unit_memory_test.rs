/*!
 * Partition Manager Tests
 * Allocation, release, error handling and statistics
 */

use partition_sim::memory::{
    Allocator, FitStrategy, MemoryError, MemoryInfo, MemoryPressure, Partition, PartitionManager,
};
use pretty_assertions::assert_eq;

const FIRST: FitStrategy = FitStrategy::FirstFit;

#[test]
fn test_manager_initialization() {
    let mgr = PartitionManager::new(100).unwrap();

    assert_eq!(mgr.partitions(), &[Partition::free(0, 100)]);
    assert_eq!(mgr.total_size(), 100);
    assert!(mgr.verify().is_ok());
}

#[test]
fn test_zero_capacity_rejected() {
    assert_eq!(
        PartitionManager::new(0).unwrap_err(),
        MemoryError::InvalidCapacity(0)
    );
}

#[test]
fn test_first_allocation_splits_space() {
    let mut mgr = PartitionManager::new(100).unwrap();

    let address = mgr.allocate(FIRST, 30, 1).unwrap();

    assert_eq!(address, 0);
    assert_eq!(
        mgr.partitions(),
        &[Partition::allocated(0, 30, 1), Partition::free(30, 70)]
    );
}

#[test]
fn test_exact_fit_does_not_split() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();

    let address = mgr.allocate(FIRST, 70, 2).unwrap();

    assert_eq!(address, 30);
    assert_eq!(
        mgr.partitions(),
        &[Partition::allocated(0, 30, 1), Partition::allocated(30, 70, 2)]
    );
}

#[test]
fn test_no_fit_when_exhausted() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    mgr.allocate(FIRST, 70, 2).unwrap();
    let before = mgr.partitions().to_vec();

    let result = mgr.allocate(FIRST, 1, 3);

    assert_eq!(
        result,
        Err(MemoryError::NoFit {
            requested: 1,
            largest_free: 0,
            free_total: 0,
        })
    );
    assert_eq!(mgr.partitions(), before.as_slice());
}

#[test]
fn test_no_fit_despite_enough_total_free() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 40, 1).unwrap();
    mgr.allocate(FIRST, 20, 2).unwrap();
    mgr.allocate(FIRST, 40, 3).unwrap();
    mgr.release(1).unwrap();
    mgr.release(3).unwrap();

    match mgr.allocate(FIRST, 50, 4) {
        Err(MemoryError::NoFit {
            requested,
            largest_free,
            free_total,
        }) => {
            assert_eq!(requested, 50);
            assert_eq!(largest_free, 40);
            assert_eq!(free_total, 80);
        }
        other => panic!("Expected NoFit error, got {:?}", other),
    }
}

#[test]
fn test_zero_size_is_invalid() {
    let mut mgr = PartitionManager::new(100).unwrap();

    for strategy in FitStrategy::ALL {
        assert_eq!(
            mgr.allocate(strategy, 0, 1),
            Err(MemoryError::InvalidSize { requested: 0 })
        );
    }
    assert_eq!(mgr.partitions(), &[Partition::free(0, 100)]);
}

#[test]
fn test_release_coalesces_both_sides() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    mgr.allocate(FIRST, 70, 2).unwrap();

    assert_eq!(mgr.release(1), Ok(30));
    assert_eq!(
        mgr.partitions(),
        &[Partition::free(0, 30), Partition::allocated(30, 70, 2)]
    );

    assert_eq!(mgr.release(2), Ok(70));
    assert_eq!(mgr.partitions(), &[Partition::free(0, 100)]);
}

#[test]
fn test_release_order_does_not_matter() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    mgr.allocate(FIRST, 70, 2).unwrap();

    mgr.release(2).unwrap();
    mgr.release(1).unwrap();

    assert_eq!(mgr.partitions(), &[Partition::free(0, 100)]);
}

#[test]
fn test_release_middle_merges_three_into_one() {
    let mut mgr = PartitionManager::new(90).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    mgr.allocate(FIRST, 30, 2).unwrap();
    mgr.allocate(FIRST, 30, 3).unwrap();
    mgr.release(1).unwrap();
    mgr.release(3).unwrap();
    assert_eq!(mgr.partitions().len(), 3);

    mgr.release(2).unwrap();

    assert_eq!(mgr.partitions(), &[Partition::free(0, 90)]);
}

#[test]
fn test_release_unknown_process() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    let before = mgr.partitions().to_vec();

    assert_eq!(mgr.release(42), Err(MemoryError::NotFound(42)));
    assert_eq!(mgr.partitions(), before.as_slice());
}

#[test]
fn test_double_release_is_not_found() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();
    mgr.release(1).unwrap();

    assert_eq!(mgr.release(1), Err(MemoryError::NotFound(1)));
}

#[test]
fn test_process_zero_is_a_regular_owner() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 10, 0).unwrap();

    assert_eq!(mgr.partitions()[0].owner, Some(0));
    assert_eq!(mgr.release(0), Ok(10));
}

/// A process may hold several partitions at once; one release frees them all.
/// This mirrors the classic simulator and is kept as documented behavior.
#[test]
fn test_multiple_partitions_per_process_documented() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 10, 1).unwrap();
    mgr.allocate(FIRST, 20, 2).unwrap();
    mgr.allocate(FIRST, 30, 1).unwrap();

    assert_eq!(
        mgr.process_allocations(1),
        vec![Partition::allocated(0, 10, 1), Partition::allocated(30, 30, 1)]
    );
    assert_eq!(mgr.process_memory(1), 40);

    assert_eq!(mgr.release(1), Ok(40));
    assert_eq!(
        mgr.partitions(),
        &[
            Partition::free(0, 10),
            Partition::allocated(10, 20, 2),
            Partition::free(30, 70),
        ]
    );
    assert!(mgr.process_allocations(1).is_empty());
}

#[test]
fn test_reinitialize_discards_state() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 10, 1).unwrap();
    mgr.allocate(FIRST, 20, 2).unwrap();

    mgr.initialize(50).unwrap();

    assert_eq!(mgr.partitions(), &[Partition::free(0, 50)]);
    assert_eq!(mgr.total_size(), 50);
    assert!(mgr.process_stats(1).is_none());
    assert_eq!(mgr.release(1), Err(MemoryError::NotFound(1)));
}

#[test]
fn test_reinitialize_to_zero_keeps_state() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 10, 1).unwrap();

    assert_eq!(mgr.initialize(0), Err(MemoryError::InvalidCapacity(0)));
    assert_eq!(mgr.process_memory(1), 10);
}

#[test]
fn test_stats() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 20, 1).unwrap();
    mgr.allocate(FIRST, 30, 2).unwrap();
    mgr.allocate(FIRST, 10, 3).unwrap();
    mgr.release(2).unwrap();

    let stats = mgr.stats();
    assert_eq!(stats.total_size, 100);
    assert_eq!(stats.allocated_size, 30);
    assert_eq!(stats.free_size, 70);
    assert_eq!(stats.allocated_count, 2);
    assert_eq!(stats.free_count, 2);
    assert_eq!(stats.largest_free, 40);
    assert!((stats.utilization - 0.30).abs() < 1e-9);
    assert!((stats.external_fragmentation - (1.0 - 40.0 / 70.0)).abs() < 1e-9);
}

#[test]
fn test_stats_when_full() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 100, 1).unwrap();

    let stats = mgr.stats();
    assert_eq!(stats.free_size, 0);
    assert_eq!(stats.external_fragmentation, 0.0);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Critical);
    assert_eq!(mgr.pressure(), MemoryPressure::Critical);
}

#[test]
fn test_process_stats_track_peak() {
    let mut mgr = PartitionManager::new(100).unwrap();
    mgr.allocate(FIRST, 10, 1).unwrap();
    mgr.allocate(FIRST, 15, 1).unwrap();
    mgr.release(1).unwrap();
    mgr.allocate(FIRST, 5, 1).unwrap();

    let stats = mgr.process_stats(1).unwrap();
    assert_eq!(stats.allocated, 5);
    assert_eq!(stats.peak, 25);
    assert_eq!(stats.allocation_count, 3);
    assert!(mgr.process_stats(2).is_none());
}

#[test]
fn test_trait_interfaces() {
    fn drive(alloc: &mut impl Allocator) -> usize {
        let address = alloc.allocate(FitStrategy::BestFit, 25, 9).unwrap();
        alloc.release(9).unwrap();
        address
    }

    let mut mgr = PartitionManager::new(100).unwrap();
    assert_eq!(drive(&mut mgr), 0);

    let info: &dyn MemoryInfo = &mgr;
    assert_eq!(info.partitions().len(), 1);
    assert_eq!(info.stats().free_size, 100);
    assert_eq!(info.process_memory(9), 0);
}

#[test]
fn test_memory_pressure_levels() {
    assert_eq!(MemoryPressure::from_utilization(0.10), MemoryPressure::Low);
    assert_eq!(MemoryPressure::from_utilization(0.60), MemoryPressure::Medium);
    assert_eq!(MemoryPressure::from_utilization(0.85), MemoryPressure::High);
    assert_eq!(MemoryPressure::from_utilization(0.95), MemoryPressure::Critical);
}
