use std::sync::Arc;
use std::thread;

use qsb_basis::{build_basis, BasisTable, SharedBasis};
use qsb_core::{BasisOpts, QsbError, SignRule};
use qsb_enum::FixedPopulation;
use qsb_symm::{translation, Generator, Reducer, SymmetryGroup};

fn ring_basis(length: usize, population: u32, k: u32) -> Result<BasisTable, QsbError> {
    let generator = Generator::new("T", length, &translation(length, 1), SignRule::Plain)?;
    let group = SymmetryGroup::new(length, vec![generator])?.into_shared();
    build_basis(
        &FixedPopulation::new(length, population)?,
        Reducer::new(group, &[k])?,
        &BasisOpts::default(),
    )
}

#[test]
fn readers_keep_their_snapshot_across_a_swap() -> Result<(), QsbError> {
    let shared = SharedBasis::new(ring_basis(8, 2, 0)?);
    let before = shared.load();
    let fingerprint = before.fingerprint();

    let previous = shared.replace(ring_basis(8, 3, 1)?);
    assert!(Arc::ptr_eq(&previous, &before));
    assert_eq!(before.fingerprint(), fingerprint);
    assert_ne!(shared.load().fingerprint(), fingerprint);
    Ok(())
}

#[test]
fn concurrent_readers_only_see_complete_tables() -> Result<(), QsbError> {
    let first = ring_basis(10, 2, 0)?;
    let second = ring_basis(10, 4, 2)?;
    let known = [first.fingerprint(), second.fingerprint()];
    let shared = SharedBasis::new(first);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = shared.load();
                    assert!(known.contains(&snapshot.fingerprint()));
                    assert_eq!(snapshot.states().len(), snapshot.norms().len());
                }
            });
        }
        shared.replace(second);
    });
    assert_eq!(shared.load().fingerprint(), known[1]);
    Ok(())
}
