use std::sync::Arc;

use proptest::prelude::*;
use qsb_core::{QsbError, SignRule, State};
use qsb_symm::{
    inversion, reflection, translation, Generator, Reducer, Reduction, Sector, SymmetryGroup,
};

fn group_of(length: usize, maps: &[Vec<i64>], sign: SignRule) -> Arc<SymmetryGroup> {
    let generators = maps
        .iter()
        .enumerate()
        .map(|(idx, map)| Generator::new(format!("g{idx}"), length, map, sign).unwrap())
        .collect();
    SymmetryGroup::new(length, generators).unwrap().into_shared()
}

fn accepted_count(reducer: &Reducer, states: impl Iterator<Item = State>) -> usize {
    let mut reps: Vec<State> = states
        .filter_map(|state| reducer.reduce(state).accepted().map(|rep| rep.state))
        .collect();
    reps.sort_unstable();
    reps.dedup();
    reps.len()
}

#[test]
fn two_site_swap_rejects_symmetric_states_in_odd_sector() -> Result<(), QsbError> {
    let group = group_of(2, &[translation(2, 1)], SignRule::Plain);
    let even = Reducer::new(Arc::clone(&group), &[0])?;
    let odd = Reducer::new(group, &[1])?;

    let rep = *even.reduce(0b11).accepted().expect("even accepts 11");
    assert_eq!(rep.state, 0b11);
    assert_eq!(rep.norm, 2.0);
    assert_eq!(rep.orbit_size, 1);
    assert_eq!(odd.reduce(0b11), Reduction::Rejected { representative: 0b11 });

    let rep = *odd.reduce(0b01).accepted().expect("odd accepts 01");
    assert_eq!(rep.state, 0b10);
    assert_eq!(rep.norm, 1.0);
    assert_eq!(rep.orbit_size, 2);
    assert!((rep.phase.re + 1.0).abs() < 1e-12);
    assert!(rep.phase.im.abs() < 1e-12);
    Ok(())
}

#[test]
fn momentum_phase_matches_character() -> Result<(), QsbError> {
    let group = group_of(4, &[translation(4, 1)], SignRule::Plain);
    let reducer = Reducer::new(group, &[1])?;
    // 0b0001 reaches the representative 0b1000 after three translations.
    let rep = *reducer.reduce(0b0001).accepted().expect("accepted");
    assert_eq!(rep.state, 0b1000);
    let expected = reducer.sector().conjugate_character(&[3]);
    assert!((rep.phase - expected).norm() < 1e-12);
    assert!((reducer.sector().character(&[1]).im + 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn out_of_range_quantum_numbers_are_not_wrapped() {
    let group = group_of(4, &[translation(4, 2), reflection(4)], SignRule::Plain);
    let err = Reducer::new(Arc::clone(&group), &[2, 0]).unwrap_err();
    assert_eq!(err.code(), "sector-out-of-range");
    let err = Reducer::new(Arc::clone(&group), &[0]).unwrap_err();
    assert_eq!(err.code(), "sector-arity");
    assert_eq!(Sector::all(&group).unwrap().len(), 4);
}

#[test]
fn fermionic_ring_rejects_sign_frustrated_orbits() -> Result<(), QsbError> {
    // Two fermions on four sites at distance two: T^2 maps c0+ c2+ to c2+ c0+ = -c0+ c2+.
    let group = group_of(4, &[translation(4, 1)], SignRule::Fermionic);
    let k0 = Reducer::new(Arc::clone(&group), &[0])?;
    let k2 = Reducer::new(group, &[2])?;
    assert!(k0.reduce(0b0101).is_rejected());
    assert!(k2.reduce(0b0101).is_rejected());
    let k1 = Reducer::new(k0.shared_group(), &[1])?;
    assert!(k1.reduce(0b0101).accepted().is_some());
    Ok(())
}

proptest! {
    #[test]
    fn representatives_reduce_to_themselves(length in 2usize..10, raw in any::<u64>(), q in 0u32..16, flip in 0u32..2) {
        let group = group_of(length, &[translation(length, 1), inversion(length)], SignRule::Plain);
        let q = q % length as u32;
        let reducer = Reducer::new(group, &[q, flip]).unwrap();
        let state = raw & ((1u64 << length) - 1);
        if let Reduction::Accepted(rep) = reducer.reduce(state) {
            let again = *reducer.reduce(rep.state).accepted().expect("representative accepted");
            prop_assert_eq!(again.state, rep.state);
            prop_assert!((again.phase.re - 1.0).abs() < 1e-9);
            prop_assert!((again.norm - rep.norm).abs() < 1e-9);
            prop_assert_eq!(rep.norm.round() as usize * rep.orbit_size, reducer.group().order());
        }
    }

    #[test]
    fn sectors_partition_the_state_space(length in 2usize..9, fermionic in any::<bool>()) {
        let (maps, sign) = if fermionic {
            (vec![translation(length, 1)], SignRule::Fermionic)
        } else {
            (vec![translation(length, 1), inversion(length)], SignRule::Plain)
        };
        let group = group_of(length, &maps, sign);
        let total: usize = Sector::all(&group)
            .unwrap()
            .into_iter()
            .map(|sector| {
                let reducer = Reducer::with_sector(Arc::clone(&group), sector);
                accepted_count(&reducer, 0..(1u64 << length))
            })
            .sum();
        prop_assert_eq!(total, 1usize << length);
    }

    #[test]
    fn reduce_is_deterministic(length in 2usize..10, raw in any::<u64>()) {
        let group = group_of(length, &[translation(length, 1)], SignRule::Fermionic);
        let reducer = Reducer::new(group, &[0]).unwrap();
        let state = raw & ((1u64 << length) - 1);
        prop_assert_eq!(reducer.reduce(state), reducer.reduce(state));
    }
}

#[test]
fn paired_period_two_group_partitions_single_particle_states() -> Result<(), QsbError> {
    let group = group_of(6, &[translation(6, 3), reflection(6)], SignRule::Plain);
    let single: Vec<State> = (0..6).map(|site| 1u64 << site).collect();
    let mut total = 0;
    for sector in Sector::all(&group)? {
        let reducer = Reducer::with_sector(Arc::clone(&group), sector);
        total += accepted_count(&reducer, single.iter().copied());
    }
    assert_eq!(total, 6);
    Ok(())
}
