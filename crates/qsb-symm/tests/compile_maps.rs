use qsb_core::{QsbError, SignRule, State};
use qsb_symm::{inversion, reflection, translation, CompiledMap, Generator, SiteMap};

fn naive_apply(map: &[i64], state: State) -> State {
    let mut image = 0;
    for (site, &entry) in map.iter().enumerate() {
        let (target, flip) = if entry < 0 {
            ((-entry - 1) as usize, true)
        } else {
            (entry as usize, false)
        };
        let bit = (state >> site) & 1;
        image |= (bit ^ u64::from(flip)) << target;
    }
    image
}

#[test]
fn translation_compiles_to_two_moves_for_any_length() -> Result<(), QsbError> {
    for length in [3usize, 6, 17, 40, 64] {
        let sites = SiteMap::parse(length, &translation(length, 1))?;
        let compiled = CompiledMap::compile(&sites, SignRule::Plain)?;
        assert_eq!(compiled.num_moves(), 2, "length {length}");
    }
    Ok(())
}

#[test]
fn plain_permutations_match_their_signed_form() -> Result<(), QsbError> {
    let plain = SiteMap::from_permutation(4, &[1, 2, 3, 0])?;
    assert_eq!(plain, SiteMap::parse(4, &translation(4, 1))?);
    assert!(!plain.has_flips());
    assert_eq!(plain.targets(), &[1, 2, 3, 0]);

    let err = SiteMap::from_permutation(3, &[0, 0, 1]).unwrap_err();
    assert_eq!(err.code(), "map-not-bijective");
    Ok(())
}

#[test]
fn generators_keep_the_program_they_were_built_with() -> Result<(), QsbError> {
    let generator = Generator::new("T", 5, &translation(5, 2), SignRule::Fermionic)?;
    let compiled = generator.compiled();
    assert_eq!(compiled.sign_rule(), SignRule::Fermionic);
    assert_eq!(
        compiled,
        &CompiledMap::compile(generator.site_map(), SignRule::Fermionic)?
    );
    assert_eq!(compiled.apply(0b00011), generator.apply(0b00011));

    let plain = Generator::new("P", 5, &reflection(5), SignRule::Plain)?;
    assert_eq!(plain.compiled().sign_rule(), SignRule::Plain);
    Ok(())
}

#[test]
fn compiled_maps_agree_with_site_by_site_application() -> Result<(), QsbError> {
    let length = 10;
    let maps = [
        translation(length, 1),
        translation(length, 3),
        reflection(length),
        inversion(length),
        vec![2, -2, 0, 4, 3, -6, 6, 9, 8, 7],
    ];
    for map in &maps {
        let generator = Generator::new("g", length, map, SignRule::Plain)?;
        for state in 0..(1u64 << length) {
            let (image, sign) = generator.apply(state);
            assert_eq!(image, naive_apply(map, state), "map {map:?} state {state:#b}");
            assert_eq!(sign, 1);
        }
    }
    Ok(())
}

#[test]
fn full_width_lattice_is_supported() -> Result<(), QsbError> {
    let generator = Generator::new("T", 64, &translation(64, 1), SignRule::Plain)?;
    assert_eq!(generator.period(), 64);
    assert_eq!(generator.apply(1u64 << 63), (1, 1));
    assert_eq!(generator.apply(0b1011), (0b10110, 1));
    Ok(())
}

#[test]
fn periods_follow_cycle_structure() -> Result<(), QsbError> {
    let period = |map: Vec<i64>| -> Result<u32, QsbError> {
        Ok(Generator::new("g", map.len(), &map, SignRule::Plain)?.period())
    };
    assert_eq!(period(translation(6, 1))?, 6);
    assert_eq!(period(translation(6, 2))?, 3);
    assert_eq!(period(translation(6, 3))?, 2);
    assert_eq!(period(reflection(7))?, 2);
    assert_eq!(period(inversion(5))?, 2);
    // Two-cycle carrying one inversion needs four steps.
    assert_eq!(period(vec![-2, 0])?, 4);
    // Three-cycle and two-cycle combine to six.
    assert_eq!(period(vec![1, 2, 0, 4, 3])?, 6);
    Ok(())
}

#[test]
fn fermionic_translation_tracks_reordering_sign() -> Result<(), QsbError> {
    let generator = Generator::new("T", 3, &translation(3, 1), SignRule::Fermionic)?;
    // c0+ c2+ -> c1+ c0+ = -c0+ c1+
    assert_eq!(generator.apply(0b101), (0b011, -1));
    // c0+ c1+ -> c1+ c2+
    assert_eq!(generator.apply(0b011), (0b110, 1));
    // c1+ c2+ -> c2+ c0+ = -c0+ c2+
    assert_eq!(generator.apply(0b110), (0b101, -1));
    Ok(())
}

#[test]
fn malformed_maps_fail_eagerly() {
    let err = Generator::new("g", 4, &[1, 2, 3], SignRule::Plain).unwrap_err();
    assert_eq!(err.code(), "map-length-mismatch");

    let err = Generator::new("g", 4, &[1, 2, 3, 4], SignRule::Plain).unwrap_err();
    assert_eq!(err.code(), "site-out-of-range");
    assert_eq!(err.info().context.get("generator").map(String::as_str), Some("g"));

    let err = Generator::new("g", 4, &[1, 1, 2, 3], SignRule::Plain).unwrap_err();
    assert_eq!(err.code(), "map-not-bijective");

    let err = Generator::new("g", 4, &[-5, 1, 2, 3], SignRule::Plain).unwrap_err();
    assert_eq!(err.code(), "site-out-of-range");

    let err = Generator::new("g", 2, &inversion(2), SignRule::Fermionic).unwrap_err();
    assert_eq!(err.code(), "fermionic-inversion-unsupported");

    let err = Generator::new("g", 0, &[], SignRule::Plain).unwrap_err();
    assert_eq!(err.code(), "num-sites-out-of-range");
}

#[test]
fn declared_period_must_match() {
    let spec = qsb_core::GeneratorSpec {
        name: "T".into(),
        map: translation(4, 1),
        sign: SignRule::Plain,
        period: Some(2),
    };
    let err = Generator::from_spec(&spec, 4).unwrap_err();
    assert_eq!(err.code(), "period-mismatch");
    assert_eq!(err.info().context["computed"], "4");

    let spec = qsb_core::GeneratorSpec {
        period: Some(4),
        ..spec
    };
    assert!(Generator::from_spec(&spec, 4).is_ok());
}
