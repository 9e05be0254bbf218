use std::sync::Arc;

use qsb_basis::{build_basis, build_from_json, build_from_spec};
use qsb_core::{BasisOpts, BasisSpec, CandidateSpec, GeneratorSpec, QsbError, SignRule};
use qsb_enum::FixedPopulation;
use qsb_symm::{inversion, translation, Generator, Reducer, SymmetryGroup};

const RING_JSON: &str = r#"{
    "num_sites": 8,
    "generators": [
        { "name": "T", "map": [1, 2, 3, 4, 5, 6, 7, 0], "period": 8 },
        { "name": "Z", "map": [-1, -2, -3, -4, -5, -6, -7, -8] }
    ],
    "sector": [2, 1],
    "candidates": { "kind": "fixed_population", "population": 4 },
    "opts": { "chunk_size": 16, "threads": 2 }
}"#;

#[test]
fn json_document_matches_programmatic_build() -> Result<(), QsbError> {
    let from_json = build_from_json(RING_JSON)?;

    let generators = vec![
        Generator::new("T", 8, &translation(8, 1), SignRule::Plain)?,
        Generator::new("Z", 8, &inversion(8), SignRule::Plain)?,
    ];
    let group = Arc::new(SymmetryGroup::new(8, generators)?);
    let direct = build_basis(
        &FixedPopulation::new(8, 4)?,
        Reducer::new(group, &[2, 1])?,
        &BasisOpts::default(),
    )?;
    assert_eq!(from_json.fingerprint(), direct.fingerprint());
    assert_eq!(from_json.sector(), &[2, 1]);
    Ok(())
}

#[test]
fn configuration_errors_keep_their_family() {
    let mut spec = BasisSpec::from_json(RING_JSON).unwrap();
    spec.generators[0].period = Some(4);
    assert_eq!(build_from_spec(&spec).unwrap_err().code(), "period-mismatch");

    let mut spec = BasisSpec::from_json(RING_JSON).unwrap();
    spec.sector = vec![8, 0];
    assert_eq!(build_from_spec(&spec).unwrap_err().code(), "sector-out-of-range");

    let mut spec = BasisSpec::from_json(RING_JSON).unwrap();
    spec.candidates = CandidateSpec::SpeciesPopulations {
        sites_per_species: 3,
        populations: vec![1, 1],
    };
    assert_eq!(build_from_spec(&spec).unwrap_err().code(), "species-layout-mismatch");

    let mut spec = BasisSpec::from_json(RING_JSON).unwrap();
    spec.generators.push(GeneratorSpec {
        name: "R".into(),
        map: vec![1, 0, 2, 3, 4, 5, 6, 7],
        sign: SignRule::Plain,
        period: None,
    });
    spec.sector.push(0);
    assert_eq!(build_from_spec(&spec).unwrap_err().code(), "generators-not-commuting");

    assert_eq!(build_from_json("{ \"num_sites\": 4 }").unwrap_err().code(), "config-parse");
}

#[test]
fn species_blocks_build_from_configuration() -> Result<(), QsbError> {
    // Two species on a four-site ring, translated together.
    let spec = BasisSpec {
        num_sites: 8,
        generators: vec![GeneratorSpec {
            name: "T".into(),
            map: vec![1, 2, 3, 0, 5, 6, 7, 4],
            sign: SignRule::Plain,
            period: Some(4),
        }],
        sector: vec![0],
        candidates: CandidateSpec::SpeciesPopulations {
            sites_per_species: 4,
            populations: vec![1, 1],
        },
        opts: BasisOpts::default(),
    };
    let basis = build_from_spec(&spec)?;
    // 16 candidates in free orbits of four.
    assert_eq!(basis.len(), 4);
    assert_eq!(basis.stats().candidates, 16);
    assert!(basis.states().iter().all(|&state| state & 0xF != 0 && state & 0xF0 != 0));
    Ok(())
}
