use qsb_core::{BasisSpec, QsbError};
use qsb_enum::source_from_spec;
use qsb_symm::{Reducer, SymmetryGroup};

use crate::build::build_basis;
use crate::table::BasisTable;

/// Builds the basis described by a configuration document.
pub fn build_from_spec(spec: &BasisSpec) -> Result<BasisTable, QsbError> {
    let group = SymmetryGroup::from_specs(spec.num_sites, &spec.generators)?.into_shared();
    let reducer = Reducer::new(group, &spec.sector)?;
    let source = source_from_spec(spec.num_sites, &spec.candidates)?;
    build_basis(source.as_ref(), reducer, &spec.opts)
}

/// Parses a JSON document and builds its basis.
pub fn build_from_json(json: &str) -> Result<BasisTable, QsbError> {
    build_from_spec(&BasisSpec::from_json(json)?)
}
