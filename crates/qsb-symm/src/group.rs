use std::sync::Arc;

use qsb_core::{check_num_sites, ErrorInfo, GeneratorSpec, QsbError, State};
use tracing::debug;

use crate::generator::Generator;

/// Largest group order accepted for exhaustive orbit enumeration.
pub const MAX_GROUP_ORDER: usize = 4096;

/// Abelian group generated by commuting [`Generator`]s.
///
/// Group elements are exponent tuples `(e_1, .., e_k)` with `0 <= e_j < p_j`;
/// they are visited in odometer order with the first generator varying slowest.
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    num_sites: usize,
    generators: Vec<Generator>,
    order: usize,
}

impl SymmetryGroup {
    /// Assembles a group, failing eagerly on inconsistent generators.
    pub fn new(num_sites: usize, generators: Vec<Generator>) -> Result<Self, QsbError> {
        check_num_sites(num_sites)?;
        let mut order = 1usize;
        for generator in &generators {
            if generator.site_map().num_sites() != num_sites {
                let info = ErrorInfo::new(
                    "map-length-mismatch",
                    "generator was declared for a different lattice size",
                )
                .with_context("generator", generator.name())
                .with_context("generator_sites", generator.site_map().num_sites().to_string())
                .with_context("num_sites", num_sites.to_string());
                return Err(QsbError::Symmetry(info));
            }
            order = order
                .checked_mul(generator.period() as usize)
                .filter(|&order| order <= MAX_GROUP_ORDER)
                .ok_or_else(|| {
                    QsbError::Symmetry(
                        ErrorInfo::new("group-too-large", "group order exceeds enumeration limit")
                            .with_context("limit", MAX_GROUP_ORDER.to_string())
                            .with_context("generator", generator.name()),
                    )
                })?;
        }
        for (i, a) in generators.iter().enumerate() {
            for b in &generators[i + 1..] {
                if a.site_map().compose(b.site_map()) != b.site_map().compose(a.site_map()) {
                    let info =
                        ErrorInfo::new("generators-not-commuting", "generators must commute")
                            .with_context("first", a.name())
                            .with_context("second", b.name())
                            .with_hint("orbit enumeration assumes an abelian group");
                    return Err(QsbError::Symmetry(info));
                }
            }
        }
        debug!(
            num_sites,
            generators = generators.len(),
            order,
            "symmetry group assembled"
        );
        Ok(Self {
            num_sites,
            generators,
            order,
        })
    }

    /// Group without generators; reduces every state to itself.
    pub fn trivial(num_sites: usize) -> Result<Self, QsbError> {
        Self::new(num_sites, Vec::new())
    }

    /// Builds a group from configuration entries.
    pub fn from_specs(num_sites: usize, specs: &[GeneratorSpec]) -> Result<Self, QsbError> {
        let generators = specs
            .iter()
            .map(|spec| Generator::from_spec(spec, num_sites))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(num_sites, generators)
    }

    /// Wraps the group for sharing between reducers and worker threads.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of lattice sites.
    pub fn num_sites(&self) -> usize {
        self.num_sites
    }

    /// Registered generators in declaration order.
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Period of every generator.
    pub fn periods(&self) -> Vec<u32> {
        self.generators.iter().map(Generator::period).collect()
    }

    /// Number of group elements.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Lists every group element in odometer order.
    pub fn elements(&self) -> Vec<Vec<u32>> {
        let mut elements = Vec::with_capacity(self.order);
        self.walk(0, |exponents, _, _| elements.push(exponents.to_vec()));
        elements
    }

    /// Applies the element with the given exponents to `state`.
    pub fn apply_element(&self, exponents: &[u32], state: State) -> (State, i8) {
        let mut image = state;
        let mut sign = 1i8;
        for (generator, &power) in self.generators.iter().zip(exponents) {
            for _ in 0..power {
                let (next, step) = generator.apply(image);
                image = next;
                sign *= step;
            }
        }
        (image, sign)
    }

    /// Visits the image of `state` under every group element.
    ///
    /// The callback receives the element exponents, the image and the
    /// accumulated sign. Each generator is applied once per step of the
    /// odometer, so a full walk costs one generator application per element.
    pub fn walk<F>(&self, state: State, mut visit: F)
    where
        F: FnMut(&[u32], State, i8),
    {
        let mut exponents = vec![0u32; self.generators.len()];
        self.walk_level(0, state, 1, &mut exponents, &mut visit);
    }

    fn walk_level<F>(
        &self,
        level: usize,
        state: State,
        sign: i8,
        exponents: &mut [u32],
        visit: &mut F,
    ) where
        F: FnMut(&[u32], State, i8),
    {
        let Some(generator) = self.generators.get(level) else {
            visit(exponents, state, sign);
            return;
        };
        let mut image = state;
        let mut image_sign = sign;
        for power in 0..generator.period() {
            exponents[level] = power;
            self.walk_level(level + 1, image, image_sign, exponents, visit);
            let (next, step) = generator.apply(image);
            image = next;
            image_sign *= step;
        }
        exponents[level] = 0;
    }
}
