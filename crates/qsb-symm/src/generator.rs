use qsb_core::{ErrorInfo, GeneratorSpec, QsbError, SignRule, State};

use crate::permutation::{CompiledMap, SiteMap};

/// One symmetry generator with its compiled bit program and cyclic period.
#[derive(Debug, Clone)]
pub struct Generator {
    name: String,
    sites: SiteMap,
    map: CompiledMap,
    period: u32,
}

impl Generator {
    /// Builds a generator from a signed site map and computes its period.
    pub fn new(
        name: impl Into<String>,
        num_sites: usize,
        map: &[i64],
        sign_rule: SignRule,
    ) -> Result<Self, QsbError> {
        let name = name.into();
        let sites = SiteMap::parse(num_sites, map).map_err(|err| with_generator(err, &name))?;
        let compiled =
            CompiledMap::compile(&sites, sign_rule).map_err(|err| with_generator(err, &name))?;
        let order = sites.order();
        let period = u32::try_from(order).map_err(|_| {
            QsbError::Symmetry(
                ErrorInfo::new("group-too-large", "generator period does not fit in u32")
                    .with_context("generator", name.clone())
                    .with_context("period", order.to_string()),
            )
        })?;
        Ok(Self {
            name,
            sites,
            map: compiled,
            period,
        })
    }

    /// Builds a generator from a configuration entry, checking a declared period.
    pub fn from_spec(spec: &GeneratorSpec, num_sites: usize) -> Result<Self, QsbError> {
        let generator = Self::new(spec.name.clone(), num_sites, &spec.map, spec.sign)?;
        if let Some(declared) = spec.period {
            if declared != generator.period {
                let info = ErrorInfo::new(
                    "period-mismatch",
                    "declared period differs from the order of the site map",
                )
                .with_context("generator", spec.name.clone())
                .with_context("declared", declared.to_string())
                .with_context("computed", generator.period.to_string());
                return Err(QsbError::Symmetry(info));
            }
        }
        Ok(generator)
    }

    /// Applies the generator once.
    #[inline]
    pub fn apply(&self, state: State) -> (State, i8) {
        self.map.apply(state)
    }

    /// Number of applications returning every state to itself.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Diagnostic label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared site map.
    pub fn site_map(&self) -> &SiteMap {
        &self.sites
    }

    /// Compiled mask-and-shift program.
    pub fn compiled(&self) -> &CompiledMap {
        &self.map
    }
}

fn with_generator(err: QsbError, name: &str) -> QsbError {
    match err {
        QsbError::Symmetry(info) => QsbError::Symmetry(info.with_context("generator", name)),
        other => other,
    }
}
