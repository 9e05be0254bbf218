use qsb_core::{check_num_sites, state_mask, ErrorInfo, QsbError, SignRule, State};

/// Declared site map: site `i` is carried to `targets[i]`, inverted when `flips[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMap {
    targets: Vec<usize>,
    flips: Vec<bool>,
}

impl SiteMap {
    /// Parses a signed site map where entry `-(j+1)` means "to `j`, inverted".
    pub fn parse(num_sites: usize, map: &[i64]) -> Result<Self, QsbError> {
        check_num_sites(num_sites)?;
        if map.len() != num_sites {
            let info = ErrorInfo::new("map-length-mismatch", "site map must list every site")
                .with_context("num_sites", num_sites.to_string())
                .with_context("map_len", map.len().to_string());
            return Err(QsbError::Symmetry(info));
        }
        let mut targets = Vec::with_capacity(num_sites);
        let mut flips = Vec::with_capacity(num_sites);
        for (site, &entry) in map.iter().enumerate() {
            let (target, flip) = if entry < 0 {
                (-(entry + 1), true)
            } else {
                (entry, false)
            };
            if target as usize >= num_sites {
                let info =
                    ErrorInfo::new("site-out-of-range", "site map points outside the lattice")
                        .with_context("site", site.to_string())
                        .with_context("entry", entry.to_string())
                        .with_context("num_sites", num_sites.to_string());
                return Err(QsbError::Symmetry(info));
            }
            targets.push(target as usize);
            flips.push(flip);
        }
        let map = Self { targets, flips };
        map.check_bijective()?;
        Ok(map)
    }

    /// Builds an unsigned site map from a plain permutation.
    pub fn from_permutation(num_sites: usize, perm: &[usize]) -> Result<Self, QsbError> {
        let signed: Vec<i64> = perm.iter().map(|&site| site as i64).collect();
        Self::parse(num_sites, &signed)
    }

    fn check_bijective(&self) -> Result<(), QsbError> {
        let mut hit = vec![false; self.targets.len()];
        for (site, &target) in self.targets.iter().enumerate() {
            if std::mem::replace(&mut hit[target], true) {
                let info = ErrorInfo::new("map-not-bijective", "two sites map to the same target")
                    .with_context("site", site.to_string())
                    .with_context("target", target.to_string());
                return Err(QsbError::Symmetry(info));
            }
        }
        Ok(())
    }

    /// Number of lattice sites covered by the map.
    pub fn num_sites(&self) -> usize {
        self.targets.len()
    }

    /// Target site of every source site.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Whether any site is inverted on the way.
    pub fn has_flips(&self) -> bool {
        self.flips.iter().any(|&flip| flip)
    }

    /// Site map of `self` applied after `inner`.
    pub fn compose(&self, inner: &SiteMap) -> SiteMap {
        let targets = inner.targets.iter().map(|&mid| self.targets[mid]).collect();
        let flips = inner
            .targets
            .iter()
            .zip(&inner.flips)
            .map(|(&mid, &flip)| flip ^ self.flips[mid])
            .collect();
        SiteMap { targets, flips }
    }

    /// Smallest positive power of the map equal to the identity.
    ///
    /// A cycle of length `L` carrying an odd number of inversions needs `2L` steps.
    pub fn order(&self) -> u64 {
        let mut seen = vec![false; self.targets.len()];
        let mut order = 1u64;
        for start in 0..self.targets.len() {
            if seen[start] {
                continue;
            }
            let mut length = 0u64;
            let mut parity = false;
            let mut site = start;
            while !seen[site] {
                seen[site] = true;
                parity ^= self.flips[site];
                site = self.targets[site];
                length += 1;
            }
            let cycle = if parity { 2 * length } else { length };
            order = lcm(order, cycle);
        }
        order
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BitMove {
    mask: State,
    shift: i32,
}

/// Mask-and-shift program equivalent to a [`SiteMap`].
///
/// Sites sharing the same displacement `target - source` move together under
/// one mask, so the cost of [`CompiledMap::apply`] is the number of distinct
/// displacements plus one XOR for the inverted sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMap {
    num_sites: usize,
    moves: Box<[BitMove]>,
    flip_mask: State,
    targets: Box<[u8]>,
    sign_rule: SignRule,
}

impl CompiledMap {
    /// Compiles a site map for the given sign rule.
    pub fn compile(map: &SiteMap, sign_rule: SignRule) -> Result<Self, QsbError> {
        if sign_rule == SignRule::Fermionic && map.has_flips() {
            let info = ErrorInfo::new(
                "fermionic-inversion-unsupported",
                "fermionic generators cannot invert sites",
            )
            .with_hint("declare particle-hole maps with the plain sign rule");
            return Err(QsbError::Symmetry(info));
        }
        let mut moves: Vec<BitMove> = Vec::new();
        let mut flip_mask: State = 0;
        for (site, (&target, &flip)) in map.targets.iter().zip(&map.flips).enumerate() {
            let shift = target as i32 - site as i32;
            match moves.iter_mut().find(|mv| mv.shift == shift) {
                Some(mv) => mv.mask |= 1 << site,
                None => moves.push(BitMove {
                    mask: 1 << site,
                    shift,
                }),
            }
            if flip {
                flip_mask |= 1 << target;
            }
        }
        moves.sort_by_key(|mv| mv.shift);
        Ok(Self {
            num_sites: map.num_sites(),
            moves: moves.into_boxed_slice(),
            flip_mask,
            targets: map.targets.iter().map(|&target| target as u8).collect(),
            sign_rule,
        })
    }

    /// Applies the map, returning the image and its sign.
    #[inline]
    pub fn apply(&self, state: State) -> (State, i8) {
        let mut image: State = 0;
        for mv in self.moves.iter() {
            let bits = state & mv.mask;
            image |= if mv.shift >= 0 {
                bits << mv.shift
            } else {
                bits >> -mv.shift
            };
        }
        image ^= self.flip_mask;
        let sign = match self.sign_rule {
            SignRule::Plain => 1,
            SignRule::Fermionic => self.reorder_sign(state),
        };
        (image & state_mask(self.num_sites), sign)
    }

    /// Parity of sorting the permuted occupied sites back into ascending order.
    fn reorder_sign(&self, state: State) -> i8 {
        let mut placed: State = 0;
        let mut inversions = 0u32;
        let mut rest = state;
        while rest != 0 {
            let site = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            let target = self.targets[site];
            inversions += (placed >> target).count_ones();
            placed |= 1 << target;
        }
        if inversions % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// Number of mask-and-shift steps in the program.
    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// Sign rule the map was compiled with.
    pub fn sign_rule(&self) -> SignRule {
        self.sign_rule
    }
}
