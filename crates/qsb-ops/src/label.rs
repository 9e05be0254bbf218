use num_complex::Complex64;
use qsb_core::{occupation, occupied_below, State};
use serde::{Deserialize, Serialize};

/// Particle statistics deciding whether hopping labels pick up string signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistics {
    /// Spins and hardcore bosons.
    #[default]
    Boson,
    /// Spinless fermions; occupation-changing labels carry `(-1)^(occupied sites below)`.
    Fermion,
}

/// Closed set of single-site operator labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OpLabel {
    /// `I`: leaves the site untouched.
    Identity,
    /// `x`: toggles the site.
    Flip,
    /// `y`: toggles the site with amplitude `i` times the pre-flip sign.
    FlipPhase,
    /// `z`: `+1` on an occupied site, `-1` on an empty one.
    Sign,
    /// `n`: projects onto occupied sites.
    Number,
    /// `+`: fills an empty site.
    Raise,
    /// `-`: empties an occupied site.
    Lower,
}

const LABEL_TABLE: [(char, OpLabel); 7] = [
    ('I', OpLabel::Identity),
    ('x', OpLabel::Flip),
    ('y', OpLabel::FlipPhase),
    ('z', OpLabel::Sign),
    ('n', OpLabel::Number),
    ('+', OpLabel::Raise),
    ('-', OpLabel::Lower),
];

impl OpLabel {
    /// Every label in table order.
    pub const ALL: [OpLabel; 7] = [
        OpLabel::Identity,
        OpLabel::Flip,
        OpLabel::FlipPhase,
        OpLabel::Sign,
        OpLabel::Number,
        OpLabel::Raise,
        OpLabel::Lower,
    ];

    /// Looks a label up by its character.
    pub fn from_char(symbol: char) -> Option<Self> {
        LABEL_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map(|&(_, label)| label)
    }

    /// Character spelling the label in operator strings.
    pub fn symbol(self) -> char {
        match self {
            OpLabel::Identity => 'I',
            OpLabel::Flip => 'x',
            OpLabel::FlipPhase => 'y',
            OpLabel::Sign => 'z',
            OpLabel::Number => 'n',
            OpLabel::Raise => '+',
            OpLabel::Lower => '-',
        }
    }

    /// Whether the label changes the occupation of its site.
    pub fn changes_occupation(self) -> bool {
        matches!(
            self,
            OpLabel::Flip | OpLabel::FlipPhase | OpLabel::Raise | OpLabel::Lower
        )
    }

    /// Acts on `site` of `state`; a zero amplitude means the image vanishes.
    #[inline]
    pub fn act(self, state: State, site: usize, statistics: Statistics) -> (State, Complex64) {
        let bit = occupation(state, site);
        let toggled = state ^ (1 << site);
        let pm = if bit == 1 { 1.0 } else { -1.0 };
        let (image, amplitude) = match self {
            OpLabel::Identity => (state, Complex64::new(1.0, 0.0)),
            OpLabel::Flip => (toggled, Complex64::new(1.0, 0.0)),
            OpLabel::FlipPhase => (toggled, Complex64::new(0.0, pm)),
            OpLabel::Sign => (state, Complex64::new(pm, 0.0)),
            OpLabel::Number => (state, Complex64::new(f64::from(bit), 0.0)),
            OpLabel::Raise if bit == 0 => (toggled, Complex64::new(1.0, 0.0)),
            OpLabel::Lower if bit == 1 => (toggled, Complex64::new(1.0, 0.0)),
            OpLabel::Raise | OpLabel::Lower => return (state, Complex64::new(0.0, 0.0)),
        };
        if statistics == Statistics::Fermion
            && self.changes_occupation()
            && occupied_below(state, site) % 2 == 1
        {
            return (image, -amplitude);
        }
        (image, amplitude)
    }
}
