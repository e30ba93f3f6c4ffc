use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// Tolerance used when comparing lengths for equality
pub const EPSILON: f32 = 1.0e-4;

/// A length in typographic points (1/72 of an inch). All page geometry is
/// expressed in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    MulAssign,
    Sum,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length relative to the staff space of the score
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Deref, Display, From, Into,
)]
#[display("{_0}sp")]
pub struct Spatium(pub f32);

/// A length in millimetres, mostly used to describe page sizes
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Deref, Display, From, Into)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Deref, Display, From, Into)]
#[display("{_0}in")]
pub struct In(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * 72.0)
    }
}

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    /// Whether this length is indistinguishable from zero
    pub fn is_null(self) -> bool {
        self.0.abs() < EPSILON
    }

    /// Round up to the next whole point
    pub fn ceil(self) -> Pt {
        Pt(self.0.ceil())
    }
}

impl Spatium {
    /// Convert to points given the size of one staff space
    pub fn to_pt(self, spatium: Pt) -> Pt {
        Pt(self.0 * spatium.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}
