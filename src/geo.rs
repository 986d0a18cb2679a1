use std::fmt;

/// Readout plane orientation a channel belongs to.
///
/// Variants are ordered by their numeric code, which is also what gets
/// printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum View {
    /// First induction plane.
    U = 0,
    /// Second induction plane.
    V = 1,
    /// Vertical wires.
    Z = 2,
    /// Horizontal wires.
    Y = 3,
    /// Wires along the drift direction.
    X = 4,
    /// Three dimensional readout.
    ThreeD = 5,
    /// View not known.
    #[default]
    Unknown = 6,
}

impl View {
    /// Returns the numeric code of the view.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Classification of a signal by the kind of wire that recorded it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SigType {
    /// Signal induced by drifting charge passing by the wire.
    Induction = 0,
    /// Signal from charge collected on the wire.
    Collection = 1,
    /// Not classified.
    #[default]
    Mystery = 2,
}

impl SigType {
    /// Returns the numeric code of the signal type.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code(), f)
    }
}

impl fmt::Display for SigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code(), f)
    }
}

/// The error type returned when a numeric code does not name a [`View`] or a
/// [`SigType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCode {
    kind: &'static str,
    code: u8,
}

impl fmt::Display for InvalidCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid {} code", self.code, self.kind)
    }
}

impl std::error::Error for InvalidCode {}

impl TryFrom<u8> for View {
    type Error = InvalidCode;

    /// # Examples
    ///
    /// ```
    /// use dataobj::geo::View;
    ///
    /// assert_eq!(View::try_from(2), Ok(View::Z));
    /// assert!(View::try_from(7).is_err());
    /// ```
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(View::U),
            1 => Ok(View::V),
            2 => Ok(View::Z),
            3 => Ok(View::Y),
            4 => Ok(View::X),
            5 => Ok(View::ThreeD),
            6 => Ok(View::Unknown),
            _ => Err(InvalidCode { kind: "view", code }),
        }
    }
}

impl TryFrom<u8> for SigType {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SigType::Induction),
            1 => Ok(SigType::Collection),
            2 => Ok(SigType::Mystery),
            _ => Err(InvalidCode {
                kind: "signal type",
                code,
            }),
        }
    }
}

/// Index value marking an unset [`WireId`] component.
pub const INVALID_INDEX: u32 = u32::MAX;

/// Identifier of a sense wire: cryostat, TPC, plane and wire indices.
///
/// The identifier is an opaque value owned by the detector geometry. The
/// default identifier is invalid and has every index set to
/// [`INVALID_INDEX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId {
    cryostat: u32,
    tpc: u32,
    plane: u32,
    wire: u32,
    is_valid: bool,
}

impl WireId {
    /// Creates a new valid wire identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataobj::geo::WireId;
    ///
    /// let id = WireId::new(0, 1, 2, 345);
    /// assert!(id.is_valid());
    /// assert_eq!(id.to_string(), "C:0 T:1 P:2 W:345");
    /// ```
    pub fn new(cryostat: u32, tpc: u32, plane: u32, wire: u32) -> Self {
        Self {
            cryostat,
            tpc,
            plane,
            wire,
            is_valid: true,
        }
    }
    /// Index of the cryostat.
    pub fn cryostat(&self) -> u32 {
        self.cryostat
    }
    /// Index of the TPC within the cryostat.
    pub fn tpc(&self) -> u32 {
        self.tpc
    }
    /// Index of the plane within the TPC.
    pub fn plane(&self) -> u32 {
        self.plane
    }
    /// Index of the wire within the plane.
    pub fn wire(&self) -> u32 {
        self.wire
    }
    /// Returns `true` if the identifier refers to an actual wire.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl Default for WireId {
    /// Creates an invalid wire identifier.
    fn default() -> Self {
        Self {
            cryostat: INVALID_INDEX,
            tpc: INVALID_INDEX,
            plane: INVALID_INDEX,
            wire: INVALID_INDEX,
            is_valid: false,
        }
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!(
            "C:{} T:{} P:{} W:{}",
            self.cryostat, self.tpc, self.plane, self.wire
        ))
    }
}
