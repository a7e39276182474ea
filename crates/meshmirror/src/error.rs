// Error handling follows the same split we use between the crates
// themselves: `meshmirror_nostd_internal` has its own small error value
// (`ArenaError`), and this crate defines a separate public type that wraps
// it. Keeping the two types separate costs a little upfront, but it means
// the internal crate stays no_std-friendly and the public surface can grow
// context (which build stage failed, which cell was malformed) without
// touching the internal crate.
//
// The overall shape (opaque struct + private kind enum + one small struct
// per variant) is borrowed from the jiff crate's error discussion.

use meshmirror_nostd_internal::{ArenaError, ArenaErrorKind};

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// The target address space refused an allocation while the mirror was
    /// being built. Fatal for the whole build; nothing was returned and
    /// every buffer reserved so far has been released.
    DeviceAlloc(DeviceAllocError),
    /// A host-to-device copy failed while the mirror was being built. Same
    /// fatality as `DeviceAlloc`.
    DeviceTransfer(DeviceTransferError),
    /// A cell's cached cross-section array doesn't have one entry per
    /// energy group.
    EnergyGroupLen(EnergyGroupLenError),
    /// A domain's cell-indexed sequences disagree on the number of cells.
    CellCountMismatch(CellCountMismatchError),
}

// define constructor methods for Error
impl Error {
    /// wrap an arena failure, dispatching on whether the allocation or the
    /// copy went wrong
    pub(crate) fn from_arena(err: ArenaError) -> Self {
        let kind = match err.kind() {
            ArenaErrorKind::Alloc => ErrorKind::DeviceAlloc(DeviceAllocError(err)),
            ArenaErrorKind::Transfer => ErrorKind::DeviceTransfer(DeviceTransferError(err)),
        };
        Error { kind }
    }

    /// produce an error indicating that a cell's cross-section array length
    /// doesn't match the energy-group count
    pub(crate) fn energy_group_len(
        domain: usize,
        cell: usize,
        expected: usize,
        actual: usize,
    ) -> Self {
        Error {
            kind: ErrorKind::EnergyGroupLen(EnergyGroupLenError {
                domain,
                cell,
                expected,
                actual,
            }),
        }
    }

    /// produce an error indicating that a domain's cell-indexed sequences
    /// disagree on the cell count
    pub(crate) fn cell_count_mismatch(
        domain: usize,
        cell_state: usize,
        connectivity: usize,
        geometry: usize,
    ) -> Self {
        Error {
            kind: ErrorKind::CellCountMismatch(CellCountMismatchError {
                domain,
                cell_state,
                connectivity,
                geometry,
            }),
        }
    }

    /// whether this error came out of the target address space (allocation
    /// or transfer), as opposed to input validation
    pub fn is_device_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::DeviceAlloc(_) | ErrorKind::DeviceTransfer(_)
        )
    }

    /// whether this error is specifically an allocation failure
    pub fn is_device_alloc(&self) -> bool {
        matches!(self.kind, ErrorKind::DeviceAlloc(_))
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::DeviceAlloc(ref err) => err.fmt(f),
            ErrorKind::DeviceTransfer(ref err) => err.fmt(f),
            ErrorKind::EnergyGroupLen(ref err) => err.fmt(f),
            ErrorKind::CellCountMismatch(ref err) => err.fmt(f),
        }
    }
}

/// An allocation failure in the target address space
#[derive(Clone, Debug)]
struct DeviceAllocError(ArenaError);

impl std::error::Error for DeviceAllocError {}

impl core::fmt::Display for DeviceAllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mirror build aborted: {}", self.0)
    }
}

/// A host-to-device transfer failure
#[derive(Clone, Debug)]
struct DeviceTransferError(ArenaError);

impl std::error::Error for DeviceTransferError {}

impl core::fmt::Display for DeviceTransferError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mirror build aborted: {}", self.0)
    }
}

/// An error that occurs when a cell's cached cross-section array doesn't
/// have one entry per energy group
#[derive(Clone, Debug)]
struct EnergyGroupLenError {
    domain: usize,
    cell: usize,
    expected: usize,
    actual: usize,
}

impl std::error::Error for EnergyGroupLenError {}

impl core::fmt::Display for EnergyGroupLenError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cell {} of domain {} caches {} cross-section totals, but the \
             simulation has {} energy groups",
            self.cell, self.domain, self.actual, self.expected
        )
    }
}

/// An error that occurs when a domain's cell-indexed sequences disagree on
/// the number of cells
#[derive(Clone, Debug)]
struct CellCountMismatchError {
    domain: usize,
    cell_state: usize,
    connectivity: usize,
    geometry: usize,
}

impl std::error::Error for CellCountMismatchError {}

impl core::fmt::Display for CellCountMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "domain {} has {} cell states, {} connectivity records and {} \
             geometry records; the three must share one cell index space",
            self.domain, self.cell_state, self.connectivity, self.geometry
        )
    }
}
