//! Loaded candidate modules and their typed symbol bindings.

use std::ffi::{c_int, c_void};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::atomic::AtomicI32;

use libloading::Library;

use crate::error::LoadError;
use crate::unit::ERRNO_LOCATION_SYMBOL;

/// `int f(int)`: every ctype predicate and transform.
pub type CharFnPtr = unsafe extern "C" fn(c_int) -> c_int;

/// `int *__errno_location(void)`.
pub type ErrnoLocationFn = unsafe extern "C" fn() -> *mut c_int;

/// A shared object loaded for one unit.
///
/// Bindings borrow the module, so the library stays mapped for as long as any
/// function pointer taken from it is reachable.
pub struct CandidateModule {
    unit: String,
    path: PathBuf,
    library: Library,
}

impl std::fmt::Debug for CandidateModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateModule")
            .field("unit", &self.unit)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CandidateModule {
    /// Load the shared object at `path`.
    pub fn open(unit: impl Into<String>, path: &Path) -> Result<Self, LoadError> {
        let unit = unit.into();
        // SAFETY: loading runs the object's initializers. Candidates are plain
        // ctype/errno units with no constructors beyond static data.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
            unit: unit.clone(),
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            unit,
            path: path.to_path_buf(),
            library,
        })
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bind `symbol` as `int symbol(int)`.
    pub fn char_fn(&self, symbol: &str) -> Result<CharFn<'_>, LoadError> {
        // SAFETY: the caller names a ctype symbol, whose contract is
        // `int(int)`; the pointer is only used while `self` is borrowed.
        let func: CharFnPtr = unsafe { self.library.get::<CharFnPtr>(symbol.as_bytes()) }
            .map(|sym| *sym)
            .map_err(|source| self.missing(symbol, source))?;
        self.ensure_defined_here(symbol, func as *const c_void)?;
        Ok(CharFn {
            symbol: symbol.to_string(),
            func,
            _module: PhantomData,
        })
    }

    /// Bind `__errno_location`.
    pub fn errno_cell(&self) -> Result<ErrnoCell<'_>, LoadError> {
        // SAFETY: `__errno_location` has the fixed signature `int *(void)`.
        let func: ErrnoLocationFn =
            unsafe { self.library.get::<ErrnoLocationFn>(ERRNO_LOCATION_SYMBOL.as_bytes()) }
                .map(|sym| *sym)
                .map_err(|source| self.missing(ERRNO_LOCATION_SYMBOL, source))?;
        self.ensure_defined_here(ERRNO_LOCATION_SYMBOL, func as *const c_void)?;
        Ok(ErrnoCell {
            unit: self.unit.clone(),
            source: CellSource::Foreign(func),
            _module: PhantomData,
        })
    }

    fn missing(&self, symbol: &str, source: libloading::Error) -> LoadError {
        LoadError::MissingSymbol {
            unit: self.unit.clone(),
            symbol: symbol.to_string(),
            source,
        }
    }

    /// Symbol lookup through a handle also searches the object's
    /// dependencies, so a candidate that never defines `isdigit` would bind
    /// the host libc's. Reject anything not defined in this object.
    fn ensure_defined_here(&self, symbol: &str, addr: *const c_void) -> Result<(), LoadError> {
        verify_owner(&self.unit, &self.path, symbol, defining_object(addr))
    }
}

fn verify_owner(
    unit: &str,
    path: &Path,
    symbol: &str,
    owner: Result<PathBuf, &'static str>,
) -> Result<(), LoadError> {
    match owner {
        Ok(owner) if same_file(&owner, path) => Ok(()),
        Ok(owner) => Err(LoadError::ForeignSymbol {
            unit: unit.to_string(),
            symbol: symbol.to_string(),
            owner: owner.display().to_string(),
        }),
        Err(reason) => Err(LoadError::UnverifiedSymbol {
            unit: unit.to_string(),
            symbol: symbol.to_string(),
            reason,
        }),
    }
}

/// Path of the loaded object containing `addr`, as the dynamic loader
/// recorded it.
#[cfg(unix)]
fn defining_object(addr: *const c_void) -> Result<PathBuf, &'static str> {
    use std::ffi::{CStr, OsStr};
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let mut info = MaybeUninit::<libc::Dl_info>::zeroed();
    // SAFETY: dladdr only reads the loader's link map and fills `info`.
    if unsafe { libc::dladdr(addr, info.as_mut_ptr()) } == 0 {
        return Err("address is not inside any loaded object");
    }
    // SAFETY: a non-zero return means `info` was filled in.
    let info = unsafe { info.assume_init() };
    if info.dli_fname.is_null() {
        return Err("loader recorded no object name");
    }
    // SAFETY: `dli_fname` points at the loader's NUL-terminated copy of the
    // object name, valid while the object stays loaded.
    let name = unsafe { CStr::from_ptr(info.dli_fname) };
    Ok(PathBuf::from(OsStr::from_bytes(name.to_bytes())))
}

#[cfg(not(unix))]
fn defining_object(_addr: *const c_void) -> Result<PathBuf, &'static str> {
    Err("symbol ownership lookup is not supported on this platform")
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// A bound `int f(int)` symbol.
#[derive(Debug, Clone)]
pub struct CharFn<'m> {
    symbol: String,
    func: CharFnPtr,
    _module: PhantomData<&'m Library>,
}

impl CharFn<'static> {
    /// Wrap an in-process function, e.g. a Rust `extern "C"` implementation.
    #[must_use]
    pub fn from_fn(symbol: impl Into<String>, func: extern "C" fn(c_int) -> c_int) -> Self {
        Self {
            symbol: symbol.into(),
            func,
            _module: PhantomData,
        }
    }
}

impl CharFn<'_> {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Invoke the candidate.
    #[must_use]
    pub fn call(&self, code: c_int) -> c_int {
        // SAFETY: ctype functions take any int by value and touch no caller
        // memory; the backing library outlives `'m`.
        unsafe { (self.func)(code) }
    }
}

#[derive(Debug, Clone, Copy)]
enum CellSource {
    Foreign(ErrnoLocationFn),
    Local(&'static AtomicI32),
}

/// Safe view of a candidate's error-status cell.
///
/// Every operation re-queries the accessor, so reads and writes observe the
/// candidate's storage directly rather than a cached copy.
#[derive(Debug, Clone)]
pub struct ErrnoCell<'m> {
    unit: String,
    source: CellSource,
    _module: PhantomData<&'m Library>,
}

impl ErrnoCell<'static> {
    /// View an in-process cell.
    #[must_use]
    pub fn from_atomic(unit: impl Into<String>, cell: &'static AtomicI32) -> Self {
        Self {
            unit: unit.into(),
            source: CellSource::Local(cell),
            _module: PhantomData,
        }
    }
}

impl ErrnoCell<'_> {
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Call the accessor once and return the location it reports.
    pub fn locate(&self) -> Result<NonNull<c_int>, LoadError> {
        let raw = match self.source {
            // SAFETY: the accessor takes no arguments; the library outlives `'m`.
            CellSource::Foreign(func) => unsafe { func() },
            CellSource::Local(cell) => cell.as_ptr(),
        };
        NonNull::new(raw).ok_or_else(|| LoadError::NullErrnoLocation {
            unit: self.unit.clone(),
        })
    }

    /// Address of the cell, for stability comparisons.
    pub fn address(&self) -> Result<usize, LoadError> {
        Ok(self.locate()?.as_ptr() as usize)
    }

    pub fn read(&self) -> Result<c_int, LoadError> {
        let ptr = self.locate()?;
        // SAFETY: the accessor contract is a valid, aligned int for the
        // lifetime of the loaded module; access is single-threaded.
        Ok(unsafe { ptr.as_ptr().read_volatile() })
    }

    pub fn write(&self, value: c_int) -> Result<(), LoadError> {
        let ptr = self.locate()?;
        // SAFETY: as in `read`.
        unsafe { ptr.as_ptr().write_volatile(value) };
        Ok(())
    }
}
