//! Lazily resolved optional OS entry points.
//!
//! Newer Windows APIs cannot be linked directly without breaking older
//! systems, so they are looked up at runtime. [`Resolver`] is the
//! capability table: one slot per [`Library`] and per [`Symbol`], each
//! settled at most once per process to either a bound address or
//! permanently unavailable.
//!
//! Slots are plain atomics. Two threads racing on first use may both ask
//! the loader, but they store the same answer, so no lock is needed.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::error::SystemError;
use crate::log_warn;

/// System libraries that optional entry points live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Library {
    User32,
    ShCore,
    DwmApi,
    UxTheme,
    NtDll,
}

impl Library {
    const COUNT: usize = 5;

    /// File name inside the system directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::User32 => "user32.dll",
            Self::ShCore => "shcore.dll",
            Self::DwmApi => "dwmapi.dll",
            Self::UxTheme => "uxtheme.dll",
            Self::NtDll => "ntdll.dll",
        }
    }
}

/// How a symbol is exported from its library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    Name(&'static str),
    /// Undocumented functions exported by ordinal only.
    Ordinal(u16),
}

/// Optional entry points framekit knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    GetDpiForWindow,
    GetSystemDpiForProcess,
    GetDpiForSystem,
    GetSystemMetricsForDpi,
    GetWindowDpiAwarenessContext,
    GetThreadDpiAwarenessContext,
    GetAwarenessFromDpiAwarenessContext,
    AreDpiAwarenessContextsEqual,
    GetDpiForMonitor,
    GetProcessDpiAwareness,
    DwmIsCompositionEnabled,
    DwmGetColorizationColor,
    DwmExtendFrameIntoClientArea,
    DwmGetWindowAttribute,
    ShouldAppsUseDarkMode,
    RtlGetVersion,
}

impl Symbol {
    const COUNT: usize = 16;

    pub fn library(self) -> Library {
        match self {
            Self::GetDpiForWindow
            | Self::GetSystemDpiForProcess
            | Self::GetDpiForSystem
            | Self::GetSystemMetricsForDpi
            | Self::GetWindowDpiAwarenessContext
            | Self::GetThreadDpiAwarenessContext
            | Self::GetAwarenessFromDpiAwarenessContext
            | Self::AreDpiAwarenessContextsEqual => Library::User32,
            Self::GetDpiForMonitor | Self::GetProcessDpiAwareness => Library::ShCore,
            Self::DwmIsCompositionEnabled
            | Self::DwmGetColorizationColor
            | Self::DwmExtendFrameIntoClientArea
            | Self::DwmGetWindowAttribute => Library::DwmApi,
            Self::ShouldAppsUseDarkMode => Library::UxTheme,
            Self::RtlGetVersion => Library::NtDll,
        }
    }

    pub fn export(self) -> Export {
        match self {
            Self::ShouldAppsUseDarkMode => Export::Ordinal(132),
            other => Export::Name(other.name()),
        }
    }

    /// The function's name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetDpiForWindow => "GetDpiForWindow",
            Self::GetSystemDpiForProcess => "GetSystemDpiForProcess",
            Self::GetDpiForSystem => "GetDpiForSystem",
            Self::GetSystemMetricsForDpi => "GetSystemMetricsForDpi",
            Self::GetWindowDpiAwarenessContext => "GetWindowDpiAwarenessContext",
            Self::GetThreadDpiAwarenessContext => "GetThreadDpiAwarenessContext",
            Self::GetAwarenessFromDpiAwarenessContext => "GetAwarenessFromDpiAwarenessContext",
            Self::AreDpiAwarenessContextsEqual => "AreDpiAwarenessContextsEqual",
            Self::GetDpiForMonitor => "GetDpiForMonitor",
            Self::GetProcessDpiAwareness => "GetProcessDpiAwareness",
            Self::DwmIsCompositionEnabled => "DwmIsCompositionEnabled",
            Self::DwmGetColorizationColor => "DwmGetColorizationColor",
            Self::DwmExtendFrameIntoClientArea => "DwmExtendFrameIntoClientArea",
            Self::DwmGetWindowAttribute => "DwmGetWindowAttribute",
            Self::ShouldAppsUseDarkMode => "ShouldAppsUseDarkMode",
            Self::RtlGetVersion => "RtlGetVersion",
        }
    }
}

/// Loads system libraries and looks up their exports.
///
/// Implementations must only search the trusted system directory.
pub trait Loader {
    /// Loads `library`, returning its module handle.
    fn load_library(&self, library: Library) -> Result<NonZeroUsize, SystemError>;

    /// Looks up `symbol` in an already loaded module.
    fn find_symbol(&self, module: NonZeroUsize, symbol: Symbol)
    -> Result<NonZeroUsize, SystemError>;
}

/// Resolution state of a symbol, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolStatus {
    Unresolved,
    Bound,
    Unavailable,
}

const UNRESOLVED: u8 = 0;
const BOUND: u8 = 1;
const UNAVAILABLE: u8 = 2;

struct Slot {
    state: AtomicU8,
    address: AtomicUsize,
}

impl Slot {
    const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNRESOLVED),
            address: AtomicUsize::new(0),
        }
    }

    /// `None` while unresolved, otherwise the settled outcome.
    fn get(&self) -> Option<Option<NonZeroUsize>> {
        match self.state.load(Ordering::Acquire) {
            BOUND => Some(NonZeroUsize::new(self.address.load(Ordering::Relaxed))),
            UNAVAILABLE => Some(None),
            _ => None,
        }
    }

    fn settle(&self, address: Option<NonZeroUsize>) {
        match address {
            Some(address) => {
                self.address.store(address.get(), Ordering::Relaxed);
                self.state.store(BOUND, Ordering::Release);
            }
            None => self.state.store(UNAVAILABLE, Ordering::Release),
        }
    }

    fn status(&self) -> SymbolStatus {
        match self.get() {
            None => SymbolStatus::Unresolved,
            Some(Some(_)) => SymbolStatus::Bound,
            Some(None) => SymbolStatus::Unavailable,
        }
    }
}

/// Process-wide table of optional entry points.
pub struct Resolver<L> {
    loader: L,
    libraries: [Slot; Library::COUNT],
    symbols: [Slot; Symbol::COUNT],
}

impl<L: Loader> Resolver<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            libraries: [const { Slot::new() }; Library::COUNT],
            symbols: [const { Slot::new() }; Symbol::COUNT],
        }
    }

    /// Returns the address of `symbol`, or `None` if this OS lacks it.
    ///
    /// The library is loaded and the symbol looked up on first use only;
    /// later calls answer from the table, including after a failure.
    pub fn resolve(&self, symbol: Symbol) -> Option<NonZeroUsize> {
        let slot = &self.symbols[symbol as usize];
        if let Some(settled) = slot.get() {
            return settled;
        }

        let address = self.module(symbol.library()).and_then(|module| {
            match self.loader.find_symbol(module, symbol) {
                Ok(address) => Some(address),
                Err(e) => {
                    log_warn!("{e}");
                    None
                }
            }
        });
        slot.settle(address);
        address
    }

    pub fn status(&self, symbol: Symbol) -> SymbolStatus {
        self.symbols[symbol as usize].status()
    }

    fn module(&self, library: Library) -> Option<NonZeroUsize> {
        let slot = &self.libraries[library as usize];
        if let Some(settled) = slot.get() {
            return settled;
        }

        let module = match self.loader.load_library(library) {
            Ok(module) => Some(module),
            Err(e) => {
                log_warn!("{e}");
                None
            }
        };
        slot.settle(module);
        module
    }
}
