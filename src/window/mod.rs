pub mod decorator;
pub mod menu_bar;
pub mod registry;
pub mod shell;
pub mod stacking;

use std::fmt;

use crate::geometry::{Geometry, Position, Size};

pub use registry::{RegistryEvent, WindowRegistry};
pub use shell::{CaptureGuard, PointerCapture, ShellResponse, WindowShell};
pub use stacking::{StackingCounter, elect_active};

/// Content kind of a window. Each kind maps to exactly one hosted panel and
/// at most one open window at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindowKind {
    Music,
    Projects,
    Portfolio,
    Game,
}

impl WindowKind {
    pub const ALL: [WindowKind; 4] = [
        WindowKind::Music,
        WindowKind::Projects,
        WindowKind::Portfolio,
        WindowKind::Game,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WindowKind::Music => "Music Player",
            WindowKind::Projects => "Projects",
            WindowKind::Portfolio => "Portfolio",
            WindowKind::Game => "Simple Game",
        }
    }

    /// Default geometry for a freshly opened window of this kind. Successive
    /// kinds are offset diagonally so they don't open exactly on top of each
    /// other.
    pub fn default_geometry(self) -> Geometry {
        const BASE_X: i32 = 18;
        const BASE_Y: i32 = 1;
        match self {
            WindowKind::Music => Geometry::new(Position::new(BASE_X + 2, BASE_Y), Size::new(46, 20)),
            WindowKind::Projects => {
                Geometry::new(Position::new(BASE_X + 4, BASE_Y + 2), Size::new(62, 16))
            }
            WindowKind::Portfolio => {
                Geometry::new(Position::new(BASE_X + 6, BASE_Y + 4), Size::new(72, 20))
            }
            WindowKind::Game => {
                Geometry::new(Position::new(BASE_X + 8, BASE_Y + 6), Size::new(46, 20))
            }
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Opaque window identity, assigned by the registry and stable for the
/// lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: &'static str,
    pub is_open: bool,
    pub z_index: u64,
    pub position: Position,
    pub size: Size,
}

impl WindowRecord {
    fn new(id: WindowId, kind: WindowKind, z_index: u64) -> Self {
        let geometry = kind.default_geometry();
        Self {
            id,
            kind,
            title: kind.title(),
            is_open: true,
            z_index,
            position: geometry.position,
            size: geometry.size,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.position, self.size)
    }
}
