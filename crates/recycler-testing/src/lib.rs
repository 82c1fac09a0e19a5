//! Testing utilities and harness for the recycler crates

pub mod assertions;
pub mod host;
pub mod navigation;
pub mod rule;

pub use host::FakeMeasureHost;
pub use navigation::ScreenStack;
pub use rule::{HarnessError, ListTestRule};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::host::FakeMeasureHost;
    pub use crate::navigation::ScreenStack;
    pub use crate::rule::{HarnessError, ListTestRule};
}
