mod dimensions;
mod error;
mod guides;
mod imposition;
mod render;
mod sheet;
mod specs;
mod units;

pub use dimensions::*;
pub use error::*;
pub use guides::*;
pub use imposition::*;
pub use render::*;
pub use sheet::*;
pub use specs::*;
pub use units::*;
