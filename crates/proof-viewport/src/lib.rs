mod controller;
mod gesture;
mod surface;
mod transform;

pub use controller::*;
pub use gesture::*;
pub use surface::*;
pub use transform::*;
