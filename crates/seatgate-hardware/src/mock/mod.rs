//! Mock device implementations for testing and development.

mod actuator;
mod reader;

pub use actuator::MockActuator;
pub use reader::{MockReader, MockReaderHandle};
