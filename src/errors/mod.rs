mod module_error;

pub use module_error::{ModuleError, ModuleErrorKind};
