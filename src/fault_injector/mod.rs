mod fault_spec;
mod injector;

pub use fault_spec::FaultSpec;
pub use injector::{INVALID_ABIS_ID, NEW_UNKNOWN_VALUE, apply_invalid_request_attribute, inject_fault};
