mod device_request;
mod request_builder;

pub use device_request::{BioRequest, CaptureRequest, capture_request, effective_timeout, rcapture_request, transaction_id};
pub use request_builder::{
    Envelope, EnvelopeHeader, Execution, ExtraInfo, RequestValidation, ResponseValidation, request_validation, response_validation,
};
