mod bio_sub_type;
mod device_descriptor;
mod method_name;
mod report;
mod service_error;
pub mod test_case;
mod translation_bundle;

pub use bio_sub_type::{bio_sub_type, bio_sub_types};
pub use device_descriptor::{DecodedIdentity, DeviceDescriptor, DeviceDescriptorError};
pub use method_name::MethodName;
pub use report::{ProjectType, Report, ReportStatus};
pub use service_error::ServiceError;
pub use test_case::{OtherAttributes, TestCase, ValidatorDef};
pub use translation_bundle::{TestCaseTranslation, TranslationBundle};
