mod breadcrumb;
mod message_key;
mod messages;
mod resolver;
mod test_case_overlay;

pub use breadcrumb::{BreadcrumbLabels, breadcrumb_labels};
pub use message_key::{MessageKey, Segment};
pub use messages::{Message, error_message, success_message};
pub use resolver::{TemplateError, resolve, try_resolve};
pub use test_case_overlay::translate_test_case;
