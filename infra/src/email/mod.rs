//! Email sender implementations.

mod logging;

pub use logging::LoggingEmailSender;
