use std::fmt;

/// The device or system operation a test case exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodName {
    Discover,
    DeviceInfo,
    Capture,
    RCapture,
    Insert,
    Identify,
    Other(String),
}

impl MethodName {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "device" | "discover" => MethodName::Discover,
            "info" | "device_info" | "deviceinfo" => MethodName::DeviceInfo,
            "capture" => MethodName::Capture,
            "rcapture" => MethodName::RCapture,
            "insert" => MethodName::Insert,
            "identify" => MethodName::Identify,
            _ => MethodName::Other(name.to_owned()),
        }
    }

    pub fn is_abis(&self) -> bool {
        matches!(self, MethodName::Insert | MethodName::Identify)
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodName::Discover => write!(f, "device"),
            MethodName::DeviceInfo => write!(f, "info"),
            MethodName::Capture => write!(f, "capture"),
            MethodName::RCapture => write!(f, "rcapture"),
            MethodName::Insert => write!(f, "insert"),
            MethodName::Identify => write!(f, "identify"),
            MethodName::Other(name) => write!(f, "{}", name),
        }
    }
}
