mod loader;
mod logging;
mod persistence;
mod root;
mod scan;
mod usb;

pub use loader::load_from_path;
pub use logging::LoggingConfig;
pub use persistence::PersistenceConfig;
pub use root::Config;
pub use scan::ScanConfig;
pub use usb::UsbConfig;
