pub mod cyrf6936;
pub mod frskyx;
