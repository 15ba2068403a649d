pub(crate) const ROOT_ENV: &str = "FRAMESCOPE_ROOT";
pub(crate) const INGEST_ADDR_ENV: &str = "FRAMESCOPE_INGEST_ADDR";
pub(crate) const FRAME_CAPACITY_ENV: &str = "FRAMESCOPE_FRAME_CAPACITY";
pub(crate) const LAYER_MANIFEST_ENV: &str = "FRAMESCOPE_LAYER_MANIFEST";

pub(crate) const DEFAULT_INGEST_BIND_ADDR: &str = "127.0.0.1:2104";
pub(crate) const DEFAULT_FRAME_CAPACITY: usize = 4096;

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";

pub(crate) const LAYER_NAME: &str = "VK_LAYER_FS_framescope";
pub(crate) const LAYER_MANIFEST_FILE: &str = "VK_LAYER_framescope.json";
