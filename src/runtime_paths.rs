use std::{env, path::PathBuf};

use crate::{
    DEFAULT_FRAME_CAPACITY, DEFAULT_INGEST_BIND_ADDR, FRAME_CAPACITY_ENV, INGEST_ADDR_ENV,
    ROOT_ENV,
};

pub(crate) fn default_root_dir() -> Option<PathBuf> {
    if let Ok(root) = env::var(ROOT_ENV) {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home::home_dir().map(|home| home.join(".framescope"))
}

pub(crate) fn frame_capacity() -> usize {
    capacity_from(env::var(FRAME_CAPACITY_ENV).ok().as_deref())
}

fn capacity_from(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|capacity| *capacity > 0)
        .unwrap_or(DEFAULT_FRAME_CAPACITY)
}

pub(crate) fn ingest_bind_addr() -> String {
    bind_addr_from(env::var(INGEST_ADDR_ENV).ok().as_deref())
}

fn bind_addr_from(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_INGEST_BIND_ADDR.to_string())
}
