//! Windows file mapping backed by the paging file
//!
//! The kernel reference-counts the mapping object by open handles, so the
//! board disappears once the last instance closes its handle.

use super::BOARD_BYTES;
use crate::{GameError, Result};
use std::ptr::NonNull;
use tracing::debug;
use windows::Win32::Foundation::{
    CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::System::Memory::{
    CreateFileMappingW, FILE_MAP_ALL_ACCESS, MEMORY_MAPPED_VIEW_ADDRESS, MapViewOfFile,
    PAGE_READWRITE, UnmapViewOfFile,
};
use windows::core::PCWSTR;

const SEGMENT_LEN: usize = BOARD_BYTES;

/// Mapped view of a named file mapping
pub(super) struct Segment {
    mapping: HANDLE,
    base: NonNull<u8>,
}

impl Segment {
    /// Open or create the named mapping. Returns whether it was created.
    pub(super) fn open(name: &str) -> Result<(Self, bool)> {
        let wide_name = crate::wide_string(name);

        let mapping = unsafe {
            CreateFileMappingW(
                INVALID_HANDLE_VALUE,
                None,
                PAGE_READWRITE,
                0,
                SEGMENT_LEN as u32,
                PCWSTR::from_raw(wide_name.as_ptr()),
            )
            .map_err(|e| GameError::shared_memory("CreateFileMappingW", std::io::Error::other(e)))?
        };
        let created = unsafe { GetLastError() } != ERROR_ALREADY_EXISTS;

        let view = unsafe { MapViewOfFile(mapping, FILE_MAP_ALL_ACCESS, 0, 0, SEGMENT_LEN) };
        let Some(base) = NonNull::new(view.Value as *mut u8) else {
            let win_err = windows::core::Error::from_thread();
            unsafe {
                let _ = CloseHandle(mapping);
            }
            return Err(GameError::shared_memory("MapViewOfFile", std::io::Error::other(win_err)));
        };

        debug!(name, created, "Mapped file mapping view");
        Ok((Self { mapping, base }, created))
    }

    pub(super) fn base(&self) -> NonNull<u8> {
        self.base
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        unsafe {
            let addr = MEMORY_MAPPED_VIEW_ADDRESS { Value: self.base.as_ptr() as *mut _ };
            let _ = UnmapViewOfFile(addr);
            let _ = CloseHandle(self.mapping);
        }
        debug!("Unmapped file mapping view");
    }
}

// SAFETY: the handle and view are process-wide kernel objects.
unsafe impl Send for Segment {}
