//! POSIX shared memory segment
//!
//! POSIX objects outlive their processes until unlinked, so liveness comes
//! from `flock` instead: every holder keeps the descriptor open with a shared
//! lock, and the kernel drops the lock when the process dies however it
//! exits. An opener that gets an exclusive lock knows nobody else holds the
//! board, so it resets whatever a previous session left behind.
//!
//! The last holder to release also unlinks the name. An opener that raced
//! with that unlink sees a link count of zero and starts over.

use super::BOARD_BYTES;
use crate::types::EMPTY_BYTE;
use crate::{GameError, Result};
use std::ffi::CString;
use std::io;
use std::ptr::NonNull;
use tracing::{debug, warn};

const SEGMENT_LEN: usize = BOARD_BYTES;
const SEGMENT_MODE: libc::c_uint = 0o600;
const OPEN_ATTEMPTS: usize = 3;

/// Mapped POSIX shared memory object, held under a shared `flock`
pub(super) struct Segment {
    name: CString,
    fd: libc::c_int,
    base: NonNull<u8>,
}

impl Segment {
    /// Open or create the named object. Returns whether this call reset it,
    /// i.e. no other live process held it.
    pub(super) fn open(name: &str) -> Result<(Self, bool)> {
        let c_name = CString::new(name).map_err(|_| {
            GameError::shared_memory(
                "shm_open",
                io::Error::new(io::ErrorKind::InvalidInput, "segment name contains a NUL byte"),
            )
        })?;

        for _ in 0..OPEN_ATTEMPTS {
            let fd = unsafe {
                libc::shm_open(c_name.as_ptr(), libc::O_CREAT | libc::O_RDWR, SEGMENT_MODE)
            };
            if fd < 0 {
                return Err(GameError::shared_memory("shm_open", io::Error::last_os_error()));
            }

            match attach(fd) {
                Ok(Some((base, reset))) => {
                    debug!(name, reset, "Mapped shared memory object");
                    return Ok((Self { name: c_name, fd, base }, reset));
                }
                Ok(None) => {
                    unsafe { libc::close(fd) };
                    debug!(name, "Shared memory object unlinked while opening, retrying");
                }
                Err(err) => {
                    unsafe { libc::close(fd) };
                    return Err(err);
                }
            }
        }

        Err(GameError::shared_memory(
            "shm_open",
            io::Error::other("segment was unlinked on every attempt"),
        ))
    }

    pub(super) fn base(&self) -> NonNull<u8> {
        self.base
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        unsafe {
            if libc::munmap(self.base.as_ptr().cast(), SEGMENT_LEN) != 0 {
                warn!("munmap failed: {}", io::Error::last_os_error());
            }
            // Upgrading succeeds only when no other process holds a lock.
            let last = libc::flock(self.fd, libc::LOCK_EX | libc::LOCK_NB) == 0;
            if last {
                libc::shm_unlink(self.name.as_ptr());
            }
            libc::close(self.fd);
            debug!(last, "Unmapped shared memory object");
        }
    }
}

// SAFETY: the segment is plain shared bytes and a descriptor; nothing in it
// is tied to the creating thread.
unsafe impl Send for Segment {}

/// Lock, size and map an open descriptor.
///
/// Returns `None` when the object was unlinked before the lock was granted.
fn attach(fd: libc::c_int) -> Result<Option<(NonNull<u8>, bool)>> {
    let exclusive = lock(fd)?;

    let stat = fstat(fd)?;
    if stat.st_nlink == 0 {
        return Ok(None);
    }
    if (stat.st_size as usize) < SEGMENT_LEN
        && unsafe { libc::ftruncate(fd, SEGMENT_LEN as libc::off_t) } != 0
    {
        return Err(GameError::shared_memory("ftruncate", io::Error::last_os_error()));
    }

    let base = map(fd)?;

    if exclusive {
        // Clear before other openers can get their shared lock.
        for offset in 0..SEGMENT_LEN {
            // SAFETY: offset < SEGMENT_LEN, within the mapping.
            unsafe { base.as_ptr().add(offset).write_volatile(EMPTY_BYTE) };
        }
        if unsafe { libc::flock(fd, libc::LOCK_SH) } != 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::munmap(base.as_ptr().cast(), SEGMENT_LEN) };
            return Err(GameError::shared_memory("flock", err));
        }
    }

    Ok(Some((base, exclusive)))
}

/// Take the exclusive lock if nobody holds the object, else wait for a
/// shared one. Returns whether the lock is exclusive.
fn lock(fd: libc::c_int) -> Result<bool> {
    if unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) } == 0 {
        return Ok(true);
    }

    let err = io::Error::last_os_error();
    if err.raw_os_error() != Some(libc::EWOULDBLOCK) {
        return Err(GameError::shared_memory("flock", err));
    }
    if unsafe { libc::flock(fd, libc::LOCK_SH) } != 0 {
        return Err(GameError::shared_memory("flock", io::Error::last_os_error()));
    }
    Ok(false)
}

fn fstat(fd: libc::c_int) -> Result<libc::stat> {
    let mut stat: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstat(fd, &mut stat) } != 0 {
        return Err(GameError::shared_memory("fstat", io::Error::last_os_error()));
    }
    Ok(stat)
}

fn map(fd: libc::c_int) -> Result<NonNull<u8>> {
    let ptr = unsafe {
        libc::mmap(
            std::ptr::null_mut(),
            SEGMENT_LEN,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            0,
        )
    };
    if ptr == libc::MAP_FAILED {
        return Err(GameError::shared_memory("mmap", io::Error::last_os_error()));
    }

    NonNull::new(ptr.cast::<u8>())
        .ok_or_else(|| GameError::shared_memory("mmap", io::Error::other("null mapping")))
}
