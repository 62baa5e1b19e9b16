//! Free disk space for a mount point, via `statvfs(3)`.

use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;

use super::{fit, ComponentError, Producer};
use crate::util::{fmt_human, K_IEC};

/// Bytes available to unprivileged users on the filesystem holding the
/// arg path, humanized with IEC prefixes.
pub struct DiskFree;

impl Producer for DiskFree {
    fn name(&self) -> &'static str {
        "disk_free"
    }

    fn produce(&self, capacity: usize, path: &str) -> Result<String, ComponentError> {
        let free = free_bytes(path)?;
        Ok(fit(format!("󰋊 {}B", fmt_human(free, K_IEC)), capacity))
    }
}

fn free_bytes(path: &str) -> Result<u64, ComponentError> {
    let c_path = CString::new(path)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;

    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: c_path is a valid NUL-terminated string and stat points to
    // writable memory of the correct size.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error().into());
    }
    // SAFETY: statvfs returned 0, so the struct is initialized.
    let stat = unsafe { stat.assume_init() };

    Ok(stat.f_frsize as u64 * stat.f_bavail as u64)
}
