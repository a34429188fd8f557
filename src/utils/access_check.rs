use std::io;

/// A non-blocking pipe owned by one thread.
///
/// Writing into a pipe makes the kernel copy from the source buffer on our
/// behalf, and an unmapped source fails the call with `EFAULT` instead of
/// raising a signal in this process.
struct CheckPipe {
    rx: libc::c_int,
    tx: libc::c_int,
}

impl CheckPipe {
    fn open() -> Option<Self> {
        let mut fds: [libc::c_int; 2] = [-1, -1];
        if unsafe { create_pipe(&mut fds) } != 0 {
            return None;
        }
        Some(CheckPipe { rx: fds[0], tx: fds[1] })
    }

    /// Discard the bytes left by earlier checks so the pipe never fills up.
    fn drain(&self) -> bool {
        let mut sink = [0u8; 64];
        loop {
            let n = unsafe { libc::read(self.rx, sink.as_mut_ptr() as *mut libc::c_void, sink.len()) };
            if n >= 0 {
                if (n as usize) < sink.len() {
                    return true;
                }
                continue;
            }
            match last_errno() {
                libc::EINTR => continue,
                libc::EAGAIN => return true,
                _ => return false,
            }
        }
    }

    /// Have the kernel read the byte at `address` into the pipe.
    fn feed(&self, address: u64) -> bool {
        loop {
            let n = unsafe { libc::write(self.tx, address as *const libc::c_void, 1) };
            if n == 1 {
                return true;
            }
            if n == -1 && last_errno() == libc::EINTR {
                continue;
            }
            return false;
        }
    }
}

impl Drop for CheckPipe {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.rx);
            libc::close(self.tx);
        }
    }
}

thread_local! {
    static PIPE: Option<CheckPipe> = CheckPipe::open();
}

/// Check whether the byte at `address` is readable.
///
/// Writability is not checked. Returns `false` when the pipe could not be
/// created for this thread.
pub fn can_access(address: u64) -> bool {
    PIPE.with(|pipe| match pipe {
        Some(pipe) => pipe.drain() && pipe.feed(address),
        None => false,
    })
}

/// Check whether every page touched by `len` bytes at `address` is readable.
pub fn can_access_span(address: u64, len: usize) -> bool {
    if len == 0 {
        return true;
    }
    let last = match address.checked_add(len as u64 - 1) {
        Some(v) => v,
        None => return false,
    };
    let page = page_size();
    let mut at = address;
    while at <= last {
        if !can_access(at) {
            return false;
        }
        at = match (at - at % page).checked_add(page) {
            Some(v) => v,
            None => break,
        };
    }
    true
}

#[inline]
fn page_size() -> u64 {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        4096
    }
}

#[inline]
fn last_errno() -> libc::c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

#[inline]
#[cfg(target_os = "linux")]
unsafe fn create_pipe(fds: &mut [libc::c_int; 2]) -> libc::c_int {
    libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC | libc::O_NONBLOCK)
}

// No pipe2 on macOS, the flags are set one descriptor at a time.
#[cfg(target_os = "macos")]
unsafe fn create_pipe(fds: &mut [libc::c_int; 2]) -> libc::c_int {
    if libc::pipe(fds.as_mut_ptr()) != 0 {
        return -1;
    }
    for &fd in fds.iter() {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags == -1
            || libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) != 0
            || libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC) != 0
        {
            libc::close(fds[0]);
            libc::close(fds[1]);
            return -1;
        }
    }
    0
}
