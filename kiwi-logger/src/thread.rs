// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

/// Get the id of the calling thread as seen by the kernel
pub fn id() -> u32 {
    // Safety: gettid(2) says this never fails
    unsafe { libc::gettid() as u32 }
}
