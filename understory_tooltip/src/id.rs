// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-unique tooltip identities.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity linking a trigger to its panel (`aria-describedby` ↔ `id`).
///
/// Ids have the form `tooltip-<base36>` and come from a process-wide counter,
/// so two live instances never share one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TooltipId(String);

impl TooltipId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let mut s = String::from("tooltip-");
        push_base36(&mut s, n);
        Self(s)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TooltipId").field(&self.0).finish()
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn push_base36(out: &mut String, mut n: usize) {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buf = Vec::new();
    loop {
        buf.push(DIGITS[n % 36]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.extend(buf.iter().rev().map(|&b| char::from(b)));
}
