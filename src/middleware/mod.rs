// SPDX-License-Identifier: MIT

//! HTTP middleware.

pub mod headers;
