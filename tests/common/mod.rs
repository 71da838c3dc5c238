#![allow(dead_code)]

pub use xvfb_maybe_test_utils::builders;
pub use xvfb_maybe_test_utils::{args, init_tracing, with_timeout};
