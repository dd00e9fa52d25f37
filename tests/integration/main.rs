//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the two nodes against
//! mock adapters and an in-memory bus.  All tests run on the host
//! (x86_64) with no real hardware required.

// Links the std critical-section implementation used by the mailboxes.
use critical_section as _;

mod end_to_end_tests;
mod link_fault_tests;
mod mock_hw;
