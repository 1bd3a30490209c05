//! Integration test root — end-to-end controller scenarios on the host.

mod controller_tests;
mod mock_hw;
