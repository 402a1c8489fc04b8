//! Integration tests for drivemirror-drive
//!
//! Uses wiremock to simulate the Drive v3 API and verifies end-to-end
//! behavior of listings, folder search, ranged downloads and exports.

mod common;

mod test_download;
mod test_listing;
