//! Gateway HTTP surface and proxy relay tests
