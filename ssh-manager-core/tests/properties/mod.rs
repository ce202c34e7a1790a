mod roundtrip_tests;
mod tamper_tests;
mod tree_tests;
mod upsert_tests;
