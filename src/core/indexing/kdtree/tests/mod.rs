// src/core/indexing/kdtree/tests/mod.rs

mod test_search;
